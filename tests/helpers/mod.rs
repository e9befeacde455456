#![allow(dead_code)]

pub mod recording_view;
pub mod scripted_backend;

use std::time::Duration;

/// Polls `condition` until it holds, panicking after `timeout_duration`.
pub async fn wait_until<F>(mut condition: F, timeout_duration: Duration)
where
    F: FnMut() -> bool,
{
    let wait_future = async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };

    tokio::time::timeout(timeout_duration, wait_future)
        .await
        .expect("Timed out waiting for condition");
}
