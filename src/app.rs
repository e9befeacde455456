//! The main application logic, decoupled from the entry point.
//!
//! `App` wires the controller to a backend and a terminal view and exposes
//! the ways the console can be driven: an interactive session or one-shot
//! commands.

use crate::{
    backend::HttpBackend,
    controller::{AlertConsole, PendingSend, SendOutcome},
    core::{AlertBackend, ConsoleView},
    terminal::TerminalView,
};
use anyhow::{bail, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument};

pub const SEND_DISABLED_NOTICE: &str = "Send is disabled while an alert is in flight.";

const HELP: &str = "Commands:
  refresh          reload the subscriber list
  message <text>   type <text> into the message field
  send [<text>]    send the message field (or <text>) to all subscribers
  show             print the current console state
  help             print this help
  quit             leave the console";

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Refresh,
    Message(String),
    Send(Option<String>),
    Show,
    Help,
    Quit,
    Blank,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, Some(rest)),
            None => (line.trim(), None),
        };
        match (word, rest) {
            ("", _) => SessionCommand::Blank,
            ("refresh", _) => SessionCommand::Refresh,
            ("message", text) => SessionCommand::Message(text.unwrap_or_default().to_string()),
            ("send", Some(text)) => SessionCommand::Send(Some(text.to_string())),
            ("send", None) => SessionCommand::Send(None),
            ("show", _) => SessionCommand::Show,
            ("help", _) => SessionCommand::Help,
            ("quit" | "exit", _) => SessionCommand::Quit,
            (other, _) => SessionCommand::Unknown(other.to_string()),
        }
    }
}

/// A handle to the wired-up console.
pub struct App {
    console: Arc<AlertConsole>,
    view: Arc<TerminalView>,
}

impl App {
    /// Creates a new `AppBuilder` for a backend at `backend_url`.
    pub fn builder(backend_url: impl Into<String>) -> AppBuilder {
        AppBuilder::new(backend_url)
    }

    pub fn console(&self) -> &Arc<AlertConsole> {
        &self.console
    }

    pub fn view(&self) -> &Arc<TerminalView> {
        &self.view
    }

    /// Loads and prints the subscriber list once.
    pub async fn list(&self) -> Result<()> {
        self.console.load_subscribers().await?;
        Ok(())
    }

    /// Sends a single alert.
    pub async fn send(&self, message: &str) -> Result<()> {
        self.view.set_message(message);
        match self.console.send_alert().await? {
            SendOutcome::Delivered(_) => Ok(()),
            SendOutcome::EmptyMessage => bail!("Refusing to send an empty message"),
        }
    }

    /// Runs the interactive session until `quit` or end of input.
    ///
    /// The subscriber list is loaded as soon as the session starts. Loads
    /// and sends run as independent tasks; the session waits for them before
    /// returning. A `send` captures the message and disables the control
    /// before the next line is read.
    #[instrument(skip_all)]
    pub async fn run_console<R>(&self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        info!("Console session started");
        let mut tasks = JoinSet::new();
        self.spawn_load(&mut tasks);

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match SessionCommand::parse(&line) {
                SessionCommand::Refresh => self.spawn_load(&mut tasks),
                SessionCommand::Message(text) => self.view.set_message(&text),
                SessionCommand::Send(text) => {
                    if let Some(text) = text {
                        self.view.set_message(&text);
                    }
                    if !self.view.is_send_enabled() {
                        self.view.print(SEND_DISABLED_NOTICE);
                    } else if let Some(pending) = self.console.begin_send() {
                        self.spawn_send(&mut tasks, pending);
                    }
                }
                SessionCommand::Show => self.view.show(),
                SessionCommand::Help => self.view.print(HELP),
                SessionCommand::Quit => break,
                SessionCommand::Blank => {}
                SessionCommand::Unknown(word) => {
                    self.view.print(&format!("Unknown command '{}'. Type 'help'.", word))
                }
            }

            while let Some(joined) = tasks.try_join_next() {
                if let Err(e) = joined {
                    error!(error = %e, "Console task failed");
                }
            }
        }

        debug!(pending = tasks.len(), "Waiting for in-flight requests");
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Console task failed");
            }
        }
        info!("Console session ended");
        Ok(())
    }

    // Failures have already been logged and shown by the controller.
    fn spawn_load(&self, tasks: &mut JoinSet<()>) {
        let console = self.console.clone();
        tasks.spawn(async move {
            let _ = console.load_subscribers().await;
        });
    }

    fn spawn_send(&self, tasks: &mut JoinSet<()>, pending: PendingSend) {
        let console = self.console.clone();
        tasks.spawn(async move {
            let _ = console.complete_send(pending).await;
        });
    }
}

/// Builder for the application.
///
/// Lets tests swap the backend or the view's output.
pub struct AppBuilder {
    backend_url: String,
    backend_override: Option<Arc<dyn AlertBackend>>,
    view_override: Option<Arc<TerminalView>>,
}

impl AppBuilder {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            backend_override: None,
            view_override: None,
        }
    }

    /// Overrides the backend client for testing.
    pub fn backend_override(mut self, backend: Arc<dyn AlertBackend>) -> Self {
        self.backend_override = Some(backend);
        self
    }

    /// Overrides the terminal view, e.g. to capture its output.
    pub fn view_override(mut self, view: Arc<TerminalView>) -> Self {
        self.view_override = Some(view);
        self
    }

    pub fn build(self) -> App {
        let backend = self
            .backend_override
            .unwrap_or_else(|| Arc::new(HttpBackend::new(self.backend_url.clone())));
        let view = self
            .view_override
            .unwrap_or_else(|| Arc::new(TerminalView::stdout()));
        let console_view: Arc<dyn ConsoleView> = view.clone();
        App {
            console: Arc::new(AlertConsole::new(backend, console_view)),
            view,
        }
    }
}
