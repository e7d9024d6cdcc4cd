//! Line shell over a [`Session`].
//!
//! Tokenizes lines into commands, dispatches them and renders the result.
//! The interactive and scripted loops in [`repl`] are two front ends over
//! the same [`Shell::execute_line`].

pub mod command;
pub mod help;
pub mod render;
pub mod repl;

use crate::config::ShellConfig;
use crate::session::{CommandOutput, Session};
use command::{parse_line, ParseError};
use render::OutputFormat;
use tracing::debug;

pub use repl::{run_interactive, run_script};

/// What the front end should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text (if any) and read the next line
    Continue(String),
    /// The line failed; print the rendered error and read the next line
    Failed(String),
    /// Print the text and stop
    Exit(String),
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Continue(text) | Outcome::Failed(text) | Outcome::Exit(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Outcome::Exit(_))
    }
}

/// A running shell: session state plus presentation settings
pub struct Shell {
    session: Session,
    config: ShellConfig,
    format: OutputFormat,
}

impl Shell {
    pub fn new(session: Session, config: ShellConfig) -> Self {
        Self {
            session,
            config,
            format: OutputFormat::Text,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Prompt for the current directory. `{id}` and `{path}` are substituted.
    pub fn prompt(&self) -> String {
        let id = self.session.current_dir().to_string();
        let mut prompt = self.config.prompt.replace("{id}", &id);
        if prompt.contains("{path}") {
            let path = self
                .session
                .current_path()
                .unwrap_or_else(|_| "?".to_string());
            prompt = prompt.replace("{path}", &path);
        }
        prompt
    }

    /// Welcome text shown when an interactive session starts
    pub fn banner(&self) -> String {
        format!(
            "Welcome to the File System Simulator!\nCommands: {}.",
            help::command_names()
        )
    }

    /// Parse, dispatch and render one line
    pub fn execute_line(&mut self, line: &str) -> Outcome {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Outcome::Continue(String::new()),
            Err(err) => return Outcome::Failed(self.render_parse_error(&err)),
        };
        debug!(?command, "dispatching command");

        match self.session.dispatch(command) {
            Ok(CommandOutput::Exit) => Outcome::Exit(self.render(&CommandOutput::Exit)),
            Ok(output) => Outcome::Continue(self.render(&output)),
            Err(err) => Outcome::Failed(match self.format {
                OutputFormat::Text => render::render_error_text(&err.to_string()),
                OutputFormat::Json => render::render_error_json(err.kind(), &err.to_string()),
            }),
        }
    }

    /// Failed outcome for input that never reached the parser
    pub fn reject_line(&self, message: &str) -> Outcome {
        Outcome::Failed(match self.format {
            OutputFormat::Text => render::render_error_text(message),
            OutputFormat::Json => render::render_error_json("invalid_input", message),
        })
    }

    fn render(&self, output: &CommandOutput) -> String {
        match self.format {
            OutputFormat::Text => render::render_text(output, self.config.color),
            OutputFormat::Json => render::render_json(output),
        }
    }

    fn render_parse_error(&self, err: &ParseError) -> String {
        match (self.format, err) {
            (OutputFormat::Text, ParseError::UnknownCommand(_)) => err.to_string(),
            (OutputFormat::Text, ParseError::Usage(_)) => err.to_string(),
            (OutputFormat::Json, ParseError::UnknownCommand(_)) => {
                render::render_error_json("unknown_command", &err.to_string())
            }
            (OutputFormat::Json, ParseError::Usage(_)) => {
                render::render_error_json("usage", &err.to_string())
            }
        }
    }
}
