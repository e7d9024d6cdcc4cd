//! Front ends: an interactive terminal loop and a scripted loop.

use super::Shell;
use crate::error::ApiError;
use dialoguer::Input;
use std::io::{BufRead, IsTerminal, Write};
use tracing::{debug, info, warn};

/// Run lines from `input` until it is exhausted or `exit` is read,
/// writing every non-empty result line to `output`.
///
/// A line that is not valid UTF-8 is reported as a failed line and the
/// script carries on; only I/O errors abort it.
pub fn run_script<R: BufRead, W: Write>(
    shell: &mut Shell,
    input: R,
    output: &mut W,
) -> Result<usize, ApiError> {
    let mut executed = 0;
    let mut failed = 0;
    for line in input.split(b'\n') {
        let bytes = line?;
        executed += 1;
        let outcome = match std::str::from_utf8(&bytes) {
            Ok(text) => shell.execute_line(text.strip_suffix('\r').unwrap_or(text)),
            Err(err) => {
                warn!(line = executed, error = %err, "script line is not valid UTF-8");
                shell.reject_line(&format!("line {} is not valid UTF-8", executed))
            }
        };
        if outcome.is_failure() {
            failed += 1;
        }
        if !outcome.text().is_empty() {
            writeln!(output, "{}", outcome.text())?;
        }
        if outcome.is_exit() {
            break;
        }
    }
    output.flush()?;
    debug!(executed, failed, "script finished");
    Ok(executed)
}

/// Interactive loop on the controlling terminal.
///
/// Falls back to [`run_script`] over stdin when stdin is not a terminal, so
/// piped input behaves like a script.
pub fn run_interactive(shell: &mut Shell) -> Result<(), ApiError> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        let mut stdout = std::io::stdout();
        run_script(shell, stdin.lock(), &mut stdout)?;
        return Ok(());
    }

    info!("interactive session started");
    if shell.config().banner {
        println!("{}", shell.banner());
    }

    loop {
        let line: String = match Input::new()
            .with_prompt(shell.prompt().trim_end())
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(err) => {
                debug!(error = %err, "input closed");
                break;
            }
        };

        let outcome = shell.execute_line(&line);
        if !outcome.text().is_empty() {
            println!("{}", outcome.text());
        }
        if outcome.is_exit() {
            break;
        }
    }

    info!("interactive session ended");
    Ok(())
}
