//! Line tokenization into typed commands.

use crate::session::Command;
use crate::shell::help;
use thiserror::Error;

/// Why a line could not be turned into a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Command not found: '{0}'")]
    UnknownCommand(String),
}

/// Parse one input line. Blank lines yield `None`.
///
/// The command word is case-insensitive. Extra arguments after the ones a
/// command takes are ignored, except for `write`, whose content is the rest
/// of the line with its inner spacing intact.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = split_token(line);
    let name = word.to_lowercase();
    let (arg, remainder) = split_token(rest);
    let arg = (!arg.is_empty()).then(|| arg.to_string());

    let command = match name.as_str() {
        "ls" => Command::List { path: arg },
        "mkdir" => Command::MakeDirectory {
            path: required(arg, "mkdir")?,
        },
        "cd" => Command::ChangeDirectory {
            path: required(arg, "cd")?,
        },
        "touch" => Command::Touch {
            path: required(arg, "touch")?,
        },
        "cat" => Command::Cat {
            path: required(arg, "cat")?,
        },
        "write" => {
            let path = required(arg, "write")?;
            if remainder.is_empty() {
                return Err(usage("write"));
            }
            Command::Write {
                path,
                content: strip_quotes(remainder).to_string(),
            }
        }
        "rm" => Command::Remove {
            path: required(arg, "rm")?,
        },
        "pwd" => Command::Pwd,
        "help" => Command::Help {
            topic: arg.map(|topic| topic.to_lowercase()),
        },
        "exit" => Command::Exit,
        _ => return Err(ParseError::UnknownCommand(name)),
    };
    Ok(Some(command))
}

fn required(arg: Option<String>, command: &str) -> Result<String, ParseError> {
    arg.ok_or_else(|| usage(command))
}

fn usage(command: &str) -> ParseError {
    ParseError::Usage(help::usage(command).unwrap_or("help [command]"))
}

/// Split off the first whitespace-delimited token
fn split_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(pos) => (&input[..pos], input[pos..].trim_start()),
        None => (input, ""),
    }
}

/// Drop one pair of matching enclosing quotes
fn strip_quotes(content: &str) -> &str {
    for quote in ['"', '\''] {
        if content.len() >= 2 && content.starts_with(quote) && content.ends_with(quote) {
            return &content[1..content.len() - 1];
        }
    }
    content
}
