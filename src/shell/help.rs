//! Help table for the shell commands.

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

/// One row of the help table
#[derive(Debug, Clone, Copy)]
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: "ls",
        usage: "ls [path]",
        description: "List the contents of a directory (default: current)",
    },
    CommandHelp {
        name: "mkdir",
        usage: "mkdir <path>",
        description: "Create a new directory",
    },
    CommandHelp {
        name: "cd",
        usage: "cd <path>",
        description: "Change the current directory (supports '..' and '/')",
    },
    CommandHelp {
        name: "touch",
        usage: "touch <path>",
        description: "Create an empty file; does nothing if it exists",
    },
    CommandHelp {
        name: "cat",
        usage: "cat <path>",
        description: "Print the content of a file",
    },
    CommandHelp {
        name: "write",
        usage: "write <path> <content...>",
        description: "Replace the content of a file with the rest of the line",
    },
    CommandHelp {
        name: "rm",
        usage: "rm <path>",
        description: "Remove a file or a directory with everything inside it",
    },
    CommandHelp {
        name: "pwd",
        usage: "pwd",
        description: "Print the absolute path of the current directory",
    },
    CommandHelp {
        name: "help",
        usage: "help [command]",
        description: "Show this table, or the usage of one command",
    },
    CommandHelp {
        name: "exit",
        usage: "exit",
        description: "Leave the shell",
    },
];

pub fn find(name: &str) -> Option<&'static CommandHelp> {
    COMMANDS.iter().find(|entry| entry.name == name)
}

pub fn usage(name: &str) -> Option<&'static str> {
    find(name).map(|entry| entry.usage)
}

/// Comma separated command names for the welcome banner
pub fn command_names() -> String {
    COMMANDS
        .iter()
        .map(|entry| format!("'{}'", entry.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the full table, or a single command's help
pub fn render(topic: Option<&str>) -> String {
    match topic {
        Some(name) => match find(name) {
            Some(entry) => format!("Usage: {}\n  {}", entry.usage, entry.description),
            None => format!("No help for '{}'", name),
        },
        None => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Command", "Usage", "Description"]);
            for entry in COMMANDS {
                table.add_row(vec![entry.name, entry.usage, entry.description]);
            }
            table.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_has_usage() {
        for name in ["ls", "mkdir", "cd", "touch", "cat", "write", "rm", "pwd", "help", "exit"] {
            assert!(usage(name).is_some(), "missing usage for {name}");
        }
        assert!(usage("nope").is_none());
    }

    #[test]
    fn test_render_table_lists_all_commands() {
        let text = render(None);
        for entry in COMMANDS {
            assert!(text.contains(entry.usage), "table lacks {}", entry.usage);
        }
    }

    #[test]
    fn test_render_single_topic() {
        assert_eq!(
            render(Some("rm")),
            "Usage: rm <path>\n  Remove a file or a directory with everything inside it"
        );
        assert_eq!(render(Some("bogus")), "No help for 'bogus'");
    }
}
