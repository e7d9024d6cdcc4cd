use std::sync::Arc;

use treefs::config::ShellConfig;
use treefs::namespace::Namespace;
use treefs::session::Session;
use treefs::shell::Shell;
use treefs::store::MemoryNodeStore;

pub fn memory_namespace() -> Namespace {
    Namespace::new(Arc::new(MemoryNodeStore::new()))
}

/// Plain-text shell over a fresh in-memory store
pub fn plain_shell(namespace: Namespace) -> Shell {
    let config = ShellConfig {
        color: false,
        ..ShellConfig::default()
    };
    Shell::new(Session::new(namespace), config)
}

pub fn run(shell: &mut Shell, line: &str) -> String {
    shell.execute_line(line).text().to_string()
}
