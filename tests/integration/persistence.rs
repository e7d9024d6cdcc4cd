use std::sync::Arc;

use tempfile::TempDir;
use treefs::config::TreefsConfig;
use treefs::error::{ApiError, FsError};
use treefs::namespace::Namespace;
use treefs::shell::render::OutputFormat;
use treefs::store::SledNodeStore;
use treefs::tooling::cli::{CliContext, Commands};
use treefs::types::ROOT_ID;

use crate::integration::support::{plain_shell, run};

fn open(dir: &TempDir) -> Namespace {
    let store = SledNodeStore::open(&dir.path().join("fs.db")).unwrap();
    Namespace::new(Arc::new(store))
}

#[test]
fn tree_and_content_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut shell = plain_shell(open(&dir));
        run(&mut shell, "mkdir docs");
        run(&mut shell, "mkdir docs/drafts");
        run(&mut shell, "touch docs/drafts/plan.txt");
        run(&mut shell, "write docs/drafts/plan.txt ship it");
        run(&mut shell, "cd docs");
    }

    let mut shell = plain_shell(open(&dir));
    assert_eq!(shell.session().current_dir(), ROOT_ID);
    assert_eq!(run(&mut shell, "ls"), "  docs/");
    assert_eq!(run(&mut shell, "cat /docs/drafts/plan.txt"), "ship it");
}

#[test]
fn removed_ids_are_not_handed_out_again() {
    let dir = TempDir::new().unwrap();
    let first = {
        let ns = open(&dir);
        let id = ns.create_directory(ROOT_ID, "gone").unwrap();
        ns.remove(ROOT_ID, "gone").unwrap();
        id
    };

    let ns = open(&dir);
    let second = ns.create_directory(ROOT_ID, "fresh").unwrap();
    assert!(second > first);
}

#[test]
fn cascade_delete_is_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let ns = open(&dir);
        ns.create_directory(ROOT_ID, "/a").unwrap();
        ns.create_directory(ROOT_ID, "/a/b").unwrap();
        ns.create_file(ROOT_ID, "/a/b/c").unwrap();
        assert_eq!(ns.remove(ROOT_ID, "/a").unwrap(), 3);
    }

    let ns = open(&dir);
    assert!(ns.list(ROOT_ID, None).unwrap().is_empty());
    assert_eq!(
        ns.read(ROOT_ID, "/a/b/c"),
        Err(FsError::NotFound("/a/b/c".to_string()))
    );
    // the name is free again
    ns.create_directory(ROOT_ID, "/a").unwrap();
}

#[test]
fn cli_context_uses_configured_store() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("cli.db");
    let mut config = TreefsConfig::default();
    config.storage.store_path = Some(store_path.clone());
    config.shell.color = false;

    {
        let context = CliContext::new(config.clone(), false).unwrap();
        assert_eq!(context.store_path(), Some(store_path.as_path()));
        context
            .execute(&Commands::Exec {
                line: vec!["mkdir".to_string(), "kept".to_string()],
                format: OutputFormat::Text,
            })
            .unwrap();
    }

    let context = CliContext::new(config, false).unwrap();
    let listing = context
        .execute(&Commands::Exec {
            line: vec!["ls".to_string()],
            format: OutputFormat::Text,
        })
        .unwrap();
    assert_eq!(listing, "  kept/");
}

#[test]
fn store_held_by_another_handle_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("held.db");
    let _held = SledNodeStore::open(&store_path).unwrap();

    let mut config = TreefsConfig::default();
    config.storage.store_path = Some(store_path);
    let err = match CliContext::new(config, false) {
        Ok(_) => panic!("second open should fail while the store is held"),
        Err(err) => err,
    };
    assert!(matches!(err, ApiError::Fs(FsError::StoreUnavailable(_))));
}
