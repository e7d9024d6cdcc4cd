use treefs::error::FsError;
use treefs::types::{NodeKind, ROOT_ID};

use crate::integration::support::memory_namespace;

#[test]
fn touch_twice_is_idempotent() {
    let ns = memory_namespace();
    ns.create_file(ROOT_ID, "/f").unwrap();
    ns.write(ROOT_ID, "/f", "kept").unwrap();
    let before = ns.resolve(ROOT_ID, "/f").unwrap();

    ns.create_file(ROOT_ID, "/f").unwrap();

    assert_eq!(ns.resolve(ROOT_ID, "/f").unwrap(), before);
    assert_eq!(ns.read(ROOT_ID, "/f").unwrap(), "kept");
}

#[test]
fn mkdir_over_existing_path_already_exists() {
    let ns = memory_namespace();
    ns.create_file(ROOT_ID, "/f").unwrap();
    ns.create_directory(ROOT_ID, "/d").unwrap();

    assert_eq!(
        ns.create_directory(ROOT_ID, "/f"),
        Err(FsError::AlreadyExists("/f".to_string()))
    );
    assert_eq!(
        ns.create_directory(ROOT_ID, "/d"),
        Err(FsError::AlreadyExists("/d".to_string()))
    );
}

#[test]
fn rm_cascades_to_every_descendant() {
    let ns = memory_namespace();
    ns.create_directory(ROOT_ID, "/a").unwrap();
    ns.create_directory(ROOT_ID, "/a/b").unwrap();
    ns.create_file(ROOT_ID, "/a/b/c").unwrap();

    assert_eq!(ns.remove(ROOT_ID, "/a").unwrap(), 3);

    for path in ["/a", "/a/b", "/a/b/c"] {
        assert_eq!(
            ns.change_directory(ROOT_ID, path),
            Err(FsError::NotFound(path.to_string()))
        );
        assert!(ns.resolve(ROOT_ID, path).unwrap().node_id().is_none());
    }
    assert!(ns.list(ROOT_ID, None).unwrap().is_empty());
}

#[test]
fn write_then_read_round_trips() {
    let ns = memory_namespace();
    ns.create_file(ROOT_ID, "/f").unwrap();
    ns.write(ROOT_ID, "/f", "hello world").unwrap();
    assert_eq!(ns.read(ROOT_ID, "/f").unwrap(), "hello world");
}

#[test]
fn navigation_failures_leave_start_usable() {
    let ns = memory_namespace();
    assert_eq!(
        ns.change_directory(ROOT_ID, "/nope"),
        Err(FsError::NotFound("/nope".to_string()))
    );
    assert_eq!(ns.change_directory(ROOT_ID, "..").unwrap(), ROOT_ID);
}

#[test]
fn reserved_and_through_file_names_are_invalid() {
    let ns = memory_namespace();
    ns.create_file(ROOT_ID, "f").unwrap();

    assert!(matches!(
        ns.create_directory(ROOT_ID, "f/sub"),
        Err(FsError::InvalidPath(_))
    ));
    assert!(matches!(
        ns.create_directory(ROOT_ID, "missing/sub"),
        Err(FsError::InvalidPath(_))
    ));
    assert!(matches!(ns.read(ROOT_ID, "f/sub"), Err(FsError::NotADirectory(_))));

    let kinds: Vec<NodeKind> = ns
        .list(ROOT_ID, None)
        .unwrap()
        .into_iter()
        .map(|e| e.kind)
        .collect();
    assert_eq!(kinds, vec![NodeKind::File]);
}
