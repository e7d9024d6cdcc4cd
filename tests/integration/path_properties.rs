use proptest::prelude::*;
use treefs::namespace::Namespace;
use treefs::resolver::Resolution;
use treefs::types::{NodeId, NodeKind, ROOT_ID};

use crate::integration::support::memory_namespace;

/// One creation step: parent chosen among the directories made so far
#[derive(Debug, Clone)]
struct Step {
    parent: usize,
    name: String,
    directory: bool,
}

fn step() -> impl Strategy<Value = Step> {
    (any::<usize>(), "[a-d]{1,2}", any::<bool>()).prop_map(|(parent, name, directory)| Step {
        parent,
        name,
        directory,
    })
}

/// Build a tree from `steps`, returning the namespace, every directory id and
/// every node id (root included)
fn build(steps: &[Step]) -> (Namespace, Vec<NodeId>, Vec<NodeId>) {
    let namespace = memory_namespace();
    let mut dirs = vec![ROOT_ID];
    let mut nodes = vec![ROOT_ID];
    for step in steps {
        let parent = dirs[step.parent % dirs.len()];
        let kind = if step.directory {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        if let Ok(id) = namespace.store().create_child(parent, &step.name, kind) {
            nodes.push(id);
            if step.directory {
                dirs.push(id);
            }
        }
    }
    (namespace, dirs, nodes)
}

fn relative_path() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-d]{1,2}",
            Just(".".to_string()),
            Just("..".to_string()),
            Just(String::new()),
        ],
        0..6,
    )
    .prop_map(|segments| segments.join("/"))
}

proptest! {
    #[test]
    fn path_of_resolves_back_from_every_directory(steps in prop::collection::vec(step(), 0..24)) {
        let (namespace, dirs, nodes) = build(&steps);
        for &node in &nodes {
            let path = namespace.path_of(node).unwrap();
            prop_assert!(path.starts_with('/'));
            for &start in &dirs {
                let resolution = namespace.resolve(start, &path).unwrap();
                prop_assert_eq!(resolution.node_id(), Some(node), "path {} from {}", path, start);
            }
        }
    }

    #[test]
    fn resolved_relative_paths_canonicalise(
        steps in prop::collection::vec(step(), 0..24),
        start in any::<usize>(),
        path in relative_path(),
    ) {
        let (namespace, dirs, _) = build(&steps);
        let start = dirs[start % dirs.len()];
        if let Resolution::Resolved { id, kind } = namespace.resolve(start, &path).unwrap() {
            let absolute = namespace.path_of(id).unwrap();
            let again = namespace.resolve(ROOT_ID, &absolute).unwrap();
            prop_assert_eq!(again, Resolution::Resolved { id, kind });
        }
    }

    #[test]
    fn dot_dot_never_escapes_the_root(depth in 0usize..8) {
        let namespace = memory_namespace();
        let path = vec![".."; depth].join("/");
        let resolution = namespace.resolve(ROOT_ID, &path).unwrap();
        prop_assert_eq!(resolution.node_id(), Some(ROOT_ID));
    }
}
