use treefs::types::ROOT_ID;

use crate::integration::support::{memory_namespace, plain_shell, run};

#[test]
fn docs_walkthrough_from_root() {
    let mut shell = plain_shell(memory_namespace());

    assert_eq!(run(&mut shell, "mkdir docs"), "");
    assert_eq!(run(&mut shell, "cd docs"), "");
    assert_eq!(run(&mut shell, "pwd"), "/docs");
    assert_eq!(run(&mut shell, "touch notes.txt"), "");
    assert_eq!(run(&mut shell, "write notes.txt \"draft v1\""), "");
    assert_eq!(run(&mut shell, "cd .."), "");
    assert_eq!(run(&mut shell, "cat docs/notes.txt"), "draft v1");
    assert_eq!(run(&mut shell, "rm docs"), "");
    assert_eq!(run(&mut shell, "ls"), "");

    let outcome = shell.execute_line("cd docs");
    assert!(outcome.is_failure());
    assert_eq!(outcome.text(), "Error: No such file or directory 'docs'");
    assert_eq!(shell.session().current_dir(), ROOT_ID);
}

#[test]
fn removed_current_directory_stays_put_until_cd() {
    let namespace = memory_namespace();
    let mut inside = plain_shell(namespace.clone());
    let mut other = plain_shell(namespace);

    run(&mut inside, "mkdir a");
    run(&mut inside, "touch a/victim");
    run(&mut inside, "cd a");
    let stale = inside.session().current_dir();

    run(&mut other, "rm /a");
    run(&mut other, "touch /victim");

    assert_eq!(
        run(&mut inside, "rm victim"),
        "Error: No such file or directory 'victim'"
    );
    assert_eq!(run(&mut inside, "pwd"), "Error: No such file or directory '.'");
    assert_eq!(inside.session().current_dir(), stale);
    assert_eq!(run(&mut other, "ls /"), "  victim");

    run(&mut inside, "cd /");
    assert_eq!(inside.session().current_dir(), ROOT_ID);
    assert_eq!(run(&mut inside, "ls"), "  victim");
}

#[test]
fn listing_is_sorted_and_marks_directories() {
    let mut shell = plain_shell(memory_namespace());
    run(&mut shell, "touch zeta");
    run(&mut shell, "mkdir alpha");
    run(&mut shell, "touch mid");
    assert_eq!(run(&mut shell, "ls"), "  alpha/\n  mid\n  zeta");
    assert_eq!(run(&mut shell, "ls /alpha"), "");
}

#[test]
fn write_preserves_inner_spacing() {
    let mut shell = plain_shell(memory_namespace());
    run(&mut shell, "touch f");
    run(&mut shell, "write f hello   spaced  world");
    assert_eq!(run(&mut shell, "cat f"), "hello   spaced  world");
    run(&mut shell, "write f replaced");
    assert_eq!(run(&mut shell, "cat f"), "replaced");
}

#[test]
fn errors_keep_the_session_alive() {
    let mut shell = plain_shell(memory_namespace());
    run(&mut shell, "touch f");
    assert_eq!(run(&mut shell, "cd f"), "Error: 'f' is not a directory");
    assert_eq!(run(&mut shell, "rm /"), "Error: Cannot remove the root directory");
    assert_eq!(run(&mut shell, "mkdir f"), "Error: 'f' already exists");
    assert_eq!(run(&mut shell, "cat /"), "Error: '/' is a directory");
    assert_eq!(run(&mut shell, "pwd"), "/");
}
