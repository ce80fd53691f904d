use carnet_core::{CommandDispatcher, DispatchError};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn capture_then_search_round_trip() {
    let root = TempDir::new().expect("temp dir");
    let dispatcher = CommandDispatcher::new(root.path());

    let reply = dispatcher
        .handle("#shopping# buy oat milk", "alice", &[])
        .expect("capture succeeds");
    assert_eq!(reply, "'#shopping#...' saved.");

    let reply = dispatcher
        .handle("s oat milk", "alice", &[])
        .expect("search succeeds");
    assert_eq!(reply, "Search results (1 found):\nbuy oat milk");

    let log = dispatcher.store().load("alice");
    assert_eq!(log.entries.len(), 1);
    assert_eq!(log.entries[0].tags, vec!["shopping".to_string()]);
    assert_eq!(log.entries[0].message, "buy oat milk");
}

#[test]
fn search_against_unknown_user_reports_no_notes() {
    let root = TempDir::new().expect("temp dir");
    let dispatcher = CommandDispatcher::new(root.path());

    let reply = dispatcher
        .handle("s anything", "nobody", &[])
        .expect("search succeeds");
    assert_eq!(reply, "No notes recorded.");
}

#[test]
fn search_with_no_matches_reports_no_results() {
    let root = TempDir::new().expect("temp dir");
    let dispatcher = CommandDispatcher::new(root.path());

    dispatcher
        .handle("a note about tea", "alice", &[])
        .expect("capture succeeds");
    let reply = dispatcher
        .handle("s coffee", "alice", &[])
        .expect("search succeeds");
    assert_eq!(reply, "No results found.");
}

#[test]
fn empty_message_leaves_log_unchanged() {
    let root = TempDir::new().expect("temp dir");
    let dispatcher = CommandDispatcher::new(root.path());

    dispatcher
        .handle("one real note", "alice", &[])
        .expect("capture succeeds");

    let err = dispatcher
        .handle("   ", "alice", &[])
        .expect_err("empty message must be rejected");
    assert!(matches!(err, DispatchError::EmptyMessage));

    let log = dispatcher.store().load("alice");
    assert_eq!(log.entries.len(), 1);
}

#[test]
fn message_starting_with_bare_s_is_captured_not_searched() {
    let root = TempDir::new().expect("temp dir");
    let dispatcher = CommandDispatcher::new(root.path());

    let reply = dispatcher
        .handle("simple note", "alice", &[])
        .expect("capture succeeds");
    assert!(reply.ends_with("saved."));
    assert_eq!(dispatcher.store().load("alice").entries.len(), 1);
}

#[test]
fn one_failed_attachment_copy_does_not_abort_capture() {
    let root = TempDir::new().expect("temp dir");
    let inbox = TempDir::new().expect("temp dir");
    let dispatcher = CommandDispatcher::new(root.path());

    let good = inbox.path().join("receipt.pdf");
    std::fs::write(&good, b"pdf bytes").expect("write attachment");
    let missing = inbox.path().join("vanished.png");

    let attachments = vec![good, missing];
    let reply = dispatcher
        .handle("note with files", "alice", &attachments)
        .expect("capture succeeds despite one failed copy");
    assert!(reply.ends_with("saved."));

    let log = dispatcher.store().load("alice");
    assert_eq!(log.entries.len(), 1);
    let stored = log.entries[0]
        .attachments
        .as_ref()
        .expect("one attachment stored");
    assert_eq!(stored.len(), 1);
    assert!(stored[0].ends_with("receipt.pdf"));
    assert!(PathBuf::from(&stored[0]).exists());
}

#[test]
fn all_attachment_copies_failing_still_saves_the_note_without_attachments() {
    let root = TempDir::new().expect("temp dir");
    let dispatcher = CommandDispatcher::new(root.path());

    let attachments = vec![PathBuf::from("/nonexistent/one"), PathBuf::from("/nonexistent/two")];
    dispatcher
        .handle("note alone", "alice", &attachments)
        .expect("capture succeeds");

    let log = dispatcher.store().load("alice");
    assert_eq!(log.entries.len(), 1);
    assert_eq!(log.entries[0].attachments, None);
}

#[test]
fn trailing_url_is_stored_on_the_entry_not_in_the_body() {
    let root = TempDir::new().expect("temp dir");
    let dispatcher = CommandDispatcher::new(root.path());

    dispatcher
        .handle("read this later https://blog.example/post", "alice", &[])
        .expect("capture succeeds");

    let log = dispatcher.store().load("alice");
    assert_eq!(log.entries[0].message, "read this later");
    assert_eq!(
        log.entries[0].url.as_deref(),
        Some("https://blog.example/post")
    );
}
