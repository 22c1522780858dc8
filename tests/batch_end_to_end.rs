use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;
use veri_move::mover::NoProgress;
use veri_move::{
    BatchError, BatchRunner, CollisionDecision, FailReason, FixedPolicy, MoveOutcome, ProgressEvent, Queue,
    SkipReason,
};

const MIB: u64 = 1024 * 1024;

fn dirs() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let src = base.join("src");
    let dst = base.join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    (td, src, dst)
}

fn write(path: &Path, data: &[u8]) -> PathBuf {
    fs::write(path, data).unwrap();
    path.to_path_buf()
}

#[test]
fn single_file_is_moved_and_verified() {
    let (_td, src, dst) = dirs();
    let a = write(&src.join("a.txt"), b"hello");

    let mut policy = FixedPolicy::Skip;
    let report = BatchRunner::new(&mut policy, &NoProgress)
        .with_interrupt_check(|| false)
        .run(&[a.clone()], &dst)
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.moved(), 1);
    assert!(!a.exists());
    assert_eq!(fs::read(dst.join("a.txt")).unwrap(), b"hello");
}

#[test]
fn collision_rename_lands_under_new_name() {
    let (_td, src, dst) = dirs();
    let a = write(&src.join("a.txt"), b"new");
    write(&dst.join("a.txt"), b"old");

    let mut policy = |_: &Path, _: &std::ffi::OsStr| CollisionDecision::RenameTo("a_copy.txt".into());
    let report = BatchRunner::new(&mut policy, &NoProgress)
        .with_interrupt_check(|| false)
        .run(&[a], &dst)
        .unwrap();

    assert!(report.is_success());
    assert_eq!(fs::read(dst.join("a.txt")).unwrap(), b"old");
    assert_eq!(fs::read(dst.join("a_copy.txt")).unwrap(), b"new");
}

#[test]
fn vanished_file_fails_alone() {
    let (_td, src, dst) = dirs();
    let a = write(&src.join("a.txt"), b"one");
    let b = write(&src.join("b.txt"), b"two");
    let mut q = Queue::new();
    q.add(&a);
    q.add(&b);
    fs::remove_file(&b).unwrap();

    let mut policy = FixedPolicy::Skip;
    let report = BatchRunner::new(&mut policy, &NoProgress)
        .with_interrupt_check(|| false)
        .run(&q.snapshot(), &dst)
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.moved(), 1);
    assert_eq!(report.outcomes[1].1, MoveOutcome::Failed(FailReason::MissingFile));
    let lines = report.failures();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("b.txt: missing file"), "{lines:?}");
    assert!(dst.join("a.txt").exists());
}

#[test]
fn insufficient_space_moves_nothing() {
    let (_td, src, dst) = dirs();
    let big = src.join("big.bin");
    let f = fs::File::create(&big).unwrap();
    f.set_len(10 * MIB).unwrap();
    drop(f);

    let mut policy = FixedPolicy::Skip;
    let err = BatchRunner::new(&mut policy, &NoProgress)
        .with_interrupt_check(|| false)
        .with_free_space(|_| 5 * MIB)
        .run(&[big.clone()], &dst)
        .unwrap_err();

    match err {
        BatchError::InsufficientSpace { required, available, .. } => {
            assert_eq!(required, 10 * MIB);
            assert_eq!(available, 5 * MIB);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(big.exists());
    assert_eq!(fs::read_dir(&dst).unwrap().count(), 0);
}

#[test]
fn preconditions_abort_before_any_move() {
    let (_td, src, dst) = dirs();
    let a = write(&src.join("a.txt"), b"x");
    let mut policy = FixedPolicy::Skip;

    let err = BatchRunner::new(&mut policy, &NoProgress).run(&[], &dst).unwrap_err();
    assert!(matches!(err, BatchError::EmptyQueue));
    assert_eq!(err.to_string(), "no files");

    let err = BatchRunner::new(&mut policy, &NoProgress)
        .run(&[a.clone()], Path::new(""))
        .unwrap_err();
    assert!(matches!(err, BatchError::NoDestination));
    assert_eq!(err.to_string(), "no destination");

    let err = BatchRunner::new(&mut policy, &NoProgress)
        .run(&[a.clone()], &dst.join("missing"))
        .unwrap_err();
    assert!(matches!(err, BatchError::DestinationInvalid { .. }));
    assert!(a.exists());
}

#[test]
fn interrupt_skips_remaining_files() {
    let (_td, src, dst) = dirs();
    let a = write(&src.join("a.txt"), b"1");
    let b = write(&src.join("b.txt"), b"2");
    let c = write(&src.join("c.txt"), b"3");

    // let the first file through, then stop
    let calls = std::cell::Cell::new(0);
    let mut policy = FixedPolicy::Skip;
    let report = BatchRunner::new(&mut policy, &NoProgress)
        .with_interrupt_check(|| {
            calls.set(calls.get() + 1);
            calls.get() > 1
        })
        .run(&[a, b.clone(), c.clone()], &dst)
        .unwrap();

    assert_eq!(report.moved(), 1);
    assert_eq!(report.outcomes[1].1, MoveOutcome::Skipped(SkipReason::Interrupted));
    assert_eq!(report.outcomes[2].1, MoveOutcome::Skipped(SkipReason::Interrupted));
    assert!(b.exists() && c.exists());
    let lines = report.failures();
    assert!(lines[0].ends_with("b.txt: interrupted"), "{lines:?}");
    assert!(lines[1].ends_with("c.txt: interrupted"), "{lines:?}");
}

#[test]
fn progress_reports_each_file_in_order() {
    let (_td, src, dst) = dirs();
    let a = write(&src.join("a.txt"), b"1");
    let b = write(&src.join("b.txt"), b"2");

    let seen = std::cell::RefCell::new(Vec::new());
    let sink = |e: &ProgressEvent| seen.borrow_mut().push((e.index, e.total, e.file_name.clone()));
    let mut policy = FixedPolicy::Skip;
    BatchRunner::new(&mut policy, &sink)
        .with_interrupt_check(|| false)
        .run(&[a, b], &dst)
        .unwrap();

    assert_eq!(
        seen.into_inner(),
        vec![(1, 2, "a.txt".to_string()), (2, 2, "b.txt".to_string())]
    );
}

#[test]
fn skip_policy_leaves_both_files() {
    let (_td, src, dst) = dirs();
    let a = write(&src.join("a.txt"), b"new");
    write(&dst.join("a.txt"), b"old");

    let mut policy = FixedPolicy::Skip;
    let report = BatchRunner::new(&mut policy, &NoProgress)
        .with_interrupt_check(|| false)
        .run(&[a.clone()], &dst)
        .unwrap();

    assert_eq!(report.outcomes[0].1, MoveOutcome::Skipped(SkipReason::UserSkipped));
    assert!(a.exists());
    assert_eq!(fs::read(dst.join("a.txt")).unwrap(), b"old");
}

#[test]
fn overwrite_never_deletes_a_file_already_in_destination() {
    let (_td, _src, dst) = dirs();
    let inside = write(&dst.join("a.txt"), b"precious");

    let mut policy = FixedPolicy::Overwrite;
    let report = BatchRunner::new(&mut policy, &NoProgress)
        .with_interrupt_check(|| false)
        .run(&[inside.clone()], &dst)
        .unwrap();

    assert_eq!(report.outcomes[0].1, MoveOutcome::Skipped(SkipReason::AlreadyAtDestination));
    assert_eq!(fs::read(&inside).unwrap(), b"precious");
}

#[test]
fn destination_directory_queued_into_itself_is_left_intact() {
    let (_td, _src, dst) = dirs();
    write(&dst.join("one.txt"), b"1");
    write(&dst.join("two.txt"), b"2");
    let mut q = Queue::new();
    q.add(&dst);

    let mut policy = FixedPolicy::Overwrite;
    let report = BatchRunner::new(&mut policy, &NoProgress)
        .with_interrupt_check(|| false)
        .run(&q.snapshot(), &dst)
        .unwrap();

    assert_eq!(report.moved(), 0);
    assert_eq!(fs::read(dst.join("one.txt")).unwrap(), b"1");
    assert_eq!(fs::read(dst.join("two.txt")).unwrap(), b"2");
}
