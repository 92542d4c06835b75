//! Path classification across every reachable on-disk state.

use std::fs;
use tempfile::tempdir;

use steam_relink::{PathState, classify};

#[test]
fn every_state_is_reachable_and_distinct() {
    let td = tempdir().unwrap();
    let target = td.path().join("ssd/Lib_symlink/downloading");
    fs::create_dir_all(&target).unwrap();

    // Missing
    let missing = td.path().join("missing");
    assert_eq!(classify(&missing, &target), PathState::Missing);

    // EmptyDirectory
    let empty = td.path().join("empty");
    fs::create_dir_all(&empty).unwrap();
    assert_eq!(classify(&empty, &target), PathState::EmptyDirectory);

    // NonEmptyDirectory
    let full = td.path().join("full");
    fs::create_dir_all(&full).unwrap();
    fs::write(full.join("depot.bin"), b"d").unwrap();
    assert_eq!(classify(&full, &target), PathState::NonEmptyDirectory);

    // NonDirectoryFile
    let file = td.path().join("file");
    fs::write(&file, b"f").unwrap();
    assert_eq!(classify(&file, &target), PathState::NonDirectoryFile);
}

#[cfg(unix)]
#[test]
fn symlink_correct_iff_canonical_paths_match() {
    use std::os::unix::fs::symlink;

    let td = tempdir().unwrap();
    let target = td.path().join("ssd/downloading");
    fs::create_dir_all(&target).unwrap();
    let elsewhere = td.path().join("elsewhere");
    fs::create_dir_all(&elsewhere).unwrap();

    let direct = td.path().join("direct");
    symlink(&target, &direct).unwrap();
    assert_eq!(classify(&direct, &target), PathState::SymlinkCorrect);

    // A differently-spelled route to the same real directory still counts.
    let via_dot = td.path().join("via_dot");
    symlink(td.path().join("ssd/./downloading"), &via_dot).unwrap();
    assert_eq!(classify(&via_dot, &target), PathState::SymlinkCorrect);

    let wrong = td.path().join("wrong");
    symlink(&elsewhere, &wrong).unwrap();
    assert_eq!(classify(&wrong, &target), PathState::SymlinkWrong);
}

#[cfg(unix)]
#[test]
fn broken_symlink_classifies_as_wrong_not_error() {
    use std::os::unix::fs::symlink;

    let td = tempdir().unwrap();
    let target = td.path().join("target");
    fs::create_dir_all(&target).unwrap();

    let broken = td.path().join("broken");
    symlink(td.path().join("never-existed"), &broken).unwrap();
    assert_eq!(classify(&broken, &target), PathState::SymlinkWrong);
}
