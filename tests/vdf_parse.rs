//! libraryfolders.vdf scanning: ordered extraction, expansion, existence filter.

use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use steam_relink::discovery::{expand_user_path, extract_path_values, library_roots_from_file};

#[test]
fn extracts_every_path_value_in_order_of_appearance() {
    let text = r#"
"libraryfolders"
{
    "contentstatsid"    "-123"
    "0"
    {
        "path"        "/home/dave/.local/share/Steam"
        "label"       ""
        "apps" { "220" "123456" }
    }
    "1"
    {
        "path"        "/mnt/hdd/SteamLibrary"
    }
}
"#;
    assert_eq!(
        extract_path_values(text),
        vec![
            "/home/dave/.local/share/Steam".to_string(),
            "/mnt/hdd/SteamLibrary".to_string(),
        ]
    );
}

#[test]
fn zero_occurrences_yield_empty() {
    assert!(extract_path_values("\"libraryfolders\" {}").is_empty());
}

#[test]
fn existing_roots_survive_nonexistent_are_dropped_order_kept() {
    let td = tempdir().unwrap();
    let first = td.path().join("b-lib");
    let second = td.path().join("a-lib");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();

    let vdf = td.path().join("libraryfolders.vdf");
    fs::write(
        &vdf,
        format!(
            "\"libraryfolders\"\n{{\n  \"0\" {{ \"path\" \"{}\" }}\n  \"1\" {{ \"path\" \"/missing/one\" }}\n  \"2\" {{ \"path\" \"{}\" }}\n}}\n",
            first.display(),
            second.display()
        ),
    )
    .unwrap();

    // Order of appearance, not sorted.
    assert_eq!(library_roots_from_file(&vdf), vec![first, second]);
}

#[test]
fn values_are_expanded_before_the_existence_check() {
    let td = tempdir().unwrap();
    let lib = td.path().join("ExpandedLib");
    fs::create_dir_all(&lib).unwrap();
    unsafe { std::env::set_var("STEAM_RELINK_VDF_TEST_BASE", td.path()) };

    let vdf = td.path().join("libraryfolders.vdf");
    fs::write(
        &vdf,
        "\"libraryfolders\"\n{\n  \"0\" { \"path\" \"$STEAM_RELINK_VDF_TEST_BASE/ExpandedLib\" }\n}\n",
    )
    .unwrap();

    assert_eq!(library_roots_from_file(&vdf), vec![lib]);
}

#[test]
fn tilde_expansion_prefers_home() {
    if let Some(home) = dirs::home_dir() {
        assert_eq!(expand_user_path("~/SteamLibrary"), home.join("SteamLibrary"));
    }
    // No tilde: value passes through untouched.
    assert_eq!(
        expand_user_path("/mnt/games"),
        PathBuf::from("/mnt/games")
    );
}
