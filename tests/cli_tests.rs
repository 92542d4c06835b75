use clap::Parser;
use std::path::PathBuf;
use steam_relink::cli::Args;
use steam_relink::config::types::{Config, LogLevel};

#[test]
fn resolved_steamapps_precedence_flag_over_positional() {
    let args = Args::parse_from([
        "steam_relink",
        "--steamapps",
        "/ssd/SteamLibrary/steamapps",
        "/hdd/SteamLibrary/steamapps",
    ]);
    let sa = args.resolved_steamapps().unwrap();
    assert_eq!(sa, PathBuf::from("/ssd/SteamLibrary/steamapps"));
}

#[test]
fn resolved_steamapps_uses_positional_when_flag_absent() {
    let args = Args::parse_from(["steam_relink", "/hdd/SteamLibrary/steamapps"]);
    let sa = args.resolved_steamapps().unwrap();
    assert_eq!(sa, PathBuf::from("/hdd/SteamLibrary/steamapps"));
}

#[test]
fn resolved_steamapps_none_without_arguments() {
    let args = Args::parse_from(["steam_relink"]);
    assert!(args.resolved_steamapps().is_none());
}

#[test]
fn sanitize_strips_quotes_and_trailing_separator() {
    let args = Args::parse_from(["steam_relink", "--steamapps", "'/games/steamapps/'"]);
    let sa = args.resolved_steamapps().unwrap();
    assert_eq!(sa, PathBuf::from("/games/steamapps"));

    let args = Args::parse_from(["steam_relink", "\"/games/steamapps\""]);
    let sa = args.resolved_steamapps().unwrap();
    assert_eq!(sa, PathBuf::from("/games/steamapps"));
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["steam_relink", "--debug", "--log-level", "quiet"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Debug); // --debug wins

    let args = Args::parse_from(["steam_relink", "--log-level", "info"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Info);

    let args = Args::parse_from(["steam_relink"]);
    assert!(args.effective_log_level().is_none());
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "steam_relink",
        "--dest-base",
        "/mnt/fast",
        "--skip-temp",
        "--log-level",
        "info",
        "--dry-run",
        "--yes",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.dest_base, Some(PathBuf::from("/mnt/fast")));
    assert!(!cfg.link_temp);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.dry_run);
    assert!(cfg.assume_yes);
}

#[test]
fn apply_overrides_noop_when_flags_unset() {
    let args = Args::parse_from(["steam_relink"]);
    let mut cfg = Config::default();
    cfg.dest_base = Some(PathBuf::from("/mnt/fast"));
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.dest_base, Some(PathBuf::from("/mnt/fast")));
    assert!(cfg.link_temp, "temp linking stays on by default");
    assert_eq!(cfg.log_level, LogLevel::Normal);
    assert!(!cfg.dry_run);
    assert!(!cfg.assume_yes);
}
