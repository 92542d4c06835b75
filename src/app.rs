//! Application orchestrator.
//! Loads/merges config, initializes logging, installs signal handlers,
//! discovers libraries, builds the relocation plan, and executes it.

use anyhow::{Result, anyhow};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use steam_relink::output as out;
use steam_relink::relocate::{
    AssumeYes, Confirm, DeclineAll, OperationReport, StdinConfirm, execute_plan, plan_relocation,
};
use steam_relink::{
    Config, RelinkError, config, default_config_path, discovery, platform, shutdown,
};

use crate::logging::init_tracing;
use steam_relink::cli::Args;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var(config::CONFIG_ENV_VAR) {
            out::print_info(&format!(
                "Using {} (explicit):\n  {}\n",
                config::CONFIG_ENV_VAR,
                cfg_env
            ));
            out::print_info("To override, unset the variable or point it at another file.");
            return Ok(());
        }
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!(
                    "Default steam_relink config path:\n  {}\n",
                    p.display()
                ));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info(
                        "No config file exists there yet. Run without --print-config to create a template.",
                    );
                }
            }
            Err(e) => {
                out::print_error(&format!("Could not determine a default config path: {e}"));
            }
        }
        return Ok(());
    }

    // Create template config if none exists (before logging init)
    if let Some(path) = config::ensure_default_config_exists() {
        out::print_success(&format!(
            "A template steam_relink config was written to: {}",
            path.display()
        ));
        out::print_info(
            "Edit the file to set `dest_base` and optionally `link_temp`, `log_level` and `log_file`, then re-run.",
        );
        return Ok(());
    }

    // Build config: XML file values first, CLI overrides win.
    let mut cfg = match config::xml::load_config() {
        Ok(Some(file_cfg)) => file_cfg,
        Ok(None) => Config::default(),
        Err(e) => {
            out::print_error(&format!("Failed to load config: {e:#}"));
            return Err(e);
        }
    };
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt: Option<tracing_appender::non_blocking::WorkerGuard> =
        init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current operation then stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .expect("failed to install signal handler");
    }

    if shutdown::is_requested() {
        return Ok(());
    }

    debug!("Starting steam_relink: {:?}", args);

    let result = run_inner(&args, &cfg);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn run_inner(args: &Args, cfg: &Config) -> Result<()> {
    if let Some(notice) = platform::privilege_notice() {
        out::print_warn(notice);
    }

    let discovered = discovery::discover_steamapps_dirs();

    if args.list {
        if discovered.is_empty() {
            out::print_info("No steamapps directories found on this host.");
        } else {
            for sa in &discovered {
                out::print_user(&sa.display().to_string());
            }
        }
        return Ok(());
    }

    let confirm = pick_confirmer(cfg);

    // Chosen library: explicit argument wins, else the first discovered.
    let steamapps = match args.resolved_steamapps() {
        Some(p) => {
            if p.file_name().and_then(|n| n.to_str()) != Some("steamapps")
                && !confirm.confirm(
                    "Confirm steamapps",
                    &format!(
                        "Selected directory does not end with 'steamapps':\n{}\n\nProceed anyway?",
                        p.display()
                    ),
                )
            {
                out::print_info("Aborted.");
                return Ok(());
            }
            p
        }
        None => match discovered.first() {
            Some(p) => {
                info!(steamapps = %p.display(), "using first discovered library");
                p.clone()
            }
            None => {
                return Err(anyhow!(
                    "no steamapps directory found; pass one explicitly or use --list"
                ));
            }
        },
    };

    let dest_base = match cfg.dest_base.clone() {
        Some(p) => p,
        None => {
            if let Some(hint) = dest_base_hint() {
                out::print_info(&format!(
                    "No destination base configured. Drives are typically mounted under: {}",
                    hint.display()
                ));
            }
            return Err(anyhow!(
                "no destination base; pass --dest-base or set dest_base in the config file"
            ));
        }
    };

    let plan = plan_relocation(&steamapps, &dest_base, cfg.link_temp).map_err(|e| {
        if let Some(r) = e.downcast_ref::<RelinkError>() {
            error!(code = r.code(), "planning failed");
        }
        e
    })?;

    let summary = plan.summary_lines().join("\n");
    if !confirm.confirm(
        "Proceed?",
        &format!("This will create/replace symlinks as follows:\n\n{summary}"),
    ) {
        out::print_info("Aborted; nothing was changed.");
        return Ok(());
    }

    let reports = execute_plan(&plan, confirm.as_ref(), cfg.dry_run);
    report_results(&reports)
}

/// Print every per-operation result line and summarize failures.
fn report_results(reports: &[OperationReport]) -> Result<()> {
    let mut failures = 0usize;
    for report in reports {
        let line = report.log_line();
        if report.outcome.is_failure() {
            failures += 1;
            out::print_error(&line);
            if let Some(err) = &report.error {
                error!(code = err.code(), link = %report.operation.link_path.display(), "operation failed");
            }
        } else {
            out::print_user(&line);
            info!(link = %report.operation.link_path.display(), "{}", line);
        }
    }

    if failures > 0 {
        return Err(anyhow!(
            "{failures} of {} operations failed; see log for details",
            reports.len()
        ));
    }
    out::print_success("Requested symlinks processed.");
    Ok(())
}

/// Confirmation policy: --yes approves everything; otherwise prompt on a TTY
/// and decline (safely) when stdin is not interactive.
fn pick_confirmer(cfg: &Config) -> Box<dyn Confirm> {
    if cfg.assume_yes {
        Box::new(AssumeYes)
    } else if atty::is(atty::Stream::Stdin) {
        Box::new(StdinConfirm)
    } else {
        Box::new(DeclineAll)
    }
}

/// First existing mount-point hint for the destination drive.
fn dest_base_hint() -> Option<PathBuf> {
    config::DEST_BASE_HINTS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}
