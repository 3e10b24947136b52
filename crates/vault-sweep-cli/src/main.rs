mod commands;
mod logging;
mod progress;

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info};
use vault_sweep_core::{
    DeletePolicy, FsVault, ScanOutcome, ScanStats, SweepConfig, SweepEngine,
};

fn main() -> Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match vault_sweep_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Scan) => {
            if let Err(err) = run_scan(&config) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::Clean { yes, policy }) => {
            if let Err(err) = run_clean(&config, yes, policy.map(Into::into)) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::Report { output }) => {
            if let Err(err) = run_report(&config, &output) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn build_engine(config: &SweepConfig) -> SweepEngine<FsVault> {
    let vault =
        FsVault::new(config.root_path.clone()).with_ignore_patterns(&config.ignore_patterns);
    SweepEngine::new(vault, config.clone())
}

fn scan_vault(engine: &mut SweepEngine<FsVault>) -> Result<ScanStats> {
    let reporter = CliReporter::new();
    match engine.scan(&reporter)? {
        ScanOutcome::Completed(stats) => Ok(stats),
        ScanOutcome::AlreadyRunning => anyhow::bail!("a scan is already running"),
    }
}

fn run_scan(config: &SweepConfig) -> Result<()> {
    let mut engine = build_engine(config);
    let stats = scan_vault(&mut engine)?;

    print_candidates(&engine);
    println!();
    info!(
        "{} documents scanned, {} references, {} unused files in {}",
        format!("{}", stats.documents_scanned).cyan(),
        format!("{}", stats.references_found).cyan(),
        format!("{}", stats.orphans_found).red(),
        format!("{:.2}s", stats.scan_duration.as_secs_f64()).green(),
    );

    Ok(())
}

fn run_clean(config: &SweepConfig, yes: bool, policy: Option<DeletePolicy>) -> Result<()> {
    let policy = policy.unwrap_or(config.delete_policy);
    let mut engine = build_engine(config);
    scan_vault(&mut engine)?;

    if engine.candidates().is_empty() {
        println!("{} All attachments are referenced", "✓".green());
        return Ok(());
    }

    print_candidates(&engine);
    println!();

    let count = engine.selected_active_count();
    if !yes {
        let prompt = format!("Delete {} file(s) ({:?})?", count, policy);
        if !prompt_confirm(&prompt, Some(false))? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let outcome = engine.delete_selected(policy);
    println!(
        "Deleted {} file(s), {} failed",
        format!("{}", outcome.succeeded).green(),
        format!("{}", outcome.failed.len()).red(),
    );
    for (path, reason) in &outcome.failed {
        println!("  {} {}: {}", "✗".red(), path, reason);
    }

    // A soft-trash batch can still be rolled back within this session.
    if policy == DeletePolicy::SoftTrash && outcome.succeeded > 0 && !yes {
        if prompt_confirm("Undo this batch?", Some(false))? {
            for path in engine.last_batch().to_vec() {
                engine.set_selected(&path, true);
            }
            let undo = engine.undo_selected();
            println!(
                "Restored {} file(s), {} not found in trash",
                format!("{}", undo.restored).green(),
                format!("{}", undo.not_found).yellow(),
            );
        }
    }

    Ok(())
}

fn run_report(config: &SweepConfig, output: &Path) -> Result<()> {
    let mut engine = build_engine(config);
    scan_vault(&mut engine)?;

    let report = engine.export_report();
    fs::write(output, report)?;
    info!("Saved: {}", output.display());

    Ok(())
}

fn print_candidates(engine: &SweepEngine<FsVault>) {
    for file in engine.candidates() {
        println!(
            "  {}  {}",
            file.name.bold(),
            format!("({})", file.parent_path).dimmed(),
        );
    }
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
