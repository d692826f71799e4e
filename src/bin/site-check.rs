//! site-check: consistency checks for the KOSGE static language pages.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kosge_client::checks::{
    self, languages::SwitchEntry, EventsReport, LanguagesReport,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "site-check")]
#[command(about = "Consistency checks for the multilingual site pages")]
struct Cli {
    /// Site root containing the `frontend/` directory
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every language page for the event sections and participant modals
    Events,
    /// Check language_config.json against the files and each page's switcher
    Languages,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ok = match cli.command {
        Commands::Events => {
            let report = checks::check_event_sections(&cli.root);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_events(&report);
            }
            report.is_ok()
        }
        Commands::Languages => {
            let report = checks::check_language_config(&cli.root)
                .with_context(|| format!("checking languages under {}", cli.root.display()))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_languages(&report);
            }
            report.is_ok()
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

fn print_events(report: &EventsReport) {
    println!("=== Event Sections Display Test ===\n");
    for page in &report.pages {
        println!("Testing {} version ({})...", page.language, page.path.display());
        if let Some(error) = &page.error {
            println!("  error: {error}");
            continue;
        }
        println!("  Passed: {}", page.passed);
        println!("  Failed: {}", page.failed());
        if !page.missing.is_empty() {
            println!("  Missing elements: {}", page.missing.join(", "));
        }
    }

    println!("\n=== Overall Test Results ===");
    for page in &report.pages {
        if page.is_ok() {
            println!("{}: All tests passed", page.language);
        } else {
            let total = page.passed + page.failed();
            println!("{}: {}/{total} tests passed", page.language, page.passed);
        }
    }
    println!(
        "\n{} {}",
        mark(report.is_ok()),
        if report.is_ok() {
            "all languages display event sections"
        } else {
            "some languages have missing event sections"
        }
    );
}

fn print_languages(report: &LanguagesReport) {
    println!("=== Language Files ===\n");
    for file in &report.files {
        println!(
            "{}: {} -> {} {}",
            file.code.to_uppercase(),
            file.file,
            file.resolved.display(),
            mark(file.exists)
        );
    }

    println!("\n=== Language Switchers ===\n");
    for page in &report.pages {
        let code = page.code.to_uppercase();
        match (&page.error, &page.entries) {
            (Some(error), _) => println!("{code}: {error}"),
            (None, None) => println!("{code}: no language configuration found {}", mark(false)),
            (None, Some(entries)) => {
                println!("{code}: {}", page.page.display());
                entries.iter().for_each(print_entry);
            }
        }
    }
}

fn print_entry(entry: &SwitchEntry) {
    if entry.matches() {
        println!("  - {}: {} {}", entry.key, entry.path, mark(true));
    } else {
        println!(
            "  - {}: {} {} (expected {})",
            entry.key,
            entry.path,
            mark(false),
            entry.expected
        );
    }
}
