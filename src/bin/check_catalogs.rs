//! Validate locale catalogs without starting the server.
//!
//! Usage:
//!   cargo run --bin check_catalogs              # Check the embedded catalogs
//!   cargo run --bin check_catalogs -- locales/  # Check <dir>/<code>.json
//!
//! Exits with status 1 when any error is found. Warnings are printed but do
//! not fail the check.

use anyhow::Result;
use std::path::PathBuf;
use workspace_dashboard::i18n::{CatalogValidator, Catalogs};
use workspace_dashboard::pages;

fn main() -> Result<()> {
    let catalogs = match std::env::args().nth(1).map(PathBuf::from) {
        Some(dir) => {
            println!("Checking catalogs in {}", dir.display());
            Catalogs::load_dir(&dir)?
        }
        None => {
            println!("Checking embedded catalogs");
            Catalogs::embedded()?
        }
    };

    let locales: Vec<&str> = catalogs.locales().iter().map(|l| l.code()).collect();
    println!("Locales: {}", locales.join(", "));

    let report = CatalogValidator::validate(&catalogs, &pages::required_keys());

    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }
    for error in &report.errors {
        println!("  error: {}", error);
    }

    if report.has_errors() {
        println!(
            "\n{} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
        std::process::exit(1);
    }

    println!("\nOK ({} warning(s))", report.warnings.len());
    Ok(())
}
