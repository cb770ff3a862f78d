//! Build-time check that the two locale bundles stay consistent.
//!
//! Compares the non-comment leaf-key sets of `locales/ar.json` and
//! `locales/en.json`. Missing keys fail the build (exit 1); empty or
//! placeholder values only warn. An alternate bundle directory can be
//! passed as the first argument.

use anyhow::Result;
use labas_site::i18n::{LocaleMessages, TranslationValidator};
use std::path::PathBuf;

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("locales"));

    println!("Validating translation bundles in {}...", dir.display());

    let messages = LocaleMessages::from_dir(&dir)?;
    let report = TranslationValidator::validate(&messages);

    for error in &report.errors {
        eprintln!("  error: {}", error);
    }
    for warning in &report.warnings {
        eprintln!("  warning: {}", warning);
    }

    let ar_keys = messages.ar.leaf_keys().len();
    let en_keys = messages.en.leaf_keys().len();

    if report.has_errors() {
        eprintln!("Translation validation failed!");
        std::process::exit(1);
    }

    if report.has_warnings() {
        println!(
            "All translation keys are present ({} Arabic / {} English), \
             but some values need attention.",
            ar_keys, en_keys
        );
    } else {
        println!(
            "All translation keys match ({} Arabic / {} English).",
            ar_keys, en_keys
        );
    }

    Ok(())
}
