//! # mih-quote
//!
//! Prices an MIH exhibitor contract from a `FormData` JSON snapshot.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         mih-quote                                       │
//! │                                                                         │
//! │  FORM.json ──► FormData ──► validate_submission ──► compute_quote       │
//! │                              (skipped when bypassed)       │            │
//! │                                                            ▼            │
//! │                  stdout ◄── Quote / PdfGenerationData / fields JSON     │
//! │                           --out  ◄── document payload (unless disabled) │
//! │                         --expect ──► mismatch report + exit code        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exit Codes
//! - 0: quote computed (and matches `--expect` when given)
//! - 1: expected totals mismatch, or an I/O / pricing error
//! - 2: the submission failed validation

mod config;
mod expected;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mih_core::validation::validate_quote_totals;
use mih_core::{compute_quote, contract_fields, validate_submission, FormData, PdfGenerationData};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{load_price_table, EnvFlags};
use crate::expected::ExpectedTotals;

#[derive(Parser, Debug)]
#[command(name = "mih-quote")]
#[command(version, about = "Compute the quote of an MIH exhibitor contract")]
struct Args {
    /// Path to the FormData JSON snapshot
    form: PathBuf,

    /// Price table JSON (defaults to the built-in MIH 2026 tariffs)
    #[arg(long, env = "MIH_PRICE_TABLE")]
    prices: Option<PathBuf>,

    /// Expected totals JSON to check the computed quote against
    #[arg(long)]
    expect: Option<PathBuf>,

    /// Write the full document payload (contact, sections, totals, signature) here
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the full document payload instead of the bare quote
    #[arg(long)]
    document: bool,

    /// Print the contract form fields instead of the bare quote
    #[arg(long, conflicts_with = "document")]
    fields: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Skip submission validation in dev (same effect as BYPASS_VALIDATION).
    /// Ignored in production
    #[arg(long)]
    skip_validation: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// How a run ended when no error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ok,
    Mismatch,
    Invalid,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Ok => ExitCode::SUCCESS,
            Outcome::Mismatch => ExitCode::from(1),
            Outcome::Invalid => ExitCode::from(2),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let flags = EnvFlags::from_env();
    info!(
        dev = flags.dev,
        bypass_validation = flags.bypass_validation,
        disable_submission = flags.disable_submission,
        "Environment flags loaded"
    );

    let stdout = io::stdout();
    let outcome = run(&args, &flags, &mut stdout.lock())?;
    Ok(outcome.into())
}

/// Logs go to stderr; stdout carries only the JSON result.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,mih_core=debug,mih_quote=debug"
    } else {
        "warn,mih_quote=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// `--skip-validation` obeys the same dev-only rule as BYPASS_VALIDATION.
fn validation_bypassed(args: &Args, flags: &EnvFlags) -> bool {
    if flags.bypass_validation {
        return true;
    }
    if args.skip_validation && !flags.dev {
        warn!("--skip-validation ignored outside dev");
        return false;
    }
    args.skip_validation
}

fn run(args: &Args, flags: &EnvFlags, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let form = load_form(&args.form)?;
    debug!(services = form.has_selected_services(), "Form loaded");

    if validation_bypassed(args, flags) {
        warn!("Submission validation bypassed");
    } else if let Err(errors) = validate_submission(&form) {
        for error in errors.iter() {
            eprintln!("invalid: {error}");
        }
        warn!(count = errors.len(), "Submission rejected");
        return Ok(Outcome::Invalid);
    }

    let prices = load_price_table(args.prices.as_deref())?;
    let quote = compute_quote(&form, &prices).context("Failed to compute quote")?;

    if let Err(errors) = validate_quote_totals(&quote) {
        for error in errors.iter() {
            eprintln!("invalid: {error}");
        }
        return Ok(Outcome::Invalid);
    }

    info!(
        lines = quote.line_count(),
        total_ht = %quote.financial.total_ht,
        total_ttc = %quote.financial.total_ttc,
        "Quote computed"
    );

    let mismatches = match &args.expect {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Cannot read expected totals {}", path.display()))?;
            let expected = ExpectedTotals::from_json(&raw)
                .with_context(|| format!("Invalid expected totals {}", path.display()))?;
            let mismatches = expected.compare(&quote);
            info!(
                checked = expected.checked_count(),
                mismatches = mismatches.len(),
                "Expected totals compared"
            );
            mismatches
        }
        None => Vec::new(),
    };

    let document = PdfGenerationData::assemble(&form, quote.clone());

    if let Some(path) = &args.out {
        if flags.disable_submission {
            warn!(path = %path.display(), "Submission disabled, document payload not written");
        } else {
            let json = serde_json::to_string_pretty(&document)?;
            fs::write(path, json)
                .with_context(|| format!("Cannot write document payload {}", path.display()))?;
            info!(path = %path.display(), "Document payload written");
        }
    }

    let json = if args.fields {
        let fields = contract_fields(&form, &quote, &prices).context("Failed to fill contract fields")?;
        to_json(&fields, args.pretty)?
    } else if args.document {
        to_json(&document, args.pretty)?
    } else {
        to_json(&quote, args.pretty)?
    };
    writeln!(out, "{json}")?;

    if mismatches.is_empty() {
        return Ok(Outcome::Ok);
    }
    for mismatch in &mismatches {
        eprintln!("mismatch: {mismatch}");
    }
    Ok(Outcome::Mismatch)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn load_form(path: &Path) -> anyhow::Result<FormData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Cannot read form {}", path.display()))?;
    FormData::from_json(&raw).with_context(|| format!("Invalid form {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    fn form_json(accept: bool) -> Value {
        json!({
            "company": {
                "raisonSociale": "Ateliers Dupont",
                "adresse": "12 rue des Forges",
                "codePostal": "68100",
                "ville": "Mulhouse",
                "pays": "France"
            },
            "contact": {
                "contactNom": "Camille Martin",
                "contactTel": "0612345678",
                "contactMail": "camille@dupont.fr"
            },
            "spaceReservation": {
                "selectedStandType": "standEquipe",
                "standEquipeSurface": 18,
                "standEquipeAngle": 1,
                "puissance": "0"
            },
            "signature": {
                "nomSignataire": "Camille Martin",
                "dateSignature": "2026-03-02",
                "acceptReglement": accept
            }
        })
    }

    fn args(form: PathBuf) -> Args {
        Args {
            form,
            prices: None,
            expect: None,
            out: None,
            document: false,
            fields: false,
            pretty: false,
            skip_validation: false,
            verbose: false,
        }
    }

    fn run_capture(args: &Args, flags: &EnvFlags) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = run(args, flags, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_prints_quote_json() {
        let dir = TempDir::new().unwrap();
        let form = write_json(&dir, "form.json", &form_json(true));

        let (outcome, stdout) = run_capture(&args(form), &EnvFlags::default());
        assert_eq!(outcome, Outcome::Ok);

        let value: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(value["financial"]["totalHT"], 5045.0);
        assert_eq!(value["sections"][0]["prestations"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_submission_stops_before_pricing() {
        let dir = TempDir::new().unwrap();
        let form = write_json(&dir, "form.json", &form_json(false));

        let (outcome, stdout) = run_capture(&args(form.clone()), &EnvFlags::default());
        assert_eq!(outcome, Outcome::Invalid);
        assert!(stdout.is_empty());

        let bypass = EnvFlags {
            dev: true,
            bypass_validation: true,
            disable_submission: false,
        };
        let (outcome, _) = run_capture(&args(form), &bypass);
        assert_eq!(outcome, Outcome::Ok);
    }

    #[test]
    fn test_skip_validation_only_in_dev() {
        let dir = TempDir::new().unwrap();
        let form = write_json(&dir, "form.json", &form_json(false));

        let mut args = args(form);
        args.skip_validation = true;

        let production = EnvFlags::default();
        assert!(!production.dev);
        let (outcome, stdout) = run_capture(&args, &production);
        assert_eq!(outcome, Outcome::Invalid);
        assert!(stdout.is_empty());

        let dev = EnvFlags {
            dev: true,
            ..EnvFlags::default()
        };
        let (outcome, _) = run_capture(&args, &dev);
        assert_eq!(outcome, Outcome::Ok);
    }

    #[test]
    fn test_expected_totals_mismatch() {
        let dir = TempDir::new().unwrap();
        let form = write_json(&dir, "form.json", &form_json(true));

        let mut args = args(form);
        args.expect = Some(write_json(&dir, "ok.json", &json!({ "totalTTC": 6054, "solde": 3027 })));
        assert_eq!(run_capture(&args, &EnvFlags::default()).0, Outcome::Ok);

        args.expect = Some(write_json(&dir, "ko.json", &json!({ "totalHT": 5000 })));
        assert_eq!(run_capture(&args, &EnvFlags::default()).0, Outcome::Mismatch);
    }

    #[test]
    fn test_document_output_and_disabled_submission() {
        let dir = TempDir::new().unwrap();
        let form = write_json(&dir, "form.json", &form_json(true));
        let payload = dir.path().join("payload.json");

        let mut args = args(form);
        args.document = true;
        args.out = Some(payload.clone());

        let disabled = EnvFlags {
            dev: true,
            bypass_validation: false,
            disable_submission: true,
        };
        let (_, stdout) = run_capture(&args, &disabled);
        assert!(!payload.exists());

        let value: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(value["contact"]["raisonSociale"], "Ateliers Dupont");
        assert_eq!(value["signature"]["dateSignature"], "2026-03-02");

        run_capture(&args, &EnvFlags::default());
        let written: Value = serde_json::from_str(&fs::read_to_string(&payload).unwrap()).unwrap();
        assert_eq!(written, value);
    }

    #[test]
    fn test_contract_fields_output() {
        let dir = TempDir::new().unwrap();
        let form = write_json(&dir, "form.json", &form_json(true));

        let mut args = args(form);
        args.fields = true;
        let (outcome, stdout) = run_capture(&args, &EnvFlags::default());
        assert_eq!(outcome, Outcome::Ok);

        let value: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(value["raison_social"], "Ateliers Dupont");
        assert_eq!(value["std_equipe_prix_ht"], "4860,00");
        assert_eq!(value["total_ht"], "5045,00");
        assert_eq!(value["membre"], false);
    }

    #[test]
    fn test_custom_price_table() {
        let dir = TempDir::new().unwrap();
        let form = write_json(&dir, "form.json", &form_json(true));

        let mut prices = mih_core::PriceTable::mih_2026();
        prices.angle_price = mih_core::Money::from_euros(200);
        let prices_path = write_json(&dir, "prices.json", &serde_json::to_value(&prices).unwrap());

        let mut args = args(form);
        args.prices = Some(prices_path);
        let (_, stdout) = run_capture(&args, &EnvFlags::default());

        let value: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(value["financial"]["totalHT"], 5060.0);
    }

    #[test]
    fn test_malformed_form_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut bad = form_json(true);
        bad["spaceReservation"]["standEquipeSurface"] = json!(-3);
        let form = write_json(&dir, "form.json", &bad);

        let mut out = Vec::new();
        assert!(run(&args(form), &EnvFlags::default(), &mut out).is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["mih-quote", "form.json", "--pretty", "--expect", "exp.json"]).unwrap();
        assert_eq!(args.form, PathBuf::from("form.json"));
        assert!(args.pretty);
        assert_eq!(args.expect, Some(PathBuf::from("exp.json")));
    }
}
