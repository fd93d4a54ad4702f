use crate::infra::start_meter;
use clap::Args;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use strength_meter::config::AppConfig;
use strength_meter::error::AppError;
use strength_meter::meter::{
    default_password_hash, StrengthCallback, StrengthReport, StrengthRequest, TipBundle,
};
use strength_meter::telemetry;
use tokio::sync::mpsc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Password to evaluate. Never echoed back.
    pub(crate) password: String,
    /// Username entered alongside the password
    #[arg(long, default_value = "")]
    pub(crate) username: String,
    /// Core personal details (names, birthdays) scrubbed before scoring
    #[arg(long = "core-info", num_args = 1..)]
    pub(crate) core_info: Vec<String>,
    /// Broader identity details matched without scrubbing
    #[arg(long = "all-info", num_args = 1..)]
    pub(crate) all_info: Vec<String>,
    /// How long to wait for the guess-number estimate before giving up
    #[arg(long, default_value_t = 500)]
    pub(crate) wait_ms: u64,
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let meter = start_meter(config.meter)?;

    let (sender, mut reports) = mpsc::unbounded_channel::<StrengthReport>();
    let callback: StrengthCallback = Arc::new(move |report| {
        let _ = sender.send(report);
    });

    let password_hash = default_password_hash(&args.password);
    meter.engine.get_strength_and_feedback(
        callback,
        StrengthRequest {
            password: args.password,
            password_hash,
            username: args.username,
            core_info: args.core_info,
            all_info: args.all_info,
        },
    );

    println!("Password strength (model {})", meter.model_version);
    if let Some(report) = reports.recv().await {
        print!("{}", render_report("Heuristic", &report));
    }

    match tokio::time::timeout(Duration::from_millis(args.wait_ms), reports.recv()).await {
        Ok(Some(report)) => print!("{}", render_report("Fused", &report)),
        Ok(None) | Err(_) => println!(
            "\nGuess-number estimate not available within {}ms",
            args.wait_ms
        ),
    }

    meter.worker.abort();
    Ok(())
}

pub(crate) fn render_report(label: &str, report: &StrengthReport) -> String {
    let problems: Vec<String> = serde_json::from_str(&report.problems).unwrap_or_default();
    let tips: TipBundle = serde_json::from_str(&report.feedback).unwrap_or_default();

    let mut output = String::new();
    let _ = writeln!(output, "\n{label} score: {:.1} / 100", report.score);
    let _ = writeln!(
        output,
        "  Policy: {}",
        if report.compliant {
            "compliant"
        } else {
            "not compliant"
        }
    );
    for problem in &problems {
        let _ = writeln!(output, "    - {problem}");
    }
    if tips.is_empty() {
        let _ = writeln!(output, "  No suggestions");
    } else {
        let _ = writeln!(output, "  Suggestions:");
        for (tip, reason) in tips.public_tips.iter().zip(&tips.reason_why) {
            let _ = writeln!(output, "    - {tip} ({reason})");
        }
    }
    output
}
