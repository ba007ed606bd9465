//! FolioGuard Portfolio Reference Runtime: Demo CLI
//!
//! Runs the portfolio chat scenarios, or applies a single guardrail stage to
//! text supplied on the command line.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- prompt-injection
//!   cargo run -p demo -- pre-filter "what is my allocation?"
//!   cargo run -p demo -- post-filter --response "Ahoy matey!" --question "how am I doing?"
//!   cargo run -p demo -- verify --tool-results results.json --response "AAPL is 30%."

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use folioguard_contracts::{
    error::{FolioGuardError, FolioGuardResult},
    tool::ToolResult,
};
use folioguard_guard::GuardrailEngine;
use folioguard_ref_portfolio::{
    bundled_engine, portfolio_checker,
    scenarios::{grounded_summary, profanity, prompt_injection, tone_hijack},
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// FolioGuard: guardrails and verification for a portfolio chat agent.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "FolioGuard portfolio reference runtime demo",
    long_about = "Runs FolioGuard portfolio demo scenarios showing input filtering,\n\
                  output correction, and tool-grounded response verification."
)]
struct Cli {
    /// Guardrail limits file. Defaults to the bundled configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four portfolio scenarios in sequence.
    RunAll,
    /// Scenario 1: Prompt Injection (blocked before the model).
    PromptInjection,
    /// Scenario 2: Profanity (professional-tone redirect).
    Profanity,
    /// Scenario 3: Tone Hijack (post-filter correction).
    ToneHijack,
    /// Scenario 4: Grounded Summary (tool-backed verification).
    GroundedSummary,
    /// Pre-filter one user message and print the verdict as JSON.
    PreFilter {
        /// The user message to screen.
        text: String,
    },
    /// Post-filter one model response and print the report as JSON.
    PostFilter {
        #[arg(long)]
        response: String,
        /// The user message the response answers.
        #[arg(long, default_value = "")]
        question: String,
    },
    /// Verify a response against tool results read from a JSON file.
    Verify {
        /// JSON array of `{"tool": ..., "result": {...}}` objects.
        #[arg(long)]
        tool_results: PathBuf,
        #[arg(long)]
        response: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => {
            print_banner();
            run_scenarios(cli.config.as_ref(), &Scenario::ALL)
        }
        Command::PromptInjection => {
            print_banner();
            run_scenarios(cli.config.as_ref(), &[Scenario::PromptInjection])
        }
        Command::Profanity => {
            print_banner();
            run_scenarios(cli.config.as_ref(), &[Scenario::Profanity])
        }
        Command::ToneHijack => {
            print_banner();
            run_scenarios(cli.config.as_ref(), &[Scenario::ToneHijack])
        }
        Command::GroundedSummary => {
            print_banner();
            run_scenarios(cli.config.as_ref(), &[Scenario::GroundedSummary])
        }
        Command::PreFilter { text } => run_pre_filter(cli.config.as_ref(), &text),
        Command::PostFilter { response, question } => {
            run_post_filter(cli.config.as_ref(), &response, &question)
        }
        Command::Verify {
            tool_results,
            response,
        } => run_verify(&tool_results, &response),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Scenario {
    PromptInjection,
    Profanity,
    ToneHijack,
    GroundedSummary,
}

impl Scenario {
    const ALL: [Scenario; 4] = [
        Scenario::PromptInjection,
        Scenario::Profanity,
        Scenario::ToneHijack,
        Scenario::GroundedSummary,
    ];

    async fn run(self, engine: &GuardrailEngine) -> FolioGuardResult<()> {
        match self {
            Scenario::PromptInjection => prompt_injection::run_scenario(engine).await,
            Scenario::Profanity => profanity::run_scenario(engine).await,
            Scenario::ToneHijack => tone_hijack::run_scenario(engine).await,
            Scenario::GroundedSummary => grounded_summary::run_scenario(engine).await,
        }
    }
}

/// Run `scenarios` in order on a current-thread runtime, all sharing the
/// engine loaded from `config`.
fn run_scenarios(config: Option<&PathBuf>, scenarios: &[Scenario]) -> FolioGuardResult<()> {
    let engine = load_engine(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| FolioGuardError::RuntimeError {
            reason: format!("failed to start async runtime: {}", e),
        })?;
    runtime.block_on(async {
        for scenario in scenarios {
            scenario.run(&engine).await?;
        }
        Ok::<(), FolioGuardError>(())
    })?;
    println!("All selected scenarios completed successfully.");
    Ok(())
}

// ── Single-stage commands ─────────────────────────────────────────────────────

/// The engine from `--config`, or the bundled one.
fn load_engine(config: Option<&PathBuf>) -> FolioGuardResult<GuardrailEngine> {
    match config {
        Some(path) => {
            debug!(path = %path.display(), "loading guardrail config");
            GuardrailEngine::from_file(path)
        }
        None => bundled_engine(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> FolioGuardResult<()> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|e| FolioGuardError::SerializationFailed {
            reason: format!("failed to render JSON: {}", e),
        })?;
    println!("{}", rendered);
    Ok(())
}

fn run_pre_filter(config: Option<&PathBuf>, text: &str) -> FolioGuardResult<()> {
    let engine = load_engine(config)?;
    print_json(&engine.pre_filter(text))
}

fn run_post_filter(config: Option<&PathBuf>, response: &str, question: &str) -> FolioGuardResult<()> {
    let engine = load_engine(config)?;
    print_json(&engine.post_filter(response, question))
}

fn run_verify(path: &Path, response: &str) -> FolioGuardResult<()> {
    let raw = std::fs::read_to_string(path).map_err(|e| FolioGuardError::InvalidToolResult {
        reason: format!("failed to read tool results '{}': {}", path.display(), e),
    })?;
    let tool_results: Vec<ToolResult> =
        serde_json::from_str(&raw).map_err(|e| FolioGuardError::InvalidToolResult {
            reason: format!("failed to parse tool results JSON: {}", e),
        })?;
    print_json(&portfolio_checker().verify_response(&tool_results, response))
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("FolioGuard: Portfolio Chat Guardrails");
    println!("Portfolio Reference Demo");
    println!("======================================");
    println!();
    println!("FolioGuard pipeline per chat turn:");
    println!("  [1] Message validation: forged roles dropped, sizes capped");
    println!("  [2] Pre-filter screens the latest user message → Allow / Block + redirect");
    println!("  [3] Model + tool loop runs, ONLY after step 2 allows");
    println!("  [4] Post-filter scans the reply and substitutes a correction on failure");
    println!("  [5] Verifier checks the reply against recorded tool results + confidence");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_engine_defaults_to_bundled_limits() {
        let engine = load_engine(None).unwrap();
        assert_eq!(engine.config().limits.max_input_length, 2000);
    }

    #[test]
    fn load_engine_reads_config_file() {
        let path = std::env::temp_dir().join(format!("folioguard-demo-{}.toml", std::process::id()));
        std::fs::write(&path, "[limits]\nmax_input_length = 12\n").unwrap();

        let engine = load_engine(Some(&path));
        std::fs::remove_file(&path).unwrap();

        let engine = engine.unwrap();
        assert_eq!(engine.config().limits.max_input_length, 12);
        assert!(engine.pre_filter("how is my portfolio doing?").blocked);
    }
}
