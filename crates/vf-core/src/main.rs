//! Voltorb Flip Advisor - CLI entry point.
//!
//! Subcommands:
//! - `analyze` - run the full pipeline on a JSON request and print advice
//! - `check` - validate a request without solving it
//! - `schema` - print the JSON Schema of the request or response payload
//!
//! Payloads go to stdout; logs go to stderr. Exit codes are a stable
//! contract documented in `exit_codes.rs`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use vf_common::{
    format_error_human, AnalysisRequest, AnalysisResponse, Error, GameState, Mode, OutputFormat,
    StructuredError,
};
use vf_core::config::load_config;
use vf_core::exit_codes::ExitCode;
use vf_core::logging::{init_logging, LogConfig, LogFormat};
use vf_core::output::render_response;
use vf_core::validate::validate;

#[derive(Debug, Parser)]
#[command(
    name = "vf-core",
    version,
    about = "Voltorb Flip decision-support engine"
)]
struct Cli {
    /// Raise the default log level to debug (logs go to stderr).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a board request and print ranked advice.
    Analyze(AnalyzeArgs),
    /// Validate a board request without solving it.
    Check(CheckArgs),
    /// Print the JSON Schema for a payload.
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Request JSON file; '-' reads stdin.
    #[arg(long, short = 'i', default_value = "-")]
    input: String,

    /// Override the request's objective.
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Fix the estimator RNG seed for reproducible output.
    #[arg(long, env = "VF_SEED")]
    seed: Option<u64>,

    /// Accepted-sample budget for the Monte-Carlo estimator.
    #[arg(long)]
    samples: Option<u64>,

    /// Estimator wall-clock deadline in milliseconds.
    #[arg(long)]
    wallclock_ms: Option<u64>,

    /// TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for the response payload.
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Request JSON file; '-' reads stdin.
    #[arg(long, short = 'i', default_value = "-")]
    input: String,

    /// Output format for the verdict.
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemaKind {
    Request,
    Response,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Which payload schema to print.
    #[arg(long, value_enum, default_value = "request")]
    kind: SchemaKind,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&LogConfig {
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Human
        },
        verbose: cli.verbose,
    });

    let code = match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Check(args) => run_check(args),
        Command::Schema(args) => run_schema(args),
    };
    std::process::exit(code.code());
}

fn run_analyze(args: AnalyzeArgs) -> ExitCode {
    let result = analyze_to_response(&args);
    match result {
        Ok(response) => {
            match render_response(&response, args.format, args.pretty) {
                Ok(rendered) => print!("{rendered}"),
                Err(err) => return fail(&Error::from(err), args.format),
            }
            if args.format == OutputFormat::Json {
                println!();
            }
            match response.game_state {
                GameState::Won | GameState::Lost => ExitCode::RoundOver,
                GameState::Active if response.quit_recommended => ExitCode::QuitAdvised,
                GameState::Active => ExitCode::Clean,
            }
        }
        Err(err) => fail(&err, args.format),
    }
}

fn analyze_to_response(args: &AnalyzeArgs) -> Result<AnalysisResponse, Error> {
    let mut config = load_config(args.config.as_deref())
        .map_err(|err| Error::Config(err.to_string()))?;
    if let Some(seed) = args.seed {
        config.estimator.seed = Some(seed);
    }
    if let Some(samples) = args.samples {
        config.estimator.sample_budget = samples;
    }
    if let Some(wallclock_ms) = args.wallclock_ms {
        config.estimator.wallclock_ms = wallclock_ms;
    }

    let mut request = read_request(&args.input)?;
    if let Some(mode) = args.mode {
        request.mode = mode;
    }
    vf_core::analyze(&request, &config)
}

fn run_check(args: CheckArgs) -> ExitCode {
    let request = match read_request(&args.input) {
        Ok(request) => request,
        Err(err) => return fail(&err, args.format),
    };
    match validate(&request) {
        Ok(()) => {
            match args.format {
                OutputFormat::Json => println!(r#"{{"valid":true}}"#),
                OutputFormat::Text => println!("request OK"),
            }
            ExitCode::Clean
        }
        Err(err) => fail(&Error::from(err), args.format),
    }
}

fn run_schema(args: SchemaArgs) -> ExitCode {
    let schema = match args.kind {
        SchemaKind::Request => schemars::schema_for!(AnalysisRequest),
        SchemaKind::Response => schemars::schema_for!(AnalysisResponse),
    };
    match serde_json::to_string_pretty(&schema) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::Clean
        }
        Err(err) => fail(&Error::from(err), OutputFormat::Text),
    }
}

fn read_request(input: &str) -> Result<AnalysisRequest, Error> {
    let raw = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Report an error on the right stream for the format and map it to an
/// exit code. JSON consumers get a structured object on stdout; humans get
/// a headline/reason/fix block on stderr.
fn fail(err: &Error, format: OutputFormat) -> ExitCode {
    match format {
        OutputFormat::Json => println!("{}", StructuredError::from(err).to_json()),
        OutputFormat::Text => {
            let use_color = std::io::IsTerminal::is_terminal(&std::io::stderr());
            eprintln!("{}", format_error_human(err, use_color));
        }
    }
    ExitCode::from_error(err)
}
