//! Domain Combo CLI Application
//!
//! Generates domain names from keyword combinations and checks their
//! availability over WHOIS. This binary is a thin layer over
//! domain-combo-lib: it parses flags, resolves configuration, sets up
//! logging and formats the report.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domain_combo_lib::protocols::is_whois_available;
use domain_combo_lib::{
    estimate_candidate_count, expand_candidates, generate_candidates, load_env_config,
    parse_list, parse_timeout, resolve_keyword_sets, CheckConfig, ConfigManager, DomainChecker, EnvConfig,
    FileConfig, KeywordSet, LookupResult, OutputFormat, Report, Separator,
};
use std::collections::HashMap;
use std::process;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-combo
#[derive(Parser, Debug)]
#[command(name = "domain-combo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate domain names from keyword combinations and check availability")]
#[command(
    long_about = "Generate candidate domain names from keyword combinations and check their availability over WHOIS.\n\nUse --keywords for combinations of one list, or --lists for one keyword from each of several lists."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Comma-separated keywords (e.g. "one,two,three")
    #[arg(
        short = 'k',
        long = "keywords",
        value_name = "LIST",
        help_heading = "Keyword Input"
    )]
    pub keywords: Option<String>,

    /// Semicolon-separated keyword lists (e.g. "a,b;c,d")
    #[arg(
        short = 'l',
        long = "lists",
        value_name = "LISTS",
        help_heading = "Keyword Input"
    )]
    pub lists: Option<String>,

    /// Keywords per name with --keywords (default: 2, ignored with 2+ lists)
    #[arg(
        short = 'n',
        long = "combinations",
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "Domain Generation"
    )]
    pub combinations: Option<i64>,

    /// Comma-separated TLDs to append (default: com)
    #[arg(
        short = 't',
        long = "tlds",
        value_name = "LIST",
        help_heading = "Domain Generation"
    )]
    pub tlds: Option<String>,

    /// Join keywords with a dash (one-two.com)
    #[arg(long = "dash", help_heading = "Domain Generation")]
    pub dash: bool,

    /// Print generated domains without checking availability
    #[arg(long = "dry-run", help_heading = "Domain Generation")]
    pub dry_run: bool,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Output results in CSV format
    #[arg(long = "csv", help_heading = "Output Format")]
    pub csv: bool,

    /// Colored, grouped output with a header
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Concurrent lookup workers (default: 10, max: 100)
    #[arg(
        short = 'w',
        long = "workers",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub workers: Option<usize>,

    /// Per-lookup timeout such as "10s" or "1m" (default: none)
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Debug logging and per-lookup details
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// How a finished run is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OutputOptions {
    pub(crate) format: OutputFormat,
    pub(crate) pretty: bool,
    pub(crate) debug: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    pub(crate) check: CheckConfig,
    pub(crate) output: OutputOptions,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(&args);

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "domain-combo starting");

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over the level picked by `--verbose` / `--debug`.
fn init_logging(args: &Args) {
    let default_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Check flag combinations that clap cannot express.
fn validate_args(args: &Args) -> Result<(), String> {
    // Can't have multiple output formats
    if args.json && args.csv {
        return Err("Cannot specify multiple output formats (--json, --csv)".to_string());
    }

    if let Some(workers) = args.workers {
        if workers == 0 || workers > 100 {
            return Err("Workers must be between 1 and 100".to_string());
        }
    }

    if let Some(timeout) = &args.timeout {
        if parse_timeout(timeout).is_none() {
            return Err(format!(
                "Invalid timeout '{}'. Use format like '5s', '30s', '2m'",
                timeout
            ));
        }
    }

    Ok(())
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let keyword_sets = resolve_keyword_sets(args.keywords.as_deref(), args.lists.as_deref())?;
    let settings = build_settings(&args)?;
    let config = &settings.check;

    let domains = plan_domains(&keyword_sets, config);

    if domains.is_empty() {
        println!("No domains to check");
        return Ok(());
    }

    if args.dry_run {
        return display_dry_run(&domains, settings.output.format);
    }

    if !is_whois_available().await {
        tracing::warn!("whois command not found in PATH, every lookup will fail");
    }

    let is_text = settings.output.format == OutputFormat::Text;
    if is_text {
        if settings.output.pretty {
            ui::print_header(domains.len(), config);
        } else {
            println!("Checking {} domains...", domains.len());
            println!();
        }
    }

    // Spinner::start returns None if stderr isn't a TTY.
    let spinner = if is_text {
        ui::Spinner::start(format!("Checking {} domains...", domains.len()))
    } else {
        None
    };

    let start_time = Instant::now();
    let checker = DomainChecker::with_config(config.clone());
    let results = checker.check_domains(domains).await;
    let duration = start_time.elapsed();

    // Stop spinner before printing results
    if let Some(s) = spinner {
        s.stop().await;
    }

    display_results(&results, &settings.output, duration)?;

    Ok(())
}

/// Generate every domain name a run will check.
fn plan_domains(keyword_sets: &[KeywordSet], config: &CheckConfig) -> Vec<String> {
    let estimated = estimate_candidate_count(keyword_sets, config.combinations);
    tracing::info!(
        keyword_sets = keyword_sets.len(),
        estimated_candidates = estimated,
        tlds = config.tlds.len(),
        "generating domain names"
    );

    let candidates = generate_candidates(keyword_sets, config.combinations);
    let domains = expand_candidates(&candidates, config.separator, &config.tlds);

    tracing::debug!(
        candidates = candidates.len(),
        domains = domains.len(),
        "generated domain names"
    );

    domains
}

/// Resolve the run settings from every configuration source.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables (DCOMBO_*)
/// 3. Explicit config file (--config, DCOMBO_CONFIG) or discovered files
/// 4. Built-in defaults
fn build_settings(args: &Args) -> Result<Settings, Box<dyn std::error::Error>> {
    let env_config = load_env_config();
    let config_manager = ConfigManager::new(args.verbose || args.debug);

    let explicit_path = args.config.clone().or_else(|| env_config.config.clone());
    let file_config = match explicit_path {
        Some(path) => {
            tracing::info!(path = %path, "using explicit config file");
            config_manager
                .load_file(&path)
                .map_err(|e| format!("Failed to load config file '{}': {}", path, e))?
        }
        None => config_manager.discover_and_load()?,
    };

    resolve_settings(args, file_config, &env_config)
}

/// Merge the file, environment and CLI layers into one `Settings`.
fn resolve_settings(
    args: &Args,
    file_config: FileConfig,
    env_config: &EnvConfig,
) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut config = CheckConfig::default();
    let mut output = OutputOptions {
        format: OutputFormat::Text,
        pretty: false,
        debug: args.debug,
    };

    // Step 1: config file
    if let Some(defaults) = file_config.defaults {
        if let Some(workers) = defaults.workers {
            config = config.with_workers(workers);
        }
        if let Some(combinations) = defaults.combinations {
            config = config.with_combinations(combinations);
        }
        if let Some(tlds) = defaults.tlds {
            config = config.with_tlds(tlds);
        }
        if let Some(dash) = defaults.dash {
            config = config.with_separator(Separator::from_dash_flag(dash));
        }
        if let Some(timeout) = defaults.timeout.as_deref().and_then(parse_timeout) {
            config = config.with_timeout(Some(timeout));
        }
    }
    if let Some(file_output) = file_config.output {
        if let Some(format) = file_output.output_format() {
            output.format = format;
        }
        if let Some(pretty) = file_output.pretty {
            output.pretty = pretty;
        }
    }

    // Step 2: environment
    config = apply_environment_config(config, env_config);
    if env_config.has_output_format_conflict() {
        tracing::warn!("both DCOMBO_JSON and DCOMBO_CSV are set, using JSON");
    }
    if env_config.json == Some(true) {
        output.format = OutputFormat::Json;
    } else if env_config.csv == Some(true) {
        output.format = OutputFormat::Csv;
    }

    // Step 3: CLI arguments (highest precedence)
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    if let Some(n) = args.combinations {
        // Negative sizes select nothing.
        config = config.with_combinations(usize::try_from(n).unwrap_or(0));
    }
    if let Some(tlds) = &args.tlds {
        config = config.with_tlds(parse_list(tlds));
    }
    if args.dash {
        config = config.with_separator(Separator::Dash);
    }
    if let Some(timeout) = &args.timeout {
        let timeout =
            parse_timeout(timeout).ok_or_else(|| format!("Invalid timeout '{}'", timeout))?;
        config = config.with_timeout(Some(timeout));
    }
    if args.json {
        output.format = OutputFormat::Json;
    } else if args.csv {
        output.format = OutputFormat::Csv;
    }
    if args.pretty {
        output.pretty = true;
    }

    tracing::debug!(
        workers = config.workers,
        combinations = config.combinations,
        tlds = ?config.tlds,
        separator = ?config.separator,
        timeout = ?config.timeout,
        format = ?output.format,
        "resolved settings"
    );

    Ok(Settings {
        check: config,
        output,
    })
}

/// Apply DCOMBO_* environment values on top of `config`.
fn apply_environment_config(mut config: CheckConfig, env_config: &EnvConfig) -> CheckConfig {
    if let Some(workers) = env_config.workers {
        config = config.with_workers(workers);
    }
    if let Some(combinations) = env_config.combinations {
        config = config.with_combinations(combinations);
    }
    if let Some(tlds) = &env_config.tlds {
        config = config.with_tlds(tlds.clone());
    }
    if let Some(dash) = env_config.dash {
        config = config.with_separator(Separator::from_dash_flag(dash));
    }
    if let Some(timeout) = env_config.timeout {
        config = config.with_timeout(Some(timeout));
    }
    config
}

/// Print the names a run would check.
fn display_dry_run(
    domains: &[String],
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(domains)?);
    } else {
        for domain in domains {
            println!("{}", domain);
        }
    }
    eprintln!("{} domains would be checked", domains.len());
    Ok(())
}

fn display_results(
    results: &[LookupResult],
    output: &OutputOptions,
    duration: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = Report::from_results(results);

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Csv => {
            print!("{}", render_csv(results));
        }
        OutputFormat::Text if output.pretty => {
            let timings: HashMap<String, Duration> = results
                .iter()
                .filter_map(|r| r.check_duration.map(|d| (r.domain.clone(), d)))
                .collect();
            ui::print_grouped_report(&report, &timings, output.debug);
            ui::print_summary(&report.summary(), duration);
        }
        OutputFormat::Text => {
            print!("{}", report.render());
        }
    }

    Ok(())
}

/// Render results as `domain,status,error` rows sorted by domain.
fn render_csv(results: &[LookupResult]) -> String {
    let mut sorted: Vec<&LookupResult> = results.iter().collect();
    sorted.sort_by(|a, b| a.domain.cmp(&b.domain));

    let mut out = String::from("domain,status,error\n");
    for result in sorted {
        let status = match (&result.error_message, result.availability) {
            (Some(_), _) | (None, None) => "error".to_string(),
            (None, Some(availability)) => availability.to_string(),
        };
        let error = result.error_message.as_deref().unwrap_or("");
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(&result.domain),
            status,
            csv_field(error)
        ));
    }
    out
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains(|c| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
