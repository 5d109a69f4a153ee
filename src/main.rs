use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use viral_trend_planner::api::parse_request_body;
use viral_trend_planner::config::PlannerConfig;
use viral_trend_planner::scoring::RankedSignal;
use viral_trend_planner::{analyze_on, format_float, server, AnalysisReport};

#[derive(Parser)]
#[command(name = "viral-trend-planner", about = "Short-form benchmark analyzer and posting planner")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Serve(ServeArgs),
    Analyze(AnalyzeArgs),
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    web_root: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// Payload file; reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Print the report as JSON instead of a summary.
    #[arg(long)]
    json: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/planner.toml")]
    path: PathBuf,
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_serve(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::InitConfig(args) => run_init_config(args),
    }
}

async fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    let (mut config, _) = PlannerConfig::load(args.config)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(web_root) = args.web_root {
        config.server.web_root = web_root;
    }
    server::serve(config).await
}

fn run_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let (config, _) = PlannerConfig::load(args.config)?;
    let payload = read_payload(args.input.as_deref())?;
    let input = parse_request_body(&payload)
        .and_then(|request| request.into_input())
        .context("invalid analysis payload")?;

    let report = analyze_on(&input, chrono::Local::now().date_naive(), &config);

    if args.json {
        let payload = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", payload);
        return Ok(());
    }

    print_summary(&report, config.ranking.display_hashtags);
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.path.exists() && !args.force {
        bail!("{} already exists (pass --force to overwrite)", args.path.display());
    }
    PlannerConfig::default().write(&args.path)?;
    println!("Wrote default configuration to {}", args.path.display());
    Ok(())
}

fn print_summary(report: &AnalysisReport, display_hashtags: usize) {
    println!("Benchmark score: {}", format_float(report.benchmark_score, 2));
    println!("References analyzed: {}", report.references_analyzed);
    println!("Duration target: {}", report.strategy.duration_target);
    println!("Focus: {} | cadence {}", report.strategy.focus, report.strategy.posting_cadence);
    println!("Creative direction: {}", report.strategy.creative_direction);
    println!("Trend risk: {}", report.strategy.trend_risk);

    print_signals("Top topics", &report.top_topics);
    print_signals("Best hooks", &report.top_hooks);
    print_signals("Top formats", &report.top_formats);
    let shown = report.top_hashtags.len().min(display_hashtags);
    print_signals("Strong hashtags", &report.top_hashtags[..shown]);

    println!("\nWeekly plan:");
    for entry in &report.weekly_plan {
        println!(
            "  {} {} {} | {} | hook: {} | format: {} | {}",
            entry.slot.date, entry.slot.day, entry.slot.time, entry.concept, entry.hook, entry.format, entry.cta
        );
    }
}

fn print_signals(title: &str, signals: &[RankedSignal]) {
    println!("\n{}:", title);
    if signals.is_empty() {
        println!("  Not enough data yet");
        return;
    }
    for signal in signals {
        println!("  {} ({})", signal.label, format_float(signal.score, 2));
    }
}

fn read_payload(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    if let Some(path) = path {
        return std::fs::read(path).with_context(|| format!("failed reading {}", path.display()));
    }

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("failed reading stdin")?;
    Ok(buffer)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
