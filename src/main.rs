use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use novelcrawler::keys::read_keys;
use novelcrawler::models::{KeyStatus, RunSummary};
use novelcrawler::{
    Config, ConfigOverrides, CrawlPipeline, FileSinks, PipelineConfig, SearchClient,
};

#[derive(Parser, Debug)]
#[command(name = "novelcrawler")]
#[command(version = "0.1.0")]
#[command(about = "Collect content, directory and image-novel URLs for a list of sites")]
struct Args {
    /// File with one lookup key (site domain) per line
    #[arg(short, long)]
    keys: Option<PathBuf>,

    /// Directory holding contentUrl.txt, directoryUrl.txt and imageNovelUrl.txt
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Search endpoint base address
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Scan mode (early-exit, full)
    #[arg(long)]
    scan_mode: Option<String>,

    /// Skip a key when its response contains a malformed record
    #[arg(long)]
    strict: bool,

    /// Summary format printed on completion (text, json)
    #[arg(short, long, default_value = "text")]
    summary: String,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("novelcrawler={}", level).parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?.with_overrides(ConfigOverrides {
        keys_path: args.keys.clone(),
        output_dir: args.output_dir.clone(),
        base_url: args.base_url.clone(),
        request_timeout_secs: args.timeout_secs,
        scan_mode: args.scan_mode.clone(),
        strict: args.strict,
    })?;

    let keys_path = config
        .keys_path
        .clone()
        .context("no key file given (use --keys or NOVELCRAWLER_KEYS_FILE)")?;
    let keys = read_keys(&keys_path)?;

    let client = SearchClient::new(config.base_url.clone(), config.request_timeout())?;
    let sinks = FileSinks::new(&config.output_dir)?;

    let mut pipeline_config = PipelineConfig::from(&config);
    pipeline_config.show_progress = !args.no_progress;

    let mut pipeline = CrawlPipeline::new(client, sinks, pipeline_config);
    let summary = pipeline.run(&keys).await?;

    tracing::info!(
        "Crawl finished: {} keys, {} written, {} skipped, {} URLs stored in {}",
        summary.keys_processed(),
        summary.keys_written(),
        summary.keys_skipped(),
        summary.urls_written(),
        config.output_dir.display()
    );

    print_summary(&summary, &args.summary)?;

    Ok(())
}

fn print_summary(summary: &RunSummary, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(summary)?),
        _ => println!("{}", format_text(summary)),
    }
    Ok(())
}

fn format_text(summary: &RunSummary) -> String {
    let mut output = String::new();

    for outcome in &summary.outcomes {
        let line = match &outcome.status {
            KeyStatus::Written {
                content,
                directory,
                image_novel,
            } => format!(
                "  {}: content={} directory={} image_novel={}",
                outcome.key, content, directory, image_novel
            ),
            KeyStatus::Empty => format!("  {}: no URLs", outcome.key),
            KeyStatus::Skipped { reason } => format!("  {}: skipped ({})", outcome.key, reason),
        };
        output.push_str(&line);
        output.push('\n');
    }

    let elapsed = summary.finished_at - summary.started_at;
    output.push_str(&format!(
        "\n{} keys, {} written, {} skipped, {} URLs in {}s",
        summary.keys_processed(),
        summary.keys_written(),
        summary.keys_skipped(),
        summary.urls_written(),
        elapsed.num_seconds()
    ));

    output
}
