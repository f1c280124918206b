use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use cocktail_etl::app::convert_use_case::{ConvertSettings, ConvertUseCase, InputSource};
use cocktail_etl::config::{Config, RecordErrorPolicy};
use cocktail_etl::infra::document_store::FsDocumentStore;
use cocktail_etl::infra::http_client::ReqwestHttp;
use cocktail_etl::observability;

#[derive(Parser)]
#[command(name = "cocktail_etl")]
#[command(about = "Convert TheCocktailDB drinks into the normalized cocktail schema")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to $COCKTAIL_ETL_CONFIG or ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, validate, transform and write (default)
    Run(RunArgs),
    /// Fetch the raw payload and write the snapshot only
    Fetch {
        /// Source URL
        #[arg(long)]
        url: Option<String>,
        /// Where to write the raw snapshot
        #[arg(long)]
        raw_out: Option<PathBuf>,
    },
    /// Convert an already fetched payload from a local file
    Convert {
        /// Raw drinks payload to convert
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        transform: TransformArgs,
    },
}

#[derive(Args, Default)]
struct RunArgs {
    /// Source URL
    #[arg(long)]
    url: Option<String>,
    /// Where to write the raw snapshot
    #[arg(long)]
    raw_out: Option<PathBuf>,
    #[command(flatten)]
    transform: TransformArgs,
}

#[derive(Args, Default)]
struct TransformArgs {
    /// Where to write the converted cocktails
    #[arg(long)]
    out: Option<PathBuf>,
    /// What to do with a drink that fails to transform
    #[arg(long, value_enum)]
    on_record_error: Option<RecordErrorPolicy>,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(p) => Config::from_file(p)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn apply_transform_args(config: &mut Config, args: TransformArgs) {
    if let Some(out) = args.out {
        config.output.path = out;
    }
    if let Some(policy) = args.on_record_error {
        config.transform.on_record_error = policy;
    }
}

fn use_case(config: &Config) -> Result<ConvertUseCase> {
    ConvertUseCase::with_defaults(
        Box::new(ReqwestHttp::new()),
        Box::new(FsDocumentStore),
        ConvertSettings::from(config),
    )
    .context("Failed to initialise converter")
}

async fn execute(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            if let Some(url) = args.url {
                config.source.url = url;
            }
            if let Some(raw_out) = args.raw_out {
                config.output.raw_path = raw_out;
            }
            apply_transform_args(&mut config, args.transform);

            println!("🚀 Converting drinks from {}", config.source.url);
            let summary = use_case(&config)?
                .run(&InputSource::Remote(config.source.url.clone()))
                .await?;
            print_summary(&summary)?;
        }
        Commands::Fetch { url, raw_out } => {
            if let Some(url) = url {
                config.source.url = url;
            }
            if let Some(raw_out) = raw_out {
                config.output.raw_path = raw_out;
            }

            println!("📡 Fetching drinks from {}", config.source.url);
            let (_, fetched) = use_case(&config)?.fetch_snapshot(&config.source.url).await?;
            println!("{}", serde_json::to_string_pretty(&fetched)?);
        }
        Commands::Convert { input, transform } => {
            apply_transform_args(&mut config, transform);

            println!("🔨 Converting drinks from {}", input.display());
            let summary = use_case(&config)?.run(&InputSource::LocalFile(input)).await?;
            print_summary(&summary)?;
        }
    }
    Ok(())
}

fn print_summary(summary: &cocktail_etl::app::convert_use_case::RunSummary) -> Result<()> {
    println!("\n📊 Conversion results:");
    println!("   Total drinks: {}", summary.total_records);
    println!("   Converted: {}", summary.converted);
    println!("   Skipped: {}", summary.skipped);
    println!("   Output file: {}", summary.output_file);
    if !summary.errors.is_empty() {
        println!("\n⚠️  Skipped drinks:");
        for diag in &summary.errors {
            println!("   - {} ({}): {}", diag.record, diag.kind, diag.message);
        }
    }
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = observability::init_logging();

    let cli = Cli::parse();
    if let Err(e) = execute(cli).await {
        error!("Run failed: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
