//! mcprov command-line front end.

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use console::style;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use mcprov::acquire::{AcquirerBuilder, Status};
use mcprov::config::{load_config, write_example};
use mcprov::http::{create_http_client, HttpClientConfig};
use mcprov::progress::{ProgressBarOpts, StyleOptions};
use mcprov::server::{fetch_fabric_api, ServerArtifacts};
use mcprov::source::ModrinthClient;
use mcprov::ModLoader;

/// Provision Minecraft server mods from Modrinth and CurseForge
#[derive(Parser, Debug)]
#[command(name = "mcprov", version, about)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Hide progress bars and informational logs
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download every mod listed in a configuration document
    Mods(ModsArgs),

    /// Write an example configuration document
    Init(InitArgs),

    /// Download the vanilla server jar
    ServerJar(ServerJarArgs),

    /// Download the installer of a mod loader
    Installer(InstallerArgs),
}

#[derive(Args, Debug)]
struct ModsArgs {
    /// Mod configuration document
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Directory the mods are written to
    #[arg(short, long, value_name = "DIR", default_value = "mods")]
    output: PathBuf,

    /// CurseForge API key, CurseForge mods are skipped without one
    #[arg(long, env = "CURSEFORGE_API_KEY", hide_env_values = true)]
    curseforge_api_key: Option<String>,

    /// Number of mods processed at once
    #[arg(short = 'j', long, default_value_t = 1)]
    workers: usize,

    /// Seconds to wait for a connection or for more data
    #[arg(long, value_name = "SECS", default_value_t = 120)]
    timeout: u64,

    /// Exit successfully even when some mods could not be acquired
    #[arg(long)]
    allow_partial: bool,
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Mod loader of the example (forge or fabric)
    #[arg(short, long)]
    loader: ModLoader,

    /// Minecraft version of the example
    #[arg(short = 'm', long)]
    minecraft_version: String,

    /// Where the document is written
    #[arg(short, long, value_name = "FILE", default_value = "mods.json")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct ServerJarArgs {
    /// Minecraft version of the server
    #[arg(short = 'm', long)]
    minecraft_version: String,

    /// Directory `server.jar` is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct InstallerArgs {
    /// Mod loader (forge or fabric)
    #[arg(short, long)]
    loader: ModLoader,

    /// Minecraft version of the server
    #[arg(short = 'm', long)]
    minecraft_version: String,

    /// Directory the installer is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Do not fetch Fabric API into `<output>/mods` after a Fabric installer
    #[arg(long)]
    skip_fabric_api: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli);
    debug!("mcprov v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Mods(args) => run_mods(args, cli.quiet).await,
        Commands::Init(args) => run_init(args),
        Commands::ServerJar(args) => run_server_jar(args, cli.quiet).await,
        Commands::Installer(args) => run_installer(args, cli.quiet).await,
    }
}

fn init_logging(cli: &Cli) {
    let level = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "warn",
        _ => "info",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mcprov={}", level)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn style_options(quiet: bool) -> StyleOptions {
    match quiet {
        true => StyleOptions::hidden(),
        false => StyleOptions::default(),
    }
}

fn transfer_bar(quiet: bool) -> ProgressBar {
    match quiet {
        true => ProgressBar::hidden(),
        false => ProgressBarOpts::transfer().to_progress_bar(0),
    }
}

async fn run_mods(args: ModsArgs, quiet: bool) -> Result<()> {
    let config = load_config(&args.config)
        .wrap_err_with(|| format!("Invalid configuration {}", args.config.display()))?;

    let acquirer = AcquirerBuilder::new()
        .directory(args.output.clone())
        .concurrent_downloads(args.workers)
        .timeout(Duration::from_secs(args.timeout))
        .style_options(style_options(quiet))
        .build();

    let result = acquirer
        .acquire(&config, args.curseforge_api_key.as_deref())
        .await?;

    println!();
    for outcome in result.outcomes() {
        let slug = outcome.entry().slug();
        match outcome.status() {
            Status::Success => println!(
                "  {} {} ({})",
                style("✓").green().bold(),
                slug,
                outcome
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ),
            Status::Unavailable(msg) | Status::NotFound(msg) | Status::Fail(msg) => {
                println!("  {} {}: {}", style("✗").red().bold(), slug, msg)
            }
            Status::NotStarted => {}
        }
    }

    match result.is_complete() {
        true => println!("{}", style(&result).green().bold()),
        false => println!("{}", style(&result).yellow().bold()),
    }

    if !result.is_complete() && !args.allow_partial {
        return Err(eyre!(
            "{} of {} mods could not be acquired",
            result.failed().len(),
            result.total()
        ));
    }
    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    write_example(&args.output, args.loader, &args.minecraft_version)?;
    println!(
        "{} {}",
        style("Created").green().bold(),
        args.output.display()
    );
    Ok(())
}

async fn run_server_jar(args: ServerJarArgs, quiet: bool) -> Result<()> {
    let client = create_http_client(HttpClientConfig::default())?;
    let artifacts = ServerArtifacts::new(client);

    let pb = transfer_bar(quiet);
    pb.set_message("server.jar");
    let path = artifacts
        .fetch_server_jar(&args.minecraft_version, &args.output, &pb)
        .await?;
    pb.finish_and_clear();

    println!(
        "{} {}",
        style("Downloaded").green().bold(),
        path.display()
    );
    Ok(())
}

async fn run_installer(args: InstallerArgs, quiet: bool) -> Result<()> {
    let client = create_http_client(HttpClientConfig::default())?;
    let artifacts = ServerArtifacts::new(client.clone());

    let pb = transfer_bar(quiet);
    pb.set_message(format!("{} installer", args.loader));
    let path = artifacts
        .fetch_installer(args.loader, &args.minecraft_version, &args.output, &pb)
        .await?;
    pb.finish_and_clear();
    println!(
        "{} {}",
        style("Downloaded").green().bold(),
        path.display()
    );

    if args.loader == ModLoader::Fabric && !args.skip_fabric_api {
        let mods_dir = args.output.join("mods");
        let modrinth = ModrinthClient::new(client);
        let pb = transfer_bar(quiet);
        if let Some(path) =
            fetch_fabric_api(&modrinth, &args.minecraft_version, &mods_dir, &pb).await
        {
            info!("Fabric API written to {}", path.display());
        }
        pb.finish_and_clear();
    }
    Ok(())
}
