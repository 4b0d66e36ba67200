use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use wrdash::chart::{ChartKind, ContainerDimensions};
use wrdash::config::Overrides;
use wrdash::summary::render_summary;
use wrdash::{interactive, logging};
use wrdash::{Config, Dashboard, DashboardOptions, Page, StatsClient, StatsSource};

#[derive(Parser)]
#[command(name = "wrdash")]
#[command(about = "Weekly-report statistics dashboard", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full dashboard to a standalone HTML page
    Render {
        /// Stats document URL or path (default: from config)
        #[arg(short, long)]
        source: Option<String>,

        /// Output HTML file (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Viewport width in pixels
        #[arg(short = 'W', long)]
        width: Option<u32>,

        /// Viewport height in pixels
        #[arg(short = 'H', long)]
        height: Option<u32>,
    },
    /// Render a single chart as SVG
    Chart {
        /// donut, weekday or hours
        kind: String,

        /// Stats document URL or path (default: from config)
        #[arg(short, long)]
        source: Option<String>,

        /// Container width in pixels
        #[arg(short = 'W', long, default_value_t = 600.0)]
        width: f64,

        /// Container height in pixels
        #[arg(short = 'H', long, default_value_t = 300.0)]
        height: f64,

        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the statistics as text
    Summary {
        /// Stats document URL or path (default: from config)
        #[arg(short, long)]
        source: Option<String>,

        /// Number of leaderboard rows (default: from config)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Live terminal dashboard
    Interactive {
        /// Stats document URL or path (default: from config)
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Show the configuration, or write the defaults with --init
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // The terminal UI owns the screen, so it sets up file logging itself
    let _guard = match &cli.command {
        Some(Commands::Interactive { .. }) => logging::init_with_file("wrdash.log", cli.verbose)
            .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
            .map(Some)?,
        _ => {
            logging::init(cli.verbose);
            None
        }
    };

    let config = Config::load()?;

    match cli.command {
        Some(Commands::Render {
            source,
            output,
            width,
            height,
        }) => {
            let config = config.with_overrides(Overrides {
                viewport_width: width,
                viewport_height: height,
                ..Overrides::default()
            })?;
            let output = output.unwrap_or_else(|| config.output.clone());
            handle_render(&config, &resolve_source(&config, source), output).await?;
        }
        Some(Commands::Chart {
            kind,
            source,
            width,
            height,
            output,
        }) => {
            let kind: ChartKind = kind.parse()?;
            handle_chart(&config, &resolve_source(&config, source), kind, width, height, output)
                .await?;
        }
        Some(Commands::Summary { source, top }) => {
            let config = config.with_overrides(Overrides {
                leaderboard_size: top,
                ..Overrides::default()
            })?;
            let source = resolve_source(&config, source);
            let client = StatsClient::from_config(&config);
            let document = client.load(&source).await?;
            print!(
                "{}",
                render_summary(&document, config.week_start_offset, config.leaderboard_size)
            );
        }
        Some(Commands::Interactive { source }) => {
            interactive::run_interactive(&config, &resolve_source(&config, source)).await?;
        }
        Some(Commands::Config { init }) => {
            if init {
                let path = Config::default().save()?;
                println!("Wrote default configuration to {}", path.display());
            } else {
                match Config::get_config_path() {
                    Some(path) => println!("Config file: {}", path.display()),
                    None => println!("Config file: unavailable on this platform"),
                }
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        None => {
            println!("No command specified. Use --help for available commands.");
        }
    }

    Ok(())
}

fn resolve_source(config: &Config, source: Option<String>) -> StatsSource {
    StatsSource::parse(source.as_deref().unwrap_or(&config.source))
}

async fn handle_render(
    config: &Config,
    source: &StatsSource,
    output: PathBuf,
) -> Result<()> {
    let client = StatsClient::from_config(config);
    let mut page = Page::new(config.viewport);
    let mut dashboard = Dashboard::new(DashboardOptions::from(config));

    // A failed load still produces a page showing the failure message
    if let Err(e) = dashboard.load(&mut page, &client, source).await {
        eprintln!("Warning: {}", e);
    }

    let generated = Local::now().format("%Y-%m-%d %H:%M").to_string();
    fs::write(&output, page.to_html("WR statistics", &generated))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Dashboard written to {}", output.display());
    Ok(())
}

async fn handle_chart(
    config: &Config,
    source: &StatsSource,
    kind: ChartKind,
    width: f64,
    height: f64,
    output: Option<PathBuf>,
) -> Result<()> {
    let dims = ContainerDimensions::checked(width, height)?;
    let client = StatsClient::from_config(config);
    let mut page = Page::new(config.viewport);
    let mut dashboard = Dashboard::new(DashboardOptions::from(config));
    dashboard.load(&mut page, &client, source).await?;

    let svg = dashboard.render_chart(kind, dims)?.to_string();

    match output {
        Some(path) => {
            fs::write(&path, &svg).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} chart written to {}", kind, path.display());
        }
        None => {
            let mut stdout = io::stdout();
            writeln!(stdout, "{}", svg)?;
        }
    }
    Ok(())
}
