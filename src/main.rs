//! Brow CLI - generative web browser for the terminal

use std::fs::{self, File};
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use brow::config::{mask_api_key, BrowConfig};
use brow::error::{BrowError, FixSuggestion};
use brow::page::PageContent;
use brow::provider::{create_provider, Provider};
use brow::services;
use brow::theme::available_themes;

#[derive(Parser)]
#[command(name = "brow")]
#[command(about = "Brow - a generative web browser for the terminal")]
#[command(version)]
struct Cli {
    /// Override the provider (gemini, mock)
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Override the model
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Without a subcommand the browser opens
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a query once and print the page
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a deep research report on a topic
    Research {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Summarize text from a file (stdin when omitted)
    Summarize {
        file: Option<PathBuf>,
    },

    /// Suggest follow-up searches for some context
    Suggest {
        #[arg(required = true)]
        context: Vec<String>,
    },

    /// List available themes
    Themes,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.command.is_none());

    let result = match run(cli).await {
        Ok(()) => return,
        Err(e) => e,
    };

    eprintln!("{} {:#}", "Error:".red().bold(), result);
    if let Some(suggestion) = result
        .downcast_ref::<BrowError>()
        .and_then(|e| e.fix_suggestion())
    {
        eprintln!("  {} {}", "Fix:".yellow(), suggestion);
    }
    std::process::exit(1);
}

/// The TUI owns the terminal, so it logs to a file; commands log to stderr
fn init_tracing(tui: bool) {
    if tui {
        let log_path = BrowConfig::log_path();
        let file = fs::create_dir_all(BrowConfig::config_dir())
            .and_then(|()| File::create(&log_path));
        match file {
            Ok(file) => tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init(),
            Err(e) => eprintln!(
                "{} logging disabled, cannot open {}: {}",
                "Warning:".yellow(),
                log_path.display(),
                e
            ),
        }
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = BrowConfig::load()?.with_env();

    // Apply CLI overrides
    if let Some(p) = cli.provider {
        config.provider = Some(p);
    }
    if let Some(m) = cli.model {
        config.model = Some(m);
    }

    match cli.command {
        None => {
            let provider = provider_for(&config)?;
            brow::tui::run(&config, provider).await
        }
        Some(Commands::Search { query, json }) => {
            search(&*provider_for(&config)?, &query.join(" "), json).await
        }
        Some(Commands::Research { query }) => {
            research(&*provider_for(&config)?, &query.join(" ")).await
        }
        Some(Commands::Summarize { file }) => summarize(&*provider_for(&config)?, file).await,
        Some(Commands::Suggest { context }) => {
            let topics = services::suggest_topics(&*provider_for(&config)?, &context.join(" ")).await;
            for topic in topics {
                println!("{} {}", "→".cyan(), topic);
            }
            Ok(())
        }
        Some(Commands::Themes) => {
            list_themes(config.default_theme.as_deref());
            Ok(())
        }
        Some(Commands::Config { action }) => {
            match action {
                ConfigAction::Path => println!("{}", BrowConfig::config_path().display()),
                ConfigAction::Show => show_config(&config),
            }
            Ok(())
        }
    }
}

fn provider_for(config: &BrowConfig) -> Result<Arc<dyn Provider>, BrowError> {
    let provider = create_provider(config.provider(), config)?;
    Ok(Arc::from(provider))
}

async fn search(provider: &dyn Provider, query: &str, json: bool) -> anyhow::Result<()> {
    let answer = services::smart_search(provider, query)
        .await
        .map_err(|e| BrowError::Provider(format!("{:#}", e)))?;
    let page = PageContent::search_result(query, answer);

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page(&page);
    }
    Ok(())
}

async fn research(provider: &dyn Provider, query: &str) -> anyhow::Result<()> {
    println!("{} Researching: {}", "→".cyan(), query.cyan().bold());
    let answer = services::deep_research(provider, query)
        .await
        .map_err(|e| BrowError::Provider(format!("{:#}", e)))?;
    print_page(&PageContent::deep_dive(query, answer));
    Ok(())
}

async fn summarize(provider: &dyn Provider, file: Option<PathBuf>) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    println!("{}", services::summarize(provider, &text).await);
    Ok(())
}

fn print_page(page: &PageContent) {
    println!("{}", format!("[ {} ]", page.kind).cyan().bold());
    println!();
    println!("{}", page.body());

    if !page.links().is_empty() {
        println!();
        println!("{}", "Sources:".cyan().bold());
        for link in page.links() {
            println!("  {} {} ({})", "•".cyan(), link.title, link.hostname().dimmed());
        }
    }

    if !page.topics().is_empty() {
        println!();
        println!("{}", "Related:".cyan().bold());
        for topic in page.topics() {
            println!("  {} {}", "→".cyan(), topic);
        }
    }
}

fn list_themes(configured: Option<&str>) {
    for theme in available_themes() {
        let marker = if Some(theme.id.as_str()) == configured {
            "✓".green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {:<16} {}", marker, theme.id, theme.name.dimmed());
    }
}

fn show_config(config: &BrowConfig) {
    let key = config
        .api_key()
        .map(|k| mask_api_key(k, 6))
        .unwrap_or_else(|| "(not set)".to_string());

    println!("{}", "Brow configuration".cyan().bold());
    println!("  File:     {}", BrowConfig::config_path().display());
    println!("  Provider: {}", config.provider());
    println!("  Model:    {}", config.model());
    println!("  Base URL: {}", config.base_url());
    println!("  API key:  {}", key);
    println!(
        "  Theme:    {}",
        config.default_theme.as_deref().unwrap_or("default-dark")
    );
    println!(
        "  Speech:   {}",
        config
            .speech_command
            .as_ref()
            .map(|c| c.join(" "))
            .unwrap_or_else(|| "unsupported".to_string())
    );
}
