//! Terminal front end: pick a city, pass quizzes, earn money, travel east
//! (or west) until you are home again.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use ai_client::Gemini;
use backpacker_common::config::parse_money;
use backpacker_common::{Config, ConfigError};
use backpacker_game::{Game, GeminiGenerator};
use wiki_client::WikipediaClient;

mod progress;
mod ui;

use progress::Spinner;

#[derive(Parser)]
#[command(name = "backpacker")]
#[command(about = "Travel around the world by passing quizzes and working odd jobs")]
#[command(version)]
struct Cli {
    /// Gemini model to use (overrides GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Money at the start of a journey (overrides STARTING_MONEY)
    #[arg(long)]
    starting_money: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli) {
        eprintln!("Error: {e:#}");
        return ExitCode::from(1);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingApiKey) => {
            eprintln!("{}", style(ConfigError::MissingApiKey).red().bold());
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("{} {e}", style("Configuration error:").red().bold());
            return ExitCode::from(2);
        }
    };

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let directive = if cli.verbose {
        "backpacker=debug,ai_client=debug,wiki_client=debug"
    } else {
        "backpacker=warn"
    };
    let mut filter = EnvFilter::from_default_env();
    for d in directive.split(',') {
        filter = filter.add_directive(d.parse()?);
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn run(cli: Cli, mut config: Config) -> Result<()> {
    if let Some(model) = cli.model {
        config.gemini_model = model;
    }
    if let Some(raw) = cli.starting_money {
        config.starting_money = parse_money("--starting-money", &raw)?;
    }
    config.log_redacted();

    let mut ai = Gemini::new(&config.gemini_api_key, &config.gemini_model);
    if let Some(url) = &config.gemini_base_url {
        ai = ai.with_base_url(url);
    }
    let wiki = WikipediaClient::new()?.with_base_url(&config.wikipedia_api_url);

    let mut game = Game::new(Arc::new(GeminiGenerator::new(ai)), Arc::new(wiki))
        .with_starting_money(config.starting_money)
        .with_progress(Arc::new(Spinner::new()));

    ui::run(&mut game).await
}
