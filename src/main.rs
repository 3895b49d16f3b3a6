//! Recap CLI - article summaries, analysis and restyled rewrites
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, setting up logging and handling top-level errors.

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use recap::scraper::Source;
use recap::session::{ArtifactError, Session};
use recap::{ui, Agent, Config, Style};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recap")]
#[command(author, version, about = "TUI for article summaries, bias analysis and restyled rewrites", long_about = None)]
struct Cli {
    /// Config file (default: ./recap.toml, then ~/.config/recap/recap.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise an article given by URL or text ("-" reads stdin)
    Summarise {
        /// URL or article text
        input: String,
        /// Also rewrite the summary in this style
        #[arg(long, value_enum)]
        style: Option<Style>,
        /// Show the extracted text instead of summarising
        #[arg(long)]
        raw: bool,
        /// Print the session as JSON
        #[arg(long, conflicts_with = "raw")]
        json: bool,
    },
    /// List the available rewrite styles
    Styles,
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.command.is_none());
    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Summarise {
            input,
            style,
            raw,
            json,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let input = if input == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                input
            };
            let agent = Agent::from_config(&config)?;

            if raw {
                print_raw(&agent, &input).await?;
            } else {
                summarise(&agent, &input, style, json).await?;
            }
        }
        Some(Commands::Styles) => {
            for (i, style) in Style::ALL.iter().enumerate() {
                let name = clap::ValueEnum::to_possible_value(style)
                    .map(|v| v.get_name().to_string())
                    .unwrap_or_default();
                println!("[F{}] {:<8} {}", i + 1, name.bold(), style.label());
                println!("         {}", style.instruction().dimmed());
            }
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
        None => {
            // Default: Launch the TUI
            let config = load_config(cli.config.as_deref())?;
            let agent = Agent::from_config(&config)?;
            ui::run(agent).await?;
        }
    }

    Ok(())
}

/// Only the commands that talk to the network need a config
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            Config::load_from(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(Config::load()?),
    }
}

/// Log to stderr for one-shot commands, to a file while the TUI owns the screen
fn init_logging(verbose: u8, tui: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    if !tui {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return None;
    }

    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("recap");
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "recap.log"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Some(guard)
}

async fn print_raw(agent: &Agent, input: &str) -> anyhow::Result<()> {
    match Source::from_input(input) {
        Some(Source::Url(url)) => {
            println!("Fetching: {}", url);
            let article = agent.retrieve(&url).await?;
            let title = article.title.as_deref().unwrap_or("No title");
            println!("\n=== {} ===\n", title);
            println!("{}", article.text);
            println!(
                "\n--- Extracted {} characters{} ---",
                article.text.chars().count(),
                if article.truncated { " (truncated)" } else { "" }
            );
        }
        Some(Source::Text(text)) => println!("{}", text),
        None => bail!("nothing to show: input is empty"),
    }
    Ok(())
}

async fn summarise(
    agent: &Agent,
    input: &str,
    style: Option<Style>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = Session::new();
    if !json {
        if let Some(Source::Url(url)) = Source::from_input(input) {
            println!("Fetching: {}", url);
        }
        println!("Summarising...\n");
    }

    session.generate(agent, input).await?;
    if let Some(err) = session.error() {
        bail!("{}", err.message);
    }
    if let Some(style) = style {
        session.apply_style(agent, style).await?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    if let Some(title) = session.title() {
        println!("=== {} ===\n", title.bold());
    }

    println!("{}", "📄 Original Summary".cyan().bold());
    println!("{}\n", session.summary().unwrap_or_default());

    if let Some(content_type) = session.content_type() {
        let heading = match content_type {
            Ok(report) => format!("📚 Detected Content Type: {}", report.kind),
            Err(_) => "📚 Detected Content Type".to_string(),
        };
        println!("{}", heading.cyan().bold());
        print_artifact(content_type.as_ref().map(|r| r.justification.as_str()));
    }

    if let Some(analysis) = session.analysis() {
        println!(
            "{}",
            "🧠 Analysis of Messaging, Biases, and Blind Spots".cyan().bold()
        );
        print_artifact(analysis.as_ref().map(String::as_str));
    }

    if let Some(styled) = session.last_style() {
        println!(
            "{}",
            format!("✨ Styled Summary ({})", styled.style.label()).cyan().bold()
        );
        print_artifact(styled.result.as_ref().map(String::as_str));
    }

    Ok(())
}

fn print_artifact(artifact: Result<&str, &ArtifactError>) {
    match artifact {
        Ok(text) => println!("{}\n", text),
        Err(err) => println!("{}\n", err.message.red()),
    }
}
