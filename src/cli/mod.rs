//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::api::transport::ReqwestTransport;
use crate::cli::say::run_say;
use crate::core::chat::ChatSession;
use crate::core::completion::CompletionClient;
use crate::core::config::data::path_display;
use crate::core::config::Config;
use crate::core::persona::resolve_system_prompt;
use crate::core::storage::{FileStorage, MemoryStorage, Storage};
use crate::core::transcript::{TranscriptStore, HISTORY_KEY};
use crate::ui::chat_loop::run_chat;
use crate::ui::presenter::TerminalPresenter;
use crate::utils::logging::init_tracing;

#[derive(Parser)]
#[command(name = "chefbot")]
#[command(version)]
#[command(about = "Talk shop with a professional chef from your terminal")]
#[command(
    long_about = "ChefBot is a terminal chat client for a culinary assistant backed by an \
OpenAI-compatible chat-completion API. Conversations are remembered between runs.\n\n\
Configuration:\n\
  Run 'chefbot init' to create a config file, then set api_key in it.\n\n\
Environment Variables (override the config file):\n\
  CHEFBOT_API_KEY     API key (VENICE_AI_API_KEY is also accepted)\n\
  CHEFBOT_API_URL     Chat-completion endpoint URL\n\
  RUST_LOG            Log filter for the log file\n\n\
Chat commands:\n\
  help              Show chat commands\n\
  clear             Forget the conversation (asks first)\n\
  quit, exit        Leave"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the config file
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model to use for this run
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Keep the conversation in memory only
    #[arg(short = 'e', long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive conversation (default)
    Chat,
    /// Send a single message and print the reply
    Say {
        /// Message to send (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Print the saved conversation
    History,
    /// Delete the saved conversation
    Clear,
    /// Write a template config file
    Init,
    /// Show the effective configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };

    let command = args.command.unwrap_or(Commands::Chat);
    if let Commands::Init = command {
        return init_config(&config_path);
    }

    let config = load_effective_config(&config_path, args.model.as_deref())?;
    start_logging(&config);

    match command {
        Commands::Chat => {
            let mut session = open_session(&config, args.ephemeral)?;
            let mut presenter = TerminalPresenter::stdout();
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_chat(&mut session, &mut presenter, stdin, &mut std::io::stdout()).await?;
            Ok(())
        }
        Commands::Say { prompt } => {
            let mut session = open_session(&config, args.ephemeral)?;
            let mut presenter = TerminalPresenter::stdout();
            if !run_say(&mut session, &mut presenter, &prompt).await {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::History => {
            let storage = FileStorage::new(config.resolve_history_dir()?);
            let location = storage.path_for(HISTORY_KEY);
            let session = session_with_storage(&config, storage);
            if session.store().conversation().next().is_none() {
                println!("No saved conversation.");
            } else {
                session.replay(&mut TerminalPresenter::stdout());
            }
            println!("History file: {}", path_display(&location));
            Ok(())
        }
        Commands::Clear => {
            let storage = FileStorage::new(config.resolve_history_dir()?);
            let mut session = session_with_storage(&config, storage);
            session.clear();
            println!("✅ Chat history cleared");
            Ok(())
        }
        Commands::Config => {
            println!("Config file: {}", path_display(&config_path));
            config.print_all();
            Ok(())
        }
        Commands::Init => init_config(&config_path),
    }
}

/// Reads the config file, then layers environment variables and flags on top.
pub fn load_effective_config(
    path: &Path,
    model: Option<&str>,
) -> Result<Config, Box<dyn Error>> {
    let mut config = Config::load_from_path(path)?;
    config.apply_env_overrides(|name: &str| std::env::var(name).ok());
    if let Some(model) = model.map(str::trim).filter(|model| !model.is_empty()) {
        config.model = model.to_string();
    }
    Ok(config)
}

fn init_config(path: &Path) -> Result<(), Box<dyn Error>> {
    if path.exists() {
        println!("Config file already exists: {}", path_display(path));
        return Ok(());
    }
    Config::template().save_to_path(path)?;
    println!("✅ Wrote config template to {}", path_display(path));
    println!("Edit it and set api_key before chatting.");
    Ok(())
}

fn start_logging(config: &Config) {
    let log_dir = match Config::default_data_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("⚠️  Logging disabled: {err}");
            return;
        }
    };
    if let Err(err) = init_tracing(&log_dir, config.enable_logging) {
        eprintln!("⚠️  Logging disabled: {err}");
        return;
    }
    info!(model = %config.model, endpoint = %config.api_url, "ChefBot starting");
}

type CliSession<S> = ChatSession<S, ReqwestTransport>;

fn open_session(
    config: &Config,
    ephemeral: bool,
) -> Result<CliSession<Box<dyn Storage>>, Box<dyn Error>> {
    let storage: Box<dyn Storage> = if ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        match config.resolve_history_dir() {
            Ok(dir) => Box::new(FileStorage::new(dir)),
            Err(err) => {
                warn!(%err, "No history directory, keeping conversation in memory");
                eprintln!("⚠️  {err}; this conversation will not be saved.");
                Box::new(MemoryStorage::new())
            }
        }
    };
    Ok(session_with_storage(config, storage))
}

fn session_with_storage<S: Storage>(config: &Config, storage: S) -> CliSession<S> {
    let system_prompt = resolve_system_prompt(config.system_prompt.as_deref());
    ChatSession::new(
        TranscriptStore::load(storage, system_prompt),
        CompletionClient::new(ReqwestTransport::default()),
        config.completion_config(),
    )
}
