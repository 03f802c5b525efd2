//! `toolcall`: interactive terminal chat with configurable mock tools

mod command;
mod error;
mod render;

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use toolcall_core::logging::LOG_LEVEL_ENV;
use toolcall_core::{
    create_provider, ChainSecretStore, ConfigProvider, ConsoleLogger, EnvSecretStore,
    FileConfigProvider, LogLevel, Logger, MemorySecretStore, Model, SecretStore, Session,
    TemperatureUnit, ToolName, ToolPatch, OPENAI_KEY, OPENPIPE_KEY,
};

use crate::command::{Command, Input, HELP};
use crate::error::CliResult;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file (default: workspace, then user config)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Initial model, overriding the config file
    #[arg(short, long)]
    model: Option<Model>,

    /// Answer locally with an echoing mock instead of calling the endpoint
    #[arg(long)]
    mock: bool,

    /// Minimum level written to stderr
    #[arg(long, env = LOG_LEVEL_ENV, default_value = "warn")]
    log_level: LogLevel,

    /// OpenAI API key (falls back to OPENAI_API_KEY)
    #[arg(long, value_name = "KEY")]
    openai_api_key: Option<String>,

    /// OpenPipe API key (falls back to OPENPIPE_API_KEY)
    #[arg(long, value_name = "KEY")]
    openpipe_api_key: Option<String>,
}

impl Args {
    /// Keys given on the command line win over the environment
    fn secret_store(&self) -> Arc<dyn SecretStore> {
        let mut flags = HashMap::new();
        if let Some(key) = &self.openai_api_key {
            flags.insert(OPENAI_KEY.to_string(), key.clone());
        }
        if let Some(key) = &self.openpipe_api_key {
            flags.insert(OPENPIPE_KEY.to_string(), key.clone());
        }

        Arc::new(ChainSecretStore::new(vec![
            Arc::new(MemorySecretStore::with_secrets(flags)),
            Arc::new(EnvSecretStore::new()),
        ]))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new().with_level(args.log_level));

    match run(args, logger.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger.error(&e.to_string());
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, logger: Arc<dyn Logger>) -> CliResult<()> {
    let config_provider = match &args.config {
        Some(path) => FileConfigProvider::explicit(path),
        None => FileConfigProvider::discover(std::env::current_dir()?),
    };
    logger.debug(&format!("[cli] config: {:?}", config_provider));
    let mut config = config_provider.load()?;
    if let Some(model) = args.model {
        config.model = Some(model);
    }

    let kind = if args.mock { "mock" } else { "http" };
    let provider = create_provider(kind, &config.endpoint, args.secret_store(), logger.clone())?;
    let mut session = Session::from_config(&config, provider, logger)?;

    println!(
        "toolcall: model {} via {}, {} of {} tools enabled. /help for commands.",
        session.model().id(),
        session.provider_name(),
        session.registry().enabled_count(),
        ToolName::ALL.len()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let input = match line.parse::<Input>() {
            Ok(input) => input,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match input {
            Input::Chat(text) if text.is_empty() => continue,
            Input::Chat(text) => match session.submit(&text).await {
                Ok(result) => println!("{}", render::result(&result)),
                Err(e) => println!("error: {}", e),
            },
            Input::Command(Command::Quit) => break,
            Input::Command(command) => {
                if let Err(e) = apply(&mut session, command) {
                    println!("error: {}", e);
                }
            }
        }
    }

    Ok(())
}

/// Run one configuration command against the session
fn apply(session: &mut Session, command: Command) -> CliResult<()> {
    match command {
        Command::Tools => println!("{}", render::tools(session.registry())),
        Command::Enable(tool) => {
            session.registry_mut().update_by_name(&tool, ToolPatch::new().enabled(true))?;
            println!("enabled {}", tool);
        }
        Command::Disable(tool) => {
            session.registry_mut().update_by_name(&tool, ToolPatch::new().enabled(false))?;
            println!("disabled {}", tool);
        }
        Command::Fields { tool, fields } => {
            let name = crate::command::tool_name(&tool)?;
            session.registry_mut().update(name, ToolPatch::new().fields(fields))?;
            println!(
                "{} fields: {}",
                name,
                session.registry().get(name).selected_fields.join(",")
            );
        }
        Command::Unit(unit) => {
            set_unit(session, unit)?;
            println!("weather unit: {}", unit);
        }
        Command::Models => println!("{}", render::models(session.model())),
        Command::Model(model) => {
            session.model_mut().select(model);
            println!("model: {}", model);
        }
        Command::History => println!("{}", render::history(session.log())),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

fn set_unit(session: &mut Session, unit: TemperatureUnit) -> Result<(), toolcall_core::RegistryError> {
    session
        .registry_mut()
        .update(ToolName::GetCurrentWeather, ToolPatch::new().unit(unit))
}
