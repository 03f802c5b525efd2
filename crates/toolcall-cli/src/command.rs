//! Slash commands of the interactive loop
//!
//! Every line that starts with `/` is parsed here; anything else is a chat
//! message.

use std::str::FromStr;

use thiserror::Error;

use toolcall_core::{Model, TemperatureUnit, ToolName};

pub const HELP: &str = "\
Commands:
  /tools                       list tools with their state
  /enable <tool>               advertise a tool
  /disable <tool>              stop advertising a tool
  /fields <tool> <a,b,...>     choose the response fields of a tool
  /unit <celsius|fahrenheit>   temperature unit of the weather tool
  /models                      list models
  /model <id>                  switch model
  /history                     print the conversation
  /help                        show this help
  /quit                        leave";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Chat(String),
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tools,
    Enable(String),
    Disable(String),
    Fields { tool: String, fields: Vec<String> },
    Unit(TemperatureUnit),
    Models,
    Model(Model),
    History,
    Help,
    Quit,
}

/// Why a command line could not be understood
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CommandError(pub String);

impl FromStr for Input {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.trim().strip_prefix('/') {
            Some(command) => command.parse().map(Input::Command),
            None => Ok(Input::Chat(line.trim().to_string())),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        let one = |usage: &str| match rest.as_slice() {
            [arg] => Ok(arg.to_string()),
            _ => Err(CommandError(format!("usage: {}", usage))),
        };

        match name {
            "tools" => Ok(Command::Tools),
            "enable" => one("/enable <tool>").map(Command::Enable),
            "disable" => one("/disable <tool>").map(Command::Disable),
            "fields" => match rest.as_slice() {
                [tool, list @ ..] if !list.is_empty() => Ok(Command::Fields {
                    tool: tool.to_string(),
                    fields: list
                        .join(" ")
                        .split(',')
                        .map(str::trim)
                        .filter(|f| !f.is_empty())
                        .map(String::from)
                        .collect(),
                }),
                _ => Err(CommandError("usage: /fields <tool> <a,b,...>".to_string())),
            },
            "unit" => {
                let unit = one("/unit <celsius|fahrenheit>")?;
                unit.parse().map(Command::Unit).map_err(CommandError)
            }
            "models" => Ok(Command::Models),
            "model" => {
                let id = one("/model <id>")?;
                id.parse()
                    .map(Command::Model)
                    .map_err(|e: toolcall_core::UnknownModel| CommandError(e.to_string()))
            }
            "history" => Ok(Command::History),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError(format!("unknown command '/{}' (try /help)", other))),
        }
    }
}

/// Resolve a tool argument; accepts the exact name only
pub fn tool_name(name: &str) -> Result<ToolName, CommandError> {
    name.parse().map_err(|e: toolcall_core::RegistryError| CommandError(e.to_string()))
}
