use std::path::PathBuf;

use thiserror::Error;

use crate::models::chat::ChatMode;
use crate::views::jd_management::InputMode;
use crate::views::Tab;

pub const HELP: &str = "\
Commands (prefix with / on the AI Assistant tab):
  tab <1-5|key>           switch tab
  mode <text|file|url>    choose how to add a JD
  title <text>            set the JD title
  content <text>          set the JD text (\\n for line breaks)
  url <link>              set the JD URL
  file <path>             pick a JD file
  save                    add the JD
  delete <id>             delete a JD
  resume <path>           pick a resume
  select <id>             toggle a JD for analysis
  analyze                 run the analysis
  ask <question>          ask the assistant
  chatmode <multi|single|career>  pick the assistant mode
  show | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tab(Tab),
    Mode(InputMode),
    Title(String),
    Content(String),
    Url(String),
    File(PathBuf),
    Save,
    Delete(String),
    Resume(PathBuf),
    Select(String),
    Analyze,
    Ask(String),
    ChatMode(ChatMode),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unknown command '{0}'. Type 'help' for the list.")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("No tab called '{0}'")]
    BadTab(String),

    #[error("Input mode must be text, file or url (got '{0}')")]
    BadMode(String),

    #[error("Chat mode must be multi, single or career (got '{0}')")]
    BadChatMode(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    ///
    /// On the chat tab, only `/`-prefixed lines are commands; anything else is a
    /// question, which mirrors pressing Enter in the chat box.
    pub fn parse(line: &str, active: Tab) -> Result<Option<Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let line = match (active, line.strip_prefix('/')) {
            (_, Some(rest)) => rest,
            (Tab::AiChat, None) => return Ok(Some(Command::Ask(line.to_string()))),
            (_, None) => line,
        };

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "tab" => {
                let key = required(rest, "tab")?;
                Command::Tab(Tab::parse(key).ok_or_else(|| ParseError::BadTab(key.to_string()))?)
            }
            "mode" => {
                let mode = required(rest, "mode")?;
                Command::Mode(
                    InputMode::parse(mode).ok_or_else(|| ParseError::BadMode(mode.to_string()))?,
                )
            }
            "title" => Command::Title(rest.to_string()),
            "content" => Command::Content(rest.replace("\\n", "\n")),
            "url" => Command::Url(rest.to_string()),
            "file" => Command::File(PathBuf::from(required(rest, "file")?)),
            "save" => Command::Save,
            "delete" => Command::Delete(required(rest, "delete")?.to_string()),
            "resume" => Command::Resume(PathBuf::from(required(rest, "resume")?)),
            "select" => Command::Select(required(rest, "select")?.to_string()),
            "analyze" => Command::Analyze,
            "ask" => Command::Ask(rest.to_string()),
            "chatmode" => {
                let mode = required(rest, "chatmode")?;
                Command::ChatMode(
                    ChatMode::parse(mode).ok_or_else(|| ParseError::BadChatMode(mode.to_string()))?,
                )
            }
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}
