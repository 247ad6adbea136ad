use polychat_core::config::AnswerMode;
use polychat_core::session::DisplayPreference;

pub const COMMANDS: &[&str] = &["/lang", "/mode", "/stats", "/history", "/help", "/quit"];

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Empty,
    Chat(String),
    Lang(DisplayPreference),
    Mode(AnswerMode),
    Stats(String),
    History,
    Help,
    Quit,
    /// A command that could not be parsed, with a usage hint.
    Invalid(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        if line == "quit" || line == "exit" {
            return Self::Quit;
        }
        if !line.starts_with('/') {
            return Self::Chat(line.to_string());
        }

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "/lang" => match DisplayPreference::parse(argument) {
                Some(preference) => Self::Lang(preference),
                None => Self::Invalid("usage: /lang <auto|en|hi|te|es|fr>".to_string()),
            },
            "/mode" => match argument.to_ascii_lowercase().as_str() {
                "knowledge" => Self::Mode(AnswerMode::Knowledge),
                "intent" => Self::Mode(AnswerMode::Intent),
                _ => Self::Invalid("usage: /mode <knowledge|intent>".to_string()),
            },
            "/stats" if !argument.is_empty() => Self::Stats(argument.to_string()),
            "/stats" => Self::Invalid("usage: /stats <text>".to_string()),
            "/history" => Self::History,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Invalid(format!("unknown command: {other}")),
        }
    }
}
