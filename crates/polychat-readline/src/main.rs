mod commands;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use polychat_application::{ChatServices, ChatSession};
use polychat_core::config::PolychatConfig;
use polychat_core::intent::SystemClock;
use polychat_core::language::TextStatistics;
use polychat_core::session::{Turn, TurnRole};
use polychat_infrastructure::{ConfigService, GoogleTranslator, WhatlangDetector, WikipediaSource};

use crate::commands::{COMMANDS, Input};

/// rustyline helper: completes, highlights and hints slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<&'static str>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.to_vec(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

fn init_tracing(config: &PolychatConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Wires the production backends around the loaded configuration.
fn build_services(config: &PolychatConfig) -> Result<ChatServices> {
    let detector = Arc::new(WhatlangDetector::new(config.detection_policy()));
    let translation = Arc::new(GoogleTranslator::from_settings(
        &config.translation,
        &config.http,
    )?);
    let knowledge = Arc::new(WikipediaSource::from_settings(
        &config.lookup,
        &config.http,
        config.lookup_languages.clone(),
    )?);

    Ok(ChatServices::from_config(
        config,
        detector,
        translation,
        knowledge,
        Arc::new(SystemClock),
    ))
}

fn print_bot(text: &str, source: Option<&str>) {
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
    if let Some(source) = source {
        println!("{}", format!("(source: {source})").bright_black());
    }
}

fn print_turn(turn: &Turn) {
    let label = format!("[{}]", turn.language.code());
    match turn.role {
        TurnRole::User => println!("{} {}", label.green(), turn.text.green()),
        TurnRole::Assistant => {
            println!("{}", label.bright_blue());
            print_bot(&turn.text, turn.source.as_deref());
        }
    }
}

fn print_stats(stats: &TextStatistics) {
    println!("{}", "Text statistics".bright_yellow());
    println!("  characters: {}", stats.character_count);
    println!("  words:      {}", stats.word_count);
    println!(
        "  language:   {} ({}), confidence {:.2}",
        stats.language_name,
        stats.detected_language.code(),
        stats.confidence
    );
    println!("  supported:  {}", stats.is_supported);
}

fn print_help() {
    println!(
        "{}",
        "Ask a question in English, Hindi or Telugu. Commands:".bright_black()
    );
    println!("{}", "  /lang <auto|code>          reply language".bright_black());
    println!("{}", "  /mode <knowledge|intent>   answer source".bright_black());
    println!("{}", "  /stats <text>              language statistics".bright_black());
    println!("{}", "  /history                   show the conversation".bright_black());
    println!("{}", "  /quit                      exit".bright_black());
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_service = ConfigService::new()?;
    let config = config_service.get_config()?;
    init_tracing(&config);
    tracing::info!(path = %config_service.path().display(), mode = ?config.mode, "Configuration loaded");

    let services = build_services(&config)?;
    let mut session = ChatSession::from_config(services, &config);

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== PolyChat ===".bright_magenta().bold());
    print_help();
    println!();
    print_bot(&session.greeting().await, None);

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        };

        let input = Input::parse(&line);
        if input != Input::Empty {
            let _ = rl.add_history_entry(line.as_str());
        }

        match input {
            Input::Empty => continue,
            Input::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Input::Help => print_help(),
            Input::Invalid(message) => println!("{}", message.yellow()),
            Input::Lang(preference) => match config.check_preference(preference) {
                Ok(preference) => {
                    session.set_preference(preference);
                    println!("{}", format!("Reply language: {preference:?}").bright_black());
                }
                Err(err) => println!("{}", err.to_string().yellow()),
            },
            Input::Mode(mode) => {
                session.set_mode(mode);
                println!("{}", format!("Answer mode: {mode:?}").bright_black());
            }
            Input::Stats(text) => print_stats(&session.text_statistics(&text)),
            Input::History => {
                if session.transcript().is_empty() {
                    println!("{}", "No turns yet.".bright_black());
                }
                for turn in session.transcript().turns() {
                    print_turn(turn);
                }
            }
            Input::Chat(text) => {
                let reply = session.process_turn(&text).await;
                print_bot(&reply.text, reply.source.as_deref());
            }
        }
    }

    Ok(())
}
