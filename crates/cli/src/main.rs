mod terminal;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use parking_lot::Mutex;
use riskalia_agents::{Assistant, AssistantConfig, ChatWidget, TypingDelays};
use riskalia_core::{classify_for, normalize_text, Language, NavigationEngine};
use riskalia_observability::{init_tracing, AppMetrics};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::terminal::{pick, ActionBoard, TerminalPresenter};

#[derive(Debug, Parser)]
#[command(name = "riskalia-chat")]
#[command(about = "Riskalia assistant CLI")]
struct Cli {
    /// Conversation language: fr, en or ar.
    #[arg(long, env = "RISKALIA_LANG")]
    lang: Option<String>,

    #[arg(long, env = "RISKALIA_TYPING_DELAY_MS")]
    typing_delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Chat,
    /// Print the category and canned answer for a message.
    Classify { text: String },
    /// Print a node as JSON.
    Show { node: String },
    /// List actions that lead nowhere.
    Audit,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("riskalia_cli");
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let engine = Arc::new(
        NavigationEngine::builtin(config.contacts.clone())
            .context("failed loading built-in assistant content")?,
    );
    let language = config.default_language;

    match cli.command {
        Command::Chat => run_chat(engine, config).await?,
        Command::Classify { text } => {
            let normalized = normalize_text(&text);
            let category = classify_for(&normalized, language);
            let resolved = engine.catalog().response(language, category);
            let output = serde_json::json!({
                "category": category.as_key(),
                "language": resolved.language,
                "title": resolved.response.title,
                "content": resolved.response.content,
                "suggestions": resolved.response.suggestions,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Show { node } => {
            let Some(resolved) = engine.catalog().lookup(language, &node) else {
                bail!("node `{node}` not found for {language}");
            };
            let output = serde_json::json!({
                "key": resolved.key,
                "language": resolved.language,
                "node": resolved.node,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Audit => {
            let languages = match cli.lang {
                Some(_) => vec![language],
                None => engine.catalog().languages(),
            };
            let dangling = languages
                .into_iter()
                .flat_map(|language| engine.catalog().audit(language))
                .collect::<Vec<_>>();
            println!("{}", serde_json::to_string_pretty(&dangling)?);
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AssistantConfig> {
    let mut config = AssistantConfig::from_env();

    if let Some(lang) = cli.lang.as_deref() {
        config.default_language =
            Language::parse(lang).with_context(|| format!("unsupported language `{lang}`, expected fr, en or ar"))?;
    }
    if let Some(millis) = cli.typing_delay_ms {
        config.delays = TypingDelays::uniform(Duration::from_millis(millis));
    }

    Ok(config)
}

async fn run_chat(engine: Arc<NavigationEngine>, config: AssistantConfig) -> Result<()> {
    let metrics = AppMetrics::shared();
    let board: ActionBoard = Arc::new(Mutex::new(Vec::new()));

    let mut assistant = Assistant::new(
        engine,
        TerminalPresenter::new(board.clone()),
        config.default_language,
        metrics.clone(),
    );
    assistant.start();

    println!("\nType a number to pick an action, or a question. :back, :lang <fr|en|ar>, :quit");

    let widget = ChatWidget::spawn(assistant, config.delays);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        match message {
            ":quit" | ":exit" => break,
            ":back" => widget.press("back")?,
            _ => {
                if let Some(code) = message.strip_prefix(":lang") {
                    match Language::parse(code.trim()) {
                        Some(language) => widget.switch_language(language)?,
                        None => println!("unsupported language `{}`", code.trim()),
                    }
                } else if let Some(key) = pick(&board, message) {
                    widget.press(key)?;
                } else {
                    widget.type_text(message)?;
                }
            }
        }
    }

    let assistant = widget.shutdown().await?;
    info!(
        conversation = %assistant.conversation_id(),
        messages = assistant.session().log.len(),
        metrics = %metrics.snapshot_json(),
        "chat session closed"
    );

    Ok(())
}
