use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use riskalia_core::{ControlAction, Language};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::TypingDelays;
use crate::{Assistant, Presenter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetInput {
    Action(String),
    Text(String),
    Language(Language),
}

/// Front end of a conversation that paces responses with a typing pause.
///
/// Inputs go to a single worker over an unbounded channel and are handled
/// strictly in arrival order: input submitted during a pause waits for the
/// previous one to finish rendering.
pub struct ChatWidget<P> {
    inbox: mpsc::UnboundedSender<WidgetInput>,
    worker: JoinHandle<Assistant<P>>,
}

impl<P: Presenter + 'static> ChatWidget<P> {
    /// Must be called from within a tokio runtime.
    pub fn spawn(assistant: Assistant<P>, delays: TypingDelays) -> Self {
        let (inbox, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(assistant, receiver, delays));
        Self { inbox, worker }
    }

    pub fn submit(&self, input: WidgetInput) -> Result<()> {
        self.inbox
            .send(input)
            .map_err(|_| anyhow!("chat widget worker has stopped"))
    }

    pub fn press(&self, key: impl Into<String>) -> Result<()> {
        self.submit(WidgetInput::Action(key.into()))
    }

    pub fn type_text(&self, text: impl Into<String>) -> Result<()> {
        self.submit(WidgetInput::Text(text.into()))
    }

    pub fn switch_language(&self, language: Language) -> Result<()> {
        self.submit(WidgetInput::Language(language))
    }

    /// Drains every queued input, then hands the assistant back.
    pub async fn shutdown(self) -> Result<Assistant<P>> {
        drop(self.inbox);
        self.worker.await.context("chat widget worker panicked")
    }
}

async fn run<P: Presenter>(
    mut assistant: Assistant<P>,
    mut receiver: mpsc::UnboundedReceiver<WidgetInput>,
    delays: TypingDelays,
) -> Assistant<P> {
    while let Some(input) = receiver.recv().await {
        match input {
            WidgetInput::Action(key) => {
                // Controls and dead keys answer immediately.
                let pause = match ControlAction::parse(&key) {
                    Some(ControlAction::Back) => Some(delays.back_total()),
                    Some(_) => None,
                    None if assistant.resolves(&key) => Some(delays.navigation),
                    None => None,
                };
                if let Some(pause) = pause {
                    typing(&mut assistant, pause).await;
                }
                if let Err(err) = assistant.handle_action(&key) {
                    debug!(error = %err, "queued action dropped");
                }
            }
            WidgetInput::Text(text) => {
                if let Some(normalized) = assistant.echo_user(&text) {
                    typing(&mut assistant, delays.free_text).await;
                    assistant.answer_free_text(&normalized);
                }
            }
            WidgetInput::Language(language) => {
                if let Err(err) = assistant.switch_language(language) {
                    warn!(error = %err, language = %language, "language switch failed");
                }
            }
        }
    }

    debug!(conversation = %assistant.conversation_id(), "chat widget inbox closed");
    assistant
}

async fn typing<P: Presenter>(assistant: &mut Assistant<P>, pause: Duration) {
    assistant.presenter_mut().set_typing(true);
    tokio::time::sleep(pause).await;
    assistant.presenter_mut().set_typing(false);
}
