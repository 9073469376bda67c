pub mod config;
pub mod links;
pub mod widget;

use std::sync::Arc;
use std::time::Instant;

use riskalia_core::{
    normalize_text, Action, ActionOutcome, Category, ControlNotice, FreeTextReply, Language,
    NavigationEngine, NavigationError, Presentation, Sender, SessionState,
};
use riskalia_observability::AppMetrics;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub use config::{AssistantConfig, TypingDelays};
pub use widget::{ChatWidget, WidgetInput};

/// Rendering surface for one conversation. Implementations own whatever
/// display state they need; the assistant only pushes to them.
pub trait Presenter: Send {
    fn render(&mut self, sender: Sender, content: &str, title: Option<&str>);

    fn render_actions(&mut self, actions: &[Action]);

    fn set_typing(&mut self, _typing: bool) {}

    fn open_link(&mut self, label: &str, uri: &str);

    /// Drops previously rendered messages. Called on language switch.
    fn clear(&mut self) {}

    fn handle_control(&mut self, notice: &ControlNotice) {
        self.render(Sender::Bot, &notice.message, Some(&notice.title));
        if let (Some(label), Some(uri)) = (notice.link_label.as_deref(), links::uri_for(&notice.effect)) {
            self.open_link(label, &uri);
        }
    }
}

/// One conversation: the shared engine, the session it owns and the
/// presenter it renders to.
pub struct Assistant<P> {
    engine: Arc<NavigationEngine>,
    presenter: P,
    session: SessionState,
    metrics: Arc<AppMetrics>,
    conversation_id: Uuid,
}

impl<P: Presenter> Assistant<P> {
    pub fn new(
        engine: Arc<NavigationEngine>,
        presenter: P,
        language: Language,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        let session = engine.initialize(language);
        Self {
            engine,
            presenter,
            session,
            metrics,
            conversation_id: Uuid::new_v4(),
        }
    }

    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn language(&self) -> Language {
        self.session.language
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_parts(self) -> (P, SessionState) {
        (self.presenter, self.session)
    }

    pub fn back_label(&self) -> String {
        self.engine.back_label(&self.session)
    }

    /// Whether `key` names a node reachable from the current language.
    pub fn resolves(&self, key: &str) -> bool {
        self.engine.catalog().contains(self.session.language, key)
    }

    /// Welcome line plus the root quick actions.
    pub fn start(&mut self) {
        let welcome = self
            .engine
            .translator()
            .translate("chatbot.welcome", self.session.language);
        self.presenter.render(Sender::Bot, &welcome, None);

        let actions = self.engine.presented_actions(&self.session);
        self.presenter.render_actions(&actions);
        info!(
            conversation = %self.conversation_id,
            language = %self.session.language,
            "conversation started"
        );
    }

    #[instrument(skip(self), fields(conversation = %self.conversation_id))]
    pub fn handle_action(&mut self, key: &str) -> Result<ActionOutcome, NavigationError> {
        let started = Instant::now();
        self.metrics.inc_action();

        let outcome = self.engine.handle_action(&mut self.session, key);
        match &outcome {
            Ok(ActionOutcome::Navigated(presentation)) => self.show(presentation),
            Ok(ActionOutcome::Control(notice)) => {
                self.metrics.inc_control_effect();
                self.presenter.handle_control(notice);
            }
            Err(err) => {
                self.metrics.inc_unresolved();
                warn!(error = %err, "action declined");
            }
        }

        self.metrics.observe_latency(started.elapsed());
        info!(
            node = %self.session.current_node,
            depth = self.session.history.len(),
            "action handled"
        );
        outcome
    }

    /// Echoes the user's text and answers it. Blank input renders nothing.
    pub fn handle_free_text(&mut self, text: &str) -> Option<FreeTextReply> {
        let normalized = self.echo_user(text)?;
        self.answer_free_text(&normalized)
    }

    /// Renders the user's message and returns its normalized form, or `None`
    /// for blank input.
    pub fn echo_user(&mut self, text: &str) -> Option<String> {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return None;
        }
        self.presenter.render(Sender::User, &normalized, None);
        Some(normalized)
    }

    #[instrument(skip(self, text), fields(conversation = %self.conversation_id))]
    pub fn answer_free_text(&mut self, text: &str) -> Option<FreeTextReply> {
        let started = Instant::now();
        let reply = self.engine.handle_free_text(&mut self.session, text)?;

        self.metrics.inc_free_text();
        if reply.category == Category::Default {
            self.metrics.inc_default_category();
        }
        if reply.source_language != self.session.language {
            self.metrics.inc_language_fallback();
        }

        self.presenter
            .render(Sender::Bot, &reply.content, Some(&reply.title));
        self.metrics.observe_latency(started.elapsed());
        info!(category = reply.category.as_key(), "free text answered");
        Some(reply)
    }

    /// Restarts in `language`: clears the presenter, then shows the welcome
    /// line and root actions again.
    pub fn switch_language(&mut self, language: Language) -> Result<Presentation, NavigationError> {
        let presentation = self.engine.switch_language(&mut self.session, language)?;
        self.metrics.inc_language_switch();

        self.presenter.clear();
        let welcome = self.engine.translator().translate("chatbot.welcome", language);
        self.presenter.render(Sender::Bot, &welcome, None);
        self.presenter.render_actions(&presentation.actions);

        info!(
            conversation = %self.conversation_id,
            language = %language,
            "language switched"
        );
        Ok(presentation)
    }

    fn show(&mut self, presentation: &Presentation) {
        if presentation.source_language != self.session.language {
            self.metrics.inc_language_fallback();
        }
        self.presenter
            .render(Sender::Bot, &presentation.content, Some(&presentation.title));
        self.presenter.render_actions(&presentation.actions);
    }
}
