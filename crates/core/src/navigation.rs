use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::catalog::{Catalog, ResolvedNode};
use crate::contact::ContactDirectory;
use crate::error::{CatalogError, NavigationError};
use crate::i18n::{interpolate, StringTable, Translator};
use crate::intent::{classify, normalize_text, preview};
use crate::models::{
    Action, ActionOutcome, ControlAction, ControlEffect, ControlNotice, FreeTextReply, Language,
    Presentation, Sender, SessionState, ROOT_NODE,
};

const BACK_KEY: &str = "back";
const BACK_ICON: &str = "🔙";

/// Drives one [`SessionState`] over the shared catalog.
///
/// The engine itself holds only immutable data; every transition takes the
/// session by `&mut` and either completes or leaves it untouched.
#[derive(Clone)]
pub struct NavigationEngine {
    catalog: Arc<Catalog>,
    translator: Arc<dyn Translator>,
    contacts: ContactDirectory,
}

impl NavigationEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        translator: Arc<dyn Translator>,
        contacts: ContactDirectory,
    ) -> Self {
        Self {
            catalog,
            translator,
            contacts,
        }
    }

    /// Built-in Riskalia content and strings.
    pub fn builtin(contacts: ContactDirectory) -> Result<Self, CatalogError> {
        Ok(Self::new(
            Arc::new(Catalog::builtin()?),
            Arc::new(StringTable::builtin()?),
            contacts,
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    pub fn initialize(&self, language: Language) -> SessionState {
        SessionState::new(language)
    }

    /// Entry point for every button press.
    #[instrument(skip(self, session), fields(language = %session.language, from = %session.current_node))]
    pub fn handle_action(
        &self,
        session: &mut SessionState,
        action_key: &str,
    ) -> Result<ActionOutcome, NavigationError> {
        if let Some(control) = ControlAction::parse(action_key) {
            let address = self.translator.translate("location.address", session.language);
            if let Some(effect) = self.contacts.effect_for(control, &address) {
                let notice = self.notice(effect, session.language);
                session.record(Sender::Bot, &notice.message, Some(&notice.title));
                debug!(control = ?control, "control action dispatched");
                return Ok(ActionOutcome::Control(notice));
            }
            return self.back(session).map(ActionOutcome::Navigated);
        }

        self.navigate_to(session, action_key, true)
            .map(ActionOutcome::Navigated)
    }

    /// Pops the history stack, or returns to root when it is empty. Never
    /// pushes onto the stack.
    pub fn back(&self, session: &mut SessionState) -> Result<Presentation, NavigationError> {
        let target = session
            .history
            .last()
            .cloned()
            .unwrap_or_else(|| ROOT_NODE.to_string());

        let presentation = self.navigate_to(session, &target, false)?;
        session.history.pop();
        Ok(presentation)
    }

    /// Classifies free text and answers from the canned response table.
    /// Blank input is ignored.
    #[instrument(skip(self, session, text), fields(language = %session.language))]
    pub fn handle_free_text(&self, session: &mut SessionState, text: &str) -> Option<FreeTextReply> {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return None;
        }

        session.record(Sender::User, &normalized, None);

        let category = classify(&normalized);
        let resolved = self.catalog.response(session.language, category);
        if resolved.category != category || resolved.language != session.language {
            debug!(
                requested = ?category,
                served = ?resolved.category,
                served_language = %resolved.language,
                "canned response fell back"
            );
        }

        let reply = FreeTextReply {
            category,
            title: resolved.response.title.clone(),
            content: resolved.response.content.clone(),
            suggestions: resolved.response.suggestions.clone(),
            source_language: resolved.language,
        };
        session.record(Sender::Bot, &reply.content, Some(&reply.title));

        debug!(category = ?category, text = %preview(&normalized, 48), "free text classified");
        Some(reply)
    }

    /// Restarts the conversation in `language`: root position, empty history
    /// and an empty message log.
    pub fn switch_language(
        &self,
        session: &mut SessionState,
        language: Language,
    ) -> Result<Presentation, NavigationError> {
        let resolved = self.resolve(language, ROOT_NODE)?;

        session.language = language;
        session.current_node = ROOT_NODE.to_string();
        session.history.clear();
        session.clear_log();

        Ok(self.present(session, resolved))
    }

    pub fn back_label(&self, session: &SessionState) -> String {
        let group = self
            .catalog
            .lookup(session.language, &session.current_node)
            .and_then(|resolved| resolved.node.parent_group);

        match group {
            Some(group) => self
                .translator
                .translate(&format!("back.{}", group.as_key()), session.language),
            None => self.translator.translate("back.default", session.language),
        }
    }

    /// The node's own actions plus a synthesized back action away from root.
    pub fn presented_actions(&self, session: &SessionState) -> Vec<Action> {
        match self.catalog.lookup(session.language, &session.current_node) {
            Some(resolved) => self.actions_for(session, resolved),
            None => Vec::new(),
        }
    }

    fn navigate_to(
        &self,
        session: &mut SessionState,
        key: &str,
        record_history: bool,
    ) -> Result<Presentation, NavigationError> {
        let resolved = self.resolve(session.language, key)?;

        if session.current_node != key {
            let previous = std::mem::replace(&mut session.current_node, key.to_string());
            if record_history {
                session.history.push(previous);
            }
        }

        let presentation = self.present(session, resolved);
        session.record(Sender::Bot, &presentation.content, Some(&presentation.title));
        Ok(presentation)
    }

    fn resolve(&self, language: Language, key: &str) -> Result<ResolvedNode<'_>, NavigationError> {
        self.catalog.lookup(language, key).ok_or_else(|| {
            warn!(key, language = %language, "node not found in decision tree");
            NavigationError::UnresolvedNode {
                key: key.to_string(),
                language,
            }
        })
    }

    fn present(&self, session: &SessionState, resolved: ResolvedNode<'_>) -> Presentation {
        Presentation {
            node_key: resolved.key.to_string(),
            title: resolved.node.title.clone(),
            content: resolved.node.content.clone(),
            actions: self.actions_for(session, resolved),
            source_language: resolved.language,
        }
    }

    fn actions_for(&self, session: &SessionState, resolved: ResolvedNode<'_>) -> Vec<Action> {
        let mut actions = resolved.node.actions.clone();
        if !session.is_at_root() && !actions.iter().any(Action::is_back) {
            actions.push(Action::new(BACK_KEY, self.back_label(session), BACK_ICON));
        }
        actions
    }

    fn notice(&self, effect: ControlEffect, language: Language) -> ControlNotice {
        let (prefix, has_link) = match &effect {
            ControlEffect::Call { .. } => ("call", true),
            ControlEffect::Email { .. } => ("email", true),
            ControlEffect::Appointment { .. } => ("appointment", false),
            ControlEffect::Location { .. } => ("location", true),
        };

        let address = match &effect {
            ControlEffect::Location { address, .. } => address.as_str(),
            _ => "",
        };
        let vars = [
            ("phone", self.contacts.phone.as_str()),
            ("email", self.contacts.email.as_str()),
            ("address", address),
        ];
        let text = |suffix: &str| {
            let template = self
                .translator
                .translate(&format!("{prefix}.{suffix}"), language);
            interpolate(&template, &vars)
        };

        ControlNotice {
            title: text("title"),
            message: text("message"),
            link_label: has_link.then(|| text("link")),
            effect,
        }
    }
}

impl std::fmt::Debug for NavigationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationEngine")
            .field("default_language", &self.catalog.default_language())
            .field("contacts", &self.contacts)
            .finish_non_exhaustive()
    }
}
