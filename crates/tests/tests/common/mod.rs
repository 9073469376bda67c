#![allow(dead_code)]

use std::sync::Arc;

use riskalia_agents::{Assistant, Presenter};
use riskalia_core::{Action, ContactDirectory, Language, NavigationEngine, Sender};
use riskalia_observability::AppMetrics;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Message {
        sender: Sender,
        title: Option<String>,
        content: String,
    },
    Actions(Vec<String>),
    Typing(bool),
    Link(String),
    Clear,
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<Event>,
}

impl RecordingPresenter {
    pub fn titles(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Message {
                    sender: Sender::Bot,
                    title: Some(title),
                    ..
                } => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_actions(&self) -> Vec<String> {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::Actions(keys) => Some(keys.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, sender: Sender, content: &str, title: Option<&str>) {
        self.events.push(Event::Message {
            sender,
            title: title.map(str::to_string),
            content: content.to_string(),
        });
    }

    fn render_actions(&mut self, actions: &[Action]) {
        self.events
            .push(Event::Actions(actions.iter().map(|a| a.key.clone()).collect()));
    }

    fn set_typing(&mut self, typing: bool) {
        self.events.push(Event::Typing(typing));
    }

    fn open_link(&mut self, _label: &str, uri: &str) {
        self.events.push(Event::Link(uri.to_string()));
    }

    fn clear(&mut self) {
        self.events.push(Event::Clear);
    }
}

pub fn engine() -> Arc<NavigationEngine> {
    Arc::new(NavigationEngine::builtin(ContactDirectory::default()).expect("builtin engine"))
}

pub fn assistant(language: Language) -> Assistant<RecordingPresenter> {
    Assistant::new(engine(), RecordingPresenter::default(), language, AppMetrics::shared())
}
