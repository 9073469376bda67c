use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ROOT_NODE: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Fr,
    En,
    Ar,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Fr, Language::En, Language::Ar];

    /// The language every lookup falls back to once.
    pub const DEFAULT: Language = Language::Fr;

    pub fn from_optional_str(value: Option<&str>) -> Option<Self> {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "fr" || v == "fr-fr" || v == "fr-ma" || v == "french" => Some(Self::Fr),
            Some(v) if v == "en" || v == "en-us" || v == "en-gb" || v == "english" => Some(Self::En),
            Some(v) if v == "ar" || v == "ar-ma" || v == "ar-sa" || v == "arabic" => Some(Self::Ar),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::from_optional_str(Some(value))
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Ar => "ar",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Semantic group a node returns to; selects the back label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupId {
    Assurance,
    Entreprise,
    Particulier,
    Reassurance,
    Climate,
    Services,
    Esg,
}

impl GroupId {
    pub fn as_key(self) -> &'static str {
        match self {
            Self::Assurance => "assurance",
            Self::Entreprise => "entreprise",
            Self::Particulier => "particulier",
            Self::Reassurance => "reassurance",
            Self::Climate => "climate",
            Self::Services => "services",
            Self::Esg => "esg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Insurance,
    Reinsurance,
    Climate,
    Contact,
    Quote,
    Default,
}

impl Category {
    /// Classification order; the first category with a keyword hit wins.
    pub const PRIORITY: [Category; 5] = [
        Category::Insurance,
        Category::Reinsurance,
        Category::Climate,
        Category::Contact,
        Category::Quote,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "insurance" | "assurance" => Some(Self::Insurance),
            "reinsurance" | "reassurance" => Some(Self::Reinsurance),
            "climate" => Some(Self::Climate),
            "contact" => Some(Self::Contact),
            "quote" | "devis" => Some(Self::Quote),
            "default" => Some(Self::Default),
            _ => None,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::Insurance => "insurance",
            Self::Reinsurance => "reinsurance",
            Self::Climate => "climate",
            Self::Contact => "contact",
            Self::Quote => "quote",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
}

impl Action {
    pub fn new(key: impl Into<String>, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: icon.into(),
        }
    }

    pub fn is_back(&self) -> bool {
        matches!(ControlAction::parse(&self.key), Some(ControlAction::Back))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_group: Option<GroupId>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Legacy free-text answer; suggestions are display-only labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CannedResponse {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Reserved action keys intercepted before any tree lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Call,
    Email,
    Appointment,
    Location,
    Back,
}

impl ControlAction {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "call" | "appel_telephone" => Some(Self::Call),
            "email" | "envoyer_email" => Some(Self::Email),
            "appointment" | "rendez_vous" => Some(Self::Appointment),
            "location" | "localisation" => Some(Self::Location),
            "back" | "رجوع" | "عودة" => Some(Self::Back),
            other if other.contains("retour") => Some(Self::Back),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlEffect {
    Call { phone: String },
    Email { address: String },
    Appointment { phone: String, email: String },
    Location { address: String, maps_query: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlNotice {
    pub effect: ControlEffect,
    pub title: String,
    pub message: String,
    pub link_label: Option<String>,
}

/// A resolved node ready for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub node_key: String,
    pub title: String,
    pub content: String,
    pub actions: Vec<Action>,
    /// Language the node content was actually taken from.
    pub source_language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Navigated(Presentation),
    Control(ControlNotice),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextReply {
    pub category: Category,
    pub title: String,
    pub content: String,
    pub suggestions: Vec<String>,
    pub source_language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub title: Option<String>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub language: Language,
    pub current_node: String,
    pub history: Vec<String>,
    pub log: Vec<ChatMessage>,
}

impl SessionState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            current_node: ROOT_NODE.to_string(),
            history: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn is_at_root(&self) -> bool {
        self.current_node == ROOT_NODE
    }

    pub fn record(&mut self, sender: Sender, text: &str, title: Option<&str>) {
        self.log.push(ChatMessage {
            sender,
            text: text.to_string(),
            title: title.map(ToString::to_string),
            at: Utc::now(),
        });
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_aliases() {
        assert_eq!(Language::parse("FR-fr"), Some(Language::Fr));
        assert_eq!(Language::parse(" english "), Some(Language::En));
        assert_eq!(Language::parse("ar-MA"), Some(Language::Ar));
        assert_eq!(Language::parse("de"), None);
    }

    #[test]
    fn recognizes_legacy_control_keys() {
        assert_eq!(ControlAction::parse("appel_telephone"), Some(ControlAction::Call));
        assert_eq!(ControlAction::parse("retour_assurance"), Some(ControlAction::Back));
        assert_eq!(ControlAction::parse("رجوع"), Some(ControlAction::Back));
        assert_eq!(ControlAction::parse("assurance"), None);
    }
}
