use std::env;
use std::time::Duration;

use riskalia_core::{ContactDirectory, Language};
use serde::Serialize;

/// Simulated typing pauses before a response appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypingDelays {
    pub navigation: Duration,
    /// Added on top of `navigation` when going back.
    pub back: Duration,
    pub free_text: Duration,
}

impl Default for TypingDelays {
    fn default() -> Self {
        Self {
            navigation: Duration::from_millis(800),
            back: Duration::from_millis(500),
            free_text: Duration::from_millis(1000),
        }
    }
}

impl TypingDelays {
    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    pub fn uniform(delay: Duration) -> Self {
        Self {
            navigation: delay,
            back: delay,
            free_text: delay,
        }
    }

    /// Total pause before a back navigation renders.
    pub fn back_total(&self) -> Duration {
        self.back + self.navigation
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantConfig {
    pub default_language: Language,
    pub delays: TypingDelays,
    pub contacts: ContactDirectory,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            default_language: Language::DEFAULT,
            delays: TypingDelays::default(),
            contacts: ContactDirectory::default(),
        }
    }
}

impl AssistantConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let contacts = defaults.contacts;

        Self {
            default_language: Language::from_optional_str(env::var("RISKALIA_LANG").ok().as_deref())
                .unwrap_or(defaults.default_language),
            delays: env_millis("RISKALIA_TYPING_DELAY_MS")
                .map(TypingDelays::uniform)
                .unwrap_or(defaults.delays),
            contacts: ContactDirectory {
                phone: env::var("RISKALIA_PHONE").unwrap_or(contacts.phone),
                email: env::var("RISKALIA_EMAIL").unwrap_or(contacts.email),
                address: env::var("RISKALIA_ADDRESS").ok().or(contacts.address),
                maps_query: env::var("RISKALIA_MAPS_QUERY").unwrap_or(contacts.maps_query),
            },
        }
    }
}

fn env_millis(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}
