use serde::{Deserialize, Serialize};

use crate::models::{ControlAction, ControlEffect};

/// Static contact details handed to the reserved control actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDirectory {
    pub phone: String,
    pub email: String,
    /// Replaces the localized `location.address` string when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub maps_query: String,
}

impl Default for ContactDirectory {
    fn default() -> Self {
        Self {
            phone: "+212-666-756991".to_string(),
            email: "contact@riskalia.ma".to_string(),
            address: None,
            maps_query: "16+Rue+de+Terves+Casablanca".to_string(),
        }
    }
}

impl ContactDirectory {
    /// `None` for `Back`, which is a navigation, not an external effect.
    /// `localized_address` is used unless an address override is configured.
    pub fn effect_for(&self, control: ControlAction, localized_address: &str) -> Option<ControlEffect> {
        match control {
            ControlAction::Call => Some(ControlEffect::Call {
                phone: self.phone.clone(),
            }),
            ControlAction::Email => Some(ControlEffect::Email {
                address: self.email.clone(),
            }),
            ControlAction::Appointment => Some(ControlEffect::Appointment {
                phone: self.phone.clone(),
                email: self.email.clone(),
            }),
            ControlAction::Location => Some(ControlEffect::Location {
                address: self
                    .address
                    .clone()
                    .unwrap_or_else(|| localized_address.to_string()),
                maps_query: self.maps_query.clone(),
            }),
            ControlAction::Back => None,
        }
    }
}
