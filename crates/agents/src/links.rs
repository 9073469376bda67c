use riskalia_core::ControlEffect;

pub fn tel_uri(phone: &str) -> String {
    format!("tel:{phone}")
}

pub fn mailto_uri(address: &str) -> String {
    format!("mailto:{address}")
}

pub fn maps_uri(query: &str) -> String {
    format!("https://maps.google.com/?q={query}")
}

/// Platform URI for an effect; appointments only show text.
pub fn uri_for(effect: &ControlEffect) -> Option<String> {
    match effect {
        ControlEffect::Call { phone } => Some(tel_uri(phone)),
        ControlEffect::Email { address } => Some(mailto_uri(address)),
        ControlEffect::Location { maps_query, .. } => Some(maps_uri(maps_query)),
        ControlEffect::Appointment { .. } => None,
    }
}
