mod common;

use std::time::Duration;

use anyhow::Result;
use riskalia_agents::{ChatWidget, TypingDelays, WidgetInput};
use riskalia_core::{Language, Sender, ROOT_NODE};

use common::{assistant, Event};

fn short_delays() -> TypingDelays {
    TypingDelays::uniform(Duration::from_millis(5))
}

fn messages(events: &[Event]) -> Vec<(Sender, String)> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Message {
                sender,
                title,
                content,
            } => Some((*sender, title.clone().unwrap_or_else(|| content.clone()))),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn rapid_inputs_are_rendered_in_arrival_order() -> Result<()> {
    let widget = ChatWidget::spawn(assistant(Language::Fr), short_delays());

    widget.press("assurance")?;
    widget.type_text("un devis svp")?;
    widget.press("back")?;
    widget.press("call")?;

    let (presenter, session) = widget.shutdown().await?.into_parts();

    assert_eq!(
        messages(&presenter.events),
        vec![
            (Sender::Bot, "Nos Solutions d'Assurance".to_string()),
            (Sender::User, "un devis svp".to_string()),
            (Sender::Bot, "Demande de Devis".to_string()),
            (Sender::Bot, "Comment puis-je vous aider ?".to_string()),
            (Sender::Bot, "Appel téléphonique".to_string()),
        ]
    );
    assert_eq!(session.current_node, ROOT_NODE);
    assert!(session.history.is_empty());
    Ok(())
}

#[tokio::test]
async fn typing_indicator_wraps_paced_responses_only() -> Result<()> {
    let widget = ChatWidget::spawn(assistant(Language::En), short_delays());

    widget.press("contact")?;
    widget.press("email")?;
    widget.press("nonexistent_key")?;

    let (presenter, _) = widget.shutdown().await?.into_parts();
    let events = presenter.events;

    assert_eq!(events[0], Event::Typing(true));
    assert_eq!(events[1], Event::Typing(false));
    assert!(matches!(
        &events[2],
        Event::Message { title: Some(title), .. } if title == "Contact Us"
    ));

    let typing_toggles = events
        .iter()
        .filter(|event| matches!(event, Event::Typing(_)))
        .count();
    assert_eq!(typing_toggles, 2);
    assert_eq!(events.last(), Some(&Event::Link("mailto:contact@riskalia.ma".to_string())));
    Ok(())
}

#[tokio::test]
async fn blank_text_is_dropped_without_typing() -> Result<()> {
    let widget = ChatWidget::spawn(assistant(Language::Fr), TypingDelays::none());

    widget.type_text("   ")?;
    widget.submit(WidgetInput::Text(String::new()))?;

    let (presenter, session) = widget.shutdown().await?.into_parts();
    assert!(presenter.events.is_empty());
    assert!(session.log.is_empty());
    Ok(())
}

#[tokio::test]
async fn queued_language_switch_runs_after_pending_navigation() -> Result<()> {
    let widget = ChatWidget::spawn(assistant(Language::Fr), short_delays());

    widget.press("climate")?;
    widget.switch_language(Language::Ar)?;
    widget.press("contact")?;

    let assistant = widget.shutdown().await?;
    assert_eq!(assistant.language(), Language::Ar);
    assert_eq!(assistant.session().current_node, "contact");
    assert_eq!(assistant.session().history, vec![ROOT_NODE.to_string()]);

    let (presenter, _) = assistant.into_parts();
    let clear_at = presenter
        .events
        .iter()
        .position(|event| *event == Event::Clear)
        .expect("switch clears the presenter");
    let climate_at = presenter
        .events
        .iter()
        .position(|event| matches!(event, Event::Message { title: Some(t), .. } if t == "Risques Climatiques"))
        .expect("climate rendered");
    assert!(climate_at < clear_at);
    Ok(())
}
