mod common;

use riskalia_agents::Assistant;
use riskalia_core::{
    classify, ActionOutcome, Category, ControlEffect, Language, NavigationError, Sender, ROOT_NODE,
};
use riskalia_observability::AppMetrics;

use common::{assistant, engine, Event, RecordingPresenter};

#[test]
fn back_from_product_returns_to_business_insurance() {
    let mut assistant = assistant(Language::Fr);
    assistant.start();

    for key in ["assurance", "assurance_entreprise", "multirisques"] {
        assistant.handle_action(key).expect("node resolves");
    }
    let outcome = assistant.handle_action("back").expect("back resolves");

    let ActionOutcome::Navigated(presentation) = outcome else {
        panic!("back must navigate");
    };
    assert_eq!(presentation.node_key, "assurance_entreprise");
    assert_eq!(assistant.session().current_node, "assurance_entreprise");
    assert_eq!(
        assistant.session().history,
        vec![ROOT_NODE.to_string(), "assurance".to_string()]
    );
    assert_eq!(
        assistant.presenter().titles(),
        vec![
            "Nos Solutions d'Assurance",
            "Assurance Entreprise",
            "Multirisques Entreprise",
            "Assurance Entreprise",
        ]
    );
}

#[test]
fn legacy_back_keys_behave_like_back() {
    for key in ["retour_universel", "retour_assurance", "رجوع", "عودة"] {
        let mut assistant = assistant(Language::Ar);
        assistant.handle_action("assurance").expect("node resolves");
        assistant.handle_action(key).expect("back resolves");

        assert_eq!(assistant.session().current_node, ROOT_NODE, "key {key}");
        assert!(assistant.session().history.is_empty(), "key {key}");
    }
}

#[test]
fn unknown_key_is_declined_without_side_effects() {
    let mut assistant = assistant(Language::Fr);
    assistant.handle_action("climate").expect("node resolves");
    let before = assistant.presenter().events.len();

    let err = assistant
        .handle_action("nonexistent_key")
        .expect_err("unknown key");

    assert_eq!(
        err,
        NavigationError::UnresolvedNode {
            key: "nonexistent_key".to_string(),
            language: Language::Fr,
        }
    );
    assert_eq!(assistant.session().current_node, "climate");
    assert_eq!(assistant.session().history, vec![ROOT_NODE.to_string()]);
    assert_eq!(assistant.presenter().events.len(), before);
}

#[test]
fn contact_controls_open_platform_links() {
    let mut assistant = assistant(Language::En);
    assistant.handle_action("contact").expect("node resolves");

    for key in ["call", "email", "appointment", "location"] {
        let outcome = assistant.handle_action(key).expect("control handled");
        assert!(matches!(outcome, ActionOutcome::Control(_)), "key {key}");
    }

    let links: Vec<_> = assistant
        .presenter()
        .events
        .iter()
        .filter_map(|event| match event {
            Event::Link(uri) => Some(uri.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        links,
        vec![
            "tel:+212-666-756991",
            "mailto:contact@riskalia.ma",
            "https://maps.google.com/?q=16+Rue+de+Terves+Casablanca",
        ]
    );
    assert_eq!(assistant.session().current_node, "contact");
    assert_eq!(assistant.session().history, vec![ROOT_NODE.to_string()]);
}

#[test]
fn call_effect_carries_the_phone_number() {
    let mut assistant = assistant(Language::Fr);
    let outcome = assistant.handle_action("appel_telephone").expect("legacy call");

    let ActionOutcome::Control(notice) = outcome else {
        panic!("call must not navigate");
    };
    assert_eq!(
        notice.effect,
        ControlEffect::Call {
            phone: "+212-666-756991".to_string()
        }
    );
    assert_eq!(assistant.session().current_node, ROOT_NODE);
}

#[test]
fn keyword_classification_follows_priority() {
    assert_eq!(classify("assurance"), Category::Insurance);
    assert_eq!(classify("Bonjour, je veux un devis"), Category::Quote);
    assert_eq!(classify("hello there"), Category::Default);
}

#[test]
fn free_text_answers_in_session_language() {
    let mut assistant = assistant(Language::Ar);
    assistant.handle_action("esg").expect("node resolves");

    let reply = assistant
        .handle_free_text("I need a quote")
        .expect("non-blank text answers");

    assert_eq!(reply.category, Category::Quote);
    assert_eq!(reply.title, "طلب عرض سعر");
    assert_eq!(reply.source_language, Language::Ar);
    assert_eq!(assistant.session().current_node, "esg");

    let log = &assistant.session().log;
    let tail: Vec<_> = log.iter().rev().take(2).map(|m| m.sender).collect();
    assert_eq!(tail, vec![Sender::Bot, Sender::User]);
}

#[test]
fn language_switch_restarts_the_conversation() {
    let mut assistant = assistant(Language::Fr);
    assistant.handle_action("reassurance").expect("node resolves");
    assistant.handle_free_text("un devis svp");

    let presentation = assistant
        .switch_language(Language::En)
        .expect("root resolves");

    assert_eq!(presentation.title, "How can I help you?");
    assert_eq!(assistant.session().current_node, ROOT_NODE);
    assert!(assistant.session().history.is_empty());
    assert!(assistant.session().log.is_empty());
    assert!(assistant.presenter().events.contains(&Event::Clear));
    assert_eq!(
        assistant.presenter().last_actions(),
        vec!["assurance", "reassurance", "climate", "services", "esg", "contact"]
    );
}

#[test]
fn arabic_falls_back_to_french_quote_nodes() {
    let metrics = AppMetrics::shared();
    let mut assistant = Assistant::new(
        engine(),
        RecordingPresenter::default(),
        Language::Ar,
        metrics.clone(),
    );

    let outcome = assistant
        .handle_action("devis_entreprise")
        .expect("french fallback");
    let ActionOutcome::Navigated(presentation) = outcome else {
        panic!("quote node must navigate");
    };

    assert_eq!(presentation.source_language, Language::Fr);
    assert_eq!(presentation.title, "Devis Entreprise");
    assert_eq!(metrics.snapshot().language_fallback_total, 1);
}

#[test]
fn english_claims_key_is_a_dead_end() {
    let metrics = AppMetrics::shared();
    let mut assistant = Assistant::new(
        engine(),
        RecordingPresenter::default(),
        Language::En,
        metrics.clone(),
    );
    assistant.handle_action("reassurance").expect("node resolves");

    assert!(assistant.handle_action("sinistres").is_err());
    assert_eq!(assistant.session().current_node, "reassurance");
    assert_eq!(metrics.snapshot().unresolved_total, 1);
}

#[test]
fn audit_lists_dead_keys_only_where_they_exist() {
    let engine = engine();
    let catalog = engine.catalog();

    let english = catalog.audit(Language::En);
    for key in ["assurance_comparaison", "assurance_devis", "expertise_re", "expert_climat"] {
        assert!(
            english.iter().any(|entry| entry.action_key == key),
            "expected {key} to be reported"
        );
    }
    assert!(catalog.audit(Language::Ar).is_empty());
}

#[test]
fn metrics_count_controls_and_default_answers() {
    let metrics = AppMetrics::shared();
    let mut assistant = Assistant::new(
        engine(),
        RecordingPresenter::default(),
        Language::Fr,
        metrics.clone(),
    );

    assistant.handle_action("localisation").expect("control");
    assistant.handle_free_text("bonjour");

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.actions_total, 1);
    assert_eq!(snapshot.control_effects_total, 1);
    assert_eq!(snapshot.free_text_total, 1);
    assert_eq!(snapshot.default_category_total, 1);
}
