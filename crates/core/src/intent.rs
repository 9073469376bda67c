use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Category, Language};

pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Grapheme-safe truncation for log fields.
pub fn preview(input: &str, max_graphemes: usize) -> String {
    let mut graphemes = input.graphemes(true);
    let head = graphemes.by_ref().take(max_graphemes).collect::<String>();
    if graphemes.next().is_some() {
        head + "…"
    } else {
        head
    }
}

/// Keyword classification of free text.
///
/// Matching is plain substring search over the lower-cased input, so
/// `assurances` and `assurance-vie` both hit `assurance`, and so does
/// `réassurance` because insurance is checked first. Every language's
/// keyword list is consulted whatever the interface language is.
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();

    Category::PRIORITY
        .into_iter()
        .find(|category| {
            Language::ALL
                .into_iter()
                .any(|language| contains_any(&lower, keywords(*category, language)))
        })
        .unwrap_or(Category::Default)
}

/// Same as [`classify`]; the active language does not narrow the search.
pub fn classify_for(text: &str, _language: Language) -> Category {
    classify(text)
}

pub fn keywords(category: Category, language: Language) -> &'static [&'static str] {
    match (category, language) {
        (Category::Insurance, Language::Fr) => INSURANCE_FR,
        (Category::Insurance, Language::En) => INSURANCE_EN,
        (Category::Insurance, Language::Ar) => INSURANCE_AR,
        (Category::Reinsurance, Language::Fr) => REINSURANCE_FR,
        (Category::Reinsurance, Language::En) => REINSURANCE_EN,
        (Category::Reinsurance, Language::Ar) => REINSURANCE_AR,
        (Category::Climate, Language::Fr) => CLIMATE_FR,
        (Category::Climate, Language::En) => CLIMATE_EN,
        (Category::Climate, Language::Ar) => CLIMATE_AR,
        (Category::Contact, Language::Fr) => CONTACT_FR,
        (Category::Contact, Language::En) => CONTACT_EN,
        (Category::Contact, Language::Ar) => CONTACT_AR,
        (Category::Quote, Language::Fr) => QUOTE_FR,
        (Category::Quote, Language::En) => QUOTE_EN,
        (Category::Quote, Language::Ar) => QUOTE_AR,
        (Category::Default, _) => &[],
    }
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

const INSURANCE_FR: &[&str] = &[
    "assurance", "assurances", "couverture", "couvertures", "protection", "protections",
    "garantie", "garanties", "sécurité", "sécurisation", "multirisques", "multirisque",
    "transport", "flotte", "automobile", "voiture", "véhicule", "véhicules", "responsabilité",
    "civile", "rc", "construction", "bâtiment", "bâtiments", "santé", "santé collective",
    "prévoyance", "habitation", "logement", "maison", "vie", "assurance-vie", "épargne",
    "placement", "placements", "schengen", "voyage", "voyages", "retraite", "pension",
    "accidents", "accident", "dommages", "dommage", "incendie", "vol", "vols", "dégâts",
    "dégât", "bris", "bris de glace", "tiers", "tous risques",
];

const INSURANCE_EN: &[&str] = &[
    "comprehensive", "insurance", "coverage", "coverages", "protection", "protections",
    "guarantee", "guarantees", "security", "multi-risk", "multirisk", "liability", "civil",
    "health", "life", "home", "house", "property", "vehicle", "vehicles", "fleet", "auto",
    "car", "cars", "building", "travel", "retirement", "pension", "damage", "damages", "fire",
    "theft", "third party", "all risks",
];

const INSURANCE_AR: &[&str] = &[
    "تأمين", "تأمينات", "تغطية", "تغطيات", "حماية", "حمايات", "ضمان", "ضمانات", "أمان",
    "أمانات", "متعدد المخاطر", "نقل", "أسطول", "سيارات", "مركبات", "مسؤولية", "مدنية", "بناء",
    "صحة", "حياة", "سكن", "منزل", "سفر", "تقاعد", "معاش", "حوادث", "أضرار", "حريق", "سرقة",
    "شامل",
];

const REINSURANCE_FR: &[&str] = &[
    "réassurance", "réassureur", "réassureurs", "traité", "traités", "facultative",
    "facultatives", "surplus", "quotas", "quota", "stop-loss", "stop loss", "xol", "excess",
    "sinistre", "sinistres", "arbitrage", "arbitrages", "placement", "placements", "marché",
    "marchés", "capacité", "capacités", "rétention", "rétentions",
];

const REINSURANCE_EN: &[&str] = &[
    "reinsurance", "reinsurer", "reinsurers", "treaty", "treaties", "facultative", "surplus",
    "quota", "excess", "loss", "claims", "arbitration", "placement", "market", "markets",
    "capacity", "retention", "retentions", "cedant", "cedants", "retrocession",
];

const REINSURANCE_AR: &[&str] = &[
    "إعادة التأمين", "معاهدة", "معاهدات", "اختيارية", "فائض", "نسبة", "نسب", "فائض الخسارة",
    "مطالبات", "تحكيم", "تنسيب", "سوق", "أسواق", "قدرة", "قدرات", "احتفاظ",
];

const CLIMATE_FR: &[&str] = &[
    "climat", "climatique", "climatiques", "environnement", "environnemental",
    "environnementaux", "carbone", "émissions", "émission", "durable", "durabilité",
    "transition", "énergétique", "énergie", "renouvelable", "renouvelables", "écologique",
    "écologiques", "green", "greens", "ngfs", "tcfd", "issb", "paramétrique", "paramétriques",
    "météo", "météorologique", "résilience", "adaptation", "mitigation", "atténuation",
    "scénario", "scénarios", "stress", "test", "tests", "cartographie", "modélisation",
];

const CLIMATE_EN: &[&str] = &[
    "climate", "climatic", "environment", "environmental", "carbon", "emissions", "emission",
    "sustainable", "sustainability", "transition", "energy", "renewable", "ecological", "green",
    "ngfs", "tcfd", "issb", "parametric", "weather", "meteorological", "resilience",
    "adaptation", "mitigation", "scenario", "scenarios", "stress", "test", "tests", "mapping",
    "modeling", "modelling",
];

const CLIMATE_AR: &[&str] = &[
    "مناخ", "مناخي", "مناخية", "بيئة", "بيئي", "بيئية", "كربون", "انبعاثات", "انبعاث", "مستدام",
    "استدامة", "انتقال", "طاقة", "متجددة", "أخضر", "معياري", "طقس", "مرونة", "تكيف", "تخفيف",
    "سيناريو", "سيناريوهات", "اختبار", "اختبارات", "خرائط", "نمذجة",
];

const CONTACT_FR: &[&str] = &[
    "contact", "contacter", "téléphone", "tél", "tel", "appeler", "appel", "appels", "email",
    "mail", "courriel", "écrire", "écrit", "message", "messages", "rendez-vous", "rendez vous",
    "meeting", "rencontre", "rencontres", "adresse", "adresses", "localisation", "localiser",
    "siège", "bureau", "bureaux", "équipe", "équipes", "conseiller", "conseillers", "expert",
    "experts", "spécialiste", "spécialistes", "support", "aide", "aider", "assistance",
    "assister",
];

const CONTACT_EN: &[&str] = &[
    "contact", "contacts", "phone", "telephone", "call", "calls", "calling", "email", "mail",
    "message", "messages", "meeting", "meetings", "appointment", "appointments", "address",
    "addresses", "location", "locations", "office", "offices", "team", "teams", "advisor",
    "advisors", "expert", "experts", "specialist", "specialists", "support", "help",
    "assistance", "assist",
];

const CONTACT_AR: &[&str] = &[
    "اتصال", "اتصالات", "هاتف", "تلفون", "مكالمة", "مكالمات", "بريد", "إلكتروني", "رسالة",
    "رسائل", "موعد", "مواعيد", "لقاء", "لقاءات", "عنوان", "عناوين", "موقع", "مواقع", "مكتب",
    "مكاتب", "فريق", "فرق", "مستشار", "مستشارون", "خبير", "خبراء", "متخصص", "متخصصون", "دعم",
    "مساعدة",
];

const QUOTE_FR: &[&str] = &[
    "devis", "prix", "tarif", "tarifs", "coût", "coûts", "budget", "budgets", "estimation",
    "estimations", "évaluation", "évaluations", "calcul", "calculs", "simulation",
    "simulations", "proposition", "propositions", "offre", "offres", "commercial",
    "commerciaux", "commerciale", "commerciales", "demande", "demandes", "demander",
    "solliciter", "sollicitation", "obtenir", "recevoir", "récupérer", "télécharger",
    "téléchargement",
];

const QUOTE_EN: &[&str] = &[
    "quote", "quotes", "quotation", "quotations", "price", "prices", "pricing", "cost", "costs",
    "budget", "budgets", "estimate", "estimates", "estimation", "estimations", "evaluation",
    "evaluations", "calculation", "calculations", "simulation", "simulations", "proposal",
    "proposals", "offer", "offers", "commercial", "request", "requests", "ask", "asking",
    "obtain", "receive", "get", "download", "downloading",
];

const QUOTE_AR: &[&str] = &[
    "عرض", "عروض", "سعر", "أسعار", "تسعير", "تكلفة", "تكاليف", "ميزانية", "ميزانيات", "تقدير",
    "تقديرات", "تقييم", "تقييمات", "حساب", "حسابات", "محاكاة", "اقتراح", "اقتراحات", "تجاري",
    "طلب", "طلبات", "سؤال", "أسئلة", "الحصول", "استلام", "تحميل", "تحميلات",
];
