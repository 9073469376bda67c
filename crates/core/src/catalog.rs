use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::{Action, CannedResponse, Category, ControlAction, Language, Node, ROOT_NODE};

const BUILTIN_BUNDLES: [(Language, &str); 3] = [
    (Language::Fr, include_str!("../data/tree/fr.json")),
    (Language::En, include_str!("../data/tree/en.json")),
    (Language::Ar, include_str!("../data/tree/ar.json")),
];

#[derive(Debug, Deserialize)]
struct ContentBundle {
    #[serde(default)]
    nodes: BTreeMap<String, Node>,
    #[serde(default)]
    responses: BTreeMap<String, CannedResponse>,
}

#[derive(Debug, Clone, Copy)]
pub struct ResolvedNode<'a> {
    pub key: &'a str,
    pub node: &'a Node,
    /// Table the node was found in; differs from the request on fallback.
    pub language: Language,
}

#[derive(Debug, Clone, Copy)]
pub struct ResolvedResponse<'a> {
    pub category: Category,
    pub response: &'a CannedResponse,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingAction {
    pub language: Language,
    pub node_key: String,
    pub action_key: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    default_language: Language,
    nodes: BTreeMap<Language, BTreeMap<String, Node>>,
    responses: BTreeMap<Language, HashMap<Category, CannedResponse>>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self {
            default_language: Language::DEFAULT,
            nodes: BTreeMap::new(),
            responses: BTreeMap::new(),
        }
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Language that must carry `root` and `default`, and that every other
    /// language falls back to.
    pub fn default_language(&mut self, language: Language) -> &mut Self {
        self.default_language = language;
        self
    }

    pub fn insert_node(&mut self, language: Language, key: impl Into<String>, node: Node) -> &mut Self {
        self.nodes.entry(language).or_default().insert(key.into(), node);
        self
    }

    /// Registers a canned response, replacing any previous one for the category.
    pub fn insert_response(
        &mut self,
        language: Language,
        category: Category,
        response: CannedResponse,
    ) -> &mut Self {
        self.responses
            .entry(language)
            .or_default()
            .insert(category, response);
        self
    }

    pub fn load_bundle_json(&mut self, language: Language, raw: &str) -> Result<&mut Self, CatalogError> {
        let bundle: ContentBundle = serde_json::from_str(raw)
            .map_err(|source| CatalogError::InvalidBundle { language, source })?;

        for (key, node) in bundle.nodes {
            self.insert_node(language, key, node);
        }

        for (key, response) in bundle.responses {
            let category = Category::parse(&key)
                .ok_or_else(|| CatalogError::UnknownCategory { language, key: key.clone() })?;
            self.insert_response(language, category, response);
        }

        Ok(self)
    }

    pub fn build(self) -> Result<Catalog, CatalogError> {
        let default_language = self.default_language;

        let has_root = self
            .nodes
            .get(&default_language)
            .is_some_and(|nodes| nodes.contains_key(ROOT_NODE));
        if !has_root {
            return Err(CatalogError::MissingRoot(default_language));
        }

        let fallback_response = self
            .responses
            .get(&default_language)
            .and_then(|table| table.get(&Category::Default))
            .cloned()
            .ok_or(CatalogError::MissingDefaultResponse(default_language))?;

        Ok(Catalog {
            default_language,
            nodes: self.nodes,
            responses: self.responses,
            fallback_response,
        })
    }
}

/// Static multilingual content: the navigation tree and the canned
/// free-text response table. Immutable once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    default_language: Language,
    nodes: BTreeMap<Language, BTreeMap<String, Node>>,
    responses: BTreeMap<Language, HashMap<Category, CannedResponse>>,
    fallback_response: CannedResponse,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// The Riskalia content compiled into the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::new();
        for (language, raw) in BUILTIN_BUNDLES {
            builder.load_bundle_json(language, raw)?;
        }
        builder.build()
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn languages(&self) -> Vec<Language> {
        self.nodes.keys().copied().collect()
    }

    pub fn node_keys(&self, language: Language) -> Vec<&str> {
        self.nodes
            .get(&language)
            .map(|nodes| nodes.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Requested language first, then the default language once.
    pub fn lookup(&self, language: Language, key: &str) -> Option<ResolvedNode<'_>> {
        self.exact(language, key).or_else(|| {
            if language == self.default_language {
                None
            } else {
                self.exact(self.default_language, key)
            }
        })
    }

    pub fn contains(&self, language: Language, key: &str) -> bool {
        self.lookup(language, key).is_some()
    }

    /// Category in the requested language, then the default language, then
    /// the `default` category through the same two steps.
    pub fn response(&self, language: Language, category: Category) -> ResolvedResponse<'_> {
        let attempts = [
            (language, category),
            (self.default_language, category),
            (language, Category::Default),
            (self.default_language, Category::Default),
        ];

        for (lang, cat) in attempts {
            if let Some(response) = self.responses.get(&lang).and_then(|table| table.get(&cat)) {
                return ResolvedResponse {
                    category: cat,
                    response,
                    language: lang,
                };
            }
        }

        ResolvedResponse {
            category: Category::Default,
            response: &self.fallback_response,
            language: self.default_language,
        }
    }

    /// Actions in `language` that point at nothing: not a reserved control
    /// and not resolvable through the fallback chain.
    pub fn audit(&self, language: Language) -> Vec<DanglingAction> {
        let Some(nodes) = self.nodes.get(&language) else {
            return Vec::new();
        };

        nodes
            .iter()
            .flat_map(|(node_key, node)| {
                node.actions
                    .iter()
                    .filter(|action| self.is_dangling(language, action))
                    .map(move |action| DanglingAction {
                        language,
                        node_key: node_key.clone(),
                        action_key: action.key.clone(),
                        label: action.label.clone(),
                    })
            })
            .collect()
    }

    fn is_dangling(&self, language: Language, action: &Action) -> bool {
        ControlAction::parse(&action.key).is_none() && !self.contains(language, &action.key)
    }

    fn exact(&self, language: Language, key: &str) -> Option<ResolvedNode<'_>> {
        self.nodes
            .get(&language)
            .and_then(|nodes| nodes.get_key_value(key))
            .map(|(key, node)| ResolvedNode {
                key: key.as_str(),
                node,
                language,
            })
    }
}
