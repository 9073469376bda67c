use thiserror::Error;

use crate::models::Language;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid {language} content bundle: {source}")]
    InvalidBundle {
        language: Language,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {language} string table: {source}")]
    InvalidStrings {
        language: Language,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown response category `{key}` in {language} bundle")]
    UnknownCategory { language: Language, key: String },

    #[error("default language {0} has no `root` node")]
    MissingRoot(Language),

    #[error("default language {0} has no `default` response")]
    MissingDefaultResponse(Language),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("node `{key}` not found for {language} or the default language")]
    UnresolvedNode { key: String, language: Language },
}
