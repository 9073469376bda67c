pub mod catalog;
pub mod contact;
pub mod error;
pub mod i18n;
pub mod intent;
pub mod models;
pub mod navigation;

pub use catalog::{Catalog, CatalogBuilder, DanglingAction, ResolvedNode, ResolvedResponse};
pub use contact::ContactDirectory;
pub use error::{CatalogError, NavigationError};
pub use i18n::{interpolate, StringTable, Translator};
pub use intent::{classify, classify_for, normalize_text, preview};
pub use models::*;
pub use navigation::NavigationEngine;
