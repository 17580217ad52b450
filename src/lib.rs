//! templar — module template resolution and drift detection
//!
//! The resolution core of a multi-cluster lifecycle manager. Given a
//! desired-state [`ModuleSet`], a catalog of channel-tagged, versioned
//! templates, and the last-recorded per-module status, [`resolve`] picks
//! exactly one template per declared module (or fails on ambiguity) and
//! flags each result as outdated when the catalog has drifted from the
//! record, while guarding against silent downgrades.
//!
//! The engine is read-only against the catalog and performs no cluster
//! mutation; catalog access is injected through the [`CatalogReader`]
//! trait.

pub mod catalog;
pub mod channel;
pub mod drift;
pub mod error;
pub mod matcher;
pub mod resolver;
pub mod types;

pub use catalog::{CatalogReader, StaticCatalog};
pub use channel::DEFAULT_CHANNEL;
pub use error::ResolveError;
pub use resolver::resolve;
pub use types::{
    Descriptor, ModuleReference, ModuleSet, ModuleStatus, ModuleTemplate, ResolvedModules,
    ResolvedTemplate, MODULE_NAME_LABEL,
};
