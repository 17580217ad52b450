//! Catalog access
//!
//! The engine never constructs cluster clients itself; the caller injects a
//! [`CatalogReader`] per catalog. Two instances exist at runtime, a local
//! one and, when cross-cluster sync is enabled, a remote one.

use crate::types::ModuleTemplate;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Read-only access to the templates visible through one cluster context
///
/// `list` returns a point-in-time snapshot with no ordering guarantee.
/// Cancellation works the usual async way: dropping the future in flight
/// makes the surrounding resolution pass abort without a partial result.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// List every template visible through this reader
    async fn list(&self) -> Result<Vec<ModuleTemplate>>;
}

/// In-memory catalog over a fixed snapshot
///
/// Useful for tests and for callers that already hold a listed snapshot and
/// want to resolve against it without another round trip.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    templates: Vec<ModuleTemplate>,
}

impl StaticCatalog {
    pub fn new(templates: Vec<ModuleTemplate>) -> Self {
        Self { templates }
    }

    /// Load a snapshot from a YAML document holding a template sequence
    pub fn from_yaml(content: &str) -> Result<Self> {
        let templates: Vec<ModuleTemplate> =
            serde_yaml_ng::from_str(content).context("Failed to parse catalog snapshot YAML")?;
        Ok(Self { templates })
    }

    /// Number of templates in the snapshot
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[async_trait]
impl CatalogReader for StaticCatalog {
    async fn list(&self) -> Result<Vec<ModuleTemplate>> {
        Ok(self.templates.clone())
    }
}
