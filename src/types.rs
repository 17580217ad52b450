//! Core data model for template resolution
//!
//! These types mirror the surfaces the engine consumes from the caller
//! (desired-state object, prior status records) and the catalog (templates),
//! plus the result wrapper it returns.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Well-known label carrying a template's module name
pub const MODULE_NAME_LABEL: &str = "templar.dev/module-name";

/// A module declared by the desired-state object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleReference {
    /// Module name, also the key of its entry in the result mapping
    pub name: String,

    /// Explicit channel override for this module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    /// Name of the template to look up in the remote catalog instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_template_ref: Option<String>,
}

impl ModuleReference {
    /// Create a reference with no channel override and no remote redirection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channel: None,
            remote_template_ref: None,
        }
    }

    /// Explicit channel override, treating an empty string as unset
    pub fn explicit_channel(&self) -> Option<&str> {
        self.channel.as_deref().filter(|c| !c.is_empty())
    }

    /// Remote template reference, treating an empty string as unset
    pub fn remote_ref(&self) -> Option<&str> {
        self.remote_template_ref.as_deref().filter(|r| !r.is_empty())
    }
}

/// A versioned, channel-tagged template describing how to deploy one module
///
/// Templates are immutable once created; a version bump or channel
/// reassignment rewrites the stored spec of the *same* object and bumps its
/// generation, it never creates a new identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTemplate {
    /// Object identity name
    pub name: String,

    /// Object labels; may carry [`MODULE_NAME_LABEL`]
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Revision counter of the stored spec, set by the catalog's storage
    /// layer; strictly increases on every spec rewrite
    pub generation: i64,

    /// Release channel the template is published under
    pub channel: String,

    /// Raw descriptor document, parsed on demand via
    /// [`ModuleTemplate::descriptor`]
    pub descriptor: String,
}

impl ModuleTemplate {
    /// Parse the embedded descriptor
    pub fn descriptor(&self) -> Result<Descriptor, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(&self.descriptor)
    }
}

/// Metadata embedded in a template: component name and semantic version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    /// Declared component name, one of the three identity strategies
    pub name: String,

    /// Semantic version string
    pub version: String,
}

/// A matched template plus its drift flag
///
/// `outdated` starts out false and is only ever set by the drift detector;
/// it is recomputed from scratch on every resolution pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTemplate {
    pub template: ModuleTemplate,
    pub outdated: bool,
}

impl ResolvedTemplate {
    pub fn new(template: ModuleTemplate) -> Self {
        Self {
            template,
            outdated: false,
        }
    }
}

/// Resolution result, one entry per declared module, keyed by module name
pub type ResolvedModules = HashMap<String, ResolvedTemplate>;

/// Last-recorded resolution for a module, supplied by the caller from
/// persisted state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleStatus {
    /// Recorded module identifier, matched against result mapping keys
    pub fqdn: String,

    /// Channel the module was last resolved in
    pub channel: String,

    /// Version the module was last resolved at
    pub version: String,

    /// Generation of the template that was last applied
    pub template_generation: i64,
}

/// The desired-state object surface this engine consumes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSet {
    /// Default channel for modules without an explicit override
    #[serde(default)]
    pub default_channel: String,

    /// Declared modules, resolved in declaration order
    #[serde(default)]
    pub modules: Vec<ModuleReference>,

    /// Whether cross-cluster sync is enabled; required for remote
    /// template references
    #[serde(default)]
    pub sync_enabled: bool,
}
