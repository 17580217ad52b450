//! Resolution error taxonomy
//!
//! Every fatal resolution failure is one of these variants so that callers
//! branch on kind rather than on message text. Messages still carry the
//! module name, channel, and candidate list needed to diagnose the catalog.

use thiserror::Error;

/// Errors that abort a resolution pass
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No template in the catalog matched the module in the desired channel.
    /// Distinguishable from the other variants so the caller can treat
    /// "catalog not yet populated" differently from a misconfiguration.
    #[error("no template found for module '{module}' in channel '{channel}'")]
    NoCandidate { module: String, channel: String },

    /// More than one template matched; never auto-resolved by preference
    /// order, the operator has to remove the duplicate
    #[error(
        "more than one template found for module '{module}' in channel '{channel}', \
         candidates: {candidates:?}"
    )]
    AmbiguousCandidates {
        module: String,
        channel: String,
        candidates: Vec<String>,
    },

    /// A matched template carries no channel; templates without a channel
    /// are not allowed
    #[error("no channel found on template '{template}' for module '{module}'")]
    NoDefaultChannelAllowed { module: String, template: String },

    /// A module declares a remote template reference while sync is disabled
    /// or no remote catalog is available
    #[error("enable sync to use a remote template reference for module '{module}'")]
    InvalidRemoteModuleConfiguration { module: String },

    /// A catalog entry's descriptor could not be parsed while establishing
    /// identity; the entry cannot be trusted, so the whole pass fails
    #[error("invalid descriptor on template '{template}'")]
    DescriptorParse {
        template: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Listing the catalog failed (network, permission, cancellation)
    #[error("failed to list templates from the {catalog} catalog")]
    CatalogRead {
        catalog: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
