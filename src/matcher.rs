//! Template matching and disambiguation
//!
//! A template matches a module in a desired channel when its channel equals
//! the desired one and any of three identity strategies holds: the
//! well-known module-name label, the template's own name, or the component
//! name declared in its descriptor. Zero matches and two-or-more matches
//! are both hard failures; silently picking "the first" of several
//! candidates would deploy an arbitrary, unreviewed version.

use crate::catalog::CatalogReader;
use crate::channel::desired_channel;
use crate::error::ResolveError;
use crate::types::{ModuleReference, ModuleTemplate, ResolvedTemplate, MODULE_NAME_LABEL};

/// Find the unique template matching `identifier` in `desired_channel`
///
/// A template matching more than one identity strategy is still counted
/// once. Descriptors are only parsed for entries already in the desired
/// channel that the cheaper strategies did not accept; a parse failure
/// there makes the entry unusable for identification and fails the match.
pub fn find_template<'a>(
    entries: &'a [ModuleTemplate],
    identifier: &str,
    desired_channel: &str,
) -> Result<&'a ModuleTemplate, ResolveError> {
    let mut candidates: Vec<&ModuleTemplate> = Vec::new();

    for template in entries {
        if template.channel != desired_channel {
            continue;
        }

        let label_matches = template
            .labels
            .get(MODULE_NAME_LABEL)
            .is_some_and(|name| name == identifier);
        if label_matches || template.name == identifier {
            candidates.push(template);
            continue;
        }

        let descriptor = template
            .descriptor()
            .map_err(|source| ResolveError::DescriptorParse {
                template: template.name.clone(),
                source,
            })?;
        if descriptor.name == identifier {
            candidates.push(template);
        }
    }

    match candidates.as_slice() {
        [] => Err(ResolveError::NoCandidate {
            module: identifier.to_string(),
            channel: desired_channel.to_string(),
        }),
        [template] => Ok(*template),
        _ => Err(ResolveError::AmbiguousCandidates {
            module: identifier.to_string(),
            channel: desired_channel.to_string(),
            candidates: candidates.iter().map(|t| t.name.clone()).collect(),
        }),
    }
}

/// Resolve one module against one catalog
///
/// Selects the desired channel, lists the catalog, matches, and rejects a
/// matched template without a channel. `identifier` is the name looked up
/// in the catalog; it differs from `module.name` only for remote
/// redirection.
pub async fn lookup(
    reader: &dyn CatalogReader,
    catalog: &'static str,
    module: &ModuleReference,
    identifier: &str,
    default_channel: &str,
) -> Result<ResolvedTemplate, ResolveError> {
    let channel = desired_channel(module, default_channel);

    let entries = reader
        .list()
        .await
        .map_err(|source| ResolveError::CatalogRead { catalog, source })?;

    let template = find_template(&entries, identifier, &channel)?;

    if template.channel.is_empty() {
        return Err(ResolveError::NoDefaultChannelAllowed {
            module: module.name.clone(),
            template: template.name.clone(),
        });
    }

    if template.channel != default_channel {
        tracing::info!(
            module = %module.name,
            channel = %template.channel,
            default_channel = %default_channel,
            "using channel override for module"
        );
    } else {
        tracing::debug!(
            module = %module.name,
            channel = %template.channel,
            "using channel for module"
        );
    }

    Ok(ResolvedTemplate::new(template.clone()))
}
