//! Module-set resolution
//!
//! Walks the modules declared by the desired-state object in declaration
//! order, resolves each against the local catalog or, for remote template
//! references with sync enabled, against the remote catalog, and hands the
//! assembled mapping to the drift detector. Any per-module failure aborts
//! the whole pass; a reconciler must not deploy some modules while silently
//! skipping others.

use crate::catalog::CatalogReader;
use crate::drift;
use crate::error::ResolveError;
use crate::matcher;
use crate::types::{ModuleSet, ModuleStatus, ResolvedModules};

/// Resolve every declared module and flag drift against prior status
///
/// `remote` is only consulted for modules carrying a remote template
/// reference, and only when `module_set.sync_enabled` is set. A remote
/// reference with sync disabled, or with no remote catalog supplied, is a
/// configuration error naming the offending module.
///
/// The returned mapping is keyed by each module's local name even when the
/// lookup went through a remote reference; the substitution is scoped to
/// that one lookup.
pub async fn resolve(
    module_set: &ModuleSet,
    local: &dyn CatalogReader,
    remote: Option<&dyn CatalogReader>,
    prior_statuses: &[ModuleStatus],
) -> Result<ResolvedModules, ResolveError> {
    let mut resolved = ResolvedModules::new();

    for module in &module_set.modules {
        let entry = match module.remote_ref() {
            None => {
                matcher::lookup(
                    local,
                    "local",
                    module,
                    &module.name,
                    &module_set.default_channel,
                )
                .await?
            }
            Some(remote_ref) if module_set.sync_enabled => {
                let reader = remote.ok_or_else(|| {
                    ResolveError::InvalidRemoteModuleConfiguration {
                        module: module.name.clone(),
                    }
                })?;
                matcher::lookup(
                    reader,
                    "remote",
                    module,
                    remote_ref,
                    &module_set.default_channel,
                )
                .await?
            }
            Some(_) => {
                return Err(ResolveError::InvalidRemoteModuleConfiguration {
                    module: module.name.clone(),
                })
            }
        };

        resolved.insert(module.name.clone(), entry);
    }

    drift::flag_outdated(&mut resolved, prior_statuses);

    Ok(resolved)
}
