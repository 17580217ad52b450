//! Drift detection with downgrade protection
//!
//! After a successful resolution pass, every resolved template is compared
//! against the caller's last-recorded status for that module. A generation
//! skew always marks the template outdated; a channel skew with an
//! unchanged generation only does so when it would not downgrade the
//! installed version. The flag is recomputed from scratch each pass, it is
//! never carried over.

use crate::types::{ModuleStatus, ResolvedModules, ResolvedTemplate};
use semver::Version;

/// Flag outdated templates in place
///
/// Only modules present in both the mapping and the prior statuses are
/// examined; first-time resolutions stay fresh.
pub fn flag_outdated(resolved: &mut ResolvedModules, prior_statuses: &[ModuleStatus]) {
    for (module_name, entry) in resolved.iter_mut() {
        if let Some(status) = prior_statuses.iter().find(|s| &s.fqdn == module_name) {
            check_template(entry, status);
        }
    }
}

/// Decide the outdated flag for one module
///
/// 1. A generation skew can only come from a version bump or a channel
///    reassignment of the stored spec; the caller's record no longer
///    matches truth, so the template is outdated unconditionally.
/// 2. A channel skew with an unchanged generation means the module was
///    retargeted. If the previously installed version is higher than what
///    the new channel offers, the skew is ignored: downgrades are not
///    applied automatically, the operator has to uninstall and reinstall
///    to cross that boundary.
fn check_template(entry: &mut ResolvedTemplate, status: &ModuleStatus) {
    if entry.template.generation != status.template_generation {
        tracing::info!(
            module = %status.fqdn,
            template = %entry.template.name,
            previous_generation = status.template_generation,
            new_generation = entry.template.generation,
            "outdated template: generation skew"
        );
        entry.outdated = true;
        return;
    }

    if entry.template.channel == status.channel {
        return;
    }

    tracing::info!(
        module = %status.fqdn,
        template = %entry.template.name,
        previous_channel = %status.channel,
        new_channel = %entry.template.channel,
        "channel skew detected"
    );

    // A parse failure here only blocks the staleness flag, not the pass
    let descriptor = match entry.template.descriptor() {
        Ok(descriptor) => descriptor,
        Err(err) => {
            tracing::error!(
                module = %status.fqdn,
                template = %entry.template.name,
                error = %err,
                "cannot evaluate channel skew: invalid template descriptor"
            );
            return;
        }
    };

    let version_in_template = match Version::parse(&descriptor.version) {
        Ok(version) => version,
        Err(err) => {
            tracing::error!(
                module = %status.fqdn,
                template = %entry.template.name,
                version = %descriptor.version,
                error = %err,
                "cannot evaluate channel skew: invalid version in template descriptor"
            );
            return;
        }
    };

    let version_in_status = match Version::parse(&status.version) {
        Ok(version) => version,
        Err(err) => {
            tracing::error!(
                module = %status.fqdn,
                version = %status.version,
                error = %err,
                "cannot evaluate channel skew: invalid version in module status"
            );
            return;
        }
    };

    if version_in_status > version_in_template {
        tracing::info!(
            module = %status.fqdn,
            previous_version = %version_in_status,
            new_version = %version_in_template,
            "ignoring channel skew: a higher version was previously installed, \
             downgrades are not applied automatically"
        );
        return;
    }

    entry.outdated = true;
}

#[cfg(test)]
mod drift_tests {
    use super::*;
    use crate::types::ModuleTemplate;
    use std::collections::BTreeMap;

    fn resolved(channel: &str, generation: i64, version: &str) -> ResolvedTemplate {
        ResolvedTemplate::new(ModuleTemplate {
            name: "keda-template".to_string(),
            labels: BTreeMap::new(),
            generation,
            channel: channel.to_string(),
            descriptor: format!("name: keda\nversion: {version}\n"),
        })
    }

    fn status(channel: &str, generation: i64, version: &str) -> ModuleStatus {
        ModuleStatus {
            fqdn: "keda".to_string(),
            channel: channel.to_string(),
            version: version.to_string(),
            template_generation: generation,
        }
    }

    fn run(entry: ResolvedTemplate, status: ModuleStatus) -> bool {
        let mut resolved = ResolvedModules::new();
        resolved.insert("keda".to_string(), entry);
        flag_outdated(&mut resolved, &[status]);
        resolved["keda"].outdated
    }

    #[test]
    fn test_generation_skew_is_outdated() {
        assert!(run(
            resolved("regular", 4, "1.0.0"),
            status("regular", 3, "1.0.0"),
        ));
    }

    #[test]
    fn test_no_skew_stays_fresh() {
        assert!(!run(
            resolved("regular", 3, "1.0.0"),
            status("regular", 3, "1.0.0"),
        ));
    }

    #[test]
    fn test_channel_skew_upgrade_is_outdated() {
        assert!(run(
            resolved("fast", 3, "2.0.0"),
            status("regular", 3, "1.0.0"),
        ));
    }

    #[test]
    fn test_channel_skew_same_version_is_outdated() {
        assert!(run(
            resolved("fast", 3, "1.0.0"),
            status("regular", 3, "1.0.0"),
        ));
    }

    #[test]
    fn test_channel_skew_downgrade_suppressed() {
        assert!(!run(
            resolved("regular", 3, "1.0.0"),
            status("fast", 3, "2.0.0"),
        ));
    }

    #[test]
    fn test_unparseable_template_version_stays_fresh() {
        assert!(!run(
            resolved("fast", 3, "not-a-version"),
            status("regular", 3, "1.0.0"),
        ));
    }

    #[test]
    fn test_unparseable_status_version_stays_fresh() {
        assert!(!run(
            resolved("fast", 3, "2.0.0"),
            status("regular", 3, "not-a-version"),
        ));
    }

    #[test]
    fn test_unparseable_descriptor_stays_fresh() {
        let mut entry = resolved("fast", 3, "2.0.0");
        entry.template.descriptor = "{not yaml".to_string();
        assert!(!run(entry, status("regular", 3, "1.0.0")));
    }

    #[test]
    fn test_module_without_prior_status_stays_fresh() {
        let mut resolved_map = ResolvedModules::new();
        resolved_map.insert("keda".to_string(), resolved("regular", 4, "1.0.0"));

        let other = ModuleStatus {
            fqdn: "serverless".to_string(),
            channel: "regular".to_string(),
            version: "1.0.0".to_string(),
            template_generation: 1,
        };
        flag_outdated(&mut resolved_map, &[other]);

        assert!(!resolved_map["keda"].outdated);
    }
}
