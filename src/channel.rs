//! Channel precedence selection

use crate::types::ModuleReference;

/// System-wide fallback channel when neither the module nor the
/// desired-state object declares one
pub const DEFAULT_CHANNEL: &str = "regular";

/// Pick the channel a module should be resolved in
///
/// Precedence, highest first: the module's explicit channel override, the
/// desired-state object's default channel, [`DEFAULT_CHANNEL`]. Exactly one
/// level wins; there is no merging.
pub fn desired_channel(module: &ModuleReference, default_channel: &str) -> String {
    if let Some(channel) = module.explicit_channel() {
        channel.to_string()
    } else if !default_channel.is_empty() {
        default_channel.to_string()
    } else {
        DEFAULT_CHANNEL.to_string()
    }
}
