//! Tri-state enabled flag
//!
//! Feature enablement is resolved from configuration before activation
//! begins. A flag is either explicitly set (enabled/disabled) or unset, in
//! which case the feature's own default policy decides.

use serde::{Deserialize, Serialize};

/// Tri-state boolean resolved against a default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    /// Not set; defer to the default policy
    #[default]
    Unset,
    /// Explicitly enabled
    Enabled,
    /// Explicitly disabled
    Disabled,
}

impl Flag {
    /// Resolve the flag to a boolean, falling back to `default` when unset
    pub fn resolve(self, default: bool) -> bool {
        match self {
            Flag::Unset => default,
            Flag::Enabled => true,
            Flag::Disabled => false,
        }
    }

    /// Whether the flag was explicitly set
    pub fn is_set(self) -> bool {
        self != Flag::Unset
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Flag::Enabled
        } else {
            Flag::Disabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_defers_to_default() {
        assert!(!Flag::Unset.resolve(false));
        assert!(Flag::Unset.resolve(true));
    }

    #[test]
    fn test_explicit_value_wins_over_default() {
        assert!(Flag::Enabled.resolve(false));
        assert!(!Flag::Disabled.resolve(true));
    }

    #[test]
    fn test_is_set() {
        assert!(!Flag::Unset.is_set());
        assert!(Flag::Enabled.is_set());
        assert!(Flag::Disabled.is_set());
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(Flag::from(true), Flag::Enabled);
        assert_eq!(Flag::from(false), Flag::Disabled);
    }
}
