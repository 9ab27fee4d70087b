use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "add_employee").
/// A special wildcard permission `"*"` can be used by provider implementations
/// to indicate "allow all" without hardcoding domain permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

/// Capability required to onboard a new employee.
pub const ADD_EMPLOYEE: Permission = Permission::from_static("add_employee");

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_is_recognized() {
        assert!(Permission::new("*").is_wildcard());
        assert!(!ADD_EMPLOYEE.is_wildcard());
    }

    #[test]
    fn static_and_owned_permissions_compare_equal() {
        assert_eq!(Permission::new("add_employee".to_string()), ADD_EMPLOYEE);
    }
}
