use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Account role sent on registration.
///
/// Roles are opaque strings at this layer; the remote API decides what a
/// role may do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Regular directory visitor.
    pub const USER: Role = Role(Cow::Borrowed("user"));
    /// Listing owner.
    pub const VENDOR: Role = Role(Cow::Borrowed("vendor"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::USER
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
