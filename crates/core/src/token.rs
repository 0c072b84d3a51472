use std::fmt;

/// Opaque reference to an ownership scope known to the grant authority.
///
/// An activity token and a transient scope allocated for a standalone lease
/// are both represented this way. The client never interprets the contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerToken(String);

impl OwnerToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
