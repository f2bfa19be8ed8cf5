//! Collaborator identities.
//!
//! An [`Identity`] is the join key used to recognize the same person across
//! events. Raw attendee emails are reduced to their local part so that
//! `alice.smith@corp.com` and `alice.smith@corp.co.uk` collapse onto one
//! colleague. Collisions are accepted: two people sharing a local part are
//! counted as one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized collaborator identity.
///
/// The only way to build one is through [`Identity::new`], so every value in
/// circulation has already been normalized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Normalizes a raw email (or an existing identity) into an `Identity`.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize_email(raw.as_ref()))
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Identity {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

/// Reduces a raw email to its identity string.
///
/// - the domain (everything from the first `@`) is dropped;
/// - a dotted local part (`first.last`) is kept;
/// - a plain local part without spaces (`first`) is kept;
/// - anything else falls back to the full original input.
///
/// The function is total and idempotent.
pub fn normalize_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);

    if local.contains('.') {
        return local.to_string();
    }

    if !local.contains(' ') {
        return local.to_string();
    }

    email.to_string()
}
