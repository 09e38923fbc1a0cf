use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Roster identifier for a den member.
///
/// Members carry no other attributes the engine cares about; the id is the
/// display name the roster provider hands over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// Lets index maps keyed by MemberId be queried with a plain &str
impl Borrow<str> for MemberId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
