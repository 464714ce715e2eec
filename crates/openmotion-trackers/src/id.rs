//! Tracker identity.

use core::fmt;

/// Identifier of a single physical tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackerId(u32);

impl TrackerId {
    /// Wrap a raw id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for TrackerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
