//! User Profile

use serde::{Deserialize, Serialize};

use crate::course::Tier;

/// A saved user profile
///
/// Checkout requires a saved profile; callers without one are routed to
/// profile setup before any payment flow starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: String,

    /// Access tier
    pub tier: Tier,

    /// Declared interests (e.g. "couture", "streetwear")
    #[serde(default)]
    pub interests: Vec<String>,

    /// Ordered course ids the user is working through
    #[serde(default)]
    pub learning_path: Vec<String>,
}

impl UserProfile {
    /// Create a minimal free-tier profile
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tier: Tier::Free,
            interests: Vec::new(),
            learning_path: Vec::new(),
        }
    }
}
