//! Course Catalog Types
//!
//! Courses, their modules, and the tier ladder that gates access to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access tier, shared by users and courses
///
/// A closed set: every switch site matches exhaustively so a new tier
/// cannot slip past a gate unhandled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Paid,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Paid => "paid",
            Tier::Premium => "premium",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "paid" => Tier::Paid,
            "premium" => Tier::Premium,
            _ => Tier::Free,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Tier::Free => 0,
            Tier::Paid => 1,
            Tier::Premium => 2,
        }
    }

    /// Whether a viewer at this tier may access content requiring `required`
    pub fn allows(&self, required: Tier) -> bool {
        self.rank() >= required.rank()
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Free
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Difficulty level of a course module
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

/// A single module inside a course
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CourseModule {
    /// Module identifier
    pub id: String,

    /// Module title
    pub title: String,

    /// Short description
    pub description: String,

    /// Tier required to view this module
    pub tier: Tier,

    /// Difficulty level
    pub level: CourseLevel,

    /// Optional lesson video
    #[serde(default)]
    pub video_url: Option<String>,
}

/// A course in the catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier
    pub id: String,

    /// Course title
    pub title: String,

    /// Marketing description
    pub description: String,

    /// Tier required to purchase/access the course
    pub tier: Tier,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Course modules, in order
    #[serde(default)]
    pub modules: Vec<CourseModule>,
}

impl Course {
    /// Whether the course is free to access
    pub fn is_free(&self) -> bool {
        matches!(self.tier, Tier::Free)
    }

    /// Modules visible to a viewer at the given tier
    pub fn visible_modules(&self, viewer: Tier) -> Vec<&CourseModule> {
        self.modules
            .iter()
            .filter(|m| viewer.allows(m.tier))
            .collect()
    }
}
