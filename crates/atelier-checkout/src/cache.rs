//! Purchase State Cache
//!
//! Read-side cache over the backend's purchase queries. After a confirmed
//! purchase the affected entries are invalidated so pages navigated to
//! afterward re-read backend truth instead of showing locked content.
//! The confirmation page itself never reads these views, so a read that
//! races the invalidation can only happen on a later page.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use atelier_core::{CourseBackend, CoursePurchase, Result};

/// Memoizing cache of the caller's purchase state
pub struct PurchaseCache {
    backend: Arc<dyn CourseBackend>,
    purchased: RwLock<Option<Vec<CoursePurchase>>>,
    has_purchased: RwLock<HashMap<String, bool>>,
}

impl PurchaseCache {
    pub fn new(backend: Arc<dyn CourseBackend>) -> Self {
        Self {
            backend,
            purchased: RwLock::new(None),
            has_purchased: RwLock::new(HashMap::new()),
        }
    }

    /// All purchase records for the caller, fetched once and memoized
    pub async fn purchased_courses(&self) -> Result<Vec<CoursePurchase>> {
        {
            let cached = self.purchased.read().unwrap().clone();
            if let Some(records) = cached {
                return Ok(records);
            }
        }

        let fresh = self.backend.get_purchased_courses().await?;
        *self.purchased.write().unwrap() = Some(fresh.clone());
        Ok(fresh)
    }

    /// Whether the caller owns a course, fetched once per id and memoized
    pub async fn has_purchased(&self, course_id: &str) -> Result<bool> {
        {
            let cached = self.has_purchased.read().unwrap().get(course_id).copied();
            if let Some(owned) = cached {
                return Ok(owned);
            }
        }

        let fresh = self.backend.has_purchased_course(course_id).await?;
        self.has_purchased
            .write()
            .unwrap()
            .insert(course_id.to_string(), fresh);
        Ok(fresh)
    }

    /// Mark every purchase view stale after a confirmed purchase
    ///
    /// Drops the record list and all has-purchased entries, not just the
    /// confirmed course's; any cached view keyed by the course goes with
    /// it. Next reads fetch through to the backend.
    pub fn invalidate_for_course(&self, course_id: &str) {
        *self.purchased.write().unwrap() = None;
        self.has_purchased.write().unwrap().clear();
        tracing::debug!(course_id = %course_id, "purchase cache invalidated");
    }
}
