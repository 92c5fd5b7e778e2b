//! ==============================================================================
//! state.rs - the latest-reading slot
//! ==============================================================================
//!
//! purpose:
//!     holds exactly one Reading in process memory. handlers receive it via
//!     axum state instead of reaching for a global.
//!
//! concurrency:
//!     the reading sits behind arc<rwlock<>>. a write replaces the whole
//!     record under the write guard, so readers see either the old pair or
//!     the new pair, never a mix. concurrent ingests are last-write-wins.
//!
//! ==============================================================================

use crate::domain::Reading;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct LatestReading {
    inner: Arc<RwLock<Reading>>,
}

impl LatestReading {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Reading {
        self.inner.read().await.clone()
    }

    pub async fn set(&self, reading: Reading) {
        *self.inner.write().await = reading;
    }

    /// back to `{peopleCount: 0, temperature: 0}`, returning the new value
    pub async fn reset(&self) -> Reading {
        let zero = Reading::zero();
        *self.inner.write().await = zero.clone();
        zero
    }
}
