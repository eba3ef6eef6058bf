//! Aggregate application state and its single owner.
//!
//! All four collections live in one [`TrackerState`] behind the
//! [`StateController`]. Reads get a consistent view; every mutation works on
//! a draft of one collection, persists the full collection, and only then
//! replaces the in-memory copy. A failed write leaves memory untouched.

use anyhow::Result;
use shared::{Medication, Professional, Therapy, UserProfile};
use tokio::sync::RwLock;
use tracing::info;

use crate::storage::{Record, RecordStore};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    pub profile: UserProfile,
    pub medications: Vec<Medication>,
    pub therapies: Vec<Therapy>,
    pub professionals: Vec<Professional>,
}

/// A persisted part of [`TrackerState`]
pub trait Collection: Record + Clone {
    fn slot(state: &mut TrackerState) -> &mut Self;
}

impl Collection for UserProfile {
    fn slot(state: &mut TrackerState) -> &mut Self {
        &mut state.profile
    }
}

impl Collection for Vec<Medication> {
    fn slot(state: &mut TrackerState) -> &mut Self {
        &mut state.medications
    }
}

impl Collection for Vec<Therapy> {
    fn slot(state: &mut TrackerState) -> &mut Self {
        &mut state.therapies
    }
}

impl Collection for Vec<Professional> {
    fn slot(state: &mut TrackerState) -> &mut Self {
        &mut state.professionals
    }
}

pub struct StateController {
    state: RwLock<TrackerState>,
    store: RecordStore,
}

impl StateController {
    /// Read every record once, substituting defaults for missing ones
    pub async fn load(store: RecordStore) -> Result<Self> {
        let state = TrackerState {
            profile: store.load().await?,
            medications: store.load().await?,
            therapies: store.load().await?,
            professionals: store.load().await?,
        };

        info!(
            "Loaded state: {} medications, {} therapies, {} professionals",
            state.medications.len(),
            state.therapies.len(),
            state.professionals.len()
        );

        Ok(Self { state: RwLock::new(state), store })
    }

    /// A copy of the whole state
    pub async fn snapshot(&self) -> TrackerState {
        self.state.read().await.clone()
    }

    /// Compute something from the current state without cloning it
    pub async fn read<R>(&self, f: impl FnOnce(&TrackerState) -> R) -> R {
        let guard = self.state.read().await;
        f(&guard)
    }

    /// Mutate one collection and persist it.
    ///
    /// `f` runs on a draft; if it fails or the write fails nothing changes.
    pub async fn update<C, R>(&self, f: impl FnOnce(&mut C) -> Result<R>) -> Result<R>
    where
        C: Collection,
    {
        let mut guard = self.state.write().await;

        let mut draft = C::slot(&mut guard).clone();
        let result = f(&mut draft)?;

        self.store.save(&draft).await?;
        *C::slot(&mut guard) = draft;

        Ok(result)
    }
}
