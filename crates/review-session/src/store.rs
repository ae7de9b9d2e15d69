//! Session Context Store
//!
//! A single slot holding the [`SessionContext`] of the latest successful
//! analysis. Each write bumps a generation counter; requests remember the
//! generation they were issued against so a late response can tell whether
//! its context has since been cleared or replaced.

use std::sync::Arc;

use shared_types::SessionContext;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::info;

/// Read-only view of the context a request was issued against
#[derive(Debug, Clone)]
pub struct ContextSnapshot {
    generation: u64,
    context: Arc<SessionContext>,
}

impl ContextSnapshot {
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    context: Option<Arc<SessionContext>>,
}

/// Keeps the context from being cleared or replaced while held
pub struct CurrentGuard<'a> {
    _slot: RwLockReadGuard<'a, Slot>,
}

#[derive(Debug, Default)]
pub struct ContextStore {
    slot: RwLock<Slot>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the context wholesale. Returns the new generation.
    pub async fn set(&self, context: SessionContext) -> u64 {
        let mut slot = self.slot.write().await;
        slot.generation += 1;
        slot.context = Some(Arc::new(context));
        info!("Session context replaced (generation {})", slot.generation);
        slot.generation
    }

    /// Replace the context only if nothing else wrote since `expected`
    pub async fn set_if_current(&self, expected: u64, context: SessionContext) -> bool {
        let mut slot = self.slot.write().await;
        if slot.generation != expected {
            return false;
        }
        slot.generation += 1;
        slot.context = Some(Arc::new(context));
        info!("Session context populated (generation {})", slot.generation);
        true
    }

    pub async fn get(&self) -> Option<ContextSnapshot> {
        let slot = self.slot.read().await;
        slot.context.as_ref().map(|context| ContextSnapshot {
            generation: slot.generation,
            context: Arc::clone(context),
        })
    }

    /// Empty the slot. Returns the new generation.
    pub async fn clear(&self) -> u64 {
        let mut slot = self.slot.write().await;
        slot.generation += 1;
        slot.context = None;
        slot.generation
    }

    pub async fn generation(&self) -> u64 {
        self.slot.read().await.generation
    }

    pub async fn is_current(&self, snapshot: &ContextSnapshot) -> bool {
        self.generation().await == snapshot.generation
    }

    /// Pin the context `snapshot` was taken from, if it is still current.
    /// Writers wait until the guard is dropped.
    pub async fn lock_if_current(&self, snapshot: &ContextSnapshot) -> Option<CurrentGuard<'_>> {
        let slot = self.slot.read().await;
        (slot.generation == snapshot.generation).then_some(CurrentGuard { _slot: slot })
    }
}
