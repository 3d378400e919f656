//! Display surfaces and the single-instance chart slot.
//!
//! A `Surface` is the only place a display model lives. Renders build a new
//! model off to the side and swap it in whole; readers clone a snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

pub struct Surface<T> {
    name: &'static str,
    state: RwLock<T>,
    revision: AtomicU64,
}

impl<T> Surface<T> {
    pub fn new(name: &'static str, initial: T) -> Self {
        Self {
            name,
            state: RwLock::new(initial),
            revision: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Wholesale replace; returns the new revision
    pub fn replace(&self, next: T) -> u64 {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
        self.revision.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Mutate in place under the write lock (form state, chart slots)
    pub fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut *self.state.write().unwrap_or_else(PoisonError::into_inner));
        self.revision.fetch_add(1, Ordering::SeqCst);
        result
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

impl<T: Clone> Surface<T> {
    pub fn snapshot(&self) -> T {
        self.read(T::clone)
    }
}

/// The live chart held by a slot
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance<M> {
    pub generation: u64,
    pub model: M,
}

/// Arena of one: at most one chart instance, disposed before its replacement
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlot<M> {
    current: Option<ChartInstance<M>>,
    generation: u64,
    disposed: u64,
}

impl<M> Default for ChartSlot<M> {
    fn default() -> Self {
        Self {
            current: None,
            generation: 0,
            disposed: 0,
        }
    }
}

impl<M> ChartSlot<M> {
    /// Take and dispose the prior instance, then install one built from `model`
    pub fn redraw(&mut self, model: M) -> u64 {
        self.dispose_current();
        self.generation += 1;
        self.current = Some(ChartInstance {
            generation: self.generation,
            model,
        });
        self.generation
    }

    /// Dispose the current instance and leave the slot empty
    pub fn clear(&mut self) {
        self.dispose_current();
    }

    fn dispose_current(&mut self) {
        if let Some(prior) = self.current.take() {
            self.disposed += 1;
            drop(prior);
        }
    }

    pub fn current(&self) -> Option<&ChartInstance<M>> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_replace_bumps_revision() {
        let surface = Surface::new("scalar", 0u64);
        assert_eq!(surface.replace(5), 1);
        assert_eq!(surface.replace(6), 2);
        assert_eq!(surface.snapshot(), 6);
        assert_eq!(surface.name(), "scalar");
    }

    #[test]
    fn test_chart_slot_disposes_before_recreate() {
        let mut slot: ChartSlot<Vec<u64>> = ChartSlot::default();
        assert_eq!(slot.redraw(vec![1, 2]), 1);
        assert_eq!(slot.disposed_count(), 0);

        assert_eq!(slot.redraw(vec![3, 4]), 2);
        assert_eq!(slot.disposed_count(), 1);
        let current = slot.current().expect("instance installed");
        assert_eq!(current.generation, 2);
        assert_eq!(current.model, vec![3, 4]);
    }

    #[test]
    fn test_chart_slot_clear_empties() {
        let mut slot: ChartSlot<u8> = ChartSlot::default();
        slot.clear();
        assert_eq!(slot.disposed_count(), 0);
        slot.redraw(1);
        slot.clear();
        assert!(slot.current().is_none());
        assert_eq!(slot.disposed_count(), 1);
        assert_eq!(slot.generation(), 1);
    }
}
