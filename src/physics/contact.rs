//! Sensor overlap events and the per-step overlap cache.

use std::collections::BTreeSet;

/// Change in overlap between a sensor and another collider since the
/// previous step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapEvent {
    Begin(hecs::Entity, hecs::Entity),
    End(hecs::Entity, hecs::Entity),
}

impl OverlapEvent {
    pub fn entities(&self) -> (hecs::Entity, hecs::Entity) {
        match *self {
            OverlapEvent::Begin(a, b) | OverlapEvent::End(a, b) => (a, b),
        }
    }
}

/// Order-independent key for an entity pair.
#[inline]
fn pair_key(a: hecs::Entity, b: hecs::Entity) -> (hecs::Entity, hecs::Entity) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Overlapping pairs from the last step, diffed against each new step.
#[derive(Debug, Default)]
pub struct OverlapCache {
    pairs: BTreeSet<(hecs::Entity, hecs::Entity)>,
}

impl OverlapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached pairs with `current`, returning `End` events for
    /// vanished pairs followed by `Begin` events for new ones.
    pub fn update(
        &mut self,
        current: impl IntoIterator<Item = (hecs::Entity, hecs::Entity)>,
    ) -> Vec<OverlapEvent> {
        let current: BTreeSet<_> = current.into_iter().map(|(a, b)| pair_key(a, b)).collect();

        let mut events: Vec<OverlapEvent> = self
            .pairs
            .difference(&current)
            .map(|&(a, b)| OverlapEvent::End(a, b))
            .collect();
        events.extend(
            current
                .difference(&self.pairs)
                .map(|&(a, b)| OverlapEvent::Begin(a, b)),
        );

        self.pairs = current;
        events
    }

    pub fn contains(&self, a: hecs::Entity, b: hecs::Entity) -> bool {
        self.pairs.contains(&pair_key(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
