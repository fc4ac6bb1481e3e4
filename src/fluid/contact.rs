//! Set of (fluid, body) fixture pairs currently overlapping.

use std::collections::BTreeSet;

use super::host::FluidHost;

/// A fluid fixture overlapping a dynamic-body fixture. Always normalized so
/// `fluid` is the fluid sensor, whatever order the engine reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactPair<F> {
    pub fluid: F,
    pub body: F,
}

/// Overlap bookkeeping for one fluid sensor.
///
/// Mutated only from the engine's begin/end callbacks; the per-tick force
/// pass reads a snapshot, so iteration never sees structural changes.
#[derive(Debug, Clone)]
pub struct ContactSet<F> {
    fluid: F,
    pairs: BTreeSet<ContactPair<F>>,
}

impl<F: Copy + Ord> ContactSet<F> {
    pub fn new(fluid: F) -> Self {
        Self {
            fluid,
            pairs: BTreeSet::new(),
        }
    }

    /// The fluid sensor fixture this set tracks.
    pub fn fluid(&self) -> F {
        self.fluid
    }

    /// Normalize `(a, b)` into a pair when exactly one side is this fluid.
    fn normalize(&self, a: F, b: F) -> Option<ContactPair<F>> {
        match (a == self.fluid, b == self.fluid) {
            (true, false) => Some(ContactPair {
                fluid: a,
                body: b,
            }),
            (false, true) => Some(ContactPair {
                fluid: b,
                body: a,
            }),
            _ => None,
        }
    }

    /// Begin-overlap callback. Records the pair when one side is the fluid and
    /// the other belongs to a dynamic body. Returns whether a new pair was added.
    pub fn begin_overlap<H>(&mut self, host: &H, a: F, b: F) -> bool
    where
        H: FluidHost<Fixture = F> + ?Sized,
    {
        match self.normalize(a, b) {
            Some(pair) if host.is_dynamic_fixture(pair.body) => self.pairs.insert(pair),
            _ => false,
        }
    }

    /// End-overlap callback. Removing an absent pair is a no-op. Returns the
    /// removed pair, if any.
    pub fn end_overlap(&mut self, a: F, b: F) -> Option<ContactPair<F>> {
        let pair = self.normalize(a, b)?;
        self.pairs.take(&pair)
    }

    pub fn contains(&self, a: F, b: F) -> bool {
        self.normalize(a, b)
            .is_some_and(|pair| self.pairs.contains(&pair))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContactPair<F>> {
        self.pairs.iter()
    }

    /// Copy of the current pairs, in a stable order.
    pub fn snapshot(&self) -> Vec<ContactPair<F>> {
        self.pairs.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}
