//! Physical color-pair cache.
//!
//! Terminals expose a finite set of color-pair registers. [`PairPool`]
//! owns them: it maps each distinct (foreground, background) combination
//! to at most one live [`PairSlot`] and hands out shared [`PairRef`]
//! handles. The reference count is the `Rc` strong count, so it can never
//! go negative and dropping the last handle is exactly "release".
//!
//! Slots are reclaimed lazily: a slot whose last handle was dropped keeps
//! its register until the pool is full and a new pair needs one. Eviction
//! policy: the unreferenced slot with the lowest register index is
//! reclaimed first. There is no LRU guarantee; the policy only affects
//! which stale pair re-renders first right after eviction.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::color::Color;
use crate::error::ColorError;

/// One hardware color-pair register, owned by the pool.
#[derive(Debug, PartialEq, Eq)]
pub struct PairSlot {
    index: u16,
    fg: Color,
    bg: Color,
}

impl PairSlot {
    /// Register index. Index 0 is reserved for the terminal default pair
    /// and never allocated.
    #[inline]
    pub fn index(&self) -> u16 {
        self.index
    }

    /// Foreground color of this register.
    #[inline]
    pub fn fg(&self) -> Color {
        self.fg
    }

    /// Background color of this register.
    #[inline]
    pub fn bg(&self) -> Color {
        self.bg
    }
}

/// Non-owning handle to a [`PairSlot`]; cloning increments the reference
/// count, dropping decrements it.
pub type PairRef = Rc<PairSlot>;

/// Bounded pool of color-pair registers.
pub struct PairPool {
    capacity: usize,
    lookup: FxHashMap<(Color, Color), Rc<PairSlot>>,
    next_index: u16,
}

impl PairPool {
    /// Create a pool with room for `capacity` simultaneous pairs.
    ///
    /// The capacity comes from the environment (terminal capability
    /// negotiation happens outside this crate).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lookup: FxHashMap::default(),
            next_index: 1, // register 0 is the terminal default pair
        }
    }

    /// Number of live slots (referenced or reclaimable).
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Whether the pool holds no slots.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Maximum number of simultaneous pairs.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get a handle for (fg, bg), allocating or evicting as needed.
    ///
    /// Returns the existing slot for an already-mapped pair. When the pool
    /// is full, the lowest-indexed unreferenced slot is reassigned; if every
    /// slot is still referenced the request fails with
    /// [`ColorError::ResourceExhausted`] and the caller falls back to
    /// uncolored rendering.
    pub fn acquire(&mut self, fg: Color, bg: Color) -> Result<PairRef, ColorError> {
        if let Some(slot) = self.lookup.get(&(fg, bg)) {
            return Ok(Rc::clone(slot));
        }

        let index = if self.lookup.len() < self.capacity {
            let index = self.next_index;
            self.next_index += 1;
            index
        } else {
            let Some(victim) = self.evictable_pair() else {
                warn!(?fg, ?bg, "color pair pool exhausted");
                return Err(ColorError::ResourceExhausted);
            };
            let slot = self
                .lookup
                .remove(&victim)
                .unwrap_or_else(|| unreachable!("evictable pair is present"));
            debug!(index = slot.index, ?victim, new = ?(fg, bg), "evicting color pair");
            slot.index
        };

        let slot = Rc::new(PairSlot { index, fg, bg });
        self.lookup.insert((fg, bg), Rc::clone(&slot));
        Ok(slot)
    }

    /// Lowest-indexed slot with no outstanding handles, if any.
    fn evictable_pair(&self) -> Option<(Color, Color)> {
        self.lookup
            .iter()
            .filter(|(_, slot)| Rc::strong_count(slot) == 1)
            .min_by_key(|(_, slot)| slot.index)
            .map(|(&key, _)| key)
    }

    /// Outstanding handle count for a slot still owned by this pool.
    pub fn ref_count(&self, slot: &PairRef) -> usize {
        // The pool's own Rc does not count as a reference.
        Rc::strong_count(slot).saturating_sub(1)
    }

    /// Visit every live slot in register-index order, with its outstanding
    /// handle count. Used by the trace dump.
    pub fn for_each_slot(&self, mut f: impl FnMut(&PairSlot, usize)) {
        let mut slots: Vec<&Rc<PairSlot>> = self.lookup.values().collect();
        slots.sort_by_key(|slot| slot.index);
        for slot in slots {
            f(slot, Rc::strong_count(slot) - 1);
        }
    }

    /// Forget every slot and start register numbering over.
    ///
    /// Callers must drop all outstanding [`PairRef`] handles first (the
    /// engine clears its tables before clearing the pool), otherwise a
    /// stale handle could alias a reissued register index.
    pub fn clear(&mut self) {
        self.lookup.clear();
        self.next_index = 1;
    }
}

impl std::fmt::Debug for PairPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairPool")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
