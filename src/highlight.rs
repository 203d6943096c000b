//! Highlighted pixels and their churn schedule.

/*
Highlights
==========

A small random subset of pixels sparkles harder than the rest: a wider
lightness band reaching toward white and a different wave speed. Which
pixels are highlighted changes slowly as the drive value moves.


Membership
----------

The set is checked once per pixel per frame, so membership must be O(1).
It is stored twice:

  mask       one bool per pixel, the membership test
  members    the highlighted indices, for picking random victims

Evicting swaps the victim with the last member and pops it (swap_remove), so
both eviction and insertion are O(1).


Churn Schedule
--------------

    parity = floor(drive * replacement_speed_factor) mod 2

Every time the parity flips, i.e. every time `drive * factor` crosses an
integer, a fraction of the highlights is replaced:

    count = max(1, round(|set| * variability))

That many random members are evicted, then as many fresh indices (not
currently highlighted) are added, so the set size never changes. The churn
depends only on crossing integers, not on hitting particular drive values.
*/

use rand::Rng;

/// Fixed-size set of highlighted pixel indices.
#[derive(Debug, Clone, Default)]
pub struct HighlightSet {
    mask: Vec<bool>,
    members: Vec<usize>,
}

impl HighlightSet {
    /// An empty set over zero pixels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of highlights for a field of `pixel_count` pixels.
    #[inline]
    pub fn target_len(pixel_count: usize, amount: f32) -> usize {
        ((pixel_count as f32 * amount).round() as usize).min(pixel_count)
    }

    /// Replace the whole set with `round(pixel_count * amount)` distinct random pixels.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, rng: &mut R, pixel_count: usize, amount: f32) {
        self.mask.clear();
        self.mask.resize(pixel_count, false);
        self.members.clear();

        let target = Self::target_len(pixel_count, amount);
        self.members.reserve(target);
        while self.members.len() < target {
            self.insert_random(rng);
        }
    }

    /// Evict `count` random members and add as many fresh ones.
    ///
    /// `count` is capped at the set size. Returns the number replaced.
    pub fn churn<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> usize {
        let count = count.min(self.members.len());
        for _ in 0..count {
            let victim = self.members.swap_remove(rng.random_range(0..self.members.len()));
            self.mask[victim] = false;
        }
        for _ in 0..count {
            self.insert_random(rng);
        }
        count
    }

    /// Add one pixel that is not already highlighted.
    ///
    /// Callers guarantee at least one free pixel exists.
    fn insert_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        debug_assert!(self.members.len() < self.mask.len());
        loop {
            let candidate = rng.random_range(0..self.mask.len());
            if !self.mask[candidate] {
                self.mask[candidate] = true;
                self.members.push(candidate);
                return;
            }
        }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Highlighted indices in no particular order.
    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Per-pixel membership flags.
    #[inline]
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }
}

/// Tracks which half-cycle of the churn schedule the drive value is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChurnSchedule {
    last_parity: bool,
}

impl ChurnSchedule {
    /// Parity of `floor(drive * factor)`. Non-finite input counts as even.
    #[inline]
    pub fn parity(drive: f32, factor: f32) -> bool {
        let step = (drive * factor).floor();
        step.is_finite() && step.rem_euclid(2.0) == 1.0
    }

    /// True when the parity for `drive` differs from the last recorded one.
    #[inline]
    pub fn is_due(&self, drive: f32, factor: f32) -> bool {
        Self::parity(drive, factor) != self.last_parity
    }

    /// Record the parity for `drive`.
    #[inline]
    pub fn advance(&mut self, drive: f32, factor: f32) {
        self.last_parity = Self::parity(drive, factor);
    }

    #[inline]
    pub fn last_parity(&self) -> bool {
        self.last_parity
    }

    pub fn reset(&mut self) {
        self.last_parity = false;
    }
}

/// Members replaced per churn: `max(1, round(len * variability))`.
#[inline]
pub fn churn_count(len: usize, variability: f32) -> usize {
    ((len as f32 * variability).round() as usize).max(1)
}
