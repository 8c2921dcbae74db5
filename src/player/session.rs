use std::collections::HashSet;

use rand::Rng;

use super::types::{Direction, TraversalMode};

/// Outcome of one traversal step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The session adopted this index as current.
    To(usize),
    /// Every track has been presented since the last cycle; the history
    /// was cleared and no new track should start this call.
    Exhausted,
}

/// Traversal state for one "now playing" session: list length, current
/// index, mode and the set of indices already presented in shuffle mode.
///
/// Invariant: `played` only holds valid indices and is cleared the moment
/// it would otherwise cover the whole list.
pub struct PlaybackSession {
    len: usize,
    index: usize,
    mode: TraversalMode,
    played: HashSet<usize>,
}

impl PlaybackSession {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            mode: TraversalMode::Sequential,
            played: HashSet::new(),
        }
    }

    /// Rebind the session to a new list: index back to the start, history
    /// gone. Indices of the old list mean nothing for the new one.
    pub fn reset_list(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
        self.played.clear();
    }

    /// Set the current index directly. Deliberately unvalidated; bounds
    /// are enforced when playback is attempted.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// Flip between sequential and shuffle. The played set survives the
    /// flip so a cycle in progress keeps its continuity.
    pub fn toggle_shuffle(&mut self) -> TraversalMode {
        self.mode = match self.mode {
            TraversalMode::Sequential => TraversalMode::Shuffle,
            TraversalMode::Shuffle => TraversalMode::Sequential,
        };
        self.mode
    }

    pub fn played_len(&self) -> usize {
        self.played.len()
    }

    /// Pick the next current index.
    ///
    /// `previous` never branches on the mode: it is a plain backwards step
    /// in both, wrapping to the end of the list.
    pub fn advance(&mut self, direction: Direction, rng: &mut impl Rng) -> Advance {
        if self.len == 0 {
            return Advance::Exhausted;
        }

        if self.mode == TraversalMode::Shuffle && direction == Direction::Next {
            return self.advance_shuffle(rng);
        }

        self.index = match direction {
            Direction::Next => (self.index + 1) % self.len,
            Direction::Previous => self.index.checked_sub(1).unwrap_or(self.len - 1),
        };
        Advance::To(self.index)
    }

    fn advance_shuffle(&mut self, rng: &mut impl Rng) -> Advance {
        // A single track can never yield "a different index"; treat the
        // list as immediately exhausted instead of redrawing forever.
        if self.len <= 1 {
            self.played.clear();
            return Advance::Exhausted;
        }

        // The index being left counts as played.
        self.played.insert(self.index);

        loop {
            let mut candidate = self.index;
            while candidate == self.index {
                candidate = rng.random_range(0..self.len);
            }

            if !self.played.contains(&candidate) {
                self.index = candidate;
                return Advance::To(candidate);
            }

            if self.played.len() == self.len {
                self.played.clear();
                return Advance::Exhausted;
            }
        }
    }
}
