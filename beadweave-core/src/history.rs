use tracing::{debug, trace};

use crate::canvas::CanvasColors;
use crate::delta::Delta;

/// Default number of deltas retained before compaction.
pub const MAX_HISTORY: usize = 100;

/// Smallest cap that still leaves something after compacting half.
const MIN_MAX_HISTORY: usize = 2;

/// Undo/redo over canvas snapshots, stored as deltas from a base state.
///
/// The visible canvas is always `base` with `deltas[..cursor]` applied in
/// order. It is also cached incrementally so undo and redo cost one delta
/// each; [`current_state`](Self::current_state) recomputes it from scratch.
///
/// When the number of deltas exceeds the cap, the oldest half is folded into
/// the base. Compaction only happens inside [`commit`](Self::commit), right
/// after the redo tail has been discarded, so it never drops a redoable
/// delta.
#[derive(Debug, Clone)]
pub struct History {
    base: CanvasColors,
    deltas: Vec<Delta>,
    cursor: usize,
    current: CanvasColors,
    max_history: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(CanvasColors::new())
    }
}

impl History {
    pub fn new(initial: CanvasColors) -> Self {
        Self::with_max_history(initial, MAX_HISTORY)
    }

    /// History that keeps at most `max_history` deltas (at least 2).
    pub fn with_max_history(initial: CanvasColors, max_history: usize) -> Self {
        Self {
            current: initial.clone(),
            base: initial,
            deltas: Vec::new(),
            cursor: 0,
            max_history: max_history.max(MIN_MAX_HISTORY),
        }
    }

    /// Record `canvas` as the new current state.
    ///
    /// Returns `false` without touching the history when nothing changed.
    /// Otherwise any redo branch is discarded.
    pub fn commit(&mut self, canvas: &CanvasColors) -> bool {
        let delta = Delta::between(&self.current, canvas);
        if delta.is_empty() {
            return false;
        }

        trace!(beads = delta.len(), cursor = self.cursor, "Committing delta");
        self.deltas.truncate(self.cursor);
        self.deltas.push(delta);
        self.cursor = self.deltas.len();
        self.current = canvas.clone();

        if self.deltas.len() > self.max_history {
            self.compact();
        }
        true
    }

    /// Fold the oldest half of the deltas into the base.
    fn compact(&mut self) {
        let count = (self.max_history / 2).min(self.deltas.len());
        for delta in self.deltas.drain(..count) {
            delta.apply(&mut self.base);
        }
        self.cursor = self.cursor.saturating_sub(count);
        debug!(
            compacted = count,
            remaining = self.deltas.len(),
            base_beads = self.base.len(),
            "Compacted history"
        );
    }

    /// Step back one commit. At the start of history this is a no-op.
    pub fn undo(&mut self) -> &CanvasColors {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.deltas[self.cursor].revert(&mut self.current);
        }
        &self.current
    }

    /// Step forward one commit. At the end of history this is a no-op.
    pub fn redo(&mut self) -> &CanvasColors {
        if self.cursor < self.deltas.len() {
            self.deltas[self.cursor].apply(&mut self.current);
            self.cursor += 1;
        }
        &self.current
    }

    /// Rebuild the current state from the base and resynchronize the cache.
    pub fn current_state(&mut self) -> &CanvasColors {
        let mut state = self.base.clone();
        for delta in &self.deltas[..self.cursor] {
            delta.apply(&mut state);
        }
        self.current = state;
        &self.current
    }

    /// The incrementally maintained current state.
    pub fn current(&self) -> &CanvasColors {
        &self.current
    }

    /// Clear to an empty canvas with no history.
    pub fn reset(&mut self) {
        self.base = CanvasColors::new();
        self.deltas.clear();
        self.cursor = 0;
        self.current = CanvasColors::new();
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.deltas.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of retained deltas.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn base_state(&self) -> &CanvasColors {
        &self.base
    }

    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }
}
