//! One editor instance: configuration, geometry, colors and history.
//!
//! Every editor on a page owns its own session; nothing is shared between
//! instances. All operations are synchronous and run on the UI thread.

use std::collections::BTreeSet;

use tracing::{debug, info};

use beadweave_core::{
    apply_move, compute_legend, move_destination, peyote_row_labels, preview_beads, Bead, BeadId,
    CanvasColors, ColorId, History, Layout, LegendEntry, MoveOffset, Palette, RowLabel,
    StitchType,
};

use crate::config::EditorConfig;
use crate::events::{EventKind, HistoryStatus, SessionEvent, Subscribers, SubscriptionId};
use crate::selection::Selection;
use crate::view::{AppStep, ToolMode, ViewState};

#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    layout: Layout,
    palette: Palette,
    /// Live grid colors, including strokes not yet committed.
    canvas: CanvasColors,
    /// Fringe colors. Kept out of the undo history.
    fringe_colors: CanvasColors,
    history: History,
    selection: Selection,
    tool: ToolMode,
    selected_color: ColorId,
    view: ViewState,
    step: AppStep,
    subscribers: Subscribers,
}

impl EditorSession {
    /// Start a session with the default palette.
    pub fn new(config: EditorConfig) -> crate::Result<Self> {
        Self::with_palette(config, Palette::default())
    }

    pub fn with_palette(config: EditorConfig, palette: Palette) -> crate::Result<Self> {
        let layout = Layout::build(config.layout_params()?, config.fringe);
        info!(
            grid_size = config.grid_size,
            stitch = %config.stitch,
            rotation = %config.rotation,
            beads = layout.beads().len(),
            "Created editor session"
        );
        Ok(Self {
            config,
            layout,
            palette,
            canvas: CanvasColors::new(),
            fringe_colors: CanvasColors::new(),
            history: History::default(),
            selection: Selection::default(),
            tool: ToolMode::default(),
            selected_color: 0,
            view: ViewState::default(),
            step: AppStep::default(),
            subscribers: Subscribers::default(),
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn canvas(&self) -> &CanvasColors {
        &self.canvas
    }

    pub fn fringe_colors(&self) -> &CanvasColors {
        &self.fringe_colors
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn step(&self) -> AppStep {
        self.step
    }

    pub fn start_painting(&mut self) {
        self.step = AppStep::Painting;
    }

    pub fn start_configuring(&mut self) {
        self.step = AppStep::Configuring;
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Switching away from the selection tool drops the selection.
    pub fn set_tool(&mut self, tool: ToolMode) {
        if tool != ToolMode::Selection {
            self.selection.clear();
        }
        self.tool = tool;
    }

    pub fn selected_color(&self) -> ColorId {
        self.selected_color
    }

    /// Pick the paint color. Ids outside the palette are refused.
    pub fn set_selected_color(&mut self, color: ColorId) -> bool {
        if self.palette.get(color).is_none() {
            return false;
        }
        self.selected_color = color;
        true
    }

    // -----------------------------------------------------------------------
    // Painting
    // -----------------------------------------------------------------------

    /// Apply the current tool to a bead: paint with the selected color,
    /// erase, or toggle selection. Returns whether anything changed.
    ///
    /// Grid changes stay pending until [`commit`](Self::commit), so a drag
    /// across many beads becomes a single undo step.
    pub fn paint(&mut self, id: BeadId) -> bool {
        match self.tool {
            ToolMode::Paint => self.set_bead_color(id, Some(self.selected_color)),
            ToolMode::Eraser => self.set_bead_color(id, None),
            ToolMode::Selection => match id.grid_index() {
                Some(n) if self.layout.contains(id) => {
                    self.selection.toggle(n);
                    true
                }
                _ => false,
            },
            ToolMode::Grid => false,
        }
    }

    /// Set or clear one bead's color. Ids the layout does not contain are
    /// skipped.
    pub fn set_bead_color(&mut self, id: BeadId, color: Option<ColorId>) -> bool {
        if !self.layout.contains(id) {
            return false;
        }
        let target = if id.is_fringe() {
            &mut self.fringe_colors
        } else {
            &mut self.canvas
        };
        let previous = match color {
            Some(c) => target.set(id, c),
            None => target.remove(id),
        };
        previous != color
    }

    /// Record the live canvas as a history step. Returns `false` if nothing
    /// changed since the last step.
    pub fn commit(&mut self) -> bool {
        if !self.history.commit(&self.canvas) {
            return false;
        }
        self.publish(EventKind::Committed);
        true
    }

    /// Erase the whole grid as a single undoable step.
    pub fn clear_canvas(&mut self) -> bool {
        self.canvas.clear();
        self.commit()
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back one commit. Uncommitted strokes are discarded.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        self.canvas = self.history.undo().clone();
        self.publish(EventKind::Undone);
        true
    }

    /// Step forward one commit. Uncommitted strokes are discarded.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        self.canvas = self.history.redo().clone();
        self.publish(EventKind::Redone);
        true
    }

    /// Start over: empty grid and fringe, no history, no selection.
    pub fn reset(&mut self) {
        self.history.reset();
        self.canvas.clear();
        self.fringe_colors.clear();
        self.selection.clear();
        info!("Reset editor session");
        self.publish(EventKind::Reset);
    }

    // -----------------------------------------------------------------------
    // Selection and move
    // -----------------------------------------------------------------------

    fn supports_move(&self) -> bool {
        self.config.stitch.is_row_major()
    }

    pub fn select(&mut self, id: usize) -> bool {
        self.layout.contains(BeadId::Grid(id)) && self.selection.add(id)
    }

    pub fn deselect(&mut self, id: usize) -> bool {
        self.selection.remove(id)
    }

    /// Select the rectangle spanned by two corner beads.
    pub fn select_rect(&mut self, corner_a: usize, corner_b: usize) {
        if !self.supports_move() {
            return;
        }
        let n = self.config.grid_size;
        if corner_a < n * n && corner_b < n * n {
            self.selection.add_rect(corner_a, corner_b, n);
        }
    }

    /// Select every painted grid bead.
    pub fn select_painted(&mut self) {
        for id in self.canvas.ids().filter_map(BeadId::grid_index) {
            self.selection.add(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_move_offset(&mut self, offset: MoveOffset) {
        self.selection.set_offset(offset);
    }

    pub fn nudge_selection(&mut self, dx: i64, dy: i64) {
        self.selection.nudge(dx, dy);
    }

    /// Abandon the pending move without touching the canvas.
    pub fn cancel_move(&mut self) {
        self.selection.reset_offset();
    }

    /// Ghost beads for the pending move. Recomputed on every call.
    pub fn move_preview(&self) -> Vec<Bead> {
        if !self.supports_move() {
            return Vec::new();
        }
        preview_beads(
            self.selection.beads(),
            self.selection.offset(),
            self.layout.beads(),
            &self.canvas,
            self.config.grid_size,
        )
    }

    /// Commit the pending move.
    ///
    /// Selected beads that would leave the grid are erased. The selection
    /// follows its positions that stay on the grid, and the move becomes one
    /// undo step. Returns `false`, publishing nothing, when the canvas did
    /// not change, e.g. when only unpainted positions were selected.
    pub fn apply_move(&mut self) -> bool {
        let offset = self.selection.offset();
        if !self.supports_move() || self.selection.is_empty() || offset.is_zero() {
            return false;
        }
        let n = self.config.grid_size;
        let moved = self
            .selection
            .beads()
            .iter()
            .filter(|&&id| self.canvas.contains(BeadId::Grid(id)))
            .filter(|&&id| move_destination(id, offset, n).is_some())
            .count();
        self.canvas = apply_move(self.selection.beads(), offset, &self.canvas, n);

        let landed: BTreeSet<usize> = self
            .selection
            .beads()
            .iter()
            .filter_map(|&id| move_destination(id, offset, n))
            .collect();
        debug!(selected = self.selection.len(), moved, ?offset, "Applied move");
        self.selection.replace(landed);
        self.selection.reset_offset();

        if !self.history.commit(&self.canvas) {
            return false;
        }
        self.publish(EventKind::Moved { moved });
        true
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Apply a new configuration and regenerate the geometry.
    ///
    /// Bead ids survive a change of rotation, fringe or row numbering. They
    /// do not survive a new grid size or a switch to or from right-angle
    /// weave, so those also clear the colors, selection and history.
    pub fn reconfigure(&mut self, config: EditorConfig) -> crate::Result<()> {
        let layout = Layout::build(config.layout_params()?, config.fringe);

        let ids_change = config.grid_size != self.config.grid_size
            || (config.stitch == StitchType::Raw) != (self.config.stitch == StitchType::Raw);
        if ids_change {
            self.history.reset();
            self.canvas.clear();
            self.fringe_colors.clear();
            self.selection.clear();
        }

        // Fringe beads that no longer exist lose their color.
        let before = self.fringe_colors.len();
        self.fringe_colors = self
            .fringe_colors
            .iter()
            .filter(|&(id, _)| layout.contains(id))
            .collect();

        info!(
            grid_size = config.grid_size,
            stitch = %config.stitch,
            rotation = %config.rotation,
            ids_change,
            dropped_fringe = before - self.fringe_colors.len(),
            "Reconfigured editor session"
        );
        self.config = config;
        self.layout = layout;
        self.publish(EventKind::Reconfigured);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Colors in use on grid and fringe, with counts.
    pub fn legend(&self) -> Vec<LegendEntry> {
        compute_legend(&self.canvas, &self.fringe_colors, &self.palette)
    }

    /// Row-number labels; empty unless the stitch is peyote.
    pub fn row_labels(&self) -> Vec<RowLabel> {
        if self.config.stitch != StitchType::Peyote {
            return Vec::new();
        }
        peyote_row_labels(
            self.layout.beads(),
            self.config.grid_size,
            self.config.peyote_starting_row,
        )
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// Call `listener` after every commit, undo, redo, move, reset and
    /// reconfiguration.
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn history_status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            cursor: self.history.cursor(),
            len: self.history.len(),
        }
    }

    fn publish(&mut self, kind: EventKind) {
        let event = SessionEvent {
            kind,
            history: self.history_status(),
        };
        self.subscribers.publish(&event);
    }
}
