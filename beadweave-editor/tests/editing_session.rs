use beadweave_core::{BeadId, MoveOffset, Rotation, StitchType, MAX_HISTORY};
use beadweave_editor::{EditorConfig, EditorSession, EventKind, ToolMode};

fn mount(attrs: &[(&str, &str)]) -> EditorSession {
    let config = EditorConfig::from_data_attributes(attrs.iter().copied()).unwrap();
    EditorSession::new(config).unwrap()
}

#[test]
fn paint_move_undo_walkthrough() {
    let mut s = mount(&[("data-grid-size", "10"), ("data-stitch-type", "square")]);
    s.start_painting();

    // Diagonal stroke in color 2.
    s.set_selected_color(2);
    for i in 0..4 {
        s.paint(BeadId::Grid(i * 11));
    }
    assert!(s.commit());

    // Second stroke in color 5.
    s.set_selected_color(5);
    s.paint(BeadId::Grid(9));
    assert!(s.commit());

    let legend = s.legend();
    assert_eq!(legend.len(), 2);
    assert_eq!(legend[0].color_id, 2);
    assert_eq!(legend[0].count, 4);
    assert_eq!(legend[1].count, 1);

    // Move the diagonal one column to the right.
    s.set_tool(ToolMode::Selection);
    s.select_rect(0, 33);
    s.set_move_offset(MoveOffset::new(1, 0));
    assert_eq!(s.move_preview().len(), 4);
    assert!(s.apply_move());
    for i in 0..4 {
        assert_eq!(s.canvas().get(BeadId::Grid(i * 11 + 1)), Some(2));
    }
    assert_eq!(s.history().len(), 3);

    // Walk all the way back and forward again.
    let after_move = s.canvas().clone();
    while s.undo() {}
    assert!(s.canvas().is_empty());
    while s.redo() {}
    assert_eq!(*s.canvas(), after_move);
}

#[test]
fn history_is_capped_but_keeps_latest_state() {
    let mut s = mount(&[("data-grid-size", "20"), ("data-stitch-type", "square")]);
    for i in 0..(MAX_HISTORY + 20) {
        s.paint(BeadId::Grid(i));
        assert!(s.commit());
    }
    // Commit 101 folded the oldest 50 steps into the base.
    assert_eq!(s.history().len(), MAX_HISTORY + 20 - MAX_HISTORY / 2);
    assert_eq!(s.canvas().len(), MAX_HISTORY + 20);

    let latest = s.canvas().clone();
    let mut undone = 0;
    while s.undo() {
        undone += 1;
    }
    assert_eq!(undone, s.history().len());
    // The folded steps cannot be undone.
    assert_eq!(s.canvas().len(), MAX_HISTORY / 2);
    while s.redo() {}
    assert_eq!(*s.canvas(), latest);
}

#[test]
fn new_commit_after_undo_drops_redo() {
    let mut s = mount(&[("data-grid-size", "5")]);
    s.paint(BeadId::Grid(0));
    s.commit();
    s.paint(BeadId::Grid(1));
    s.commit();
    s.undo();
    assert!(s.can_redo());
    s.paint(BeadId::Grid(2));
    s.commit();
    assert!(!s.can_redo());
    assert!(s.canvas().contains(BeadId::Grid(2)));
    assert!(!s.canvas().contains(BeadId::Grid(1)));
}

#[test]
fn sessions_are_independent() {
    let mut a = mount(&[("data-grid-size", "8")]);
    let b = mount(&[("data-grid-size", "8")]);
    a.paint(BeadId::Grid(3));
    a.commit();
    a.view_mut().zoom_in();
    assert!(b.canvas().is_empty());
    assert!(!b.can_undo());
    assert_eq!(b.view().zoom(), 1.0);
}

#[test]
fn mount_defaults() {
    let s = mount(&[]);
    assert_eq!(s.config().grid_size, 20);
    assert_eq!(s.config().stitch, StitchType::Peyote);
    assert_eq!(s.config().rotation, Rotation::Deg90);
    assert_eq!(s.palette().len(), 12);
    assert!(s.layout().fringe().is_empty());
}

#[test]
fn brick_fringe_follows_reconfiguration() {
    let mut s = mount(&[
        ("data-grid-size", "6"),
        ("data-stitch-type", "brick"),
        ("data-fringe-visible", "true"),
        ("data-fringe-length", "4"),
    ]);
    assert_eq!(s.layout().fringe().len(), 6 * 4);

    // Fringe ids run across strands, so the highest id disappears first.
    let last = s.layout().fringe()[6 * 4 - 1].id;
    assert!(s.paint(last));
    assert_eq!(s.fringe_colors().len(), 1);

    // Shorter strands lose that bead and its color.
    let mut config = s.config().clone();
    config.fringe.length = 2;
    s.reconfigure(config).unwrap();
    assert_eq!(s.layout().fringe().len(), 6 * 2);
    assert!(s.fringe_colors().is_empty());
}

#[test]
fn reconfigure_is_announced() {
    let mut s = mount(&[("data-grid-size", "6")]);
    let seen = std::rc::Rc::new(std::cell::Cell::new(None));
    {
        let seen = std::rc::Rc::clone(&seen);
        s.subscribe(move |e| seen.set(Some(e.kind)));
    }
    let config = EditorConfig {
        stitch: StitchType::Raw,
        ..s.config().clone()
    };
    s.reconfigure(config).unwrap();
    assert_eq!(seen.get(), Some(EventKind::Reconfigured));
    assert_eq!(s.layout().beads().len(), 2 * 6 * 7);
}
