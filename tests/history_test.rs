//! Integration tests for undo/redo
//!
//! Round trips through the command history must restore counts and
//! connectivity; strict LIFO replay restores exact indices.

use netarena::algo::compute_connected_components;
use netarena::graph::{GraphArena, Point, Selection};
use netarena::history::{Command, CommandHistory};

fn snapshot(arena: &GraphArena) -> (Vec<f32>, Vec<f32>, Vec<u32>, Vec<u32>) {
    (
        arena.xs().to_vec(),
        arena.ys().to_vec(),
        arena.sources().to_vec(),
        arena.targets().to_vec(),
    )
}

/// Sorted, orientation-free edge list expressed in node positions, so it can
/// be compared across index reassignment.
fn geometric_edges(arena: &GraphArena) -> Vec<(i32, i32, i32, i32)> {
    let mut edges: Vec<_> = arena
        .edges()
        .map(|(s, t)| {
            let a = arena.node_position(s).unwrap();
            let b = arena.node_position(t).unwrap();
            let a = (a.x as i32, a.y as i32);
            let b = (b.x as i32, b.y as i32);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            (lo.0, lo.1, hi.0, hi.1)
        })
        .collect();
    edges.sort();
    edges
}

fn sample_graph() -> GraphArena {
    let mut arena = GraphArena::new();
    for i in 0..6 {
        arena.add_node(i as f32 * 10.0, (i % 2) as f32 * 10.0);
    }
    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (1, 4)] {
        arena.add_edge(a, b).unwrap();
    }
    arena
}

#[test]
fn test_add_node_undo_restores_count() {
    let mut arena = sample_graph();
    let mut history = CommandHistory::new();
    let before = arena.node_count();

    history.execute(&mut arena, Command::add_node(7.0, 7.0)).unwrap();
    assert_eq!(arena.node_count(), before + 1);

    history.undo(&mut arena).unwrap();
    assert_eq!(arena.node_count(), before);
}

#[test]
fn test_batch_delete_round_trip() {
    let mut arena = GraphArena::new();
    let hub = arena.add_node(0.0, 0.0);
    let left = arena.add_node(-10.0, 0.0);
    let right = arena.add_node(10.0, 0.0);
    arena.add_edge(left, hub).unwrap();
    arena.add_edge(hub, right).unwrap();

    let mut history = CommandHistory::new();
    history
        .execute(&mut arena, Command::batch_delete(vec![hub], vec![]))
        .unwrap();
    assert_eq!(arena.node_count(), 2);
    assert_eq!(arena.edge_count(), 0);

    history.undo(&mut arena).unwrap();
    assert_eq!(arena.node_count(), 3);
    assert_eq!(arena.edge_count(), 2);
    assert_eq!(compute_connected_components(&arena).count(), 1);
    assert!(arena.has_edge(hub, left));
    assert!(arena.has_edge(hub, right));
}

#[test]
fn test_selection_batch_delete_undo_redo_is_exact() {
    let mut arena = sample_graph();
    let original = snapshot(&arena);
    let mut history = CommandHistory::new();

    let mut selection = Selection::new(&arena);
    selection.select_node(1);
    selection.select_node(4);
    selection.select_edge(2);
    selection.select_edge(5);

    history.execute(&mut arena, selection.to_batch_delete()).unwrap();
    assert!(selection.is_stale(&arena));
    assert_eq!(arena.node_count(), 4);
    let deleted = snapshot(&arena);
    let deleted_edges = geometric_edges(&arena);

    history.undo(&mut arena).unwrap();
    assert_eq!(snapshot(&arena), original);

    history.redo(&mut arena).unwrap();
    assert_eq!(snapshot(&arena), deleted);
    assert_eq!(geometric_edges(&arena), deleted_edges);
}

#[test]
fn test_interleaved_commands_unwind_exactly() {
    let mut arena = sample_graph();
    let original = snapshot(&arena);
    let mut history = CommandHistory::new();

    history.execute(&mut arena, Command::remove_node(0)).unwrap();
    history.execute(&mut arena, Command::add_node(3.0, 3.0)).unwrap();
    history.execute(&mut arena, Command::add_edge(5, 2)).unwrap();
    history.execute(&mut arena, Command::remove_node(2)).unwrap();
    history
        .execute(&mut arena, Command::move_node(1, -5.0, -5.0))
        .unwrap();
    history.execute(&mut arena, Command::remove_edge(0)).unwrap();

    let edited = snapshot(&arena);

    while history.undo(&mut arena).unwrap().is_some() {}
    assert_eq!(snapshot(&arena), original);

    while history.redo(&mut arena).unwrap().is_some() {}
    assert_eq!(snapshot(&arena), edited);
}

#[test]
fn test_history_depth_bound() {
    let mut arena = GraphArena::new();
    let mut history = CommandHistory::with_max_depth(10);

    for i in 0..25 {
        history
            .execute(&mut arena, Command::add_node(i as f32, 0.0))
            .unwrap();
    }

    assert_eq!(history.undo_len(), 10);
    assert!(history.can_undo());

    let mut undone = 0;
    while history.undo(&mut arena).unwrap().is_some() {
        undone += 1;
    }
    assert_eq!(undone, 10);
    assert_eq!(arena.node_count(), 15);
    assert!(!history.can_undo());
}

#[test]
fn test_drag_coalesces_into_one_command() {
    let mut arena = sample_graph();
    let mut history = CommandHistory::new();
    let start = arena.node_position(3).unwrap();

    history
        .execute(&mut arena, Command::move_node(3, 31.0, 11.0))
        .unwrap();
    for frame in 2..30 {
        let pos = Point::new(30.0 + frame as f32, 10.0 + frame as f32);
        assert!(history
            .retarget_last_move(&mut arena, 3, pos.x, pos.y)
            .unwrap());
    }

    assert_eq!(history.undo_len(), 1);
    assert_eq!(arena.node_position(3), Some(Point::new(59.0, 39.0)));

    history.undo(&mut arena).unwrap();
    assert_eq!(arena.node_position(3), Some(start));
}

#[test]
fn test_empty_selection_keeps_redo() {
    let mut arena = sample_graph();
    let mut history = CommandHistory::new();
    history.execute(&mut arena, Command::remove_edge(0)).unwrap();
    history.undo(&mut arena).unwrap();

    let selection = Selection::new(&arena);
    assert!(history
        .execute(&mut arena, selection.to_batch_delete())
        .unwrap()
        .is_none());
    assert!(history.can_redo());
    assert!(!history.can_undo());
}
