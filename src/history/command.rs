//! Reversible arena commands
//!
//! Each variant carries its arguments plus whatever the arena handed back on
//! execution (`RemovedNode` / `RemovedEdge` payloads, assigned indices), which
//! is exactly what `undo` needs. Undo restores elements to their original
//! slots, so indices captured by earlier commands stay valid as long as the
//! history is replayed in strict LIFO order.

use crate::graph::{
    EdgeIndex, GraphArena, GraphError, GraphResult, NodeIndex, Point, RemovedEdge, RemovedNode,
};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddNode {
        position: Point,
        /// Index assigned by the last execution
        index: Option<NodeIndex>,
    },
    RemoveNode {
        index: NodeIndex,
        removed: Option<RemovedNode>,
    },
    MoveNode {
        index: NodeIndex,
        /// Position restored on undo; read from the arena on first execution
        /// when not supplied
        from: Option<Point>,
        to: Point,
    },
    AddEdge {
        source: NodeIndex,
        target: NodeIndex,
        index: Option<EdgeIndex>,
    },
    RemoveEdge {
        index: EdgeIndex,
        removed: Option<RemovedEdge>,
    },
    /// Edge removals (descending edge index) followed by node removals
    /// (descending node index); undone in exact reverse.
    BatchDelete { steps: Vec<Command> },
}

impl Command {
    pub fn add_node(x: f32, y: f32) -> Self {
        Command::AddNode {
            position: Point::new(x, y),
            index: None,
        }
    }

    pub fn remove_node(index: NodeIndex) -> Self {
        Command::RemoveNode {
            index,
            removed: None,
        }
    }

    /// Move `index` to `(x, y)`; the current position is captured on
    /// execution and restored on undo.
    pub fn move_node(index: NodeIndex, x: f32, y: f32) -> Self {
        Command::MoveNode {
            index,
            from: None,
            to: Point::new(x, y),
        }
    }

    /// Move `index` from `from` to `to` for a node that has already been
    /// moved live, e.g. at the end of a drag that started at `from`.
    pub fn move_node_from(index: NodeIndex, from: Point, to: Point) -> Self {
        Command::MoveNode {
            index,
            from: Some(from),
            to,
        }
    }

    pub fn add_edge(source: NodeIndex, target: NodeIndex) -> Self {
        Command::AddEdge {
            source,
            target,
            index: None,
        }
    }

    pub fn remove_edge(index: EdgeIndex) -> Self {
        Command::RemoveEdge {
            index,
            removed: None,
        }
    }

    /// Delete a set of nodes and edges together.
    ///
    /// Edges go first because node removal cascades into edge removal and
    /// would otherwise shift the requested edge indices. Duplicate indices
    /// are collapsed.
    pub fn batch_delete(
        nodes: impl IntoIterator<Item = NodeIndex>,
        edges: impl IntoIterator<Item = EdgeIndex>,
    ) -> Self {
        let mut nodes: Vec<NodeIndex> = nodes.into_iter().collect();
        let mut edges: Vec<EdgeIndex> = edges.into_iter().collect();
        nodes.sort_unstable_by(|a, b| b.cmp(a));
        nodes.dedup();
        edges.sort_unstable_by(|a, b| b.cmp(a));
        edges.dedup();

        let steps = edges
            .into_iter()
            .map(Command::remove_edge)
            .chain(nodes.into_iter().map(Command::remove_node))
            .collect();
        Command::BatchDelete { steps }
    }

    /// True for a batch with nothing in it
    pub fn is_empty_batch(&self) -> bool {
        matches!(self, Command::BatchDelete { steps } if steps.is_empty())
    }

    /// Point a `MoveNode` at a new destination without applying it.
    /// Returns false for any other variant.
    pub fn retarget(&mut self, x: f32, y: f32) -> bool {
        match self {
            Command::MoveNode { to, .. } => {
                *to = Point::new(x, y);
                true
            }
            _ => false,
        }
    }

    /// Apply the command. On failure the arena is left as it was.
    pub fn execute(&mut self, arena: &mut GraphArena) -> GraphResult<()> {
        match self {
            Command::AddNode { position, index } => {
                *index = Some(arena.add_node(position.x, position.y));
            }
            Command::RemoveNode { index, removed } => {
                *removed = Some(arena.remove_node(*index)?);
            }
            Command::MoveNode { index, from, to } => {
                let current = arena.node_position(*index);
                arena.update_node(*index, to.x, to.y)?;
                if from.is_none() {
                    *from = current;
                }
            }
            Command::AddEdge {
                source,
                target,
                index,
            } => {
                *index = Some(arena.add_edge(*source, *target)?);
            }
            Command::RemoveEdge { index, removed } => {
                *removed = Some(arena.remove_edge(*index)?);
            }
            Command::BatchDelete { steps } => {
                for done in 0..steps.len() {
                    if let Err(e) = steps[done].execute(arena) {
                        rollback(&mut steps[..done], arena);
                        return Err(e);
                    }
                }
            }
        }
        Ok(())
    }

    /// Reverse a previous `execute`
    pub fn undo(&mut self, arena: &mut GraphArena) -> GraphResult<()> {
        let not_executed = GraphError::NotExecuted(self.name());
        match self {
            Command::AddNode { index, .. } => {
                let idx = index.ok_or(not_executed)?;
                arena.remove_node(idx)?;
                *index = None;
            }
            Command::RemoveNode { removed, .. } => {
                let payload = removed.as_ref().ok_or(not_executed)?;
                arena.restore_node(payload)?;
                *removed = None;
            }
            Command::MoveNode { index, from, .. } => {
                let from = from.ok_or(not_executed)?;
                arena.update_node(*index, from.x, from.y)?;
            }
            Command::AddEdge {
                source,
                target,
                index,
            } => {
                let recorded = index.filter(|&e| {
                    arena
                        .edge_endpoints(e)
                        .is_some_and(|(s, t)| same_pair((s, t), (*source, *target)))
                });
                let edge = recorded
                    .or_else(|| arena.find_edge(*source, *target))
                    .ok_or(not_executed)?;
                arena.remove_edge(edge)?;
                *index = None;
            }
            Command::RemoveEdge { removed, .. } => {
                let payload = removed.as_ref().ok_or(not_executed)?;
                arena.restore_edge(payload)?;
                *removed = None;
            }
            Command::BatchDelete { steps } => {
                let n = steps.len();
                for undone in 0..n {
                    let i = n - 1 - undone;
                    if let Err(e) = steps[i].undo(arena) {
                        // Re-apply what was already undone so the batch stays whole
                        for step in steps[i + 1..].iter_mut() {
                            if let Err(redo_err) = step.execute(arena) {
                                warn!("Batch re-apply failed after undo error: {}", redo_err);
                            }
                        }
                        return Err(e);
                    }
                }
            }
        }
        Ok(())
    }

    /// Short human-readable name for logs and UI menus
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddNode { .. } => "add node",
            Command::RemoveNode { .. } => "remove node",
            Command::MoveNode { .. } => "move node",
            Command::AddEdge { .. } => "add edge",
            Command::RemoveEdge { .. } => "remove edge",
            Command::BatchDelete { .. } => "delete selection",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddNode { position, .. } => write!(f, "add node at {}", position),
            Command::RemoveNode { index, .. } => write!(f, "remove node {}", index),
            Command::MoveNode {
                index,
                from: Some(from),
                to,
            } => write!(f, "move node {} from {} to {}", index, from, to),
            Command::MoveNode { index, to, .. } => write!(f, "move node {} to {}", index, to),
            Command::AddEdge { source, target, .. } => {
                write!(f, "add edge ({}, {})", source, target)
            }
            Command::RemoveEdge { index, .. } => write!(f, "remove edge {}", index),
            Command::BatchDelete { steps } => write!(f, "delete {} elements", steps.len()),
        }
    }
}

fn same_pair(a: (NodeIndex, NodeIndex), b: (NodeIndex, NodeIndex)) -> bool {
    a == b || (a.0 == b.1 && a.1 == b.0)
}

/// Undo already-executed batch steps, newest first
fn rollback(done: &mut [Command], arena: &mut GraphArena) {
    for step in done.iter_mut().rev() {
        if let Err(e) = step.undo(arena) {
            warn!("Batch rollback step '{}' failed: {}", step, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_delete_ordering() {
        let cmd = Command::batch_delete(vec![1, 4, 1, 2], vec![0, 3]);
        let Command::BatchDelete { steps } = cmd else {
            panic!("expected batch");
        };

        let order: Vec<String> = steps.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            order,
            vec![
                "remove edge 3",
                "remove edge 0",
                "remove node 4",
                "remove node 2",
                "remove node 1",
            ]
        );
    }

    #[test]
    fn test_add_node_round_trip() {
        let mut arena = GraphArena::new();
        let mut cmd = Command::add_node(1.0, 2.0);

        cmd.execute(&mut arena).unwrap();
        assert_eq!(arena.node_count(), 1);
        assert!(matches!(cmd, Command::AddNode { index: Some(0), .. }));

        cmd.undo(&mut arena).unwrap();
        assert_eq!(arena.node_count(), 0);
    }

    #[test]
    fn test_remove_node_restores_original_index() {
        let mut arena = GraphArena::new();
        arena.add_node(0.0, 0.0);
        arena.add_node(1.0, 0.0);
        arena.add_node(2.0, 0.0);
        arena.add_edge(0, 1).unwrap();
        arena.add_edge(1, 2).unwrap();

        let mut cmd = Command::remove_node(0);
        cmd.execute(&mut arena).unwrap();
        assert_eq!(arena.node_count(), 2);
        assert_eq!(arena.edge_count(), 1);

        cmd.undo(&mut arena).unwrap();
        assert_eq!(arena.node_position(0), Some(Point::new(0.0, 0.0)));
        assert_eq!(arena.node_position(2), Some(Point::new(2.0, 0.0)));
        assert!(arena.has_edge(0, 1));
        assert!(arena.has_edge(1, 2));
    }

    #[test]
    fn test_move_node_retarget() {
        let mut arena = GraphArena::new();
        arena.add_node(0.0, 0.0);
        let mut cmd = Command::move_node_from(0, Point::new(0.0, 0.0), Point::new(1.0, 1.0));

        assert!(cmd.retarget(4.0, 5.0));
        cmd.execute(&mut arena).unwrap();
        assert_eq!(arena.node_position(0), Some(Point::new(4.0, 5.0)));

        cmd.undo(&mut arena).unwrap();
        assert_eq!(arena.node_position(0), Some(Point::new(0.0, 0.0)));
        assert!(!Command::add_node(0.0, 0.0).retarget(1.0, 1.0));
    }

    #[test]
    fn test_move_node_captures_start_position() {
        let mut arena = GraphArena::new();
        arena.add_node(3.0, 4.0);
        let mut cmd = Command::move_node(0, 7.0, 8.0);
        assert_eq!(
            cmd.undo(&mut arena),
            Err(GraphError::NotExecuted("move node"))
        );

        cmd.execute(&mut arena).unwrap();
        assert_eq!(arena.node_position(0), Some(Point::new(7.0, 8.0)));
        assert_eq!(cmd.to_string(), "move node 0 from (3, 4) to (7, 8)");

        cmd.undo(&mut arena).unwrap();
        assert_eq!(arena.node_position(0), Some(Point::new(3.0, 4.0)));

        // A failed move captures nothing
        let mut missing = Command::move_node(5, 1.0, 1.0);
        assert!(missing.execute(&mut arena).is_err());
        assert!(matches!(missing, Command::MoveNode { from: None, .. }));
    }

    #[test]
    fn test_empty_batch() {
        assert!(Command::batch_delete(vec![], vec![]).is_empty_batch());
        assert!(!Command::batch_delete(vec![0], vec![]).is_empty_batch());
        assert!(!Command::add_node(0.0, 0.0).is_empty_batch());
    }

    #[test]
    fn test_add_edge_failure_leaves_command_unexecuted() {
        let mut arena = GraphArena::new();
        arena.add_node(0.0, 0.0);
        let mut cmd = Command::add_edge(0, 0);

        assert_eq!(cmd.execute(&mut arena), Err(GraphError::SelfLoop(0)));
        assert!(matches!(cmd, Command::AddEdge { index: None, .. }));
        assert_eq!(arena.edge_count(), 0);
    }

    #[test]
    fn test_batch_rolls_back_on_failure() {
        let mut arena = GraphArena::new();
        arena.add_node(0.0, 0.0);
        arena.add_node(1.0, 0.0);
        arena.add_edge(0, 1).unwrap();
        let edges_before: Vec<_> = arena.edges().collect();

        // Node 7 does not exist; the edge removal that ran before it is undone
        let mut cmd = Command::batch_delete(vec![1, 7], vec![0]);
        assert!(cmd.execute(&mut arena).is_err());

        assert_eq!(arena.node_count(), 2);
        assert_eq!(arena.edges().collect::<Vec<_>>(), edges_before);
    }

    #[test]
    fn test_undo_before_execute() {
        let mut arena = GraphArena::new();
        let mut cmd = Command::remove_node(0);
        assert_eq!(
            cmd.undo(&mut arena),
            Err(GraphError::NotExecuted("remove node"))
        );
    }

    #[test]
    fn test_display() {
        let cmd = Command::move_node_from(3, Point::new(0.0, 0.0), Point::new(1.0, 2.0));
        assert_eq!(cmd.to_string(), "move node 3 from (0, 0) to (1, 2)");
        assert_eq!(cmd.name(), "move node");
        assert_eq!(Command::move_node(3, 1.0, 2.0).to_string(), "move node 3 to (1, 2)");
    }
}
