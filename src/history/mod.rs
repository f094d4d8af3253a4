//! Undo/redo history
//!
//! Bounded stack of executed [`Command`]s. Executing a new command clears the
//! redo path; exceeding the depth limit silently forgets the oldest entry.

pub mod command;

pub use command::Command;

use crate::config::{ArenaConfig, DEFAULT_MAX_HISTORY_DEPTH};
use crate::graph::{GraphArena, GraphResult, NodeIndex};
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CommandHistory {
    /// Oldest at the front, most recent at the back
    undo_stack: VecDeque<Command>,
    redo_stack: Vec<Command>,
    max_depth: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_HISTORY_DEPTH)
    }

    /// History keeping at most `max_depth` undoable commands (at least one)
    pub fn with_max_depth(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        CommandHistory {
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    pub fn with_config(config: &ArenaConfig) -> Self {
        Self::with_max_depth(config.max_history_depth)
    }

    /// Run `command` and record it.
    ///
    /// A failed command is not recorded and leaves both stacks untouched. An
    /// empty batch changes nothing, so it is skipped and `Ok(None)` returned.
    pub fn execute(
        &mut self,
        arena: &mut GraphArena,
        mut command: Command,
    ) -> GraphResult<Option<&Command>> {
        if command.is_empty_batch() {
            debug!("Skipped empty batch");
            return Ok(None);
        }
        command.execute(arena)?;
        debug!("Executed: {}", command);

        self.redo_stack.clear();
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.max_depth {
            if let Some(dropped) = self.undo_stack.pop_front() {
                debug!("History full, forgetting: {}", dropped);
            }
        }

        Ok(self.undo_stack.back())
    }

    /// Reverse the most recent command.
    ///
    /// Returns `Ok(None)` when there is nothing to undo. If the command fails
    /// to reverse it stays on the undo stack.
    pub fn undo(&mut self, arena: &mut GraphArena) -> GraphResult<Option<&Command>> {
        let Some(mut command) = self.undo_stack.pop_back() else {
            return Ok(None);
        };

        if let Err(e) = command.undo(arena) {
            self.undo_stack.push_back(command);
            return Err(e);
        }
        debug!("Undid: {}", command);

        self.redo_stack.push(command);
        Ok(self.redo_stack.last())
    }

    /// Re-apply the most recently undone command.
    ///
    /// Returns `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self, arena: &mut GraphArena) -> GraphResult<Option<&Command>> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(None);
        };

        if let Err(e) = command.execute(arena) {
            self.redo_stack.push(command);
            return Err(e);
        }
        debug!("Redid: {}", command);

        self.undo_stack.push_back(command);
        Ok(self.undo_stack.back())
    }

    /// Coalesce a continuous drag into the `MoveNode` on top of the stack.
    ///
    /// If the most recent command moved `index`, its destination is updated
    /// and applied immediately; returns false (doing nothing) otherwise, in
    /// which case the caller should execute a fresh `MoveNode`.
    pub fn retarget_last_move(
        &mut self,
        arena: &mut GraphArena,
        index: NodeIndex,
        x: f32,
        y: f32,
    ) -> GraphResult<bool> {
        let Some(command) = self.undo_stack.back_mut() else {
            return Ok(false);
        };
        if !command_moves(command, index) {
            return Ok(false);
        }

        arena.update_node(index, x, y)?;
        command.retarget(x, y);
        self.redo_stack.clear();
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Command the next `undo` would reverse
    pub fn peek_undo(&self) -> Option<&Command> {
        self.undo_stack.back()
    }

    pub fn peek_redo(&self) -> Option<&Command> {
        self.redo_stack.last()
    }

    /// Forget everything, e.g. after a bulk reload replaced the arena
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn command_moves(command: &Command, node: NodeIndex) -> bool {
    matches!(command, Command::MoveNode { index, .. } if *index == node)
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}
