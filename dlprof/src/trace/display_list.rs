//! Nested command-list reconstruction
//!
//! The producer dumps every command list it walks as `dl d <depth> <words>`
//! directives, descending into each nested-list call before continuing with
//! the caller. [`ListBuilder`] replays those directives against a stack of
//! open lists and records the resulting tree in a [`ListArena`].
//!
//! The arena owns every node and every list; nodes refer to their child list
//! by [`ListId`], so the tree has no recursive ownership and batches can hold
//! a root id that stays valid for the whole run.

use super::classifier::{CommandWords, ListDirective};
use crate::domain::ListError;

/// Index of a command list in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(usize);

/// Index of a command node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One command of a reconstructed list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub command: CommandWords,
    /// Callee list, present only for nested-list calls
    pub child: Option<ListId>,
}

/// Storage for all reconstructed lists and their nodes
#[derive(Debug, Default)]
pub struct ListArena {
    nodes: Vec<ListNode>,
    lists: Vec<Vec<NodeId>>,
}

impl ListArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an empty list
    pub fn new_list(&mut self) -> ListId {
        self.lists.push(Vec::new());
        ListId(self.lists.len() - 1)
    }

    /// Append a node to the end of `list`
    pub fn push_node(&mut self, list: ListId, node: ListNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.lists[list.0].push(id);
        id
    }

    /// Nodes of `list` in execution order
    pub fn list(&self, list: ListId) -> impl Iterator<Item = &ListNode> + '_ {
        self.lists[list.0].iter().map(|id| &self.nodes[id.0])
    }

    #[must_use]
    pub fn list_len(&self, list: ListId) -> usize {
        self.lists[list.0].len()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Stack-based builder turning list directives into a tree
///
/// `stack[d]` is the list currently open at depth `d`. The depth-0 list is
/// opened lazily by the first depth-0 directive seen while nothing is open,
/// so each dumped frame gets its own root.
#[derive(Debug, Default)]
pub struct ListBuilder {
    arena: ListArena,
    stack: Vec<ListId>,
    root: Option<ListId>,
}

impl ListBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one directive
    ///
    /// # Errors
    /// Returns [`ListError::Malformed`] when no list is open at the directive's
    /// depth; the directive is dropped and the tree is left unchanged.
    pub fn apply(&mut self, directive: &ListDirective) -> Result<(), ListError> {
        let depth = directive.depth;

        if self.stack.is_empty() && depth == 0 {
            let root = self.arena.new_list();
            self.root = Some(root);
            self.stack.push(root);
        }

        let Some(&current) = self.stack.get(depth) else {
            return Err(ListError::Malformed { depth, open: self.stack.len() });
        };

        let command = directive.command;
        let child = command.opcode.is_call().then(|| self.arena.new_list());
        self.arena.push_node(current, ListNode { command, child });

        if let Some(child) = child {
            self.stack.truncate(depth + 1);
            self.stack.push(child);
        } else if command.opcode.is_terminate() {
            self.stack.truncate(depth);
        }

        Ok(())
    }

    /// Depth-0 list most recently opened
    #[must_use]
    pub fn current_root(&self) -> Option<ListId> {
        self.root
    }

    /// Number of lists currently open
    #[must_use]
    pub fn open_depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn arena(&self) -> &ListArena {
        &self.arena
    }

    #[must_use]
    pub fn into_arena(self) -> ListArena {
        self.arena
    }
}
