//! Runtime address overlay
//!
//! The producer announces relocated or dynamically loaded lists with
//! `addr <address> -> <name>` and forgets them all with `addr clearall`.
//! Batches take a deep copy when they open, so later directives never change
//! the names of an earlier batch.

use crate::domain::Address;
use std::collections::HashMap;

/// Mutable address → name mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryOverlay {
    names: HashMap<Address, String>,
}

impl MemoryOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, address: Address, name: impl Into<String>) {
        self.names.insert(address, name.into());
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    #[must_use]
    pub fn get(&self, address: Address) -> Option<&str> {
        self.names.get(&address).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
