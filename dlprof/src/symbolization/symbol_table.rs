//! Static symbol table loaded from a linker symbol dump

use crate::domain::{Address, AnalyzerError};
use crate::trace::{classify_line, LineKind};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read-only map from address to linker symbol name(s)
///
/// Several symbols may alias one address; their names are kept comma-joined
/// in the order the dump lists them.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: HashMap<Address, String>,
}

impl SymbolTable {
    /// Load a symbol dump from disk, replacing invalid UTF-8
    ///
    /// # Errors
    /// Returns [`AnalyzerError::SymbolsRead`] if the file cannot be read
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|source| AnalyzerError::SymbolsRead { path: path.to_path_buf(), source })?;
        let table = Self::parse(&String::from_utf8_lossy(&bytes));
        debug!("Loaded {} symbol addresses from {}", table.len(), path.display());
        Ok(table)
    }

    /// Build a table from dump text, one `0x<16hex> <name>` entry per line
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut table = Self::default();
        for line in text.lines() {
            if let LineKind::SymbolEntry { address, name } = classify_line(line) {
                table.insert(address, &name);
            }
        }
        table
    }

    fn insert(&mut self, address: Address, name: &str) {
        self.names
            .entry(address)
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(name);
            })
            .or_insert_with(|| name.to_string());
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
