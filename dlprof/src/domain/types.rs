//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep command-list addresses, opcodes and slot indices
//! from being mixed up, and give each its trace-native display form.

use std::fmt;

/// Command-list address (low 32 bits)
///
/// Keys both the symbol table and the memory overlay. Symbol dumps carry
/// 64-bit addresses whose high half is a constant base, so only the low half
/// is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub u32);

impl Address {
    /// Keep the low 32 bits of a full 64-bit symbol address
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_symbol_address(addr: u64) -> Self {
        Address(addr as u32)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Command opcode (top byte of the first command word)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(pub u8);

impl Opcode {
    /// Returns true for a nested-list call
    #[must_use]
    pub fn is_call(self) -> bool {
        self.0 == dlprof_common::G_DL
    }

    /// Returns true for a terminate/return marker
    #[must_use]
    pub fn is_terminate(self) -> bool {
        self.0 == dlprof_common::G_ENDDL
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

/// Position of a command within one traced command-list pass
///
/// Slot 0 is the first command of a frame; a reset to 0 marks a new batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub usize);

impl SlotIndex {
    /// Returns true for the first slot of a pass
    #[must_use]
    pub fn is_first(self) -> bool {
        self.0 == 0
    }

    /// The slot immediately after this one
    #[must_use]
    pub fn next(self) -> Self {
        SlotIndex(self.0 + 1)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display_is_eight_hex_digits() {
        assert_eq!(Address(0x1234).to_string(), "0x00001234");
    }

    #[test]
    fn test_symbol_address_keeps_low_half() {
        let addr = Address::from_symbol_address(0xffff_ffff_8012_3450);
        assert_eq!(addr, Address(0x8012_3450));
    }

    #[test]
    fn test_opcode_kinds() {
        assert!(Opcode(0xde).is_call());
        assert!(Opcode(0xdf).is_terminate());
        assert!(!Opcode(0xf6).is_call());
    }
}
