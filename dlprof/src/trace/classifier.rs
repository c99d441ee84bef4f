//! Line classification for trace and symbol-dump files
//!
//! Every line is matched against a fixed set of field-width patterns and turned
//! into a single [`LineKind`]. Patterns are unanchored: the producer prefixes
//! its messages with transport noise, so a shape is recognised anywhere in the
//! line. Classification is first-match in this order:
//!
//! 1. Timing sample    `<slot>/<total> 0x<2hex><6hex><8hex> ms <float>`
//! 2. Overlay set      `addr 0x<8hex> -> <name>`
//! 3. Overlay clear    `addr clearall`
//! 4. List directive   `dl d <depth> 0x<2hex><6hex><8hex>`
//! 5. Symbol entry     `0x<16hex> <name>`
//!
//! Anything else is [`LineKind::Unmatched`]. Symbol entries are checked last
//! because a timing sample also contains 16 hex digits followed by a word.

use crate::domain::{Address, Opcode, SlotIndex};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Both command words of one traced command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandWords {
    pub opcode: Opcode,
    /// Low 24 bits of the first word
    pub word0: u32,
    pub word1: u32,
}

impl CommandWords {
    /// `word1` read as an address (callee of a nested-list call)
    #[must_use]
    pub fn target(&self) -> Address {
        Address(self.word1)
    }
}

/// One timed execution of a command slot
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSample {
    pub slot: SlotIndex,
    pub slots_in_pass: usize,
    pub command: CommandWords,
    pub start_ms: f64,
}

/// One command of the display-list dump at a nesting depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDirective {
    pub depth: usize,
    pub command: CommandWords,
}

/// Result of classifying one line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Sample(TimingSample),
    SymbolEntry { address: Address, name: String },
    OverlaySet { address: Address, name: String },
    OverlayClear,
    ListDirective(ListDirective),
    Unmatched,
}

fn sample_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+)/(\d+) 0x([a-f0-9]{2})([a-f0-9]{6})([a-f0-9]{8}) ms (\d+\.\d+)")
            .expect("sample pattern is valid")
    })
}

fn overlay_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"addr 0x([a-f0-9]{8}) -> (\w+)").expect("overlay pattern is valid")
    })
}

fn list_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"dl d (\d+) 0x([a-f0-9]{2})([a-f0-9]{6})([a-f0-9]{8})")
            .expect("list pattern is valid")
    })
}

fn symbol_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"0x([a-f0-9]{16})\s+(\w+)").expect("symbol pattern is valid"))
}

const CLEAR_DIRECTIVE: &str = "addr clearall";

/// Classify a single line
///
/// Never fails: lines that match no shape (or whose numbers overflow) come
/// back as [`LineKind::Unmatched`].
#[must_use]
pub fn classify_line(line: &str) -> LineKind {
    if let Some(sample) = sample_pattern().captures(line).and_then(|c| parse_sample(&c)) {
        return LineKind::Sample(sample);
    }

    if let Some(caps) = overlay_pattern().captures(line) {
        if let Some(address) = hex_u32(&caps, 1) {
            return LineKind::OverlaySet { address: Address(address), name: caps[2].to_string() };
        }
    }

    if line.trim() == CLEAR_DIRECTIVE {
        return LineKind::OverlayClear;
    }

    if let Some(directive) = list_pattern().captures(line).and_then(|c| parse_directive(&c)) {
        return LineKind::ListDirective(directive);
    }

    if let Some(caps) = symbol_pattern().captures(line) {
        if let Ok(full) = u64::from_str_radix(&caps[1], 16) {
            return LineKind::SymbolEntry {
                address: Address::from_symbol_address(full),
                name: caps[2].to_string(),
            };
        }
    }

    LineKind::Unmatched
}

fn parse_sample(caps: &Captures<'_>) -> Option<TimingSample> {
    Some(TimingSample {
        slot: SlotIndex(caps[1].parse().ok()?),
        slots_in_pass: caps[2].parse().ok()?,
        command: command_words(caps, 3)?,
        start_ms: caps[6].parse().ok()?,
    })
}

fn parse_directive(caps: &Captures<'_>) -> Option<ListDirective> {
    Some(ListDirective { depth: caps[1].parse().ok()?, command: command_words(caps, 2)? })
}

/// Read opcode, word0 and word1 from three consecutive capture groups
fn command_words(caps: &Captures<'_>, first: usize) -> Option<CommandWords> {
    let opcode = u8::from_str_radix(&caps[first], 16).ok()?;
    Some(CommandWords {
        opcode: Opcode(opcode),
        word0: hex_u32(caps, first + 1)?,
        word1: hex_u32(caps, first + 2)?,
    })
}

fn hex_u32(caps: &Captures<'_>, group: usize) -> Option<u32> {
    u32::from_str_radix(&caps[group], 16).ok()
}
