//! Trace parsing: line classification, list reconstruction and batching
//!
//! A trace is consumed in one forward pass:
//!
//! ```text
//! line ──► classify_line() ──► LineKind
//!                                ├─ Sample        ──► batch segmenter
//!                                ├─ OverlaySet    ──► MemoryOverlay
//!                                ├─ OverlayClear  ──► MemoryOverlay
//!                                ├─ ListDirective ──► ListBuilder
//!                                └─ other         ──► ignored
//! ```

pub mod classifier;
pub mod display_list;
pub mod scanner;

pub use classifier::{classify_line, CommandWords, LineKind, ListDirective, TimingSample};
pub use display_list::{ListArena, ListBuilder, ListId, ListNode, NodeId};
pub use scanner::{ProfileBatch, ScanStats, TraceScanner, TraceScan};
