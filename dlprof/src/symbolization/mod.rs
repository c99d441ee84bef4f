//! # Address Symbolization
//!
//! Turns raw command-list addresses into readable names. Three sources are
//! combined, highest priority first:
//!
//! 1. **Memory overlay** ([`MemoryOverlay`]) - runtime `addr ... -> name`
//!    directives from the trace, snapshotted per batch
//! 2. **Symbol table** ([`SymbolTable`]) - the static linker symbol dump
//! 3. **Raw hex** - `0x%08x` when neither knows the address
//!
//! ## Synthesized Labels
//!
//! Calls into runtime-built lists have no symbol. After segmentation, each
//! batch's top-level anonymous calls are labelled with the `+`-joined names of
//! the named lists they reach (see [`label_anonymous_calls`]):
//!
//! ```text
//! dl d 0 0xde00000006000000        <- anonymous, becomes "wall_dl+floor_dl"
//! dl d 1 0xde00000080100100        <- wall_dl
//! dl d 1 0xde00000007000000        <- anonymous, entered
//! dl d 2 0xde00000080100200        <- floor_dl
//! ```

pub mod overlay;
pub mod resolver;
pub mod symbol_table;

pub use overlay::MemoryOverlay;
pub use resolver::{label_anonymous_calls, AddressNamer};
pub use symbol_table::SymbolTable;
