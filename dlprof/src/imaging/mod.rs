//! Frame snapshots and the bitmap format they are stored in

pub mod bitmap;
pub mod frame_store;

pub use bitmap::{decode, encode, Frame};
pub use frame_store::{DirectoryFrameStore, FrameStore, InMemoryFrameStore, NoFrames};
