// mod.rs - Data structures module

pub mod location;
pub mod screen;
pub mod sequences;

// Re-export main types for convenience
pub use location::{location_table, split_location, Location, LocationRow};
pub use screen::{screen, ScreenReport, ShortSequence};
pub use sequences::{SequenceRecord, SequenceSet};
