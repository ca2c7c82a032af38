//! Temperature readings from the microcontroller.
//!
//! This module covers the path from the serial port to the latest-value
//! snapshot: line parsing, the single-writer snapshot store, and the
//! best-effort `temperature.json` file.

pub mod data;
pub mod persist;
pub mod reader;
pub mod store;

// Re-export commonly used items
pub use data::{SerialRecord, TemperatureSnapshot};
pub use persist::FilePersister;
pub use reader::{SerialConfig, SerialLineReader};
pub use store::{snapshot_store, SnapshotReader, SnapshotWriter};
