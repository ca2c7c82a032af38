//! # Temperature Pi - Serial Temperature Bridge
//!
//! Reads temperature readings that a microcontroller prints as one JSON
//! object per line over a serial port, keeps the latest one, writes it to
//! `temperature.json`, mails a status summary on a fixed interval, and serves
//! a colour-coded temperature page plus a flat directory of static files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use temperature_pi::{
//!     snapshot_store, start_web_server, FilePersister, SerialConfig, SerialLineReader, WebConfig,
//! };
//! use tokio::io::BufReader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (writer, reader) = snapshot_store();
//!     let serial = SerialConfig::default().open()?;
//!     let lines = SerialLineReader::new(writer, FilePersister::new("temperature.json"));
//!
//!     tokio::spawn(async move { lines.run(BufReader::new(serial)).await });
//!     start_web_server(WebConfig::default(), reader).await?;
//!     Ok(())
//! }
//! ```

pub mod colour;
pub mod error;
pub mod notify;
pub mod reading;
pub mod web;

// Re-export public API
pub use colour::{colour_for, Rgb};
pub use error::{Error, Result};
pub use notify::{
    LogMailer, MailMessage, Mailer, NotifierConfig, PeriodicNotifier, SendmailMailer,
};
pub use reading::{
    snapshot_store, FilePersister, SerialConfig, SerialLineReader, SerialRecord, SnapshotReader,
    SnapshotWriter, TemperatureSnapshot,
};
pub use web::{create_app, start_web_server, WebConfig};

/// The default web server port
pub const DEFAULT_WEB_PORT: u16 = 8080;

/// The default serial device of the microcontroller
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyACM0";

/// The default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// The default interval between status mails, in seconds
pub const DEFAULT_EMAIL_INTERVAL_SECS: u64 = 3600;

/// The default file the latest reading is written to
pub const DEFAULT_PERSIST_PATH: &str = "temperature.json";
