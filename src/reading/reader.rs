//! Serial line reader: turns newline-delimited JSON from the microcontroller
//! into snapshot updates.

use crate::error::{Error, Result};
use crate::reading::{
    data::{SerialRecord, TemperatureSnapshot},
    persist::FilePersister,
    store::SnapshotWriter,
};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, info, warn};

/// Serial device settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyACM0`
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: crate::DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: crate::DEFAULT_BAUD_RATE,
        }
    }
}

impl SerialConfig {
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
        }
    }

    /// Open the device for async reads.
    pub fn open(&self) -> Result<SerialStream> {
        let stream = tokio_serial::new(&self.port, self.baud_rate)
            .open_native_async()
            .map_err(|e| {
                Error::serial_error(format!("Failed to open {}: {}", self.port, e))
            })?;
        info!("Opened serial port {} at {} baud", self.port, self.baud_rate);
        Ok(stream)
    }
}

/// Owns the snapshot writer and applies each received line to it.
pub struct SerialLineReader {
    writer: SnapshotWriter,
    persister: FilePersister,
}

impl SerialLineReader {
    pub fn new(writer: SnapshotWriter, persister: FilePersister) -> Self {
        Self { writer, persister }
    }

    /// Apply one line.
    ///
    /// On a valid record the snapshot is replaced and a file write is started;
    /// its handle is returned. Anything else is logged and leaves the snapshot
    /// untouched.
    pub fn handle_line(&self, line: &str) -> Option<JoinHandle<()>> {
        match SerialRecord::parse(line) {
            Ok(record) => {
                debug!("Temperature reading: {}F", record.temp_f);
                self.writer.update(TemperatureSnapshot::now(record.temp_f));
                Some(self.persister.persist(record.temp_f))
            }
            Err(e) => {
                warn!("Ignoring serial line {:?}: {}", line.trim_end(), e);
                None
            }
        }
    }

    /// Read lines until the source ends.
    ///
    /// Read errors are returned to the caller. Invalid UTF-8 is replaced
    /// rather than treated as fatal; such a line then fails to parse.
    pub async fn run<R>(&self, mut source: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            if source.read_until(b'\n', &mut buffer).await? == 0 {
                info!("Serial input ended");
                return Ok(());
            }
            let line = String::from_utf8_lossy(&buffer);
            // Pending writes are not awaited; the next line may overtake them.
            let _ = self.handle_line(&line);
        }
    }

    /// Latest snapshot as seen by this reader.
    pub fn current(&self) -> TemperatureSnapshot {
        self.writer.current()
    }
}
