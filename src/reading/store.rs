//! Single-writer store for the latest temperature snapshot.
//!
//! The serial reader owns the only [`SnapshotWriter`]. The router and the
//! notifier each hold a [`SnapshotReader`] and copy the current value out
//! whenever they need it.

use crate::reading::data::TemperatureSnapshot;
use tokio::sync::watch;

/// Create a store holding the start-up sentinel snapshot.
pub fn snapshot_store() -> (SnapshotWriter, SnapshotReader) {
    let (tx, rx) = watch::channel(TemperatureSnapshot::default());
    (SnapshotWriter { tx }, SnapshotReader { rx })
}

/// Write side of the store. Not cloneable.
#[derive(Debug)]
pub struct SnapshotWriter {
    tx: watch::Sender<TemperatureSnapshot>,
}

impl SnapshotWriter {
    /// Replace the stored snapshot.
    ///
    /// The temperature is always taken. If the clock stepped back, the stored
    /// `observed_at` is kept so that it never goes backwards.
    pub fn update(&self, snapshot: TemperatureSnapshot) {
        self.tx.send_modify(|current| {
            *current = TemperatureSnapshot {
                temperature_f: snapshot.temperature_f,
                observed_at: snapshot.observed_at.max(current.observed_at),
            };
        });
    }

    /// A new reader attached to this store.
    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader {
            rx: self.tx.subscribe(),
        }
    }

    pub fn current(&self) -> TemperatureSnapshot {
        *self.tx.borrow()
    }
}

/// Read side of the store.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<TemperatureSnapshot>,
}

impl SnapshotReader {
    /// Copy of the latest snapshot.
    pub fn current(&self) -> TemperatureSnapshot {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fresh_store_holds_sentinel() {
        let (_writer, reader) = snapshot_store();
        assert_eq!(reader.current(), TemperatureSnapshot::default());
    }

    #[test]
    fn test_update_visible_to_all_readers() {
        let (writer, reader) = snapshot_store();
        let other = reader.clone();
        let late = writer.reader();

        writer.update(TemperatureSnapshot::now(70.5));

        assert_eq!(reader.current().temperature_f, 70.5);
        assert_eq!(other.current().temperature_f, 70.5);
        assert_eq!(late.current().temperature_f, 70.5);
    }

    #[test]
    fn test_back_dated_reading_is_kept_with_clamped_time() {
        let (writer, reader) = snapshot_store();
        let newer = TemperatureSnapshot::now(71.0);
        let older = TemperatureSnapshot {
            temperature_f: 60.0,
            observed_at: newer.observed_at - Duration::seconds(1),
        };

        writer.update(newer);
        writer.update(older);

        let current = reader.current();
        assert_eq!(current.temperature_f, 60.0);
        assert_eq!(current.observed_at, newer.observed_at);
    }

    #[test]
    fn test_later_reading_advances_time() {
        let (writer, reader) = snapshot_store();
        let first = TemperatureSnapshot::now(71.0);
        let second = TemperatureSnapshot {
            temperature_f: 72.0,
            observed_at: first.observed_at + Duration::seconds(30),
        };

        writer.update(first);
        writer.update(second);

        assert_eq!(reader.current(), second);
    }
}
