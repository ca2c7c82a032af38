//! Periodic e-mail status notifications.

pub mod mail;

pub use mail::{LogMailer, MailMessage, Mailer, SendmailMailer};

use crate::error::Result;
use crate::reading::{SnapshotReader, TemperatureSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant};
use tokio_stream::{wrappers::IntervalStream, StreamExt};
use tracing::{debug, info};

/// Who gets the status mail, and how often.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Time between two status mails
    pub interval: Duration,
    pub from: String,
    pub to: String,
    pub subject: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(crate::DEFAULT_EMAIL_INTERVAL_SECS),
            from: "temperature-pi@localhost".to_string(),
            to: "root@localhost".to_string(),
            subject: "Beer Status".to_string(),
        }
    }
}

/// Sends the current temperature by mail on a fixed interval.
pub struct PeriodicNotifier {
    config: NotifierConfig,
    reader: SnapshotReader,
    mailer: Arc<dyn Mailer>,
}

impl PeriodicNotifier {
    pub fn new(config: NotifierConfig, reader: SnapshotReader, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config,
            reader,
            mailer,
        }
    }

    /// The status mail for a snapshot, or `None` before the first reading.
    pub fn compose(&self, snapshot: &TemperatureSnapshot) -> Option<MailMessage> {
        if !snapshot.has_reading() {
            return None;
        }
        let value = snapshot.temperature_f;
        Some(MailMessage {
            from: self.config.from.clone(),
            to: self.config.to.clone(),
            subject: self.config.subject.clone(),
            text: format!("Current Temperature is: {}F", value),
            html: format!("Current Temperature <br /> {}F", value),
        })
    }

    /// Send one status mail for the current snapshot.
    ///
    /// Returns whether a mail was sent.
    pub async fn notify_once(&self) -> Result<bool> {
        let snapshot = self.reader.current();
        match self.compose(&snapshot) {
            Some(message) => {
                self.mailer.send(&message).await?;
                Ok(true)
            }
            None => {
                debug!("No temperature reading yet, skipping status mail");
                Ok(false)
            }
        }
    }

    /// Run forever. The first mail goes out one interval after start.
    ///
    /// A delivery failure ends the loop with that error.
    pub async fn run(self) -> Result<()> {
        let period = self.config.interval;
        info!("Sending status mail to {} every {:?}", self.config.to, period);

        let mut ticks = IntervalStream::new(time::interval_at(Instant::now() + period, period));
        while ticks.next().await.is_some() {
            self.notify_once().await?;
        }
        Ok(())
    }
}
