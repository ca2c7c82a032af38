//! Outbound e-mail collaborator.

use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

const BOUNDARY: &str = "temperature-pi-alternative";

/// A message with plain-text and HTML bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl MailMessage {
    /// Render as an RFC 5322 `multipart/alternative` message.
    pub fn to_rfc5322(&self) -> String {
        format!(
            "From: {from}\r\n\
             To: {to}\r\n\
             Subject: {subject}\r\n\
             Date: {date}\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: multipart/alternative; boundary=\"{b}\"\r\n\
             \r\n\
             --{b}\r\n\
             Content-Type: text/plain; charset=UTF-8\r\n\
             \r\n\
             {text}\r\n\
             --{b}\r\n\
             Content-Type: text/html; charset=UTF-8\r\n\
             \r\n\
             {html}\r\n\
             --{b}--\r\n",
            from = self.from,
            to = self.to,
            subject = self.subject,
            date = Utc::now().to_rfc2822(),
            b = BOUNDARY,
            text = self.text,
            html = self.html,
        )
    }
}

/// Anything that can deliver a [`MailMessage`].
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<()>;
}

/// Delivers through a local sendmail-compatible binary (`sendmail -t -i`).
#[derive(Debug, Clone)]
pub struct SendmailMailer {
    program: PathBuf,
}

impl SendmailMailer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Mailer for SendmailMailer {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        let mut child = Command::new(&self.program)
            .arg("-t")
            .arg("-i")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| {
                Error::mail_error(format!("Failed to start {}: {}", self.program.display(), e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(message.to_rfc5322().as_bytes()).await?;
            // Closing stdin lets sendmail finish reading the message.
            drop(stdin);
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(Error::mail_error(format!(
                "{} exited with {}",
                self.program.display(),
                status
            )));
        }

        info!("Sent \"{}\" to {}", message.subject, message.to);
        Ok(())
    }
}

/// Logs messages instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        info!(
            "Mail to {} (\"{}\"): {}",
            message.to, message.subject, message.text
        );
        debug!("HTML body: {}", message.html);
        Ok(())
    }
}
