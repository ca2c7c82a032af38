use std::sync::{Arc, Mutex};
use std::time::Duration;
use temperature_pi::{
    colour_for, snapshot_store, Error, FilePersister, MailMessage, Mailer, NotifierConfig,
    PeriodicNotifier, Rgb, SerialLineReader, TemperatureSnapshot, WebConfig,
};
use tokio_test::assert_ok;

fn temp_file(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("temperature_pi_unit_{}_{}", std::process::id(), name))
}

/// Everything at or below -25.5 is pure blue, everything above 38.25 pure red.
#[test]
fn test_colour_saturates_outside_bands() {
    let mut t = -25.5;
    while t > -200.0 {
        assert_eq!(colour_for(t), Rgb(0, 0, 255), "t = {}", t);
        t -= 3.7;
    }

    let mut t = 38.26;
    while t < 200.0 {
        assert_eq!(colour_for(t), Rgb(255, 0, 0), "t = {}", t);
        t += 3.7;
    }
}

/// Neighbouring temperatures never jump by more than a couple of steps per channel.
#[test]
fn test_colour_has_no_jumps() {
    let step = 0.01;
    let mut t = -30.0;
    let mut previous = colour_for(t);
    while t < 45.0 {
        t += step;
        let current = colour_for(t);
        for (a, b) in [
            (previous.0, current.0),
            (previous.1, current.1),
            (previous.2, current.2),
        ] {
            assert!(a.abs_diff(b) <= 1, "jump at t = {}: {:?} -> {:?}", t, previous, current);
        }
        previous = current;
    }
}

#[tokio::test]
async fn test_serial_stream_end_to_end() {
    let path = temp_file("stream.json");
    let (writer, reader) = snapshot_store();
    let serial = SerialLineReader::new(writer, FilePersister::new(&path));

    let input: &[u8] = b"{\"tempF\": 70.1}\n{\"tempF\": 72.3}\n";
    assert_ok!(serial.run(input).await);
    assert_eq!(reader.current().temperature_f, 72.3);

    // Feeding garbage afterwards keeps the last good value.
    let input: &[u8] = b"<html>\n{\"tempC\": 20}\n";
    assert_ok!(serial.run(input).await);
    assert_eq!(reader.current().temperature_f, 72.3);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_invalid_line_does_not_write_file() {
    let path = temp_file("untouched.json");
    let _ = std::fs::remove_file(&path);
    let (writer, reader) = snapshot_store();
    let serial = SerialLineReader::new(writer, FilePersister::new(&path));

    assert!(serial.handle_line("temperature is 70\n").is_none());

    assert_eq!(reader.current(), TemperatureSnapshot::default());
    assert!(!path.exists());
}

#[derive(Default)]
struct Outbox(Mutex<Vec<MailMessage>>);

#[async_trait::async_trait]
impl Mailer for Outbox {
    async fn send(&self, message: &MailMessage) -> temperature_pi::Result<()> {
        self.0.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_notifier_mails_on_interval() {
    let (writer, reader) = snapshot_store();
    let outbox = Arc::new(Outbox::default());
    let config = NotifierConfig {
        interval: Duration::from_millis(20),
        ..Default::default()
    };
    let notifier = PeriodicNotifier::new(config, reader, outbox.clone());

    writer.update(TemperatureSnapshot::now(64.0));
    let _ = tokio::time::timeout(Duration::from_millis(150), notifier.run()).await;

    let sent = outbox.0.lock().unwrap();
    assert!(!sent.is_empty(), "at least one mail should go out");
    assert!(sent.iter().all(|m| m.text == "Current Temperature is: 64F"));
}

#[test]
fn test_web_config_builder() {
    let config = WebConfig::default()
        .with_host("127.0.0.1")
        .with_port(9090)
        .with_static_root("/var/www");

    assert_eq!(config.bind_address(), "127.0.0.1:9090");
    assert_eq!(config.static_root, std::path::PathBuf::from("/var/www"));
}

#[test]
fn test_error_types() {
    assert!(Error::web_server_error("bind failed")
        .to_string()
        .contains("bind failed"));
    assert!(Error::config_error("Invalid bind address")
        .to_string()
        .starts_with("Configuration error"));
}

#[test]
fn test_snapshot_serialization() {
    let snapshot = TemperatureSnapshot::now(70.0);
    let json = serde_json::to_string(&snapshot).expect("Should serialize to JSON");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Should parse JSON");

    assert_eq!(value["temperature_f"], 70.0);
    assert!(value["observed_at"].is_string());
}
