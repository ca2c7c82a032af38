//! Temperature Pi - Serial Temperature Bridge Binary
//!
//! Reads the microcontroller's serial output, serves the temperature page on
//! the web and mails a periodic status summary.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use temperature_pi::{
    colour_for, snapshot_store, start_web_server, FilePersister, LogMailer, Mailer,
    NotifierConfig, PeriodicNotifier, SendmailMailer, SerialConfig, SerialLineReader, WebConfig,
    DEFAULT_BAUD_RATE, DEFAULT_EMAIL_INTERVAL_SECS, DEFAULT_PERSIST_PATH, DEFAULT_SERIAL_PORT,
    DEFAULT_WEB_PORT,
};
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "temperature_pi")]
#[command(about = "Temperature Pi - serial temperature bridge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    long_about = "Reads JSON temperature lines from a microcontroller, serves them on the web and mails a periodic status"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Web server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Directory static files are served from
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// File the latest reading is written to
    #[arg(long, default_value = DEFAULT_PERSIST_PATH)]
    persist_path: PathBuf,

    /// Seconds between status mails
    #[arg(long, default_value_t = DEFAULT_EMAIL_INTERVAL_SECS)]
    email_interval: u64,

    /// Sender of status mails
    #[arg(long, default_value = "temperature-pi@localhost")]
    mail_from: String,

    /// Recipient of status mails
    #[arg(long, default_value = "root@localhost")]
    mail_to: String,

    /// Subject of status mails
    #[arg(long, default_value = "Beer Status")]
    mail_subject: String,

    /// Sendmail-compatible binary used to deliver mail (mails are only logged if unset)
    #[arg(long)]
    sendmail: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Read from the serial port and serve (default)
    Serve(SerialArgs),

    /// Read lines from a file or stdin instead of a serial port
    Replay(ReplayArgs),

    /// Print the display colour of a temperature and exit
    Colour {
        /// Temperature in degrees Fahrenheit
        #[arg(allow_negative_numbers = true)]
        temp_f: f64,
    },
}

#[derive(Args)]
struct SerialArgs {
    /// Serial device of the microcontroller
    #[arg(long, default_value = DEFAULT_SERIAL_PORT)]
    serial_port: String,

    /// Serial baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,
}

#[derive(Args)]
struct ReplayArgs {
    /// Input file, or `-` for stdin
    input: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Colour { temp_f }) => {
            println!("{}", colour_for(*temp_f));
            Ok(())
        }
        Some(Commands::Serve(args)) => {
            init_logging(&cli)?;
            serve_command(&cli, args).await
        }
        Some(Commands::Replay(args)) => {
            init_logging(&cli)?;
            replay_command(&cli, args).await
        }
        None => {
            init_logging(&cli)?;
            let serial_args = SerialArgs {
                serial_port: DEFAULT_SERIAL_PORT.to_string(),
                baud: DEFAULT_BAUD_RATE,
            };
            serve_command(&cli, &serial_args).await
        }
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn web_config(cli: &Cli) -> WebConfig {
    WebConfig::new(&cli.host, cli.port).with_static_root(&cli.root)
}

fn notifier_config(cli: &Cli) -> NotifierConfig {
    NotifierConfig {
        interval: Duration::from_secs(cli.email_interval.max(1)),
        from: cli.mail_from.clone(),
        to: cli.mail_to.clone(),
        subject: cli.mail_subject.clone(),
    }
}

fn mailer(cli: &Cli) -> Arc<dyn Mailer> {
    match &cli.sendmail {
        Some(program) => Arc::new(SendmailMailer::new(program)),
        None => {
            warn!("No --sendmail configured, status mails will only be logged");
            Arc::new(LogMailer)
        }
    }
}

async fn serve_command(cli: &Cli, args: &SerialArgs) -> anyhow::Result<()> {
    let serial = SerialConfig::new(&args.serial_port, args.baud)
        .open()
        .context("cannot read temperatures without the serial device")?;

    run(cli, BufReader::new(serial), true).await
}

async fn replay_command(cli: &Cli, args: &ReplayArgs) -> anyhow::Result<()> {
    if args.input == "-" {
        info!("Reading temperature lines from stdin");
        run(cli, BufReader::new(tokio::io::stdin()), false).await
    } else {
        let file = tokio::fs::File::open(&args.input)
            .await
            .with_context(|| format!("cannot open {}", args.input))?;
        info!("Replaying temperature lines from {}", args.input);
        run(cli, BufReader::new(file), false).await
    }
}

/// Run the line reader, the notifier and the web server until one of them
/// fails. When `input_must_last` is set, the end of the input is an error.
async fn run<R>(cli: &Cli, input: R, input_must_last: bool) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let (writer, reader) = snapshot_store();
    let persister = FilePersister::new(&cli.persist_path);
    let persist_file = persister.path().display().to_string();
    let lines = SerialLineReader::new(writer, persister);
    let notifier = PeriodicNotifier::new(notifier_config(cli), reader.clone(), mailer(cli));

    info!("Starting Temperature Pi...");
    info!("  - Bind address: {}:{}", cli.host, cli.port);
    info!("  - Persist file: {}", persist_file);
    info!("  - Mail interval: {}s", cli.email_interval);

    let input_task = async {
        lines.run(input).await?;
        if input_must_last {
            anyhow::bail!("serial device closed");
        }
        // Keep serving the last reading once a replay is exhausted.
        std::future::pending::<()>().await;
        Ok::<(), anyhow::Error>(())
    };

    tokio::select! {
        result = input_task => result,
        result = notifier.run() => result.context("status mail failed"),
        result = start_web_server(web_config(cli), reader) => result.context("web server failed"),
    }
}
