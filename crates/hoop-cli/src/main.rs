use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use hoop_core::AnalyticsSettings;
use tokio::sync::{broadcast, mpsc};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod clicks;
mod driver;
mod mock_feed;
mod overlay;
mod source;

use driver::Driver;
use mock_feed::MockFeed;
use overlay::OverlaySink;
use source::{FrameSource, ReplaySource};

#[derive(Debug, Clone, ValueEnum)]
pub(crate) enum SourceType {
    Replay,
    Mock,
}

#[derive(Debug, Clone, ValueEnum)]
pub(crate) enum OverlayType {
    Log,
    Jsonl,
}

#[derive(Debug, Parser)]
#[command(name = "hoop-cli")]
pub(crate) struct Args {
    #[clap(long, default_value = "mock")]
    source: SourceType,

    /// Detections recorded as JSON lines, for `--source replay`
    #[clap(long)]
    replay_file: Option<PathBuf>,

    /// Pace replayed frames by their timestamps
    #[clap(long, default_value = "false")]
    realtime: bool,

    /// Number of mock frames to produce, 0 for no limit
    #[clap(long, default_value = "450")]
    mock_frames: u64,

    #[clap(long, default_value = "33")]
    mock_period_ms: u64,

    /// Read clicks as `x y` lines from stdin
    #[clap(long, default_value = "false")]
    stdin_clicks: bool,

    #[clap(long, default_value = "log")]
    overlay: OverlayType,

    /// Output file for `--overlay jsonl`
    #[clap(long)]
    overlay_out: Option<PathBuf>,

    #[clap(long, short = 'f', default_value = "hoop-settings.json")]
    settings_file: PathBuf,

    #[clap(long, default_value = "info")]
    log_level: String,

    #[clap(long, default_value = "auto")]
    log_file: String,
}

/// Log to stdout and, as JSON, to a log file. The returned guard must be kept alive
/// for the file writer to flush.
fn setup_logging(args: &Args) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_file_path = if args.log_file != "auto" {
        PathBuf::from(&args.log_file)
    } else {
        let time = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        let filename = format!("hoop-{time}.log");
        dirs::data_local_dir()
            .map(|p| p.join("hoop").join(&filename))
            .unwrap_or_else(|| PathBuf::from(&filename))
    };
    let dir = log_file_path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    let Some(file_name) = log_file_path.file_name() else {
        bail!("Invalid log file: {}", log_file_path.display());
    };

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(appender);

    let log_level = match tracing::Level::from_str(&args.log_level) {
        Ok(level) => level,
        Err(_) => bail!("Invalid log level: {}", args.log_level),
    };
    let stdout_layer = fmt::Subscriber::builder()
        .with_max_level(log_level)
        .without_time()
        .finish();
    let logfile_layer = fmt::Layer::default()
        .json()
        .with_ansi(false)
        .with_writer(non_blocking_appender);
    stdout_layer
        .with(logfile_layer)
        .try_init()
        .context("Unable to set global tracing subscriber")?;

    tracing::info!("Saving logs to {}", log_file_path.display());
    Ok(guard)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = setup_logging(&args)?;

    let settings = AnalyticsSettings::load_or_insert(&args.settings_file)?;
    tracing::debug!("Settings: {:?}", settings);

    let (click_tx, click_rx) = mpsc::unbounded_channel();
    let source = match args.source {
        SourceType::Replay => {
            let Some(path) = &args.replay_file else {
                bail!("--replay-file is required with --source replay");
            };
            FrameSource::Replay(ReplaySource::open(path, click_tx.clone(), args.realtime).await?)
        }
        SourceType::Mock => FrameSource::Mock(MockFeed::new(
            Duration::from_millis(args.mock_period_ms.max(1)),
            (args.mock_frames > 0).then_some(args.mock_frames),
        )),
    };
    let overlay = match args.overlay {
        OverlayType::Log => OverlaySink::Log,
        OverlayType::Jsonl => {
            let Some(path) = &args.overlay_out else {
                bail!("--overlay-out is required with --overlay jsonl");
            };
            OverlaySink::jsonl(path)?
        }
    };
    if args.stdin_clicks {
        clicks::spawn_stdin_clicks(click_tx);
    } else {
        drop(click_tx);
    }

    let driver = Driver::new(&settings, source, click_rx, overlay);
    let (stop_tx, stop_rx) = broadcast::channel(1);
    let mut main_task = tokio::spawn(driver.run(stop_rx));

    let result = tokio::select! {
        result = &mut main_task => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
            let _ = stop_tx.send(());
            main_task.await
        }
    };

    let summary = result.context("Pipeline task failed")??;
    tracing::info!(
        frames = summary.frames,
        buckets = summary.goal_count,
        "Finished ({:?})",
        summary.reason
    );
    Ok(())
}
