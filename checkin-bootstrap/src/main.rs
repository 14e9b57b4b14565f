use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(name = "checkin-backend")]
#[command(about = "Event check-in backend", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Read decoded badges from stdin instead of serving HTTP
    #[arg(long)]
    scan_stdin: bool,
}

fn init_tracing() -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match std::env::var("CHECKIN_LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir.trim(), "checkin-backend.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        // stdout carries scan results in --scan-stdin mode
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_tracing();

    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("CHECKIN_CONFIG", config);
    }

    if args.scan_stdin {
        checkin_bootstrap::run_scan_stdin().await
    } else {
        checkin_bootstrap::run_standalone().await
    }
}
