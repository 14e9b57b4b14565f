pub mod context;
pub mod lifecycle;

pub use lifecycle::{run_scan_stdin, run_standalone};

pub async fn run() -> anyhow::Result<()> {
    run_standalone().await
}
