//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    low_level::signal_name,
};
use signal_hook_tokio::Signals;
use tracing::info;

/// Resolve once SIGTERM or SIGINT arrives, returning the signal number
pub async fn shutdown_signal() -> std::io::Result<i32> {
    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    let handle = signals.handle();

    let signal = signals.next().await.unwrap_or(SIGTERM);
    info!("Received {}", signal_name(signal).unwrap_or("unknown signal"));
    handle.close();
    Ok(signal)
}
