//! Ctrl+C handling for long sessions.
//!
//! The first interrupt sets the session's [`StopHandle`]; the round in flight
//! completes, the report is printed and the process exits with
//! [`crate::exit_code::INTERRUPTED`].

use hilo_engine::session::StopHandle;

/// Watch for Ctrl+C on a background thread and stop `stop` when it arrives.
///
/// Failing to install the listener is logged and otherwise ignored; the
/// session then runs without interrupt support.
pub fn stop_on_ctrl_c(stop: StopHandle) {
    let spawned = std::thread::Builder::new()
        .name("hilo-ctrl-c".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::warn!(error = %e, "cannot start signal runtime");
                    return;
                }
            };
            rt.block_on(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::info!("interrupt received, finishing current round");
                        stop.stop();
                    }
                    Err(e) => tracing::warn!(error = %e, "cannot listen for ctrl-c"),
                }
            });
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "cannot spawn signal thread");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_leaves_handle_alone_until_signalled() {
        let stop = StopHandle::default();
        stop_on_ctrl_c(stop.clone());
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert!(!stop.is_stopped());
    }
}
