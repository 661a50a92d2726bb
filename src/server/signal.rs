// Signal handling module
//
// Supported signals:
// - SIGTERM: Stop accepting connections
// - SIGINT:  Stop accepting connections (Ctrl+C)

use crate::logger;

/// Resolves once the process is asked to stop (Unix)
///
/// If a handler cannot be registered the other one still works; if neither can,
/// the future never resolves and the process runs until killed.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let sigterm = signal(SignalKind::terminate());
    let sigint = signal(SignalKind::interrupt());

    let terminate = async {
        match sigterm {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
                std::future::pending::<()>().await;
            }
        }
    };
    let interrupt = async {
        match sigint {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                logger::log_warning(&format!("Failed to register SIGINT handler: {e}"));
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = terminate => logger::log_shutdown("SIGTERM received"),
        () = interrupt => logger::log_shutdown("SIGINT received"),
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logger::log_shutdown("Ctrl+C received"),
        Err(e) => {
            logger::log_warning(&format!("Failed to listen for Ctrl+C: {e}"));
            std::future::pending::<()>().await;
        }
    }
}
