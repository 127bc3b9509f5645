// Accept loop module
// The server's steady state: accept connections until a termination signal
// arrives, then drain in-flight connections and return.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

/// How often the drain phase re-checks the in-flight counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop until shutdown, then drain.
///
/// Accept errors are transient (e.g. a connection reset in the backlog) and
/// do not stop the loop. Returning from this function means every accepted
/// connection has completed.
pub async fn run_accept_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    while !signals.is_shutdown_requested() {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                break;
            }
        }
    }

    // Stop accepting before draining; queued-but-unaccepted connections are
    // refused from this point on.
    drop(listener);
    drain_connections(&active_connections).await;
    logger::log_shutdown_complete();
}

/// Wait for the in-flight counter to reach zero.
///
/// In-flight requests are allowed to finish rather than being aborted;
/// there is no forced-cancellation path.
async fn drain_connections(active_connections: &AtomicUsize) {
    let in_flight = active_connections.load(Ordering::SeqCst);
    if in_flight == 0 {
        return;
    }

    logger::log_shutdown_draining(in_flight);
    while active_connections.load(Ordering::SeqCst) > 0 {
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
