//! Server lifecycle: binding, config loading and shutdown.

use crate::config::{ConfigSignal, SiteConfig};
use crate::core::{register_server, request_shutdown};
use crate::{debug, log};
use anyhow::Result;
use std::{
    net::SocketAddr,
    sync::Arc,
    thread::{self, JoinHandle},
};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, with automatic port retry.
pub fn bind_with_retry(
    interface: std::net::IpAddr,
    base_port: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Register server for graceful shutdown on Ctrl+C.
pub fn register_server_for_shutdown(server: Arc<Server>) {
    register_server(server);
}

/// Validate `config` on a background thread, then publish it.
///
/// Validation failure logs the diagnostics and stops the server; the signal
/// is dropped unpublished so waiting requests give up.
pub fn spawn_config_loader(config: SiteConfig, signal: ConfigSignal) -> JoinHandle<Result<()>> {
    thread::spawn(move || {
        if let Err(err) = config.validate() {
            log!("error"; "{}", err);
            drop(signal);
            request_shutdown();
            return Err(err.into());
        }
        let config = signal.publish(config)?;
        debug!("config"; "ready, site root {}", config.root.display());
        Ok(())
    })
}

/// Wait for the loader and surface its error, if any.
pub fn join_loader(handle: JoinHandle<Result<()>>) -> Result<()> {
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("config loader panicked"))?
}
