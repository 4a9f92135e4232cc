//! Preview server: serves the site root, assembling HTML pages per request.
//!
//! The server binds before the config is validated, so early requests get a
//! loading page instead of a refused connection.

mod lifecycle;
mod page;
mod path;
mod response;

use crate::cli::Cli;
use crate::config::{ConfigReady, ConfigSignal, SiteConfig};
use crate::core::is_shutdown;
use crate::{debug, log};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tiny_http::{Request, Server};
use tokio::runtime::Runtime;

/// How long a request waits for the config before getting the loading page.
const CONFIG_GRACE: Duration = Duration::from_millis(500);

/// Request handler threads.
const WORKER_THREADS: usize = 4;

/// Bind, load the config in the background and run the request loop.
pub fn serve(cli: &Cli) -> Result<()> {
    let config = SiteConfig::resolve(cli)?;
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server_for_shutdown(Arc::clone(&server));

    log!("serve"; "http://{}", addr);

    let signal = ConfigSignal::new();
    let ready = signal.subscribe();
    let loader = lifecycle::spawn_config_loader(config, signal);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    run_request_loop(&server, &ready, Arc::new(runtime))?;
    lifecycle::join_loader(loader)
}

fn run_request_loop(server: &Server, ready: &ConfigReady, runtime: Arc<Runtime>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKER_THREADS)
        .build()
        .context("failed to create thread pool")?;

    for request in server.incoming_requests() {
        let ready = ready.clone();
        let runtime = Arc::clone(&runtime);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &ready, &runtime) {
                log!("serve"; "request error: {e}");
            }
        });
        if is_shutdown() {
            break;
        }
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, ready: &ConfigReady, runtime: &Runtime) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    let Some(config) = await_config(ready, runtime) else {
        return response::respond_loading(request);
    };

    let location = path::location(request.url());
    debug!("serve"; "{} {}", request.method(), location);

    match path::resolve_path(request.url(), &config.root) {
        Some(file) if page::should_assemble(&file, &config) => {
            match page::assemble_file(&file, &location, &config, runtime) {
                Ok(body) => response::respond_html(request, 200, body),
                Err(e) => response::respond_error(request, &e),
            }
        }
        Some(file) => response::respond_file(request, &file),
        None => {
            let custom = custom_not_found(&config, &location, runtime);
            response::respond_not_found(request, &location, custom)
        }
    }
}

/// The published config, waiting briefly if loading is still in progress.
fn await_config(ready: &ConfigReady, runtime: &Runtime) -> Option<Arc<SiteConfig>> {
    ready.get().or_else(|| {
        runtime.block_on(async {
            tokio::time::timeout(CONFIG_GRACE, ready.wait())
                .await
                .ok()
                .flatten()
        })
    })
}

/// The site's `404.html`, assembled for `location`, if it exists.
fn custom_not_found(config: &Arc<SiteConfig>, location: &str, runtime: &Runtime) -> Option<String> {
    let path = config.root_join("404.html");
    if !path.is_file() {
        return None;
    }
    page::assemble_file(&path, location, config, runtime)
        .inspect_err(|e| log!("serve"; "404.html: {e:#}"))
        .ok()
}
