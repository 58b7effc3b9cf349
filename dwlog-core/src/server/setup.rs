use crate::api::ApiGateway;
use crate::conf::DwlogConfig;
use crate::server::pid;
use crate::server::state::AppState;
use anyhow::{Result, anyhow};
use pingora::prelude::*;
use pingora::server::Server;
use pingora::server::configuration::ServerConf;
use std::sync::Arc;

/// Run the Pingora server with the given configuration. Blocks until the
/// process exits.
pub fn run(config: DwlogConfig) -> Result<()> {
    if let Some(pid_file) = &config.server.pid_file {
        if let Err(e) = pid::write_pid(pid_file) {
            tracing::warn!(error = %e, pid_file = %pid_file.display(), "failed to write pid file; continuing");
        } else {
            tracing::info!(pid_file = %pid_file.display(), "pid file written");
        }
    }

    let state = Arc::new(AppState::new(config.clone()));
    state.prepare_dirs();

    let server = build_pingora_server(&config, state)?;

    // Ensure pid file cleanup on shutdown
    if let Some(pid_file) = config.server.pid_file.clone() {
        ctrlc::set_handler(move || {
            tracing::info!("shutdown requested, removing pid file");
            pid::remove_pid(&pid_file);
            std::process::exit(0);
        })?;
    }

    tracing::info!(
        listen = %config.server.listen,
        source_dir = %config.paths.source_dir.display(),
        export_mode = %config.export.mode,
        "dwlog listening"
    );

    server.run_forever();
}

/// Build the Pingora server with a single HTTP service.
pub fn build_pingora_server(config: &DwlogConfig, state: Arc<AppState>) -> Result<Server> {
    let mut server = if let Some(threads) = config.server.threads {
        tracing::debug!(
            threads,
            "Creating Pingora server with overridden worker threads"
        );
        let mut conf = ServerConf::new()
            .ok_or_else(|| anyhow!("could not construct pingora server configuration"))?;
        conf.threads = threads;
        Server::new_with_opt_and_conf(None, conf)
    } else {
        // "None" is required here to truly tell Pingora to use its default settings.
        Server::new(None)?
    };

    server.bootstrap();

    let mut svc = http_proxy_service(&server.configuration, ApiGateway::new(state));
    svc.add_tcp(&config.server.listen);

    server.add_service(svc);

    Ok(server)
}
