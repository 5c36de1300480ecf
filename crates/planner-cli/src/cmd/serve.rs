use anyhow::Context;
use planner_core::config::Config;
use std::path::Path;

pub fn run(root: &Path, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = Config::load(root).context("failed to load .planner/config.yaml")?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(config.server.addr())
            .await
            .with_context(|| format!("failed to bind {}", config.server.addr()))?;
        println!("planner API → http://{}", listener.local_addr()?);

        tokio::select! {
            res = planner_server::serve_on(root_buf, config, listener) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}
