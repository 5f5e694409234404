use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context as _;
use axum::{Router, handler::HandlerWithoutStateExt as _, http::StatusCode, response::Html};
use clap::Args;
use tower_http::services::ServeDir;

/// serve the small target site the load scenario points at
#[derive(Debug, Clone, Args)]
pub struct ServeCommand {
    /// socket address to bind
    #[arg(
        long,
        short = 'b',
        value_name = "ADDRESS",
        default_value = "127.0.0.1:8080"
    )]
    bind: SocketAddr,

    /// directory the site content is served from
    #[arg(long, value_name = "DIR", default_value = "static")]
    root: PathBuf,
}

pub async fn exec(args: ServeCommand) -> anyhow::Result<()> {
    if !args.root.is_dir() {
        tracing::warn!(
            root = %args.root.display(),
            "site root directory not found, every request will return 404"
        );
    }

    // "/" resolves to index.html, unknown paths get the HTML 404 page.
    let site = ServeDir::new(&args.root).not_found_service(not_found.into_service());
    let app = Router::new().fallback_service(site);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("bind site server to {}", args.bind))?;
    let addr = listener
        .local_addr()
        .context("get bound address for site server")?;
    tracing::info!(root = %args.root.display(), "site ready at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve site")?;

    Ok(())
}

async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html("<h1>404 Not Found</h1>"))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {err}");
    }
}
