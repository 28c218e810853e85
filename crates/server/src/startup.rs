use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes;
use crate::state::AppState;
use service::runtime;

/// Bind the configured host, which may be a hostname, an IPv4 address or an
/// IPv6 address with or without brackets.
async fn bind(server: &ServerConfig) -> anyhow::Result<TcpListener> {
    Ok(TcpListener::bind((bind_host(&server.host), server.port)).await?)
}

fn bind_host(host: &str) -> &str {
    host.trim().trim_start_matches('[').trim_end_matches(']')
}

/// Open the pool, bring the schema up to date and wire the router.
pub async fn build_app(cfg: AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.app.static_dir, &cfg.database.url).await?;
    let db = models::db::connect_and_migrate(&cfg.database).await?;
    Ok(routes::build_router(AppState::new(db, cfg)))
}

/// Public entry: load configuration, build the app and serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_or_env()?;
    let listener = bind(&cfg.server).await?;
    info!(environment = ?cfg.app.environment, database = %redact(&cfg.database.url), "configuration loaded");

    let app = build_app(cfg).await?;

    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, draining connections");
    }
}

/// Database URL without credentials, for logs.
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => format!("{}://***{}", &url[..scheme_end], &url[at..]),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_credentials() {
        assert_eq!(redact("postgres://u:p@db:5432/gist"), "postgres://***@db:5432/gist");
        assert_eq!(redact("sqlite://gist.db?mode=rwc"), "sqlite://gist.db?mode=rwc");
    }

    #[tokio::test]
    async fn binds_hostnames_and_ip_literals() {
        for host in ["localhost", "127.0.0.1", " 127.0.0.1 "] {
            let server = ServerConfig { host: host.into(), port: 0, worker_threads: None };
            let listener = bind(&server).await.unwrap();
            assert!(listener.local_addr().unwrap().ip().is_loopback(), "{host}");
        }
    }

    #[test]
    fn ipv6_brackets_are_optional() {
        for host in ["[::1]", "::1"] {
            assert_eq!(bind_host(host).parse::<std::net::IpAddr>().unwrap(), std::net::Ipv6Addr::LOCALHOST);
        }
    }
}
