use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{any, get},
    Router,
};
use tokio::sync::oneshot;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::modules::config::AppConfig;
use crate::modules::lockfile::{default_lockfile_paths, SessionStore};
use crate::proxy::{handlers, middleware, upstream::LcuClient};

/// Axum application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub upstream: Arc<LcuClient>,
}

/// Assemble the front door router: API routes, the unknown-API catch-all,
/// and static front-end serving for everything else (`/` resolves to
/// `index.html` via ServeDir).
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route(
            "/api/lockfile",
            get(handlers::get_lockfile).post(handlers::post_lockfile),
        )
        .route("/api/arena-challenge", get(handlers::arena_challenge))
        .route("/api/champions", get(handlers::champions))
        .route("/api/champion-image/*path", get(handlers::champion_image))
        .route("/api", any(handlers::unknown_endpoint))
        .route("/api/", any(handlers::unknown_endpoint))
        .route("/api/*rest", any(handlers::unknown_endpoint))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::preflight))
        .layer(axum::middleware::from_fn(middleware::cors_response_headers))
        .layer(middleware::cors_layer())
        .with_state(state)
}

/// Axum server instance
pub struct AxumServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl AxumServer {
    /// Start the bridge server; returns the instance and its join handle.
    pub async fn start(config: &AppConfig) -> Result<(Self, tokio::task::JoinHandle<()>), String> {
        let mut candidate_paths = config.lockfile_paths.clone();
        candidate_paths.extend(default_lockfile_paths());

        let state = AppState {
            sessions: Arc::new(SessionStore::new(candidate_paths)),
            upstream: Arc::new(LcuClient::new(config.upstream_timeout_secs)),
        };

        let app = build_router(state, &config.static_dir);

        let addr = format!("{}:{}", config.bind_address(), config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind address {}: {}", addr, e))?;

        tracing::info!("LCU bridge started at http://{}", addr);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let service = TowerToHyperService::new(app.clone());

                                tokio::task::spawn(async move {
                                    if let Err(err) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("Connection handling finished or errored: {:?}", err);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Failed to accept connection: {:?}", e);
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("LCU bridge stopped listening");
                        break;
                    }
                }
            }
        });

        Ok((
            Self {
                shutdown_tx: Some(shutdown_tx),
            },
            handle,
        ))
    }

    /// Stop accepting connections; in-flight responses finish on their own.
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
