use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use super::{services::thumbnail, state::AppState};
use crate::config::Config;
use crate::convert::{Converter, ImageMagick};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builds the application router
///
/// Every path is the thumbnail endpoint, for every method; method checking
/// belongs to the dispatcher so a GET gets 400, not 405. Request bodies reach
/// the converter byte for byte (no content decoding).
pub fn router(state: AppState) -> Router {
    Router::new().fallback(thumbnail).with_state(state)
}

/// A bound, not yet serving, HTTP server
pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl Server {
    /// Bind `config.server.bind_addr` and prepare the router around `converter`
    pub async fn bind(config: Config, converter: Arc<dyn Converter>) -> Result<Self, AnyError> {
        let address = config.server.bind_addr;
        let listener = TcpListener::bind(address).await?;
        let app = router(AppState::new(converter));

        Ok(Self { listener, app })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, AnyError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    pub async fn serve<F>(self, shutdown: F) -> Result<(), AnyError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = self.local_addr()?;
        info!(%address, "Thumbnailer listening");

        axum::serve(self.listener, self.app.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Thumbnailer stopped");
        Ok(())
    }
}

/// Run the server with the ImageMagick converter until Ctrl+C / SIGTERM
pub async fn run(config: Config) -> Result<(), AnyError> {
    let converter = ImageMagick::from_config(&config.converter);
    info!(
        program = %config.converter.program.display(),
        timeout = %config.converter.timeout,
        "Using ImageMagick converter"
    );

    Server::bind(config, Arc::new(converter))
        .await?
        .serve(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
