use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next, from_fn_with_state};
use axum::response::Response;
use axum::Router;
use taal_core::Localizer;
use tokio::signal;

use crate::i18n::middleware::{LocaleState, handle_i18n};

type Middleware = Box<dyn FnOnce(Router) -> Router + Send>;

/// Router builder that applies middleware after every route is mounted.
pub struct WebServer {
    router: Router,
    addr: String,
    middlewares: Vec<Middleware>,
}

impl WebServer {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            router: Router::new(),
            addr: addr.into(),
            middlewares: Vec::new(),
        }
    }

    /// Resolve a language for each request and expose it as a `RequestLocale`.
    ///
    /// With `negotiate` set, `Accept-Language` is consulted before the
    /// localizer's current language.
    pub fn layer_i18n(mut self, localizer: Arc<Localizer>, negotiate: bool) -> Self {
        let state = LocaleState {
            localizer,
            negotiate,
        };
        self.middlewares
            .push(Box::new(move |r| r.layer(from_fn_with_state(state, handle_i18n))));
        self
    }

    pub fn layer_fn<F, Fut>(mut self, f: F) -> Self
    where
        F: Clone + Send + Sync + 'static + Fn(Request, Next) -> Fut,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.middlewares
            .push(Box::new(|r| r.layer(middleware::from_fn(f))));
        self
    }

    pub fn mount(mut self, router: Router) -> Self {
        self.router = self.router.merge(router);
        self
    }

    /// The final router with all middleware applied.
    pub fn into_router(self) -> Router {
        self.middlewares
            .into_iter()
            .fold(self.router, |router, m| m(router))
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let addr = self.addr.clone();
        let router = self.into_router();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        log::info!("Listening on http://{}", listener.local_addr()?);

        let server = axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown());
        if let Err(e) = server.await {
            log::error!("Server error: {}", e);
            return Err(anyhow::anyhow!("Server error: {}", e));
        }

        log::info!("Server stopped");
        Ok(())
    }
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            log::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
