use crate::application::BlogService;
use crate::data::{InMemoryPostRepository, MongoPostRepository, PostRepository};
use crate::infrastructure::config::{Config, StoreBackend};
use crate::infrastructure::database;
use crate::presentation::configure_routes;
use actix_web::dev::{Server, ServerHandle};
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use std::net::TcpListener;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Configure CORS for the HTTP server with the allowed origins from config
fn configure_cors(allowed_origins: &[String]) -> actix_cors::Cors {
    use actix_cors::Cors;
    use actix_web::http::header;

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600);

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
        tracing::debug!("Added allowed CORS origin: {}", origin);
    }

    cors
}

/// Opens the configured store. The Mongo client is returned so it can be
/// shut down together with the server.
pub async fn open_store(
    config: &Config,
) -> anyhow::Result<(Arc<dyn PostRepository>, Option<mongodb::Client>)> {
    match config.store_backend {
        StoreBackend::Mongo => {
            tracing::info!("Connecting to database...");
            let (client, db) = database::connect(&config.database_url).await?;
            Ok((Arc::new(MongoPostRepository::new(&db)), Some(client)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory post store; data is lost on shutdown");
            Ok((Arc::new(InMemoryPostRepository::new()), None))
        }
    }
}

pub struct Application {
    port: u16,
    server: Server,
    mongo_client: Option<mongodb::Client>,
}

impl Application {
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        let (post_repo, mongo_client) = open_store(config).await?;
        let mut app = Self::with_repository(config, post_repo)?;
        app.mongo_client = mongo_client;
        Ok(app)
    }

    /// Binds the HTTP listener around an already opened repository.
    pub fn with_repository(
        config: &Config,
        post_repo: Arc<dyn PostRepository>,
    ) -> anyhow::Result<Self> {
        let addr = config.http_addr();
        let listener =
            TcpListener::bind(&addr).with_context(|| format!("Failed to bind {}", addr))?;
        let port = listener.local_addr()?.port();

        let blog_service = Arc::new(BlogService::new(post_repo));
        let cors_allowed_origins = config.cors_allowed_origins.clone();

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .wrap(configure_cors(&cors_allowed_origins))
                .app_data(web::Data::new(blog_service.clone()))
                .configure(configure_routes)
        })
        .listen(listener)?
        .run();

        tracing::info!("HTTP server listening on {}:{}", config.http_host, port);

        Ok(Self {
            port,
            server,
            mongo_client: None,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serves until the server is stopped (SIGINT/SIGTERM), then closes the store.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        self.server.await?;
        tracing::info!("HTTP server stopped");

        if let Some(client) = self.mongo_client {
            client.shutdown().await;
            tracing::info!("Database connection closed");
        }
        Ok(())
    }

    /// Runs the server on a background task.
    pub fn spawn(self) -> RunningServer {
        let handle = self.server.handle();
        let task = tokio::spawn(self.server);

        RunningServer {
            address: format!("http://127.0.0.1:{}", self.port),
            handle,
            task,
            mongo_client: self.mongo_client,
        }
    }
}

/// A server started with [`start_server`].
pub struct RunningServer {
    address: String,
    handle: ServerHandle,
    task: JoinHandle<std::io::Result<()>>,
    mongo_client: Option<mongodb::Client>,
}

impl RunningServer {
    /// Base URL of the running server, e.g. `http://127.0.0.1:41234`.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Gracefully stops the HTTP server and closes the store connection.
    pub async fn stop(self) -> anyhow::Result<()> {
        self.handle.stop(true).await;
        self.task.await??;

        if let Some(client) = self.mongo_client {
            client.shutdown().await;
        }

        tracing::info!("Server at {} stopped", self.address);
        Ok(())
    }
}

/// Opens the store from `config` and serves on a background task.
pub async fn start_server(config: &Config) -> anyhow::Result<RunningServer> {
    Ok(Application::build(config).await?.spawn())
}
