use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::Server;
use actix_web::middleware::from_fn;
use actix_web::{
    web,
    App,
    HttpServer,
};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::app::configuration::{
    Settings,
    StorageBackend,
};
use crate::app::rate_limit::{
    enforce_rate_limit,
    RateLimiter,
};
use crate::auth::{
    AdminCredentials,
    TokenService,
};
use crate::routes::*;
use crate::store::{
    MemoryStore,
    PgStore,
    Store,
};

pub struct SiteApp {
    pub server: Server,
    pub port: u16,
}

impl SiteApp {
    /// Connect the configured storage backend and bind the server.
    pub async fn from(configuration: Settings) -> Result<SiteApp, anyhow::Error> {
        let store: Arc<dyn Store> = match configuration.storage.backend {
            StorageBackend::Postgres => {
                let store = PgStore::connect(&configuration.database)
                    .await
                    .with_context(|| {
                        format!(
                            "error connecting to postgres at {}:{}",
                            configuration.database.host, configuration.database.port
                        )
                    })?;
                store
                    .migrate()
                    .await
                    .context("error migrating the database")?;
                Arc::new(store)
            }
            StorageBackend::Memory => {
                tracing::warn!("using the in-memory store: records are lost on restart");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(SiteApp::with_store(configuration, store)?)
    }

    pub fn with_store(
        configuration: Settings,
        store: Arc<dyn Store>,
    ) -> Result<SiteApp, std::io::Error> {
        let tcp_listener = TcpListener::bind(configuration.application.binding_address())?;
        let port = tcp_listener.local_addr()?.port();

        let store: web::Data<dyn Store> = web::Data::from(store);
        let tokens = web::Data::new(TokenService::from(&configuration.auth));
        let admin = web::Data::new(AdminCredentials::from(&configuration.auth));
        let rate_limiter = web::Data::new(RateLimiter::new(
            configuration.rate_limit.max_requests,
            Duration::from_secs(configuration.rate_limit.window_seconds),
        ));

        // HttpServer handles all transport level concerns
        let server = HttpServer::new(move || {
            // App is where all the application logic lives: routing, middlewares, request
            // handlers, etc.
            App::new()
                .wrap(from_fn(enforce_rate_limit))
                .wrap(TracingLogger::default())
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(store.clone())
                .app_data(tokens.clone())
                .app_data(admin.clone())
                .app_data(rate_limiter.clone())
                .route("/", web::get().to(health_check))
                // admin only handlers take an `AdminToken` argument
                .service(
                    web::scope("/api/contact")
                        .route("", web::post().to(submit_contact))
                        .route("", web::get().to(list_contacts))
                        .route("/{id}/status", web::patch().to(update_contact_status)),
                )
                .service(
                    web::scope("/api/newsletter")
                        .route("", web::get().to(list_subscribers))
                        .route("/subscribe", web::post().to(subscribe))
                        .route("/unsubscribe", web::post().to(unsubscribe)),
                )
                .service(
                    web::scope("/api/auth")
                        .route("/login", web::post().to(login))
                        .route("/verify", web::get().to(verify)),
                )
                .service(
                    web::scope("/admin")
                        .route("", web::get().to(dashboard_redirect))
                        .route("/api/stats", web::get().to(stats)),
                )
        })
        .backlog(configuration.application.max_pending_connections)
        .listen(tcp_listener)?
        .run();
        Ok(SiteApp { server, port })
    }
}
