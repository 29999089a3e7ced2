use actix_web::dev::Server;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use anyhow::Context;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::authentication::CredentialService;
use crate::configuration::DatabaseSettings;
use crate::configuration::Settings;
use crate::routes::health_check;
use crate::routes::home;
use crate::routes::json_error_handler;
use crate::routes::login;
use crate::routes::register;
use crate::user_store::{PostgresUserStore, UserStore};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Build the application against the PostgreSQL store described by the
    /// configuration.
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);

        migrate(&configuration.database, &connection_pool)
            .await
            .context("Failed to migrate database")?;

        let store = PostgresUserStore::new(connection_pool);
        Self::build_with_store(configuration, Arc::new(store))
    }

    /// Build the application on top of any user store.
    pub fn build_with_store(
        configuration: Settings,
        store: Arc<dyn UserStore>,
    ) -> Result<Self, anyhow::Error> {
        let credentials =
            CredentialService::new(configuration.application.jwt_secret)
                .context("Refusing to start without a token signing secret")?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {}", address))?;
        let port = listener.local_addr()?.port();
        tracing::info!("app started at: {}:{}", configuration.application.host, port);
        let server = run(listener, store, credentials)?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // A more expressive name that makes it clear that
    // this function only returns when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(configuration.with_db())
}

async fn migrate(
    configuration: &DatabaseSettings,
    connection_pool: &PgPool,
) -> Result<(), MigrateError> {
    if configuration.migrate {
        tracing::info!("migrating postgres");
        sqlx::migrate!("./migrations").run(connection_pool).await
    } else {
        Ok(())
    }
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn UserStore>,
    credentials: CredentialService,
) -> Result<Server, std::io::Error> {
    // `Data<dyn UserStore>` lets handlers stay agnostic of the backing store
    let store: web::Data<dyn UserStore> = web::Data::from(store);
    let credentials = web::Data::new(credentials);
    let server = HttpServer::new(move || {
        App::new()
            // Middlewares are added using the `wrap` method on `App`
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/users")
                    .route("/register", web::post().to(register))
                    .route("/login", web::post().to(login)),
            )
            .app_data(store.clone())
            .app_data(credentials.clone())
    })
    .listen(listener)?
    .run();
    // No .await here
    Ok(server)
}
