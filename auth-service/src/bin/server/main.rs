use std::str::FromStr;
use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use auth_service::config::load_dotenv;
use auth_service::config::Config;
use auth_service::domain::user::service::UserService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::SqliteUserRepository;
use axum::http::HeaderValue;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    match load_dotenv()? {
        Some(path) => tracing::info!(path = %path.display(), "Environment loaded from .env file"),
        None => tracing::info!("No .env file found, using process environment"),
    }

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        port = config.server.port,
        allowed_origin = %config.cors.allowed_origin,
        access_expiration_minutes = config.jwt.access_expiration_minutes,
        refresh_expiration_hours = config.jwt.refresh_expiration_hours,
        "Configuration loaded"
    );

    if config.jwt.uses_default_secrets() {
        tracing::warn!("Using built-in development token secrets; set JWT_SECRET and REFRESH_SECRET");
    }

    let connect_options =
        SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let sqlite_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(connect_options)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&sqlite_pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_cost_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let (access_ttl, refresh_ttl) = config.jwt.token_lifetimes()?;
    let token_service = TokenService::new(
        config.jwt.access_secret.as_bytes(),
        config.jwt.refresh_secret.as_bytes(),
    )
    .with_ttls(access_ttl, refresh_ttl);

    let authenticator = Arc::new(Authenticator::new(password_hasher, token_service));
    let user_repository = Arc::new(SqliteUserRepository::new(sqlite_pool));
    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));

    let allowed_origin = HeaderValue::from_str(&config.cors.allowed_origin)?;

    let http_address = format!("0.0.0.0:{}", config.server.port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, authenticator, allowed_origin);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
