use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use issue_service::config::Config;
use issue_service::domain::issue::service::IssueService;
use issue_service::domain::user::service::UserService;
use issue_service::inbound::http::router::create_router;
use issue_service::outbound::repositories::PostgresIssueRepository;
use issue_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "issue_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "issue-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    if config.jwt.uses_dev_fallback_secret() {
        tracing::warn!(
            "jwt.secret is still the development fallback; set JWT__SECRET before deploying"
        );
    }

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_lifetime_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes())
            .with_token_ttl(Duration::hours(config.jwt.expiration_hours)),
    );
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let issue_repository = Arc::new(PostgresIssueRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let issue_service = Arc::new(IssueService::new(issue_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        issue_service,
        user_repository,
        authenticator,
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
