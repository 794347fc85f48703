//! Database connectivity smoke test.
//!
//! Connects with the server's configuration, applies migrations, and runs a
//! trivial count. Exits non-zero when any step fails.

use issue_service::config::Config;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;
    println!("✓ Configuration loaded");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;
    println!("✓ Database connection working");

    sqlx::migrate!("./migrations").run(&pool).await?;
    println!("✓ Migrations applied");

    let issue_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM issues")
        .fetch_one(&pool)
        .await?;
    println!("✓ Current issues in database: {}", issue_count);

    println!();
    println!("✓ Database is ready to use!");

    Ok(())
}
