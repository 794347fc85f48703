//! Diagnostic dump of the users and issues tables.
//!
//! Usage: `cargo run --bin show-db` (reads the same configuration as the
//! server). Password hashes are never printed.

use issue_service::config::Config;
use sqlx::postgres::PgPoolOptions;
use sqlx::Row;

const RULE: &str =
    "====================================================================================================";

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    println!("{}", RULE);
    println!("USERS TABLE");
    println!("{}", RULE);
    let users = sqlx::query(
        "SELECT id, email, username, full_name, is_active FROM users ORDER BY created_at",
    )
    .fetch_all(&pool)
    .await?;
    for user in &users {
        let id: uuid::Uuid = user.get("id");
        let email: String = user.get("email");
        let username: String = user.get("username");
        let full_name: Option<String> = user.get("full_name");
        let is_active: bool = user.get("is_active");

        println!("ID: {}...", &id.to_string()[..12]);
        println!("  Email: {}", email);
        println!("  Username: {}", username);
        println!("  Full Name: {}", full_name.as_deref().unwrap_or("-"));
        println!("  Active: {}", is_active);
        println!();
    }

    println!("{}", RULE);
    println!("ISSUES TABLE (Total Count by Owner)");
    println!("{}", RULE);
    let counts = sqlx::query(
        "SELECT u.username, COUNT(i.id) AS issue_count \
         FROM issues i JOIN users u ON i.owner_id = u.id \
         GROUP BY u.id, u.username ORDER BY u.username",
    )
    .fetch_all(&pool)
    .await?;
    for row in &counts {
        let username: String = row.get("username");
        let issue_count: i64 = row.get("issue_count");
        println!("{}: {} issues", username, issue_count);
    }
    println!();

    println!("{}", RULE);
    println!("SAMPLE ISSUES");
    println!("{}", RULE);
    let issues = sqlx::query(
        "SELECT u.username, i.title, i.status, i.priority \
         FROM issues i JOIN users u ON i.owner_id = u.id \
         ORDER BY u.username, i.title LIMIT 15",
    )
    .fetch_all(&pool)
    .await?;
    for issue in &issues {
        let username: String = issue.get("username");
        let title: String = issue.get("title");
        let status: String = issue.get("status");
        let priority: String = issue.get("priority");
        println!(
            "[{}] {} - {}, Priority: {}",
            username, title, status, priority
        );
    }
    println!();

    println!("{}", RULE);
    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    let issue_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM issues")
        .fetch_one(&pool)
        .await?;
    println!("Total Users: {}", user_count);
    println!("Total Issues: {}", issue_count);
    println!("{}", RULE);

    Ok(())
}
