//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== trenddash Seed Script ===");

    seed_product_trends(&pool).await?;
    seed_visitor_logs(&pool).await?;

    println!("\n=== Seed complete! ===");

    Ok(())
}

/// Views and purchases for two products over the last 10 days.
async fn seed_product_trends(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_trends")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Product trends already exist ({count})");
        return Ok(());
    }

    let trends = vec![
        ("prod-1", "2025-08-28", 50, 2),
        ("prod-1", "2025-09-01", 120, 5),
        ("prod-1", "2025-09-05", 80, 3),
        ("prod-2", "2025-08-30", 30, 1),
        ("prod-2", "2025-09-02", 90, 4),
        ("prod-2", "2025-09-06", 60, 2),
    ];

    for (product_id, date, views, purchases) in &trends {
        let date: NaiveDate = date.parse()?;
        sqlx::query(
            "INSERT INTO product_trends (product_id, date, views, purchases)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(product_id)
        .bind(date)
        .bind(views)
        .bind(purchases)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} product trend rows", trends.len());
    Ok(())
}

/// Page visits over the last 7 days (sess-1 visits twice).
async fn seed_visitor_logs(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitor_logs")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Visitor logs already exist ({count})");
        return Ok(());
    }

    let logs = vec![
        ("sess-1", "192.168.1.1", "Chrome", "/products", "US", "2025-09-01T10:00:00Z"),
        ("sess-1", "192.168.1.1", "Chrome", "/cart", "US", "2025-09-01T10:05:00Z"),
        ("sess-2", "192.168.1.2", "Firefox", "/products", "US", "2025-09-02T12:00:00Z"),
        ("sess-3", "192.168.1.3", "Safari", "/home", "CA", "2025-09-03T14:00:00Z"),
        ("sess-4", "192.168.1.4", "Edge", "/products", "US", "2025-09-04T16:00:00Z"),
        ("sess-5", "192.168.1.5", "Chrome", "/checkout", "UK", "2025-09-05T18:00:00Z"),
        ("sess-6", "192.168.1.6", "Firefox", "/products", "US", "2025-09-06T20:00:00Z"),
        ("sess-7", "192.168.1.7", "Safari", "/home", "CA", "2025-09-07T22:00:00Z"),
    ];

    for (session_id, ip, user_agent, path, country, created_at) in &logs {
        let created_at: DateTime<Utc> = created_at.parse()?;
        sqlx::query(
            "INSERT INTO visitor_logs (session_id, ip, user_agent, path, country, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(session_id)
        .bind(ip)
        .bind(user_agent)
        .bind(path)
        .bind(country)
        .bind(created_at)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} visitor log rows", logs.len());
    Ok(())
}
