#[cfg(test)]
use chrono::NaiveDateTime;

#[cfg(test)]
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations applied.
///
/// A single connection keeps every query in the test on the same in-memory
/// database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

#[cfg(test)]
pub async fn seed_price_rule(
    pool: &SqlitePool,
    starts_at: &str,
    ends_at: &str,
    initial_rate: &str,
    additional_rate: &str,
) {
    sqlx::query(
        "INSERT INTO price_rules (starts_at, ends_at, initial_rate, additional_rate) \
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(starts_at)
    .bind(ends_at)
    .bind(initial_rate)
    .bind(additional_rate)
    .execute(pool)
    .await
    .expect("failed to seed price rule");
}

#[cfg(test)]
pub async fn insert_vehicle(pool: &SqlitePool, plate: &str, entered_at: &str) {
    let entered_at = NaiveDateTime::parse_from_str(entered_at, "%Y-%m-%d %H:%M:%S")
        .expect("invalid entry timestamp in test");

    sqlx::query("INSERT INTO vehicles (plate, entered_at) VALUES (?1, ?2)")
        .bind(plate)
        .bind(entered_at)
        .execute(pool)
        .await
        .expect("failed to insert vehicle");
}
