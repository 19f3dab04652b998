use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use sqlx::sqlite::SqlitePool;

use crate::core::config::PricingConfig;
use crate::core::error::{AppError, Result};
use crate::features::pricing::models::{PriceRule, PriceRuleRow};

/// The seed rule runs through the end of this year.
const SEED_END_YEAR: i32 = 2026;

/// Service resolving which price rule applies to a parking session.
pub struct PricingService {
    pool: SqlitePool,
}

impl PricingService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Finds the price rule applicable to an entry timestamp.
    ///
    /// Rules whose range contains the entry are preferred; on overlap the
    /// most recently started range wins. When no range contains the entry,
    /// the lookup falls back to the most recent rule that merely started
    /// before it, ignoring `ends_at`. The fallback is deliberately
    /// permissive: it tolerates rules whose end was set too early, at the
    /// cost of applying an expired-looking range.
    pub async fn resolve_for_entry(&self, entered_at: NaiveDateTime) -> Result<PriceRule> {
        let row = sqlx::query_as::<_, PriceRuleRow>(
            r#"
            SELECT id, starts_at, ends_at, initial_rate, additional_rate
            FROM price_rules
            WHERE datetime(?1) BETWEEN datetime(starts_at) AND datetime(ends_at)
            ORDER BY datetime(starts_at) DESC
            LIMIT 1
            "#,
        )
        .bind(entered_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve price rule: {:?}", e);
            AppError::Database(e)
        })?;

        let row = match row {
            Some(row) => Some(row),
            None => sqlx::query_as::<_, PriceRuleRow>(
                r#"
                SELECT id, starts_at, ends_at, initial_rate, additional_rate
                FROM price_rules
                WHERE datetime(starts_at) <= datetime(?1)
                ORDER BY datetime(starts_at) DESC
                LIMIT 1
                "#,
            )
            .bind(entered_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to resolve fallback price rule: {:?}", e);
                AppError::Database(e)
            })?,
        };

        let row = row.ok_or_else(|| {
            AppError::PricingUnavailable(format!(
                "No price rule found for entry at {}",
                entered_at
            ))
        })?;

        let rule_id = row.id;
        PriceRule::try_from(row).map_err(|e| {
            AppError::Internal(format!("Price rule {} has a malformed rate: {}", rule_id, e))
        })
    }

    /// Inserts the default price rule covering Jan 1 of the current year
    /// through Dec 31 2026, if that exact rule is not present yet.
    pub async fn ensure_seed_rule(&self, config: &PricingConfig) -> Result<()> {
        let starts_at = seed_range_start();
        let ends_at = seed_range_end();

        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(1) FROM price_rules WHERE starts_at = ?1 AND ends_at = ?2",
        )
        .bind(starts_at)
        .bind(ends_at)
        .fetch_one(&self.pool)
        .await?;

        if existing > 0 {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO price_rules (starts_at, ends_at, initial_rate, additional_rate) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(starts_at)
        .bind(ends_at)
        .bind(config.seed_initial_rate.to_string())
        .bind(config.seed_additional_rate.to_string())
        .execute(&self.pool)
        .await?;

        tracing::info!(
            "Seeded price rule: initial rate {}, additional rate {}, valid {} to {}",
            config.seed_initial_rate,
            config.seed_additional_rate,
            starts_at.date(),
            ends_at.date()
        );

        Ok(())
    }
}

fn seed_range_start() -> NaiveDateTime {
    let year = Local::now().year();
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn seed_range_end() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(SEED_END_YEAR, 12, 31)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{seed_price_rule, test_pool};

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[tokio::test]
    async fn test_resolve_picks_containing_range() {
        let pool = test_pool().await;
        seed_price_rule(&pool, "2025-01-01 00:00:00", "2025-12-31 00:00:00", "2.00", "1.00").await;

        let service = PricingService::new(pool);
        let rule = service
            .resolve_for_entry(datetime("2025-06-10 08:00:00"))
            .await
            .unwrap();

        assert_eq!(rule.initial_rate.to_string(), "2.00");
        assert_eq!(rule.additional_rate.to_string(), "1.00");
    }

    #[tokio::test]
    async fn test_resolve_overlapping_ranges_most_recent_start_wins() {
        let pool = test_pool().await;
        seed_price_rule(&pool, "2025-01-01 00:00:00", "2025-12-31 00:00:00", "2.00", "1.00").await;
        seed_price_rule(&pool, "2025-06-01 00:00:00", "2025-12-31 00:00:00", "3.50", "1.50").await;

        let service = PricingService::new(pool);
        let rule = service
            .resolve_for_entry(datetime("2025-06-10 08:00:00"))
            .await
            .unwrap();

        assert_eq!(rule.initial_rate.to_string(), "3.50");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_past_range_end() {
        let pool = test_pool().await;
        // Rule expired well before the entry; the fallback still applies it.
        seed_price_rule(&pool, "2024-01-01 00:00:00", "2024-06-30 00:00:00", "4.00", "2.00").await;

        let service = PricingService::new(pool);
        let rule = service
            .resolve_for_entry(datetime("2025-06-10 08:00:00"))
            .await
            .unwrap();

        assert_eq!(rule.initial_rate.to_string(), "4.00");
    }

    #[tokio::test]
    async fn test_resolve_fails_when_no_rule_started_before_entry() {
        let pool = test_pool().await;
        seed_price_rule(&pool, "2026-01-01 00:00:00", "2026-12-31 00:00:00", "2.00", "1.00").await;

        let service = PricingService::new(pool);
        let err = service
            .resolve_for_entry(datetime("2025-06-10 08:00:00"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PricingUnavailable(_)));
    }

    #[tokio::test]
    async fn test_ensure_seed_rule_is_idempotent() {
        let pool = test_pool().await;
        let config = PricingConfig {
            seed_initial_rate: "2.00".parse().unwrap(),
            seed_additional_rate: "1.00".parse().unwrap(),
        };

        let service = PricingService::new(pool.clone());
        service.ensure_seed_rule(&config).await.unwrap();
        service.ensure_seed_rule(&config).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM price_rules")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        // The seeded rule covers the current moment
        let rule = service
            .resolve_for_entry(Local::now().naive_local())
            .await
            .unwrap();
        assert_eq!(rule.initial_rate.to_string(), "2.00");
    }
}
