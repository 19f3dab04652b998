use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database row for a price rule. Rates are stored as TEXT so decimal
/// values round-trip exactly through SQLite.
#[derive(Debug, Clone, FromRow)]
pub struct PriceRuleRow {
    pub id: i64,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub initial_rate: String,
    pub additional_rate: String,
}

/// A pricing rule in effect for parking sessions whose entry falls within
/// `[starts_at, ends_at]`.
#[derive(Debug, Clone)]
pub struct PriceRule {
    pub id: i64,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    /// Rate charged for the first hour (half of it for the first 30 minutes).
    pub initial_rate: Decimal,
    /// Rate charged per additional hour past the first.
    pub additional_rate: Decimal,
}

impl TryFrom<PriceRuleRow> for PriceRule {
    type Error = rust_decimal::Error;

    fn try_from(row: PriceRuleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            initial_rate: row.initial_rate.parse()?,
            additional_rate: row.additional_rate.parse()?,
        })
    }
}
