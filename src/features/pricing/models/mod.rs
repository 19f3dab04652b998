mod price_rule;

pub use price_rule::{PriceRule, PriceRuleRow};
