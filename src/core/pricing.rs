//! Age-based pricing
//!
//! The discount table is an ordered list of age ranges; the first range that
//! contains the attendee's age decides the discount. Ages matched by no rule
//! pay the full base price.

use serde::{Deserialize, Serialize};

/// One row of the discount table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    /// Inclusive lower bound (None = no lower bound)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,

    /// Exclusive upper bound (None = no upper bound)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,

    /// Fraction of the base price taken off, in [0, 1]
    pub discount: f64,
}

impl DiscountRule {
    /// Rule covering ages below `age`
    pub fn under(age: u32, discount: f64) -> Self {
        Self {
            min_age: None,
            max_age: Some(age),
            discount,
        }
    }

    /// Rule covering `age` and above
    pub fn from_age(age: u32, discount: f64) -> Self {
        Self {
            min_age: Some(age),
            max_age: None,
            discount,
        }
    }

    pub fn matches(&self, age: u32) -> bool {
        self.min_age.map_or(true, |min| age >= min) && self.max_age.map_or(true, |max| age < max)
    }
}

impl std::fmt::Display for DiscountRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pct = self.discount * 100.0;
        match (self.min_age, self.max_age) {
            (None, Some(max)) => write!(f, "age < {}: -{:.0}%", max, pct),
            (Some(min), None) => write!(f, "age >= {}: -{:.0}%", min, pct),
            (Some(min), Some(max)) => write!(f, "{} <= age < {}: -{:.0}%", min, max, pct),
            (None, None) => write!(f, "any age: -{:.0}%", pct),
        }
    }
}

/// Minors pay half, seniors get 30% off
pub fn default_discounts() -> Vec<DiscountRule> {
    vec![DiscountRule::under(18, 0.5), DiscountRule::from_age(65, 0.3)]
}

/// Price computed for a single age
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    pub age: u32,
    pub discount: f64,
    pub price: f64,
}

/// Base price plus ordered discount table
#[derive(Debug, Clone, PartialEq)]
pub struct PricingPolicy {
    base_price: f64,
    rules: Vec<DiscountRule>,
}

impl PricingPolicy {
    pub fn new(base_price: f64, rules: Vec<DiscountRule>) -> Self {
        Self { base_price, rules }
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    /// Discount fraction for an age, first matching rule wins
    pub fn discount(&self, age: u32) -> f64 {
        self.rules
            .iter()
            .find(|rule| rule.matches(age))
            .map_or(0.0, |rule| rule.discount)
    }

    /// Final price for an age, never negative
    pub fn price(&self, age: u32) -> f64 {
        (self.base_price * (1.0 - self.discount(age))).max(0.0)
    }

    pub fn quote(&self, age: u32) -> PriceQuote {
        PriceQuote {
            age,
            discount: self.discount(age),
            price: self.price(age),
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::new(50.0, default_discounts())
    }
}
