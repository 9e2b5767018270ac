//! Aggregate statistics and roster over the final attendee list

use serde::Serialize;

use crate::entities::attendee::AttendeeRecord;

/// Summary figures for a closed session
///
/// Price figures are 0 when nobody registered.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub average_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub minors_count: usize,
}

impl Statistics {
    pub fn compute(records: &[AttendeeRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let prices = records.iter().map(AttendeeRecord::price);
        let sum: f64 = prices.clone().sum();
        let max_price = prices.clone().fold(f64::NEG_INFINITY, f64::max);
        let min_price = prices.fold(f64::INFINITY, f64::min);

        Self {
            total: records.len(),
            average_price: sum / records.len() as f64,
            max_price,
            min_price,
            minors_count: records.iter().filter(|r| r.is_minor()).count(),
        }
    }
}

/// One roster line: initial, name, age, modality, price and domain
pub fn roster_line(record: &AttendeeRecord) -> String {
    format!(
        "{} - {}, {} años, {}, {:.2} €, dominio: {}",
        record.initial(),
        record.name(),
        record.age(),
        record.modality(),
        record.price(),
        record.domain()
    )
}

/// Roster lines in registration order
pub fn roster(records: &[AttendeeRecord]) -> Vec<String> {
    records.iter().map(roster_line).collect()
}
