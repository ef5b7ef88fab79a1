//! Day-of-year climatology: cleaning, aggregation across years and percentile statistics.

pub mod aggregator;
pub mod analyzer;
pub mod cleaner;
pub mod error;
pub mod statistics;
