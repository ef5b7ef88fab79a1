//! Random-forest regression forecast of daily temperature.

pub mod config;
pub mod error;
pub mod features;
pub mod forest;
pub mod generator;
pub mod scaler;
pub mod trainer;
pub mod tree;
