//! Client for the NASA POWER daily point API.

pub mod client;
pub mod error;
pub mod response;
