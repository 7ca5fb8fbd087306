//! HTTP request handlers.

mod api_types;
mod classify;
mod health;
mod rate_limit;

pub use classify::classify_file;
pub use health::health;
pub use rate_limit::enforce_rate_limit;
