pub use configuration::*;
pub use rate_limit::{
    enforce_rate_limit,
    RateLimiter,
};
pub use startup::SiteApp;
pub use telemetry::setup_tracing;

mod configuration;
mod rate_limit;
mod startup;
mod telemetry;
