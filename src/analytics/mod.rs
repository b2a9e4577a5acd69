//! Spending analytics: the financial summary and the monthly trend.

mod summary;
mod trend;

pub use summary::{CategoryBreakdown, Summary, get_summary_endpoint, summarize};
pub use trend::get_monthly_trend_endpoint;
