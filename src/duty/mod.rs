// Duty module - code normalization, rate parsing, lookup, aggregation

pub mod base_rate;
pub mod fees;
pub mod normalize;
pub mod resolver;
pub mod schedule;
pub mod trade_action;

pub use base_rate::BaseRate;
pub use fees::{calculate_hmf, calculate_mpf, Transport};
pub use normalize::{normalize_hts, trade_action_prefix};
pub use resolver::{DutyBreakdown, DutyResolver, Quote, QuoteLine, QuoteRequest};
pub use schedule::{Schedule, ScheduleEntry};
pub use trade_action::Sec301Index;
