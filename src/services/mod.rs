pub mod aggregator;
pub mod alert_evaluator;
pub mod notifier;
pub mod price_source;
pub mod query_service;
pub mod scheduler;

pub use alert_evaluator::AlertEvaluator;
pub use notifier::{BrevoNotifier, Notifier};
pub use price_source::{MoralisClient, PriceSource};
pub use query_service::QueryService;
pub use scheduler::Scheduler;
