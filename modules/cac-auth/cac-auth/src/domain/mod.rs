//! Domain layer for the CAC auth simulator.

pub mod attempt_log;
pub mod certificate;
pub mod clearance;
pub mod error;
pub mod local_client;
pub mod outcome;
pub mod service;
pub mod token;

pub use attempt_log::{MemoryAttemptSink, TracingAttemptSink};
pub use error::DomainError;
pub use local_client::CacAuthLocalClient;
pub use outcome::{AuthOutcome, OutcomeTable};
pub use service::Service;
