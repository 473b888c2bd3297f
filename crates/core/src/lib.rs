#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Core of the review watcher: response validation, status interpretation,
//! the poll cycle and the supervising loop that de-duplicates notifications.

pub mod config;
pub mod cycle;
pub mod error;
pub mod model;
pub mod notify;
pub mod ports;
pub mod status;
pub mod supervisor;
pub mod validation;

mod util;

pub use config::{Credentials, RawCredentials, WatchConfig};
pub use cycle::poll_cycle;
pub use error::{ConfigError, CycleError, NotifyError};
pub use model::{CycleOutcome, ReviewStatus, WorkItemRecord};
pub use notify::BestEffortNotifier;
pub use ports::{Notifier, StatusSource};
pub use status::interpret;
pub use supervisor::{CycleState, Supervisor, SupervisorSettings, Tick};
pub use util::now_secs;
pub use validation::validate_response;
