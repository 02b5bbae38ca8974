//! Block-maintenance stages, diff application, and their error classes

pub mod commit;
pub mod error;
pub mod maintenance;

pub use commit::{commit_contract_diff, commit_delayed_output_diff, commit_output_diff};
pub use error::{ConsistencyError, MaintenanceError, CONSISTENCY_CHECKS};
pub use maintenance::apply_maintenance;
