//! Relocation engine: classify, plan, execute.

pub mod classify;
pub mod confirm;
pub mod execute;
mod move_contents;
pub mod plan;

pub use classify::{PathState, classify};
pub use confirm::{AssumeYes, Confirm, DeclineAll, StdinConfirm};
pub use execute::{OperationReport, Outcome, execute_operation, execute_plan};
pub use move_contents::move_dir_contents;
pub use plan::{RelocationOperation, RelocationPlan, RelocationTarget, plan_relocation};
