// src/output/mod.rs
//! Output planning and delivery: every file the build writes goes
//! through an [`OutputPlan`] executed by the writer.

mod types;
mod writer;

pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::deliver;
