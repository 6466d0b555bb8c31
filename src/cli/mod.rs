//! Command line workflows

pub mod orchestration;

pub use orchestration::{
    run_bump_workflow, BumpPlan, BumpTarget, BumpWorkflowArgs, FileChange, WorkflowResult,
};
