//! # Orchestration Engine
//!
//! The decision-making core shared by every lifecycle handler.
//!
//! ## Core Components
//!
//! - **ErrorClassifier**: ordered decision table mapping remote failures to handler error codes
//! - **TagDelta**: minimal tag mutations between previous and desired tag sets
//! - **Stabilizer**: single-probe evaluation of convergence against a time budget
//! - **ProgressEvent / CallbackContext**: the resumable result of one invocation
//! - **drive_to_completion**: in-process stand-in for the orchestrator's re-invocation loop

pub mod driver;
pub mod error_classifier;
pub mod stabilizer;
pub mod tag_reconciler;
pub mod types;

pub use driver::drive_to_completion;
pub use error_classifier::{
    ClassificationRule, ErrorClassification, ErrorClassifier, ErrorContext,
    StandardErrorClassifier,
};
pub use stabilizer::{
    StabilizationBudget, StabilizationConfig, StabilizationError, StabilizationPolicy,
    StabilizationStatus, Stabilizer,
};
pub use tag_reconciler::TagDelta;
pub use types::{
    CallbackContext, FailureDetails, HandlerErrorCode, OperationStatus, ProgressEvent,
    SuccessPayload,
};
