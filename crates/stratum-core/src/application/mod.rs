//! Application layer for Stratum.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (HierarchyOrchestrator and its helpers)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Report**: The per-run step log handed back to the caller
//! - **Errors**: Application-specific error types
//!
//! Hierarchy rules (naming, paths, registry lines) live in `crate::domain`;
//! this layer only sequences them against the ports.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

pub use services::{
    ExistenceOracle, HierarchyOrchestrator, InvokerOptions, ScaffoldInvoker, TextRegistryPatcher,
};

pub use ports::{Filesystem, PatchOutcome, RegistryPatcher, ScaffoldGenerator};

pub use error::ApplicationError;
pub use report::{ScaffoldReport, StepRecord, StepStatus, StepSubject};
