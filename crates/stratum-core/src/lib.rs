//! Stratum Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stratum
//! hierarchy scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stratum-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (HierarchyOrchestrator, Oracle, ...)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, ScaffoldGenerator, Patch)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stratum-adapters (Infrastructure)    │
//! │ (LocalFilesystem, DjangoAdminGenerator) │
//! └─────────────────────────────────────────┘
//!
//!  Domain Layer (pure): identifiers, naming, paths, registry lines
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stratum_core::prelude::*;
//!
//! let fs: Arc<dyn Filesystem> = Arc::new(filesystem);
//! let orchestrator = HierarchyOrchestrator::new(
//!     "env/dev",
//!     NamingScheme::default(),
//!     fs.clone(),
//!     Box::new(generator),
//!     Box::new(TextRegistryPatcher::new(fs)),
//!     InvokerOptions::default(),
//! );
//!
//! let id = EntityIdentifier::parse("blog.posts.comments")?;
//! let report = orchestrator.create(&id)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        HierarchyOrchestrator, InvokerOptions, ScaffoldReport, StepRecord, StepStatus,
        StepSubject, TextRegistryPatcher,
        ports::{Filesystem, PatchOutcome, RegistryPatcher, ScaffoldGenerator},
    };
    pub use crate::domain::{EntityIdentifier, Granularity, NamingScheme, PathSet};
    pub use crate::error::{StratumError, StratumResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
