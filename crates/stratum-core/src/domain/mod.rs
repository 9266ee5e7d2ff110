// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stratum.
//!
//! This module contains pure hierarchy logic with no I/O. Filesystem and
//! subprocess concerns are reached through ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Names, paths and registry patches are computed, never written
//! - **No external crates**: Only std library + thiserror + serde
//! - **Immutable values**: `PathSet` and `HierarchyState` are built once per call
//!
pub mod error;
pub mod identifier;
pub mod naming;
pub mod paths;
pub mod registry;
pub mod snapshot;

pub use error::{DomainError, ErrorCategory};
pub use identifier::{EntityIdentifier, Granularity};
pub use naming::{CanonicalName, EntityKind, NamingScheme};
pub use paths::{AppPaths, ModuleDir, ModulePaths, PathSet, ProjectPaths};
pub use registry::{LinePatch, RegistryEntry, imports_include, insert_after_marker};
pub use snapshot::{ExistenceSnapshot, HierarchyState};
