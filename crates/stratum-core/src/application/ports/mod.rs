//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stratum-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ScaffoldGenerator`: Project/app skeleton generation
//!   - `RegistryPatcher`: Registry line insertion
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, PatchOutcome, RegistryPatcher, ScaffoldGenerator};

#[cfg(test)]
pub use output::MockScaffoldGenerator;
