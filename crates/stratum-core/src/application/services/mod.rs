//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! "create this hierarchy", "show what would be created" and
//! "delete this project".

pub mod existence_oracle;
pub mod orchestrator;
pub mod registry_patcher;
pub mod scaffold_invoker;

#[cfg(test)]
pub(crate) mod test_support;

pub use existence_oracle::ExistenceOracle;
pub use orchestrator::{APP_ROUTES_TEMPLATE, HierarchyOrchestrator, MODULE_ROUTES_TEMPLATE};
pub use registry_patcher::TextRegistryPatcher;
pub use scaffold_invoker::{DEFAULT_BOILERPLATE_FILES, InvokerOptions, ScaffoldInvoker};
