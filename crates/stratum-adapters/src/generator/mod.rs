//! Skeleton generator adapters.
//!
//! - [`DjangoAdminGenerator`] shells out to `django-admin`
//! - [`BuiltinGenerator`] writes an equivalent skeleton through the
//!   [`Filesystem`](stratum_core::application::ports::Filesystem) port, so no
//!   Python toolchain is needed

mod builtin;
mod django_admin;

pub use builtin::BuiltinGenerator;
pub use django_admin::{DEFAULT_PROGRAM, DjangoAdminGenerator};
