//! Pure domain types: setting identities, typed settings, and the registry.
//!
//! Nothing in this module touches storage. A [`setting::Setting`] holds its
//! current value in memory; persisting it is always an explicit operation
//! driven by the controller in `prefstore-fs`.

pub mod id;
pub mod registry;
pub mod setting;
