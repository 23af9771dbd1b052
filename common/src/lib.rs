//! # Padron Common
//!
//! Types shared by every crate in the workspace:
//!
//! * **[`models`]**: records mirrored from the registry backend (Empresa, Usuario, catalogs).
//! * **[`config`]**: runtime settings and the persisted client file.
//! * **[`session`]**: session snapshots and the stores that keep them between runs.
//! * **[`cuit`]**: tax id normalization and format validation.

pub mod config;
pub mod cuit;
pub mod models;
pub mod session;
