//! Wire-level pieces of the registry REST contract.
//!
//! Nothing here performs I/O: these are the paths, payload shapes and body
//! parsing rules the HTTP client in `padron-core` applies.

pub mod auth;
pub mod body;
pub mod endpoints;
pub mod errors;
pub mod jwt;
pub mod listing;
