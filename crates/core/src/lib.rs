//! layer_core - Functional core for the Layer Platform API client.
//!
//! Everything in this crate is pure: path building, identifier handling,
//! attribute access and response classification. No I/O happens here.

pub mod api;
pub mod resource;
