//! Functional core for talentdesk.
//!
//! Pure functions and data types shared by the HTTP server and the xtask
//! tooling: key and item construction, update expressions, pagination
//! cursors, the storage trait and the postal-code helpers. Nothing in this
//! crate performs I/O.

pub mod entity;
pub mod pagination;
pub mod storage;
pub mod zip;
