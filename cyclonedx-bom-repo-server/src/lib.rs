//! The HTTP surface of the CycloneDX BOM repository server.
//!
//! Requests flow through three thin layers: [`negotiation`] turns
//! `Accept`/`Content-Type` headers into a concrete `(format, spec version)`
//! pair, [`api`] maps the HTTP verbs on `/bom` onto the storage crate, and
//! [`config`] describes everything an operator can tune. The binary in
//! `main.rs` wires them together.

pub mod api;
pub mod config;
pub mod negotiation;
