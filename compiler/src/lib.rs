//! busidl-compiler
//!
//! This crate implements the front end of the busidl XML IDL:
//!  1) An XML reader + schema parser for interface definition units,
//!  2) A type registry with backend-specific primitive profiles,
//!  3) A resolution pass (unknown types, duplicate names),
//!  4) Wire and introspection signature computation,
//!  5) Error types (`IdlError`).
//!
//! Code emission consumes the resolved `Unit` and lives elsewhere.

pub mod error;
pub mod types;
pub mod utils;
pub mod xml;
pub mod registry;
pub mod parser;
pub mod resolver;
pub mod signature;
pub mod compiler;

pub use compiler::compile_unit;
pub use error::IdlError;
pub use types::{Backend, Unit};
