//! lcm-idl-compiler
//!
//! This crate implements:
//!  1) A tokenizer for `.lcm` type definition files,
//!  2) A recursive-descent parser that checks declaration rules as it goes
//!     (duplicate names, array size references, enum values),
//!  3) `SchemaRegistry`, which collects the parsed structs and enums of a run
//!     and hands them to code emitters,
//!  4) Diagnostics (`Diagnostic`) and the error type (`LcmError`).

pub mod error;
pub mod diagnostic;
pub mod utils;
pub mod tokenizer;
pub mod parser;
pub mod verifier;
pub mod compiler;

pub use compiler::{compile_schema, SchemaRegistry};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::LcmError;
pub use parser::{parse_schema, ParsedFile};
