//! proto-wrappers-compiler
//!
//! This crate implements:
//!  1) A line normalizer that strips comments and blank lines,
//!  2) A recursive-descent parser for the supported proto2 subset,
//!  3) The prepare pass (derived names, scoped field type resolution),
//!  4) The Swift type mapping and code generation (`compile_schema_to_swift` → `String`),
//!  5) A canonical schema printer, and
//!  6) Error types (`ProtoWrapError`).

pub mod compiler;
pub mod config;
pub mod error;
pub mod gen_swift;
pub mod normalizer;
pub mod parser;
pub mod printer;
pub mod resolver;
pub mod typemap;
pub mod utils;
pub mod writer;

pub use compiler::{compile_schema, format_schema, generate_file, generate_swift, schema_to_json};
pub use config::GeneratorConfig;
pub use error::ProtoWrapError;
pub use gen_swift::compile_schema_to_swift;
