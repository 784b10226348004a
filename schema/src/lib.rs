//! The declaration tree produced by parsing a proto-wrappers schema, plus the scope
//! queries used to resolve field types against it.
//!
//! ```
//! use proto_wrappers_schema::*;
//!
//! let mut schema = SchemaFile::new();
//! let envelope = schema.open("Envelope", None, DeclKind::Message);
//! let kind = schema.open("Type", Some(envelope), DeclKind::Enum);
//! schema.attach(kind);
//! schema.attach(envelope);
//!
//! assert_eq!(schema.chain(kind), vec!["Envelope", "Type"]);
//! assert_eq!(schema.lookup(envelope, "Type"), Lookup::Found(kind));
//! ```

pub mod scope;
pub mod tree;

pub use scope::*;
pub use tree::*;
