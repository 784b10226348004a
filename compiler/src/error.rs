use proto_wrappers_schema::DeclKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoWrapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Does not exist: {}", .0.display())]
    MissingPath(PathBuf),

    #[error("Invalid syntax[{file}:{line}]: {text}")]
    InvalidSyntax {
        file: String,
        line: usize,
        text: String,
    },

    #[error("Incomplete {kind} {name}: {file}")]
    IncompleteBlock {
        file: String,
        kind: DeclKind,
        name: String,
    },

    #[error("More than one package statement[{file}:{line}]: {package}")]
    DuplicatePackage {
        file:    String,
        line:    usize,
        package: String,
    },

    #[error("Duplicate message field name[{file}:{line}]: {message}.{name}")]
    DuplicateFieldName {
        file:    String,
        line:    usize,
        message: String,
        name:    String,
    },

    #[error("Duplicate message field index[{file}:{line}]: {message}.{name} = {index}")]
    DuplicateFieldIndex {
        file:    String,
        line:    usize,
        message: String,
        name:    String,
        index:   u32,
    },

    #[error("Duplicate enum item name[{file}:{line}]: {enum_name}.{name}")]
    DuplicateEnumItemName {
        file:      String,
        line:      usize,
        enum_name: String,
        name:      String,
    },

    #[error("Duplicate enum item index[{file}:{line}]: {enum_name}.{name} = {index}")]
    DuplicateEnumItemIndex {
        file:      String,
        line:      usize,
        enum_name: String,
        name:      String,
        index:     i32,
    },

    #[error("Unresolved type {type_name} for field {scope}.{field}: {file}")]
    UnresolvedType {
        file:      String,
        scope:     String,
        field:     String,
        type_name: String,
    },

    #[error("Ambiguous type {type_name} for field {scope}.{field}, candidates {candidates}: {file}")]
    AmbiguousType {
        file:       String,
        scope:      String,
        field:      String,
        type_name:  String,
        candidates: String,
    },
}
