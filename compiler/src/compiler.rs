use crate::{
    config::GeneratorConfig,
    error::ProtoWrapError,
    gen_swift::compile_schema_to_swift,
    normalizer::normalize,
    parser::parse_schema,
    printer::print_schema,
    resolver::prepare,
};
use proto_wrappers_schema::SchemaFile;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Normalize, parse and prepare `text`. `file` names the source in error messages.
pub fn compile_schema(text: &str, file: &str, config: &GeneratorConfig) -> Result<SchemaFile, ProtoWrapError> {
    let lines = normalize(text);
    let mut schema = parse_schema(&lines, file)?;
    prepare(&mut schema, config, file)?;
    info!(file, declarations = schema.decls.len(), "schema prepared");
    Ok(schema)
}

/// Full text-to-text pipeline: schema source in, Swift source out.
pub fn generate_swift(text: &str, file: &str, config: &GeneratorConfig) -> Result<String, ProtoWrapError> {
    let schema = compile_schema(text, file, config)?;
    Ok(compile_schema_to_swift(&schema))
}

/// Canonical schema text for `text`, without resolving field types.
pub fn format_schema(text: &str, file: &str) -> Result<String, ProtoWrapError> {
    let schema = parse_schema(&normalize(text), file)?;
    Ok(print_schema(&schema))
}

/// Pretty JSON dump of the prepared declaration tree.
pub fn schema_to_json(schema: &SchemaFile) -> Result<String, ProtoWrapError> {
    Ok(serde_json::to_string_pretty(schema)?)
}

/// Reads `input`, generates the wrappers and writes them to
/// `<dst_dir>/<wrapper_prefix>.swift`. Nothing is written unless every stage succeeds.
pub fn generate_file(input: &Path, dst_dir: &Path, config: &GeneratorConfig) -> Result<PathBuf, ProtoWrapError> {
    if !input.exists() {
        return Err(ProtoWrapError::MissingPath(input.to_path_buf()));
    }
    if !dst_dir.is_dir() {
        return Err(ProtoWrapError::MissingPath(dst_dir.to_path_buf()));
    }

    let text = fs::read_to_string(input)?;
    let source = generate_swift(&text, &input.display().to_string(), config)?;

    let dst_path = dst_dir.join(config.output_file_name());
    fs::write(&dst_path, source)?;
    info!(output = %dst_path.display(), "wrappers written");
    Ok(dst_path)
}
