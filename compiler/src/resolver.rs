use crate::{config::GeneratorConfig, error::ProtoWrapError, utils::capitalize};
use proto_wrappers_schema::{DeclBody, DeclId, DeclKind, FieldType, Lookup, SchemaFile};
use tracing::debug;

/// SwiftProtobuf renames enums called `Type` to avoid clashing with `.Type`.
const RENAMED_WIRE_ENUMS: [&str; 1] = ["Type"];

/// Wrapper name for a declaration chain: the prefix followed by each segment capitalized.
pub fn derive_output_name(wrapper_prefix: &str, chain: &[&str]) -> String {
    let mut name = wrapper_prefix.to_string();
    for segment in chain {
        name.push_str(&capitalize(segment));
    }
    name
}

/// Dotted SwiftProtobuf type reference, e.g. `SignalServiceProtos_Envelope.TypeEnum`.
pub fn derive_wire_name(proto_prefix: &str, chain: &[&str], kind: DeclKind) -> String {
    let mut segments: Vec<String> = chain.iter().map(|s| s.to_string()).collect();
    if kind == DeclKind::Enum {
        if let Some(last) = segments.last_mut() {
            if RENAMED_WIRE_ENUMS.contains(&last.as_str()) {
                last.push_str("Enum");
            }
        }
    }
    let dotted = segments.join(".");
    if proto_prefix.is_empty() {
        dotted
    } else {
        format!("{}_{}", proto_prefix, dotted)
    }
}

/// Annotates every declaration with its derived names and resolves every field type.
///
/// Fails on the first field whose type cannot be matched to exactly one declaration.
pub fn prepare(schema: &mut SchemaFile, config: &GeneratorConfig, file: &str) -> Result<(), ProtoWrapError> {
    // walk() yields parents first, so each swift_path can extend its parent's.
    for id in schema.walk() {
        let chain = schema.chain(id);
        let output_name = derive_output_name(&config.wrapper_prefix, &chain);
        let wire_name = derive_wire_name(&config.proto_prefix, &chain, schema.decl(id).kind());
        let swift_path = match schema.decl(id).parent {
            Some(parent) => format!("{}.{}", schema.decl(parent).swift_path, output_name),
            None => output_name.clone(),
        };
        debug!(decl = %schema.decl(id).name, %output_name, %wire_name, "prepared");

        let decl = schema.decl_mut(id);
        decl.output_name = output_name;
        decl.wire_name = wire_name;
        decl.swift_path = swift_path;
    }

    for id in schema.walk() {
        let resolved = resolve_fields(schema, id, file)?;
        if let DeclBody::Message(body) = &mut schema.decl_mut(id).body {
            for (field, ty) in body.fields.iter_mut().zip(resolved) {
                field.resolved = ty;
            }
        }
    }
    Ok(())
}

fn resolve_fields(schema: &SchemaFile, id: DeclId, file: &str) -> Result<Vec<FieldType>, ProtoWrapError> {
    let decl = schema.decl(id);
    let mut resolved = Vec::with_capacity(decl.fields().len());

    for field in decl.fields() {
        if field.resolved != FieldType::Unresolved {
            resolved.push(field.resolved);
            continue;
        }

        let ty = match schema.lookup(id, &field.type_name) {
            Lookup::Found(target) => match schema.decl(target).kind() {
                DeclKind::Enum => FieldType::Enum(target),
                DeclKind::Message => FieldType::Message(target),
            },
            Lookup::Ambiguous(candidates) => {
                let candidates = candidates
                    .iter()
                    .map(|&candidate| schema.chain(candidate).join("."))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(ProtoWrapError::AmbiguousType {
                    file:      file.to_string(),
                    scope:     schema.chain(id).join("."),
                    field:     field.name.clone(),
                    type_name: field.type_name.clone(),
                    candidates,
                });
            }
            Lookup::Missing => {
                return Err(ProtoWrapError::UnresolvedType {
                    file:      file.to_string(),
                    scope:     schema.chain(id).join("."),
                    field:     field.name.clone(),
                    type_name: field.type_name.clone(),
                });
            }
        };
        debug!(field = %field.name, type_name = %field.type_name, ?ty, "resolved");
        resolved.push(ty);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{normalizer::normalize, parser::parse_schema};

    fn prepared(text: &str) -> Result<SchemaFile, ProtoWrapError> {
        let mut schema = parse_schema(&normalize(text), "test.proto")?;
        prepare(&mut schema, &GeneratorConfig::new("SSKProto", "SignalServiceProtos"), "test.proto")?;
        Ok(schema)
    }

    fn find(schema: &SchemaFile, chain: &[&str]) -> DeclId {
        schema
            .walk()
            .into_iter()
            .find(|&id| schema.chain(id) == chain)
            .unwrap()
    }

    #[test]
    fn test_derived_names() {
        let schema = prepared(
            "message Envelope {\nenum Type {\nUNKNOWN = 0;\n}\nmessage inner {\n}\n}",
        )
        .unwrap();

        let envelope = schema.decl(find(&schema, &["Envelope"]));
        assert_eq!(envelope.output_name, "SSKProtoEnvelope");
        assert_eq!(envelope.wire_name, "SignalServiceProtos_Envelope");
        assert_eq!(envelope.swift_path, "SSKProtoEnvelope");

        let kind = schema.decl(find(&schema, &["Envelope", "Type"]));
        assert_eq!(kind.output_name, "SSKProtoEnvelopeType");
        assert_eq!(kind.wire_name, "SignalServiceProtos_Envelope.TypeEnum");
        assert_eq!(kind.swift_path, "SSKProtoEnvelope.SSKProtoEnvelopeType");

        let inner = schema.decl(find(&schema, &["Envelope", "inner"]));
        assert_eq!(inner.output_name, "SSKProtoEnvelopeInner");
        assert_eq!(inner.wire_name, "SignalServiceProtos_Envelope.inner");
    }

    #[test]
    fn test_identical_subtrees_get_distinct_names() {
        let schema = prepared(
            "message A {\nmessage Item {\n}\n}\nmessage B {\nmessage Item {\n}\n}",
        )
        .unwrap();
        let under_a = schema.decl(find(&schema, &["A", "Item"]));
        let under_b = schema.decl(find(&schema, &["B", "Item"]));
        assert_eq!(under_a.output_name, "SSKProtoAItem");
        assert_eq!(under_b.output_name, "SSKProtoBItem");
    }

    #[test]
    fn test_wire_name_without_prefix() {
        assert_eq!(derive_wire_name("", &["A", "B"], DeclKind::Message), "A.B");
        assert_eq!(derive_wire_name("P", &["Type"], DeclKind::Message), "P_Type");
    }

    #[test]
    fn test_field_resolves_to_nearest_scope() {
        let schema = prepared(
            r#"
            message M {
              enum E {
                X = 0;
              }
              optional E e = 1;
            }
            message Sibling {
              enum E {
                Y = 0;
              }
            }
            "#,
        )
        .unwrap();
        let m = find(&schema, &["M"]);
        let nested = find(&schema, &["M", "E"]);
        assert_eq!(schema.decl(m).fields()[0].resolved, FieldType::Enum(nested));
    }

    #[test]
    fn test_field_resolves_to_outer_message() {
        let schema = prepared(
            "message Address {\n}\nmessage Person {\nmessage Home {\nrequired Address where = 1;\n}\n}",
        )
        .unwrap();
        let home = find(&schema, &["Person", "Home"]);
        let address = find(&schema, &["Address"]);
        assert_eq!(schema.decl(home).fields()[0].resolved, FieldType::Message(address));
    }

    #[test]
    fn test_unresolved_type() {
        let err = prepared("message A {\noptional Missing m = 1;\n}").unwrap_err();
        match err {
            ProtoWrapError::UnresolvedType { type_name, scope, field, file } => {
                assert_eq!(type_name, "Missing");
                assert_eq!(scope, "A");
                assert_eq!(field, "m");
                assert_eq!(file, "test.proto");
            }
            other => panic!("expected UnresolvedType but got {:?}", other),
        }
    }

    #[test]
    fn test_ambiguous_type() {
        let err = prepared(
            "message A {\nmessage B {\nenum K {\nX = 0;\n}\n}\nenum K {\nY = 0;\n}\noptional K k = 1;\n}",
        )
        .unwrap_err();
        assert!(
            matches!(err, ProtoWrapError::AmbiguousType { ref candidates, .. } if candidates == "A.B.K, A.K"),
            "expected AmbiguousType but got {:?}",
            err
        );
    }
}
