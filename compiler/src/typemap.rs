use proto_wrappers_schema::{FieldDecl, FieldType, Presence, Primitive, SchemaFile};

/// Swift type for a primitive token.
pub fn primitive_swift_type(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "String",
        Primitive::Uint64 => "UInt64",
        Primitive::Uint32 => "UInt32",
        Primitive::Fixed64 => "UInt64",
        Primitive::Bool => "Bool",
        Primitive::Bytes => "Data",
    }
}

/// The element type of a field, ignoring its presence rule.
///
/// An unresolved token is passed through verbatim; the prepare pass rejects those
/// before anything is emitted.
pub fn base_swift_type(schema: &SchemaFile, field: &FieldDecl) -> String {
    match field.resolved {
        FieldType::Primitive(primitive) => primitive_swift_type(primitive).to_string(),
        FieldType::Enum(id) | FieldType::Message(id) => schema.decl(id).swift_path.clone(),
        FieldType::Unresolved => field.type_name.clone(),
    }
}

/// Whether an `optional` field is surfaced as a Swift optional.
///
/// Integers, booleans and enums always carry a usable default on the wire, so their
/// optionality is dropped.
pub fn can_be_optional(field: &FieldDecl) -> bool {
    !matches!(
        field.resolved,
        FieldType::Primitive(Primitive::Uint64 | Primitive::Uint32 | Primitive::Fixed64 | Primitive::Bool)
            | FieldType::Enum(_)
    )
}

/// True when the generated property is `T?`.
pub fn is_nullable(field: &FieldDecl) -> bool {
    field.presence == Some(Presence::Optional) && can_be_optional(field)
}

pub fn is_enum(field: &FieldDecl) -> bool {
    matches!(field.resolved, FieldType::Enum(_))
}

pub fn is_message(field: &FieldDecl) -> bool {
    matches!(field.resolved, FieldType::Message(_))
}

/// Full property type, presence rule applied.
pub fn swift_type(schema: &SchemaFile, field: &FieldDecl) -> String {
    let base = base_swift_type(schema, field);
    match field.presence {
        Some(Presence::Repeated) => format!("[{}]", base),
        Some(Presence::Optional) if can_be_optional(field) => format!("{}?", base),
        Some(Presence::Optional) | Some(Presence::Required) | None => base,
    }
}

/// The SwiftProtobuf element type, used when rebuilding repeated fields.
pub fn wire_element_type(schema: &SchemaFile, field: &FieldDecl) -> String {
    match field.resolved {
        FieldType::Enum(id) | FieldType::Message(id) => schema.decl(id).wire_name.clone(),
        _ => base_swift_type(schema, field),
    }
}

/// Objective-C has no representation for arrays of Swift enums.
pub fn is_objc_representable(field: &FieldDecl) -> bool {
    !(field.is_repeated() && is_enum(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto_wrappers_schema::DeclKind;

    fn field(presence: Option<Presence>, type_name: &str) -> FieldDecl {
        FieldDecl::new("f".into(), 1, presence, type_name.into(), None)
    }

    #[test]
    fn test_optional_primitive_collapse() {
        let schema = SchemaFile::new();
        let flag = field(Some(Presence::Optional), "bool");
        let note = field(Some(Presence::Optional), "string");
        let count = field(Some(Presence::Optional), "fixed64");
        assert_eq!(swift_type(&schema, &flag), "Bool");
        assert_eq!(swift_type(&schema, &note), "String?");
        assert_eq!(swift_type(&schema, &count), "UInt64");
        assert!(!is_nullable(&flag));
        assert!(is_nullable(&note));
    }

    #[test]
    fn test_presence_rules() {
        let schema = SchemaFile::new();
        assert_eq!(swift_type(&schema, &field(Some(Presence::Repeated), "string")), "[String]");
        assert_eq!(swift_type(&schema, &field(Some(Presence::Required), "uint32")), "UInt32");
        assert_eq!(swift_type(&schema, &field(Some(Presence::Optional), "bytes")), "Data?");
        assert_eq!(swift_type(&schema, &field(None, "bytes")), "Data");
    }

    #[test]
    fn test_declared_types_use_swift_path() {
        let mut schema = SchemaFile::new();
        let owner = schema.open("Owner", None, DeclKind::Message);
        let kind = schema.open("Kind", Some(owner), DeclKind::Enum);
        schema.attach(kind);
        schema.attach(owner);
        schema.decl_mut(kind).swift_path = "POwner.POwnerKind".into();
        schema.decl_mut(kind).wire_name = "W_Owner.Kind".into();
        schema.decl_mut(owner).swift_path = "POwner".into();

        let mut e = field(Some(Presence::Optional), "Kind");
        e.resolved = FieldType::Enum(kind);
        assert_eq!(swift_type(&schema, &e), "POwner.POwnerKind");

        let mut m = field(Some(Presence::Optional), "Owner");
        m.resolved = FieldType::Message(owner);
        assert_eq!(swift_type(&schema, &m), "POwner?");

        let mut kinds = field(Some(Presence::Repeated), "Kind");
        kinds.resolved = FieldType::Enum(kind);
        assert_eq!(wire_element_type(&schema, &kinds), "W_Owner.Kind");
        assert!(!is_objc_representable(&kinds));
    }

    #[test]
    fn test_unresolved_passes_through() {
        let schema = SchemaFile::new();
        assert_eq!(swift_type(&schema, &field(Some(Presence::Required), "Mystery")), "Mystery");
    }
}
