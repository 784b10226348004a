use crate::{
    typemap::{
        base_swift_type, is_enum, is_message, is_nullable, is_objc_representable, swift_type,
        wire_element_type,
    },
    utils::{capitalize, escape_swift_identifier, lower_camel_case, quote, swift_member_reference},
    writer::LineWriter,
};
use proto_wrappers_schema::{Decl, DeclBody, DeclId, EnumBody, FieldDecl, FieldType, Presence, SchemaFile};

const HEADER: &str = "//
//  Generated by protowrap. Do not edit.
//

import Foundation
import SwiftProtobuf
";

/// Emits the Swift wrapper source for a prepared schema.
///
/// Declarations are emitted in declaration order, nested ones inside their owner's
/// class body.
pub fn compile_schema_to_swift(schema: &SchemaFile) -> String {
    let mut generator = SwiftGenerator {
        schema,
        writer: LineWriter::new(),
    };
    generator.writer.extend(HEADER);
    for &root in &schema.roots {
        generator.generate(root);
    }
    generator.writer.into_text()
}

/// Swift case name for an enum item, e.g. `DELIVERY_RECEIPT` → `deliveryReceipt`.
pub fn case_name(item_name: &str) -> String {
    lower_camel_case(item_name)
}

/// `(case name, raw value)` pairs in ascending index order.
pub fn case_pairs(body: &EnumBody) -> Vec<(String, i32)> {
    body.items_by_index()
        .into_iter()
        .map(|item| (case_name(&item.name), item.index))
        .collect()
}

/// Local holding a field's wrapped value inside `parseProto`.
fn parse_local(field: &FieldDecl) -> String {
    if field.is_repeated() && (is_message(field) || is_enum(field)) {
        format!("{}Wrapped", field.name)
    } else {
        escape_swift_identifier(&field.name)
    }
}

struct SwiftGenerator<'a> {
    schema: &'a SchemaFile,
    writer: LineWriter,
}

impl<'a> SwiftGenerator<'a> {
    fn generate(&mut self, id: DeclId) {
        let schema = self.schema;
        let decl = schema.decl(id);
        match &decl.body {
            DeclBody::Message(_) => self.generate_message(id, decl),
            DeclBody::Enum(body) => self.generate_enum(decl, body),
        }
    }

    /// `Owner.NameWrap` / `Owner.NameUnwrap` for the enum `id`.
    fn converter(&self, id: DeclId, suffix: &str) -> String {
        let decl = self.schema.decl(id);
        match decl.parent {
            Some(parent) => format!("{}.{}{}", self.schema.decl(parent).swift_path, decl.output_name, suffix),
            None => format!("{}{}", decl.output_name, suffix),
        }
    }

    /// Error type of the top-level message enclosing `id`.
    fn error_type(&self, id: DeclId) -> String {
        let top = self.schema.ancestors(id).last().copied().unwrap_or(id);
        let top = self.schema.decl(top);
        format!("{}.{}Error", top.swift_path, top.output_name)
    }

    fn generate_message(&mut self, id: DeclId, decl: &'a Decl) {
        let fields = decl.fields();

        self.writer.add(format!("// MARK: - {}", decl.output_name));
        self.writer.newline();
        self.writer.add(format!("@objc public class {}: NSObject {{", decl.output_name));
        self.writer.newline();
        self.writer.push_indent();

        if decl.parent.is_none() {
            self.writer.add(format!("public enum {}Error: Error {{", decl.output_name));
            self.writer.push_indent();
            self.writer.add("case invalidProtobuf(description: String)");
            self.writer.pop_indent();
            self.writer.add("}");
            self.writer.newline();
        }

        for &child in decl.children() {
            self.generate(child);
        }

        // Properties
        for field in fields {
            let attribute = if is_objc_representable(field) { "@objc " } else { "" };
            self.writer.add(format!(
                "{}public let {}: {}",
                attribute,
                escape_swift_identifier(&field.name),
                swift_type(self.schema, field)
            ));
        }
        if !fields.is_empty() {
            self.writer.newline();
        }

        self.generate_initializer(fields);

        self.writer.add("@objc");
        self.writer.add("public func serializedData() throws -> Data {");
        self.writer.push_indent();
        self.writer.add("return try self.asProtobuf.serializedData()");
        self.writer.pop_indent();
        self.writer.add("}");
        self.writer.newline();

        self.generate_parse(id, decl);
        self.generate_as_protobuf(decl);

        self.writer.pop_indent();
        self.writer.rstrip();
        self.writer.add("}");
        self.writer.newline();
    }

    fn generate_initializer(&mut self, fields: &[FieldDecl]) {
        if fields.is_empty() {
            self.writer.add("@objc public override init() {");
            self.writer.add("}");
            self.writer.newline();
            return;
        }

        let parameters = fields
            .iter()
            .map(|field| format!("{}: {}", escape_swift_identifier(&field.name), swift_type(self.schema, field)))
            .collect::<Vec<_>>()
            .join(", ");
        let attribute = if fields.iter().all(is_objc_representable) { "@objc " } else { "" };
        self.writer.add(format!("{}public init({}) {{", attribute, parameters));
        self.writer.push_indent();
        for field in fields {
            self.writer.add(format!("self.{} = {}", field.name, escape_swift_identifier(&field.name)));
        }
        self.writer.pop_indent();
        self.writer.add("}");
        self.writer.newline();
    }

    /// Wire value → wrapper value for a single element.
    fn wrap_element(&self, field: &FieldDecl, value: &str) -> String {
        match field.resolved {
            FieldType::Message(target) => {
                format!("try {}.parseProto({})", self.schema.decl(target).swift_path, value)
            }
            FieldType::Enum(target) => format!("{}({})", self.converter(target, "Wrap"), value),
            FieldType::Primitive(_) | FieldType::Unresolved => value.to_string(),
        }
    }

    /// Wrapper value → wire value for a single element.
    fn unwrap_element(&self, field: &FieldDecl, value: &str) -> String {
        match field.resolved {
            FieldType::Message(_) => format!("{}.asProtobuf", value),
            FieldType::Enum(target) => format!("{}({})", self.converter(target, "Unwrap"), value),
            FieldType::Primitive(_) | FieldType::Unresolved => value.to_string(),
        }
    }

    fn generate_parse(&mut self, id: DeclId, decl: &Decl) {
        let fields = decl.fields();

        self.writer.add("@objc");
        self.writer.add(format!(
            "public class func parseData(_ serializedData: Data) throws -> {} {{",
            decl.swift_path
        ));
        self.writer.push_indent();
        self.writer.add(format!("let proto = try {}(serializedData: serializedData)", decl.wire_name));
        self.writer.add("return try parseProto(proto)");
        self.writer.pop_indent();
        self.writer.add("}");
        self.writer.newline();

        self.writer.add(format!(
            "fileprivate class func parseProto(_ proto: {}) throws -> {} {{",
            decl.wire_name, decl.swift_path
        ));
        self.writer.push_indent();

        let error_type = self.error_type(id);
        for field in fields {
            let ident = escape_swift_identifier(&field.name);
            let wire = format!("proto.{}", field.name);
            let has = format!("proto.has{}", capitalize(&field.name));

            if field.presence == Some(Presence::Required) {
                let description = quote(&format!("{} missing required field: {}", decl.output_name, field.name));
                self.writer.add(format!("guard {} else {{", has));
                self.writer.push_indent();
                self.writer.add(format!("throw {}.invalidProtobuf(description: {})", error_type, description));
                self.writer.pop_indent();
                self.writer.add("}");
            }

            if field.is_repeated() {
                if is_message(field) || is_enum(field) {
                    let local = parse_local(field);
                    self.writer.add(format!(
                        "var {}: [{}] = []",
                        local,
                        base_swift_type(self.schema, field)
                    ));
                    self.writer.add(format!("for item in {} {{", wire));
                    self.writer.push_indent();
                    self.writer.add(format!("{}.append({})", local, self.wrap_element(field, "item")));
                    self.writer.pop_indent();
                    self.writer.add("}");
                } else {
                    self.writer.add(format!("let {} = {}", ident, wire));
                }
            } else if is_nullable(field) {
                self.writer.add(format!("var {}: {} = nil", ident, swift_type(self.schema, field)));
                self.writer.add(format!("if {} {{", has));
                self.writer.push_indent();
                self.writer.add(format!("{} = {}", ident, self.wrap_element(field, &wire)));
                self.writer.pop_indent();
                self.writer.add("}");
            } else {
                self.writer.add(format!("let {} = {}", ident, self.wrap_element(field, &wire)));
            }
            self.writer.newline();
        }

        let arguments = fields
            .iter()
            .map(|field| format!("{}: {}", field.name, parse_local(field)))
            .collect::<Vec<_>>()
            .join(", ");
        self.writer.add(format!("return {}({})", decl.swift_path, arguments));
        self.writer.pop_indent();
        self.writer.add("}");
        self.writer.newline();
    }

    fn generate_as_protobuf(&mut self, decl: &Decl) {
        let fields = decl.fields();

        self.writer.add(format!("fileprivate var asProtobuf: {} {{", decl.wire_name));
        self.writer.push_indent();

        if fields.is_empty() {
            self.writer.add(format!("return {}()", decl.wire_name));
            self.writer.pop_indent();
            self.writer.add("}");
            self.writer.newline();
            return;
        }

        self.writer.add(format!("let proto = {}.with {{ (builder) in", decl.wire_name));
        self.writer.push_indent();
        for field in fields {
            let name = &field.name;
            if field.is_repeated() {
                self.writer.add(format!(
                    "var {}Unwrapped = [{}]()",
                    name,
                    wire_element_type(self.schema, field)
                ));
                self.writer.add(format!("for item in self.{} {{", name));
                self.writer.push_indent();
                self.writer.add(format!("{}Unwrapped.append({})", name, self.unwrap_element(field, "item")));
                self.writer.pop_indent();
                self.writer.add("}");
                self.writer.add(format!("builder.{} = {}Unwrapped", name, name));
            } else if is_enum(field) {
                self.writer.add(format!(
                    "builder.{} = {}",
                    name,
                    self.unwrap_element(field, &format!("self.{}", name))
                ));
            } else if is_nullable(field) {
                let ident = escape_swift_identifier(name);
                self.writer.add(format!("if let {} = self.{} {{", ident, name));
                self.writer.push_indent();
                self.writer.add(format!("builder.{} = {}", name, self.unwrap_element(field, &ident)));
                self.writer.pop_indent();
                self.writer.add("}");
            } else {
                self.writer.add(format!(
                    "builder.{} = {}",
                    name,
                    self.unwrap_element(field, &format!("self.{}", name))
                ));
            }
            self.writer.newline();
        }
        self.writer.rstrip();
        self.writer.pop_indent();
        self.writer.add("}");
        self.writer.newline();
        self.writer.add("return proto");
        self.writer.pop_indent();
        self.writer.add("}");
        self.writer.newline();
    }

    fn generate_enum(&mut self, decl: &Decl, body: &EnumBody) {
        let pairs = case_pairs(body);

        self.writer.add(format!("// MARK: - {}", decl.output_name));
        self.writer.newline();
        self.writer.add(format!("@objc public enum {}: Int32 {{", decl.output_name));
        self.writer.push_indent();
        for (case, index) in &pairs {
            self.writer.add(format!("case {} = {}", escape_swift_identifier(case), index));
        }
        self.writer.pop_indent();
        self.writer.add("}");
        self.writer.newline();

        self.generate_enum_converter(&pairs, &format!("{}Wrap", decl.output_name), &decl.wire_name, &decl.swift_path);
        self.generate_enum_converter(&pairs, &format!("{}Unwrap", decl.output_name), &decl.swift_path, &decl.wire_name);
    }

    /// One exhaustive case-by-case switch with no default arm.
    fn generate_enum_converter(&mut self, pairs: &[(String, i32)], name: &str, from: &str, to: &str) {
        self.writer.add(format!("fileprivate class func {}(_ value: {}) -> {} {{", name, from, to));
        self.writer.push_indent();
        self.writer.add("switch value {");
        for (case, _) in pairs {
            let member = swift_member_reference(case);
            self.writer.add(format!("case {}: return {}", member, member));
        }
        self.writer.add("}");
        self.writer.pop_indent();
        self.writer.add("}");
        self.writer.newline();
    }
}
