use crate::writer::LineWriter;
use proto_wrappers_schema::{DeclBody, DeclId, FieldDecl, SchemaFile};

/// Renders a schema back to canonical text that parses to an identical tree.
pub fn print_schema(schema: &SchemaFile) -> String {
    let mut writer = LineWriter::new();
    writer.add("syntax = \"proto2\";");
    if let Some(package) = &schema.package {
        writer.add(format!("package {};", package));
    }
    for &root in &schema.roots {
        writer.newline();
        print_decl(schema, root, &mut writer);
    }
    writer.into_text()
}

fn print_field(field: &FieldDecl) -> String {
    let mut line = String::new();
    if let Some(presence) = field.presence {
        line.push_str(presence.keyword());
        line.push(' ');
    }
    line.push_str(&format!("{} {} = {}", field.type_name, field.name, field.index));
    if let Some(default) = field.default {
        line.push_str(&format!(" [default = {}]", default));
    }
    line.push(';');
    line
}

fn print_decl(schema: &SchemaFile, id: DeclId, writer: &mut LineWriter) {
    let decl = schema.decl(id);
    writer.add(format!("{} {} {{", decl.kind(), decl.name));
    writer.push_indent();
    match &decl.body {
        DeclBody::Message(body) => {
            for &child in &body.children {
                print_decl(schema, child, writer);
            }
            for field in &body.fields {
                writer.add(print_field(field));
            }
        }
        DeclBody::Enum(body) => {
            for item in &body.items {
                writer.add(format!("{} = {};", item.name, item.index));
            }
        }
    }
    writer.pop_indent();
    writer.add("}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{normalizer::normalize, parser::parse_schema};

    fn parse(text: &str) -> SchemaFile {
        parse_schema(&normalize(text), "test.proto").unwrap()
    }

    #[test]
    fn test_print_is_canonical() {
        let schema = parse(
            "package x.y;\nmessage A {\noptional bool on = 2 [default = true];\nenum E {\nB = 2;\nA = 1;\n}\nstring s = 1;\n}",
        );
        let expected = "syntax = \"proto2\";
package x.y;

message A {
\tenum E {
\t\tB = 2;
\t\tA = 1;
\t}
\toptional bool on = 2 [default = true];
\tstring s = 1;
}
";
        assert_eq!(print_schema(&schema), expected);
    }

    #[test]
    fn test_print_then_parse_is_idempotent() {
        let input = r#"
        /* leading block
           comment */
        syntax = "proto2";
        package signalservice;
        option java_outer_classname = "SignalServiceProtos";

        message Envelope {
          enum Type {
            UNKNOWN = 0;
            CIPHERTEXT = 1;
          }
          optional Type type = 1; // inline
          repeated bytes blobs = 2;
          message Inner {
            message Deeper {
              required string note = 1;
            }
            optional Deeper deeper = 1;
          }
          required Inner inner = 3;
        }

        message Other {
          optional bool flag = 1 [default = false];
        }
        "#;
        let first = parse(input);
        let printed = print_schema(&first);
        let second = parse(&printed);
        assert_eq!(first, second);
        assert_eq!(print_schema(&second), printed);
    }
}
