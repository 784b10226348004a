use crate::{error::ProtoWrapError, normalizer::Line};
use lazy_static::lazy_static;
use proto_wrappers_schema::{
    DeclBody, DeclId, DeclKind, EnumItem, FieldDecl, Presence, SchemaFile,
};
use regex::{Captures, Regex};
use std::slice::Iter;
use tracing::debug;

lazy_static! {
    static ref SYNTAX_RX:  Regex = Regex::new(r"^syntax ").unwrap();
    static ref OPTION_RX:  Regex = Regex::new(r"^option ").unwrap();
    static ref PACKAGE_RX: Regex = Regex::new(r"^package\s+(.+);").unwrap();
    static ref MESSAGE_RX: Regex = Regex::new(r"^message\s+(.+?)\s+\{$").unwrap();
    static ref ENUM_RX:    Regex = Regex::new(r"^enum\s+(.+?)\s+\{$").unwrap();
    // optional bytes id         = 1;
    // optional bool  isComplete = 2 [default = false];
    static ref FIELD_RX:   Regex = Regex::new(
        r"^(?:(optional|required|repeated)\s+)?(\w+?)\s+(\w+?)\s*=\s*(\d+?)\s*(\[default = (true|false)\])?;$"
    ).unwrap();
    static ref ITEM_RX:    Regex = Regex::new(r"^(\w+)\s*=\s*(\d+)\s*;$").unwrap();
}

const BLOCK_END: &str = "}";

/// Parses normalized lines into a [SchemaFile]. `file` is only used in error messages.
pub fn parse_schema(lines: &[Line], file: &str) -> Result<SchemaFile, ProtoWrapError> {
    let mut parser = Parser {
        lines:  lines.iter(),
        file,
        schema: SchemaFile::new(),
    };
    parser.parse_file()?;
    Ok(parser.schema)
}

struct Parser<'a> {
    lines:  Iter<'a, Line>,
    file:   &'a str,
    schema: SchemaFile,
}

fn group<'t>(caps: &'t Captures<'_>, index: usize) -> Option<&'t str> {
    caps.get(index).map(|m| m.as_str().trim())
}

impl<'a> Parser<'a> {
    fn invalid(&self, line: &Line) -> ProtoWrapError {
        ProtoWrapError::InvalidSyntax {
            file: self.file.to_string(),
            line: line.number,
            text: line.text.clone(),
        }
    }

    fn incomplete(&self, id: DeclId) -> ProtoWrapError {
        let decl = self.schema.decl(id);
        ProtoWrapError::IncompleteBlock {
            file: self.file.to_string(),
            kind: decl.kind(),
            name: decl.name.clone(),
        }
    }

    fn parse_file(&mut self) -> Result<(), ProtoWrapError> {
        while let Some(line) = self.lines.next() {
            if SYNTAX_RX.is_match(&line.text) {
                debug!("ignoring syntax statement");
                continue;
            }

            if OPTION_RX.is_match(&line.text) {
                debug!("ignoring option statement");
                continue;
            }

            if let Some(caps) = PACKAGE_RX.captures(&line.text) {
                let package = group(&caps, 1).unwrap_or_default().to_string();
                if self.schema.package.is_some() {
                    return Err(ProtoWrapError::DuplicatePackage {
                        file: self.file.to_string(),
                        line: line.number,
                        package,
                    });
                }
                debug!(%package, "package");
                self.schema.package = Some(package);
                continue;
            }

            if let Some(caps) = MESSAGE_RX.captures(&line.text) {
                let name = group(&caps, 1).unwrap_or_default();
                self.parse_message(None, name)?;
                continue;
            }

            return Err(self.invalid(line));
        }
        Ok(())
    }

    fn parse_message(&mut self, parent: Option<DeclId>, name: &str) -> Result<(), ProtoWrapError> {
        debug!(decl = name, "begin message");
        let id = self.schema.open(name, parent, DeclKind::Message);
        let mut fields: Vec<FieldDecl> = Vec::new();

        loop {
            let Some(line) = self.lines.next() else {
                return Err(self.incomplete(id));
            };

            if line.text == BLOCK_END {
                if let DeclBody::Message(body) = &mut self.schema.decl_mut(id).body {
                    body.fields = fields;
                }
                self.schema.attach(id);
                debug!(decl = name, "end message");
                return Ok(());
            }

            if let Some(caps) = ENUM_RX.captures(&line.text) {
                let enum_name = group(&caps, 1).unwrap_or_default();
                self.parse_enum(id, enum_name)?;
                continue;
            }

            if let Some(caps) = MESSAGE_RX.captures(&line.text) {
                let message_name = group(&caps, 1).unwrap_or_default();
                self.parse_message(Some(id), message_name)?;
                continue;
            }

            if let Some(caps) = FIELD_RX.captures(&line.text) {
                let field = self.parse_field(&caps, line)?;

                if fields.iter().any(|f| f.name == field.name) {
                    return Err(ProtoWrapError::DuplicateFieldName {
                        file:    self.file.to_string(),
                        line:    line.number,
                        message: name.to_string(),
                        name:    field.name,
                    });
                }
                if fields.iter().any(|f| f.index == field.index) {
                    return Err(ProtoWrapError::DuplicateFieldIndex {
                        file:    self.file.to_string(),
                        line:    line.number,
                        message: name.to_string(),
                        name:    field.name,
                        index:   field.index,
                    });
                }

                debug!(
                    decl = name,
                    field = %field.name,
                    index = field.index,
                    type_name = %field.type_name,
                    presence = ?field.presence,
                    "message field"
                );
                fields.push(field);
                continue;
            }

            return Err(self.invalid(line));
        }
    }

    fn parse_field(&self, caps: &Captures<'_>, line: &Line) -> Result<FieldDecl, ProtoWrapError> {
        let presence = group(caps, 1).and_then(Presence::from_keyword);
        let type_name = group(caps, 2).unwrap_or_default().to_string();
        let name = group(caps, 3).unwrap_or_default().to_string();
        let index = group(caps, 4)
            .unwrap_or_default()
            .parse::<u32>()
            .map_err(|_| self.invalid(line))?;
        let default = group(caps, 6).map(|value| value == "true");

        Ok(FieldDecl::new(name, index, presence, type_name, default))
    }

    fn parse_enum(&mut self, parent: DeclId, name: &str) -> Result<(), ProtoWrapError> {
        debug!(enum_name = name, "begin enum");
        let id = self.schema.open(name, Some(parent), DeclKind::Enum);
        let mut items: Vec<EnumItem> = Vec::new();

        loop {
            let Some(line) = self.lines.next() else {
                return Err(self.incomplete(id));
            };

            if line.text == BLOCK_END {
                if let DeclBody::Enum(body) = &mut self.schema.decl_mut(id).body {
                    body.items = items;
                }
                self.schema.attach(id);
                debug!(enum_name = name, "end enum");
                return Ok(());
            }

            if let Some(caps) = ITEM_RX.captures(&line.text) {
                let item_name = group(&caps, 1).unwrap_or_default().to_string();
                let index = group(&caps, 2)
                    .unwrap_or_default()
                    .parse::<i32>()
                    .map_err(|_| self.invalid(line))?;

                if items.iter().any(|item| item.name == item_name) {
                    return Err(ProtoWrapError::DuplicateEnumItemName {
                        file:      self.file.to_string(),
                        line:      line.number,
                        enum_name: name.to_string(),
                        name:      item_name,
                    });
                }
                if items.iter().any(|item| item.index == index) {
                    return Err(ProtoWrapError::DuplicateEnumItemIndex {
                        file:      self.file.to_string(),
                        line:      line.number,
                        enum_name: name.to_string(),
                        name:      item_name,
                        index,
                    });
                }

                debug!(enum_name = name, item = %item_name, index, "enum item");
                items.push(EnumItem { name: item_name, index });
                continue;
            }

            return Err(self.invalid(line));
        }
    }
}
