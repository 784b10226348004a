use serde::Serialize;
use std::fmt;

/// Index of a declaration inside [SchemaFile::decls].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeclId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeclKind {
    Message,
    Enum,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclKind::Message => f.write_str("message"),
            DeclKind::Enum => f.write_str("enum"),
        }
    }
}

/// Cardinality keyword in front of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Presence {
    Required,
    Optional,
    Repeated,
}

impl Presence {
    pub fn from_keyword(keyword: &str) -> Option<Presence> {
        match keyword {
            "required" => Some(Presence::Required),
            "optional" => Some(Presence::Optional),
            "repeated" => Some(Presence::Repeated),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Presence::Required => "required",
            Presence::Optional => "optional",
            Presence::Repeated => "repeated",
        }
    }
}

/// The scalar field types understood by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Primitive {
    String,
    Uint64,
    Uint32,
    Fixed64,
    Bool,
    Bytes,
}

impl Primitive {
    pub const ALL: [Primitive; 6] = [
        Primitive::String,
        Primitive::Uint64,
        Primitive::Uint32,
        Primitive::Fixed64,
        Primitive::Bool,
        Primitive::Bytes,
    ];

    pub fn from_token(token: &str) -> Option<Primitive> {
        Primitive::ALL.into_iter().find(|p| p.token() == token)
    }

    pub fn token(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Uint64 => "uint64",
            Primitive::Uint32 => "uint32",
            Primitive::Fixed64 => "fixed64",
            Primitive::Bool => "bool",
            Primitive::Bytes => "bytes",
        }
    }
}

/// What a field's type token refers to.
///
/// The parser fills in `Primitive` or `Unresolved`; the prepare pass replaces every
/// `Unresolved` with the declaration it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Primitive(Primitive),
    Enum(DeclId),
    Message(DeclId),
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDecl {
    pub name:      String,
    /// Wire field number.
    pub index:     u32,
    pub presence:  Option<Presence>,
    /// The type token exactly as written in the schema.
    pub type_name: String,
    pub default:   Option<bool>,
    pub resolved:  FieldType,
}

impl FieldDecl {
    pub fn new(
        name: String,
        index: u32,
        presence: Option<Presence>,
        type_name: String,
        default: Option<bool>,
    ) -> FieldDecl {
        let resolved = match Primitive::from_token(&type_name) {
            Some(primitive) => FieldType::Primitive(primitive),
            None => FieldType::Unresolved,
        };
        FieldDecl { name, index, presence, type_name, default, resolved }
    }

    pub fn is_repeated(&self) -> bool {
        self.presence == Some(Presence::Repeated)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumItem {
    pub name:  String,
    pub index: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MessageBody {
    /// Nested messages and enums in declaration order.
    pub children: Vec<DeclId>,
    /// Fields in declaration order.
    pub fields:   Vec<FieldDecl>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EnumBody {
    /// Items in declaration order.
    pub items: Vec<EnumItem>,
}

impl EnumBody {
    /// Items sorted by ascending index, the order cases are emitted in.
    pub fn items_by_index(&self) -> Vec<&EnumItem> {
        let mut items: Vec<&EnumItem> = self.items.iter().collect();
        items.sort_by_key(|item| item.index);
        items
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeclBody {
    Message(MessageBody),
    Enum(EnumBody),
}

/// One `message` or `enum` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decl {
    pub name:        String,
    pub parent:      Option<DeclId>,
    pub body:        DeclBody,
    /// Wrapper type name, assigned by the prepare pass.
    pub output_name: String,
    /// Dotted reference to the wrapper type from file scope.
    pub swift_path:  String,
    /// Dotted reference to the SwiftProtobuf type this declaration wraps.
    pub wire_name:   String,
}

impl Decl {
    pub fn new(name: String, parent: Option<DeclId>, kind: DeclKind) -> Decl {
        let body = match kind {
            DeclKind::Message => DeclBody::Message(MessageBody::default()),
            DeclKind::Enum => DeclBody::Enum(EnumBody::default()),
        };
        Decl {
            name,
            parent,
            body,
            output_name: String::new(),
            swift_path:  String::new(),
            wire_name:   String::new(),
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self.body {
            DeclBody::Message(_) => DeclKind::Message,
            DeclBody::Enum(_) => DeclKind::Enum,
        }
    }

    /// Nested declarations; enums never have any.
    pub fn children(&self) -> &[DeclId] {
        match &self.body {
            DeclBody::Message(body) => &body.children,
            DeclBody::Enum(_) => &[],
        }
    }

    pub fn fields(&self) -> &[FieldDecl] {
        match &self.body {
            DeclBody::Message(body) => &body.fields,
            DeclBody::Enum(_) => &[],
        }
    }
}

/// Root of a parsed schema. Owns every declaration; nesting is expressed with
/// [DeclId] links so parents can be walked without back-pointers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SchemaFile {
    pub package: Option<String>,
    /// Top-level declarations in declaration order.
    pub roots:   Vec<DeclId>,
    pub decls:   Vec<Decl>,
}

impl SchemaFile {
    pub fn new() -> SchemaFile {
        SchemaFile::default()
    }

    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.0]
    }

    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.0]
    }

    /// Allocates a declaration without linking it into its parent yet.
    pub fn open(&mut self, name: &str, parent: Option<DeclId>, kind: DeclKind) -> DeclId {
        let id = DeclId(self.decls.len());
        self.decls.push(Decl::new(name.to_string(), parent, kind));
        id
    }

    /// Links a finished declaration into its parent (or the file root).
    pub fn attach(&mut self, id: DeclId) {
        match self.decl(id).parent {
            None => self.roots.push(id),
            Some(parent) => {
                if let DeclBody::Message(body) = &mut self.decl_mut(parent).body {
                    body.children.push(id);
                }
            }
        }
    }

    /// All declarations, parents before children, in declaration order.
    pub fn walk(&self) -> Vec<DeclId> {
        let mut order = Vec::with_capacity(self.decls.len());
        for &root in &self.roots {
            order.push(root);
            order.extend(self.descendants(root));
        }
        order
    }
}
