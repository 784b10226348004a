use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Swift keywords that cannot be used as bare identifiers.
    static ref SWIFT_RESERVED: HashSet<&'static str> = [
        "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func",
        "import", "init", "inout", "internal", "let", "open", "operator", "private",
        "protocol", "public", "rethrows", "static", "struct", "subscript", "typealias",
        "var", "break", "case", "continue", "default", "defer", "do", "else",
        "fallthrough", "for", "guard", "if", "in", "repeat", "return", "switch", "where",
        "while", "as", "Any", "catch", "false", "is", "nil", "super", "self", "Self",
        "throw", "throws", "true", "try",
    ]
    .into_iter()
    .collect();
}

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
    }
}

/// `DELIVERY_RECEIPT` → `deliveryReceipt`.
pub fn lower_camel_case(s: &str) -> String {
    let mut result = String::new();
    for (i, word) in s.split('_').enumerate() {
        if i == 0 {
            result.push_str(&word.to_lowercase());
        } else {
            result.push_str(&capitalize(&word.to_lowercase()));
        }
    }
    result
}

pub fn is_swift_reserved(identifier: &str) -> bool {
    SWIFT_RESERVED.contains(identifier)
}

/// Backtick-quotes reserved words so they can stand as declared identifiers.
pub fn escape_swift_identifier(identifier: &str) -> String {
    if is_swift_reserved(identifier) {
        format!("`{}`", identifier)
    } else {
        identifier.to_string()
    }
}

/// Implicit member reference, e.g. `.red`. Names that mean something else after a dot
/// are backtick-quoted.
pub fn swift_member_reference(identifier: &str) -> String {
    match identifier {
        "init" | "self" | "Self" | "Type" | "Protocol" => format!(".`{}`", identifier),
        _ => format!(".{}", identifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_camel_case() {
        assert_eq!(lower_camel_case("RED"), "red");
        assert_eq!(lower_camel_case("DELIVERY_RECEIPT"), "deliveryReceipt");
        assert_eq!(lower_camel_case("PREKEY_BUNDLE_V2"), "prekeyBundleV2");
        assert_eq!(lower_camel_case("DEFAULT"), "default");
    }

    #[test]
    fn test_capitalize_keeps_tail() {
        assert_eq!(capitalize("envelope"), "Envelope");
        assert_eq!(capitalize("dataMessage"), "DataMessage");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_escape_swift_identifier() {
        assert_eq!(escape_swift_identifier("default"), "`default`");
        assert_eq!(escape_swift_identifier("red"), "red");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_swift_member_reference() {
        assert_eq!(swift_member_reference("red"), ".red");
        assert_eq!(swift_member_reference("default"), ".default");
        assert_eq!(swift_member_reference("init"), ".`init`");
        assert_eq!(swift_member_reference("self"), ".`self`");
    }
}
