//! Attribute & type-string utilities (component A).
//!
//! Pure functions over `&str` / `&[String]` — no entity access, no side
//! effects.

use crate::error::CoreError;

/// The vocabulary of legal reference-modifier strings. [`strip_reference_modifiers`]
/// itself is purely mechanical (it grabs the maximal trailing run of `&`/`*`
/// characters); it is the classifier's job to reject a trailing run outside
/// this set (`UnsupportedModifier`).
pub const LEGAL_MODIFIERS: [&str; 5] = ["&", "&&", "*", "*&", "**"];

/// Splits a type string into its base type and maximal trailing run of
/// `&`/`*` characters (the "reference-modifier string"). The returned
/// modifier is not validated here — it may be empty, one of the five legal
/// forms, or something else the classifier must reject.
pub fn strip_reference_modifiers(type_name: &str) -> (&str, &str) {
    let trimmed = type_name.trim_end();
    let bytes = trimmed.as_bytes();
    let mut start = bytes.len();
    while start > 0 && matches!(bytes[start - 1], b'&' | b'*') {
        start -= 1;
    }
    (trimmed[..start].trim_end(), &trimmed[start..])
}

/// Returns the substring between the outermost `<` and its matching `>`,
/// or an empty string if `type_name` has no template argument.
pub fn get_template_param(type_name: &str) -> Result<&str, CoreError> {
    let Some(start) = type_name.find('<') else {
        return Ok("");
    };
    let bytes = type_name.as_bytes();
    let mut depth = 0i32;
    let mut end = None;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        match b {
            b'<' => depth += 1,
            b'>' => {
                depth -= 1;
                if depth == 0 {
                    end = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    match end {
        Some(end) => Ok(&type_name[start + 1..end]),
        None => Err(CoreError::MalformedTemplate {
            text: type_name.to_string(),
        }),
    }
}

/// Returns the type argument of a leading `rpc::shared_ptr<...>` wrapper,
/// trimmed of whitespace, or `type_name` unchanged if the wrapper is absent.
pub fn extract_shared_ptr_inner(type_name: &str) -> Result<&str, CoreError> {
    const PATTERN: &str = "rpc::shared_ptr<";
    let Some(pos) = type_name.find(PATTERN) else {
        return Ok(type_name);
    };
    let inner_start = pos + PATTERN.len();
    let Some(rel_end) = type_name[inner_start..].rfind('>') else {
        return Err(CoreError::MalformedSharedPtr {
            text: type_name.to_string(),
        });
    };
    Ok(type_name[inner_start..inner_start + rel_end].trim())
}

/// Splits a (possibly `::`-prefixed) qualified name into its segments.
/// A leading `::` is preserved as a leading empty segment so callers can
/// detect "root-relative" lookups.
pub fn split_namespaces(qualified_name: &str) -> Vec<&str> {
    qualified_name.split("::").collect()
}

/// Whether `attributes` contains the literal `in` attribute.
pub fn is_in(attributes: &[String]) -> bool {
    attributes.iter().any(|a| a == "in")
}

/// Whether `attributes` contains the literal `out` attribute.
pub fn is_out(attributes: &[String]) -> bool {
    attributes.iter().any(|a| a == "out")
}

/// Whether `attributes` contains the literal `const` attribute.
pub fn is_const(attributes: &[String]) -> bool {
    attributes.iter().any(|a| a == "const")
}

/// Whether `attributes` contains an attribute named `name`, ignoring any
/// `=value` suffix.
pub fn has_attribute(attributes: &[String], name: &str) -> bool {
    attributes.iter().any(|a| attr_name(a) == name)
}

/// The value of `name=value` attribute, or `""` if the attribute is absent
/// or carries no value.
pub fn attribute_value<'a>(attributes: &'a [String], name: &str) -> &'a str {
    attributes
        .iter()
        .find(|a| attr_name(a) == name)
        .and_then(|a| a.split_once('='))
        .map(|(_, v)| v)
        .unwrap_or("")
}

fn attr_name(attribute: &str) -> &str {
    attribute.split_once('=').map_or(attribute, |(n, _)| n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_each_modifier() {
        assert_eq!(strip_reference_modifiers("int"), ("int", ""));
        assert_eq!(strip_reference_modifiers("int&"), ("int", "&"));
        assert_eq!(strip_reference_modifiers("int &&"), ("int", "&&"));
        assert_eq!(strip_reference_modifiers("int*"), ("int", "*"));
        assert_eq!(strip_reference_modifiers("int *&"), ("int", "*&"));
        assert_eq!(strip_reference_modifiers("int**"), ("int", "**"));
    }

    #[test]
    fn template_param_extraction() {
        assert_eq!(get_template_param("int").unwrap(), "");
        assert_eq!(
            get_template_param("rpc::shared_ptr<foo::bar>").unwrap(),
            "foo::bar"
        );
        assert_eq!(
            get_template_param("std::map<int, rpc::shared_ptr<bar>>").unwrap(),
            "int, rpc::shared_ptr<bar>"
        );
    }

    #[test]
    fn template_param_unbalanced_errors() {
        assert!(get_template_param("rpc::shared_ptr<foo").is_err());
    }

    #[test]
    fn shared_ptr_inner_extraction() {
        assert_eq!(
            extract_shared_ptr_inner("rpc::shared_ptr< foo::bar >").unwrap(),
            "foo::bar"
        );
        assert_eq!(extract_shared_ptr_inner("int").unwrap(), "int");
    }

    #[test]
    fn shared_ptr_inner_malformed_errors() {
        assert!(extract_shared_ptr_inner("rpc::shared_ptr<foo").is_err());
    }

    #[test]
    fn namespace_splitting() {
        assert_eq!(split_namespaces("foo::bar::baz"), vec!["foo", "bar", "baz"]);
        assert_eq!(split_namespaces("::foo::bar"), vec!["", "foo", "bar"]);
        assert_eq!(split_namespaces("foo"), vec!["foo"]);
    }

    #[test]
    fn attribute_predicates() {
        let attrs = vec!["in".to_string(), "tag=5".to_string()];
        assert!(is_in(&attrs));
        assert!(!is_out(&attrs));
        assert!(has_attribute(&attrs, "tag"));
        assert_eq!(attribute_value(&attrs, "tag"), "5");
        assert_eq!(attribute_value(&attrs, "missing"), "");
    }
}
