use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

pub fn snake_case(s: &str) -> String {
    s.to_snake_case()
}

pub fn camel_case(s: &str) -> String {
    s.to_lower_camel_case()
}

pub fn upper_camel_case(s: &str) -> String {
    s.to_upper_camel_case()
}

/// Naive singularization: `-ies` becomes `-y`, then a trailing `-es` or `-s`
/// is dropped. This is not an inflector: `houses` becomes `hous`.
pub fn singularize(s: &str) -> String {
    if let Some(stem) = s.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }

    if let Some(stem) = s.strip_suffix("es") {
        if !stem.is_empty() {
            return stem.to_string();
        }
    }

    if let Some(stem) = s.strip_suffix('s') {
        if !stem.is_empty() {
            return stem.to_string();
        }
    }

    s.to_string()
}

/// Strips `prefix` from `name` when present. An empty prefix is a no-op.
pub fn strip_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return name;
    }

    name.strip_prefix(prefix).unwrap_or(name)
}

/// Replaces every character that cannot appear in an identifier with `_`.
pub fn sanitize_identifier(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Converts an arbitrary enum value (`open_source`, `in-progress`, `3d`) into
/// an `UpperCamelCase` identifier usable as an enum case in generated code.
pub fn enum_case_name(value: &str) -> String {
    let name = upper_camel_case(&sanitize_identifier(value));

    match name.chars().next() {
        None => "Empty".to_string(),
        Some(c) if c.is_ascii_digit() => format!("V{name}"),
        Some(_) => name,
    }
}
