//! Layer-name option syntax: `Base Name(key:value; key:value)`.

use crate::{
    compile::function::FunctionKind,
    foundation::naming::{clean_parameter, to_identifier},
};

/// Function name used when a layer name yields no usable identifier.
pub const DEFAULT_FUNCTION_NAME: &str = "draw";

/// Result of splitting a layer name into a function base name and raw options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedLayerName {
    /// Sanitized identifier, never empty.
    pub base_name: String,
    /// Non-empty raw option strings in source order.
    pub options: Vec<String>,
    /// True when the name carried a `(...)` option list.
    pub has_options: bool,
}

/// Split a layer name into its base name and `;`-separated options.
///
/// The option list is the text between the last `(` and a closing `)`, which may be followed by
/// `;` and whitespace. Without an option list the whole name becomes the base name.
pub fn parse_layer_name(name: &str) -> ParsedLayerName {
    let body = name.trim_end();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();

    let split = body
        .strip_suffix(')')
        .and_then(|inner| inner.rfind('(').map(|open| (&inner[..open], &inner[open + 1..])));

    match split {
        Some((base, list)) => ParsedLayerName {
            base_name: identifier_or_default(base),
            options: list
                .split(';')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_owned)
                .collect(),
            has_options: true,
        },
        None => ParsedLayerName {
            base_name: identifier_or_default(name),
            options: Vec::new(),
            has_options: false,
        },
    }
}

fn identifier_or_default(raw: &str) -> String {
    let ident = to_identifier(raw);
    if ident.is_empty() {
        DEFAULT_FUNCTION_NAME.to_owned()
    } else {
        ident
    }
}

/// Split one option on its first `:` into a lowercased key and a cleaned value.
///
/// Returns `None` for options without `:` or with an empty key.
pub fn split_option(option: &str) -> Option<(String, String)> {
    let (key, value) = option.split_once(':')?;
    let key = clean_parameter(key).to_ascii_lowercase();
    if key.is_empty() {
        return None;
    }
    Some((key, clean_parameter(value).to_owned()))
}

/// Decide which function kind a layer compiles to. The first `type`/`t` option with a
/// recognized value wins; others are skipped.
pub fn function_kind(options: &[(String, String)]) -> FunctionKind {
    options
        .iter()
        .filter(|(key, _)| key == "type" || key == "t")
        .find_map(|(_, value)| parse_function_kind(value))
        .unwrap_or(FunctionKind::Draw)
}

/// `animation`/`a` or `drawing`/`d`, case-insensitive.
pub fn parse_function_kind(value: &str) -> Option<FunctionKind> {
    match value.to_ascii_lowercase().as_str() {
        "animation" | "a" => Some(FunctionKind::Animation),
        "drawing" | "d" => Some(FunctionKind::Draw),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/options.rs"]
mod tests;
