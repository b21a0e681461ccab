//! Identifier helpers shared by layer-name parsing, the function collection and emitters.

/// Turn arbitrary layer text into a camel-cased ASCII identifier.
///
/// Runs of non-alphanumeric characters act as word breaks; the first character is lowercased and
/// a leading digit gets an `_` prefix. Returns an empty string when no usable characters remain.
pub fn to_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut upper_next = false;
    for ch in raw.chars() {
        if !ch.is_ascii_alphanumeric() {
            upper_next = !out.is_empty();
            continue;
        }
        if out.is_empty() {
            if ch.is_ascii_digit() {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        upper_next = false;
    }
    out
}

/// Strip surrounding whitespace and quote characters from an option key or value.
pub fn clean_parameter(raw: &str) -> &str {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
}

/// Append the smallest positive integer (no separator) that makes `base` unused.
///
/// `base` itself is returned when `taken(base)` is false.
pub fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_owned();
    }
    let mut suffix = 1u32;
    loop {
        let candidate = format!("{base}{suffix}");
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/naming.rs"]
mod tests;
