//! Name casing for generated identifiers

use smol_str::SmolStr;

/// Split `name` into words at underscores, non-alphanumeric characters and
/// lower-to-upper case boundaries (`fooBar_baz` → `foo`, `Bar`, `baz`).
fn words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut previous_lower = false;

    for (index, c) in name.char_indices() {
        if !c.is_alphanumeric() {
            if let Some(s) = start.take() {
                words.push(&name[s..index]);
            }
            previous_lower = false;
            continue;
        }
        if c.is_uppercase() && previous_lower {
            if let Some(s) = start {
                words.push(&name[s..index]);
            }
            start = Some(index);
        } else if start.is_none() {
            start = Some(index);
        }
        previous_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    if let Some(s) = start {
        words.push(&name[s..]);
    }
    words
}

fn capitalize(word: &str, out: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

/// `member_name` → `MemberName`
pub fn to_pascal_case(name: &str) -> SmolStr {
    let mut out = String::with_capacity(name.len());
    for word in words(name) {
        capitalize(word, &mut out);
    }
    SmolStr::new(out)
}

/// `MemberName` / `member_name` → `memberName`
///
/// A leading all-caps word is lowercased whole (`URI` → `uri`).
pub fn to_camel_case(name: &str) -> SmolStr {
    let mut out = String::with_capacity(name.len());
    for (index, word) in words(name).into_iter().enumerate() {
        if index > 0 {
            capitalize(word, &mut out);
        } else if word.chars().all(|c| !c.is_lowercase()) {
            out.push_str(&word.to_lowercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_lowercase());
                out.push_str(chars.as_str());
            }
        }
    }
    SmolStr::new(out)
}

/// Generated name for an enum constant with literal `value`.
///
/// Values with no alphanumeric content fall back to `Value{index}`, and names
/// that would start with a digit get a `Value` prefix.
pub fn enum_value_name(value: &str, index: usize) -> SmolStr {
    let pascal = to_pascal_case(value);
    match pascal.chars().next() {
        None => SmolStr::new(format!("Value{index}")),
        Some(c) if c.is_ascii_digit() => SmolStr::new(format!("Value{pascal}")),
        Some(_) => pascal,
    }
}
