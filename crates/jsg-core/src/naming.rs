//! Identifier derivation for generated types and fields.

/// Strip a source string down to a bare identifier: split on anything that
/// is not a letter or digit, drop empty segments, uppercase the first
/// character of each kept segment, and concatenate. A result that would
/// start with a digit gets a leading underscore.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for segment in name.split(|c: char| !c.is_alphanumeric()) {
        if segment.is_empty() {
            continue;
        }
        if out.is_empty() && segment.starts_with(|c: char| c.is_ascii_digit()) {
            out.push('_');
        }
        out.push_str(&capitalize_first(segment));
    }
    out
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Uppercase the first character and lowercase the rest. Used for enum
/// member segments and for package-qualified marker method names.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_alphanumerics() {
        assert_eq!(sanitize_identifier("Customer Order"), "CustomerOrder");
        assert_eq!(sanitize_identifier("customer-id"), "CustomerId");
        assert_eq!(sanitize_identifier("customer_id"), "CustomerId");
        assert_eq!(sanitize_identifier("a/b.c"), "ABC");
    }

    #[test]
    fn preserves_interior_casing() {
        assert_eq!(sanitize_identifier("homeURL"), "HomeURL");
        assert_eq!(sanitize_identifier("XMLHttpRequest"), "XMLHttpRequest");
    }

    #[test]
    fn leading_digit_gets_an_underscore() {
        assert_eq!(sanitize_identifier("3dModel"), "_3dModel");
        assert_eq!(sanitize_identifier("-2fast"), "_2fast");
    }

    #[test]
    fn empty_and_symbol_only_inputs_collapse() {
        assert_eq!(sanitize_identifier(""), "");
        assert_eq!(sanitize_identifier("---"), "");
    }

    #[test]
    fn title_case_lowers_the_tail() {
        assert_eq!(title_case("GREEN"), "Green");
        assert_eq!(title_case("red"), "Red");
        assert_eq!(title_case(""), "");
    }
}
