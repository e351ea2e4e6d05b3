//! String utility functions

/// Convert a snake_case identifier into lowerCamelCase.
///
/// `start_date` becomes `startDate`; identifiers without underscores are
/// returned unchanged.
pub fn lower_camel_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let mut upper_next = false;
    for ch in ident.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Split a comma-separated value, dropping empty tokens.
///
/// Order and duplicates are preserved.
pub fn split_csv(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').filter(|token| !token.is_empty())
}
