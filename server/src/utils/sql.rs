//! SQL utility functions

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Patterns built from the result must be paired with `ESCAPE '\'`.
///
/// # Example
///
/// ```
/// use wodland_server::utils::sql::escape_like_pattern;
///
/// assert_eq!(escape_like_pattern("50%_off"), "50\\%\\_off");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Build a substring LIKE pattern (`%value%`) with metacharacters escaped
///
/// ```
/// use wodland_server::utils::sql::contains_pattern;
///
/// assert_eq!(contains_pattern("fran"), "%fran%");
/// ```
pub fn contains_pattern(s: &str) -> String {
    format!("%{}%", escape_like_pattern(s))
}
