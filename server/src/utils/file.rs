//! File utility functions

use std::path::PathBuf;

/// Expand a user-supplied path (`~`, `~/x`, relative or absolute) into an
/// absolute path. Blank input resolves to the current directory.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            home.join(rest)
        } else {
            PathBuf::from(path)
        }
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_absolute() {
        assert_eq!(expand_path("/srv/wodland"), PathBuf::from("/srv/wodland"));
    }

    #[test]
    fn test_expand_path_relative_becomes_absolute() {
        let result = expand_path("./data");
        assert!(result.is_absolute());
        assert!(result.ends_with("data"));
    }

    #[test]
    fn test_expand_path_tilde() {
        let result = expand_path("~/.wodland");
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".wodland"));
    }

    #[test]
    fn test_expand_path_blank_is_cwd() {
        let result = expand_path("   ");
        assert!(result.is_absolute());
    }
}
