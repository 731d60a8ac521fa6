use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical comparison form of a string.
///
/// Lowercased, NFD-decomposed with combining marks stripped, anything outside
/// `[a-z0-9 ]` replaced by a space, runs of whitespace collapsed, trimmed.
/// Applied identically to queries and titles; idempotent.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for ch in input.nfd().filter(|c| !is_combining_mark(*c)) {
        for lower in ch.to_lowercase() {
            if lower.is_ascii_alphanumeric() {
                out.push(lower);
            } else if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Ordered non-empty tokens of the normalized form
pub fn tokens(input: &str) -> Vec<String> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        Vec::new()
    } else {
        normalized.split(' ').map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("The Matrix"), "the matrix");
        assert_eq!(normalize("  Spider-Man:  Homecoming!  "), "spider man homecoming");
        assert_eq!(normalize("WALL·E"), "wall e");
    }

    #[test]
    fn test_normalize_diacritics() {
        assert_eq!(normalize("Amélie"), "amelie");
        assert_eq!(normalize("Léon: The Professional"), "leon the professional");
        assert_eq!(normalize("CINÉMA"), "cinema");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in ["", "Amélie", "  A  B  ", "Blade Runner 2049", "¡Qué pasa!"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("The Dark Knight"), vec!["the", "dark", "knight"]);
        assert!(tokens("").is_empty());
        assert!(tokens("  ?!  ").is_empty());
        assert_eq!(tokens("Se7en"), vec!["se7en"]);
    }
}
