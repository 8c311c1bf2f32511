//! Slug derivation.
//!
//! Kept as an explicit pure function invoked by the content service right
//! before persistence — there is no hidden lifecycle hook regenerating slugs.

/// Derives a URL-safe slug from a title: ASCII letters and digits are
/// lower-cased, every other run of characters collapses to a single hyphen,
/// and leading/trailing hyphens are trimmed. Non-ASCII characters count as
/// separators.
pub fn derive_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_special_character_runs() {
        assert_eq!(
            derive_slug("Rails & JavaScript: A Guide!"),
            "rails-javascript-a-guide"
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(derive_slug("Rails    Best   Practices"), "rails-best-practices");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(derive_slug("  --Hello World--  "), "hello-world");
    }

    #[test]
    fn lower_cases_everything() {
        assert_eq!(derive_slug("UPPER case MiXeD"), "upper-case-mixed");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(derive_slug("Top 10 Posts of 2024"), "top-10-posts-of-2024");
    }

    #[test]
    fn symbol_only_title_yields_empty_slug() {
        assert_eq!(derive_slug("!!!"), "");
    }
}
