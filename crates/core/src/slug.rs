//! URL slug generation for categories and products.

/// Turn a display name into a URL slug.
///
/// Lowercases, drops everything but alphanumerics/whitespace/hyphens, then
/// collapses runs of whitespace/underscores/hyphens into single hyphens.
///
/// ```
/// use gadgetgrid_core::slug::slugify;
///
/// assert_eq!(slugify("Gaming Headphones"), "gaming-headphones");
/// assert_eq!(slugify("  20,000mAh -- Powerbank!  "), "20000mah-powerbank");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
        // Anything else (punctuation, symbols) is dropped entirely.
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("Wireless Earbuds"), "wireless-earbuds");
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(slugify("a  -  b__c"), "a-b-c");
    }

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(slugify("Sony XM5 (Black)!"), "sony-xm5-black");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(slugify("  hello  "), "hello");
        assert_eq!(slugify("--hello--"), "hello");
    }

    #[test]
    fn test_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
