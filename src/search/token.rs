use regex::Regex;

use crate::error::Result;

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// A search term or tag filter, optionally ending in a `*` prefix wildcard.
///
/// A token carries two views of itself: a cheap substring check that SQLite
/// evaluates with `LIKE`, and a precise case-insensitive confirmation pattern
/// that requires a space or end of text after the (expanded) root.
///
/// The confirmation only bounds the trailing side, so `pot` confirms against
/// "teapot" but not against "potatoes".
#[derive(Debug, Clone)]
pub struct WildcardToken {
    raw: String,
    root: String,
    prefix: bool,
    pattern: Regex,
}

impl WildcardToken {
    /// Parses a raw token such as `potato` or `pot*`.
    ///
    /// # Examples
    ///
    /// ```
    /// use notedb::search::WildcardToken;
    ///
    /// let token = WildcardToken::parse("Pot*").unwrap();
    /// assert_eq!(token.root(), "Pot");
    /// assert!(token.is_prefix());
    /// assert!(token.confirms("sweet potato pie"));
    /// assert!(!token.confirms("pot-roast"));
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let (root, prefix) = match raw.strip_suffix('*') {
            Some(root) => (root, true),
            None => (raw, false),
        };

        let expansion = if prefix { r"\w*" } else { "" };
        let pattern = Regex::new(&format!("(?i){}{}( |$)", regex::escape(root), expansion))?;

        Ok(Self {
            raw: raw.to_string(),
            root: root.to_string(),
            prefix,
            pattern,
        })
    }

    /// The token as written, including any trailing `*`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The token with its trailing `*` removed.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn is_prefix(&self) -> bool {
        self.prefix
    }

    /// `LIKE` pattern matching any text containing the root.
    ///
    /// Wildcard characters in the root are escaped with [`LIKE_ESCAPE`].
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.root.len() + 2);
        pattern.push('%');
        for c in self.root.chars() {
            if matches!(c, '%' | '_' | LIKE_ESCAPE) {
                pattern.push(LIKE_ESCAPE);
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Precise check: the root (plus word characters for a prefix token)
    /// followed by a space or the end of `text`, ignoring case.
    pub fn confirms(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl PartialEq for WildcardToken {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for WildcardToken {}
