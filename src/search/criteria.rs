use std::str::FromStr;

use super::WildcardToken;
use crate::error::{NotesError, Result};

/// Marker that turns a query token into a tag filter.
pub const TAG_PREFIX: &str = "tag:";

/// Parsed search criteria: content terms and tag filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub terms: Vec<WildcardToken>,
    pub tags: Vec<WildcardToken>,
}

impl SearchCriteria {
    /// Builds criteria from already separated term and tag strings.
    pub fn new<T, G>(terms: T, tags: G) -> Result<Self>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        Ok(Self {
            terms: terms
                .into_iter()
                .map(|t| WildcardToken::parse(t.as_ref()))
                .collect::<Result<_>>()?,
            tags: tags
                .into_iter()
                .map(|t| WildcardToken::parse(t.as_ref()))
                .collect::<Result<_>>()?,
        })
    }

    /// Parses a whitespace separated query string.
    ///
    /// Tokens starting with `tag:` become tag filters (a bare `tag:` is
    /// ignored); every other token is a content term.
    ///
    /// # Examples
    ///
    /// ```
    /// use notedb::search::SearchCriteria;
    ///
    /// let criteria = SearchCriteria::parse("pot* tag:pan*").unwrap();
    /// assert_eq!(criteria.terms[0].as_str(), "pot*");
    /// assert_eq!(criteria.tags[0].as_str(), "pan*");
    /// ```
    pub fn parse(query: &str) -> Result<Self> {
        let mut criteria = Self::default();

        for raw in query.split_whitespace() {
            match raw.strip_prefix(TAG_PREFIX) {
                Some("") => continue,
                Some(tag) => criteria.tags.push(WildcardToken::parse(tag)?),
                None => criteria.terms.push(WildcardToken::parse(raw)?),
            }
        }

        Ok(criteria)
    }

    /// True when neither terms nor tag filters were given.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.tags.is_empty()
    }
}

impl FromStr for SearchCriteria {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tokens: &[WildcardToken]) -> Vec<&str> {
        tokens.iter().map(WildcardToken::as_str).collect()
    }

    #[test]
    fn splits_terms_and_tags() {
        let criteria = SearchCriteria::parse("sweet tag:dessert potato* tag:pie*").unwrap();

        assert_eq!(raw(&criteria.terms), vec!["sweet", "potato*"]);
        assert_eq!(raw(&criteria.tags), vec!["dessert", "pie*"]);
    }

    #[test]
    fn extra_whitespace_is_ignored() {
        let criteria = SearchCriteria::parse("  hello \t  world  ").unwrap();
        assert_eq!(raw(&criteria.terms), vec!["hello", "world"]);
        assert!(criteria.tags.is_empty());
    }

    #[test]
    fn bare_tag_marker_is_ignored() {
        let criteria = SearchCriteria::parse("tag:").unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn empty_query_is_empty() {
        assert!(SearchCriteria::parse("").unwrap().is_empty());
        assert!("   ".parse::<SearchCriteria>().unwrap().is_empty());
    }

    #[test]
    fn new_accepts_string_slices() {
        let criteria = SearchCriteria::new(["pot*"], Vec::<String>::new()).unwrap();
        assert_eq!(raw(&criteria.terms), vec!["pot*"]);
        assert!(criteria.tags.is_empty());
    }

    #[test]
    fn tag_marker_is_case_sensitive() {
        let criteria = SearchCriteria::parse("TAG:x").unwrap();
        assert_eq!(raw(&criteria.terms), vec!["TAG:x"]);
    }
}
