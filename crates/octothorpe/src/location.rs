//! Parsed application locations.
//!
//! A location is what a navigation event carries: a canonical path plus the
//! optional `?query` and `#fragment` parts. The route matcher only looks at
//! the path; query and fragment ride along so views can read them from the
//! resolution instead of re-parsing the address bar.

use std::fmt;

use crate::error::ResolveError;
use crate::path;

/// A parsed location: `/chat/42?tab=voice#latest` becomes path `/chat/42`,
/// query `tab=voice`, fragment `latest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    raw_query: Option<String>,
    fragment: Option<String>,
}

impl Location {
    /// Parses a location string into path, query, and fragment.
    ///
    /// The path part must be well-formed (leading slash); it is normalized
    /// before matching, so `/chat/42/` and `/chat/42` parse to the same
    /// location.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Malformed`] when the path part does not start
    /// with `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use octothorpe::Location;
    ///
    /// let loc = Location::parse("/chat/42?tab=voice#latest").unwrap();
    /// assert_eq!(loc.path(), "/chat/42");
    /// assert_eq!(loc.raw_query(), Some("tab=voice"));
    /// assert_eq!(loc.fragment(), Some("latest"));
    ///
    /// assert!(Location::parse("chat/42").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ResolveError> {
        // Fragment first: everything after the first `#` never reaches the
        // matcher, query included.
        let (before_fragment, fragment) = match input.split_once('#') {
            Some((head, frag)) => (head, Some(frag.to_string())),
            None => (input, None),
        };

        let (raw_path, raw_query) = match before_fragment.split_once('?') {
            Some((head, query)) => (head, Some(query.to_string())),
            None => (before_fragment, None),
        };

        if !raw_path.starts_with('/') {
            return Err(ResolveError::Malformed {
                path: input.to_string(),
            });
        }

        Ok(Self {
            path: path::normalize(raw_path).into_owned(),
            raw_query,
            fragment,
        })
    }

    /// The canonical path part.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query string as given, without the leading `?`.
    pub fn raw_query(&self) -> Option<&str> {
        self.raw_query.as_deref()
    }

    /// The fragment as given, without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Percent-decoded query pairs, in document order.
    ///
    /// Pairs that fail to decode as UTF-8 are skipped. A key without `=`
    /// decodes to an empty value (`?debug` → `("debug", "")`).
    ///
    /// # Examples
    ///
    /// ```
    /// use octothorpe::Location;
    ///
    /// let loc = Location::parse("/search?q=night%20market&debug").unwrap();
    /// assert_eq!(
    ///     loc.query_pairs(),
    ///     vec![("q".to_string(), "night market".to_string()),
    ///          ("debug".to_string(), String::new())]
    /// );
    /// ```
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(raw) = self.raw_query.as_deref() else {
            return Vec::new();
        };

        raw.split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                let key = urlencoding::decode(key).ok()?;
                let value = urlencoding::decode(value).ok()?;
                Some((key.into_owned(), value.into_owned()))
            })
            .collect()
    }

    /// Looks up the first query value for `name`, percent-decoded.
    pub fn query_value(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for Location {
    /// Reassembles the location string: path, then `?query`, then `#fragment`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if let Some(query) = &self.raw_query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let loc = Location::parse("/").unwrap();
        assert_eq!(loc.path(), "/");
        assert_eq!(loc.raw_query(), None);
        assert_eq!(loc.fragment(), None);
    }

    #[test]
    fn test_parse_normalizes_path() {
        let loc = Location::parse("/chat/42/").unwrap();
        assert_eq!(loc.path(), "/chat/42");
    }

    #[test]
    fn test_parse_rejects_relative() {
        let err = Location::parse("chat/42").unwrap_err();
        assert!(matches!(err, ResolveError::Malformed { .. }));
    }

    #[test]
    fn test_fragment_swallows_query_after_it() {
        // `?` after `#` belongs to the fragment, mirroring how browsers split.
        let loc = Location::parse("/a#frag?not-a-query").unwrap();
        assert_eq!(loc.path(), "/a");
        assert_eq!(loc.raw_query(), None);
        assert_eq!(loc.fragment(), Some("frag?not-a-query"));
    }

    #[test]
    fn test_display_round_trip() {
        let loc = Location::parse("/chat/42?tab=voice#latest").unwrap();
        assert_eq!(loc.to_string(), "/chat/42?tab=voice#latest");
    }

    #[test]
    fn test_query_value() {
        let loc = Location::parse("/chat/42?tab=voice&tab=text").unwrap();
        assert_eq!(loc.query_value("tab"), Some("voice".to_string()));
        assert_eq!(loc.query_value("missing"), None);
    }
}
