//! Route pattern compilation and matching.
//!
//! A pattern string like `/chat/:character_id` is compiled once, at table
//! construction, into a sequence of typed segments. Matching then walks the
//! compiled segments against the concrete path segments: no regular
//! expressions, a single pass, no backtracking.

use std::fmt;

use crate::error::{PatternError, UrlError};
use crate::params::Params;
use crate::path;

/// One compiled pattern segment.
///
/// # Grammar
///
/// - `chat` → [`Segment::Literal`]: matches that exact segment text
/// - `:id` → [`Segment::Param`]: captures exactly one segment
/// - `:id?` → [`Segment::Optional`]: captures one segment if present
///   (must be the final segment)
/// - `*rest` → [`Segment::CatchAll`]: captures one or more remaining
///   segments joined by `/` (must be the final segment)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    Optional(String),
    CatchAll(String),
}

impl Segment {
    fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Param(name) | Segment::Optional(name) | Segment::CatchAll(name) => Some(name),
        }
    }

    /// True for segments that must terminate the pattern.
    fn is_tail(&self) -> bool {
        matches!(self, Segment::Optional(_) | Segment::CatchAll(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => write!(f, "{}", text),
            Segment::Param(name) => write!(f, ":{}", name),
            Segment::Optional(name) => write!(f, ":{}?", name),
            Segment::CatchAll(name) => write!(f, "*{}", name),
        }
    }
}

/// Classifies one raw pattern segment (pure function).
///
/// Returns `None` when the segment declares a parameter marker without a
/// name (`:`, `:?`, `*`).
fn classify(segment: &str) -> Option<Segment> {
    if let Some(rest) = segment.strip_prefix(':') {
        let (name, optional) = match rest.strip_suffix('?') {
            Some(name) => (name, true),
            None => (rest, false),
        };
        if name.is_empty() {
            return None;
        }
        return Some(if optional {
            Segment::Optional(name.to_string())
        } else {
            Segment::Param(name.to_string())
        });
    }

    if let Some(name) = segment.strip_prefix('*') {
        if name.is_empty() {
            return None;
        }
        return Some(Segment::CatchAll(name.to_string()));
    }

    Some(Segment::Literal(segment.to_string()))
}

/// A compiled route pattern.
///
/// # Examples
///
/// ```
/// use octothorpe::PathPattern;
///
/// let pattern = PathPattern::parse("/chat/:character_id").unwrap();
/// let params = pattern.matches("/chat/42").unwrap();
/// assert_eq!(params.get("character_id"), Some("42"));
/// assert!(pattern.matches("/chat").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    params: Vec<String>,
}

impl PathPattern {
    /// Compiles a pattern string.
    ///
    /// The pattern is normalized the same way request paths are, so
    /// `/chat/:id/` and `/chat/:id` compile identically.
    ///
    /// # Errors
    ///
    /// - [`PatternError::MissingLeadingSlash`]: patterns are absolute
    /// - [`PatternError::EmptyParamName`]: `:` or `*` without a name
    /// - [`PatternError::DuplicateParam`]: the same name captured twice
    /// - [`PatternError::NotLastSegment`]: anything after `:name?` or `*name`
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(raw.to_string()));
        }

        let normalized = path::normalize(raw);
        let mut segments = Vec::new();
        let mut params: Vec<String> = Vec::new();

        for piece in path::segments(&normalized) {
            // A tail segment already closed the pattern; nothing may follow.
            if let Some(tail) = segments.last().filter(|s: &&Segment| s.is_tail()) {
                return Err(PatternError::NotLastSegment {
                    pattern: raw.to_string(),
                    segment: tail.to_string(),
                });
            }

            let segment =
                classify(piece).ok_or_else(|| PatternError::EmptyParamName(raw.to_string()))?;

            if let Some(name) = segment.param_name() {
                if params.iter().any(|p| p == name) {
                    return Err(PatternError::DuplicateParam {
                        pattern: raw.to_string(),
                        name: name.to_string(),
                    });
                }
                params.push(name.to_string());
            }

            segments.push(segment);
        }

        Ok(Self {
            raw: normalized.into_owned(),
            segments,
            params,
        })
    }

    /// The normalized pattern string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> &[String] {
        &self.params
    }

    /// True when the pattern captures at least one parameter.
    pub fn is_dynamic(&self) -> bool {
        !self.params.is_empty()
    }

    /// Matches a canonical path case-sensitively.
    pub fn matches(&self, path: &str) -> Option<Params> {
        self.matches_in(path, false)
    }

    /// Matches a canonical path, optionally ignoring ASCII case on
    /// literal segments. Parameter captures always keep the original text.
    pub(crate) fn matches_in(&self, path: &str, case_insensitive: bool) -> Option<Params> {
        let concrete: Vec<&str> = path::segments(path).collect();
        let mut params = Params::new();
        let mut idx = 0;

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    let actual = concrete.get(idx)?;
                    let hit = if case_insensitive {
                        text.eq_ignore_ascii_case(actual)
                    } else {
                        text == actual
                    };
                    if !hit {
                        return None;
                    }
                    idx += 1;
                }
                Segment::Param(name) => {
                    let actual = concrete.get(idx)?;
                    params.insert(name.clone(), *actual);
                    idx += 1;
                }
                Segment::Optional(name) => {
                    if let Some(actual) = concrete.get(idx) {
                        params.insert(name.clone(), *actual);
                        idx += 1;
                    }
                }
                Segment::CatchAll(name) => {
                    let rest = &concrete[idx..];
                    if rest.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), rest.join("/"));
                    idx = concrete.len();
                }
            }
        }

        // Every concrete segment must be consumed.
        (idx == concrete.len()).then_some(params)
    }

    /// Builds a concrete path by substituting parameters into the pattern.
    ///
    /// Optional parameters are skipped when absent; required parameters and
    /// catch-alls must be present.
    ///
    /// # Examples
    ///
    /// ```
    /// use octothorpe::{Params, PathPattern};
    ///
    /// let pattern = PathPattern::parse("/chat/:character_id").unwrap();
    /// let params: Params = [("character_id", "42")].into_iter().collect();
    /// assert_eq!(pattern.format_url(&params).unwrap(), "/chat/42");
    /// ```
    pub fn format_url(&self, params: &Params) -> Result<String, UrlError> {
        let mut pieces: Vec<String> = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => pieces.push(text.clone()),
                Segment::Param(name) | Segment::CatchAll(name) => {
                    let value = params.get(name).ok_or_else(|| UrlError::MissingParam {
                        pattern: self.raw.clone(),
                        param: name.clone(),
                    })?;
                    pieces.push(value.to_string());
                }
                Segment::Optional(name) => {
                    if let Some(value) = params.get(name) {
                        pieces.push(value.to_string());
                    }
                }
            }
        }

        if pieces.is_empty() {
            Ok("/".to_string())
        } else {
            Ok(format!("/{}", pieces.join("/")))
        }
    }

    /// Canonical shape of the pattern, with parameter names erased.
    ///
    /// Two patterns with equal shapes match exactly the same set of paths:
    /// `/chat/:a` and `/chat/:b` both reduce to `/chat/:`.
    pub fn shape(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }

        let pieces: Vec<String> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Param(_) => ":".to_string(),
                Segment::Optional(_) => ":?".to_string(),
                Segment::CatchAll(_) => "*".to_string(),
            })
            .collect();

        format!("/{}", pieces.join("/"))
    }

    /// True when every path this pattern matches is also matched by
    /// `earlier`, i.e. registering `self` after `earlier` makes `self`
    /// unreachable under first-match-wins.
    ///
    /// The check is conservative: it only reports shadowing it can prove
    /// segment-by-segment, so there are no false positives.
    pub(crate) fn shadowed_by(&self, earlier: &PathPattern, case_insensitive: bool) -> bool {
        shadows(&earlier.segments, &self.segments, case_insensitive)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Does `wide` match every concrete path that `narrow` matches?
fn shadows(wide: &[Segment], narrow: &[Segment], case_insensitive: bool) -> bool {
    let mut idx = 0;

    loop {
        match (wide.get(idx), narrow.get(idx)) {
            // Both exhausted: every narrow path of this length is covered.
            (None, None) => return true,

            // Wide is exhausted but narrow still matches longer paths.
            (None, Some(_)) => return false,

            // A trailing optional on the wide side accepts both lengths the
            // narrow side can still produce, but only if narrow ends here too.
            (Some(Segment::Optional(_)), None) => return true,
            (Some(Segment::Optional(_)), Some(Segment::Optional(_))) => {
                return narrow.len() == idx + 1
            }
            (Some(Segment::Optional(_)), Some(Segment::Param(_)))
            | (Some(Segment::Optional(_)), Some(Segment::Literal(_))) => {
                // Wide accepts one-more-segment paths with any value; narrow
                // must not extend beyond that one segment.
                return narrow.len() == idx + 1;
            }
            (Some(Segment::Optional(_)), Some(Segment::CatchAll(_))) => return false,

            // A catch-all swallows any non-empty tail. The narrow side
            // guarantees a non-empty tail whenever it still has a required
            // segment here.
            (Some(Segment::CatchAll(_)), Some(Segment::Literal(_)))
            | (Some(Segment::CatchAll(_)), Some(Segment::Param(_)))
            | (Some(Segment::CatchAll(_)), Some(Segment::CatchAll(_))) => return true,
            (Some(Segment::CatchAll(_)), Some(Segment::Optional(_))) => return false,
            (Some(Segment::CatchAll(_)), None) => return false,

            // Wide still requires a segment that narrow cannot guarantee.
            (Some(_), None) => return false,

            // A parameter generalizes a literal or another parameter.
            (Some(Segment::Param(_)), Some(Segment::Literal(_)))
            | (Some(Segment::Param(_)), Some(Segment::Param(_))) => idx += 1,
            (Some(Segment::Param(_)), Some(Segment::Optional(_)))
            | (Some(Segment::Param(_)), Some(Segment::CatchAll(_))) => return false,

            // Literals must agree exactly.
            (Some(Segment::Literal(a)), Some(Segment::Literal(b))) => {
                let equal = if case_insensitive {
                    a.eq_ignore_ascii_case(b)
                } else {
                    a == b
                };
                if !equal {
                    return false;
                }
                idx += 1;
            }
            (Some(Segment::Literal(_)), Some(_)) => return false,
        }
    }
}
