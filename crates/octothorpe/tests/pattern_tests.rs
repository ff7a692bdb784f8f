//! Pattern grammar and matching tests.

use octothorpe::{Params, PathPattern, PatternError};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("/", "/", true)]
#[case("/", "/chat", false)]
#[case("/chat/:character_id", "/chat/42", true)]
#[case("/chat/:character_id", "/chat", false)]
#[case("/chat/:character_id", "/chat/42/voice", false)]
#[case("/chat/:character_id", "/chat/42/", true)] // trailing slash normalized
#[case("/docs/*slug", "/docs/guide/intro", true)]
#[case("/docs/*slug", "/docs", false)]
#[case("/posts/:id?", "/posts", true)]
#[case("/posts/:id?", "/posts/7", true)]
#[case("/posts/:id?", "/posts/7/8", false)]
fn match_cases(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
    let compiled = PathPattern::parse(pattern).unwrap();
    assert_eq!(
        compiled.matches(&octothorpe::path::normalize(path)).is_some(),
        expected,
        "pattern `{}` vs path `{}`",
        pattern,
        path
    );
}

#[test]
fn test_captured_values_are_raw_segment_text() {
    let pattern = PathPattern::parse("/chat/:character_id").unwrap();

    let params = pattern.matches("/chat/abc").unwrap();
    assert_eq!(params.get("character_id"), Some("abc"));

    // Captures are strings, never interpreted.
    let params = pattern.matches("/chat/0042").unwrap();
    assert_eq!(params.get("character_id"), Some("0042"));
}

#[test]
fn test_multi_param_pattern() {
    let pattern = PathPattern::parse("/tools/:tool/projects/:project").unwrap();

    let params = pattern.matches("/tools/claude/projects/demo").unwrap();
    assert_eq!(params.get("tool"), Some("claude"));
    assert_eq!(params.get("project"), Some("demo"));
    assert_eq!(pattern.param_names(), ["tool", "project"]);
}

#[rstest]
#[case("chat/:id")]
#[case("")]
fn parse_rejects_relative(#[case] raw: &str) {
    assert!(matches!(
        PathPattern::parse(raw),
        Err(PatternError::MissingLeadingSlash(_))
    ));
}

#[test]
fn test_pattern_normalized_on_parse() {
    let pattern = PathPattern::parse("/chat/:id/").unwrap();
    assert_eq!(pattern.as_str(), "/chat/:id");
    assert!(pattern.matches("/chat/9").is_some());
}

#[test]
fn test_format_url_round_trip() {
    let pattern = PathPattern::parse("/chat/:character_id").unwrap();
    let params: Params = [("character_id", "42")].into_iter().collect();

    let url = pattern.format_url(&params).unwrap();
    assert_eq!(url, "/chat/42");

    let back = pattern.matches(&url).unwrap();
    assert_eq!(back, params);
}

#[test]
fn test_format_url_catch_all_keeps_slashes() {
    let pattern = PathPattern::parse("/docs/*slug").unwrap();
    let params: Params = [("slug", "guide/intro")].into_iter().collect();
    assert_eq!(pattern.format_url(&params).unwrap(), "/docs/guide/intro");
}
