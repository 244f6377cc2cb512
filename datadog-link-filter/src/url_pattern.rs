// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::LinkFilterError;
use url::Url;

/// A compiled wildcard path pattern.
///
/// Segment-based semantics: `?` matches one character inside a segment, `*`
/// any run of characters inside a segment, and a `**` segment any number of
/// whole segments, including none. `/some/test/**` therefore accepts
/// `/some/test`, `/some/test/path` and `/some/test/a/b`.
#[derive(Clone, Debug)]
pub struct UrlPathPattern {
    raw: String,
    segments: Vec<PatternSegment>,
}

#[derive(Clone, Debug)]
enum PatternSegment {
    /// A `**` segment spanning any number of path segments.
    AnyDepth,
    /// A single segment, possibly holding `?`/`*` wildcards.
    Fragment(String),
}

impl UrlPathPattern {
    /// Compiles `pattern`, validating it up front so per-trace matching
    /// cannot fail.
    pub fn parse(pattern: &str) -> Result<Self, LinkFilterError> {
        let malformed = |reason: &str| LinkFilterError::MalformedPattern {
            pattern: pattern.to_owned(),
            reason: reason.to_owned(),
        };
        if pattern.is_empty() {
            return Err(malformed("pattern is empty"));
        }
        if !pattern.starts_with('/') {
            return Err(malformed("pattern must start with '/'"));
        }

        let mut segments = Vec::new();
        for segment in pattern.split('/').filter(|s| !s.is_empty()) {
            if segment == "**" {
                segments.push(PatternSegment::AnyDepth);
            } else if segment.contains("**") {
                return Err(malformed("'**' must stand alone in its segment"));
            } else {
                segments.push(PatternSegment::Fragment(segment.to_owned()));
            }
        }

        Ok(UrlPathPattern {
            raw: pattern.to_owned(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches the path portion of `value`, which may be an absolute URL or
    /// a rooted path. Values that are neither are non-matches.
    pub fn matches_url(&self, value: &str) -> bool {
        if value.starts_with('/') {
            let end = value.find(['?', '#']).unwrap_or(value.len());
            return self.matches_path(&value[..end]);
        }
        match Url::parse(value) {
            Ok(url) => self.matches_path(url.path()),
            Err(_) => false,
        }
    }

    /// Matches a path against the compiled segments.
    pub fn matches_path(&self, path: &str) -> bool {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match_segments(&self.segments, &segments)
    }
}

fn match_segments(pattern: &[PatternSegment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((PatternSegment::AnyDepth, rest)) => {
            // `**` may swallow zero or more leading segments.
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((PatternSegment::Fragment(fragment), rest)) => match path.split_first() {
            Some((head, tail)) => fragment_matches(fragment, head) && match_segments(rest, tail),
            None => false,
        },
    }
}

/// Single-segment wildcard match: `?` is one character, `*` any run of
/// characters. Greedy scan with backtracking on the last `*`.
fn fragment_matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut p = 0;
    let mut t = 0;
    let mut star: Option<usize> = None;
    let mut star_text = 0;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            star_text = t;
            p += 1;
        } else if let Some(star_p) = star {
            p = star_p + 1;
            star_text += 1;
            t = star_text;
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> UrlPathPattern {
        UrlPathPattern::parse(raw).unwrap()
    }

    #[test]
    fn literal_segments() {
        assert!(pattern("/some/test/path").matches_path("/some/test/path"));
        assert!(!pattern("/some/test/path").matches_path("/some/test"));
        assert!(!pattern("/some/test/path").matches_path("/some/test/path/deeper"));
    }

    #[test]
    fn single_segment_wildcards() {
        assert!(pattern("/api/*/detail").matches_path("/api/users/detail"));
        assert!(!pattern("/api/*/detail").matches_path("/api/users/extra/detail"));
        assert!(pattern("/api/v?").matches_path("/api/v1"));
        assert!(!pattern("/api/v?").matches_path("/api/v10"));
        assert!(pattern("/api/user*").matches_path("/api/users"));
        assert!(pattern("/api/user*").matches_path("/api/user"));
    }

    #[test]
    fn any_depth_wildcard() {
        let p = pattern("/some/test/**");
        assert!(p.matches_path("/some/test/path"));
        assert!(p.matches_path("/some/test/a/b/c"));
        assert!(p.matches_path("/some/test"));
        assert!(!p.matches_path("/some/other/path"));

        assert!(pattern("/**/leaf").matches_path("/a/b/leaf"));
        assert!(pattern("/**/leaf").matches_path("/leaf"));
        assert!(!pattern("/**/leaf").matches_path("/a/b/other"));
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        assert!(matches!(
            UrlPathPattern::parse(""),
            Err(LinkFilterError::MalformedPattern { .. })
        ));
        assert!(matches!(
            UrlPathPattern::parse("some/test"),
            Err(LinkFilterError::MalformedPattern { .. })
        ));
        assert!(matches!(
            UrlPathPattern::parse("/some/te**st"),
            Err(LinkFilterError::MalformedPattern { .. })
        ));
    }

    #[test]
    fn url_path_extraction() {
        let p = pattern("/some/test/**");
        assert!(p.matches_url("http://some.domain.name/some/test/path"));
        assert!(p.matches_url("https://host:8080/some/test/path?q=1#frag"));
        assert!(p.matches_url("/some/test/path"));
        assert!(p.matches_url("/some/test/path?q=1"));
        assert!(!p.matches_url("http://some.domain.name/other"));
        // No scheme and not rooted: nothing to extract a path from.
        assert!(!p.matches_url("some.domain.name/some/test/path"));
    }

    #[test]
    fn root_pattern() {
        assert!(pattern("/").matches_path("/"));
        assert!(!pattern("/").matches_path("/a"));
        assert!(pattern("/**").matches_path("/anything/at/all"));
        assert!(pattern("/**").matches_path("/"));
    }
}
