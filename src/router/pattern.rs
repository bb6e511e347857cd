//! Path patterns: `/student/:id`, `/404/:resource`, `/:catchAll(.*)`.
//!
//! Grammar, one entry per `/`-separated segment:
//! - `name` - static, matched case-insensitively
//! - `:name` - positional param, any non-empty segment
//! - `:name(<regex>)` - positional param constrained by a regex
//! - `:name(.*)` or `*` - catch-all, last segment only, captures the rest
//!
//! Empty segments are ignored on both sides, so `/students/` matches
//! `/students`. Params are captured raw (no percent-decoding).

use regex::Regex;

use super::location::Params;
use super::name::RouteName;
use crate::error::RouteError;

/// Param name given to a bare `*` catch-all.
const DEFAULT_CATCH_ALL: &str = "pathMatch";

#[derive(Debug, Clone)]
enum Segment {
    Static(String),
    Param { name: String, regex: Option<Regex> },
    CatchAll { name: String },
}

/// A parsed route path.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

/// Split a path into its non-empty segments.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Join a child route path onto its parent.
///
/// An empty child means "same path as the parent"; an absolute child
/// replaces the parent path.
pub(crate) fn join_paths(parent: &str, child: &str) -> String {
    if child.is_empty() {
        parent.to_string()
    } else if child.starts_with('/') {
        child.to_string()
    } else if parent.ends_with('/') {
        format!("{parent}{child}")
    } else {
        format!("{parent}/{child}")
    }
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        if !pattern.starts_with('/') {
            return Err(invalid(pattern, "must start with '/'"));
        }

        let parts: Vec<&str> = split_path(pattern).collect();
        let mut segments = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            let is_last = i + 1 == parts.len();
            segments.push(parse_segment(pattern, part, is_last)?);
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether this pattern ends in a catch-all segment.
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll { .. }))
    }

    /// Names of the params this pattern captures, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Static(_) => None,
            Segment::Param { name, .. } | Segment::CatchAll { name } => Some(name.as_str()),
        })
    }

    /// Match a path (without query string), returning the captured params.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = split_path(path).collect();
        let mut params = Params::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(expected) => {
                    let part = parts.get(i)?;
                    if !part.eq_ignore_ascii_case(expected) {
                        return None;
                    }
                }
                Segment::Param { name, regex } => {
                    let part = parts.get(i)?;
                    if let Some(re) = regex {
                        if !re.is_match(part) {
                            return None;
                        }
                    }
                    params.insert(name.clone(), (*part).to_string());
                }
                Segment::CatchAll { name } => {
                    params.insert(name.clone(), parts[i..].join("/"));
                    return Some(params);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }

    /// Build a concrete path from params.
    pub fn build(&self, name: RouteName, params: &Params) -> Result<String, RouteError> {
        let mut path = String::new();
        for segment in &self.segments {
            let piece = match segment {
                Segment::Static(s) => s.as_str(),
                Segment::Param { name: param, .. } => {
                    let value = required(name, param, params)?;
                    if value.contains('/') {
                        return Err(RouteError::InvalidParam {
                            param: param.clone(),
                            value: value.to_string(),
                        });
                    }
                    value
                }
                Segment::CatchAll { name: param } => match params.get(param) {
                    Some(rest) => rest.trim_matches('/'),
                    None => "",
                },
            };
            if !piece.is_empty() {
                path.push('/');
                path.push_str(piece);
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

fn required<'a>(name: RouteName, param: &str, params: &'a Params) -> Result<&'a str, RouteError> {
    match params.get(param) {
        Some(value) if !value.is_empty() => Ok(value.as_str()),
        _ => Err(RouteError::MissingParam {
            name,
            param: param.to_string(),
        }),
    }
}

fn parse_segment(pattern: &str, part: &str, is_last: bool) -> Result<Segment, RouteError> {
    if part == "*" {
        if !is_last {
            return Err(invalid(pattern, "'*' is only allowed as the last segment"));
        }
        return Ok(Segment::CatchAll {
            name: DEFAULT_CATCH_ALL.to_string(),
        });
    }

    let Some(decl) = part.strip_prefix(':') else {
        return Ok(Segment::Static(part.to_string()));
    };

    let (name, custom) = match decl.split_once('(') {
        Some((name, rest)) => {
            let Some(re) = rest.strip_suffix(')') else {
                return Err(invalid(pattern, "unclosed '(' in param"));
            };
            (name, Some(re))
        }
        None => (decl, None),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(pattern, "param names must be alphanumeric"));
    }

    match custom {
        Some(".*") if is_last => Ok(Segment::CatchAll {
            name: name.to_string(),
        }),
        Some(re) => {
            let regex = Regex::new(&format!("^(?:{re})$")).map_err(|source| {
                RouteError::InvalidParamRegex {
                    pattern: pattern.to_string(),
                    source,
                }
            })?;
            Ok(Segment::Param {
                name: name.to_string(),
                regex: Some(regex),
            })
        }
        None => Ok(Segment::Param {
            name: name.to_string(),
            regex: None,
        }),
    }
}

fn invalid(pattern: &str, reason: &str) -> RouteError {
    RouteError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_root_matches_only_root() {
        let root = PathPattern::parse("/").unwrap();
        assert!(root.matches("/").is_some());
        assert!(root.matches("").is_some());
        assert!(root.matches("/students").is_none());
    }

    #[test]
    fn test_static_match_ignores_case_and_trailing_slash() {
        let list = PathPattern::parse("/students/setting").unwrap();
        assert!(list.matches("/Students/Setting/").is_some());
        assert!(list.matches("/students").is_none());
        assert!(list.matches("/students/setting/extra").is_none());
    }

    #[test]
    fn test_param_captured_verbatim() {
        let detail = PathPattern::parse("/student/:id/edit").unwrap();
        let captured = detail.matches("/student/64%2011/edit").unwrap();
        assert_eq!(captured, params(&[("id", "64%2011")]));
        assert!(detail.matches("/student//edit").is_none());
    }

    #[test]
    fn test_catch_all_captures_rest() {
        let catch_all = PathPattern::parse("/:catchAll(.*)").unwrap();
        assert!(catch_all.is_catch_all());
        assert_eq!(
            catch_all.matches("/unknown/path").unwrap(),
            params(&[("catchAll", "unknown/path")])
        );
        assert_eq!(catch_all.matches("/").unwrap(), params(&[("catchAll", "")]));

        let star = PathPattern::parse("/*").unwrap();
        assert!(star.is_catch_all());
        assert_eq!(star.param_names().collect::<Vec<_>>(), vec!["pathMatch"]);
    }

    #[test]
    fn test_custom_param_regex() {
        let numeric = PathPattern::parse(r"/page/:n(\d+)").unwrap();
        assert!(!numeric.is_catch_all());
        assert!(numeric.matches("/page/42").is_some());
        assert!(numeric.matches("/page/forty").is_none());
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            PathPattern::parse("students"),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/*/more"),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/:id(["),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/:id([)"),
            Err(RouteError::InvalidParamRegex { .. })
        ));
    }

    #[test]
    fn test_build_fills_params() {
        let pattern = PathPattern::parse("/404/:resource").unwrap();
        let path = pattern
            .build(RouteName::NotFoundResource, &params(&[("resource", "student")]))
            .unwrap();
        assert_eq!(path, "/404/student");

        let missing = pattern.build(RouteName::NotFoundResource, &Params::new());
        assert!(matches!(missing, Err(RouteError::MissingParam { .. })));

        let slash = pattern.build(RouteName::NotFoundResource, &params(&[("resource", "a/b")]));
        assert!(matches!(slash, Err(RouteError::InvalidParam { .. })));
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths("/student/:id", ""), "/student/:id");
        assert_eq!(join_paths("/student/:id", "edit"), "/student/:id/edit");
        assert_eq!(join_paths("/", "edit"), "/edit");
        assert_eq!(join_paths("/student/:id", "/elsewhere"), "/elsewhere");
    }
}
