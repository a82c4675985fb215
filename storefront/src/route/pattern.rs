//! Route patterns.

use std::{fmt::Display, str::FromStr};

use super::error::ParseError;

/// A route pattern, such as `/pf/work/{work_id}`.
///
/// A pattern is a list of segments, each of which is either a literal or a named parameter. The
/// root pattern `/` has no segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoutePattern(Vec<Segment>);

/// A route pattern segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// A static segment, which must match exactly.
    Literal(String),

    /// A path parameter, which matches any non-empty segment.
    Parameter {
        /// The name of the parameter.
        name: String,
    },
}

impl RoutePattern {
    /// The segments of the pattern.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// The names of the parameters, in order of appearance.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|segment| match segment {
            Segment::Parameter { name } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether two patterns have the same shape.
    ///
    /// Two patterns have the same shape when they would match exactly the same paths, regardless
    /// of how their parameters are named.
    pub fn is_structurally_identical(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(&other.0).all(|pair| match pair {
                (Segment::Literal(a), Segment::Literal(b)) => a == b,
                (Segment::Parameter { .. }, Segment::Parameter { .. }) => true,
                _ => false,
            })
    }

    /// Match decoded path segments against the pattern.
    ///
    /// Returns the captured parameters, in order, if all segments match.
    pub fn captures(&self, segments: &[String]) -> Option<Vec<(String, String)>> {
        if segments.len() != self.0.len() {
            return None;
        }

        let mut params = Vec::new();

        for (segment, value) in self.0.iter().zip(segments) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != value {
                        return None;
                    }
                }
                Segment::Parameter { name } => {
                    if value.is_empty() {
                        return None;
                    }

                    params.push((name.clone(), value.clone()));
                }
            }
        }

        Some(params)
    }
}

impl FromStr for RoutePattern {
    type Err = ParseError;

    /// Parses a route pattern from a static string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.char_indices();

        if chars.next() != Some((0, '/')) {
            return Err(ParseError::NoLeadingSlash);
        }

        // The root pattern is the only one allowed to end with a slash.
        if s == "/" {
            return Ok(Self(Vec::new()));
        }

        let mut segments = Vec::new();
        let mut start = Some(1);
        let mut after_parameter = false;

        while let Some((i, c)) = chars.next() {
            match c {
                '/' => {
                    match start.take() {
                        Some(start) if start < i => {
                            segments.push(Segment::Literal(s[start..i].to_string()));
                        }
                        _ if after_parameter => {}
                        _ => return Err(ParseError::EmptySegment { position: i }),
                    }

                    start = Some(i + 1);
                    after_parameter = false;
                }
                '{' => {
                    // A path parameter must span a whole segment.
                    if start != Some(i) {
                        return Err(ParseError::ParameterNotAllowed { position: i });
                    }

                    let name_start = i + 1;
                    let mut stop = None;

                    for (i, c) in chars.by_ref() {
                        if c == '}' {
                            stop = Some(i);

                            break;
                        }

                        if !c.is_alphanumeric() && c != '_' {
                            return Err(ParseError::InvalidParameterCharacter {
                                start: name_start,
                                position: i,
                                character: c,
                            });
                        }
                    }

                    let stop = stop.ok_or(ParseError::UnclosedParameter {
                        start: i,
                        end: s.len() - 1,
                    })?;

                    if stop == name_start {
                        return Err(ParseError::EmptyParameterName { position: i });
                    }

                    segments.push(Segment::Parameter {
                        name: s[name_start..stop].to_string(),
                    });

                    start = None;
                    after_parameter = true;
                }
                c if after_parameter => {
                    return Err(ParseError::UnexpectedCharacter {
                        position: i,
                        character: c,
                    });
                }
                c if is_valid_url_path_character(c) => {}
                c => {
                    return Err(ParseError::UnexpectedCharacter {
                        position: i,
                        character: c,
                    });
                }
            }
        }

        match start {
            Some(start) if start < s.len() => {
                segments.push(Segment::Literal(s[start..].to_string()));
            }
            Some(_) => {
                return Err(ParseError::EmptySegment {
                    position: s.len() - 1,
                });
            }
            None => {}
        }

        Ok(Self(segments))
    }
}

impl Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }

        for segment in &self.0 {
            f.write_str("/")?;

            match segment {
                Segment::Literal(s) => f.write_str(s)?,
                Segment::Parameter { name } => {
                    f.write_str("{")?;
                    f.write_str(name)?;
                    f.write_str("}")?;
                }
            }
        }

        Ok(())
    }
}

/// Returns whether a character is a valid URL path character.
///
/// Valid URL path characters, as per
/// [RFC3986](https://datatracker.ietf.org/doc/html/rfc3986#section-3.3) are: A–Z, a–z, 0–9, -, .,
/// _, ~, !, $, &, ', (, ), *, +, ,, ;, =, :, @, as well as %.
fn is_valid_url_path_character(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '.' | '_' | '~' | '!' | '$' | '&' | '\''
        | '(' | ')' | '*' | '+' | ',' | ';' | '=' | ':' | '@' | '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(path: &[&str]) -> Vec<String> {
        path.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_route_pattern() {
        let p: RoutePattern = "/".parse().unwrap();
        assert_eq!(p.to_string(), "/");
        assert!(p.segments().is_empty());

        let p: RoutePattern = "/pf".parse().unwrap();
        assert_eq!(p.to_string(), "/pf");
        assert_eq!(p.segments(), &[Segment::Literal("pf".to_string())]);

        let p: RoutePattern = "/pf/work/{work_id}".parse().unwrap();
        assert_eq!(p.to_string(), "/pf/work/{work_id}");
        assert_eq!(p.parameter_names().collect::<Vec<_>>(), vec!["work_id"]);

        let p: RoutePattern = "/user/{uid}/comment/{cid}".parse().unwrap();
        assert_eq!(p.to_string(), "/user/{uid}/comment/{cid}");
        assert_eq!(p.parameter_names().collect::<Vec<_>>(), vec!["uid", "cid"]);

        let p: RoutePattern = "/pf/apply-influencer".parse().unwrap();
        assert_eq!(p.to_string(), "/pf/apply-influencer");
    }

    #[test]
    fn test_parse_route_pattern_no_leading_slash() {
        let err = "pf".parse::<RoutePattern>().unwrap_err();

        assert_eq!(err, ParseError::NoLeadingSlash);

        let err = "".parse::<RoutePattern>().unwrap_err();

        assert_eq!(err, ParseError::NoLeadingSlash);
    }

    #[test]
    fn test_parse_route_pattern_unexpected_character() {
        let err = "/foo</bar".parse::<RoutePattern>().unwrap_err();

        match err {
            ParseError::UnexpectedCharacter {
                position,
                character,
            } => {
                assert_eq!(position, 4);
                assert_eq!(character, '<');
            }
            _ => panic!("unexpected error: {err:?}"),
        }

        assert_eq!(err.range(), 4..=4);
    }

    #[test]
    fn test_parse_route_pattern_invalid_parameter_character() {
        let err = "/foo/{bar<}".parse::<RoutePattern>().unwrap_err();

        match err {
            ParseError::InvalidParameterCharacter {
                start,
                position,
                character,
            } => {
                assert_eq!(start, 6);
                assert_eq!(position, 9);
                assert_eq!(character, '<');
            }
            _ => panic!("unexpected error: {err:?}"),
        }

        assert_eq!(err.range(), 6..=9);
    }

    #[test]
    fn test_parse_route_pattern_parameter_not_allowed() {
        let err = "/foo/prefix-{bar}".parse::<RoutePattern>().unwrap_err();

        assert_eq!(err, ParseError::ParameterNotAllowed { position: 12 });
        assert_eq!(err.range(), 12..=12);

        let err = "/foo/{foo}{bar}".parse::<RoutePattern>().unwrap_err();

        assert_eq!(err, ParseError::ParameterNotAllowed { position: 10 });

        let err = "/foo/{foo}-suffix".parse::<RoutePattern>().unwrap_err();

        assert_eq!(
            err,
            ParseError::UnexpectedCharacter {
                position: 10,
                character: '-'
            }
        );
    }

    #[test]
    fn test_parse_route_pattern_unclosed_parameter() {
        let err = "/foo/{bar".parse::<RoutePattern>().unwrap_err();

        assert_eq!(err, ParseError::UnclosedParameter { start: 5, end: 8 });
        assert_eq!(err.range(), 5..=8);
    }

    #[test]
    fn test_parse_route_pattern_empty_segments() {
        assert_eq!(
            "/foo/".parse::<RoutePattern>().unwrap_err(),
            ParseError::EmptySegment { position: 4 }
        );
        assert_eq!(
            "/foo//bar".parse::<RoutePattern>().unwrap_err(),
            ParseError::EmptySegment { position: 5 }
        );
        assert_eq!(
            "/foo/{}".parse::<RoutePattern>().unwrap_err(),
            ParseError::EmptyParameterName { position: 5 }
        );
    }

    #[test]
    fn test_error_detail() {
        let err = "/foo/{bar<}".parse::<RoutePattern>().unwrap_err();

        assert_eq!(err.detail("/foo/{bar<}"), "/foo/{^bar<^}");
    }

    #[test]
    fn test_structural_identity() {
        let a: RoutePattern = "/pf/work/{work_id}".parse().unwrap();
        let b: RoutePattern = "/pf/work/{id}".parse().unwrap();
        let c: RoutePattern = "/pf/work/details".parse().unwrap();
        let d: RoutePattern = "/pf/work".parse().unwrap();

        assert!(a.is_structurally_identical(&b));
        assert!(!a.is_structurally_identical(&c));
        assert!(!a.is_structurally_identical(&d));
    }

    #[test]
    fn test_captures() {
        let p: RoutePattern = "/pf/work/{work_id}".parse().unwrap();

        assert_eq!(
            p.captures(&segments(&["pf", "work", "abc-123"])),
            Some(vec![("work_id".to_string(), "abc-123".to_string())])
        );
        assert_eq!(p.captures(&segments(&["pf", "work", ""])), None);
        assert_eq!(p.captures(&segments(&["pf", "work"])), None);
        assert_eq!(p.captures(&segments(&["pf", "job", "abc"])), None);

        let root: RoutePattern = "/".parse().unwrap();

        assert_eq!(root.captures(&[]), Some(vec![]));
        assert_eq!(root.captures(&segments(&[""])), None);
    }
}
