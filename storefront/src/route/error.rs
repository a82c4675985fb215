//! Error types for route patterns and route tables.

use crate::View;

/// An error that can occur when parsing a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The route pattern does not start with a slash.
    #[error("the route pattern does not start with a slash")]
    NoLeadingSlash,

    /// The pattern contains an invalid character.
    #[error("the pattern contains an unexpected character (`{character}`)")]
    UnexpectedCharacter {
        /// The position at which the invalid character was found.
        position: usize,

        /// The invalid character.
        character: char,
    },

    /// A path parameter is not allowed here.
    #[error("a path parameter must span a whole segment")]
    ParameterNotAllowed {
        /// The position at which the path parameter was found.
        position: usize,
    },

    /// A path parameter contains an invalid character.
    #[error("the path parameter contains an invalid character (`{character}`)")]
    InvalidParameterCharacter {
        /// The position at which the path parameter name starts.
        start: usize,

        /// The position at which the invalid character was found.
        position: usize,

        /// The invalid character.
        character: char,
    },

    /// A path parameter is not closed.
    #[error("the path parameter is not closed")]
    UnclosedParameter {
        /// The position at which the path parameter was opened.
        start: usize,

        /// The end position.
        end: usize,
    },

    /// A path parameter has no name.
    #[error("the path parameter has no name")]
    EmptyParameterName {
        /// The position at which the path parameter was opened.
        position: usize,
    },

    /// The pattern contains an empty segment, or a trailing slash.
    #[error("the pattern contains an empty segment")]
    EmptySegment {
        /// The position of the offending slash.
        position: usize,
    },
}

impl ParseError {
    /// Returns the range of characters that caused the error.
    pub fn range(&self) -> std::ops::RangeInclusive<usize> {
        match self {
            Self::NoLeadingSlash => 0..=0,
            Self::UnexpectedCharacter { position, .. }
            | Self::ParameterNotAllowed { position }
            | Self::EmptyParameterName { position }
            | Self::EmptySegment { position } => *position..=*position,
            Self::InvalidParameterCharacter {
                start, position, ..
            } => *start..=*position,
            Self::UnclosedParameter { start, end } => *start..=*end,
        }
    }

    /// Get a detailled error message with the specific position of the error.
    pub fn detail(&self, s: &str) -> String {
        let (start, end) = (*self.range().start(), *self.range().end() + 1);

        if !s.is_char_boundary(start) || !s.is_char_boundary(end) {
            return s.to_string();
        }

        let mut result = String::with_capacity(s.len() + 2);

        result.push_str(&s[..start]);
        result.push('^');
        result.push_str(&s[start..end]);
        result.push('^');
        result.push_str(&s[end..]);

        result
    }
}

/// An error that can occur when building a route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    /// A route pattern could not be parsed.
    #[error("invalid route pattern `{detail}`: {err}")]
    InvalidPattern {
        /// The pattern, with the error position highlighted.
        detail: String,

        /// The parse error.
        #[source]
        err: ParseError,
    },

    /// A route pattern has the same shape as an already registered one.
    #[error(
        "route pattern `{pattern}` (view `{view}`) shadows `{existing}` (view `{existing_view}`)"
    )]
    DuplicatePattern {
        /// The rejected pattern.
        pattern: String,

        /// The view the rejected pattern was bound to.
        view: View,

        /// The already registered pattern.
        existing: String,

        /// The view the registered pattern is bound to.
        existing_view: View,
    },
}
