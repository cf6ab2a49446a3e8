//! Line classification for the directory file format.
//!
//! One declaration per line. Whole-line `#` comments and blank lines are
//! ignored; a `#` after real content is not a comment. A line whose second
//! whitespace-delimited token is a bare `=` declares a macro; every other
//! non-empty line declares a host.

/// A classified directory line. Borrows from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Whitespace-only line.
    Blank,
    /// Whole-line `#` comment.
    Comment,
    /// Macro declaration: `name = expression`.
    Macro {
        /// Name left of the `=`.
        name: &'a str,
        /// Raw expression text right of the `=`, trimmed, unevaluated.
        expr: &'a str,
    },
    /// Host declaration: `[user@]name[:port] tag tag …`.
    Host {
        /// The raw host spec token.
        spec: &'a str,
        /// Remaining column tokens, in column order.
        tags: Vec<&'a str>,
    },
}

/// Classifies one line of directory text.
///
/// # Errors
///
/// Returns a human-readable reason for a macro declaration with an empty
/// expression. Host lines cannot be structurally invalid here; their spec
/// token is validated later by [`HostSpec::parse`](crate::HostSpec::parse).
pub fn classify(line: &str) -> Result<Line<'_>, String> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }
    if trimmed.starts_with('#') {
        return Ok(Line::Comment);
    }

    let mut tokens = trimmed.split_whitespace();
    let first = tokens.next().unwrap_or_default();

    if tokens.next() == Some("=") {
        // Recover the raw right-hand side so operator spacing survives.
        let rest = trimmed[first.len()..].trim_start();
        let expr = rest[1..].trim();
        if expr.is_empty() {
            return Err(format!("macro {first:?} has an empty expression"));
        }
        return Ok(Line::Macro { name: first, expr });
    }

    Ok(Line::Host {
        spec: first,
        tags: tokens.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(classify("").unwrap(), Line::Blank);
        assert_eq!(classify("   \t ").unwrap(), Line::Blank);
        assert_eq!(classify("# directory of hosts").unwrap(), Line::Comment);
        assert_eq!(classify("   # indented comment").unwrap(), Line::Comment);
    }

    #[test]
    fn test_host_line() {
        let line = classify("bilbo prod intel linux").unwrap();
        assert_eq!(
            line,
            Line::Host {
                spec: "bilbo",
                tags: vec!["prod", "intel", "linux"],
            }
        );
    }

    #[test]
    fn test_host_line_without_tags() {
        assert_eq!(
            classify("lonely").unwrap(),
            Line::Host {
                spec: "lonely",
                tags: vec![],
            }
        );
    }

    #[test]
    fn test_macro_line() {
        let line = classify("sunprod = solaris ^ e450").unwrap();
        assert_eq!(
            line,
            Line::Macro {
                name: "sunprod",
                expr: "solaris ^ e450",
            }
        );
    }

    #[test]
    fn test_macro_requires_bare_equals() {
        // No whitespace around `=` means this is a host named "sunprod=solaris".
        let line = classify("sunprod=solaris").unwrap();
        assert!(matches!(line, Line::Host { spec, .. } if spec == "sunprod=solaris"));
    }

    #[test]
    fn test_macro_empty_expression_is_malformed() {
        assert!(classify("sunprod =").is_err());
        assert!(classify("sunprod =   ").is_err());
    }

    #[test]
    fn test_trailing_comment_not_stripped() {
        // Whole-line comments only: a trailing `#` is just another tag.
        let line = classify("bilbo prod # primary").unwrap();
        assert_eq!(
            line,
            Line::Host {
                spec: "bilbo",
                tags: vec!["prod", "#", "primary"],
            }
        );
    }

    #[test]
    fn test_later_equals_is_a_tag() {
        let line = classify("host tag1 = tag2").unwrap();
        assert_eq!(
            line,
            Line::Host {
                spec: "host",
                tags: vec!["tag1", "=", "tag2"],
            }
        );
    }
}
