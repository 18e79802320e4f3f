//! Path template compilation
//!
//! Turns templates like `/users/{id:\d+}/posts/{slug}` into an anchored
//! regular expression plus the ordered list of placeholder names. A
//! placeholder is `{identifier}` (capturing one or more non-`/` characters)
//! or `{identifier:subexpression}`; identifiers follow
//! `[A-Za-z_][A-Za-z0-9_]*`. Text between placeholders, and any brace
//! sequence that does not parse as a placeholder, is passed through to the
//! expression verbatim.

use crate::error::{RouterError, RouterResult};
use crate::types::RouteParams;
use regex::Regex;

/// Default sub-pattern for `{name}`: one or more characters excluding `/`.
const DEFAULT_SUBPATTERN: &str = "[^/]+";

/// A compiled path template: anchored expression + ordered parameter names.
///
/// Built once per dynamic route at table-build time and shared by every
/// match against that route.
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    regex: Regex,
    param_names: Vec<String>,
}

impl CompiledPattern {
    /// Compile a path template into an anchored matcher.
    ///
    /// Fails with [`RouterError::PatternCompile`] when a placeholder
    /// sub-expression is rejected by the regex engine. Duplicate parameter
    /// names within one template fail the same way: the engine refuses
    /// duplicate capture-group names.
    pub fn compile(template: &str) -> RouterResult<Self> {
        let mut expression = String::with_capacity(template.len() + 16);
        let mut param_names = Vec::new();
        expression.push('^');

        let mut rest = template;
        while let Some(open) = rest.find('{') {
            expression.push_str(&rest[..open]);
            match parse_placeholder(&rest[open..]) {
                Some(placeholder) => {
                    expression.push_str("(?P<");
                    expression.push_str(placeholder.name);
                    expression.push('>');
                    expression.push_str(placeholder.subpattern);
                    expression.push(')');
                    param_names.push(placeholder.name.to_string());
                    rest = &rest[open + placeholder.consumed..];
                }
                None => {
                    // Not a placeholder; the brace stays literal.
                    expression.push('{');
                    rest = &rest[open + 1..];
                }
            }
        }
        expression.push_str(rest);
        expression.push('$');

        let regex = Regex::new(&expression).map_err(|source| RouterError::PatternCompile {
            template: template.to_string(),
            source: Box::new(source),
        })?;

        Ok(Self { regex, param_names })
    }

    /// Attempt a full-string match, extracting one value per parameter in
    /// template order.
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        let captures = self.regex.captures(path)?;
        let mut params = RouteParams::default();
        for name in &self.param_names {
            if let Some(m) = captures.name(name) {
                params.push(name.clone(), m.as_str().to_string());
            }
        }
        Some(params)
    }

    /// Placeholder names in template order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// The anchored expression, for diagnostics.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

struct Placeholder<'t> {
    name: &'t str,
    subpattern: &'t str,
    consumed: usize,
}

/// Parse a placeholder at the start of `input` (which begins with `{`).
///
/// Returns the identifier, its sub-pattern (trimmed; custom sub-expressions
/// run to the next `}`), and the number of bytes consumed including both
/// braces. Returns `None` when the braced text is not a placeholder.
fn parse_placeholder(input: &str) -> Option<Placeholder<'_>> {
    let close = input.find('}')?;
    let inner = &input[1..close];

    let bytes = inner.as_bytes();
    if bytes.is_empty() || !(bytes[0].is_ascii_alphabetic() || bytes[0] == b'_') {
        return None;
    }
    let mut ident_end = 1;
    while ident_end < bytes.len()
        && (bytes[ident_end].is_ascii_alphanumeric() || bytes[ident_end] == b'_')
    {
        ident_end += 1;
    }

    let (name, tail) = inner.split_at(ident_end);
    let subpattern = if tail.is_empty() {
        DEFAULT_SUBPATTERN
    } else {
        let sub = tail.strip_prefix(':')?.trim();
        if sub.is_empty() {
            return None;
        }
        sub
    };

    Some(Placeholder {
        name,
        subpattern,
        consumed: close + 1,
    })
}
