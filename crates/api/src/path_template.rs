//! Path templates in both syntaxes the service deals with.
//!
//! The catalog writes parameters as `{contactId}` (the OpenAPI form); the router
//! needs `:contactId`. Two templates are *equivalent* when they have the same
//! literal segments and parameters in the same positions, whatever the
//! parameters are called.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("path template '{template}' must start with '/'")]
    NotAbsolute { template: String },

    #[error("path template '{template}' has a malformed segment '{segment}'")]
    MalformedSegment { template: String, segment: String },
}

/// One `/`-separated piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Param(&'a str),
}

/// Split a template into segments, accepting `{name}` and `:name` parameters.
pub fn segments(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let rest = template
        .strip_prefix('/')
        .ok_or_else(|| TemplateError::NotAbsolute {
            template: template.to_string(),
        })?;
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    rest.split('/')
        .map(|segment| {
            let malformed = || TemplateError::MalformedSegment {
                template: template.to_string(),
                segment: segment.to_string(),
            };

            let param = if let Some(inner) = segment.strip_prefix('{') {
                Some(inner.strip_suffix('}').ok_or_else(malformed)?)
            } else {
                segment.strip_prefix(':')
            };

            match param {
                Some(name) if is_identifier(name) => Ok(Segment::Param(name)),
                Some(_) => Err(malformed()),
                None if segment.is_empty() || segment.contains(['{', '}']) => Err(malformed()),
                None => Ok(Segment::Literal(segment)),
            }
        })
        .collect()
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parameter names in order of appearance.
pub fn parameters(template: &str) -> Result<Vec<&str>, TemplateError> {
    Ok(segments(template)?
        .into_iter()
        .filter_map(|s| match s {
            Segment::Param(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// Rewrite a template into the router's `:name` syntax.
pub fn to_router_path(template: &str) -> Result<String, TemplateError> {
    let segments = segments(template)?;
    if segments.is_empty() {
        return Ok("/".to_string());
    }

    let mut out = String::with_capacity(template.len());
    for segment in segments {
        out.push('/');
        match segment {
            Segment::Literal(lit) => out.push_str(lit),
            Segment::Param(name) => {
                out.push(':');
                out.push_str(name);
            }
        }
    }
    Ok(out)
}

/// Same literals, same parameter positions. Malformed templates are never
/// equivalent to anything.
pub fn equivalent(a: &str, b: &str) -> bool {
    let (Ok(a), Ok(b)) = (segments(a), segments(b)) else {
        return false;
    };

    a.len() == b.len()
        && a.iter().zip(&b).all(|pair| match pair {
            (Segment::Literal(x), Segment::Literal(y)) => x == y,
            (Segment::Param(_), Segment::Param(_)) => true,
            _ => false,
        })
}
