use super::{PatternError, PatternFragment, PatternResult};

pub const PATH_VARIABLE_PATTERN: &str = "[^/?]+";

const TRAILING_SLASH: &str = "/?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedPath {
    pub fragment: PatternFragment,
    pub literal_len: usize,
    pub placeholders: usize,
}

/// Compiles a `{name}` path template into a fragment ending in an optional trailing slash.
#[tracing::instrument(level = "trace", skip_all, fields(template = %template))]
pub fn compile_path(template: &str) -> PatternResult<PatternFragment> {
    parse_path(template).map(|parsed| parsed.fragment)
}

pub(crate) fn parse_path(template: &str) -> PatternResult<ParsedPath> {
    let (offset, body) = match template.strip_prefix('/') {
        Some(rest) => (1usize, rest),
        None => (0usize, template),
    };

    let mut out = String::with_capacity(body.len() + 16);
    let mut literal = String::new();
    let mut literal_len = 0usize;
    let mut placeholders = 0usize;
    let mut open: Option<usize> = None;

    for (idx, ch) in body.char_indices() {
        let index = idx + offset;
        match ch {
            '{' => {
                if open.is_some() {
                    return Err(PatternError::NestedPlaceholder {
                        template: template.to_string(),
                        index,
                    });
                }
                literal_len += literal.len();
                out.push_str(&regex::escape(&literal));
                literal.clear();
                open = Some(index);
            }
            '}' => {
                let Some(start) = open.take() else {
                    return Err(PatternError::UnopenedPlaceholder {
                        template: template.to_string(),
                        index,
                    });
                };
                if index == start + 1 {
                    return Err(PatternError::EmptyPlaceholder {
                        template: template.to_string(),
                        index: start,
                    });
                }
                placeholders += 1;
                out.push_str(PATH_VARIABLE_PATTERN);
            }
            _ if open.is_some() => {}
            _ => literal.push(ch),
        }
    }

    if let Some(index) = open {
        return Err(PatternError::UnclosedPlaceholder {
            template: template.to_string(),
            index,
        });
    }

    // the optional trailing slash is appended below
    let literal = literal.strip_suffix('/').unwrap_or(&literal);
    literal_len += literal.len();
    out.push_str(&regex::escape(literal));
    out.push_str(TRAILING_SLASH);

    Ok(ParsedPath {
        fragment: PatternFragment::new(out),
        literal_len,
        placeholders,
    })
}
