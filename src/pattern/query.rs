use super::{PatternError, PatternFragment, PatternResult};

pub const QUERY_VALUE_PATTERN: &str = "[^&]*";

#[tracing::instrument(level = "trace", skip(names), fields(count = names.len() as u64))]
pub fn compile_query<S: AsRef<str>>(names: &[S]) -> PatternResult<PatternFragment> {
    if names.is_empty() {
        return Ok(PatternFragment::empty());
    }

    let mut seen: Vec<&str> = Vec::with_capacity(names.len());
    let mut out = String::from(r"\?");

    for (position, name) in names.iter().enumerate() {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(PatternError::EmptyQueryName { position });
        }
        if seen.contains(&name) {
            return Err(PatternError::DuplicateQueryName {
                name: name.to_string(),
            });
        }
        seen.push(name);

        if position > 0 {
            out.push('&');
        }
        out.push_str(&regex::escape(name));
        out.push('=');
        out.push_str(QUERY_VALUE_PATTERN);
    }

    Ok(PatternFragment::new(out))
}
