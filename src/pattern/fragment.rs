use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PatternFragment {
    source: String,
}

impl PatternFragment {
    pub(crate) fn new(source: String) -> Self {
        Self { source }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

impl fmt::Display for PatternFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
