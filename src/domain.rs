use std::fmt;

/// BioProject accession as it appears in the input list. Taken verbatim:
/// the archive decides what is a valid project, not this tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BioprojectId(String);

impl BioprojectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BioprojectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Internal SRA record id returned by an esearch, used as the efetch key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SraRecordId(String);

impl SraRecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SraRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
