use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A `name: value` header pair, used both for extra request headers and for
/// headers the response is required to carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid header format. Expected format: <name>: <value>. Example: \"content-type: text/html\"")]
pub struct ParseHeaderSpecError;

impl HeaderSpec {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parses a header pair from its `name: value` wire shape.
///
/// The string is split on the first `:`; the name and value are trimmed. The
/// name must not be empty, the value may be.
impl FromStr for HeaderSpec {
    type Err = ParseHeaderSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s.split_once(':').ok_or(ParseHeaderSpecError)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ParseHeaderSpecError);
        }

        Ok(HeaderSpec {
            name: name.to_string(),
            value: value.trim().to_string(),
        })
    }
}

impl Display for HeaderSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
