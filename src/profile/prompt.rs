use crate::errors::{
    Error,
    Result,
};
use core::fmt;
use regex::bytes::{
    Match,
    Regex,
};

/// `Prompt` is a named regular expression matched against the tail of device output. An empty
/// pattern is legal and simply never matches -- that is how a profile says "this family has no
/// such prompt".
#[derive(Clone, Debug)]
pub struct Prompt {
    key: String,
    source: String,
    regex: Option<Regex>,
}

impl Prompt {
    /// Compile a new `Prompt`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if `pattern` is not a valid regex.
    pub fn new(
        key: &str,
        pattern: &str,
    ) -> Result<Self> {
        let regex = if pattern.is_empty() {
            None
        } else {
            match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    return Err(Error::InvalidPattern {
                        key: key.to_owned(),
                        source: err,
                    })
                }
            }
        };

        Ok(Self {
            key: key.to_owned(),
            source: pattern.to_owned(),
            regex,
        })
    }

    /// A prompt that never matches.
    #[must_use]
    pub fn unmatched(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            source: String::new(),
            regex: None,
        }
    }

    /// The key this prompt was registered under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The pattern source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the prompt has no pattern (and so never matches).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// Leftmost match of this prompt in `haystack`.
    #[must_use]
    pub fn find<'h>(
        &self,
        haystack: &'h [u8],
    ) -> Option<Match<'h>> {
        self.regex.as_ref().and_then(|regex| regex.find(haystack))
    }

    /// Returns true if this prompt matches anywhere in `haystack`.
    #[must_use]
    pub fn is_match(
        &self,
        haystack: &[u8],
    ) -> bool {
        self.regex
            .as_ref()
            .map_or(false, |regex| regex.is_match(haystack))
    }

    /// Remove every match of this prompt from `haystack`.
    #[must_use]
    pub fn strip(
        &self,
        haystack: &[u8],
    ) -> Vec<u8> {
        self.regex.as_ref().map_or_else(
            || haystack.to_vec(),
            |regex| regex.replace_all(haystack, &b""[..]).into_owned(),
        )
    }
}

impl fmt::Display for Prompt {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "[{}] {}", self.key, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_never_matches() {
        let prompt = Prompt::new("logout", "").unwrap();

        assert!(prompt.is_empty());
        assert!(!prompt.is_match(b"anything at all"));
        assert!(prompt.find(b"").is_none());
        assert_eq!(prompt.strip(b"router#"), b"router#".to_vec());
    }

    #[test]
    fn invalid_pattern_names_its_key() {
        let err = Prompt::new("command", "[unclosed").unwrap_err();

        assert!(matches!(err, Error::InvalidPattern { ref key, .. } if key == "command"));
    }

    #[test]
    fn strip_removes_trailing_prompt() {
        let prompt = Prompt::new("command", r"[\w().-]+[$#>]\s?(?:\(enable\))?\s*$").unwrap();

        assert_eq!(prompt.strip(b"uptime is 3 weeks\nrouter#"), b"uptime is 3 weeks\n".to_vec());
    }
}
