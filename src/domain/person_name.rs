use unicode_segmentation::UnicodeSegmentation;

const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 50;

/// A first or last name, 3 to 50 user-perceived characters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PersonName(String);

impl PersonName {
    /// `label` is the human name of the field, e.g. "First name".
    pub fn parse(s: String, label: &str) -> Result<PersonName, String> {
        let trimmed = s.trim();
        // A grapheme is defined by the Unicode standard as a "user-perceived"
        // character: `å` is a single grapheme, but it is composed of two
        // characters (`a` and `̊`).
        let length = trimmed.graphemes(true).count();
        if length < MIN_LENGTH {
            Err(format!(
                "{} must be at least {} characters long",
                label, MIN_LENGTH
            ))
        } else if length > MAX_LENGTH {
            Err(format!(
                "{} must be at most {} characters long",
                label, MAX_LENGTH
            ))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Rebuild a name that was validated before it was persisted.
    pub fn from_stored(s: String) -> PersonName {
        Self(s)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
