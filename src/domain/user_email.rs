use once_cell::sync::Lazy;
use regex::Regex;

// `\w` is ASCII-only: `[A-Za-z0-9_]`.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)^\w+([\.-]?\w+)*@\w+([\.-]?\w+)*(\.\w{2,3})+$")
        .expect("email pattern is a valid regex")
});

/// A lowercased email address of the `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn parse(s: String) -> Result<UserEmail, String> {
        let normalised = s.trim().to_lowercase();
        if normalised.is_empty() {
            return Err("Email is required".to_string());
        }
        if EMAIL_SHAPE.is_match(&normalised) {
            Ok(Self(normalised))
        } else {
            Err(format!("{} is not a valid email address", s))
        }
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
