use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld`, no whitespace and a single `@` on either side.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Email pattern must compile"));

pub const INVALID_EMAIL: &str = "Adresă de email invalidă.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl EmailAddress {
    pub fn parse(email: impl ToString) -> Result<Self, String> {
        let email = email.to_string();
        if !is_valid_email(&email) {
            return Err(INVALID_EMAIL.to_string());
        }
        Ok(Self(email))
    }
}

/// Shape check shared by the relays and the client-side form validation.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
