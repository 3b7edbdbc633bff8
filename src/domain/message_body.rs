use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct MessageBody(String);

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl MessageBody {
    const MAX_GRAPHEMES: usize = 5000;

    /// Surrounding whitespace is dropped, inner line breaks are kept.
    pub fn parse(message: impl ToString) -> Result<Self, String> {
        let message = message.to_string();
        let message = message.trim();

        if message.is_empty() {
            return Err("Te rugăm să introduci un mesaj.".to_string());
        }
        if message.graphemes(true).count() > Self::MAX_GRAPHEMES {
            return Err("Mesajul este prea lung.".to_string());
        }
        Ok(Self(message.to_string()))
    }
}
