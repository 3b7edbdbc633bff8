use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct ContactName(String);

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ContactName {
    const MAX_GRAPHEMES: usize = 256;

    pub fn parse(name: impl ToString) -> Result<Self, String> {
        let name = name.to_string();
        let name = name.trim();

        if name.is_empty() {
            return Err("Te rugăm să introduci numele tău.".to_string());
        }
        if name.graphemes(true).count() > Self::MAX_GRAPHEMES {
            return Err("Numele este prea lung.".to_string());
        }
        Ok(Self(name.to_string()))
    }
}
