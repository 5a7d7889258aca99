/// A language the translation service can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Picker label, e.g. `🇫🇷 French`.
    pub fn display_label(&self) -> String {
        format!("{} {}", flag_emoji(&self.code), self.name)
    }
}

/// Sorts alphabetically by display name, the order used by the document screen.
pub fn sort_by_name(languages: &mut [Language]) {
    languages.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
}

/// Converts the first two letters of a country or language code into the
/// matching pair of regional indicator symbols. Non-letters are skipped.
pub fn flag_emoji(code: &str) -> String {
    const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;
    code.chars()
        .take(2)
        .filter(char::is_ascii_alphabetic)
        .filter_map(|c| {
            let offset = c.to_ascii_uppercase() as u32 - 'A' as u32;
            char::from_u32(REGIONAL_INDICATOR_A + offset)
        })
        .collect()
}
