//! Language capability — text-language classification and code mapping.
//!
//! Classification proper is an external concern; [`DetectLanguage`] is the
//! seam for it. [`ScriptDetector`] is a small built-in implementation based
//! on Unicode script counting so the library works without wiring an
//! external classifier.

/// The language-of-text classification capability.
///
/// Returns a two-letter code, or `None` when classification is not
/// possible (empty or ambiguous input).
pub trait DetectLanguage: Send + Sync {
    fn detect(&self, text: &str) -> Option<String>;
}

/// Unicode-script-counting classifier.
///
/// Counts letters per script and reports the dominant one. Good enough to
/// separate the locale's script from Latin-script pages, which is all the
/// synthesizer needs for the language parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptDetector;

impl DetectLanguage for ScriptDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let mut arabic = 0usize;
        let mut cyrillic = 0usize;
        let mut han = 0usize;
        let mut latin = 0usize;
        for c in text.chars() {
            match c as u32 {
                0x0600..=0x06FF | 0x0750..=0x077F | 0xFB50..=0xFDFF | 0xFE70..=0xFEFF => {
                    arabic += 1
                }
                0x0400..=0x04FF => cyrillic += 1,
                0x4E00..=0x9FFF => han += 1,
                _ if c.is_ascii_alphabetic() => latin += 1,
                _ => {}
            }
        }
        let (code, count) = [("fa", arabic), ("ru", cyrillic), ("zh", han), ("en", latin)]
            .into_iter()
            .max_by_key(|(_, count)| *count)?;
        if count == 0 {
            return None;
        }
        Some(code.to_string())
    }
}

/// Normalize a free-text language label to a two-letter code.
///
/// Providers return labels like `"English"` or `"Persian"`; unknown labels
/// pass through unchanged so the citation still carries something useful.
pub fn to_two_letter_code(label: &str) -> String {
    match label.to_ascii_lowercase().as_str() {
        "english" => "en",
        "persian" | "farsi" | "فارسی" => "fa",
        "arabic" => "ar",
        "french" => "fr",
        "german" => "de",
        "spanish" => "es",
        "russian" => "ru",
        "chinese" => "zh",
        "japanese" => "ja",
        "italian" => "it",
        "turkish" => "tr",
        _ => return label.to_string(),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_text_is_english() {
        assert_eq!(
            ScriptDetector.detect("Rockhopper raises Falklands oil estimate"),
            Some("en".into())
        );
    }

    #[test]
    fn arabic_script_is_fa() {
        assert_eq!(ScriptDetector.detect("واپاشی آلفا"), Some("fa".into()));
    }

    #[test]
    fn empty_text_is_none() {
        assert_eq!(ScriptDetector.detect("12345 —"), None);
    }

    #[test]
    fn label_normalization() {
        assert_eq!(to_two_letter_code("English"), "en");
        assert_eq!(to_two_letter_code("Persian"), "fa");
        // Unknown labels pass through.
        assert_eq!(to_two_letter_code("eo"), "eo");
    }
}
