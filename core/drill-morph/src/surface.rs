//! Surface-form comparison for the reverse drill, where the user types the
//! inflected form from its parse.

use unicode_normalization::UnicodeNormalization;

fn is_accent(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{0304}' | '\u{0308}' | '\u{0340}'..='\u{0345}')
}

fn is_breathing(c: char) -> bool {
    matches!(c, '\u{0313}' | '\u{0314}')
}

fn is_ignored_punctuation(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '·' | '—' | '-')
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceMatcher {
    pub ignore_accents: bool,
    pub ignore_breathing: bool,
    pub ignore_case: bool,
}

impl SurfaceMatcher {
    /// Comparison key: diacritics dropped per the flags, punctuation and
    /// whitespace always dropped.
    pub fn fold(&self, text: &str) -> String {
        let stripped: String = text
            .nfd()
            .filter(|c| !(self.ignore_accents && is_accent(*c)))
            .filter(|c| !(self.ignore_breathing && is_breathing(*c)))
            .collect();
        let mut folded: String = stripped.nfc().collect();
        if self.ignore_case {
            folded = folded.to_lowercase();
        }
        folded.retain(|c| !is_ignored_punctuation(c));
        folded
    }

    pub fn matches(&self, input: &str, surface: &str) -> bool {
        if input.trim().is_empty() {
            return false;
        }
        self.fold(input) == self.fold(surface)
    }
}

/// Width of the answer box: the surface length rounded up to a multiple of
/// three, so the box does not give the length away.
pub fn masked_width(surface: &str) -> usize {
    surface.chars().count().div_ceil(3) * 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_ignores_punctuation() {
        let strict = SurfaceMatcher::default();
        assert!(strict.matches("λόγος,", "λόγος"));
        assert!(!strict.matches("λογος", "λόγος"));
        assert!(!strict.matches("   ", ""));
    }

    #[test]
    fn test_precomposed_and_decomposed_forms_agree() {
        let strict = SurfaceMatcher::default();
        assert!(strict.matches("\u{03BF}\u{0301}", "\u{03CC}"));
    }

    #[test]
    fn test_ignore_flags() {
        let accents = SurfaceMatcher { ignore_accents: true, ..Default::default() };
        assert!(accents.matches("λογος", "λόγος"));
        assert!(!accents.matches("αρχη", "ἀρχῇ"));

        let loose = SurfaceMatcher { ignore_accents: true, ignore_breathing: true, ignore_case: false };
        assert!(loose.matches("αρχη", "ἀρχῇ"));
        assert!(!loose.matches("εν", "Ἐν"));

        let all = SurfaceMatcher { ignore_accents: true, ignore_breathing: true, ignore_case: true };
        assert!(all.matches("εν", "Ἐν"));
    }

    #[test]
    fn test_masked_width() {
        assert_eq!(masked_width(""), 0);
        assert_eq!(masked_width("ἐν"), 3);
        assert_eq!(masked_width("λόγος"), 6);
        assert_eq!(masked_width("θεός"), 6);
    }
}
