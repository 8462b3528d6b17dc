//! Morphology decoding: source codes in, canonical [`ParseFields`] out.
//!
//! Decoding never fails. Characters a ruleset does not recognize leave their
//! field absent, so a damaged code still yields whatever it can.

pub mod code;
pub mod compound;
pub mod greek;
pub mod hebrew;

use drill_protocol::{Language, ParseFields};

pub use compound::{segment, CompoundMode, VerseBuilder, WordPart};
pub use greek::{GreekAttributes, GreekDecoder};
pub use hebrew::HebrewDecoder;

/// A language-specific ruleset for one `/`-free code segment.
pub trait MorphDecoder: Send + Sync {
    fn language(&self) -> Language;

    fn decode(&self, code: &str) -> ParseFields;
}

static GREEK: GreekDecoder = GreekDecoder;
static HEBREW: HebrewDecoder = HebrewDecoder;

pub fn decoder(language: Language) -> &'static dyn MorphDecoder {
    match language {
        Language::Greek => &GREEK,
        Language::Hebrew => &HEBREW,
    }
}

/// Decodes a single segment with the ruleset for `language`.
pub fn decode(language: Language, code: &str) -> ParseFields {
    decoder(language).decode(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_protocol::FieldKey;

    #[test]
    fn test_hebrew_verb_example() {
        let expected = ParseFields::new()
            .with(FieldKey::Pos, "verb")
            .with(FieldKey::Stem, "qal")
            .with(FieldKey::Tense, "perfect (qatal)")
            .with(FieldKey::Person, "third")
            .with(FieldKey::Gender, "masculine")
            .with(FieldKey::Number, "singular");
        assert_eq!(decode(Language::Hebrew, "Vqp3ms"), expected);
    }

    #[test]
    fn test_greek_verb_example() {
        let expected = ParseFields::new()
            .with(FieldKey::Pos, "verb")
            .with(FieldKey::Tense, "imperfect")
            .with(FieldKey::Voice, "active")
            .with(FieldKey::Mood, "indicative")
            .with(FieldKey::Person, "third")
            .with(FieldKey::Number, "singular");
        assert_eq!(decode(Language::Greek, "V- 3IAI-S--"), expected);
    }

    #[test]
    fn test_decoder_matches_language() {
        for language in [Language::Greek, Language::Hebrew] {
            assert_eq!(decoder(language).language(), language);
        }
    }

    #[test]
    fn test_compound_example() {
        let parts = segment(Language::Hebrew, "A/B", Some("L1/L2"), "C1/C2", CompoundMode::Split);
        let flags: Vec<bool> = parts.iter().map(|p| p.after_space).collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn test_decoding_is_deterministic() {
        for (language, code) in [
            (Language::Hebrew, "Vqp3ms"),
            (Language::Hebrew, "Sp3fs"),
            (Language::Greek, "N- ----GSM-"),
            (Language::Greek, "bogus"),
        ] {
            assert_eq!(decode(language, code), decode(language, code));
        }
    }
}
