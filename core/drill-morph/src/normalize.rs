use std::fmt;

use drill_protocol::{FieldKey, FieldValue, Language, ParseFields};

/// Raw values that mean "nothing here".
pub const SENTINELS: &[&str] = &["", "-", "—", "na", "none"];

// Abbreviation tables. A target is always canonical for its language and is
// never itself a key, so a second pass leaves it alone.

const SHARED: &[(&str, &str)] = &[
    ("masc", "masculine"),
    ("fem", "feminine"),
    ("sing", "singular"),
    ("sg", "singular"),
    ("plur", "plural"),
    ("pl", "plural"),
    ("1", "first"),
    ("2", "second"),
    ("3", "third"),
    ("1st", "first"),
    ("2nd", "second"),
    ("3rd", "third"),
    ("adj", "adjective"),
    ("adv", "adverb"),
    ("conj", "conjunction"),
    ("prep", "preposition"),
    ("pron", "pronoun"),
    ("interj", "interjection"),
    ("ptcl", "particle"),
];

const GREEK: &[(&str, &str)] = &[
    ("neut", "neuter"),
    ("nom", "nominative"),
    ("gen", "genitive"),
    ("dat", "dative"),
    ("acc", "accusative"),
    ("voc", "vocative"),
    ("pres", "present"),
    ("impf", "imperfect"),
    ("imperf", "imperfect"),
    ("fut", "future"),
    ("aor", "aorist"),
    ("perf", "perfect"),
    ("plupf", "pluperfect"),
    ("plup", "pluperfect"),
    ("act", "active"),
    ("mid", "middle"),
    ("pass", "passive"),
    ("ind", "indicative"),
    ("subj", "subjunctive"),
    ("opt", "optative"),
    ("imper", "imperative"),
    ("impv", "imperative"),
    ("inf", "infinitive"),
    ("part", "participle"),
    ("ptc", "participle"),
    ("ptcp", "participle"),
    ("art", "article"),
    ("comp", "comparative"),
    ("superl", "superlative"),
];

const HEBREW: &[(&str, &str)] = &[
    ("com", "common"),
    ("du", "dual"),
    ("abs", "absolute"),
    ("const", "construct"),
    ("cstr", "construct"),
    ("det", "determined"),
    ("perf", "perfect (qatal)"),
    ("perfect", "perfect (qatal)"),
    ("qatal", "perfect (qatal)"),
    ("impf", "imperfect (yiqtol)"),
    ("imperf", "imperfect (yiqtol)"),
    ("imperfect", "imperfect (yiqtol)"),
    ("yiqtol", "imperfect (yiqtol)"),
    ("weqatal", "sequential perfect"),
    ("wayyiqtol", "sequential imperfect"),
    ("coh", "cohortative"),
    ("juss", "jussive"),
    ("imper", "imperative"),
    ("impv", "imperative"),
    ("inf", "infinitive construct"),
    ("infinitive", "infinitive construct"),
    ("inf cstr", "infinitive construct"),
    ("inf abs", "infinitive absolute"),
    ("part", "participle active"),
    ("ptc", "participle active"),
    ("participle", "participle active"),
    ("num", "numeral"),
    ("dom", "direct object marker"),
    ("ב", "preposition ב"),
    ("ל", "preposition ל"),
    ("כ", "preposition כ"),
    ("מ", "preposition מ"),
    ("ו", "conjunction ו"),
    ("ש", "relative ש"),
];

fn table(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::Greek => GREEK,
        Language::Hebrew => HEBREW,
    }
}

/// A normalized field value, ready for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    One(String),
    /// Sorted and de-duplicated.
    Many(Vec<String>),
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Normalized::One(value) => f.write_str(value),
            Normalized::Many(values) => f.write_str(&values.join(", ")),
        }
    }
}

/// Canonicalizes raw values for one language ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    language: Language,
}

impl Normalizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Maps a raw value to its canonical form, or `None` for the blank markers.
    /// Unrecognized values pass through trimmed and lowercased.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let lowered = raw.trim().to_lowercase();
        let value = lowered.trim();
        if SENTINELS.contains(&value) {
            return None;
        }
        let expanded = self.expand(value).unwrap_or(value);
        Some(expanded.to_string())
    }

    fn expand(&self, value: &str) -> Option<&'static str> {
        table(self.language)
            .iter()
            .chain(SHARED.iter())
            .find(|(short, _)| *short == value)
            .map(|(_, long)| *long)
    }

    /// Normalizes each element; an empty result counts as absent.
    pub fn normalize_set(&self, values: &[String]) -> Option<Vec<String>> {
        let mut set: Vec<String> = values.iter().filter_map(|v| self.normalize(v)).collect();
        set.sort();
        set.dedup();
        if set.is_empty() {
            None
        } else {
            Some(set)
        }
    }

    /// Reads and normalizes one field of a parse.
    pub fn field(&self, fields: &ParseFields, key: FieldKey) -> Option<Normalized> {
        match fields.get(key)? {
            FieldValue::One(value) => self.normalize(value).map(Normalized::One),
            FieldValue::Many(values) => self.normalize_set(values).map(Normalized::Many),
        }
    }

    /// Single-valued convenience for context lookups (tense, mood, suffix).
    pub fn scalar(&self, fields: &ParseFields, key: FieldKey) -> Option<String> {
        fields.scalar(key).and_then(|value| self.normalize(value))
    }
}

pub fn normalize(language: Language, raw: &str) -> Option<String> {
    Normalizer::new(language).normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_protocol::{catalog, FieldSpec};
    use proptest::prelude::*;

    const LANGUAGES: [Language; 2] = [Language::Greek, Language::Hebrew];

    #[test]
    fn test_sentinels_are_absent() {
        let n = Normalizer::new(Language::Hebrew);
        for raw in ["", "  ", "-", "—", "NA", " none ", FieldSpec::NOT_APPLICABLE] {
            assert_eq!(n.normalize(raw), None, "{:?}", raw);
        }
    }

    #[test]
    fn test_abbreviations_expand_per_language() {
        let greek = Normalizer::new(Language::Greek);
        let hebrew = Normalizer::new(Language::Hebrew);

        assert_eq!(greek.normalize("Masc").as_deref(), Some("masculine"));
        assert_eq!(hebrew.normalize(" masc ").as_deref(), Some("masculine"));
        assert_eq!(greek.normalize("3").as_deref(), Some("third"));
        assert_eq!(greek.normalize("impf").as_deref(), Some("imperfect"));
        assert_eq!(hebrew.normalize("impf").as_deref(), Some("imperfect (yiqtol)"));
        assert_eq!(greek.normalize("perfect").as_deref(), Some("perfect"));
        assert_eq!(hebrew.normalize("Perfect").as_deref(), Some("perfect (qatal)"));
        assert_eq!(hebrew.normalize("ו").as_deref(), Some("conjunction ו"));
    }

    #[test]
    fn test_unknown_values_pass_through() {
        let n = Normalizer::new(Language::Greek);
        assert_eq!(n.normalize("  Frobnicated ").as_deref(), Some("frobnicated"));
    }

    #[test]
    fn test_table_targets_are_canonical_and_terminal() {
        for language in LANGUAGES {
            let keys: Vec<&str> = table(language).iter().chain(SHARED).map(|(k, _)| *k).collect();
            for (_, long) in table(language).iter().chain(SHARED) {
                assert!(!keys.contains(long), "{} target {:?} is also a key", language, long);
                assert!(!SENTINELS.contains(long));
                let canonical = catalog(language).iter().any(|spec| spec.is_canonical(long));
                // Shared entries only need to be canonical where the vocabulary exists.
                let shared_only = SHARED.iter().any(|(_, l)| l == long)
                    && !table(language).iter().any(|(_, l)| l == long);
                assert!(canonical || shared_only, "{} target {:?} not in catalog", language, long);
            }
        }
    }

    #[test]
    fn test_catalog_values_are_fixed_points() {
        for language in LANGUAGES {
            let n = Normalizer::new(language);
            for spec in catalog(language) {
                for value in spec.values {
                    assert_eq!(n.normalize(value).as_deref(), Some(*value));
                }
            }
        }
    }

    #[test]
    fn test_normalize_set() {
        let n = Normalizer::new(Language::Hebrew);
        let raw = vec!["ו".to_string(), "—".to_string(), "conjunction ו".to_string(), "article ה".to_string()];
        assert_eq!(
            n.normalize_set(&raw),
            Some(vec!["article ה".to_string(), "conjunction ו".to_string()])
        );
        assert_eq!(n.normalize_set(&["none".to_string()]), None);
    }

    proptest! {
        #[test]
        fn test_normalization_is_idempotent(raw in "[ a-zA-Z0-9\\-—()αβγאבו]{0,16}") {
            for language in LANGUAGES {
                let n = Normalizer::new(language);
                let once = n.normalize(&raw);
                let twice = once.as_deref().and_then(|v| n.normalize(v));
                prop_assert_eq!(once, twice);
            }
        }

        #[test]
        fn test_table_keys_normalize_idempotently(idx in 0usize..64, pad in "[ ]{0,3}") {
            for language in LANGUAGES {
                let entries: Vec<_> = table(language).iter().chain(SHARED).collect();
                let (short, _) = entries[idx % entries.len()];
                let n = Normalizer::new(language);
                let once = n.normalize(&format!("{}{}{}", pad, short.to_uppercase(), pad));
                let twice = once.as_deref().and_then(|v| n.normalize(v));
                prop_assert_eq!(once, twice);
            }
        }
    }
}
