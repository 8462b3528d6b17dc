//! Static field catalogs: the single source of truth for which fields a
//! language asks about, in what order, and with which canonical values.

use crate::fields::{FieldKey, Language};

/// One grammatical dimension with its closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: &'static str,
    pub values: &'static [&'static str],
}

impl FieldSpec {
    /// Explicit "present but intentionally blank" marker offered to the user.
    pub const NOT_APPLICABLE: &'static str = "—";

    /// The vocabulary followed by the not-applicable marker, in display order.
    pub fn choices(&self) -> impl Iterator<Item = &'static str> {
        self.values
            .iter()
            .copied()
            .chain(core::iter::once(Self::NOT_APPLICABLE))
    }

    pub fn is_canonical(&self, value: &str) -> bool {
        self.values.contains(&value)
    }
}

const PERSONS: &[&str] = &["first", "second", "third"];

// Greek (MorphGNT)

const GREEK_POS: &[&str] = &[
    "noun", "verb", "adjective", "article", "pronoun", "preposition", "conjunction", "adverb",
    "particle", "interjection",
];
const GREEK_PRONOUN_TYPES: &[&str] = &["personal", "demonstrative", "relative", "interrogative/indefinite"];
const GREEK_TENSES: &[&str] = &["present", "imperfect", "future", "aorist", "perfect", "pluperfect"];
const GREEK_VOICES: &[&str] = &["active", "middle", "passive"];
const GREEK_MOODS: &[&str] = &["indicative", "subjunctive", "optative", "imperative", "infinitive", "participle"];
const GREEK_CASES: &[&str] = &["nominative", "genitive", "dative", "accusative", "vocative"];
const GREEK_NUMBERS: &[&str] = &["singular", "plural"];
const GREEK_GENDERS: &[&str] = &["masculine", "feminine", "neuter"];
const GREEK_DEGREES: &[&str] = &["comparative", "superlative"];

static GREEK: [FieldSpec; 10] = [
    FieldSpec { key: FieldKey::Pos, label: "Part of Speech", values: GREEK_POS },
    FieldSpec { key: FieldKey::PronounType, label: "Pronoun Type", values: GREEK_PRONOUN_TYPES },
    FieldSpec { key: FieldKey::Tense, label: "Tense", values: GREEK_TENSES },
    FieldSpec { key: FieldKey::Voice, label: "Voice", values: GREEK_VOICES },
    FieldSpec { key: FieldKey::Mood, label: "Mood", values: GREEK_MOODS },
    FieldSpec { key: FieldKey::Person, label: "Person", values: PERSONS },
    FieldSpec { key: FieldKey::Case, label: "Case", values: GREEK_CASES },
    FieldSpec { key: FieldKey::Number, label: "Number", values: GREEK_NUMBERS },
    FieldSpec { key: FieldKey::Gender, label: "Gender", values: GREEK_GENDERS },
    FieldSpec { key: FieldKey::Degree, label: "Degree", values: GREEK_DEGREES },
];

// Hebrew (ETCBC / OSHB style)

const HEBREW_POS: &[&str] = &[
    "noun", "verb", "adjective", "numeral", "preposition", "pronoun", "conjunction", "particle",
    "adverb", "interjection",
];
const HEBREW_PREFIXES: &[&str] = &[
    "preposition ב", "preposition ל", "preposition כ", "preposition מ", "conjunction ו",
    "article ה", "relative ש", "interrogative ה",
];
const HEBREW_NOUN_TYPES: &[&str] = &["common", "proper", "gentilic"];
const HEBREW_NUMERAL_TYPES: &[&str] = &["cardinal", "ordinal"];
const HEBREW_PRONOUN_TYPES: &[&str] = &["personal", "demonstrative", "interrogative", "indefinite", "relative"];
const HEBREW_PARTICLE_TYPES: &[&str] = &[
    "affirmation", "definite article", "exhortation", "interrogative", "interjection",
    "demonstrative", "negative", "direct object marker", "relative",
];
const HEBREW_STATES: &[&str] = &["absolute", "construct", "determined"];
const HEBREW_GENDERS: &[&str] = &["masculine", "feminine", "common"];
const HEBREW_NUMBERS: &[&str] = &["singular", "plural", "dual"];
const HEBREW_STEMS: &[&str] = &[
    "qal", "qal passive", "niphal", "piel", "pual", "hiphil", "hophal", "hithpael", "polel",
    "polal", "hithpolel", "poel", "poal", "palel", "pulal", "pilpel", "polpal", "hithpalpel",
    "nithpael", "pealal", "pilel", "hothpaal", "tiphil", "hishtaphel", "nithpalel", "nithpoel",
    "hithpoel",
];
const HEBREW_TENSES: &[&str] = &[
    "perfect (qatal)", "imperfect (yiqtol)", "sequential perfect", "sequential imperfect",
    "cohortative", "jussive", "imperative", "infinitive absolute", "infinitive construct",
    "participle active", "participle passive",
];
const HEBREW_SUFFIXES: &[&str] = &["pronominal suffix", "directional he", "paragogic he", "paragogic nun"];

static HEBREW: [FieldSpec; 16] = [
    FieldSpec { key: FieldKey::Pos, label: "Part of Speech", values: HEBREW_POS },
    FieldSpec { key: FieldKey::Prefix, label: "Prefix", values: HEBREW_PREFIXES },
    FieldSpec { key: FieldKey::NounType, label: "Noun Type", values: HEBREW_NOUN_TYPES },
    FieldSpec { key: FieldKey::NumeralType, label: "Numeral Type", values: HEBREW_NUMERAL_TYPES },
    FieldSpec { key: FieldKey::PronounType, label: "Pronoun Type", values: HEBREW_PRONOUN_TYPES },
    FieldSpec { key: FieldKey::ParticleType, label: "Particle Type", values: HEBREW_PARTICLE_TYPES },
    FieldSpec { key: FieldKey::State, label: "State", values: HEBREW_STATES },
    FieldSpec { key: FieldKey::Gender, label: "Gender", values: HEBREW_GENDERS },
    FieldSpec { key: FieldKey::Number, label: "Number", values: HEBREW_NUMBERS },
    FieldSpec { key: FieldKey::Person, label: "Person", values: PERSONS },
    FieldSpec { key: FieldKey::Stem, label: "Stem/Binyan", values: HEBREW_STEMS },
    FieldSpec { key: FieldKey::Tense, label: "Tense/Aspect", values: HEBREW_TENSES },
    FieldSpec { key: FieldKey::Suffix, label: "Suffix", values: HEBREW_SUFFIXES },
    FieldSpec { key: FieldKey::SuffixPerson, label: "Suffix Person", values: PERSONS },
    FieldSpec { key: FieldKey::SuffixGender, label: "Suffix Gender", values: HEBREW_GENDERS },
    FieldSpec { key: FieldKey::SuffixNumber, label: "Suffix Number", values: HEBREW_NUMBERS },
];

/// Ordered field specs for a language. The order is the display and report order.
pub fn catalog(language: Language) -> &'static [FieldSpec] {
    match language {
        Language::Greek => &GREEK,
        Language::Hebrew => &HEBREW,
    }
}

pub fn field_spec(language: Language, key: FieldKey) -> Option<&'static FieldSpec> {
    catalog(language).iter().find(|spec| spec.key == key)
}
