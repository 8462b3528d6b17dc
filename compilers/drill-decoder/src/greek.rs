//! Greek ruleset: MorphGNT part-of-speech codes plus the 8-column parsing string.

use std::str::FromStr;

use drill_protocol::{FieldKey, Language, ParseFields};

use crate::code::{parse_morphgnt, CodeError, MorphGntCode, MORPHGNT_SLOTS};
use crate::MorphDecoder;

type Table = &'static [(char, &'static str)];

const CASES: Table = &[('N', "nominative"), ('G', "genitive"), ('D', "dative"), ('A', "accusative"), ('V', "vocative")];
const NUMBERS: Table = &[('S', "singular"), ('P', "plural")];
const GENDERS: Table = &[('M', "masculine"), ('F', "feminine"), ('N', "neuter")];
const PERSONS: Table = &[('1', "first"), ('2', "second"), ('3', "third")];
const VOICES: Table = &[('A', "active"), ('M', "middle"), ('P', "passive")];
const DEGREES: Table = &[('C', "comparative"), ('S', "superlative")];

const TENSES: Table = &[
    ('P', "present"),
    ('I', "imperfect"),
    ('F', "future"),
    ('A', "aorist"),
    ('X', "perfect"),
    ('Y', "pluperfect"),
];

const MOODS: Table = &[
    ('I', "indicative"),
    ('D', "imperative"),
    ('S', "subjunctive"),
    ('O', "optative"),
    ('N', "infinitive"),
    ('P', "participle"),
];

/// Parsing-string columns, in MorphGNT order.
const COLUMNS: [(FieldKey, Table); MORPHGNT_SLOTS] = [
    (FieldKey::Person, PERSONS),
    (FieldKey::Tense, TENSES),
    (FieldKey::Voice, VOICES),
    (FieldKey::Mood, MOODS),
    (FieldKey::Case, CASES),
    (FieldKey::Number, NUMBERS),
    (FieldKey::Gender, GENDERS),
    (FieldKey::Degree, DEGREES),
];

fn lookup(table: Table, code: char) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == code).map(|(_, v)| *v)
}

/// Part of speech, and pronoun kind for the `R?` family.
fn part_of_speech(code: &str) -> Option<(&'static str, Option<&'static str>)> {
    let code = code.trim_end_matches('-').to_ascii_uppercase();
    let decoded = match code.as_str() {
        "N" => ("noun", None),
        "V" => ("verb", None),
        "A" => ("adjective", None),
        "RA" => ("article", None),
        "RD" => ("pronoun", Some("demonstrative")),
        "RI" => ("pronoun", Some("interrogative/indefinite")),
        "RP" => ("pronoun", Some("personal")),
        "RR" => ("pronoun", Some("relative")),
        "P" => ("preposition", None),
        "C" => ("conjunction", None),
        "D" => ("adverb", None),
        "I" => ("interjection", None),
        "X" => ("particle", None),
        _ => return None,
    };
    Some(decoded)
}

/// Raw MorphGNT attribute columns, each already split out of the code.
///
/// Fields hold the single-letter codes (`"3"`, `"I"`, `"A"`, ...); `None` or
/// `"-"` means the column is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GreekAttributes {
    pub pos: Option<String>,
    pub person: Option<String>,
    pub tense: Option<String>,
    pub voice: Option<String>,
    pub mood: Option<String>,
    pub case: Option<String>,
    pub number: Option<String>,
    pub gender: Option<String>,
    pub degree: Option<String>,
}

impl GreekAttributes {
    pub fn from_morphgnt(pos: &str, parsing: &str) -> Result<Self, CodeError> {
        let code = format!("{} {}", pos.trim(), parsing.trim());
        Ok(Self::from(parse_morphgnt(code.trim())?))
    }

    fn columns(&self) -> [Option<&str>; MORPHGNT_SLOTS] {
        [
            self.person.as_deref(),
            self.tense.as_deref(),
            self.voice.as_deref(),
            self.mood.as_deref(),
            self.case.as_deref(),
            self.number.as_deref(),
            self.gender.as_deref(),
            self.degree.as_deref(),
        ]
    }

    /// Decodes every column it recognizes; unknown codes leave the field absent.
    pub fn decode_attributes(&self) -> ParseFields {
        let mut fields = ParseFields::new();

        if let Some(pos) = self.pos.as_deref() {
            match part_of_speech(pos.trim()) {
                Some((name, pronoun_type)) => {
                    fields.set(FieldKey::Pos, name);
                    if let Some(kind) = pronoun_type {
                        fields.set(FieldKey::PronounType, kind);
                    }
                }
                None => log::debug!("unknown MorphGNT part of speech {:?}", pos),
            }
        }

        for ((key, table), raw) in COLUMNS.iter().zip(self.columns()) {
            let Some(code) = raw.and_then(|r| r.trim().chars().next()) else {
                continue;
            };
            if code == '-' {
                continue;
            }
            match lookup(*table, code.to_ascii_uppercase()) {
                Some(value) => fields.set(*key, value),
                None => log::trace!("undecoded {} code {:?}", key, code),
            }
        }
        fields
    }
}

impl From<MorphGntCode<'_>> for GreekAttributes {
    fn from(code: MorphGntCode<'_>) -> Self {
        let column = |idx: usize| code.slots[idx].map(String::from);
        Self {
            pos: Some(code.pos.to_string()),
            person: column(0),
            tense: column(1),
            voice: column(2),
            mood: column(3),
            case: column(4),
            number: column(5),
            gender: column(6),
            degree: column(7),
        }
    }
}

impl FromStr for GreekAttributes {
    type Err = CodeError;

    /// Parses the combined form `"V- 3IAI-S--"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(parse_morphgnt(s)?))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreekDecoder;

impl MorphDecoder for GreekDecoder {
    fn language(&self) -> Language {
        Language::Greek
    }

    fn decode(&self, code: &str) -> ParseFields {
        match code.parse::<GreekAttributes>() {
            Ok(attributes) => attributes.decode_attributes(),
            Err(err) => {
                // Keep whatever the leading part-of-speech token still tells us.
                log::debug!("{}; decoding part of speech only", err);
                let pos = code.split_whitespace().next().map(String::from);
                GreekAttributes { pos, ..Default::default() }.decode_attributes()
            }
        }
    }
}
