//! Hebrew ruleset: positional ETCBC/OSHB-style codes such as `Ncfsa` or `Vqp3ms`.
//!
//! Character 0 selects the part of speech; every later position is looked up
//! in the table its branch assigns to it. Characters outside a table, and
//! positions past the end of the code, leave the field undecoded.

use drill_protocol::{FieldKey, Language, ParseFields};

use crate::code::{classify_segment, Segment};
use crate::MorphDecoder;

pub type Table = &'static [(u8, &'static str)];

/// A code position and the table that decodes it into a field.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub at: usize,
    pub key: FieldKey,
    pub table: Table,
}

const fn slot(at: usize, key: FieldKey, table: Table) -> Slot {
    Slot { at, key, table }
}

pub const NOUN_TYPES: Table = &[(b'c', "common"), (b'p', "proper"), (b'g', "gentilic")];
pub const GENDERS: Table = &[(b'm', "masculine"), (b'f', "feminine"), (b'b', "common"), (b'c', "common")];
pub const NUMBERS: Table = &[(b's', "singular"), (b'p', "plural"), (b'd', "dual")];
pub const STATES: Table = &[(b'a', "absolute"), (b'c', "construct"), (b'd', "determined")];
pub const PERSONS: Table = &[(b'1', "first"), (b'2', "second"), (b'3', "third")];

pub const STEMS: Table = &[
    (b'q', "qal"),
    (b'Q', "qal passive"),
    (b'N', "niphal"),
    (b'p', "piel"),
    (b'P', "pual"),
    (b'h', "hiphil"),
    (b'H', "hophal"),
    (b't', "hithpael"),
    (b'o', "polel"),
    (b'O', "polal"),
    (b'r', "hithpolel"),
    (b'm', "poel"),
    (b'M', "poal"),
    (b'k', "palel"),
    (b'K', "pulal"),
    (b'l', "pilpel"),
    (b'L', "polpal"),
    (b'f', "hithpalpel"),
    (b'D', "nithpael"),
    (b'j', "pealal"),
    (b'i', "pilel"),
    (b'u', "hothpaal"),
    (b'c', "tiphil"),
    (b'v', "hishtaphel"),
    (b'w', "nithpalel"),
    (b'y', "nithpoel"),
    (b'z', "hithpoel"),
];

pub const TENSES: Table = &[
    (b'p', "perfect (qatal)"),
    (b'q', "sequential perfect"),
    (b'i', "imperfect (yiqtol)"),
    (b'w', "sequential imperfect"),
    (b'h', "cohortative"),
    (b'j', "jussive"),
    (b'v', "imperative"),
    (b'r', "participle active"),
    (b's', "participle passive"),
    (b'a', "infinitive absolute"),
    (b'c', "infinitive construct"),
];

pub const PRONOUN_TYPES: Table = &[
    (b'p', "personal"),
    (b'd', "demonstrative"),
    (b'i', "interrogative"),
    (b'f', "indefinite"),
    (b'r', "relative"),
];

pub const PARTICLE_TYPES: Table = &[
    (b'a', "affirmation"),
    (b'd', "definite article"),
    (b'e', "exhortation"),
    (b'i', "interrogative"),
    (b'j', "interjection"),
    (b'm', "demonstrative"),
    (b'n', "negative"),
    (b'o', "direct object marker"),
    (b'r', "relative"),
];

pub const PREFIXES: Table = &[
    (b'b', "preposition ב"),
    (b'l', "preposition ל"),
    (b'k', "preposition כ"),
    (b'm', "preposition מ"),
    (b'c', "conjunction ו"),
    (b'd', "article ה"),
    (b's', "relative ש"),
    (b'i', "interrogative ה"),
];

pub const SUFFIXES: Table = &[
    (b'p', "pronominal suffix"),
    (b'd', "directional he"),
    (b'h', "paragogic he"),
    (b'n', "paragogic nun"),
];

/// Part of speech per leading character (compared case-insensitively).
const PARTS_OF_SPEECH: Table = &[
    (b'N', "noun"),
    (b'V', "verb"),
    (b'A', "adjective"),
    (b'P', "pronoun"),
    (b'R', "preposition"),
    (b'C', "conjunction"),
    (b'D', "adverb"),
    (b'T', "particle"),
    (b'I', "interjection"),
];

/// Position 1 of an `A` code: adjective, or a numeral and its kind.
const ADJECTIVE_KINDS: &[(u8, &str, Option<&str>)] = &[
    (b'a', "adjective", None),
    (b'g', "adjective", None),
    (b'c', "numeral", Some("cardinal")),
    (b'o', "numeral", Some("ordinal")),
];

const NOUN: &[Slot] = &[
    slot(1, FieldKey::NounType, NOUN_TYPES),
    slot(2, FieldKey::Gender, GENDERS),
    slot(3, FieldKey::Number, NUMBERS),
    slot(4, FieldKey::State, STATES),
];

const ADJECTIVE: &[Slot] = &[
    slot(2, FieldKey::Gender, GENDERS),
    slot(3, FieldKey::Number, NUMBERS),
    slot(4, FieldKey::State, STATES),
];

const PRONOUN: &[Slot] = &[
    slot(1, FieldKey::PronounType, PRONOUN_TYPES),
    slot(2, FieldKey::Person, PERSONS),
    slot(3, FieldKey::Gender, GENDERS),
    slot(4, FieldKey::Number, NUMBERS),
];

const PARTICLE: &[Slot] = &[slot(1, FieldKey::ParticleType, PARTICLE_TYPES)];

const VERB_HEAD: &[Slot] = &[slot(1, FieldKey::Stem, STEMS), slot(2, FieldKey::Tense, TENSES)];

const VERB_FINITE: &[Slot] = &[
    slot(3, FieldKey::Person, PERSONS),
    slot(4, FieldKey::Gender, GENDERS),
    slot(5, FieldKey::Number, NUMBERS),
];

// Infinitives carry no person: position 3 is never read.
const VERB_INFINITIVE: &[Slot] = &[slot(4, FieldKey::Gender, GENDERS), slot(5, FieldKey::Number, NUMBERS)];

// Participles have no person column; gender/number/state move up one place.
const VERB_PARTICIPLE: &[Slot] = &[
    slot(3, FieldKey::Gender, GENDERS),
    slot(4, FieldKey::Number, NUMBERS),
    slot(5, FieldKey::State, STATES),
];

const SUFFIX: &[Slot] = &[slot(0, FieldKey::Suffix, SUFFIXES)];

// Positions are relative to the payload after the leading `S`.
const PRONOMINAL_SUFFIX: &[Slot] = &[
    slot(1, FieldKey::SuffixPerson, PERSONS),
    slot(2, FieldKey::SuffixGender, GENDERS),
    slot(3, FieldKey::SuffixNumber, NUMBERS),
];

pub fn lookup(table: Table, byte: u8) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == byte).map(|(_, v)| *v)
}

/// Meaning of an attached prefix letter, as in `Hb` or a prefix lemma.
pub fn prefix_meaning(letter: char) -> Option<&'static str> {
    u8::try_from(letter).ok().and_then(|b| lookup(PREFIXES, b))
}

fn apply(code: &[u8], slots: &[Slot], fields: &mut ParseFields) {
    for slot in slots {
        let Some(&byte) = code.get(slot.at) else {
            continue;
        };
        match lookup(slot.table, byte) {
            Some(value) => fields.set(slot.key, value),
            None => log::trace!(
                "undecoded {} {:?} at position {} of {:?}",
                slot.key,
                byte as char,
                slot.at,
                String::from_utf8_lossy(code)
            ),
        }
    }
}

fn verb_tail(tense: Option<&str>) -> &'static [Slot] {
    match tense {
        Some("infinitive absolute" | "infinitive construct") => VERB_INFINITIVE,
        Some("participle active" | "participle passive") => VERB_PARTICIPLE,
        _ => VERB_FINITE,
    }
}

fn decode_word(code: &str) -> ParseFields {
    let mut fields = ParseFields::new();
    let bytes = code.as_bytes();
    let Some(&lead) = bytes.first() else {
        return fields;
    };
    let Some(pos) = lookup(PARTS_OF_SPEECH, lead.to_ascii_uppercase()) else {
        log::debug!("unknown Hebrew part-of-speech code {:?}", code);
        return fields;
    };
    fields.set(FieldKey::Pos, pos);

    match pos {
        "noun" => apply(bytes, NOUN, &mut fields),
        "verb" => {
            apply(bytes, VERB_HEAD, &mut fields);
            let tail = verb_tail(fields.tense.as_deref());
            apply(bytes, tail, &mut fields);
        }
        "adjective" => {
            let kind = bytes
                .get(1)
                .and_then(|b| ADJECTIVE_KINDS.iter().find(|(k, _, _)| k == b));
            if let Some((_, pos, numeral_type)) = kind {
                fields.set(FieldKey::Pos, *pos);
                if let Some(numeral_type) = numeral_type {
                    fields.set(FieldKey::NumeralType, *numeral_type);
                }
            }
            apply(bytes, ADJECTIVE, &mut fields);
        }
        "pronoun" => apply(bytes, PRONOUN, &mut fields),
        "particle" => apply(bytes, PARTICLE, &mut fields),
        // Preposition, conjunction, adverb, interjection: nothing further.
        _ => {}
    }
    fields
}

fn decode_suffix(payload: &str) -> ParseFields {
    let mut fields = ParseFields::new();
    let bytes = payload.as_bytes();
    apply(bytes, SUFFIX, &mut fields);
    if bytes.first() == Some(&b'p') {
        apply(bytes, PRONOMINAL_SUFFIX, &mut fields);
    }
    fields
}

/// Decoder for Hebrew positional codes, one `/`-segment at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct HebrewDecoder;

impl MorphDecoder for HebrewDecoder {
    fn language(&self) -> Language {
        Language::Hebrew
    }

    fn decode(&self, code: &str) -> ParseFields {
        match classify_segment(code) {
            Segment::Prefix(letter) => {
                let mut fields = ParseFields::new();
                match prefix_meaning(letter) {
                    Some(meaning) => fields.set(FieldKey::Prefix, meaning),
                    None => log::debug!("unknown Hebrew prefix letter {:?}", letter),
                }
                fields
            }
            Segment::Suffix(payload) => decode_suffix(payload),
            Segment::Word(word) => decode_word(word),
        }
    }
}
