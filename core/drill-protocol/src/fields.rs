use core::fmt;
use core::str::FromStr;

use alloc::string::{String, ToString};
use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Source-language ruleset a verse (and its codes) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Language {
    Greek = 0,
    Hebrew = 1,
}

impl Language {
    pub const fn as_str(self) -> &'static str {
        match self {
            Language::Greek => "greek",
            Language::Hebrew => "hebrew",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLanguageError(pub String);

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown source language: {:?}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseLanguageError {}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greek" | "grc" | "gnt" => Ok(Language::Greek),
            "hebrew" | "hbo" | "heb" => Ok(Language::Hebrew),
            _ => Err(ParseLanguageError(s.to_string())),
        }
    }
}

/// One grammatical dimension of a parse.
///
/// The set is closed: every ruleset draws its fields from this enum, and the
/// catalog decides which of them a language actually asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum FieldKey {
    Pos = 0,
    Prefix = 1,
    NounType = 2,
    NumeralType = 3,
    PronounType = 4,
    ParticleType = 5,
    State = 6,
    Case = 7,
    Gender = 8,
    Number = 9,
    Person = 10,
    Stem = 11,
    Tense = 12,
    Voice = 13,
    Mood = 14,
    Degree = 15,
    Suffix = 16,
    SuffixPerson = 17,
    SuffixGender = 18,
    SuffixNumber = 19,
}

impl FieldKey {
    pub const ALL: [FieldKey; 20] = [
        FieldKey::Pos,
        FieldKey::Prefix,
        FieldKey::NounType,
        FieldKey::NumeralType,
        FieldKey::PronounType,
        FieldKey::ParticleType,
        FieldKey::State,
        FieldKey::Case,
        FieldKey::Gender,
        FieldKey::Number,
        FieldKey::Person,
        FieldKey::Stem,
        FieldKey::Tense,
        FieldKey::Voice,
        FieldKey::Mood,
        FieldKey::Degree,
        FieldKey::Suffix,
        FieldKey::SuffixPerson,
        FieldKey::SuffixGender,
        FieldKey::SuffixNumber,
    ];

    /// Stable camelCase key, as used by answer maps at the UI boundary.
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKey::Pos => "pos",
            FieldKey::Prefix => "prefix",
            FieldKey::NounType => "nounType",
            FieldKey::NumeralType => "numeralType",
            FieldKey::PronounType => "pronounType",
            FieldKey::ParticleType => "particleType",
            FieldKey::State => "state",
            FieldKey::Case => "case",
            FieldKey::Gender => "gender",
            FieldKey::Number => "number",
            FieldKey::Person => "person",
            FieldKey::Stem => "stem",
            FieldKey::Tense => "tense",
            FieldKey::Voice => "voice",
            FieldKey::Mood => "mood",
            FieldKey::Degree => "degree",
            FieldKey::Suffix => "suffix",
            FieldKey::SuffixPerson => "suffixPerson",
            FieldKey::SuffixGender => "suffixGender",
            FieldKey::SuffixNumber => "suffixNumber",
        }
    }

    /// Fields that admit several simultaneous values.
    pub const fn is_multi(self) -> bool {
        matches!(self, FieldKey::Prefix)
    }

    /// The suffix group: the suffix type and its person/gender/number.
    pub const fn is_suffix_group(self) -> bool {
        matches!(
            self,
            FieldKey::Suffix | FieldKey::SuffixPerson | FieldKey::SuffixGender | FieldKey::SuffixNumber
        )
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldKeyError(pub String);

impl fmt::Display for ParseFieldKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field key: {:?}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseFieldKeyError {}

impl FromStr for FieldKey {
    type Err = ParseFieldKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseFieldKeyError(s.to_string()))
    }
}

bitflags! {
    /// A set of field keys, one bit per `FieldKey` discriminant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct FieldSet: u32 {
        const POS = 1 << 0;
        const PREFIX = 1 << 1;
        const NOUN_TYPE = 1 << 2;
        const NUMERAL_TYPE = 1 << 3;
        const PRONOUN_TYPE = 1 << 4;
        const PARTICLE_TYPE = 1 << 5;
        const STATE = 1 << 6;
        const CASE = 1 << 7;
        const GENDER = 1 << 8;
        const NUMBER = 1 << 9;
        const PERSON = 1 << 10;
        const STEM = 1 << 11;
        const TENSE = 1 << 12;
        const VOICE = 1 << 13;
        const MOOD = 1 << 14;
        const DEGREE = 1 << 15;
        const SUFFIX = 1 << 16;
        const SUFFIX_PERSON = 1 << 17;
        const SUFFIX_GENDER = 1 << 18;
        const SUFFIX_NUMBER = 1 << 19;
    }
}

impl FieldSet {
    pub const fn of(key: FieldKey) -> Self {
        Self::from_bits_truncate(1 << key as u32)
    }

    pub const fn has(self, key: FieldKey) -> bool {
        self.contains(Self::of(key))
    }
}

impl From<FieldKey> for FieldSet {
    fn from(key: FieldKey) -> Self {
        FieldSet::of(key)
    }
}

/// A borrowed field value: single-valued slots and the multi-valued prefix list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    One(&'a str),
    Many(&'a [String]),
}

impl<'a> FieldValue<'a> {
    pub fn as_one(&self) -> Option<&'a str> {
        match self {
            FieldValue::One(v) => Some(*v),
            FieldValue::Many(_) => None,
        }
    }
}
