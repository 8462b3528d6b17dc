use rkyv::{Archive, Deserialize, Serialize};
use crate::fields::{FieldKey, FieldValue, Language};
use crate::ids::{VerseId, WordId};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A grammatical analysis: one optional slot per field key.
///
/// The same shape carries gold fields (decoded, canonical) and user guesses
/// (raw, normalized only at comparison time). A missing slot and an explicit
/// `"—"` both count as absent once normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[archive(check_bytes)]
pub struct ParseFields {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub pos: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub prefix: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub noun_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub numeral_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub pronoun_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub particle_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub state: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub case: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub gender: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub number: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub person: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub stem: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub tense: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub voice: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub mood: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub degree: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub suffix: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub suffix_person: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub suffix_gender: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub suffix_number: Option<String>,
}

/// A user's answer for one word. Built field by field; never required to be complete.
pub type DrillAnswer = ParseFields;

impl ParseFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ParseFields::set`].
    pub fn with(mut self, key: FieldKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    fn slot(&self, key: FieldKey) -> Option<&Option<String>> {
        let slot = match key {
            FieldKey::Pos => &self.pos,
            FieldKey::Prefix => return None,
            FieldKey::NounType => &self.noun_type,
            FieldKey::NumeralType => &self.numeral_type,
            FieldKey::PronounType => &self.pronoun_type,
            FieldKey::ParticleType => &self.particle_type,
            FieldKey::State => &self.state,
            FieldKey::Case => &self.case,
            FieldKey::Gender => &self.gender,
            FieldKey::Number => &self.number,
            FieldKey::Person => &self.person,
            FieldKey::Stem => &self.stem,
            FieldKey::Tense => &self.tense,
            FieldKey::Voice => &self.voice,
            FieldKey::Mood => &self.mood,
            FieldKey::Degree => &self.degree,
            FieldKey::Suffix => &self.suffix,
            FieldKey::SuffixPerson => &self.suffix_person,
            FieldKey::SuffixGender => &self.suffix_gender,
            FieldKey::SuffixNumber => &self.suffix_number,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, key: FieldKey) -> Option<&mut Option<String>> {
        let slot = match key {
            FieldKey::Pos => &mut self.pos,
            FieldKey::Prefix => return None,
            FieldKey::NounType => &mut self.noun_type,
            FieldKey::NumeralType => &mut self.numeral_type,
            FieldKey::PronounType => &mut self.pronoun_type,
            FieldKey::ParticleType => &mut self.particle_type,
            FieldKey::State => &mut self.state,
            FieldKey::Case => &mut self.case,
            FieldKey::Gender => &mut self.gender,
            FieldKey::Number => &mut self.number,
            FieldKey::Person => &mut self.person,
            FieldKey::Stem => &mut self.stem,
            FieldKey::Tense => &mut self.tense,
            FieldKey::Voice => &mut self.voice,
            FieldKey::Mood => &mut self.mood,
            FieldKey::Degree => &mut self.degree,
            FieldKey::Suffix => &mut self.suffix,
            FieldKey::SuffixPerson => &mut self.suffix_person,
            FieldKey::SuffixGender => &mut self.suffix_gender,
            FieldKey::SuffixNumber => &mut self.suffix_number,
        };
        Some(slot)
    }

    /// Raw value of a field, as stored. An empty prefix list reads as absent.
    pub fn get(&self, key: FieldKey) -> Option<FieldValue<'_>> {
        match self.slot(key) {
            Some(slot) => slot.as_deref().map(FieldValue::One),
            None if self.prefix.is_empty() => None,
            None => Some(FieldValue::Many(&self.prefix)),
        }
    }

    /// Single-valued read; always `None` for the prefix list.
    pub fn scalar(&self, key: FieldKey) -> Option<&str> {
        self.slot(key).and_then(|slot| slot.as_deref())
    }

    /// Sets a single-valued field, or appends to the prefix list.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        match self.slot_mut(key) {
            Some(slot) => *slot = Some(value.into()),
            None => self.prefix.push(value.into()),
        }
    }

    pub fn set_prefixes(&mut self, values: Vec<String>) {
        self.prefix = values;
    }

    pub fn clear(&mut self, key: FieldKey) {
        match self.slot_mut(key) {
            Some(slot) => *slot = None,
            None => self.prefix.clear(),
        }
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        FieldKey::ALL.iter().all(|key| !self.contains(*key))
    }

    /// Keys carrying a value, in `FieldKey` order.
    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        FieldKey::ALL.iter().copied().filter(move |key| self.contains(*key))
    }

    /// Copies every field `other` has and `self` lacks; prefixes are appended.
    pub fn fill_from(&mut self, other: &ParseFields) {
        for key in other.keys() {
            match other.get(key) {
                Some(FieldValue::One(value)) => {
                    if self.scalar(key).is_none() {
                        self.set(key, value);
                    }
                }
                Some(FieldValue::Many(values)) => {
                    self.prefix.extend(values.iter().cloned());
                }
                None => {}
            }
        }
    }
}

/// One drillable word, or one segment of a compound word.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[archive(check_bytes)]
pub struct Word {
    pub id: WordId,
    pub surface: String,
    pub lemma: Option<String>,
    /// Gold fields, decoded once at load time.
    pub parse: Option<ParseFields>,
    /// False for the continuation segments of a compound word.
    pub after_space: bool,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Verse {
    pub reference: String,
    pub language: Language,
    pub words: Vec<Word>,
}

impl Verse {
    /// The verse as displayed: compound segments are joined without a space.
    pub fn surface_line(&self) -> String {
        let mut line = String::new();
        for word in &self.words {
            if word.after_space && !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word.surface);
        }
        line
    }
}

/// Layout version written by the verse compiler.
pub const PACK_VERSION: u32 = 1;

/// A compiled, decoded set of verses for one language.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct VersePack {
    pub version: u32,
    pub language: Language,
    pub verses: Vec<Verse>,
}

impl VersePack {
    pub fn position(&self, reference: &str) -> Option<VerseId> {
        self.verses
            .iter()
            .position(|v| v.reference == reference)
            .map(VerseId::from_index)
    }

    pub fn verse(&self, id: VerseId) -> Option<&Verse> {
        self.verses.get(id.index())
    }
}
