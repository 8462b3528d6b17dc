use drill_protocol::{catalog, field_spec, FieldKey, FieldSet, Language, ParseFields};

use crate::normalize::Normalizer;

/// Suffix type whose person/gender/number are askable.
pub const PRONOMINAL_SUFFIX: &str = "pronominal suffix";

/// Base relevant fields per canonical part of speech. The part of speech
/// itself is always relevant and is not listed.
const GREEK_BASE: &[(&str, FieldSet)] = &[
    ("noun", FieldSet::CASE.union(FieldSet::NUMBER).union(FieldSet::GENDER)),
    ("article", FieldSet::CASE.union(FieldSet::NUMBER).union(FieldSet::GENDER)),
    (
        "adjective",
        FieldSet::CASE.union(FieldSet::NUMBER).union(FieldSet::GENDER).union(FieldSet::DEGREE),
    ),
    (
        "pronoun",
        FieldSet::PRONOUN_TYPE
            .union(FieldSet::PERSON)
            .union(FieldSet::CASE)
            .union(FieldSet::NUMBER)
            .union(FieldSet::GENDER),
    ),
    (
        "verb",
        FieldSet::TENSE
            .union(FieldSet::VOICE)
            .union(FieldSet::MOOD)
            .union(FieldSet::PERSON)
            .union(FieldSet::NUMBER),
    ),
    ("preposition", FieldSet::empty()),
    ("conjunction", FieldSet::empty()),
    ("adverb", FieldSet::empty()),
    ("particle", FieldSet::empty()),
    ("interjection", FieldSet::empty()),
];

const HEBREW_BASE: &[(&str, FieldSet)] = &[
    (
        "noun",
        FieldSet::NOUN_TYPE.union(FieldSet::STATE).union(FieldSet::GENDER).union(FieldSet::NUMBER),
    ),
    (
        "verb",
        FieldSet::STEM
            .union(FieldSet::TENSE)
            .union(FieldSet::PERSON)
            .union(FieldSet::GENDER)
            .union(FieldSet::NUMBER),
    ),
    ("adjective", FieldSet::STATE.union(FieldSet::GENDER).union(FieldSet::NUMBER)),
    (
        "numeral",
        FieldSet::NUMERAL_TYPE.union(FieldSet::STATE).union(FieldSet::GENDER).union(FieldSet::NUMBER),
    ),
    (
        "pronoun",
        FieldSet::PRONOUN_TYPE.union(FieldSet::PERSON).union(FieldSet::GENDER).union(FieldSet::NUMBER),
    ),
    ("particle", FieldSet::PARTICLE_TYPE),
    ("preposition", FieldSet::empty()),
    ("conjunction", FieldSet::empty()),
    ("adverb", FieldSet::empty()),
    ("interjection", FieldSet::empty()),
];

/// A context-dependent adjustment layered over a base set.
struct Override {
    pos: &'static str,
    trigger: FieldKey,
    values: &'static [&'static str],
    remove: FieldSet,
    add: FieldSet,
}

const GREEK_OVERRIDES: &[Override] = &[
    Override {
        pos: "verb",
        trigger: FieldKey::Mood,
        values: &["infinitive"],
        remove: FieldSet::PERSON.union(FieldSet::NUMBER),
        add: FieldSet::empty(),
    },
    Override {
        pos: "verb",
        trigger: FieldKey::Mood,
        values: &["participle"],
        remove: FieldSet::PERSON,
        add: FieldSet::CASE.union(FieldSet::GENDER),
    },
];

// Infinitives drop gender and number as well as person.
const HEBREW_OVERRIDES: &[Override] = &[
    Override {
        pos: "verb",
        trigger: FieldKey::Tense,
        values: &["infinitive absolute", "infinitive construct"],
        remove: FieldSet::PERSON.union(FieldSet::GENDER).union(FieldSet::NUMBER),
        add: FieldSet::empty(),
    },
    Override {
        pos: "verb",
        trigger: FieldKey::Tense,
        values: &["participle active", "participle passive"],
        remove: FieldSet::PERSON,
        add: FieldSet::STATE,
    },
];

/// Decides which fields are askable for a part of speech in a given context.
///
/// Pure: the answer depends only on the arguments, so it is safe to call on
/// every render.
#[derive(Debug, Clone, Copy)]
pub struct Relevance {
    normalizer: Normalizer,
}

impl Relevance {
    pub fn new(language: Language) -> Self {
        Self { normalizer: Normalizer::new(language) }
    }

    pub fn language(&self) -> Language {
        self.normalizer.language()
    }

    fn base(&self) -> &'static [(&'static str, FieldSet)] {
        match self.language() {
            Language::Greek => GREEK_BASE,
            Language::Hebrew => HEBREW_BASE,
        }
    }

    fn overrides(&self) -> &'static [Override] {
        match self.language() {
            Language::Greek => GREEK_OVERRIDES,
            Language::Hebrew => HEBREW_OVERRIDES,
        }
    }

    /// Fields relevant for a canonical part of speech after context overrides,
    /// or `None` when the part of speech has no table entry.
    pub fn field_set(&self, pos: &str, context: &ParseFields) -> Option<FieldSet> {
        let (_, base) = self.base().iter().find(|(name, _)| *name == pos)?;
        let mut set = *base;
        for rule in self.overrides().iter().filter(|rule| rule.pos == pos) {
            let triggered = self
                .normalizer
                .scalar(context, rule.trigger)
                .map_or(false, |value| rule.values.contains(&value.as_str()));
            if triggered {
                set.remove(rule.remove);
                set.insert(rule.add);
            }
        }
        Some(set | FieldSet::POS)
    }

    pub fn is_relevant(&self, pos: Option<&str>, field: FieldKey, context: &ParseFields) -> bool {
        if field_spec(self.language(), field).is_none() {
            log::debug!("{} is not a {} catalog field; treating it as relevant", field, self.language());
            return true;
        }
        // Gated on gold context, whatever part of speech is guessed.
        if field.is_suffix_group() {
            return match self.normalizer.scalar(context, FieldKey::Suffix) {
                None => false,
                Some(_) if field == FieldKey::Suffix => true,
                Some(kind) => kind == PRONOMINAL_SUFFIX,
            };
        }
        if field == FieldKey::Prefix {
            return self.normalizer.normalize_set(&context.prefix).is_some();
        }
        if field == FieldKey::Pos {
            return true;
        }

        let Some(pos) = pos.and_then(|raw| self.normalizer.normalize(raw)) else {
            return true;
        };
        match self.field_set(&pos, context) {
            Some(set) => set.has(field),
            None => {
                log::debug!(
                    "no {} relevance entry for part of speech {:?}; showing {}",
                    self.language(),
                    pos,
                    field
                );
                true
            }
        }
    }

    /// Every relevant catalog field, in catalog order.
    pub fn relevant_fields(&self, pos: Option<&str>, context: &ParseFields) -> Vec<FieldKey> {
        catalog(self.language())
            .iter()
            .map(|spec| spec.key)
            .filter(|key| self.is_relevant(pos, *key, context))
            .collect()
    }
}

pub fn is_relevant(language: Language, pos: Option<&str>, field: FieldKey, context: &ParseFields) -> bool {
    Relevance::new(language).is_relevant(pos, field, context)
}

pub fn relevant_fields(language: Language, pos: Option<&str>, context: &ParseFields) -> Vec<FieldKey> {
    Relevance::new(language).relevant_fields(pos, context)
}
