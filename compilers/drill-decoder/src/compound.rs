//! Compound words: one orthographic unit whose code carries several
//! `/`-separated segments (attached preposition, article, conjunction, suffix).

use std::str::FromStr;

use drill_protocol::{FieldKey, Language, ParseFields, Verse, Word, WordId};
use thiserror::Error;

use crate::code::{classify_segment, Segment};
use crate::decoder;
use crate::hebrew::prefix_meaning;

pub const SEPARATOR: char = '/';

/// How a multi-segment code becomes drillable words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompoundMode {
    /// One word per segment; only the first is preceded by a space.
    #[default]
    Split,
    /// Prefix and suffix segments folded into the main segment's fields.
    Fold,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown compound mode {0:?} (expected split or fold)")]
pub struct ParseCompoundModeError(pub String);

impl FromStr for CompoundMode {
    type Err = ParseCompoundModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(CompoundMode::Split),
            "fold" => Ok(CompoundMode::Fold),
            _ => Err(ParseCompoundModeError(s.to_string())),
        }
    }
}

/// A decoded word before it has been given an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPart {
    pub surface: String,
    pub lemma: Option<String>,
    pub parse: ParseFields,
    pub after_space: bool,
}

enum Role {
    Prefix(Option<&'static str>),
    Suffix,
    Main,
}

/// Prefix lemmas look like `Hb`: a single letter, not a lexicon number.
fn prefix_lemma(lemma: &str) -> Option<char> {
    let mut chars = lemma.strip_prefix('H')?.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_lowercase() => Some(letter),
        _ => None,
    }
}

fn role(code: &str, lemma: Option<&str>) -> Role {
    match classify_segment(code) {
        Segment::Prefix(letter) => Role::Prefix(prefix_meaning(letter)),
        Segment::Suffix(_) => Role::Suffix,
        Segment::Word(_) => match lemma.and_then(prefix_lemma) {
            Some(letter) => Role::Prefix(prefix_meaning(letter)),
            None => Role::Main,
        },
    }
}

fn fold(parts: &[WordPart], codes: &[&str], lemmas: Option<&[&str]>) -> Option<WordPart> {
    let mut prefixes = Vec::new();
    let mut suffix = ParseFields::new();
    let mut main: Option<&WordPart> = None;

    for (idx, part) in parts.iter().enumerate() {
        let lemma = lemmas.and_then(|l| l.get(idx).copied());
        match role(codes[idx], lemma) {
            Role::Prefix(Some(meaning)) => prefixes.push(meaning),
            Role::Prefix(None) => log::debug!("prefix segment {:?} has no known meaning", codes[idx]),
            Role::Suffix => suffix.fill_from(&part.parse),
            Role::Main => {
                if main.replace(part).is_some() {
                    return None;
                }
            }
        }
    }

    let main = main?;
    let mut parse = ParseFields::new();
    for meaning in prefixes {
        parse.set(FieldKey::Prefix, meaning);
    }
    parse.fill_from(&main.parse);
    parse.fill_from(&suffix);

    Some(WordPart {
        surface: parts.iter().map(|p| p.surface.as_str()).collect(),
        lemma: main.lemma.clone(),
        parse,
        after_space: true,
    })
}

/// Decodes one source row into drillable words.
///
/// Surface, lemma and code must split into the same number of parts for the
/// row to be segmented; a missing lemma never blocks segmentation. Otherwise
/// the whole code is decoded as a single word.
pub fn segment(
    language: Language,
    surface: &str,
    lemma: Option<&str>,
    code: &str,
    mode: CompoundMode,
) -> Vec<WordPart> {
    let decoder = decoder(language);
    let codes: Vec<&str> = code.split(SEPARATOR).collect();
    let surfaces: Vec<&str> = surface.split(SEPARATOR).collect();
    let lemmas: Option<Vec<&str>> = lemma.map(|l| l.split(SEPARATOR).collect());

    let aligned = surfaces.len() == codes.len() && lemmas.as_ref().map_or(true, |l| l.len() == codes.len());
    if !aligned {
        log::debug!(
            "compound part counts differ for {:?} / {:?} / {:?}; decoding as one word",
            surface,
            lemma,
            code
        );
        return vec![WordPart {
            surface: surface.replace(SEPARATOR, ""),
            lemma: lemma.map(String::from),
            parse: decoder.decode(code),
            after_space: true,
        }];
    }

    let parts: Vec<WordPart> = codes
        .iter()
        .enumerate()
        .map(|(idx, part_code)| WordPart {
            surface: surfaces[idx].to_string(),
            lemma: lemmas.as_ref().map(|l| l[idx].to_string()),
            parse: decoder.decode(part_code),
            after_space: idx == 0,
        })
        .collect();

    if mode == CompoundMode::Fold && parts.len() > 1 {
        if let Some(folded) = fold(&parts, &codes, lemmas.as_deref()) {
            return vec![folded];
        }
        log::debug!("cannot fold {:?}: needs exactly one main segment", code);
    }
    parts
}

/// Accumulates source rows into a [`Verse`] with sequential word ids.
#[derive(Debug, Clone)]
pub struct VerseBuilder {
    reference: String,
    language: Language,
    mode: CompoundMode,
    words: Vec<Word>,
}

impl VerseBuilder {
    pub fn new(reference: impl Into<String>, language: Language) -> Self {
        Self {
            reference: reference.into(),
            language,
            mode: CompoundMode::default(),
            words: Vec::new(),
        }
    }

    pub fn mode(mut self, mode: CompoundMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn push(&mut self, surface: &str, lemma: Option<&str>, code: &str) -> &mut Self {
        for part in segment(self.language, surface, lemma, code, self.mode) {
            let id = WordId::from_index(self.words.len());
            self.words.push(Word {
                id,
                surface: part.surface,
                lemma: part.lemma,
                parse: (!part.parse.is_empty()).then_some(part.parse),
                after_space: part.after_space,
            });
        }
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn build(self) -> Verse {
        Verse {
            reference: self.reference,
            language: self.language,
            words: self.words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_compound() {
        let parts = segment(Language::Hebrew, "A/B", Some("L1/L2"), "C1/C2", CompoundMode::Split);
        assert_eq!(parts.len(), 2);
        assert!(parts[0].after_space);
        assert!(!parts[1].after_space);
        assert_eq!(parts[0].surface, "A");
        assert_eq!(parts[1].lemma.as_deref(), Some("L2"));
        assert_eq!(parts[0].parse, decoder(Language::Hebrew).decode("C1"));
    }

    #[test]
    fn test_split_decodes_each_part() {
        let parts = segment(Language::Hebrew, "בְּ/רֵאשִׁית", Some("Hb/H7225"), "R/Ncfsa", CompoundMode::Split);
        assert_eq!(parts[0].parse.pos.as_deref(), Some("preposition"));
        assert_eq!(parts[1].parse.state.as_deref(), Some("absolute"));
    }

    #[test]
    fn test_mismatched_parts_decode_whole_code() {
        let parts = segment(Language::Hebrew, "הַ/שָּׁמַיִם", Some("H8064"), "Ncmpa", CompoundMode::Split);
        assert_eq!(parts.len(), 1);
        assert!(parts[0].after_space);
        assert_eq!(parts[0].surface, "הַשָּׁמַיִם");
        assert_eq!(parts[0].parse.pos.as_deref(), Some("noun"));
    }

    #[test]
    fn test_missing_lemma_still_segments() {
        let parts = segment(Language::Hebrew, "וְ/אֵת", None, "C/To", CompoundMode::Split);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].parse.particle_type.as_deref(), Some("direct object marker"));
    }

    #[test]
    fn test_fold_prefix_lemmas_and_suffix() {
        let parts = segment(
            Language::Hebrew,
            "וְ/הַ/שָּׁמַיִם",
            Some("Hc/Hd/H8064"),
            "C/Td/Ncmpa",
            CompoundMode::Fold,
        );
        assert_eq!(parts.len(), 1);
        let word = &parts[0];
        assert_eq!(word.surface, "וְהַשָּׁמַיִם");
        assert_eq!(word.lemma.as_deref(), Some("H8064"));
        assert_eq!(word.parse.pos.as_deref(), Some("noun"));
        assert_eq!(word.parse.prefix, vec!["conjunction ו".to_string(), "article ה".to_string()]);

        let parts = segment(Language::Hebrew, "לְ/מִינ/וֹ", None, "Hl/Ncmsc/Sp3ms", CompoundMode::Fold);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].parse.prefix, vec!["preposition ל".to_string()]);
        assert_eq!(parts[0].parse.state.as_deref(), Some("construct"));
        assert_eq!(parts[0].parse.suffix.as_deref(), Some("pronominal suffix"));
        assert_eq!(parts[0].parse.suffix_person.as_deref(), Some("third"));
    }

    #[test]
    fn test_fold_falls_back_to_split() {
        let parts = segment(Language::Hebrew, "A/B", Some("H1/H2"), "Ncmsa/Vqp3ms", CompoundMode::Fold);
        assert_eq!(parts.len(), 2);
        assert!(!parts[1].after_space);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Fold".parse::<CompoundMode>(), Ok(CompoundMode::Fold));
        assert_eq!("split".parse::<CompoundMode>(), Ok(CompoundMode::Split));
        assert!("merge".parse::<CompoundMode>().is_err());
    }

    #[test]
    fn test_verse_builder_assigns_sequential_ids() {
        let mut builder = VerseBuilder::new("Genesis 1:1", Language::Hebrew);
        builder
            .push("בְּ/רֵאשִׁית", Some("Hb/H7225"), "R/Ncfsa")
            .push("בָּרָא", Some("H1254"), "Vqp3ms")
            .push("?", None, "");
        assert_eq!(builder.len(), 4);

        let verse = builder.build();
        let ids: Vec<u32> = verse.words.iter().map(|w| w.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(verse.surface_line(), "בְּרֵאשִׁית בָּרָא ?");
        assert_eq!(verse.words[2].parse.as_ref().and_then(|p| p.stem.as_deref()), Some("qal"));
        // An undecodable code leaves the word without gold fields.
        assert_eq!(verse.words[3].parse, None);
    }

    #[test]
    fn test_verse_builder_fold_mode() {
        let mut builder = VerseBuilder::new("Genesis 1:1", Language::Hebrew).mode(CompoundMode::Fold);
        builder.push("בְּ/רֵאשִׁית", Some("Hb/H7225"), "R/Ncfsa");
        let verse = builder.build();
        assert_eq!(verse.words.len(), 1);
        assert_eq!(
            verse.words[0].parse.as_ref().map(|p| p.prefix.clone()),
            Some(vec!["preposition ב".to_string()])
        );
    }
}
