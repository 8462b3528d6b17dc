use drill_protocol::{DrillAnswer, ParseFields, WordId};

/// Display data for one word (source of truth for its position in the verse).
#[derive(Debug, Clone)]
pub struct WordData {
    pub id: WordId,
    pub surface: String,
    pub lemma: Option<String>,
    pub after_space: bool,
}

/// Decoded gold fields. Words whose code could not be decoded have none.
#[derive(Debug, Clone)]
pub struct Gold {
    pub fields: ParseFields,
}

/// The user's answer so far, raw as entered.
#[derive(Debug, Clone, Default)]
pub struct Answer {
    pub fields: DrillAnswer,
}

/// Marker: the word counts toward the verse summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected;
