pub mod components;
pub mod systems;

use std::collections::HashMap;

use drill_morph::{field_status, visible_suffix_fields, FieldStatus, ScoreReport, ScoreSummary, Scorer};
use drill_protocol::{DrillAnswer, FieldKey, Language, ParseFields, Verse, WordId};
use hecs::{Entity, EntityBuilder, World};
use thiserror::Error;

use components::{Answer, Gold, Selected, WordData};
use systems::scoring::{has_answers, score_selected, score_word, summarize, WordScore};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no word with id {0} in the loaded verse")]
    UnknownWord(WordId),
    #[error("verse is {found}, session is {expected}")]
    LanguageMismatch { expected: Language, found: Language },
}

/// One verse being drilled: its words, their gold fields, the user's answers
/// and which words are selected for the summary.
pub struct DrillSession {
    world: World,
    language: Language,
    reference: Option<String>,
    words: HashMap<WordId, Entity>,
    scorer: Scorer,
}

impl DrillSession {
    pub fn new(language: Language) -> Self {
        Self {
            world: World::new(),
            language,
            reference: None,
            words: HashMap::new(),
            scorer: Scorer::new(language),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Replaces the current verse. Answers start empty and every word is selected.
    pub fn load_verse(&mut self, verse: Verse) -> Result<(), SessionError> {
        if verse.language != self.language {
            return Err(SessionError::LanguageMismatch {
                expected: self.language,
                found: verse.language,
            });
        }

        self.world.clear();
        self.words.clear();

        for word in verse.words {
            let mut builder = EntityBuilder::new();
            builder
                .add(WordData {
                    id: word.id,
                    surface: word.surface,
                    lemma: word.lemma,
                    after_space: word.after_space,
                })
                .add(Answer::default())
                .add(Selected);
            if let Some(fields) = word.parse {
                builder.add(Gold { fields });
            }
            let entity = self.world.spawn(builder.build());
            self.words.insert(word.id, entity);
        }

        log::info!("loaded {} ({} words)", verse.reference, self.words.len());
        self.reference = Some(verse.reference);
        Ok(())
    }

    fn entity(&self, id: WordId) -> Result<Entity, SessionError> {
        match self.words.get(&id) {
            Some(entity) => Ok(*entity),
            None => {
                log::debug!("unknown word id {}", id);
                Err(SessionError::UnknownWord(id))
            }
        }
    }

    /// Word ids in verse order.
    pub fn word_ids(&self) -> Vec<WordId> {
        let mut ids: Vec<WordId> = self.words.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn word(&self, id: WordId) -> Result<WordData, SessionError> {
        let entity = self.entity(id)?;
        self.world
            .get::<&WordData>(entity)
            .map(|w| (*w).clone())
            .map_err(|_| SessionError::UnknownWord(id))
    }

    pub fn gold(&self, id: WordId) -> Result<Option<ParseFields>, SessionError> {
        let entity = self.entity(id)?;
        Ok(self.world.get::<&Gold>(entity).ok().map(|g| g.fields.clone()))
    }

    pub fn answer(&self, id: WordId) -> Result<DrillAnswer, SessionError> {
        let entity = self.entity(id)?;
        self.world
            .get::<&Answer>(entity)
            .map(|a| a.fields.clone())
            .map_err(|_| SessionError::UnknownWord(id))
    }

    fn with_answer(&mut self, id: WordId, edit: impl FnOnce(&mut DrillAnswer)) -> Result<(), SessionError> {
        let entity = self.entity(id)?;
        let mut answer = self
            .world
            .get::<&mut Answer>(entity)
            .map_err(|_| SessionError::UnknownWord(id))?;
        edit(&mut answer.fields);
        Ok(())
    }

    /// Records a raw answer value. For `prefix` the value is added to the set.
    pub fn set_answer(&mut self, id: WordId, key: FieldKey, raw: impl Into<String>) -> Result<(), SessionError> {
        let raw = raw.into();
        self.with_answer(id, |answer| answer.set(key, raw))
    }

    pub fn set_prefixes(&mut self, id: WordId, values: Vec<String>) -> Result<(), SessionError> {
        self.with_answer(id, |answer| answer.set_prefixes(values))
    }

    pub fn clear_answer(&mut self, id: WordId) -> Result<(), SessionError> {
        self.with_answer(id, |answer| *answer = DrillAnswer::new())
    }

    /// Flips selection; returns whether the word is now selected.
    pub fn toggle_selected(&mut self, id: WordId) -> Result<bool, SessionError> {
        let entity = self.entity(id)?;
        if self.world.remove_one::<Selected>(entity).is_ok() {
            return Ok(false);
        }
        self.world
            .insert_one(entity, Selected)
            .map_err(|_| SessionError::UnknownWord(id))?;
        Ok(true)
    }

    pub fn is_selected(&self, id: WordId) -> Result<bool, SessionError> {
        let entity = self.entity(id)?;
        Ok(self.world.get::<&Selected>(entity).is_ok())
    }

    pub fn report(&self, id: WordId) -> Result<ScoreReport, SessionError> {
        let entity = self.entity(id)?;
        score_word(&self.world, entity, &self.scorer).ok_or(SessionError::UnknownWord(id))
    }

    /// Per-word reports for the selected words, in verse order.
    pub fn reports(&self) -> Vec<WordScore> {
        score_selected(&self.world, &self.scorer)
    }

    pub fn summary(&self) -> ScoreSummary {
        summarize(&self.reports())
    }

    pub fn has_answers(&self) -> bool {
        has_answers(&self.world)
    }

    /// Relevance of `key` when the user has picked `pos`, judged against the
    /// word's gold context (suffix, prefixes).
    pub fn is_relevant(&self, id: WordId, pos: Option<&str>, key: FieldKey) -> Result<bool, SessionError> {
        let context = self.gold(id)?.unwrap_or_default();
        Ok(self.scorer.relevance().is_relevant(pos, key, &context))
    }

    pub fn field_status(&self, id: WordId, key: FieldKey) -> Result<FieldStatus, SessionError> {
        let gold = self.gold(id)?.unwrap_or_default();
        let answer = self.answer(id)?;
        Ok(field_status(self.language, &gold, &answer, key))
    }

    pub fn visible_suffix_fields(&self, id: WordId) -> Result<Vec<FieldKey>, SessionError> {
        let gold = self.gold(id)?.unwrap_or_default();
        let answer = self.answer(id)?;
        Ok(visible_suffix_fields(self.language, &gold, &answer))
    }
}
