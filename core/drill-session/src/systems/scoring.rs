use drill_morph::{ScoreReport, ScoreSummary, Scorer};
use drill_protocol::WordId;
use hecs::{Entity, World};

use crate::components::{Answer, Gold, Selected, WordData};

#[derive(Debug, Clone, PartialEq)]
pub struct WordScore {
    pub id: WordId,
    pub report: ScoreReport,
}

/// Scores one word. A word without gold fields grades nothing (0/0).
pub fn score_word(world: &World, entity: Entity, scorer: &Scorer) -> Option<ScoreReport> {
    let answer = world.get::<&Answer>(entity).ok()?;
    let gold = world.get::<&Gold>(entity).ok();
    Some(scorer.score(gold.as_ref().map(|g| &g.fields), &answer.fields))
}

/// Scores every selected word, in word-id (verse) order.
pub fn score_selected(world: &World, scorer: &Scorer) -> Vec<WordScore> {
    let mut scores: Vec<WordScore> = world
        .query::<(&WordData, &Answer, Option<&Gold>)>()
        .with::<&Selected>()
        .iter()
        .map(|(_entity, (word, answer, gold))| WordScore {
            id: word.id,
            report: scorer.score(gold.map(|g| &g.fields), &answer.fields),
        })
        .collect();
    scores.sort_by_key(|s| s.id);
    scores
}

pub fn summarize(scores: &[WordScore]) -> ScoreSummary {
    scores.iter().map(|s| &s.report).collect()
}

/// True once any word has a non-empty answer.
pub fn has_answers(world: &World) -> bool {
    world
        .query::<&Answer>()
        .iter()
        .any(|(_entity, answer)| !answer.fields.is_empty())
}
