use drill_protocol::{catalog, FieldKey, Language, ParseFields};

use crate::normalize::{Normalized, Normalizer};
use crate::relevance::Relevance;

/// Outcome for one graded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDetail {
    pub field: FieldKey,
    pub ok: bool,
    pub gold: Normalized,
    /// `None` means not answered yet, which is reported apart from a wrong answer.
    pub guess: Option<Normalized>,
}

impl FieldDetail {
    pub fn is_answered(&self) -> bool {
        self.guess.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreReport {
    pub correct: usize,
    pub total: usize,
    pub details: Vec<FieldDetail>,
}

impl ScoreReport {
    /// `None` when nothing was gradable (0/0), as opposed to all wrong (0/N).
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64)
        }
    }

    pub fn percent(&self) -> Option<u32> {
        self.ratio().map(|r| (r * 100.0).round() as u32)
    }

    pub fn is_gradable(&self) -> bool {
        self.total > 0
    }

    pub fn is_perfect(&self) -> bool {
        self.is_gradable() && self.correct == self.total
    }

    pub fn detail(&self, field: FieldKey) -> Option<&FieldDetail> {
        self.details.iter().find(|d| d.field == field)
    }
}

/// Running totals across several words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreSummary {
    pub correct: usize,
    pub total: usize,
    pub words: usize,
}

impl ScoreSummary {
    pub fn add(&mut self, report: &ScoreReport) {
        self.correct += report.correct;
        self.total += report.total;
        self.words += 1;
    }

    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 / self.total as f64)
        }
    }

    pub fn percent(&self) -> Option<u32> {
        self.ratio().map(|r| (r * 100.0).round() as u32)
    }
}

impl<'a> FromIterator<&'a ScoreReport> for ScoreSummary {
    fn from_iter<I: IntoIterator<Item = &'a ScoreReport>>(iter: I) -> Self {
        let mut summary = ScoreSummary::default();
        for report in iter {
            summary.add(report);
        }
        summary
    }
}

/// Compares answers against gold fields for one language.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    normalizer: Normalizer,
    relevance: Relevance,
}

impl Scorer {
    pub fn new(language: Language) -> Self {
        Self {
            normalizer: Normalizer::new(language),
            relevance: Relevance::new(language),
        }
    }

    pub fn language(&self) -> Language {
        self.normalizer.language()
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn relevance(&self) -> &Relevance {
        &self.relevance
    }

    /// Grades every catalog field the gold parse has a value for.
    pub fn score(&self, gold: Option<&ParseFields>, guess: &ParseFields) -> ScoreReport {
        self.score_filtered(gold, guess, |_| true)
    }

    /// Like [`Scorer::score`], but also skips fields that are not askable for
    /// the gold part of speech in the gold context.
    pub fn score_in_play(&self, gold: Option<&ParseFields>, guess: &ParseFields) -> ScoreReport {
        let Some(gold_fields) = gold else {
            return ScoreReport::default();
        };
        let pos = gold_fields.pos.as_deref();
        self.score_filtered(gold, guess, |key| self.relevance.is_relevant(pos, key, gold_fields))
    }

    fn score_filtered(
        &self,
        gold: Option<&ParseFields>,
        guess: &ParseFields,
        in_play: impl Fn(FieldKey) -> bool,
    ) -> ScoreReport {
        let mut report = ScoreReport::default();
        let Some(gold) = gold else {
            return report;
        };

        for spec in catalog(self.language()) {
            let Some(gold_value) = self.normalizer.field(gold, spec.key) else {
                continue;
            };
            if !in_play(spec.key) {
                continue;
            }
            let guess_value = self.normalizer.field(guess, spec.key);
            let ok = guess_value.as_ref() == Some(&gold_value);

            report.total += 1;
            if ok {
                report.correct += 1;
            }
            report.details.push(FieldDetail {
                field: spec.key,
                ok,
                gold: gold_value,
                guess: guess_value,
            });
        }
        report
    }
}

pub fn score(language: Language, gold: Option<&ParseFields>, guess: &ParseFields) -> ScoreReport {
    Scorer::new(language).score(gold, guess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fields(pairs: &[(FieldKey, &str)]) -> ParseFields {
        pairs
            .iter()
            .fold(ParseFields::new(), |acc, (key, value)| acc.with(*key, *value))
    }

    #[test]
    fn test_noun_gender_mismatch() {
        let gold = fields(&[(FieldKey::Pos, "noun"), (FieldKey::Gender, "feminine")]);
        let guess = fields(&[(FieldKey::Pos, "noun"), (FieldKey::Gender, "masculine")]);

        let report = score(Language::Hebrew, Some(&gold), &guess);
        assert_eq!((report.correct, report.total), (1, 2));
        assert_eq!(
            report.details,
            vec![
                FieldDetail {
                    field: FieldKey::Pos,
                    ok: true,
                    gold: Normalized::One("noun".into()),
                    guess: Some(Normalized::One("noun".into())),
                },
                FieldDetail {
                    field: FieldKey::Gender,
                    ok: false,
                    gold: Normalized::One("feminine".into()),
                    guess: Some(Normalized::One("masculine".into())),
                },
            ]
        );
    }

    #[test]
    fn test_abbreviated_guess_matches() {
        let gold = fields(&[(FieldKey::Pos, "verb"), (FieldKey::Tense, "imperfect (yiqtol)"), (FieldKey::Person, "third")]);
        let guess = fields(&[(FieldKey::Pos, "Verb"), (FieldKey::Tense, "impf"), (FieldKey::Person, "3")]);
        let report = score(Language::Hebrew, Some(&gold), &guess);
        assert!(report.is_perfect());
        assert_eq!(report.percent(), Some(100));
    }

    #[test]
    fn test_unanswered_is_not_answered_but_counts() {
        let gold = fields(&[(FieldKey::Pos, "noun"), (FieldKey::State, "construct")]);
        let guess = fields(&[(FieldKey::Pos, "noun"), (FieldKey::State, "—")]);
        let report = score(Language::Hebrew, Some(&gold), &guess);
        assert_eq!((report.correct, report.total), (1, 2));
        let state = report.detail(FieldKey::State).unwrap();
        assert!(!state.ok);
        assert!(!state.is_answered());
    }

    #[test]
    fn test_blank_gold_is_ungraded() {
        let gold = fields(&[(FieldKey::Pos, "preposition"), (FieldKey::Gender, "—")]);
        let guess = fields(&[(FieldKey::Pos, "preposition"), (FieldKey::Gender, "masculine")]);
        let report = score(Language::Hebrew, Some(&gold), &guess);
        assert_eq!((report.correct, report.total), (1, 1));
        assert!(report.detail(FieldKey::Gender).is_none());
    }

    #[test]
    fn test_details_follow_catalog_order() {
        let gold = fields(&[
            (FieldKey::Number, "singular"),
            (FieldKey::Pos, "verb"),
            (FieldKey::Tense, "aorist"),
            (FieldKey::Person, "third"),
        ]);
        let report = score(Language::Greek, Some(&gold), &ParseFields::new());
        let order: Vec<FieldKey> = report.details.iter().map(|d| d.field).collect();
        assert_eq!(order, vec![FieldKey::Pos, FieldKey::Tense, FieldKey::Person, FieldKey::Number]);
        assert_eq!(report.correct, 0);
        assert_eq!(report.ratio(), Some(0.0));
    }

    #[test]
    fn test_fields_outside_catalog_are_ignored() {
        // Hebrew has no case; Greek has no stem.
        let gold = fields(&[(FieldKey::Pos, "noun"), (FieldKey::Case, "genitive")]);
        assert_eq!(score(Language::Hebrew, Some(&gold), &gold).total, 1);
        let gold = fields(&[(FieldKey::Pos, "verb"), (FieldKey::Stem, "qal")]);
        assert_eq!(score(Language::Greek, Some(&gold), &gold).total, 1);
    }

    #[test]
    fn test_prefix_sets_compare_unordered() {
        let mut gold = fields(&[(FieldKey::Pos, "noun")]);
        gold.set_prefixes(vec!["conjunction ו".into(), "preposition ב".into()]);
        let mut guess = fields(&[(FieldKey::Pos, "noun")]);
        guess.set_prefixes(vec!["ב".into(), "ו".into()]);

        let report = score(Language::Hebrew, Some(&gold), &guess);
        assert!(report.detail(FieldKey::Prefix).unwrap().ok);

        guess.set_prefixes(vec!["ב".into()]);
        let report = score(Language::Hebrew, Some(&gold), &guess);
        assert!(!report.detail(FieldKey::Prefix).unwrap().ok);
    }

    #[test]
    fn test_zero_of_zero_is_distinct() {
        let report = score(Language::Hebrew, None, &fields(&[(FieldKey::Pos, "noun")]));
        assert_eq!(report, ScoreReport::default());
        assert_eq!(report.ratio(), None);
        assert!(!report.is_gradable());
    }

    #[test]
    fn test_score_in_play_skips_irrelevant_gold() {
        // An infinitive code that still carried gender/number.
        let gold = fields(&[
            (FieldKey::Pos, "verb"),
            (FieldKey::Stem, "qal"),
            (FieldKey::Tense, "infinitive construct"),
            (FieldKey::Gender, "masculine"),
            (FieldKey::Number, "singular"),
        ]);
        let scorer = Scorer::new(Language::Hebrew);
        assert_eq!(scorer.score(Some(&gold), &ParseFields::new()).total, 5);
        let report = scorer.score_in_play(Some(&gold), &ParseFields::new());
        assert_eq!(report.total, 3);
        assert!(report.detail(FieldKey::Gender).is_none());
    }

    #[test]
    fn test_summary_sums_reports() {
        let gold = fields(&[(FieldKey::Pos, "noun"), (FieldKey::Gender, "feminine")]);
        let right = score(Language::Hebrew, Some(&gold), &gold);
        let empty = score(Language::Hebrew, None, &gold);
        let summary: ScoreSummary = [right, empty].iter().collect();
        assert_eq!(summary, ScoreSummary { correct: 2, total: 2, words: 2 });
        assert_eq!(summary.percent(), Some(100));
    }

    fn any_fields() -> impl Strategy<Value = ParseFields> {
        let value = || proptest::option::of(prop_oneof![
            Just("noun".to_string()),
            Just("masculine".to_string()),
            Just("—".to_string()),
            Just("".to_string()),
            "[a-z]{1,6}",
        ]);
        (value(), value(), value(), value(), value())
            .prop_map(|(pos, gender, number, state, tense)| ParseFields {
                pos,
                gender,
                number,
                state,
                tense,
                ..ParseFields::default()
            })
    }

    proptest! {
        #[test]
        fn test_absent_gold_grades_nothing(guess in any_fields()) {
            for language in [Language::Greek, Language::Hebrew] {
                prop_assert_eq!(score(language, None, &guess).total, 0);
            }
        }

        #[test]
        fn test_ungraded_fields_never_reported(gold in any_fields(), guess in any_fields()) {
            let scorer = Scorer::new(Language::Hebrew);
            let report = scorer.score(Some(&gold), &guess);
            for detail in &report.details {
                prop_assert!(scorer.normalizer().field(&gold, detail.field).is_some());
            }
            prop_assert_eq!(report.details.len(), report.total);
            prop_assert!(report.correct <= report.total);
        }

        #[test]
        fn test_identical_answers_score_perfectly(gold in any_fields()) {
            let report = score(Language::Hebrew, Some(&gold), &gold);
            prop_assert_eq!(report.correct, report.total);
        }
    }
}
