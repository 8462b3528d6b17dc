//! Live per-field feedback while an answer is still being entered.

use drill_protocol::{catalog, FieldKey, Language, ParseFields};

use crate::normalize::{Normalized, Normalizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Correct,
    Incorrect,
    /// Nothing to judge yet: no answer, no gold value, or a partial prefix set.
    Neutral,
}

pub fn field_status(language: Language, gold: &ParseFields, guess: &ParseFields, key: FieldKey) -> FieldStatus {
    let normalizer = Normalizer::new(language);
    let (Some(gold), Some(guess)) = (normalizer.field(gold, key), normalizer.field(guess, key)) else {
        return FieldStatus::Neutral;
    };

    match (gold, guess) {
        (Normalized::Many(gold), Normalized::Many(guess)) => {
            if guess.iter().any(|g| !gold.contains(g)) {
                FieldStatus::Incorrect
            } else if guess.len() == gold.len() {
                FieldStatus::Correct
            } else {
                FieldStatus::Neutral
            }
        }
        (gold, guess) if gold == guess => FieldStatus::Correct,
        _ => FieldStatus::Incorrect,
    }
}

/// Suffix controls to display: the suffix type whenever gold has a suffix,
/// and its person/gender/number only once the type has been answered correctly.
pub fn visible_suffix_fields(language: Language, gold: &ParseFields, guess: &ParseFields) -> Vec<FieldKey> {
    let normalizer = Normalizer::new(language);
    let Some(gold_suffix) = normalizer.scalar(gold, FieldKey::Suffix) else {
        return Vec::new();
    };
    let suffix_correct = normalizer.scalar(guess, FieldKey::Suffix).as_deref() == Some(gold_suffix.as_str());

    catalog(language)
        .iter()
        .map(|spec| spec.key)
        .filter(|key| key.is_suffix_group())
        .filter(|key| {
            *key == FieldKey::Suffix || (suffix_correct && normalizer.field(gold, *key).is_some())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_status() {
        let gold = ParseFields::new().with(FieldKey::Gender, "feminine");
        let lang = Language::Hebrew;

        assert_eq!(field_status(lang, &gold, &ParseFields::new(), FieldKey::Gender), FieldStatus::Neutral);
        assert_eq!(
            field_status(lang, &gold, &ParseFields::new().with(FieldKey::Gender, "fem"), FieldKey::Gender),
            FieldStatus::Correct
        );
        assert_eq!(
            field_status(lang, &gold, &ParseFields::new().with(FieldKey::Gender, "common"), FieldKey::Gender),
            FieldStatus::Incorrect
        );
        // No gold value: never judged.
        assert_eq!(
            field_status(lang, &gold, &ParseFields::new().with(FieldKey::State, "absolute"), FieldKey::State),
            FieldStatus::Neutral
        );
    }

    #[test]
    fn test_prefix_status() {
        let mut gold = ParseFields::new();
        gold.set_prefixes(vec!["conjunction ו".into(), "article ה".into()]);
        let status = |picked: &[&str]| {
            let mut guess = ParseFields::new();
            guess.set_prefixes(picked.iter().map(|p| p.to_string()).collect());
            field_status(Language::Hebrew, &gold, &guess, FieldKey::Prefix)
        };

        assert_eq!(status(&[]), FieldStatus::Neutral);
        assert_eq!(status(&["ו"]), FieldStatus::Neutral);
        assert_eq!(status(&["article ה", "conjunction ו"]), FieldStatus::Correct);
        assert_eq!(status(&["conjunction ו", "preposition ב"]), FieldStatus::Incorrect);
    }

    #[test]
    fn test_suffix_fields_unlock_after_correct_type() {
        let lang = Language::Hebrew;
        let gold = ParseFields::new()
            .with(FieldKey::Suffix, "pronominal suffix")
            .with(FieldKey::SuffixPerson, "third")
            .with(FieldKey::SuffixGender, "masculine")
            .with(FieldKey::SuffixNumber, "singular");

        assert_eq!(visible_suffix_fields(lang, &gold, &ParseFields::new()), vec![FieldKey::Suffix]);

        let wrong = ParseFields::new().with(FieldKey::Suffix, "directional he");
        assert_eq!(visible_suffix_fields(lang, &gold, &wrong), vec![FieldKey::Suffix]);

        let right = ParseFields::new().with(FieldKey::Suffix, "Pronominal Suffix");
        assert_eq!(
            visible_suffix_fields(lang, &gold, &right),
            vec![FieldKey::Suffix, FieldKey::SuffixPerson, FieldKey::SuffixGender, FieldKey::SuffixNumber]
        );

        assert!(visible_suffix_fields(lang, &ParseFields::new(), &right).is_empty());
    }
}
