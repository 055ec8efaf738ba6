use std::collections::BTreeSet;

use crate::models::domain::QuestionType;

/// Comparable form of an answer. Both the player's answer and the stored
/// correct answer go through [`normalize`] before they are compared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NormalizedAnswer {
    Choice(Option<String>),
    Selection(BTreeSet<String>),
    Text(String),
}

impl NormalizedAnswer {
    pub fn tokens(&self) -> Vec<String> {
        match self {
            NormalizedAnswer::Choice(token) => token.iter().cloned().collect(),
            NormalizedAnswer::Selection(tokens) => tokens.iter().cloned().collect(),
            NormalizedAnswer::Text(text) if text.is_empty() => Vec::new(),
            NormalizedAnswer::Text(text) => vec![text.clone()],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            NormalizedAnswer::Choice(token) => token.is_none(),
            NormalizedAnswer::Selection(tokens) => tokens.is_empty(),
            NormalizedAnswer::Text(text) => text.is_empty(),
        }
    }
}

/// Never fails: malformed or missing input normalizes to "no answer".
pub fn normalize(question_type: QuestionType, raw: &[String]) -> NormalizedAnswer {
    match question_type {
        QuestionType::SingleChoice => match raw {
            [token] => NormalizedAnswer::Choice(Some(token.clone())),
            _ => NormalizedAnswer::Choice(None),
        },
        QuestionType::MultiSelect => NormalizedAnswer::Selection(raw.iter().cloned().collect()),
        QuestionType::ShortAnswer => NormalizedAnswer::Text(
            raw.first()
                .map(|text| text.trim().to_lowercase())
                .unwrap_or_default(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn single_choice_keeps_exactly_one_token() {
        assert_eq!(
            normalize(QuestionType::SingleChoice, &raw(&["c"])),
            NormalizedAnswer::Choice(Some("c".to_string()))
        );
    }

    #[test]
    fn single_choice_with_zero_or_many_tokens_is_unanswered() {
        assert_eq!(
            normalize(QuestionType::SingleChoice, &[]),
            NormalizedAnswer::Choice(None)
        );
        assert_eq!(
            normalize(QuestionType::SingleChoice, &raw(&["a", "b"])),
            NormalizedAnswer::Choice(None)
        );
    }

    #[test]
    fn multi_select_discards_order_and_duplicates() {
        let forward = normalize(QuestionType::MultiSelect, &raw(&["a", "b", "d"]));
        let shuffled = normalize(QuestionType::MultiSelect, &raw(&["d", "a", "b", "a"]));

        assert_eq!(forward, shuffled);
        assert_eq!(forward.tokens(), raw(&["a", "b", "d"]));
    }

    #[test]
    fn short_answer_trims_and_lowercases_first_element() {
        assert_eq!(
            normalize(QuestionType::ShortAnswer, &raw(&["  Paris ", "ignored"])),
            NormalizedAnswer::Text("paris".to_string())
        );
    }

    #[test]
    fn short_answer_missing_input_is_empty_text() {
        let answer = normalize(QuestionType::ShortAnswer, &[]);
        assert_eq!(answer, NormalizedAnswer::Text(String::new()));
        assert!(answer.is_empty());
        assert!(answer.tokens().is_empty());
    }
}
