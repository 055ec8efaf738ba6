use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::domain::Question;
use crate::models::dto::response::PublicQuestion;

/// Presents the questions in a fresh uniformly random order with answers
/// stripped. `SliceRandom::shuffle` is a Fisher-Yates shuffle, so every
/// permutation is equally likely.
pub fn shuffle_questions<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<PublicQuestion> {
    let mut presented: Vec<PublicQuestion> = questions.iter().map(PublicQuestion::from).collect();
    presented.shuffle(rng);
    presented
}
