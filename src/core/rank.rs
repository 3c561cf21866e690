use crate::domain::model::TiePolicy;
use std::cmp::Ordering;

/// Ranks scores in descending order, 1 being the best. Scores that compare
/// equal share a rank; `policy` decides what the next distinct score gets.
///
/// Scores are expected to be finite; the evaluator never hands out NaN.
pub fn rank_descending(scores: &[f64], policy: TiePolicy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // Stable sort keeps tied rows in input order.
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut ranks = vec![0; scores.len()];
    let mut current_rank = 0;
    let mut previous: Option<f64> = None;

    for (position, &index) in order.iter().enumerate() {
        let score = scores[index];
        if previous != Some(score) {
            current_rank = match policy {
                TiePolicy::Competition => position + 1,
                TiePolicy::Dense => current_rank + 1,
            };
            previous = Some(score);
        }
        ranks[index] = current_rank;
    }

    ranks
}
