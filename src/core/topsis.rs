//! Vector-normalisation TOPSIS.
//!
//! Each criterion column is divided by its Euclidean norm and scaled by its
//! weight. Every alternative is then scored by its relative closeness to the
//! ideal best and away from the ideal worst, where "best" is the column
//! maximum for benefit criteria and the column minimum for cost criteria.

use crate::core::rank::rank_descending;
use crate::domain::model::{DecisionMatrix, Evaluation, Impact, TiePolicy};
use crate::utils::error::{Result, TopsisError};

pub const MIN_ALTERNATIVES: usize = 2;
pub const MIN_CRITERIA: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct Topsis {
    ties: TiePolicy,
}

impl Topsis {
    pub fn new(ties: TiePolicy) -> Self {
        Self { ties }
    }

    pub fn evaluate(
        &self,
        matrix: &DecisionMatrix,
        weights: &[f64],
        impacts: &[Impact],
    ) -> Result<Evaluation> {
        check_dimensions(matrix, weights, impacts)?;

        let weighted = weighted_normalized(matrix, weights)?;
        let (best, worst) = ideal_solutions(&weighted, impacts);

        let mut scores = Vec::with_capacity(weighted.len());
        for (i, row) in weighted.iter().enumerate() {
            let to_best = distance(row, &best);
            let to_worst = distance(row, &worst);
            let total = to_best + to_worst;

            if !total.is_finite() {
                return Err(TopsisError::computation(format!(
                    "separation distances for row {} overflowed",
                    i + 1
                )));
            }
            if total <= 0.0 {
                return Err(TopsisError::computation(format!(
                    "row {} is equally far from the ideal best and worst solutions; \
                     all alternatives are identical on every criterion",
                    i + 1
                )));
            }

            let score = to_worst / total;
            if !score.is_finite() {
                return Err(TopsisError::computation(format!(
                    "score for row {} is not a finite number",
                    i + 1
                )));
            }
            scores.push(score);
        }

        tracing::debug!(
            alternatives = scores.len(),
            criteria = matrix.column_count(),
            "TOPSIS scores computed"
        );

        let ranks = rank_descending(&scores, self.ties);
        Ok(Evaluation { scores, ranks })
    }
}

fn check_dimensions(matrix: &DecisionMatrix, weights: &[f64], impacts: &[Impact]) -> Result<()> {
    let columns = matrix.column_count();
    if weights.len() != columns || impacts.len() != columns {
        return Err(TopsisError::ParameterMismatch {
            weights: weights.len(),
            impacts: impacts.len(),
            columns,
        });
    }

    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w <= 0.0) {
        return Err(TopsisError::InvalidWeight {
            value: w.to_string(),
            reason: "weights must be positive finite numbers".to_string(),
        });
    }

    if columns < MIN_CRITERIA {
        return Err(TopsisError::computation(format!(
            "at least {} criteria columns are required, found {}",
            MIN_CRITERIA, columns
        )));
    }

    if matrix.row_count() < MIN_ALTERNATIVES {
        return Err(TopsisError::computation(format!(
            "at least {} rows are required, found {}",
            MIN_ALTERNATIVES,
            matrix.row_count()
        )));
    }

    Ok(())
}

/// Rescales weights to sum to one. Dividing by the largest weight first
/// keeps the sum finite.
fn relative_weights(weights: &[f64]) -> Vec<f64> {
    let largest = weights.iter().copied().fold(0.0, f64::max);
    let total: f64 = weights.iter().map(|w| w / largest).sum();
    weights.iter().map(|w| w / largest / total).collect()
}

/// Vector-normalises each column and applies its weight.
///
/// Each column is divided by its largest magnitude before squaring, so the
/// norm of finite values never overflows.
fn weighted_normalized(matrix: &DecisionMatrix, weights: &[f64]) -> Result<Vec<Vec<f64>>> {
    let weights = relative_weights(weights);

    // (largest magnitude, norm of the column divided by it)
    let mut scales = Vec::with_capacity(weights.len());
    for j in 0..matrix.column_count() {
        let largest = matrix.column(j).map(f64::abs).fold(0.0, f64::max);
        if !largest.is_finite() || largest == 0.0 {
            return Err(TopsisError::computation(format!(
                "criteria column {} has a zero or non-finite norm and cannot be normalized",
                j + 1
            )));
        }
        let root = matrix
            .column(j)
            .map(|v| (v / largest).powi(2))
            .sum::<f64>()
            .sqrt();
        scales.push((largest, root));
    }

    Ok(matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(&scales)
                .zip(&weights)
                .map(|((value, (largest, root)), weight)| value / largest / root * weight)
                .collect()
        })
        .collect())
}

/// Returns (ideal best, ideal worst) per column.
fn ideal_solutions(weighted: &[Vec<f64>], impacts: &[Impact]) -> (Vec<f64>, Vec<f64>) {
    let mut best = Vec::with_capacity(impacts.len());
    let mut worst = Vec::with_capacity(impacts.len());

    for (j, impact) in impacts.iter().enumerate() {
        let column = weighted.iter().filter_map(|row| row.get(j).copied());
        let (min, max) = column.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        match impact {
            Impact::Benefit => {
                best.push(max);
                worst.push(min);
            }
            Impact::Cost => {
                best.push(min);
                worst.push(max);
            }
        }
    }

    (best, worst)
}

fn distance(row: &[f64], ideal: &[f64]) -> f64 {
    row.iter()
        .zip(ideal)
        .map(|(v, i)| (v - i).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;

    fn matrix(rows: &[&[f64]]) -> DecisionMatrix {
        let columns = rows.first().map_or(0, |r| r.len());
        DecisionMatrix::new(rows.iter().map(|r| r.to_vec()).collect(), columns).unwrap()
    }

    fn phones() -> DecisionMatrix {
        matrix(&[
            &[250.0, 16.0, 12.0, 5.0],
            &[200.0, 16.0, 8.0, 3.0],
            &[300.0, 32.0, 16.0, 4.0],
            &[275.0, 32.0, 8.0, 4.0],
            &[225.0, 16.0, 16.0, 2.0],
        ])
    }

    const PHONE_IMPACTS: [Impact; 4] = [
        Impact::Cost,
        Impact::Benefit,
        Impact::Benefit,
        Impact::Benefit,
    ];

    #[test]
    fn test_reference_scenario() {
        let result = Topsis::default()
            .evaluate(&phones(), &[0.25; 4], &PHONE_IMPACTS)
            .unwrap();

        let expected = [
            0.534_276_857_182_100_3,
            0.308_367_768_732_468_5,
            0.691_632_231_267_531_5,
            0.534_736_584_486_838,
            0.401_046_121_516_786_15,
        ];
        for (score, want) in result.scores.iter().zip(expected) {
            assert!((score - want).abs() < 1e-9, "{score} != {want}");
        }
        assert_eq!(result.ranks, vec![3, 5, 1, 2, 4]);
    }

    #[test]
    fn test_scores_are_distinct_and_bounded() {
        let result = Topsis::default()
            .evaluate(&phones(), &[1.0, 1.0, 1.0, 2.0], &PHONE_IMPACTS)
            .unwrap();

        for score in &result.scores {
            assert!((0.0..=1.0).contains(score));
        }
        let mut sorted = result.scores.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        sorted.dedup();
        assert_eq!(sorted.len(), 5);
    }

    #[test]
    fn test_max_score_ranks_first() {
        let result = Topsis::default()
            .evaluate(&phones(), &[2.0, 1.0, 1.0, 1.0], &PHONE_IMPACTS)
            .unwrap();

        let best = result
            .scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(result.ranks[best], 1);
    }

    #[test]
    fn test_cost_criterion_prefers_lower_values() {
        let m = matrix(&[&[10.0, 5.0], &[20.0, 5.0], &[30.0, 5.0]]);
        let cost = Topsis::default()
            .evaluate(&m, &[1.0, 1.0], &[Impact::Cost, Impact::Benefit])
            .unwrap();
        assert_eq!(cost.ranks, vec![1, 2, 3]);
        assert_eq!(cost.scores[0], 1.0);
        assert_eq!(cost.scores[2], 0.0);

        let benefit = Topsis::default()
            .evaluate(&m, &[1.0, 1.0], &[Impact::Benefit, Impact::Benefit])
            .unwrap();
        assert_eq!(benefit.ranks, vec![3, 2, 1]);
    }

    #[test]
    fn test_scaling_weights_keeps_scores() {
        let a = Topsis::default()
            .evaluate(&phones(), &[1.0, 2.0, 3.0, 4.0], &PHONE_IMPACTS)
            .unwrap();
        let b = Topsis::default()
            .evaluate(&phones(), &[10.0, 20.0, 30.0, 40.0], &PHONE_IMPACTS)
            .unwrap();

        for (x, y) in a.scores.iter().zip(&b.scores) {
            assert!((x - y).abs() < 1e-12);
        }
        assert_eq!(a.ranks, b.ranks);
    }

    #[test]
    fn test_identical_rows_tie() {
        let m = matrix(&[&[1.0, 2.0], &[3.0, 1.0], &[1.0, 2.0]]);
        let result = Topsis::new(TiePolicy::Competition)
            .evaluate(&m, &[1.0, 1.0], &[Impact::Benefit, Impact::Benefit])
            .unwrap();
        assert_eq!(result.scores[0], result.scores[2]);
        assert_eq!(result.ranks[0], result.ranks[2]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Topsis::default()
            .evaluate(&phones(), &[0.25; 3], &PHONE_IMPACTS)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ParameterMismatch);

        let err = Topsis::default()
            .evaluate(&phones(), &[0.25; 4], &PHONE_IMPACTS[..3])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ParameterMismatch);
    }

    #[test]
    fn test_zero_column_is_a_computation_error() {
        let m = matrix(&[&[1.0, 0.0], &[2.0, 0.0], &[3.0, 0.0]]);
        let err = Topsis::default()
            .evaluate(&m, &[1.0, 1.0], &[Impact::Benefit, Impact::Benefit])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Computation);
        assert!(err.to_string().contains("column 2"));
    }

    #[test]
    fn test_all_rows_identical_is_a_computation_error() {
        let m = matrix(&[&[4.0, 7.0], &[4.0, 7.0]]);
        let err = Topsis::default()
            .evaluate(&m, &[1.0, 1.0], &[Impact::Benefit, Impact::Cost])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Computation);
    }

    #[test]
    fn test_too_few_rows_or_criteria() {
        let single_row = matrix(&[&[1.0, 2.0]]);
        let err = Topsis::default()
            .evaluate(&single_row, &[1.0, 1.0], &[Impact::Benefit, Impact::Benefit])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Computation);

        let single_criterion = matrix(&[&[1.0], &[2.0]]);
        let err = Topsis::default()
            .evaluate(&single_criterion, &[1.0], &[Impact::Benefit])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Computation);
    }

    fn assert_same_scores(a: &Evaluation, b: &Evaluation) {
        for (x, y) in a.scores.iter().zip(&b.scores) {
            assert!((x - y).abs() < 1e-12, "{x} != {y}");
        }
        assert_eq!(a.ranks, b.ranks);
    }

    #[test]
    fn test_huge_weights_keep_scores() {
        let m = matrix(&[&[1.0, 2.0], &[3.0, 1.0], &[4.0, 5.0]]);
        let impacts = [Impact::Benefit, Impact::Benefit];

        let unit = Topsis::default().evaluate(&m, &[1.0, 1.0], &impacts).unwrap();
        let huge = Topsis::default()
            .evaluate(&m, &[1e200, 1e200], &impacts)
            .unwrap();
        let extreme = Topsis::default()
            .evaluate(&m, &[f64::MAX, f64::MAX], &impacts)
            .unwrap();

        assert_same_scores(&unit, &huge);
        assert_same_scores(&unit, &extreme);
    }

    #[test]
    fn test_huge_values_keep_scores() {
        let impacts = [Impact::Cost, Impact::Benefit];
        let small = matrix(&[&[1.0, 2.0], &[2.0, 1.0], &[3.0, 5.0]]);
        let large = matrix(&[&[1e200, 2.0], &[2e200, 1.0], &[3e200, 5.0]]);

        let a = Topsis::default().evaluate(&small, &[1.0, 2.0], &impacts).unwrap();
        let b = Topsis::default().evaluate(&large, &[1.0, 2.0], &impacts).unwrap();
        assert_same_scores(&a, &b);

        let at_limit = matrix(&[&[f64::MAX, 1.0], &[f64::MAX, 2.0]]);
        let result = Topsis::default()
            .evaluate(&at_limit, &[1.0, 1.0], &[Impact::Benefit, Impact::Benefit])
            .unwrap();
        assert_eq!(result.ranks, vec![2, 1]);
    }

    #[test]
    fn test_tiny_values_are_not_a_zero_column() {
        let m = matrix(&[&[1e-310, 1.0], &[2e-310, 2.0], &[3e-310, 4.0]]);
        let result = Topsis::default()
            .evaluate(&m, &[1.0, 1.0], &[Impact::Benefit, Impact::Benefit])
            .unwrap();
        assert_eq!(result.ranks, vec![3, 2, 1]);
    }
}
