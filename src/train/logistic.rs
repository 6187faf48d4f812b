// binary logistic regression, l2-regularized, fitted by gradient descent

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::Error;

#[derive(Debug, Clone, Copy)]
pub struct FitParams {
    /// inverse regularization strength
    pub c: f64,
    pub max_iter: usize,
    pub learning_rate: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            learning_rate: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    // sorted; classes[1] is the positive class
    classes: [String; 2],
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    pub fn fit<S: AsRef<str>>(x: &[Vec<f64>], y: &[S], params: FitParams) -> Result<Self, Error> {
        if x.len() != y.len() || x.is_empty() {
            return Err(Error::invalid(
                "labels",
                "one label per sample",
                format!("{} samples but {} labels", x.len(), y.len()),
            ));
        }

        let classes: Vec<&str> = y
            .iter()
            .map(|label| label.as_ref())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .collect();
        let classes: [String; 2] = match classes.as_slice() {
            [neg, pos] => [neg.to_string(), pos.to_string()],
            other => {
                return Err(Error::invalid(
                    "labels",
                    "two distinct classes",
                    format!("need exactly two classes, got {}", other.len()),
                ));
            }
        };

        let targets: Vec<f64> = y
            .iter()
            .map(|label| if label.as_ref() == classes[1] { 1.0 } else { 0.0 })
            .collect();

        let features = x[0].len();
        let n = x.len() as f64;
        let mut weights = vec![0.0; features];
        let mut bias = 0.0;

        // minimizes (C * sum(log loss) + |w|^2 / 2) / n; the bias is not penalized
        for _ in 0..params.max_iter {
            let mut grad_w: Vec<f64> = weights.clone();
            let mut grad_b = 0.0;

            for (row, target) in x.iter().zip(&targets) {
                let err = sigmoid(dot(&weights, row) + bias) - target;
                for (g, v) in grad_w.iter_mut().zip(row) {
                    *g += params.c * err * v;
                }
                grad_b += params.c * err;
            }

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= params.learning_rate * g / n;
            }
            bias -= params.learning_rate * grad_b / n;
        }

        Ok(Self {
            classes,
            weights,
            bias,
        })
    }

    /// Probability of the positive class, `classes()[1]`.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        sigmoid(dot(&self.weights, row) + self.bias)
    }

    pub fn predict(&self, row: &[f64]) -> &str {
        if self.predict_proba(row) >= 0.5 {
            &self.classes[1]
        } else {
            &self.classes[0]
        }
    }

    pub fn classes(&self) -> &[String; 2] {
        &self.classes
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(i: usize, dims: usize) -> Vec<f64> {
        let mut v = vec![0.0; dims];
        v[i] = 1.0;
        v
    }

    #[test]
    fn separates_balanced_classes() {
        let x: Vec<_> = (0..4).map(|i| unit(i, 4)).collect();
        let y = ["phishing", "safe", "phishing", "safe"];
        let model = LogisticRegression::fit(&x, &y, FitParams::default()).unwrap();

        assert_eq!(model.classes(), &["phishing".to_string(), "safe".to_string()]);
        for (row, label) in x.iter().zip(y) {
            assert_eq!(model.predict(row), label);
        }
    }

    #[test]
    fn rejects_single_class() {
        let x = vec![unit(0, 2), unit(1, 2)];
        let err = LogisticRegression::fit(&x, &["safe", "safe"], FitParams::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let x = vec![unit(0, 2)];
        assert!(LogisticRegression::fit(&x, &["safe", "phishing"], FitParams::default()).is_err());
    }
}
