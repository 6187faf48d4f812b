// offline text classifier trainer
// fits tf-idf + logistic regression on a tiny labelled set and writes the
// artifacts to disk. the scorers never load them.

mod logistic;
mod tfidf;

pub use logistic::{FitParams, LogisticRegression};
pub use tfidf::{TfidfVectorizer, tokenize};

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::Error;

pub const VECTORIZER_FILE: &str = "text_vectorizer.json";
pub const MODEL_FILE: &str = "text_model.json";

// placeholder data until there's a real corpus to load
pub const DATASET: [(&str, &str); 5] = [
    ("Congrats! You won a lottery, click here to claim.", "phishing"),
    ("Please update your bank account details immediately.", "phishing"),
    ("Your OTP is 123456. Do not share it with anyone.", "phishing"),
    ("Hi, are we still meeting tomorrow at 10?", "safe"),
    ("Your order has been shipped and will arrive soon.", "safe"),
];

#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    /// fraction held out for evaluation, rounded up to at least one sample
    pub test_size: f64,
    pub seed: u64,
    pub fit: FitParams,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
            fit: FitParams::default(),
        }
    }
}

pub struct Trained {
    pub vectorizer: TfidfVectorizer,
    pub model: LogisticRegression,
    pub report: Report,
}

impl Trained {
    pub fn predict(&self, text: &str) -> &str {
        self.model.predict(&self.vectorizer.transform(text))
    }

    pub fn save(&self, dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(dir)?;
        fs::write(
            dir.join(VECTORIZER_FILE),
            serde_json::to_vec_pretty(&self.vectorizer)?,
        )?;
        fs::write(dir.join(MODEL_FILE), serde_json::to_vec_pretty(&self.model)?)?;

        tracing::info!(dir = %dir.display(), "saved text model and vectorizer");
        Ok(())
    }
}

/// Read back the artifacts written by [`Trained::save`].
pub fn load(dir: &Path) -> Result<(TfidfVectorizer, LogisticRegression), Error> {
    let vectorizer = serde_json::from_slice(&fs::read(dir.join(VECTORIZER_FILE))?)?;
    let model = serde_json::from_slice(&fs::read(dir.join(MODEL_FILE))?)?;
    Ok((vectorizer, model))
}

pub struct Trainer {
    config: TrainConfig,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn fit(&self, data: &[(&str, &str)]) -> Result<Trained, Error> {
        let (train, test) = self.split(data)?;

        let train_texts: Vec<&str> = train.iter().map(|(text, _)| *text).collect();
        let train_labels: Vec<&str> = train.iter().map(|(_, label)| *label).collect();

        let vectorizer = TfidfVectorizer::fit(&train_texts);
        let x = vectorizer.transform_all(&train_texts);
        let model = LogisticRegression::fit(&x, &train_labels, self.config.fit)?;

        tracing::debug!(
            train = train.len(),
            test = test.len(),
            terms = vectorizer.len(),
            "fitted text model"
        );

        let predictions: Vec<&str> = test
            .iter()
            .map(|(text, _)| model.predict(&vectorizer.transform(text)))
            .collect();
        let actual: Vec<&str> = test.iter().map(|(_, label)| *label).collect();
        let report = Report::new(&actual, &predictions);

        Ok(Trained {
            vectorizer,
            model,
            report,
        })
    }

    // seeded shuffle, first test_size share of the permutation is held out
    fn split<'a>(
        &self,
        data: &[(&'a str, &'a str)],
    ) -> Result<(Vec<(&'a str, &'a str)>, Vec<(&'a str, &'a str)>), Error> {
        if data.len() < 2 {
            return Err(Error::invalid(
                "dataset",
                "at least two samples",
                format!("got {} samples", data.len()),
            ));
        }

        let n_test = ((data.len() as f64 * self.config.test_size).ceil() as usize)
            .clamp(1, data.len() - 1);

        let mut order: Vec<usize> = (0..data.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(self.config.seed));

        let (test, train) = order.split_at(n_test);
        Ok((
            train.iter().map(|&i| data[i]).collect(),
            test.iter().map(|&i| data[i]).collect(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Average {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Per-class precision/recall/f1 over the held-out split.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total: usize,
}

impl Report {
    pub fn new(actual: &[&str], predicted: &[&str]) -> Self {
        let labels: BTreeSet<&str> = actual.iter().chain(predicted).copied().collect();
        let pairs: Vec<(&str, &str)> = actual.iter().copied().zip(predicted.iter().copied()).collect();

        let classes = labels
            .into_iter()
            .map(|label| {
                let tp = pairs.iter().filter(|(a, p)| *a == label && *p == label).count();
                let predicted = pairs.iter().filter(|(_, p)| *p == label).count();
                let support = pairs.iter().filter(|(a, _)| *a == label).count();

                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                ClassMetrics {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let correct = pairs.iter().filter(|(a, p)| a == p).count();

        Self {
            classes,
            accuracy: ratio(correct, pairs.len()),
            total: pairs.len(),
        }
    }

    /// Unweighted mean over classes.
    pub fn macro_avg(&self) -> Average {
        self.average(|_| 1.0)
    }

    /// Mean over classes weighted by support.
    pub fn weighted_avg(&self) -> Average {
        self.average(|c| c.support as f64)
    }

    fn average(&self, weight: impl Fn(&ClassMetrics) -> f64) -> Average {
        let total: f64 = self.classes.iter().map(&weight).sum();
        let mean = |metric: fn(&ClassMetrics) -> f64| {
            if total == 0.0 {
                0.0
            } else {
                self.classes.iter().map(|c| weight(c) * metric(c)).sum::<f64>() / total
            }
        };

        Average {
            precision: mean(|c| c.precision),
            recall: mean(|c| c.recall),
            f1: mean(|c| c.f1),
        }
    }
}

// zero when there's nothing to divide by
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:>12} {:>9} {:>9} {:>9.2} {:>9}", "accuracy", "", "", self.accuracy, self.total)?;
        for (name, avg) in [("macro avg", self.macro_avg()), ("weighted avg", self.weighted_avg())] {
            writeln!(
                f,
                "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, avg.precision, avg.recall, avg.f1, self.total
            )?;
        }
        Ok(())
    }
}
