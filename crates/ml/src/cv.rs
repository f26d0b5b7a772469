// K-fold cross-validation splits

use scorecast_models::{Result, ScorecastError};

/// Row indices of one train/validation split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// Contiguous, unshuffled folds. The first `n_samples % n_splits` folds hold
/// one extra row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFold {
    n_splits: usize,
}

impl KFold {
    pub fn new(n_splits: usize) -> Result<Self> {
        if n_splits < 2 {
            return Err(ScorecastError::configuration(
                "KFold",
                format!("n_splits must be at least 2, got {n_splits}"),
            ));
        }
        Ok(Self { n_splits })
    }

    pub fn split(&self, n_samples: usize) -> Result<Vec<Fold>> {
        if n_samples < self.n_splits {
            return Err(ScorecastError::data(format!(
                "cannot split {n_samples} rows into {} folds",
                self.n_splits
            )));
        }

        let base = n_samples / self.n_splits;
        let extra = n_samples % self.n_splits;
        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for i in 0..self.n_splits {
            let size = base + usize::from(i < extra);
            let end = start + size;
            folds.push(Fold {
                train: (0..start).chain(end..n_samples).collect(),
                validation: (start..end).collect(),
            });
            start = end;
        }
        Ok(folds)
    }
}
