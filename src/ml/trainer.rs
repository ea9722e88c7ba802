// ============================================================
// Layer 5 — Trainer
// ============================================================
// Fits a fresh logistic regression on a canonical dataset.
// Always a full retrain from scratch — there is no incremental
// or warm-start path, so a retrained model owes nothing to its
// predecessor.
//
// Algorithm: stochastic gradient descent on the log loss with
// an L2 penalty.
//
//   p  = σ(w·x̂ + b)                 prediction
//   ∇w = (p - y)·x̂ + λ·w           per-sample gradient
//   ∇b = (p - y)
//
// Features are standardised first ((x - mean) / std) so one
// learning rate works across columns with very different
// magnitudes (activity counts vs headcounts).
//
// Determinism: weights start at zero and the per-epoch shuffle
// uses a StdRng seeded from the config. Same dataset + same
// config → bit-identical artifact. That property is load-bearing:
// drift decisions compare scores across runs, and a randomly
// varying trainer would turn those comparisons into noise.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::application::config::PipelineConfig;
use crate::domain::dataset::CanonicalDataset;
use crate::ml::model::LogisticModel;

/// Fit a new classifier on `dataset` from scratch.
pub fn train(dataset: &CanonicalDataset, cfg: &PipelineConfig) -> Result<LogisticModel> {
    if dataset.is_empty() {
        bail!("cannot train on an empty dataset");
    }

    let features = dataset.features();
    let labels   = dataset.labels();
    let n_cols   = features[0].len();

    // ── Standardisation parameters ────────────────────────────────────────────
    let (means, stds) = column_stats(&features);
    let scaled: Vec<Vec<f64>> = features
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, &x)| (x - means[i]) / stds[i])
                .collect()
        })
        .collect();

    // ── SGD loop ──────────────────────────────────────────────────────────────
    let mut weights = vec![0.0; n_cols];
    let mut bias    = 0.0;
    let mut order: Vec<usize> = (0..scaled.len()).collect();
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    tracing::info!(
        "Training on {} rows × {} features ({} epochs, lr={})",
        scaled.len(),
        n_cols,
        cfg.epochs,
        cfg.learning_rate,
    );

    for epoch in 0..cfg.epochs {
        order.shuffle(&mut rng);

        let mut loss = 0.0;
        for &i in &order {
            let row = &scaled[i];
            let y   = labels[i] as f64;

            let z = bias
                + row.iter().zip(&weights).map(|(x, w)| x * w).sum::<f64>();
            let p = sigmoid(z);

            // Log loss for progress logging only (clamped away
            // from 0 so ln never returns -inf)
            let p_clamped = p.clamp(1e-12, 1.0 - 1e-12);
            loss -= y * p_clamped.ln() + (1.0 - y) * (1.0 - p_clamped).ln();

            let err = p - y;
            for (w, &x) in weights.iter_mut().zip(row.iter()) {
                *w -= cfg.learning_rate * (err * x + cfg.l2_penalty * *w);
            }
            bias -= cfg.learning_rate * err;
        }

        if (epoch + 1) % 50 == 0 || epoch + 1 == cfg.epochs {
            tracing::debug!(
                "Epoch {}/{}: avg log loss {:.6}",
                epoch + 1,
                cfg.epochs,
                loss / scaled.len() as f64,
            );
        }
    }

    Ok(LogisticModel {
        weights,
        bias,
        means,
        stds,
        feature_columns: dataset.feature_columns(),
    })
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Per-column mean and standard deviation. Constant columns get
/// a std of 1.0 so the division is always safe.
fn column_stats(features: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>) {
    let n_rows = features.len() as f64;
    let n_cols = features[0].len();

    let mut means = vec![0.0; n_cols];
    for row in features {
        for (i, &x) in row.iter().enumerate() {
            means[i] += x;
        }
    }
    for m in &mut means {
        *m /= n_rows;
    }

    let mut stds = vec![0.0; n_cols];
    for row in features {
        for (i, &x) in row.iter().enumerate() {
            stds[i] += (x - means[i]).powi(2);
        }
    }
    for s in &mut stds {
        *s = (*s / n_rows).sqrt();
        if *s == 0.0 {
            *s = 1.0;
        }
    }

    (means, stds)
}
