use crate::series::Series;
use anyhow::{Context, Result, bail};
use std::fmt;

/// Means of both backends and their ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub kqueue_mean: f64,
    pub tokio_mean: f64,
    /// kqueue mean as a percentage of tokio mean.
    pub ratio: f64,
}

impl Summary {
    pub fn new(kqueue: &Series, tokio: &Series) -> Result<Self> {
        for series in [kqueue, tokio] {
            if series.is_empty() {
                bail!("{} series is empty", series.name());
            }
            log::info!(
                "{} runs: {}, mean: {:.3}, std dev: {:.3}",
                series.name(),
                series.len(),
                compute_mean(series.vals()),
                compute_var(series.vals()).sqrt()
            );
        }

        let kqueue_mean = compute_mean(kqueue.vals());
        let tokio_mean = compute_mean(tokio.vals());
        if tokio_mean == 0.0 {
            bail!("tokio series has zero mean, ratio is undefined");
        }
        check_printable(kqueue_mean).context("kqueue mean overflows")?;
        check_printable(tokio_mean).context("tokio mean overflows")?;

        let ratio = 100.0 * kqueue_mean / tokio_mean;
        check_printable(ratio).context("ratio overflows")?;

        Ok(Self {
            kqueue_mean,
            tokio_mean,
            ratio,
        })
    }
}

/// Values printed by [`Summary`] must round to an `i64`.
fn check_printable(val: f64) -> Result<()> {
    if !val.is_finite() || val.abs() >= i64::MAX as f64 {
        bail!("{val} does not fit in an integer");
    }
    Ok(())
}

/// Rounds half away from zero.
fn round(val: f64) -> i64 {
    val.round() as i64
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kqueue mean: {}, tokio mean: {}, ratio: {}%",
            round(self.kqueue_mean),
            round(self.tokio_mean),
            round(self.ratio)
        )
    }
}

pub fn compute_mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

pub fn compute_var(vals: &[f64]) -> f64 {
    let n_vals = vals.len();
    if n_vals < 2 {
        return f64::NAN;
    }
    let mean = compute_mean(vals);
    vals.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / (n_vals - 1) as f64
}
