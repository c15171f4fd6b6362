use crate::chart;
use crate::config::Config;
use crate::display;
use crate::series::{Series, Table};
use crate::stats::Summary;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Which outputs a [`Reporter`] produces.
#[derive(Debug)]
pub struct Outputs {
    pub print_stats: bool,
    pub display: bool,
    pub save_file: Option<PathBuf>,
}

pub struct Reporter {
    cfg: Config,
    outputs: Outputs,
}

impl Reporter {
    pub fn new(cfg: Config, outputs: Outputs) -> Self {
        Self { cfg, outputs }
    }

    /// Load both series, print the summary line and show the chart.
    pub fn run(&self) -> Result<()> {
        let kqueue = Series::from_csv("kqueue", &self.cfg.input.kqueue)
            .context("failed to load kqueue series")?;
        let tokio = Series::from_csv("tokio", &self.cfg.input.tokio)
            .context("failed to load tokio series")?;
        log::info!(
            "loaded {} kqueue runs and {} tokio runs",
            kqueue.len(),
            tokio.len()
        );

        if self.outputs.print_stats {
            let summary = Summary::new(&kqueue, &tokio).context("failed to summarize series")?;
            println!("{summary}");
        }

        let table = Table::align(vec![kqueue, tokio]);

        if let Some(save_file) = &self.outputs.save_file {
            chart::render_to_file(&self.cfg.chart, &table, save_file)
                .context("failed to save chart")?;
            log::info!("saved {save_file:?}");
        }

        if self.outputs.display {
            let chart_cfg = &self.cfg.chart;
            let buffer =
                chart::render_to_buffer(chart_cfg, &table).context("failed to render chart")?;
            display::show(chart_cfg, &buffer).context("failed to display chart")?;
        }

        Ok(())
    }
}
