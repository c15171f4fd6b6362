use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path, path::PathBuf};

/// Report configuration.
///
/// Every field has a default, so an empty TOML file is a valid config.
/// See [`Config::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: InputConfig,
    pub chart: ChartConfig,
}

/// Locations of the benchmark timing files.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Timings of the kqueue backend.
    pub kqueue: PathBuf,
    /// Timings of the tokio backend.
    pub tokio: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            kqueue: PathBuf::from("target/release/kqueue.csv"),
            tokio: PathBuf::from("target/release/tokio.csv"),
        }
    }
}

/// Chart labels and size.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Caption above the plot, also the window title.
    pub title: String,
    /// Label of the run index axis.
    pub x_desc: String,
    /// Label of the timing axis.
    pub y_desc: String,

    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Libevent Backend Benchmark (kqueue vs tokio)".to_string(),
            x_desc: "Test Run".to_string(),
            y_desc: "Time (µs)".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        Self::from_toml(&contents).with_context(|| format!("invalid config in {file:?}"))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.chart.title.trim().is_empty() {
            bail!("chart title must not be empty");
        }
        check_num(self.chart.width, 100..10_000).context("invalid chart width")?;
        check_num(self.chart.height, 100..10_000).context("invalid chart height")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.input.kqueue, PathBuf::from("target/release/kqueue.csv"));
        assert_eq!(config.chart.y_desc, "Time (µs)");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config =
            Config::from_toml("[chart]\nwidth = 640\n\n[input]\ntokio = \"t.csv\"\n").unwrap();
        assert_eq!(config.chart.width, 640);
        assert_eq!(config.chart.height, 768);
        assert_eq!(config.input.tokio, PathBuf::from("t.csv"));
        assert_eq!(
            config.input.kqueue,
            PathBuf::from("target/release/kqueue.csv")
        );
    }

    #[test]
    fn rejects_out_of_range_size() {
        let err = Config::from_toml("[chart]\nheight = 20\n").unwrap_err();
        assert!(format!("{err:#}").contains("invalid chart height"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Config::from_toml("[chart]\ncolour = \"red\"\n").is_err());
    }

    #[test]
    fn rejects_blank_title() {
        assert!(Config::from_toml("[chart]\ntitle = \"  \"\n").is_err());
    }
}
