use crate::config::ChartConfig;
use crate::series::Table;
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0x1F77B4),
    hexcolour!(0xFF7F0E),
    hexcolour!(0x2CA02C),
    hexcolour!(0xD62728),
];

/// Render the chart into an RGB buffer of `width * height * 3` bytes.
pub fn render_to_buffer(cfg: &ChartConfig, table: &Table) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; cfg.width as usize * cfg.height as usize * 3];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (cfg.width, cfg.height)).into_drawing_area();
        draw_chart(root, cfg, table)?;
    }
    Ok(buffer)
}

/// Render the chart into an image file, format chosen by extension.
pub fn render_to_file<P: AsRef<Path>>(cfg: &ChartConfig, table: &Table, file: P) -> Result<()> {
    let file = file.as_ref();
    let root = BitMapBackend::new(file, (cfg.width, cfg.height)).into_drawing_area();
    draw_chart(root, cfg, table).with_context(|| format!("failed to draw {file:?}"))
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, cfg: &ChartConfig, table: &Table) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (y_min, y_max) = table.value_range().context("no samples to plot")?;
    let y_pad = if y_max > y_min {
        0.05 * (y_max - y_min)
    } else {
        1.0
    };
    let x_max = table.n_runs().saturating_sub(1).max(1);

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&cfg.title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0..x_max, (y_min - y_pad)..(y_max + y_pad))?;

    chart
        .configure_mesh()
        .x_desc(&cfg.x_desc)
        .y_desc(&cfg.y_desc)
        .x_labels((x_max + 1).min(10))
        .draw()?;

    for (i_series, series) in table.series().iter().enumerate() {
        let style = COLOURS[i_series % COLOURS.len()].stroke_width(2);
        let name = series.name();
        let points =
            (0..table.n_runs()).filter_map(|run| table.get(name, run).map(|val| (run, val)));
        chart
            .draw_series(LineSeries::new(points, style))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;

    fn small_cfg() -> ChartConfig {
        ChartConfig {
            width: 320,
            height: 240,
            ..ChartConfig::default()
        }
    }

    #[test]
    fn buffer_holds_every_pixel() {
        let cfg = small_cfg();
        let table = Table::align(vec![
            Series::new("kqueue", vec![10.0, 20.0, 30.0]),
            Series::new("tokio", vec![40.0, 50.0, 60.0]),
        ]);
        let buffer = render_to_buffer(&cfg, &table).unwrap();
        assert_eq!(buffer.len(), 320 * 240 * 3);
        assert!(buffer.iter().any(|&byte| byte != 0xFF));
    }

    #[test]
    fn renders_padded_and_flat_series() {
        let table = Table::align(vec![
            Series::new("kqueue", vec![7.0]),
            Series::new("tokio", vec![7.0, 7.0, 7.0, 7.0]),
        ]);
        assert!(render_to_buffer(&small_cfg(), &table).is_ok());
    }

    #[test]
    fn empty_table_is_an_error() {
        let table = Table::align(vec![
            Series::new("kqueue", Vec::new()),
            Series::new("tokio", Vec::new()),
        ]);
        let err = render_to_buffer(&small_cfg(), &table).unwrap_err();
        assert!(format!("{err:#}").contains("no samples to plot"));
    }
}
