use crate::config::ChartConfig;
use anyhow::{Context, Result, bail};
use minifb::{Key, Window, WindowOptions};

/// Show a chart rendered with `cfg` in a window and block until the window
/// is closed or Escape is pressed.
pub fn show(cfg: &ChartConfig, rgb: &[u8]) -> Result<()> {
    let width = cfg.width as usize;
    let height = cfg.height as usize;
    let buffer = pack_rgb(rgb);
    if buffer.len() != width * height {
        bail!(
            "image must have {} pixels, but has {}",
            width * height,
            buffer.len()
        );
    }

    let mut window = Window::new(&cfg.title, width, height, WindowOptions::default())
        .context("failed to open chart window")?;
    window.set_target_fps(30);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window
            .update_with_buffer(&buffer, width, height)
            .context("failed to update chart window")?;
    }

    Ok(())
}

/// Pack 3-byte RGB pixels into the `0RGB` words minifb expects.
fn pack_rgb(rgb: &[u8]) -> Vec<u32> {
    rgb.chunks_exact(3)
        .map(|px| u32::from_be_bytes([0, px[0], px[1], px[2]]))
        .collect()
}
