use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::dsp::stft::Spectrogram;

/// Chart dimensions: two stacked panels.
const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;

/// Waveform trace color (medium purple).
const COLOR_WAVEFORM: RGBColor = RGBColor(147, 112, 219);

/// Spectrogram floor in dB below the peak magnitude.
const DB_FLOOR: f32 = 80.0;

/// Cap on drawn spectrogram columns; longer recordings are decimated.
const MAX_COLUMNS: usize = 1200;

/// Render the two-panel visualization artifact: waveform on top,
/// log-frequency magnitude spectrogram below.
///
/// This is the best-effort rendering collaborator: the caller treats any
/// failure here as "no artifact", never as an analysis failure.
pub fn render(
    samples: &[f32],
    sample_rate: u32,
    spectrogram: &Spectrogram,
    output_path: &Path,
) -> Result<()> {
    if samples.is_empty() {
        anyhow::bail!("Nothing to draw: empty waveform");
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).context("Failed to fill background")?;

    let (top, bottom) = root.split_vertically(HEIGHT / 2);

    draw_waveform(&top, samples, sample_rate)?;
    draw_spectrogram(&bottom, spectrogram)?;

    root.present().context("Failed to write chart PNG")?;

    Ok(())
}

/// Top panel: amplitude envelope of the waveform over time.
fn draw_waveform(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    samples: &[f32],
    sample_rate: u32,
) -> Result<()> {
    let duration = samples.len() as f32 / sample_rate as f32;

    let mut chart = ChartBuilder::on(area)
        .caption("Waveform", ("sans-serif", 18))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f32..duration.max(1e-3), -1f32..1f32)?;

    chart.configure_mesh().x_labels(8).y_labels(5).draw()?;

    // One min/max bar per bucket reads like a filled envelope without
    // pushing hundreds of thousands of points through the backend.
    let buckets = MAX_COLUMNS.min(samples.len());
    let bucket_len = samples.len().div_ceil(buckets);
    let bucket_dur = bucket_len as f32 / sample_rate as f32;

    chart.draw_series(samples.chunks(bucket_len).enumerate().map(|(i, chunk)| {
        let lo = chunk.iter().cloned().fold(f32::INFINITY, f32::min);
        let hi = chunk.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let t = i as f32 * bucket_dur;
        Rectangle::new(
            [(t, lo.min(-0.002)), (t + bucket_dur, hi.max(0.002))],
            COLOR_WAVEFORM.filled(),
        )
    }))?;

    Ok(())
}

/// Bottom panel: spectral magnitude in dB relative to the peak, on a
/// logarithmic frequency axis.
fn draw_spectrogram(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    spec: &Spectrogram,
) -> Result<()> {
    let frames = spec.frames();
    if frames == 0 {
        // Too short for even one analysis frame; leave the panel blank.
        return Ok(());
    }

    let duration = frames as f32 * spec.hop_secs();
    let bin_width = spec.bin_width_hz();
    let f_min = bin_width / 2.0;
    let f_max = spec.sample_rate as f32 / 2.0;

    let mut chart = ChartBuilder::on(area)
        .caption("Spectrogram (Log Frequency Scale)", ("sans-serif", 18))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f32..duration, (f_min..f_max).log_scale())?;

    chart.configure_mesh().x_labels(8).y_labels(6).draw()?;

    let peak = spec
        .magnitudes
        .iter()
        .flat_map(|frame| frame.iter())
        .fold(0.0_f32, |max, &m| max.max(m));
    if peak <= 0.0 {
        return Ok(());
    }

    let frame_step = frames.div_ceil(MAX_COLUMNS);
    let column_dur = spec.hop_secs() * frame_step as f32;

    for f in (0..frames).step_by(frame_step) {
        let t0 = spec.frame_time(f);
        let t1 = t0 + column_dur;
        let frame = &spec.magnitudes[f];

        // Skip the DC bin: it has no home on a log axis.
        chart.draw_series((1..spec.bins()).map(|bin| {
            let db = if frame[bin] > 0.0 {
                (20.0 * (frame[bin] / peak).log10()).clamp(-DB_FLOOR, 0.0)
            } else {
                -DB_FLOOR
            };
            let color = magma((db + DB_FLOOR) / DB_FLOOR);
            let y0 = (spec.bin_hz(bin) - bin_width / 2.0).max(f_min);
            let y1 = (spec.bin_hz(bin) + bin_width / 2.0).min(f_max);
            Rectangle::new([(t0, y0), (t1, y1)], color.filled())
        }))?;
    }

    Ok(())
}

/// Magma-style colormap: t in [0, 1] from near-black through purple and
/// orange to pale yellow.
fn magma(t: f32) -> RGBColor {
    const STOPS: [(f32, (u8, u8, u8)); 6] = [
        (0.0, (0, 0, 4)),
        (0.2, (40, 11, 84)),
        (0.4, (121, 34, 130)),
        (0.6, (197, 66, 108)),
        (0.8, (249, 142, 83)),
        (1.0, (252, 253, 191)),
    ];

    let t = t.clamp(0.0, 1.0);
    for pair in STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let frac = (t - t0) / (t1 - t0);
            let lerp = |a: u8, b: u8| (a as f32 + frac * (b as f32 - a as f32)).round() as u8;
            return RGBColor(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2));
        }
    }
    let (_, c) = STOPS[STOPS.len() - 1];
    RGBColor(c.0, c.1, c.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magma_endpoints() {
        assert_eq!(magma(0.0), RGBColor(0, 0, 4));
        assert_eq!(magma(1.0), RGBColor(252, 253, 191));
    }

    #[test]
    fn magma_clamps_out_of_range() {
        assert_eq!(magma(-1.0), magma(0.0));
        assert_eq!(magma(2.0), magma(1.0));
    }

    #[test]
    fn magma_brightens_monotonically() {
        // Rough sanity: total brightness increases with t.
        let lum = |c: RGBColor| c.0 as u32 + c.1 as u32 + c.2 as u32;
        let mut prev = lum(magma(0.0));
        for i in 1..=10 {
            let cur = lum(magma(i as f32 / 10.0));
            assert!(cur >= prev, "brightness dipped at step {i}");
            prev = cur;
        }
    }
}
