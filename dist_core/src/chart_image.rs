//! # Chart Images
//!
//! Renders a [`ChartData`] to a PNG file with `plotters` for the
//! "Guardar gráfica" export. Images are 1500×1050 pixels (10×7 inches at
//! 150 dpi) on a white background, whatever the theme of the app.
//!
//! Text is drawn with an embedded DejaVu Sans, so the output does not depend
//! on the fonts installed on the machine.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dist_core::calculations::hypergeometric::summarize;
//! use dist_core::chart::ChartData;
//! use dist_core::chart_image::{hypergeometric_image_name, save_chart_png};
//! use std::path::Path;
//!
//! let summary = summarize(20, 6, 5, 2).unwrap();
//! let name = hypergeometric_image_name(&summary);
//! assert_eq!(name, "distribucion_hipergeométrica_N20_K6_n5.png");
//!
//! save_chart_png(&ChartData::hypergeometric(&summary), Path::new(&name)).unwrap();
//! ```

use std::path::{Path, PathBuf};
use std::sync::Once;

use log::{info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};

use crate::calculations::binomial::BinomialResult;
use crate::calculations::hypergeometric::HypergeometricSummary;
use crate::chart::{ChartData, X_AXIS_LABEL, Y_AXIS_LABEL};
use crate::errors::{DistError, DistResult};
use crate::format::format_fixed;

pub const IMAGE_WIDTH: u32 = 1500;
pub const IMAGE_HEIGHT: u32 = 1050;
pub const IMAGE_EXTENSION: &str = "png";

const FONT_FAMILY: &str = "sans-serif";
static FONT_DATA: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

const BAR_COLOR: RGBColor = RGBColor(52, 152, 219);
const HIGHLIGHT_COLOR: RGBColor = RGBColor(231, 76, 60);
const CURVE_COLOR: RGBColor = RGBColor(31, 97, 141);
const NORMAL_COLOR: RGBColor = RGBColor(39, 174, 96);
const TEXT_COLOR: RGBColor = RGBColor(40, 40, 40);
const BAR_OPACITY: f64 = 0.8;

/// Length of each dash of the mean marker, as a share of the y axis
const MEAN_DASH: f64 = 1.0 / 60.0;
const MAX_X_LABELS: usize = 20;

fn register_fonts() {
    static REGISTER: Once = Once::new();
    REGISTER.call_once(|| {
        if register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA).is_err() {
            warn!("embedded chart font could not be loaded");
        }
    });
}

/// Default file name for a binomial chart, e.g. `distribucion_binomial_n10.png`
pub fn binomial_image_name(result: &BinomialResult) -> String {
    format!("distribucion_binomial_n{}.{}", result.params.n, IMAGE_EXTENSION)
}

/// Default file name for a hypergeometric chart, named after the model used
pub fn hypergeometric_image_name(summary: &HypergeometricSummary) -> String {
    let params = &summary.params;
    format!(
        "distribucion_{}_N{}_K{}_n{}.{}",
        summary.model.display_name().to_lowercase(),
        params.population,
        params.successes,
        params.sample,
        IMAGE_EXTENSION
    )
}

/// `path` with a `.png` extension
pub fn image_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(IMAGE_EXTENSION) => path.to_path_buf(),
        _ => path.with_extension(IMAGE_EXTENSION),
    }
}

fn integer_label(x: f64) -> String {
    if x >= 0.0 && (x - x.round()).abs() < 1e-6 {
        format!("{}", x.round() as u64)
    } else {
        String::new()
    }
}

/// Draw `data` onto any plotters drawing area: title, bars with value
/// labels, the distribution curve, the dashed normal reference, the mean
/// marker and a legend.
pub fn draw_chart<DB: DrawingBackend>(
    data: &ChartData,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    register_fonts();
    root.fill(&WHITE)?;

    let area = root.titled(&data.title, (FONT_FAMILY, 36).into_font().color(&TEXT_COLOR))?;
    let y_max = data.y_max();
    let mut chart = ChartBuilder::on(&area)
        .caption(&data.subtitle, (FONT_FAMILY, 24).into_font().color(&TEXT_COLOR.mix(0.7)))
        .margin(24)
        .x_label_area_size(70)
        .y_label_area_size(100)
        .build_cartesian_2d(data.x_min..data.x_max, 0.0..y_max)?;

    let x_labels = ((data.x_max - data.x_min).round() as usize).clamp(1, MAX_X_LABELS) + 1;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(x_labels)
        .y_labels(6)
        .x_label_formatter(&|x: &f64| integer_label(*x))
        .y_label_formatter(&|y: &f64| format_fixed(*y, 3))
        .x_desc(X_AXIS_LABEL)
        .y_desc(Y_AXIS_LABEL)
        .axis_desc_style((FONT_FAMILY, 24))
        .label_style((FONT_FAMILY, 18))
        .draw()?;

    let half = data.bar_width / 2.0;
    chart
        .draw_series(data.bars.iter().map(|bar| {
            let x = bar.x as f64;
            let color = if bar.highlighted { HIGHLIGHT_COLOR } else { BAR_COLOR };
            Rectangle::new(
                [(x - half, 0.0), (x + half, bar.probability)],
                color.mix(BAR_OPACITY).filled(),
            )
        }))?
        .label("P(X = x)")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 20, y + 6)], BAR_COLOR.mix(BAR_OPACITY).filled()));
    chart.draw_series(data.bars.iter().map(|bar| {
        let x = bar.x as f64;
        Rectangle::new([(x - half, 0.0), (x + half, bar.probability)], TEXT_COLOR.stroke_width(1))
    }))?;

    let above = Pos::new(HPos::Center, VPos::Bottom);
    let value_style = (FONT_FAMILY, 16).into_font().color(&TEXT_COLOR).pos(above);
    let highlight_style = (FONT_FAMILY, 22).into_font().color(&HIGHLIGHT_COLOR).pos(above);
    chart.draw_series(data.bars.iter().filter(|bar| bar.highlighted || bar.show_label).map(|bar| {
        let position = (bar.x as f64, bar.probability + y_max * 0.01);
        if bar.highlighted {
            Text::new(
                format!("P(X={})={}", bar.x, format_fixed(bar.probability, 4)),
                position,
                highlight_style.clone(),
            )
        } else {
            Text::new(format_fixed(bar.probability, 4), position, value_style.clone())
        }
    }))?;

    if data.curve.len() > 1 {
        chart
            .draw_series(LineSeries::new(data.curve.iter().copied(), CURVE_COLOR.stroke_width(3)))?
            .label("Distribución")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CURVE_COLOR.stroke_width(3)));
    }

    // Every other segment of the sampled normal curve, clipped to the visible range
    let normal: Vec<(f64, f64)> = data
        .normal_curve
        .iter()
        .copied()
        .filter(|(x, _)| *x >= data.x_min && *x <= data.x_max)
        .collect();
    if normal.len() > 1 {
        chart
            .draw_series(
                normal
                    .windows(2)
                    .step_by(2)
                    .map(|pair| PathElement::new(vec![pair[0], pair[1]], NORMAL_COLOR.stroke_width(2))),
            )?
            .label("Aproximación normal")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 8, y)], NORMAL_COLOR.stroke_width(2)));
    }

    if data.mean >= data.x_min && data.mean <= data.x_max {
        let dash = y_max * MEAN_DASH;
        let mean = data.mean;
        chart
            .draw_series(
                (0u32..)
                    .map(|i| i as f64 * 2.0 * dash)
                    .take_while(|y| *y < y_max)
                    .map(|y| PathElement::new(vec![(mean, y), (mean, (y + dash).min(y_max))], HIGHLIGHT_COLOR.stroke_width(2))),
            )?
            .label(data.mean_label())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 8, y)], HIGHLIGHT_COLOR.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&TEXT_COLOR.mix(0.4))
        .label_font((FONT_FAMILY, 18))
        .draw()?;

    Ok(())
}

/// Render `data` as a PNG at [`IMAGE_WIDTH`]×[`IMAGE_HEIGHT`].
pub fn save_chart_png(data: &ChartData, path: &Path) -> DistResult<()> {
    if data.is_empty() {
        return Err(DistError::calculation_failed("la gráfica", "no hay datos para exportar"));
    }
    let display = path.display().to_string();

    let root = BitMapBackend::new(path, (IMAGE_WIDTH, IMAGE_HEIGHT)).into_drawing_area();
    draw_chart(data, &root).map_err(|e| DistError::file_error("dibujar gráfica", &display, e.to_string()))?;
    root.present()
        .map_err(|e| DistError::file_error("guardar gráfica", &display, e.to_string()))?;

    info!("chart saved to {}", display);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::binomial::{calculate, BinomialInput, BinomialParameters};
    use crate::calculations::hypergeometric::summarize;

    const W: u32 = 600;
    const H: u32 = 420;

    fn render(data: &ChartData) -> Vec<u8> {
        let mut buffer = vec![0u8; (W * H * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (W, H)).into_drawing_area();
            draw_chart(data, &root).unwrap();
            root.present().unwrap();
        }
        buffer
    }

    /// Pixels within a small tolerance of `color` blended over white at bar opacity
    fn count_bar_pixels(buffer: &[u8], color: RGBColor) -> usize {
        let blend = |c: u8| BAR_OPACITY * c as f64 + (1.0 - BAR_OPACITY) * 255.0;
        let target = [blend(color.0), blend(color.1), blend(color.2)];
        buffer
            .chunks(3)
            .filter(|px| px.iter().zip(target).all(|(&v, t)| (v as f64 - t).abs() <= 3.0))
            .count()
    }

    #[test]
    fn test_highlighted_bar_is_drawn() {
        let summary = summarize(20, 6, 5, 2).unwrap();
        let buffer = render(&ChartData::hypergeometric(&summary));

        assert_eq!(&buffer[..3], &[255, 255, 255]);
        assert!(count_bar_pixels(&buffer, HIGHLIGHT_COLOR) > 2000);
        assert!(count_bar_pixels(&buffer, BAR_COLOR) > 2000);
    }

    #[test]
    fn test_full_distribution_has_no_highlight() {
        let result = calculate(&BinomialInput::full(BinomialParameters::new(10, 0.5))).unwrap();
        let buffer = render(&ChartData::binomial(&result));

        assert!(count_bar_pixels(&buffer, BAR_COLOR) > 2000);
        assert!(count_bar_pixels(&buffer, HIGHLIGHT_COLOR) < 100);
    }

    #[test]
    fn test_save_png_size() {
        let result = calculate(&BinomialInput::full(BinomialParameters::new(30, 0.2))).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(binomial_image_name(&result));

        save_chart_png(&ChartData::binomial(&result), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        // IHDR width and height
        assert_eq!(u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]), IMAGE_WIDTH);
        assert_eq!(u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]), IMAGE_HEIGHT);
    }

    #[test]
    fn test_empty_chart_is_rejected() {
        let empty = ChartData {
            title: String::new(),
            subtitle: String::new(),
            bars: Vec::new(),
            curve: Vec::new(),
            normal_curve: Vec::new(),
            mean: 0.0,
            std_dev: 0.0,
            max_probability: 0.0,
            x_min: -0.5,
            x_max: 0.5,
            bar_width: 0.7,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacia.png");
        assert!(save_chart_png(&empty, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_default_names() {
        let result = calculate(&BinomialInput::full(BinomialParameters::new(10, 0.5))).unwrap();
        assert_eq!(binomial_image_name(&result), "distribucion_binomial_n10.png");

        let summary = summarize(20, 6, 5, 2).unwrap();
        assert_eq!(hypergeometric_image_name(&summary), "distribucion_hipergeométrica_N20_K6_n5.png");
        // n/N < 0.20 falls back to the binomial model
        let summary = summarize(25, 6, 4, 2).unwrap();
        assert_eq!(hypergeometric_image_name(&summary), "distribucion_binomial_N25_K6_n4.png");
    }

    #[test]
    fn test_image_path() {
        assert_eq!(image_path(Path::new("grafica")), Path::new("grafica.png"));
        assert_eq!(image_path(Path::new("grafica.PNG")), Path::new("grafica.PNG"));
        assert_eq!(image_path(Path::new("grafica.jpg")), Path::new("grafica.png"));
    }
}
