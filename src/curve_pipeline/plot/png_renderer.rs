//! Line-and-marker chart rendered with `image` + `imageproc`.
//!
//! The title sits above the frame, axis labels and per-stop tick values
//! around it, and the legend (swatch and series label) in the top right
//! corner inside the frame. Text uses the embedded DejaVu Sans face.

use std::path::Path;

use ab_glyph::FontRef;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut,
    draw_text_mut, text_size,
};
use imageproc::rect::Rect;
use tracing::{debug, info, instrument};

use crate::curve_pipeline::common::error::{CurveError, Result};
use crate::curve_pipeline::curves::types::{PlotSeries, Point};
use crate::curve_pipeline::plot::colors::{hex, series_colors};
use crate::curve_pipeline::plot::renderer::{ChartSpec, PlotRenderer};

const FONT_DATA: &[u8] = include_bytes!("../../../assets/DejaVuSans.ttf");

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FOREGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);

const TITLE_SCALE: f32 = 20.0;
const LABEL_SCALE: f32 = 15.0;
const TICK_SCALE: f32 = 12.0;

/// Legend row height and swatch size, in pixels
const LEGEND_ROW: i32 = 18;
const SWATCH: (u32, u32) = (24, 8);
const LEGEND_PADDING: i32 = 6;

/// Upper bound on grid lines per axis
const MAX_GRID_LINES: i64 = 64;

#[derive(Debug, Clone, Copy)]
pub struct PngPlotRenderer {
    /// Space between the canvas edge and the plot frame, in pixels
    pub margin: u32,
    pub marker_radius: i32,
}

impl Default for PngPlotRenderer {
    fn default() -> Self {
        Self {
            margin: 60,
            marker_radius: 4,
        }
    }
}

/// Data range shown inside the frame
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    /// Range over the finite points only; a unit square when there are none.
    fn of(series: &[PlotSeries]) -> Self {
        let mut finite = series.iter().flat_map(|s| &s.points).filter(|p| p.is_finite());
        let Some(first) = finite.next() else {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        };

        let mut b = Self { x_min: first.x, x_max: first.x, y_min: first.y, y_max: first.y };
        for p in finite {
            b.x_min = b.x_min.min(p.x);
            b.x_max = b.x_max.max(p.x);
            b.y_min = b.y_min.min(p.y);
            b.y_max = b.y_max.max(p.y);
        }
        if b.x_max - b.x_min < f64::EPSILON {
            b.x_min -= 0.5;
            b.x_max += 0.5;
        }
        if b.y_max - b.y_min < f64::EPSILON {
            b.y_min -= 0.5;
            b.y_max += 0.5;
        }
        b
    }
}

/// Maps data coordinates into the plot frame
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    bounds: Bounds,
}

impl Frame {
    fn project(&self, p: Point) -> (f32, f32) {
        let b = &self.bounds;
        let x = self.left + (p.x - b.x_min) / (b.x_max - b.x_min) * self.width;
        let y = self.top + self.height - (p.y - b.y_min) / (b.y_max - b.y_min) * self.height;
        (x as f32, y as f32)
    }
}

impl PngPlotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the chart into a new image.
    pub fn draw(&self, chart: &ChartSpec, series: &[PlotSeries]) -> Result<RgbImage> {
        let margin = self.margin;
        if chart.width <= 2 * margin || chart.height <= 2 * margin {
            return Err(CurveError::RenderError(format!(
                "canvas {}x{} leaves no room inside a {}px margin",
                chart.width, chart.height, margin
            )));
        }
        let font = FontRef::try_from_slice(FONT_DATA)
            .map_err(|e| CurveError::RenderError(format!("embedded font: {}", e)))?;

        let mut canvas = RgbImage::from_pixel(chart.width, chart.height, BACKGROUND);
        let frame = Frame {
            left: margin as f64,
            top: margin as f64,
            width: (chart.width - 2 * margin) as f64,
            height: (chart.height - 2 * margin) as f64,
            bounds: Bounds::of(series),
        };

        self.draw_grid(&mut canvas, &frame, &font);
        draw_hollow_rect_mut(
            &mut canvas,
            Rect::at(margin as i32, margin as i32)
                .of_size(chart.width - 2 * margin, chart.height - 2 * margin),
            FOREGROUND,
        );
        self.draw_labels(&mut canvas, chart, &font);

        let colors = series_colors(series.len());
        for (s, &color) in series.iter().zip(&colors) {
            self.draw_series(&mut canvas, &frame, s, color);
        }
        self.draw_legend(&mut canvas, &frame, series, &colors, &font);

        Ok(canvas)
    }

    /// Grid lines at whole numbers, i.e. one per stop on the log2 axes,
    /// with the stop value next to the frame.
    fn draw_grid(&self, canvas: &mut RgbImage, frame: &Frame, font: &FontRef) {
        let b = frame.bounds;
        let (left, right) = (frame.left as f32, (frame.left + frame.width) as f32);
        let (top, bottom) = (frame.top as f32, (frame.top + frame.height) as f32);

        let (x_lo, x_hi) = (b.x_min.ceil() as i64, b.x_max.floor() as i64);
        if x_hi.saturating_sub(x_lo) < MAX_GRID_LINES {
            for x in x_lo..=x_hi {
                let (px, _) = frame.project(Point::new(x as f64, b.y_min));
                draw_line_segment_mut(canvas, (px, top), (px, bottom), GRID);

                let text = x.to_string();
                let (w, _) = text_size(TICK_SCALE, font, &text);
                let tx = px as i32 - w as i32 / 2;
                draw_text_mut(canvas, FOREGROUND, tx, bottom as i32 + 4, TICK_SCALE, font, &text);
            }
        }
        let (y_lo, y_hi) = (b.y_min.ceil() as i64, b.y_max.floor() as i64);
        if y_hi.saturating_sub(y_lo) < MAX_GRID_LINES {
            for y in y_lo..=y_hi {
                let (_, py) = frame.project(Point::new(b.x_min, y as f64));
                draw_line_segment_mut(canvas, (left, py), (right, py), GRID);

                let text = y.to_string();
                let (w, h) = text_size(TICK_SCALE, font, &text);
                let tx = left as i32 - w as i32 - 4;
                draw_text_mut(canvas, FOREGROUND, tx, py as i32 - h as i32 / 2, TICK_SCALE, font, &text);
            }
        }
    }

    /// Title centred above the frame, y label over the y axis, x label
    /// centred below the tick values.
    fn draw_labels(&self, canvas: &mut RgbImage, chart: &ChartSpec, font: &FontRef) {
        let margin = self.margin as i32;
        let width = chart.width as i32;
        let height = chart.height as i32;

        let (w, h) = text_size(TITLE_SCALE, font, &chart.title);
        let y = (margin - h as i32) / 2 - 8;
        draw_text_mut(canvas, FOREGROUND, (width - w as i32) / 2, y.max(0), TITLE_SCALE, font, &chart.title);

        let (_, h) = text_size(LABEL_SCALE, font, &chart.y_label);
        draw_text_mut(canvas, FOREGROUND, 4, margin - h as i32 - 6, LABEL_SCALE, font, &chart.y_label);

        let (w, h) = text_size(LABEL_SCALE, font, &chart.x_label);
        draw_text_mut(
            canvas,
            FOREGROUND,
            (width - w as i32) / 2,
            height - h as i32 - 8,
            LABEL_SCALE,
            font,
            &chart.x_label,
        );
    }

    /// Boxed legend in the top right corner of the frame, one row per series.
    fn draw_legend(
        &self,
        canvas: &mut RgbImage,
        frame: &Frame,
        series: &[PlotSeries],
        colors: &[Rgb<u8>],
        font: &FontRef,
    ) {
        if series.is_empty() {
            return;
        }
        let text_width = series
            .iter()
            .map(|s| text_size(LABEL_SCALE, font, &s.label).0)
            .max()
            .unwrap_or(0) as i32;
        let box_width = 3 * LEGEND_PADDING + SWATCH.0 as i32 + text_width;
        let box_height = 2 * LEGEND_PADDING + LEGEND_ROW * series.len() as i32;

        let right = (frame.left + frame.width) as i32;
        let x = (right - box_width - LEGEND_PADDING).max(frame.left as i32 + 1);
        let y = frame.top as i32 + LEGEND_PADDING;
        let legend = Rect::at(x, y).of_size(box_width.max(1) as u32, box_height.max(1) as u32);
        draw_filled_rect_mut(canvas, legend, BACKGROUND);
        draw_hollow_rect_mut(canvas, legend, FOREGROUND);

        for (i, (s, &color)) in series.iter().zip(colors).enumerate() {
            let row = y + LEGEND_PADDING + i as i32 * LEGEND_ROW;
            let swatch_y = row + (LEGEND_ROW - SWATCH.1 as i32) / 2;
            draw_filled_rect_mut(
                canvas,
                Rect::at(x + LEGEND_PADDING, swatch_y).of_size(SWATCH.0, SWATCH.1),
                color,
            );
            let text_x = x + 2 * LEGEND_PADDING + SWATCH.0 as i32;
            draw_text_mut(canvas, FOREGROUND, text_x, row + 1, LABEL_SCALE, font, &s.label);
        }
    }

    fn draw_series(&self, canvas: &mut RgbImage, frame: &Frame, series: &PlotSeries, color: Rgb<u8>) {
        let mut points: Vec<Point> = series.points.iter().copied().filter(Point::is_finite).collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));

        let projected: Vec<(f32, f32)> = points.into_iter().map(|p| frame.project(p)).collect();
        for pair in projected.windows(2) {
            draw_line_segment_mut(canvas, pair[0], pair[1], color);
        }
        for &(x, y) in &projected {
            draw_hollow_circle_mut(
                canvas,
                (x.round() as i32, y.round() as i32),
                self.marker_radius,
                color,
            );
        }
    }
}

impl PlotRenderer for PngPlotRenderer {
    #[instrument(skip(self, chart, series), fields(series = series.len()))]
    fn render(&self, chart: &ChartSpec, series: &[PlotSeries], output: &Path) -> Result<()> {
        info!("Rendering \"{}\" to {}", chart.title, output.display());

        let canvas = self.draw(chart, series)?;

        for (s, color) in series.iter().zip(series_colors(series.len())) {
            debug!("  {} {} ({} points)", hex(color), s.label, s.points.len());
        }

        canvas
            .save_with_format(output, ImageFormat::Png)
            .map_err(|e| CurveError::RenderError(format!("{}: {}", output.display(), e)))?;

        info!(width = chart.width, height = chart.height, "Plot saved");
        Ok(())
    }
}
