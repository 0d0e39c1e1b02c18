use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use thiserror::Error;
use crate::view::{DisplaySlice, ValueWindow};
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to draw figure: {0}")]
    Draw(String),
    #[error("failed to encode figure: {0}")]
    Encode(#[from] image::ImageError),
    #[error("figure size {width}x{height} is not drawable")]
    Size { width: u32, height: u32 },
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Draw(format!("{value:?}"))
    }
}
/// 8-bit gray image of a display slice: one column per trace, one row per sample.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayFrame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>, // row-major, height x width
}
impl GrayFrame {
    /// Keeps every n-th column and row so neither side exceeds `max_side`.
    pub fn decimated(self, max_side: usize) -> GrayFrame {
        let max_side = max_side.max(1);
        let col_step = self.width.div_ceil(max_side).max(1);
        let row_step = self.height.div_ceil(max_side).max(1);
        if col_step == 1 && row_step == 1 {
            return self;
        }
        let width = self.width.div_ceil(col_step);
        let height = self.height.div_ceil(row_step);
        let mut pixels = Vec::with_capacity(width * height);
        for y in (0..self.height).step_by(row_step) {
            let row = &self.pixels[y * self.width..(y + 1) * self.width];
            pixels.extend(row.iter().step_by(col_step).copied());
        }
        GrayFrame {
            width,
            height,
            pixels,
        }
    }
}
fn gray_level(values: &ValueWindow, sample: f32) -> u8 {
    (values.normalize(sample) * 255.0).round() as u8
}
/// Maps the slice through its value window, low -> black and high -> white.
pub fn grayscale_pixels(slice: &DisplaySlice<'_>) -> GrayFrame {
    let (traces, samples) = slice.data.dim();
    let mut pixels = vec![0u8; traces * samples];
    for ((trace, sample), value) in slice.data.indexed_iter() {
        pixels[sample * traces + trace] = gray_level(&slice.values, *value);
    }
    GrayFrame {
        width: traces,
        height: samples,
        pixels,
    }
}
#[derive(Clone, Debug)]
pub struct FigureStyle {
    pub width: u32,
    pub height: u32,
    /// Draw axes, labels and caption. Needs a system font.
    pub annotate: bool,
}
impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            annotate: true,
        }
    }
}
/// Renders the slice with a colour bar beside it and returns PNG bytes.
pub fn render_slice_png(slice: &DisplaySlice<'_>, style: &FigureStyle) -> Result<Vec<u8>, PlotError> {
    if style.width < 200 || style.height < 100 {
        return Err(PlotError::Size {
            width: style.width,
            height: style.height,
        });
    }
    let (traces, samples) = slice.data.dim();
    let values = slice.values;
    let mut buffer = vec![0u8; style.width as usize * style.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&WHITE)?;
        // image and colour bar share the width 20:1, plus room for bar labels
        let bar_width = style.width / 21 + if style.annotate { 50 } else { 0 };
        let (image_area, bar_area) = root.split_horizontally(style.width - bar_width);
        let first = slice.rows.min as f64;
        let mut builder = ChartBuilder::on(&image_area);
        builder.margin(10);
        if style.annotate {
            builder
                .caption(
                    format!("traces {}..={}", slice.rows.min, slice.rows.max),
                    ("sans-serif", 18),
                )
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 40);
        }
        let mut chart = builder
            .build_cartesian_2d(first..first + traces as f64, 0f64..samples as f64)?;
        if style.annotate {
            chart
                .configure_mesh()
                .disable_mesh()
                .x_desc("trace")
                .y_desc("sample")
                .y_label_formatter(&|y| format!("{:.0}", samples as f64 - *y))
                .draw()?;
        }
        // decimate to at most one cell per output pixel
        let col_step = traces.div_ceil(style.width as usize).max(1);
        let row_step = samples.div_ceil(style.height as usize).max(1);
        let cells = (0..traces).step_by(col_step).flat_map(|t| {
            (0..samples).step_by(row_step).map(move |s| (t, s))
        });
        chart.draw_series(cells.map(|(t, s)| {
            let g = gray_level(&values, slice.data[[t, s]]);
            let x0 = first + t as f64;
            let y_top = (samples - s) as f64;
            Rectangle::new(
                [
                    (x0, y_top),
                    (x0 + col_step as f64, y_top - row_step as f64),
                ],
                RGBColor(g, g, g).filled(),
            )
        }))?;
        draw_color_bar(&bar_area, &values, style.annotate)?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    values: &ValueWindow,
    annotate: bool,
) -> Result<(), PlotError>
where
    DB::ErrorType: 'static,
{
    const BANDS: usize = 128;
    let (low, high) = if values.span() > 0.0 {
        (values.low, values.high)
    } else {
        (values.low - 0.5, values.high + 0.5)
    };
    let mut builder = ChartBuilder::on(area);
    builder.margin(4).margin_top(10).margin_bottom(10);
    if annotate {
        builder
            .margin_top(38)
            .set_label_area_size(LabelAreaPosition::Right, 40)
            .set_label_area_size(LabelAreaPosition::Bottom, 40);
    }
    let mut chart = builder.build_cartesian_2d(0f64..1f64, low..high)?;
    if annotate {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(0)
            .draw()?;
    }
    let band = (high - low) / BANDS as f64;
    chart.draw_series((0..BANDS).map(|i| {
        let y0 = low + band * i as f64;
        let g = ((i as f64 + 0.5) / BANDS as f64 * 255.0).round() as u8;
        Rectangle::new([(0.0, y0), (1.0, y0 + band)], RGBColor(g, g, g).filled())
    }))?;
    Ok(())
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PlotError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or(PlotError::Size { width, height })?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
