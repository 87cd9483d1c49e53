use plotters::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
pub mod plot;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const X_COLUMN: &str = "EbN0";
pub const Y_COLUMN: &str = "BER";

/// Errors surfaced while loading a csv series or rendering the chart.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: csv::Error },
    #[error("{} has no {column} column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("bad record in {}: {source}", path.display())]
    BadRecord { path: PathBuf, source: csv::Error },
    #[error("{} has no data rows", path.display())]
    Empty { path: PathBuf },
    #[error("could not render chart: {message}")]
    Render { message: String },
    #[error("could not write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

#[derive(Debug, Deserialize)]
struct BerRecord {
    #[serde(rename = "EbN0")]
    ebn0: f64,
    #[serde(rename = "BER")]
    ber: f64,
}

/// The main struct for a BER versus EbN0 measurement series
#[derive(Debug, Clone)]
pub struct BerSeries {
    pub ebn0: Vec<f64>,
    pub ber: Vec<f64>,
}

impl BerSeries {
    pub fn new(capacity: usize) -> BerSeries {
        let ebn0: Vec<f64> = Vec::with_capacity(capacity);
        let ber: Vec<f64> = Vec::with_capacity(capacity);
        BerSeries { ebn0, ber }
    }

    pub fn len(&self) -> usize {
        self.ebn0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ebn0.is_empty()
    }

    /// Init a BerSeries from csv, keeping the rows in file order.
    /// The EbN0 and BER columns are picked by header name,
    /// any other column is ignored.
    /// A cell that does not parse as a float is a hard failure.
    pub fn from_csv(fin: &Path) -> Result<BerSeries, PlotError> {
        let mut reader = csv::Reader::from_path(fin).map_err(|e| PlotError::Read {
            path: fin.to_path_buf(),
            source: e,
        })?;
        let headers = reader
            .headers()
            .map_err(|e| PlotError::Read {
                path: fin.to_path_buf(),
                source: e,
            })?
            .clone();
        for &column in &[X_COLUMN, Y_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(PlotError::MissingColumn {
                    path: fin.to_path_buf(),
                    column,
                });
            }
        }
        let mut series = BerSeries::new(64);
        for record in reader.deserialize() {
            let record: BerRecord = record.map_err(|e| PlotError::BadRecord {
                path: fin.to_path_buf(),
                source: e,
            })?;
            series.ebn0.push(record.ebn0);
            series.ber.push(record.ber);
        }
        if series.is_empty() {
            return Err(PlotError::Empty {
                path: fin.to_path_buf(),
            });
        }
        Ok(series)
    }
}

impl std::fmt::Display for BerSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}\n", X_COLUMN, Y_COLUMN)?;
        for (x, y) in self.ebn0.iter().zip(self.ber.iter()) {
            write!(f, "{},{}\n", x, y)?
        }
        Ok(())
    }
}

/// Styling for the overlay chart, sized for a 300 dpi raster figure.
/// Passed explicitly to [`plot_overlay`] so nothing is configured through
/// global state.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub font_family: &'static str,
    /// axis title size, pixels
    pub axis_font: i32,
    /// tick label size, pixels
    pub tick_font: i32,
    /// legend entry size, pixels
    pub legend_font: i32,
    /// opacity of the major grid lines
    pub grid_major: f64,
    /// opacity of the minor grid lines
    pub grid_minor: f64,
}

impl Default for ChartStyle {
    fn default() -> ChartStyle {
        ChartStyle {
            width: 1920,
            height: 1440,
            font_family: "serif",
            axis_font: 66,
            tick_font: 50,
            legend_font: 58,
            grid_major: 0.35,
            grid_minor: 0.2,
        }
    }
}

/// Draws one semilog-y curve per labeled series on a shared chart and
/// writes the figure to fout, overwriting it if present.
/// The raster format follows the extension of fout.
/// Curves and legend entries keep the slice order.
pub fn plot_overlay(
    curves: &[(BerSeries, String)],
    fout: &Path,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    assert!(!curves.is_empty(), "no curves to draw");
    let (xmin, xmax) = overlay_xrange(curves);
    let (ymin, ymax) = overlay_yrange(curves);
    let mut buffer = vec![0u8; style.width as usize * style.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(40)
            .x_label_area_size(140)
            .y_label_area_size(220)
            .build_cartesian_2d(xmin..xmax, (ymin..ymax).log_scale())
            .map_err(render_err)?;
        chart
            .configure_mesh()
            .bold_line_style(BLACK.mix(style.grid_major))
            .light_line_style(BLACK.mix(style.grid_minor))
            .set_all_tick_mark_size(2)
            .label_style((style.font_family, style.tick_font))
            .axis_desc_style((style.font_family, style.axis_font))
            .x_desc("Γ")
            .y_desc("BER")
            .y_label_formatter(&|y: &f64| format!("{:.0e}", y))
            .draw()
            .map_err(render_err)?;
        for (i, (series, label)) in curves.iter().enumerate() {
            let color = Palette99::pick(i).mix(0.9);
            let points: Vec<(f64, f64)> = series
                .ebn0
                .iter()
                .zip(series.ber.iter())
                .map(|(&x, &y)| (x, y))
                .collect();
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(3)))
                .map_err(render_err)?
                .label(label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 40, y)], color.stroke_width(3))
                });
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((style.font_family, style.legend_font))
            .draw()
            .map_err(render_err)?;
        root.present().map_err(render_err)?;
    }
    // the file is touched only once every curve has drawn cleanly
    image::save_buffer(fout, &buffer, style.width, style.height, image::ColorType::Rgb8).map_err(
        |e| PlotError::Write {
            path: fout.to_path_buf(),
            message: e.to_string(),
        },
    )?;
    Ok(())
}

fn render_err<E: std::error::Error>(e: E) -> PlotError {
    PlotError::Render {
        message: e.to_string(),
    }
}

/// shared x range over all curves, with a margin of a twentieth of the
/// span on each side
fn overlay_xrange(curves: &[(BerSeries, String)]) -> (f64, f64) {
    let mut xmin = f64::INFINITY;
    let mut xmax = f64::NEG_INFINITY;
    for (series, _) in curves {
        let (smin, smax) = min_and_max(&series.ebn0[..]);
        if smin < xmin {
            xmin = smin
        }
        if smax > xmax {
            xmax = smax
        }
    }
    let xspan = xmax - xmin;
    let xmargin = if xspan > 0. { xspan / 20. } else { 0.5 };
    (xmin - xmargin, xmax + xmargin)
}

/// y range for the log axis, only the positive values can sit on it
fn overlay_yrange(curves: &[(BerSeries, String)]) -> (f64, f64) {
    let mut ymin = f64::INFINITY;
    let mut ymax = f64::NEG_INFINITY;
    for (series, _) in curves {
        for &b in series.ber.iter().filter(|&&b| b > 0.) {
            if b < ymin {
                ymin = b
            }
            if b > ymax {
                ymax = b
            }
        }
    }
    if !(ymin.is_finite() && ymax.is_finite()) {
        return (1e-12, 1.0);
    }
    (ymin * 0.5, ymax * 2.0)
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> (T, T) {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => panic!("could not iterate over slice"),
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    return (min, max);
}
