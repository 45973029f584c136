//! Static plots of simulation output, one routine per output type.
//!
//! Rendering goes through `plotters` and always produces a PNG; nothing is
//! displayed interactively.

use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::output::{SimulationOutput, TabularOutput};

const IMAGE_SIZE: (u32, u32) = (1000, 800);

/// Half-width used when every point coincides.
const DEGENERATE_HALF_WIDTH: f64 = 0.5;

/// Smallest axis width, relative to its magnitude, that still leaves room for
/// distinct tick positions.
const MIN_RELATIVE_WIDTH: f64 = 1e-14;

/// Three axis ranges sharing one half-width, each centred on its own data.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisBounds {
    pub max_range: f64,
    pub x: Range<f64>,
    pub y: Range<f64>,
    pub z: Range<f64>,
}

impl AxisBounds {
    pub fn centers(&self) -> (f64, f64, f64) {
        let mid = |r: &Range<f64>| r.start / 2.0 + r.end / 2.0;
        (mid(&self.x), mid(&self.y), mid(&self.z))
    }
}

fn extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .try_fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            v.is_finite().then(|| (lo.min(v), hi.max(v)))
        })
        .filter(|(lo, hi)| lo <= hi)
}

/// Equal-scale bounds: every axis spans `2 * max_range`, where `max_range` is
/// half the largest per-axis span.
pub fn equal_axis_bounds(xs: &[f64], ys: &[f64], zs: &[f64]) -> std::result::Result<AxisBounds, String> {
    let (x, y, z) = match (extent(xs), extent(ys), extent(zs)) {
        (Some(x), Some(y), Some(z)) => (x, y, z),
        _ => return Err("trajectory has no finite points".to_string()),
    };

    // Halve before subtracting or adding so finite data never overflows.
    let half_spans = [x, y, z].map(|(lo, hi)| hi / 2.0 - lo / 2.0);
    let mut max_range = half_spans.iter().copied().fold(0.0, f64::max);
    if max_range == 0.0 {
        max_range = DEGENERATE_HALF_WIDTH;
    }

    let around = |(lo, hi): (f64, f64)| {
        let mid = lo / 2.0 + hi / 2.0;
        (mid - max_range)..(mid + max_range)
    };
    let bounds = AxisBounds { max_range, x: around(x), y: around(y), z: around(z) };

    for (axis, r) in [("x", &bounds.x), ("y", &bounds.y), ("z", &bounds.z)] {
        let width = r.end - r.start;
        if !(r.start.is_finite() && r.end.is_finite() && width.is_finite()) {
            return Err(format!("{axis} axis {r:?} exceeds the representable f64 range"));
        }
        if width <= r.start.abs().max(r.end.abs()) * MIN_RELATIVE_WIDTH {
            return Err(format!("{axis} axis {r:?} is too narrow for its magnitude"));
        }
    }
    Ok(bounds)
}

pub fn render(output: &SimulationOutput, output_path: &Path) -> Result<()> {
    match output {
        SimulationOutput::Trajectory(table) => plot_trajectory(table, output_path),
    }
}

pub fn plot_trajectory(table: &TabularOutput, output_path: &Path) -> Result<()> {
    let column = |name: &str| {
        table
            .column(name)
            .ok_or_else(|| Error::render(output_path, format!("missing column '{name}'")))
    };
    let (xs, ys, zs) = (column("x")?, column("y")?, column("z")?);
    let bounds = equal_axis_bounds(xs, ys, zs).map_err(|e| Error::render(output_path, e))?;
    let (cx, cy, cz) = bounds.centers();
    tracing::debug!(max_range = bounds.max_range, cx, cy, cz, "Axis bounds computed.");

    draw_trajectory(xs, ys, zs, &bounds, output_path)
        .map_err(|e| Error::render(output_path, e))
}

fn draw_trajectory(
    xs: &[f64],
    ys: &[f64],
    zs: &[f64],
    bounds: &AxisBounds,
    output_path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let points: Vec<(f64, f64, f64)> = xs
        .iter()
        .zip(ys)
        .zip(zs)
        .map(|((&x, &y), &z)| (x, y, z))
        .collect();
    let (start, end) = match (points.first(), points.last()) {
        (Some(&start), Some(&end)) => (start, end),
        _ => return Err("trajectory has no points".into()),
    };

    let root = BitMapBackend::new(output_path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Trajectory", ("sans-serif", 24))
        .margin(20)
        .build_cartesian_3d(bounds.x.clone(), bounds.y.clone(), bounds.z.clone())?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.3;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(4)
        .draw()?;

    let label_style = ("sans-serif", 16).into_font().color(&BLACK);
    let axis_labels = [
        ("X Position (m)", (bounds.x.end, bounds.y.start, bounds.z.start)),
        ("Y Position (m)", (bounds.x.start, bounds.y.end, bounds.z.start)),
        ("Z Position (m)", (bounds.x.start, bounds.y.start, bounds.z.end)),
    ];
    chart.draw_series(
        axis_labels
            .iter()
            .map(|(text, pos)| Text::new(*text, *pos, label_style.clone())),
    )?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))?
        .label("Trajectory")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));
    chart
        .draw_series(std::iter::once(Circle::new(start, 8, GREEN.filled())))?
        .label("Start")
        .legend(|(x, y)| Circle::new((x + 10, y), 6, GREEN.filled()));
    chart
        .draw_series(std::iter::once(Circle::new(end, 8, RED.filled())))?
        .label("End")
        .legend(|(x, y)| Circle::new((x + 10, y), 6, RED.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
