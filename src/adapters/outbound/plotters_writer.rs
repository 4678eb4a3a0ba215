//! Rasterizes [`Figure`]s with plotters: PNG through the bitmap backend, SVG
//! through the SVG backend (which needs no system fonts).

use crate::common::{RenderError, RenderResult};
use crate::config::OutputFormat;
use crate::domains::layout::{node_radius_px, EdgeRoute, Position2D};
use crate::domains::render::{Canvas, Figure, FigureWriter, Primitive, Rgb, VAnchor};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::debug;

const FONT: &str = "sans-serif";
const SUPTITLE_PT: f64 = 16.0;
/// Gap between a panel title and its plot area, in points.
const TITLE_PAD_PT: f64 = 20.0;
const ARROW_PT: f64 = 10.0;
const ARC_SEGMENTS: usize = 32;

pub struct PlottersFigureWriter {
    format: OutputFormat,
}

impl PlottersFigureWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl FigureWriter for PlottersFigureWriter {
    fn extension(&self) -> &'static str {
        self.format.extension()
    }

    fn write_figure(&self, figure: Figure, path: &Path) -> RenderResult<()> {
        let size = figure.pixel_size();
        debug!(path = %path.display(), width = size.0, height = size.1, "writing figure");
        match self.format {
            OutputFormat::Png if figure.transparent => write_transparent_png(&figure, path),
            OutputFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                paint(&root, &figure, true)
            }
            OutputFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                paint(&root, &figure, !figure.transparent)
            }
        }
    }
}

/// The bitmap backend only paints RGB. Render the figure over white and over
/// black, then recover each pixel's alpha from the difference.
fn write_transparent_png(figure: &Figure, path: &Path) -> RenderResult<()> {
    let (w, h) = figure.pixel_size();
    let on_white = render_rgb(figure, &WHITE)?;
    let on_black = render_rgb(figure, &BLACK)?;
    let rgba = unblend(&on_white, &on_black);
    let pixels = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| RenderError::Backend(format!("pixel buffer does not match {}x{}", w, h)))?;
    pixels
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(backend_err)
}

fn render_rgb(figure: &Figure, background: &RGBColor) -> RenderResult<Vec<u8>> {
    let (w, h) = figure.pixel_size();
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        root.fill(background).map_err(backend_err)?;
        paint(&root, figure, false)?;
    }
    Ok(buf)
}

/// RGBA pixels from the same scene painted over white and over black.
fn unblend(on_white: &[u8], on_black: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(on_white.len() / 3 * 4);
    for (w, b) in on_white.chunks_exact(3).zip(on_black.chunks_exact(3)) {
        let spread: u32 = (0..3).map(|i| w[i].saturating_sub(b[i]) as u32).sum::<u32>() / 3;
        let alpha = 255 - spread.min(255);
        for &c in b {
            let straight = if alpha == 0 { 0 } else { (c as u32 * 255 / alpha).min(255) };
            out.push(straight as u8);
        }
        out.push(alpha as u8);
    }
    out
}

fn backend_err<E: std::fmt::Debug>(e: E) -> RenderError {
    RenderError::Backend(format!("{:?}", e))
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn paint<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure, opaque: bool) -> RenderResult<()> {
    if opaque {
        root.fill(&WHITE).map_err(backend_err)?;
    }
    let (w, h) = root.dim_in_pixel();
    let px_per_pt = figure.dpi / 72.0;

    let mut top = 0.0;
    if let Some(suptitle) = &figure.suptitle {
        let size = SUPTITLE_PT * px_per_pt;
        draw_text(root, suptitle, (w as f64 / 2.0, size * 0.5), size, Rgb::BLACK, VAnchor::Top)?;
        top = size * 2.0;
    }

    let cell_w = w as f64 / figure.cols as f64;
    let cell_h = (h as f64 - top) / figure.rows as f64;
    for row in 0..figure.rows {
        for col in 0..figure.cols {
            let Some(canvas) = figure.panel(row, col) else { continue };
            if canvas.is_blank() {
                continue;
            }
            let cell = PixelRect {
                x: col as f64 * cell_w,
                y: top + row as f64 * cell_h,
                w: cell_w,
                h: cell_h,
            };
            paint_panel(root, canvas, cell, px_per_pt)?;
        }
    }
    root.present().map_err(backend_err)?;
    Ok(())
}

fn paint_panel<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    cell: PixelRect,
    px_per_pt: f64,
) -> RenderResult<()> {
    let title_px = canvas.title_size * px_per_pt;
    let mut title_band = 0.0;
    if let Some(title) = &canvas.title {
        let color = canvas.title_color.unwrap_or(Rgb::BLACK);
        let line_h = title_px * 1.3;
        for (i, line) in title.lines().enumerate() {
            let y = cell.y + title_px * 0.5 + i as f64 * line_h;
            draw_text(root, line, (cell.x + cell.w / 2.0, y), title_px, color, VAnchor::Top)?;
        }
        title_band = title.lines().count() as f64 * line_h + TITLE_PAD_PT * px_per_pt;
    }

    let plot = PixelRect {
        x: cell.x + cell.w * 0.05,
        y: cell.y + title_band,
        w: cell.w * 0.9,
        h: (cell.h - title_band - cell.h * 0.05).max(1.0),
    };
    let transform = PanelTransform::new(plot, canvas.x_limits.unwrap_or((0.0, 1.0)), canvas.y_limits.unwrap_or((0.0, 1.0)));

    for primitive in canvas.primitives() {
        match primitive {
            Primitive::Node { at, size, color } => {
                let (x, y) = transform.apply(*at);
                let r = node_radius_px(*size, px_per_pt * 72.0);
                root.draw(&Circle::new(to_i(x, y), r.round() as i32, rgb(*color).filled()))
                    .map_err(backend_err)?;
            }
            Primitive::Edge { from, to, route, color, node_size } => {
                let start = transform.apply(*from);
                let end = transform.apply(*to);
                let radius = node_radius_px(*node_size, px_per_pt * 72.0);
                let path = match route {
                    EdgeRoute::Straight => vec![start, end],
                    EdgeRoute::Arc { rad } => arc_points(start, end, *rad, ARC_SEGMENTS),
                };
                let path = trim_path(&path, start, end, radius);
                if path.len() < 2 {
                    continue;
                }
                let style = rgb(*color).stroke_width(1);
                root.draw(&PathElement::new(path.iter().map(|p| to_i(p.0, p.1)).collect::<Vec<_>>(), style))
                    .map_err(backend_err)?;
                let tip = path[path.len() - 1];
                let prev = path[path.len() - 2];
                let (left, right) = arrowhead(tip, prev, ARROW_PT * px_per_pt);
                root.draw(&PathElement::new(
                    vec![to_i(left.0, left.1), to_i(tip.0, tip.1), to_i(right.0, right.1)],
                    style,
                ))
                .map_err(backend_err)?;
            }
            Primitive::Text { at, text, size, color, anchor } => {
                let pos = transform.apply(*at);
                draw_text(root, text, pos, size * px_per_pt, *color, *anchor)?;
            }
        }
    }
    Ok(())
}

fn draw_text<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    text: &str,
    at: (f64, f64),
    size_px: f64,
    color: Rgb,
    anchor: VAnchor,
) -> RenderResult<()> {
    let v = match anchor {
        VAnchor::Center => VPos::Center,
        VAnchor::Top => VPos::Top,
    };
    let style = (FONT, size_px)
        .into_font()
        .color(&rgb(color))
        .pos(Pos::new(HPos::Center, v));
    root.draw(&Text::new(text.to_string(), to_i(at.0, at.1), style))
        .map_err(backend_err)
}

fn to_i(x: f64, y: f64) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

#[derive(Debug, Clone, Copy)]
struct PixelRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Data coordinates to pixels; pixel y grows downwards.
#[derive(Debug, Clone, Copy)]
struct PanelTransform {
    rect: PixelRect,
    x_limits: (f64, f64),
    y_limits: (f64, f64),
}

impl PanelTransform {
    fn new(rect: PixelRect, x_limits: (f64, f64), y_limits: (f64, f64)) -> Self {
        Self { rect, x_limits, y_limits }
    }

    fn apply(&self, p: Position2D) -> (f64, f64) {
        let span = |(lo, hi): (f64, f64)| if hi > lo { hi - lo } else { 1.0 };
        let fx = (p.x - self.x_limits.0) / span(self.x_limits);
        let fy = (self.y_limits.1 - p.y) / span(self.y_limits);
        (self.rect.x + fx * self.rect.w, self.rect.y + fy * self.rect.h)
    }
}

/// Quadratic arc between two pixel points. The control point sits off the
/// chord midpoint by `rad` times the chord, rotated a quarter turn; with
/// y pointing down a negative `rad` bows a left-to-right arc upwards.
fn arc_points(start: (f64, f64), end: (f64, f64), rad: f64, segments: usize) -> Vec<(f64, f64)> {
    let (mx, my) = ((start.0 + end.0) / 2.0, (start.1 + end.1) / 2.0);
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let ctrl = (mx - rad * dy, my + rad * dx);
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let u = 1.0 - t;
            (
                u * u * start.0 + 2.0 * u * t * ctrl.0 + t * t * end.0,
                u * u * start.1 + 2.0 * u * t * ctrl.1 + t * t * end.1,
            )
        })
        .collect()
}

/// Clip a path so it starts and ends on the node markers' rims.
fn trim_path(path: &[(f64, f64)], start: (f64, f64), end: (f64, f64), radius: f64) -> Vec<(f64, f64)> {
    if path.len() == 2 {
        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len <= 2.0 * radius {
            return Vec::new();
        }
        let (ux, uy) = (dx / len, dy / len);
        return vec![
            (start.0 + ux * radius, start.1 + uy * radius),
            (end.0 - ux * radius, end.1 - uy * radius),
        ];
    }
    let dist = |a: (f64, f64), b: (f64, f64)| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();
    path.iter()
        .copied()
        .filter(|p| dist(*p, start) >= radius && dist(*p, end) >= radius)
        .collect()
}

/// Open arrowhead wings for a line arriving at `tip` from `from`.
fn arrowhead(tip: (f64, f64), from: (f64, f64), size: f64) -> ((f64, f64), (f64, f64)) {
    let (dx, dy) = (tip.0 - from.0, tip.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-6 {
        return (tip, tip);
    }
    let (ux, uy) = (dx / len, dy / len);
    let base = (tip.0 - ux * size, tip.1 - uy * size);
    let half = size * 0.4;
    ((base.0 - uy * half, base.1 + ux * half), (base.0 + uy * half, base.1 - ux * half))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_flips_y() {
        let t = PanelTransform::new(PixelRect { x: 0.0, y: 0.0, w: 100.0, h: 100.0 }, (0.0, 1.0), (-0.6, 0.4));
        assert_eq!(t.apply(Position2D::new(0.0, 0.4)), (0.0, 0.0));
        let (_, y) = t.apply(Position2D::new(1.0, -0.6));
        assert!((y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn negative_rad_bows_upwards() {
        let pts = arc_points((0.0, 100.0), (200.0, 100.0), -0.25, 8);
        assert_eq!(pts.first(), Some(&(0.0, 100.0)));
        assert_eq!(pts.last(), Some(&(200.0, 100.0)));
        let mid = pts[4];
        assert!((mid.0 - 100.0).abs() < 1e-9);
        assert!(mid.1 < 100.0);
    }

    #[test]
    fn straight_path_trimmed_to_rims() {
        let p = trim_path(&[(0.0, 0.0), (100.0, 0.0)], (0.0, 0.0), (100.0, 0.0), 10.0);
        assert_eq!(p, vec![(10.0, 0.0), (90.0, 0.0)]);
        assert!(trim_path(&[(0.0, 0.0), (15.0, 0.0)], (0.0, 0.0), (15.0, 0.0), 10.0).is_empty());
    }

    #[test]
    fn arrowhead_is_symmetric() {
        let (l, r) = arrowhead((10.0, 0.0), (0.0, 0.0), 5.0);
        assert_eq!(l.0, r.0);
        assert!((l.1 + r.1).abs() < 1e-9);
        assert!(l.0 < 10.0);
    }

    #[test]
    fn unblend_recovers_alpha() {
        // background, opaque red, half-covered gray
        let white = [255, 255, 255, 255, 0, 0, 191, 191, 191];
        let black = [0, 0, 0, 255, 0, 0, 64, 64, 64];
        let rgba = unblend(&white, &black);
        assert_eq!(&rgba[0..4], &[0, 0, 0, 0]);
        assert_eq!(&rgba[4..8], &[255, 0, 0, 255]);
        assert_eq!(rgba[11], 128);
        assert_eq!(&rgba[8..11], &[127, 127, 127]);
    }

    fn node_figure(transparent: bool) -> Figure {
        let mut figure = Figure::single(2.0, 2.0, 50.0);
        figure.transparent = transparent;
        if let Some(canvas) = figure.panel_mut(0, 0) {
            canvas.push(Primitive::Node { at: Position2D::new(0.5, 0.5), size: 500.0, color: Rgb::LIGHT_BLUE });
        }
        figure
    }

    /// Byte 25 of a PNG is the IHDR color type: 2 = RGB, 6 = RGBA.
    fn png_color_type(path: &Path) -> u8 {
        std::fs::read(path).unwrap()[25]
    }

    #[test]
    fn transparent_png_has_alpha_background() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clear.png");
        PlottersFigureWriter::new(OutputFormat::Png)
            .write_figure(node_figure(true), &path)
            .unwrap();
        assert_eq!(png_color_type(&path), 6);

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0)[3], 0);
        let center = decoded.get_pixel(50, 48);
        assert_eq!(center.0, [173, 216, 230, 255]);
    }

    #[test]
    fn opaque_png_stays_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solid.png");
        PlottersFigureWriter::new(OutputFormat::Png)
            .write_figure(node_figure(false), &path)
            .unwrap();
        assert_eq!(png_color_type(&path), 2);
    }

    #[cfg(feature = "render_integration")]
    #[test]
    fn writes_png_and_svg() {
        let dir = tempfile::tempdir().unwrap();
        let mut figure = Figure::single(6.0, 4.0, 100.0);
        figure.suptitle = Some("demo".into());
        let canvas = figure.panel_mut(0, 0).unwrap();
        canvas.title = Some("Optimal - f(x) = 3".into());
        canvas.x_limits = Some((-0.5, 1.5));
        canvas.y_limits = Some((-0.6, 0.4));
        canvas.push(Primitive::Node { at: Position2D::new(0.0, 0.1), size: 500.0, color: Rgb::LIGHT_BLUE });
        canvas.push(Primitive::Text {
            at: Position2D::new(0.0, 0.1),
            text: "1".into(),
            size: 12.0,
            color: Rgb::BLACK,
            anchor: VAnchor::Center,
        });
        for format in [OutputFormat::Png, OutputFormat::Svg] {
            let path = dir.path().join(format!("demo.{}", format.extension()));
            PlottersFigureWriter::new(format).write_figure(figure.clone(), &path).unwrap();
            assert!(path.exists());
        }
    }
}
