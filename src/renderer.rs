use crate::error::ExportError;
use crate::geometry::{CellPos, cell_top_left, row_offset};
use crate::pattern::Pattern;
use egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

pub const BACKGROUND_COLOR: Color32 = Color32::WHITE;
pub const OUTLINE_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

/// Outline thickness and bead inset, in logical pixels.
const OUTLINE_WIDTH: f32 = 1.0;
const BEAD_INSET: f32 = 1.0;

/// An RGBA buffer that is drawn on in logical pixels.
///
/// The logical-to-physical scale is fixed when the surface is created, so all
/// drawing calls stay in the same coordinates as the geometry functions.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    pixels_per_point: f32,
}

impl RasterSurface {
    /// A transparent surface covering `logical_size` at `pixels_per_point`.
    /// Always at least one physical pixel per side.
    pub fn new(logical_size: Vec2, pixels_per_point: f32) -> Self {
        let pixels_per_point = if pixels_per_point.is_finite() && pixels_per_point > 0.0 {
            pixels_per_point
        } else {
            1.0
        };
        let width = (logical_size.x * pixels_per_point).ceil().max(1.0) as u32;
        let height = (logical_size.y * pixels_per_point).ceil().max(1.0) as u32;
        Self {
            image: RgbaImage::new(width, height),
            pixels_per_point,
        }
    }

    pub fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Color of the physical pixel under a logical position, if it is on the surface.
    pub fn pixel_at(&self, logical: egui::Pos2) -> Option<Color32> {
        let x = (logical.x * self.pixels_per_point).floor();
        let y = (logical.y * self.pixels_per_point).floor();
        if x < 0.0 || y < 0.0 || x >= self.image.width() as f32 || y >= self.image.height() as f32 {
            return None;
        }
        let [r, g, b, a] = self.image.get_pixel(x as u32, y as u32).0;
        Some(Color32::from_rgba_unmultiplied(r, g, b, a))
    }

    /// Fills a logical rectangle, clipped to the surface. Translucent colors
    /// are blended over what is already there.
    pub fn fill_rect(&mut self, rect: Rect, color: Color32) {
        let (x0, x1) = self.physical_span(rect.min.x, rect.max.x, self.image.width());
        let (y0, y1) = self.physical_span(rect.min.y, rect.max.y, self.image.height());
        let [r, g, b, a] = color.to_srgba_unmultiplied();

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel = self.image.get_pixel_mut(x, y);
                *pixel = if a == u8::MAX {
                    Rgba([r, g, b, a])
                } else {
                    blend(*pixel, [r, g, b, a])
                };
            }
        }
    }

    /// The whole surface in logical pixels, including any partial last pixel.
    pub fn logical_rect(&self) -> Rect {
        let (width, height) = self.image.dimensions();
        Rect::from_min_size(
            Pos2::ZERO,
            vec2(width as f32, height as f32) / self.pixels_per_point,
        )
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn physical_span(&self, from: f32, to: f32, limit: u32) -> (u32, u32) {
        let to_physical = |v: f32| (v * self.pixels_per_point).round().clamp(0.0, limit as f32) as u32;
        (to_physical(from), to_physical(to))
    }
}

fn blend(dst: Rgba<u8>, src: [u8; 4]) -> Rgba<u8> {
    let alpha = src[3] as f32 / 255.0;
    let mix = |s: u8, d: u8| (s as f32 * alpha + d as f32 * (1.0 - alpha)).round() as u8;
    let out_alpha = (src[3] as f32 + dst[3] as f32 * (1.0 - alpha)).round() as u8;
    Rgba([mix(src[0], dst[0]), mix(src[1], dst[1]), mix(src[2], dst[2]), out_alpha])
}

/// Parses a cell's color string. Anything `Color32::from_hex` rejects draws as empty.
pub fn parse_cell_color(color: &str) -> Option<Color32> {
    Color32::from_hex(color.trim()).ok()
}

/// Emits the shapes of the part of `pattern` that touches `area`, back to
/// front, in logical pixels relative to the pattern's top-left corner.
///
/// Each stored row is a gray band; every cell's interior is then covered by
/// its bead, or by the background when empty. Interiors are inset by the
/// outline width, so the band shows through as a 1px outline on each cell.
fn layout(pattern: &Pattern, area: Rect, mut draw: impl FnMut(Rect, Color32)) {
    if pattern.cell == 0 {
        return;
    }
    let cell = pattern.cell as f32;
    let rows = pattern.grid.rows();

    let first_row = (area.min.y / cell).floor().max(0.0) as usize;
    let end_row = ((area.max.y / cell).ceil().max(0.0) as usize).min(rows.len());

    for (row, cells) in rows.iter().enumerate().take(end_row).skip(first_row) {
        let offset = row_offset(pattern.stitch, row, pattern.cell);
        let band = Rect::from_min_size(
            pos2(offset, row as f32 * cell),
            vec2(cells.len() as f32 * cell, cell),
        );
        draw(band, OUTLINE_COLOR);

        let first_col = ((area.min.x - offset) / cell).floor().max(0.0) as usize;
        let end_col = (((area.max.x - offset) / cell).ceil().max(0.0) as usize).min(cells.len());

        for (col, value) in cells.iter().enumerate().take(end_col).skip(first_col) {
            let top_left = cell_top_left(pattern.stitch, CellPos::new(row, col), pattern.cell);
            let outline = Rect::from_min_size(top_left, vec2(cell, cell));
            let interior = outline.shrink(OUTLINE_WIDTH);
            if !interior.is_positive() {
                continue;
            }
            let bead = value.as_deref().and_then(parse_cell_color);
            if !bead.is_some_and(|fill| fill.is_opaque()) {
                draw(interior, BACKGROUND_COLOR);
            }
            if let Some(fill) = bead {
                draw(outline.shrink(BEAD_INSET), fill);
            }
        }
    }
}

/// Paints a whole pattern onto `surface`: white background, a gray outline
/// for every stored cell, and an inset square for every bead.
///
/// Repainting the same pattern onto the same surface gives identical pixels.
pub fn render(pattern: &Pattern, surface: &mut RasterSurface) {
    let whole = surface.logical_rect();
    surface.fill_rect(whole, BACKGROUND_COLOR);
    layout(pattern, whole, |rect, color| surface.fill_rect(rect, color));
}

/// Draws the pattern on screen with its top-left corner at `origin`.
///
/// Only cells inside the painter's clip rect are emitted, so the cost per
/// frame follows the visible area rather than the grid size.
pub fn paint(painter: &egui::Painter, origin: Pos2, pattern: &Pattern) {
    let bounds = Rect::from_min_size(Pos2::ZERO, pattern.pixel_size());
    let visible = painter
        .clip_rect()
        .translate(-origin.to_vec2())
        .intersect(bounds);
    if !visible.is_positive() {
        return;
    }
    painter.rect_filled(bounds.translate(origin.to_vec2()), 0.0, BACKGROUND_COLOR);
    layout(pattern, visible, |rect, color| {
        painter.rect_filled(rect.translate(origin.to_vec2()), 0.0, color);
    });
}

/// Scale that keeps an exported raster within `max_side` pixels per side.
pub fn fit_pixels_per_point(logical_size: Vec2, requested: f32, max_side: usize) -> f32 {
    let longest = logical_size.x.max(logical_size.y);
    if longest <= 0.0 {
        return requested;
    }
    requested.min(max_side as f32 / longest)
}

/// PNG bytes of the pattern at `pixels_per_point`.
pub fn export_png(pattern: &Pattern, pixels_per_point: f32) -> Result<Vec<u8>, ExportError> {
    let mut surface = RasterSurface::new(pattern.pixel_size(), pixels_per_point);
    render(pattern, &mut surface);
    surface.encode_png()
}
