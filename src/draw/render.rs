//! Cairo/Pango backends: text coverage rasterization and PNG previews.

use std::io::Write;
use std::path::Path;

use super::buffer::{IntensityRaster, PixelBuffer};
use super::error::PaintError;
use super::text::{TextRasterizer, TextRequest};

/// Renders text through Pango onto an 8-bit alpha surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct PangoRasterizer;

impl PangoRasterizer {
    pub fn new() -> Self {
        Self
    }
}

fn configure_layout(ctx: &cairo::Context, request: &TextRequest<'_>) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&request.font.to_pango(request.size)));
    if let Some(width) = request.max_width {
        layout.set_width(width.max(1) * pango::SCALE);
        layout.set_wrap(pango::WrapMode::WordChar);
    }
    layout.set_text(request.text);
    layout
}

impl TextRasterizer for PangoRasterizer {
    fn rasterize(&self, request: &TextRequest<'_>) -> Result<IntensityRaster, PaintError> {
        if request.text.is_empty() {
            return Ok(IntensityRaster::new(0, 0, 0));
        }

        // Measure on a throwaway surface first so the real one can be cropped to ink.
        let probe = cairo::ImageSurface::create(cairo::Format::A8, 1, 1)?;
        let (ink_x, ink_y, ink_width, ink_height) = {
            let ctx = cairo::Context::new(&probe)?;
            let layout = configure_layout(&ctx, request);
            let (ink, _logical) = layout.pixel_extents();
            (ink.x(), ink.y(), ink.width(), ink.height())
        };
        if ink_width <= 0 || ink_height <= 0 {
            return Ok(IntensityRaster::new(0, 0, 0));
        }

        let mut surface = cairo::ImageSurface::create(cairo::Format::A8, ink_width, ink_height)?;
        {
            let ctx = cairo::Context::new(&surface)?;
            ctx.set_antialias(cairo::Antialias::Gray);
            let layout = configure_layout(&ctx, request);
            ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
            ctx.move_to(-ink_x as f64, -ink_y as f64);
            pangocairo::functions::show_layout(&ctx, &layout);
        }
        surface.flush();

        let stride = surface.stride() as usize;
        let (width, height) = (ink_width as usize, ink_height as usize);
        let data = surface.data()?;
        let mut raster = IntensityRaster::new(width, height, 0);
        for (row, line) in raster.data.chunks_exact_mut(width).enumerate() {
            line.copy_from_slice(&data[row * stride..row * stride + width]);
        }
        Ok(raster)
    }
}

/// Encodes a two-tone PNG of `buffer` (white paper, black ink).
pub fn encode_preview<W: Write>(buffer: &PixelBuffer, out: &mut W) -> Result<(), PaintError> {
    let mut surface = cairo::ImageSurface::create(
        cairo::Format::Rgb24,
        buffer.width() as i32,
        buffer.height() as i32,
    )?;
    let stride = surface.stride() as usize;
    {
        let mut data = surface.data()?;
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let tone = match buffer.get(x as i32, y as i32) {
                    Some(1) => 0xFF,
                    _ => 0x00,
                };
                let offset = y * stride + x * 4;
                data[offset..offset + 3].fill(tone);
                data[offset + 3] = 0xFF;
            }
        }
    }
    surface.mark_dirty();
    surface.write_to_png(out)?;
    Ok(())
}

/// Writes a preview PNG to `path`.
pub fn write_preview(buffer: &PixelBuffer, path: &Path) -> Result<(), PaintError> {
    let mut file = std::fs::File::create(path)?;
    encode_preview(buffer, &mut file)?;
    log::info!("Saved preview to {}", path.display());
    Ok(())
}
