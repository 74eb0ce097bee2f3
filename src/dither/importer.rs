//! PNG decode, aspect-preserving resample and ordered dithering.

use crate::draw::rect::corner_excluded;
use crate::draw::{IntensityRaster, MixMode, PaintEngine, PixelBuffer};

use super::bayer::{self, BayerMatrix};
use super::error::ImportError;
use super::source::ImageSource;

/// How an image is fitted into its target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Scale to fit entirely inside the box, leaving the rest untouched.
    #[default]
    Contain,
    /// Scale to cover the whole box, cropping the overflow evenly.
    Cover,
}

/// Options applied to one import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DitherOptions {
    pub matrix: BayerMatrix,
    pub fit: FitMode,
    /// Corner rounding applied when compositing (same rule as rectangles)
    pub corner_radius: i32,
}

/// A dithered image ready to be composited into a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitheredImage {
    pixels: PixelBuffer,
    /// Position of the image inside its target box
    offset: (i32, i32),
    corner_radius: i32,
}

impl DitheredImage {
    pub fn width(&self) -> i32 {
        self.pixels.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.pixels.height() as i32
    }

    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Writes every pixel outside the rounded corners into `paint`, with the
    /// target box's top-left corner at `(x, y)`.
    pub fn composite(&self, paint: &mut PaintEngine<'_>, x: i32, y: i32, mix: MixMode) {
        let (w, h) = (self.width(), self.height());
        for py in 0..h {
            for px in 0..w {
                let dx = px.min(w - 1 - px);
                let dy = py.min(h - 1 - py);
                if corner_excluded(dx, dy, self.corner_radius) {
                    continue;
                }
                if let Some(value) = self.pixels.get(px, py) {
                    paint.set_pixel(x + self.offset.0 + px, y + self.offset.1 + py, value, mix);
                }
            }
        }
    }
}

/// Decodes PNG bytes into a Cairo surface.
pub fn decode_png(bytes: &[u8]) -> Result<cairo::ImageSurface, ImportError> {
    let mut reader = bytes;
    let surface = cairo::ImageSurface::create_from_png(&mut reader)?;
    if surface.width() <= 0 || surface.height() <= 0 {
        return Err(ImportError::EmptyImage);
    }
    Ok(surface)
}

/// Scales `source` into a `width × height` box and returns its luma plus its
/// offset inside the box. Transparent areas read as white paper.
pub fn resample(
    source: &cairo::ImageSurface,
    width: i32,
    height: i32,
    fit: FitMode,
) -> Result<(IntensityRaster, (i32, i32)), ImportError> {
    if width <= 0 || height <= 0 {
        return Err(ImportError::InvalidTarget { width, height });
    }
    let (src_w, src_h) = (source.width() as f64, source.height() as f64);
    if src_w <= 0.0 || src_h <= 0.0 {
        return Err(ImportError::EmptyImage);
    }

    let scale_x = width as f64 / src_w;
    let scale_y = height as f64 / src_h;
    let (scale, out_w, out_h) = match fit {
        FitMode::Contain => {
            let scale = scale_x.min(scale_y);
            let out_w = ((src_w * scale).round() as i32).clamp(1, width);
            let out_h = ((src_h * scale).round() as i32).clamp(1, height);
            (scale, out_w, out_h)
        }
        FitMode::Cover => (scale_x.max(scale_y), width, height),
    };
    let offset = ((width - out_w) / 2, (height - out_h) / 2);

    let mut target = cairo::ImageSurface::create(cairo::Format::ARgb32, out_w, out_h)?;
    {
        let ctx = cairo::Context::new(&target)?;
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint()?;
        // center the scaled image; in cover mode this crops both sides evenly
        ctx.translate(
            (out_w as f64 - src_w * scale) / 2.0,
            (out_h as f64 - src_h * scale) / 2.0,
        );
        ctx.scale(scale, scale);
        ctx.set_source_surface(source, 0.0, 0.0)?;
        ctx.source().set_filter(cairo::Filter::Good);
        ctx.paint()?;
    }
    target.flush();

    let stride = target.stride() as usize;
    let data = target.data()?;
    let (w, h) = (out_w as usize, out_h as usize);
    let mut luma = IntensityRaster::new(w, h, 255);
    for y in 0..h {
        for x in 0..w {
            // ARGB32 is stored as native-endian u32: B, G, R, A on little-endian
            let i = y * stride + x * 4;
            let (b, g, r) = (data[i] as f64, data[i + 1] as f64, data[i + 2] as f64);
            let gray = 0.3 * r + 0.59 * g + 0.11 * b;
            luma.data[y * w + x] = gray.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok((luma, offset))
}

/// Decodes, resamples and dithers `bytes` for a `width × height` box.
pub fn import_png(
    bytes: &[u8],
    width: i32,
    height: i32,
    options: DitherOptions,
) -> Result<DitheredImage, ImportError> {
    let surface = decode_png(bytes)?;
    let (luma, offset) = resample(&surface, width, height, options.fit)?;
    let pixels = bayer::dither(&luma, options.matrix);
    log::debug!(
        "Dithered {}x{} image into {}x{} at {:?}",
        surface.width(),
        surface.height(),
        pixels.width(),
        pixels.height(),
        offset
    );
    Ok(DitheredImage {
        pixels,
        offset,
        corner_radius: options.corner_radius,
    })
}

/// Fetches an image and dithers it.
///
/// The fetch is the only suspension point; decoding and dithering finish
/// before the caller gets the pixels to composite.
pub async fn import(
    source: &dyn ImageSource,
    width: i32,
    height: i32,
    options: DitherOptions,
) -> Result<DitheredImage, ImportError> {
    let bytes = source.fetch().await?;
    log::info!(
        "Importing {} ({} bytes) into {}x{}",
        source.describe(),
        bytes.len(),
        width,
        height
    );
    import_png(&bytes, width, height, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::source::MemoryImageSource;
    use crate::draw::paint::tests::test_resources;

    /// Left half black, right half white.
    fn split_png(width: i32, height: i32) -> Vec<u8> {
        let surface = cairo::ImageSurface::create(cairo::Format::Rgb24, width, height).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint().unwrap();
        ctx.set_source_rgb(0.0, 0.0, 0.0);
        ctx.rectangle(0.0, 0.0, width as f64 / 2.0, height as f64);
        ctx.fill().unwrap();
        drop(ctx);
        let mut png = Vec::new();
        surface.write_to_png(&mut png).unwrap();
        png
    }

    fn solid_png(width: i32, height: i32, gray: f64) -> Vec<u8> {
        let surface = cairo::ImageSurface::create(cairo::Format::Rgb24, width, height).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgb(gray, gray, gray);
        ctx.paint().unwrap();
        drop(ctx);
        let mut png = Vec::new();
        surface.write_to_png(&mut png).unwrap();
        png
    }

    #[test]
    fn contain_letterboxes_and_keeps_aspect() {
        let image = import_png(&solid_png(20, 10, 0.0), 10, 10, DitherOptions::default()).unwrap();
        assert_eq!((image.width(), image.height()), (10, 5));
        assert_eq!(image.offset(), (0, 2));
        assert_eq!(image.pixels().get(5, 2), Some(0));
    }

    #[test]
    fn cover_crops_the_center() {
        let options = DitherOptions {
            fit: FitMode::Cover,
            ..Default::default()
        };
        let image = import_png(&split_png(40, 20), 10, 10, options).unwrap();
        assert_eq!((image.width(), image.height()), (10, 10));
        assert_eq!(image.offset(), (0, 0));
        // 40x20 scaled to 20x10, cropped to its middle 10 columns
        assert_eq!(image.pixels().get(1, 5), Some(0));
        assert_eq!(image.pixels().get(8, 5), Some(1));
    }

    #[test]
    fn white_image_stays_white() {
        let image = import_png(&solid_png(8, 8, 1.0), 8, 8, DitherOptions::default()).unwrap();
        assert_eq!(image.pixels().export_packed(), vec![0xFF; 8]);
    }

    #[test]
    fn rejects_garbage_and_empty_boxes() {
        assert!(matches!(
            import_png(b"not a png", 8, 8, DitherOptions::default()),
            Err(ImportError::Decode(_))
        ));
        assert!(matches!(
            import_png(&solid_png(4, 4, 0.0), 0, 8, DitherOptions::default()),
            Err(ImportError::InvalidTarget { width: 0, height: 8 })
        ));
    }

    #[test]
    fn composite_skips_rounded_corners() {
        let options = DitherOptions {
            corner_radius: 4,
            ..Default::default()
        };
        let image = import_png(&solid_png(16, 16, 0.0), 16, 16, options).unwrap();
        let mut buffer = PixelBuffer::new(20, 20);
        let mut paint = PaintEngine::full(&mut buffer, test_resources());
        image.composite(&mut paint, 2, 2, MixMode::Default);
        assert_eq!(buffer.get(2, 2), Some(1));
        assert_eq!(buffer.get(17, 17), Some(1));
        assert_eq!(buffer.get(10, 10), Some(0));
        assert_eq!(buffer.get(2, 10), Some(0));
    }

    #[tokio::test]
    async fn import_fetches_then_dithers() {
        let source = MemoryImageSource::new("memory", solid_png(4, 4, 0.0));
        let image = import(&source, 4, 4, DitherOptions::default()).await.unwrap();
        assert_eq!(image.pixels().export_packed(), vec![0x00, 0x00]);
    }
}
