//! Text drawn from fixed, pre-rasterized glyph bitmaps.
//!
//! Glyph tables come from the classic e-paper font set (8, 12, 16, 20 and
//! 24 px tall, fixed advance per size). Each glyph is stored row by row,
//! `ceil(width / 8)` bytes per row, most significant bit first.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;

use super::anchor::{Anchor, HAlign, VAlign};
use super::error::PaintError;
use super::paint::PaintEngine;
use super::pattern::{FillStyle, MixMode};
use super::rect::RectShape;

/// One fixed-size bitmap font.
#[derive(Debug, Clone, Deserialize)]
pub struct BitmapFont {
    /// Advance and bitmap width of every glyph
    pub width: u32,
    /// Glyph height; also the font's size key
    pub height: u32,
    glyphs: HashMap<char, Vec<u8>>,
}

impl BitmapFont {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            glyphs: HashMap::new(),
        }
    }

    /// Parses a `{ "width", "height", "glyphs": { "A": [..] } }` table.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert_glyph(&mut self, ch: char, rows: Vec<u8>) {
        self.glyphs.insert(ch, rows);
    }

    fn row_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Returns true if glyph `ch` has ink at `(x, y)`. Unknown glyphs are blank.
    pub fn is_set(&self, ch: char, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let Some(rows) = self.glyphs.get(&ch) else {
            return false;
        };
        let index = y as usize * self.row_bytes() + x as usize / 8;
        rows.get(index)
            .is_some_and(|byte| byte & (0x80 >> (x % 8)) != 0)
    }
}

/// Bitmap fonts keyed by glyph height.
#[derive(Debug, Clone, Default)]
pub struct BitmapFontSet {
    fonts: BTreeMap<u32, BitmapFont>,
}

impl BitmapFontSet {
    pub fn insert(&mut self, font: BitmapFont) {
        self.fonts.insert(font.height, font);
    }

    pub fn get(&self, size: u32) -> Option<&BitmapFont> {
        self.fonts.get(&size)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Available heights, tallest first.
    pub fn sizes_descending(&self) -> impl Iterator<Item = u32> + '_ {
        self.fonts.keys().rev().copied()
    }

    /// Loads every `*.json` font table from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut set = Self::default();
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read font directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read font {}", path.display()))?;
            let font = BitmapFont::from_json(&json)
                .with_context(|| format!("Failed to parse font {}", path.display()))?;
            debug!(
                "Loaded bitmap font {}x{} from {}",
                font.width,
                font.height,
                path.display()
            );
            set.insert(font);
        }
        info!("Loaded {} bitmap font(s) from {}", set.fonts.len(), dir.display());
        Ok(set)
    }
}

/// Replaces Latin diacritics the bitmap fonts have no glyphs for.
pub fn substitute_diacritics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let replacement = match ch {
            'ä' => "ae",
            'ö' => "oe",
            'ü' => "ue",
            'Ä' => "Ae",
            'Ö' => "Oe",
            'Ü' => "Ue",
            'ß' => "ss",
            'æ' => "ae",
            'Æ' => "Ae",
            'œ' => "oe",
            'Œ' => "Oe",
            'ø' => "oe",
            'Ø' => "Oe",
            'å' => "aa",
            'Å' => "Aa",
            'á' | 'à' | 'â' | 'ã' => "a",
            'é' | 'è' | 'ê' | 'ë' => "e",
            'í' | 'ì' | 'î' | 'ï' => "i",
            'ó' | 'ò' | 'ô' | 'õ' => "o",
            'ú' | 'ù' | 'û' => "u",
            'É' | 'È' | 'Ê' => "E",
            'ç' => "c",
            'ñ' => "n",
            _ => {
                out.push(ch);
                continue;
            }
        };
        out.push_str(replacement);
    }
    out
}

/// Greedy word wrap to at most `line_len` characters per line.
///
/// Breaks at the last space at or before the limit, otherwise hard-breaks.
/// A `line_len` of zero disables wrapping.
pub fn wrap_lines(text: &str, line_len: usize) -> Vec<String> {
    if line_len == 0 {
        return vec![text.to_string()];
    }

    let mut rest: Vec<char> = text.chars().collect();
    let mut lines = Vec::new();
    while rest.len() > line_len {
        match rest[..=line_len].iter().rposition(|&c| c == ' ') {
            Some(space) => {
                lines.push(rest[..space].iter().collect());
                rest.drain(..=space);
            }
            None => {
                lines.push(rest[..line_len].iter().collect());
                rest.drain(..line_len);
            }
        }
    }
    lines.push(rest.into_iter().collect());
    lines
}

/// Requested glyph height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitmapSize {
    Fixed(u32),
    /// Tallest size whose wrapped lines fit the maximum height
    #[default]
    Auto,
}

/// Resolved placement of a bitmap text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapLayout {
    pub size: u32,
    pub glyph_width: i32,
    pub lines: Vec<String>,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Reconfigurable bitmap-font text shape.
#[derive(Debug, Clone)]
pub struct BitmapText {
    text: String,
    x: i32,
    y: i32,
    anchor: Anchor,
    size: BitmapSize,
    max_width: Option<i32>,
    max_height: Option<i32>,
    line_spacing: i32,
}

impl BitmapText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: 0,
            y: 0,
            anchor: Anchor::default(),
            size: BitmapSize::Auto,
            max_width: None,
            max_height: None,
            line_spacing: 0,
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn anchor(mut self, h: HAlign, v: VAlign) -> Self {
        self.anchor = Anchor::new(h, v);
        self
    }

    /// Fixed glyph height in pixels.
    pub fn size(mut self, size: u32) -> Self {
        self.size = BitmapSize::Fixed(size);
        self
    }

    pub fn max_width(mut self, width: i32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn max_height(mut self, height: i32) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn line_spacing(mut self, spacing: i32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn translate(mut self, dx: i32, dy: i32) -> Self {
        self.x += dx;
        self.y += dy;
        self
    }

    fn wrap_for(&self, text: &str, glyph_width: u32) -> Vec<String> {
        let line_len = match self.max_width {
            Some(width) if glyph_width > 0 => (width.max(0) as u32 / glyph_width) as usize,
            _ => 0,
        };
        text.split('\n')
            .flat_map(|paragraph| wrap_lines(paragraph, line_len))
            .collect()
    }

    /// Picks the font, wraps the text and resolves the anchor.
    pub fn layout(&self, fonts: &BitmapFontSet) -> Result<BitmapLayout, PaintError> {
        let text = substitute_diacritics(&self.text);

        let (font, lines) = match self.size {
            BitmapSize::Fixed(size) => {
                let font = fonts.get(size).ok_or(PaintError::MissingBitmapFont(size))?;
                (font, self.wrap_for(&text, font.width))
            }
            BitmapSize::Auto => {
                let mut chosen = None;
                let mut smallest = None;
                for size in fonts.sizes_descending() {
                    let Some(font) = fonts.get(size) else {
                        continue;
                    };
                    let lines = self.wrap_for(&text, font.width);
                    let needed = lines.len() as i32 * size as i32;
                    if chosen.is_none() && self.max_height.is_none_or(|max| needed <= max) {
                        chosen = Some((font, lines.clone()));
                    }
                    smallest = Some((font, lines));
                }
                chosen.or(smallest).ok_or(PaintError::NoBitmapFonts)?
            }
        };

        let glyph_width = font.width as i32;
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
        let width = longest * glyph_width;
        let count = lines.len() as i32;
        let height = count * font.height as i32 + (count - 1).max(0) * self.line_spacing;
        let (left, top) = self.anchor.place(self.x, self.y, width, height);

        Ok(BitmapLayout {
            size: font.height,
            glyph_width,
            lines,
            left,
            top,
            width,
            height,
        })
    }

    /// Measured placement as a rectangle builder.
    pub fn rect(&self, paint: &PaintEngine<'_>) -> Result<RectShape, PaintError> {
        let layout = self.layout(&paint.resources().bitmap_fonts)?;
        Ok(RectShape::new(
            layout.left,
            layout.top,
            layout.width,
            layout.height,
        ))
    }

    /// Paints every glyph pixel with `style`.
    pub fn render(
        self,
        paint: &mut PaintEngine<'_>,
        style: FillStyle,
        mix: MixMode,
    ) -> Result<Self, PaintError> {
        let fonts = paint.resources().bitmap_fonts.clone();
        let layout = self.layout(&fonts)?;
        let font = fonts
            .get(layout.size)
            .ok_or(PaintError::MissingBitmapFont(layout.size))?;

        let line_advance = font.height as i32 + self.line_spacing;
        for (row, line) in layout.lines.iter().enumerate() {
            let top = layout.top + row as i32 * line_advance;
            for (col, ch) in line.chars().enumerate() {
                let left = layout.left + col as i32 * layout.glyph_width;
                for gy in 0..font.height {
                    for gx in 0..font.width {
                        if font.is_set(ch, gx, gy) {
                            paint.paint(left + gx as i32, top + gy as i32, style, mix);
                        }
                    }
                }
            }
        }
        Ok(self)
    }
}
