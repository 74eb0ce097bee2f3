//! Font selection for Pango-rasterized text.

/// Family, weight and style of high-resolution text.
///
/// The pixel size belongs to each text shape and is supplied when the
/// description is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Installed font family, e.g. "Sans" or "DejaVu Serif"
    pub family: String,
    /// "normal", "bold", "light" or a numeric weight
    pub weight: String,
    /// "normal", "italic" or "oblique"
    pub style: String,
}

impl FontDescriptor {
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Same weight and style in another family.
    pub fn with_family(&self, family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..self.clone()
        }
    }

    /// Pango description string such as "Sans Italic Bold 32".
    ///
    /// `normal` style and weight are left out; the size is rounded.
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut words = vec![self.family.clone()];
        for modifier in [&self.style, &self.weight] {
            if !modifier.eq_ignore_ascii_case("normal") {
                words.push(title_case(modifier));
            }
        }
        words.push((size.round() as i32).to_string());
        words.join(" ")
    }

    pub fn to_pango(&self, size: f64) -> pango::FontDescription {
        pango::FontDescription::from_string(&self.to_pango_string(size))
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "bold".to_string(),
            style: "normal".to_string(),
        }
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
