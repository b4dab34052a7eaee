use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use printpdf::{BuiltinFont, ParsedFont};
use tracing::warn;

const BUILTIN_FONT_COUNT: usize = 14;

// The built-in faces cover the Windows-1252 repertoire, which ends at U+2122.
const MEASURED_CHARACTERS: RangeInclusive<char> = ' '..='\u{2122}';

static WIDTHS: [OnceLock<GlyphWidths>; BUILTIN_FONT_COUNT] = [const { OnceLock::new() }; BUILTIN_FONT_COUNT];

/// Advance widths of one built-in face, in font units.
struct GlyphWidths {
    units_per_em: f32,
    space: f32,
    advances: HashMap<char, f32>
}

impl GlyphWidths {
    /// Measures the face printpdf embeds for `font`.
    fn load(font: BuiltinFont) -> Self {
        let subset = font.get_subset_font();

        let Some(parsed) = ParsedFont::from_bytes(&subset.bytes, 0, &mut Vec::new()) else {
            warn!("Built-in font [{}] could not be parsed; text is measured at half an em per character", font.get_id());
            return Self { units_per_em: 2.0, space: 1.0, advances: HashMap::new() };
        };

        let units_per_em = f32::from(parsed.font_metrics.units_per_em);

        // Glyphs without an outline, such as space, carry no decoded advance.
        let advances = MEASURED_CHARACTERS
            .filter_map(|character| {
                let glyph = parsed.lookup_glyph_index(character as u32)?;
                let advance = parsed.get_horizontal_advance(glyph);
                (advance > 0).then_some((character, f32::from(advance)))
            })
            .collect();

        Self {
            units_per_em,
            space: parsed.get_space_width().map_or(units_per_em / 4.0, |width| width as f32),
            advances
        }
    }

    fn advance(&self, character: char) -> f32 {
        match self.advances.get(&character) {
            Some(advance) => *advance,
            None if character.is_whitespace() => self.space,
            None => self.units_per_em / 2.0
        }
    }
}

fn widths(font: BuiltinFont) -> &'static GlyphWidths {
    WIDTHS[font.get_num()].get_or_init(|| GlyphWidths::load(font))
}

/// Width of `text` in points when set in `font` at `size`.
pub fn text_width(text: &str, font: BuiltinFont, size: f32) -> f32 {
    let widths = widths(font);
    let units: f32 = text.chars().map(|character| widths.advance(character)).sum();

    units * size / widths.units_per_em
}

/// Greedy word wrap to `max_width` points. Words wider than a line are split between characters.
///
/// Always yields at least one line so empty text still occupies space.
pub fn wrap_text(text: &str, font: BuiltinFont, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() { word.to_string() } else { format!("{current} {word}") };

        if text_width(&candidate, font, size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        for character in word.chars() {
            current.push(character);

            if text_width(&current, font, size) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(character);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}
