/// Normalizes loosely-typed CMS layout hints for a "media + copy" overlay
/// card into a clamped placement on a fixed 6x6 grid.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of columns and rows in the placement grid. Coordinates are
/// 1-indexed and half-open, so valid spans satisfy
/// `1 <= start < end <= GRID_SIZE + 1`.
pub const GRID_SIZE: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayTheme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayBackground {
    None,
    ScrimLight,
    ScrimDark,
    Panel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardWidth {
    Narrow,
    Medium,
    Wide,
}

/// Fallbacks applied when a hint is missing or malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayDefaults {
    pub column_start: u32,
    pub column_span: u32,
    pub row_start: u32,
    pub row_span: u32,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub theme: OverlayTheme,
    pub background: OverlayBackground,
    pub card_width: CardWidth,
}

impl Default for OverlayDefaults {
    fn default() -> Self {
        Self {
            column_start: 2,
            column_span: 3,
            row_start: 4,
            row_span: 2,
            text_align: TextAlign::Left,
            vertical_align: VerticalAlign::Start,
            theme: OverlayTheme::Light,
            background: OverlayBackground::ScrimDark,
            card_width: CardWidth::Medium,
        }
    }
}

/// A fully-populated, internally consistent placement descriptor.
/// End coordinates are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPlacement {
    pub column_start: u32,
    pub column_end: u32,
    pub row_start: u32,
    pub row_end: u32,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub theme: OverlayTheme,
    pub background: OverlayBackground,
    pub card_width: CardWidth,
}

impl OverlayPlacement {
    /// Build a placement from an optional hint object. Every validation
    /// failure degrades to the corresponding default; the result always
    /// satisfies `1 <= start < end <= GRID_SIZE + 1` on both axes.
    pub fn from_hints(hints: Option<&Value>, defaults: &OverlayDefaults) -> Self {
        let empty = Map::new();
        let hints = match hints {
            Some(Value::Object(map)) => map,
            _ => &empty,
        };

        let column_start = grid_coordinate(hints.get("columnStart"), defaults.column_start);
        let row_start = grid_coordinate(hints.get("rowStart"), defaults.row_start);

        let column_span = grid_coordinate(hints.get("columnSpan"), defaults.column_span);
        let row_span = grid_coordinate(hints.get("rowSpan"), defaults.row_span);

        // A span that is valid on its own can still overflow from a late
        // start; the end coordinate is capped at the grid boundary.
        let column_end = (column_start + column_span).min(GRID_SIZE + 1);
        let row_end = (row_start + row_span).min(GRID_SIZE + 1);

        Self {
            column_start,
            column_end,
            row_start,
            row_end,
            text_align: enum_hint(hints.get("textAlign"), defaults.text_align),
            vertical_align: enum_hint(hints.get("verticalAlign"), defaults.vertical_align),
            theme: enum_hint(hints.get("theme"), defaults.theme),
            background: enum_hint(hints.get("background"), defaults.background),
            card_width: enum_hint(hints.get("cardWidth"), defaults.card_width),
        }
    }
}

/// Numeric hint validation: accepts numbers and numeric strings, rounds,
/// and clamps into `[1, GRID_SIZE]`. Anything non-finite uses the default,
/// which is clamped the same way since configured defaults are untrusted.
fn grid_coordinate(value: Option<&Value>, default: u32) -> u32 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(number) if number.is_finite() => {
            let rounded = number.round();
            if rounded < 1.0 {
                1
            } else if rounded > GRID_SIZE as f64 {
                GRID_SIZE
            } else {
                rounded as u32
            }
        }
        _ => default.clamp(1, GRID_SIZE),
    }
}

fn enum_hint<T: DeserializeOwned + Copy>(value: Option<&Value>, default: T) -> T {
    value
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or(default)
}
