//! Stroke style resolution for reachability features
//!
//! The color rule is deliberately simple: the palette is indexed by the
//! parity of the feature's rounded perimeter in meters. Parity carries no
//! cartographic meaning and does not track threshold order; the rule is
//! kept as-is rather than replaced with a threshold-to-color table.

use crate::layers::base::{Color, StrokeStyle};
use crate::layers::reachability::IsolineFeature;

pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;

pub const DEFAULT_PALETTE: [Color; 2] = [Color::rgb(0, 128, 0), Color::rgb(0, 0, 0)];

/// Resolves the stroke for a feature. Pure: the result depends only on the
/// feature's perimeter and the given palette, so it is safe to call on
/// every redraw. Features without computable geometry take palette index 0.
pub fn stroke_of(feature: &IsolineFeature, palette: &[Color; 2], width: f32) -> StrokeStyle {
    let index = feature
        .perimeter_m()
        .map(|length| (length.round() as u64 % palette.len() as u64) as usize)
        .unwrap_or(0);

    StrokeStyle {
        color: palette[index],
        width,
    }
}
