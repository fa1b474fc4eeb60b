use super::super::domain::{Axis, AxisPair, AxisScores, DiagnosisLabel};

/// Normalized floor that switches tie handling to the high-performance
/// order.
pub(crate) const HIGH_BAND_FLOOR: u8 = 80;

/// Two lowest normalized scores within this distance of each other produce
/// a mixed label.
pub(crate) const MIX_THRESHOLD: u8 = 5;

/// Tie order while any axis sits below the high band: the continuity axis
/// absorbs ties so sustainability risk surfaces first.
const STANDARD_TIE_ORDER: [Axis; 4] = [
    Axis::Continuity,
    Axis::Strategy,
    Axis::Production,
    Axis::Improvement,
];

/// Tie order once every axis clears the high band, inverted so strong
/// performers are not always pointed at the same axis.
const HIGH_TIE_ORDER: [Axis; 4] = [
    Axis::Improvement,
    Axis::Continuity,
    Axis::Production,
    Axis::Strategy,
];

pub(crate) fn in_high_band(normalized: &AxisScores) -> bool {
    normalized
        .values()
        .into_iter()
        .all(|score| score >= HIGH_BAND_FLOOR)
}

/// First axis in the band-appropriate priority order whose raw score
/// matches the minimum.
pub(crate) fn lowest_axis(raw: &AxisScores, normalized: &AxisScores) -> Axis {
    let order = if in_high_band(normalized) {
        HIGH_TIE_ORDER
    } else {
        STANDARD_TIE_ORDER
    };

    let mut lowest = order[0];
    for axis in order.into_iter().skip(1) {
        if raw.get(axis) < raw.get(lowest) {
            lowest = axis;
        }
    }
    lowest
}

pub(crate) fn assign(
    normalized: &AxisScores,
    lowest_axis: Axis,
    is_zero_score: bool,
    is_excellent: bool,
) -> DiagnosisLabel {
    if is_zero_score {
        return DiagnosisLabel::Beginner;
    }
    if is_excellent {
        return DiagnosisLabel::Balanced;
    }

    // Stable sort: axes tied on score keep canonical order.
    let mut ranked: Vec<(Axis, u8)> = normalized.iter().collect();
    ranked.sort_by_key(|(_, score)| *score);

    let (lowest, low_score) = ranked[0];
    let (runner_up, runner_score) = ranked[1];
    let gap = runner_score - low_score;

    if gap > 0 && gap <= MIX_THRESHOLD {
        if let Some(pair) = AxisPair::new(lowest, runner_up) {
            return DiagnosisLabel::Mixed(pair);
        }
    }

    DiagnosisLabel::Weakness(lowest_axis)
}
