//! Gesture classifier: one hand's landmarks → discrete gesture signals.
//!
//! All measurements are taken in normalized detector space so the
//! thresholds hold regardless of canvas resolution. The y axis grows
//! downward, so "above" means a smaller y.

use crate::landmarks::*;

/// Palm-open spread threshold (fingertip to knuckle).
pub const PALM_THRESHOLD: f32 = 0.03;

/// Pinch threshold (index tip to thumb tip).
pub const PINCH_THRESHOLD: f32 = 0.1;

/// Distance thresholds used by the classifier, in normalized units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    pub palm: f32,
    pub pinch: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            palm: PALM_THRESHOLD,
            pinch: PINCH_THRESHOLD,
        }
    }
}

/// Per-frame gesture signals for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureSignals {
    pub palm_open: bool,
    pub pinch: bool,
    pub victory: bool,
}

/// Fingertip/knuckle pairs for index, middle, ring, pinky.
const SPREAD_PAIRS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_MCP),
    (RING_TIP, RING_MCP),
    (PINKY_TIP, PINKY_MCP),
];

/// All four fingers spread away from their knuckles.
pub fn is_palm_open(hand: &HandLandmarks, threshold: f32) -> bool {
    SPREAD_PAIRS
        .iter()
        .all(|&(tip, mcp)| hand.dist(tip, mcp) > threshold)
}

/// Index tip close to thumb tip.
pub fn is_pinch(hand: &HandLandmarks, threshold: f32) -> bool {
    hand.dist(INDEX_TIP, THUMB_TIP) < threshold
}

/// Index and middle extended, ring curled.
pub fn is_victory(hand: &HandLandmarks) -> bool {
    let y = |i: usize| hand.get(i).y;
    y(INDEX_TIP) < y(INDEX_PIP) && y(MIDDLE_TIP) < y(MIDDLE_PIP) && y(RING_TIP) > y(RING_PIP)
}

/// Evaluate every gesture for one hand.
pub fn classify(hand: &HandLandmarks, thresholds: GestureThresholds) -> GestureSignals {
    GestureSignals {
        palm_open: is_palm_open(hand, thresholds.palm),
        pinch: is_pinch(hand, thresholds.pinch),
        victory: is_victory(hand),
    }
}
