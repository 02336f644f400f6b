//! Hand landmark index contract and detector-output validation.
//!
//! The detector reports 21 points per hand in a fixed semantic order.
//! Only the indices named below are read by the classifier; the rest are
//! carried for completeness.

use crate::geometry::{CanvasSize, NormalizedPoint};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Landmark indices ────────────────────────────────────────────────────

pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks per detected hand.
pub const LANDMARK_COUNT: usize = 21;

/// Maximum number of hands the gesture pipeline considers.
pub const MAX_HANDS: usize = 2;

// ─── Hands ───────────────────────────────────────────────────────────────

/// Exactly 21 normalized landmarks for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks(pub [NormalizedPoint; LANDMARK_COUNT]);

impl HandLandmarks {
    /// Validate a raw landmark list from the detector.
    pub fn from_slice(points: &[NormalizedPoint]) -> Result<Self, String> {
        let arr: [NormalizedPoint; LANDMARK_COUNT] = points.try_into().map_err(|_| {
            format!(
                "expected {LANDMARK_COUNT} landmarks per hand, got {}",
                points.len()
            )
        })?;
        if let Some(i) = arr.iter().position(|p| !p.is_finite()) {
            return Err(format!("landmark {i} has a non-finite coordinate"));
        }
        Ok(Self(arr))
    }

    pub fn get(&self, index: usize) -> NormalizedPoint {
        self.0[index]
    }

    /// Normalized-space distance between two landmarks of this hand.
    pub fn dist(&self, a: usize, b: usize) -> f32 {
        self.0[a].distance(self.0[b])
    }

    pub fn index_tip(&self) -> NormalizedPoint {
        self.0[INDEX_TIP]
    }

    pub fn thumb_tip(&self) -> NormalizedPoint {
        self.0[THUMB_TIP]
    }
}

// ─── Detector output ─────────────────────────────────────────────────────

/// Raw detector output as delivered by the external hand landmarker.
///
/// Nothing about it is trusted: lists may be short, coordinates may be NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Monotonic timestamp of the source camera frame.
    pub timestamp_ms: u64,
    #[serde(default)]
    pub hands: Vec<Vec<NormalizedPoint>>,
}

/// One validated unit of work for the gesture state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureFrame {
    pub hands: SmallVec<[HandLandmarks; MAX_HANDS]>,
    pub canvas: CanvasSize,
    pub timestamp_ms: u64,
}

impl GestureFrame {
    /// A frame in which no hand was detected.
    pub fn empty(canvas: CanvasSize, timestamp_ms: u64) -> Self {
        Self {
            hands: SmallVec::new(),
            canvas,
            timestamp_ms,
        }
    }

    pub fn new(hands: &[HandLandmarks], canvas: CanvasSize, timestamp_ms: u64) -> Self {
        Self {
            hands: hands.iter().copied().collect(),
            canvas,
            timestamp_ms,
        }
    }

    /// Validate detector output against the landmark contract.
    ///
    /// # Errors
    /// Returns a description of the first problem found: too many hands,
    /// a hand with the wrong landmark count, or a non-finite coordinate.
    pub fn from_detection(detection: &DetectionResult, canvas: CanvasSize) -> Result<Self, String> {
        if detection.hands.len() > MAX_HANDS {
            return Err(format!(
                "expected at most {MAX_HANDS} hands, got {}",
                detection.hands.len()
            ));
        }
        let mut hands = SmallVec::new();
        for (i, raw) in detection.hands.iter().enumerate() {
            let hand = HandLandmarks::from_slice(raw).map_err(|e| format!("hand {i}: {e}"))?;
            hands.push(hand);
        }
        Ok(Self {
            hands,
            canvas,
            timestamp_ms: detection.timestamp_ms,
        })
    }

    /// Like [`GestureFrame::from_detection`], but a malformed detection
    /// degrades to an empty frame.
    pub fn from_detection_lossy(detection: &DetectionResult, canvas: CanvasSize) -> Self {
        match Self::from_detection(detection, canvas) {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("rejecting detection @{}ms: {e}", detection.timestamp_ms);
                Self::empty(canvas, detection.timestamp_ms)
            }
        }
    }
}
