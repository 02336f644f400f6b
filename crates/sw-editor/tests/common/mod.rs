//! Synthetic hand poses for driving the state machine.
//!
//! Each pose places the whole hand around `at` (normalized coordinates)
//! and sets fingertip/PIP offsets so exactly one gesture reads true.

#![allow(dead_code)]

use sw_core::geometry::{CanvasSize, NormalizedPoint};
use sw_core::landmarks::*;

pub const CANVAS: CanvasSize = CanvasSize {
    width: 1000.0,
    height: 1000.0,
};

/// (mcp, pip, tip) for each finger the poses bend.
const FINGERS: [(usize, usize, usize); 4] = [
    (INDEX_MCP, INDEX_PIP, INDEX_TIP),
    (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP),
    (RING_MCP, RING_PIP, RING_TIP),
    (PINKY_MCP, PINKY_PIP, PINKY_TIP),
];

#[derive(Clone, Copy)]
enum Finger {
    Extended,
    Curled,
}

fn build(at: (f32, f32), fingers: [Finger; 4]) -> HandLandmarks {
    let base = NormalizedPoint::new(at.0, at.1);
    let mut pts = [base; LANDMARK_COUNT];
    pts[THUMB_TIP] = NormalizedPoint::new(at.0 - 0.2, at.1);
    for (&(mcp, pip, tip), finger) in FINGERS.iter().zip(fingers) {
        pts[mcp] = base;
        match finger {
            Finger::Extended => {
                pts[pip] = NormalizedPoint::new(at.0, at.1 - 0.05);
                pts[tip] = NormalizedPoint::new(at.0, at.1 - 0.1);
            }
            Finger::Curled => {
                pts[pip] = base;
                pts[tip] = NormalizedPoint::new(at.0, at.1 + 0.01);
            }
        }
    }
    HandLandmarks(pts)
}

/// All four fingers spread.
pub fn open_palm(at: (f32, f32)) -> HandLandmarks {
    build(at, [Finger::Extended; 4])
}

/// Everything curled; no gesture.
pub fn fist(at: (f32, f32)) -> HandLandmarks {
    build(at, [Finger::Curled; 4])
}

/// Index and middle extended, ring and pinky curled.
pub fn victory(at: (f32, f32)) -> HandLandmarks {
    build(
        at,
        [
            Finger::Extended,
            Finger::Extended,
            Finger::Curled,
            Finger::Curled,
        ],
    )
}

/// Index fingertip exactly at `tip`, nothing else going on.
pub fn pointing(tip: (f32, f32)) -> HandLandmarks {
    let mut hand = build((tip.0, tip.1 + 0.1), [
        Finger::Extended,
        Finger::Curled,
        Finger::Curled,
        Finger::Curled,
    ]);
    hand.0[INDEX_TIP] = NormalizedPoint::new(tip.0, tip.1);
    hand
}

/// Thumb and index tips together; the working point is `at`.
pub fn pinch(at: (f32, f32)) -> HandLandmarks {
    let mut hand = fist((at.0, at.1 + 0.1));
    hand.0[INDEX_TIP] = NormalizedPoint::new(at.0 - 0.01, at.1);
    hand.0[THUMB_TIP] = NormalizedPoint::new(at.0 + 0.01, at.1);
    hand
}

/// A one-hand frame.
pub fn one(hand: HandLandmarks, t: u64) -> GestureFrame {
    GestureFrame::new(&[hand], CANVAS, t)
}

/// A two-hand frame with index tips at `a` and `b`.
pub fn two(a: (f32, f32), b: (f32, f32), t: u64) -> GestureFrame {
    let mut h1 = fist((0.5, 0.5));
    let mut h2 = fist((0.5, 0.5));
    h1.0[INDEX_TIP] = NormalizedPoint::new(a.0, a.1);
    h2.0[INDEX_TIP] = NormalizedPoint::new(b.0, b.1);
    GestureFrame::new(&[h1, h2], CANVAS, t)
}

pub fn none(t: u64) -> GestureFrame {
    GestureFrame::empty(CANVAS, t)
}
