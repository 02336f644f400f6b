//! Document commands.
//!
//! The state machine decides *what* happens to the drawing as a list of
//! `DocCommand`s; `apply` is the single place they touch the document.

use sw_core::geometry::Point;
use sw_core::model::{Color, Document};

#[derive(Debug, Clone, PartialEq)]
pub enum DocCommand {
    StartStroke {
        origin: Point,
        color: Color,
        width: f32,
        is_eraser: bool,
    },
    ExtendStroke {
        point: Point,
    },
    EraseNear {
        center: Point,
        radius: f32,
    },
    Rescale {
        center: Point,
        factor: f32,
    },
    /// Turn strokes into particles, then trim the buffer to `max_particles`.
    Dissolve {
        max_particles: usize,
    },
    Clear,
}

/// Apply one command. Returns how many items it affected: points added
/// or erased, or particles produced.
pub fn apply(doc: &mut Document, command: DocCommand) -> usize {
    log::trace!("apply {command:?}");
    match command {
        DocCommand::StartStroke {
            origin,
            color,
            width,
            is_eraser,
        } => {
            doc.start_stroke(origin, color, width, is_eraser);
            1
        }
        DocCommand::ExtendStroke { point } => usize::from(doc.extend_active_stroke(point)),
        DocCommand::EraseNear { center, radius } => doc.erase_near(center, radius),
        DocCommand::Rescale { center, factor } => {
            doc.rescale_about(center, factor);
            doc.strokes.len()
        }
        DocCommand::Dissolve { max_particles } => {
            let produced = doc.dissolve_all();
            doc.cap_particles(max_particles);
            produced
        }
        DocCommand::Clear => {
            let n = doc.strokes.len();
            doc.clear_all();
            n
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_on_empty_reports_nothing_done() {
        let mut doc = Document::new();
        let n = apply(
            &mut doc,
            DocCommand::ExtendStroke {
                point: Point::new(1.0, 1.0),
            },
        );
        assert_eq!(n, 0);
        assert!(doc.strokes.is_empty());
    }

    #[test]
    fn dissolve_respects_cap() {
        let mut doc = Document::with_seed(2);
        doc.start_stroke(Point::default(), Color::RED, 10.0, false);
        for i in 1..30 {
            doc.extend_active_stroke(Point::new(i as f32, 0.0));
        }
        let produced = apply(&mut doc, DocCommand::Dissolve { max_particles: 4 });
        assert_eq!(produced, 6);
        assert_eq!(doc.particles.len(), 4);
    }

    #[test]
    fn clear_removes_strokes() {
        let mut doc = Document::new();
        doc.start_stroke(Point::default(), Color::RED, 10.0, false);
        assert_eq!(apply(&mut doc, DocCommand::Clear), 1);
        assert!(doc.is_empty());
    }
}
