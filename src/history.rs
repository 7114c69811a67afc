// Undo log of finalized strokes, plus the canvas that caches them.
// The canvas always equals "bake every stroke here, in order, onto transparent".

use crate::canvas::Canvas;
use crate::stroke::Stroke;

pub struct UndoHistory {
    strokes: Vec<Stroke>,
    canvas: Canvas,
}

impl UndoHistory {
    pub fn new(width: usize, height: usize) -> Self {
        Self { strokes: Vec::new(), canvas: Canvas::new(width, height) }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    #[cfg(test)]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Append a finalized stroke and bake it incrementally.
    pub fn push(&mut self, stroke: Stroke) {
        self.canvas.bake(&stroke);
        self.strokes.push(stroke);
    }

    /// Drop the newest stroke and rebuild the canvas from what remains.
    /// Blended pixels can't be un-blended, so a full replay is the only way.
    /// Returns the removed stroke; `None` (and no change) when empty.
    pub fn undo(&mut self) -> Option<Stroke> {
        let removed = self.strokes.pop()?;
        self.canvas.rebuild_from(&self.strokes);
        Some(removed)
    }

    /// Forget every stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.canvas.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Point};

    fn stroke(color: Color, radius: u32, pts: &[(i32, i32)]) -> Stroke {
        let mut s = Stroke::new(color, radius);
        for &(x, y) in pts {
            s.push(Point::new(x, y));
        }
        s
    }

    fn sample_strokes() -> Vec<Stroke> {
        vec![
            stroke(Color::RED, 4, &[(5, 5), (8, 8), (11, 11), (14, 14)]),
            stroke(Color::GREEN.with_alpha(120), 6, &[(20, 4), (16, 10), (12, 16)]),
            stroke(Color::BLUE, 2, &[(0, 12), (6, 12), (12, 12), (18, 12), (24, 12)]),
            stroke(Color::WHITE.with_alpha(60), 5, &[(12, 12)]),
        ]
    }

    #[test]
    fn test_push_bakes() {
        let mut history = UndoHistory::new(32, 32);
        history.push(stroke(Color::RED, 2, &[(10, 10)]));
        assert_eq!(history.len(), 1);
        assert_eq!(history.canvas().pixel(10, 10), Color::RED);
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history = UndoHistory::new(16, 16);
        assert!(history.undo().is_none());
        assert!(history.is_empty());
        assert!(history.canvas().is_clear());
    }

    #[test]
    fn test_undo_matches_history_without_last() {
        let strokes = sample_strokes();
        for n in 1..=strokes.len() {
            let mut full = UndoHistory::new(32, 32);
            strokes[..n].iter().cloned().for_each(|s| full.push(s));
            let removed = full.undo();
            assert_eq!(removed.as_ref(), Some(&strokes[n - 1]));

            let mut expected = UndoHistory::new(32, 32);
            strokes[..n - 1].iter().cloned().for_each(|s| expected.push(s));

            assert_eq!(full.len(), n - 1);
            assert_eq!(full.canvas().pixels(), expected.canvas().pixels(), "n={n}");
        }
    }

    #[test]
    fn test_undo_everything_returns_to_transparent() {
        let mut history = UndoHistory::new(32, 32);
        sample_strokes().into_iter().for_each(|s| history.push(s));
        while history.undo().is_some() {}
        assert!(history.canvas().is_clear());
        // one more is still fine
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut history = UndoHistory::new(32, 32);
        sample_strokes().into_iter().for_each(|s| history.push(s));
        history.clear();
        assert!(history.is_empty());
        assert!(history.canvas().is_clear());
    }
}
