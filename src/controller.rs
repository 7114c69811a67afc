// Interaction state machine: input events in, stroke/history/brush changes out.
//
//   Idle    --left down-->  Drawing   (new stroke with the current brush)
//   Drawing --move------->  Drawing   (sampled points; split when the cap is hit)
//   Drawing --left up---->  Idle      (stroke pushed to history)
//   any     --undo/brush/clear/quit--> same state

use crate::history::UndoHistory;
use crate::input::{InputEvent, Key, Modifiers, MouseButton};
use crate::sampler::{DEFAULT_STEP_FACTOR, StrokeSampler};
use crate::stroke::{Stroke, StrokeCoverage};
use crate::types::{Color, Point, Surface};
use log::debug;

/// Point cap per stroke; longer gestures are split transparently.
pub const DEFAULT_MAX_POINTS: usize = 8000;

/// Color and radius picked up by the next stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushState {
    pub color: Color,
    pub radius: u32, // >= 1
}

impl Default for BrushState {
    fn default() -> Self {
        Self { color: Color::RED, radius: 4 }
    }
}

/// How strokes are sampled and bounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeLimits {
    pub step_factor: f32,
    pub max_points: usize,
    pub radius_step: u32,
}

impl Default for StrokeLimits {
    fn default() -> Self {
        Self { step_factor: DEFAULT_STEP_FACTOR, max_points: DEFAULT_MAX_POINTS, radius_step: 1 }
    }
}

enum State {
    Idle,
    Drawing { stroke: Stroke, sampler: StrokeSampler },
}

pub struct Controller {
    brush: BrushState,
    limits: StrokeLimits,
    state: State,
    history: UndoHistory,
    live: StrokeCoverage, // pixels of the stroke in progress
    cursor: Option<Point>,
    running: bool,
}

impl Controller {
    pub fn new(width: usize, height: usize, brush: BrushState, limits: StrokeLimits) -> Self {
        let limits = StrokeLimits { max_points: limits.max_points.max(1), ..limits };
        Self {
            brush: BrushState { radius: brush.radius.max(1), ..brush },
            limits,
            state: State::Idle,
            history: UndoHistory::new(width, height),
            live: StrokeCoverage::new(width, height),
            cursor: None,
            running: true,
        }
    }

    pub fn brush(&self) -> BrushState {
        self.brush
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// The stroke currently being drawn, if any.
    #[cfg(test)]
    pub fn active_stroke(&self) -> Option<&Stroke> {
        match &self.state {
            State::Drawing { stroke, .. } => Some(stroke),
            State::Idle => None,
        }
    }

    #[cfg(test)]
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, State::Drawing { .. })
    }

    /// Blend the stroke in progress onto `surface`, if there is one.
    pub fn render_active<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let State::Drawing { stroke, .. } = &self.state {
            self.live.render(surface, stroke.color());
        }
    }

    /// Last known pointer position.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { position, button: MouseButton::Left } => {
                self.cursor = Some(position);
                self.begin_stroke(position);
            }
            InputEvent::PointerUp { position, button: MouseButton::Left } => {
                self.cursor = Some(position);
                self.end_stroke();
            }
            InputEvent::PointerDown { position, .. } | InputEvent::PointerUp { position, .. } => {
                self.cursor = Some(position);
            }
            InputEvent::PointerMove { position } => {
                self.cursor = Some(position);
                self.motion(position);
            }
            InputEvent::Scroll { delta } => {
                if delta > 0.0 {
                    self.grow_brush();
                } else if delta < 0.0 {
                    self.shrink_brush();
                }
            }
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, modifiers),
            InputEvent::Quit => self.running = false,
        }
    }

    fn key_down(&mut self, key: Key, modifiers: Modifiers) {
        match key {
            Key::Escape | Key::Q => self.running = false,
            // Ctrl+Shift+Z / Ctrl+Alt+Z are left alone (redo elsewhere)
            Key::Z if modifiers.command() && !modifiers.shift && !modifiers.alt => self.undo(),
            Key::Backspace => self.undo(),
            Key::C => {
                debug!("clearing {} strokes", self.history.len());
                self.history.clear();
            }
            Key::R => self.set_color(Color::RED),
            Key::G => self.set_color(Color::GREEN),
            Key::B => self.set_color(Color::BLUE),
            Key::Y => self.set_color(Color::YELLOW),
            Key::K => self.set_color(Color::BLACK),
            Key::W => self.set_color(Color::WHITE),
            Key::Plus | Key::BracketRight => self.grow_brush(),
            Key::Minus | Key::BracketLeft => self.shrink_brush(),
            Key::Z => {}
        }
    }

    fn begin_stroke(&mut self, at: Point) {
        // A second press without a release: close what we have first.
        self.end_stroke();

        let mut stroke = Stroke::new(self.brush.color, self.brush.radius);
        let sampler = StrokeSampler::new(at, stroke.radius(), self.limits.step_factor);
        append_capped(&mut stroke, &mut self.live, &mut self.history, at, self.limits.max_points);
        self.state = State::Drawing { stroke, sampler };
    }

    fn motion(&mut self, to: Point) {
        let State::Drawing { stroke, sampler } = &mut self.state else {
            return;
        };
        let mut pending = Vec::new();
        sampler.feed(to, |p| pending.push(p));
        for p in pending {
            append_capped(stroke, &mut self.live, &mut self.history, p, self.limits.max_points);
        }
    }

    fn end_stroke(&mut self) {
        self.live.reset();
        if let State::Drawing { stroke, .. } = std::mem::replace(&mut self.state, State::Idle) {
            if !stroke.is_empty() {
                debug!("stroke finalized with {} points", stroke.len());
                self.history.push(stroke);
            }
        }
    }

    fn undo(&mut self) {
        match self.history.undo() {
            Some(removed) => debug!(
                "undo: removed stroke of {} points, {} left",
                removed.len(),
                self.history.len()
            ),
            None => debug!("undo: nothing to undo"),
        }
    }

    fn set_color(&mut self, color: Color) {
        self.brush.color = color;
        debug!("brush color {:?}", color);
    }

    fn grow_brush(&mut self) {
        self.brush.radius = self.brush.radius.saturating_add(self.limits.radius_step);
        debug!("brush radius {}", self.brush.radius);
    }

    fn shrink_brush(&mut self) {
        self.brush.radius = self.brush.radius.saturating_sub(self.limits.radius_step).max(1);
        debug!("brush radius {}", self.brush.radius);
    }
}

/// Append `p`; once the stroke holds `max_points`, push it to the history and
/// carry on in a fresh stroke with the same color and radius.
fn append_capped(
    stroke: &mut Stroke,
    live: &mut StrokeCoverage,
    history: &mut UndoHistory,
    p: Point,
    max_points: usize,
) {
    stroke.push(p);
    live.add(p, stroke.radius());
    if stroke.len() >= max_points {
        live.reset();
        let fresh = Stroke::new(stroke.color(), stroke.radius());
        let full = std::mem::replace(stroke, fresh);
        debug!("stroke hit the {max_points}-point cap, splitting");
        history.push(full);
    }
}
