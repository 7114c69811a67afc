// Window + frame composition.
// 1) A borderless window covering the display, showing the screenshot.
// 2) minifb state polled once per frame and turned into InputEvents.
// 3) The per-frame layer stack: background, canvas, active stroke, brush preview.

use crate::controller::{BrushState, Controller};
use crate::error::Error;
use crate::input::{InputEvent, Key as InputKey, Modifiers, MouseButton as InputButton};
use crate::stroke::Stroke;
use crate::types::{FrameBuffer, Point};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

const BUTTONS: [(MouseButton, InputButton); 3] = [
    (MouseButton::Left, InputButton::Left),
    (MouseButton::Right, InputButton::Right),
    (MouseButton::Middle, InputButton::Middle),
];

pub struct Drawer {
    window: Window,
    last_pos: Option<Point>,
    buttons_down: [bool; 3], // same order as BUTTONS
}

impl Drawer {
    /// Create a borderless, topmost window of the display's size at its origin.
    /// The OS cursor is hidden; the brush preview stands in for it.
    pub fn new(title: &str, width: usize, height: usize, x: i32, y: i32) -> Result<Self, Error> {
        let options = WindowOptions {
            borderless: true,
            topmost: true,
            resize: false,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_position(x as isize, y as isize);
        window.set_cursor_visibility(false);
        Ok(Self { window, last_pos: None, buttons_down: [false; 3] })
    }

    /// Push the pixels for this frame to the screen (this also pumps OS events).
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Everything that changed since the previous frame, as discrete events.
    /// Motion comes before button changes so a press starts where the pointer is now.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if !self.window.is_open() {
            events.push(InputEvent::Quit);
            return events;
        }

        let pos = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x.floor() as i32, y.floor() as i32));
        if let Some(p) = pos {
            if self.last_pos != Some(p) {
                events.push(InputEvent::PointerMove { position: p });
                self.last_pos = Some(p);
            }
        }

        // minifb only exposes button state, sampled once per frame: a press and
        // release that both fall between two polls are never seen.
        // Releases outside the window still count; report them at the last known spot.
        let at = pos.or(self.last_pos).unwrap_or(Point::new(0, 0));
        for (i, (mb, button)) in BUTTONS.iter().enumerate() {
            let down = self.window.get_mouse_down(*mb);
            if down == self.buttons_down[i] {
                continue;
            }
            self.buttons_down[i] = down;
            events.push(if down {
                InputEvent::PointerDown { position: at, button: *button }
            } else {
                InputEvent::PointerUp { position: at, button: *button }
            });
        }

        if let Some((_, dy)) = self.window.get_scroll_wheel() {
            if dy != 0.0 {
                events.push(InputEvent::Scroll { delta: dy });
            }
        }

        let modifiers = self.modifiers();
        for key in self.window.get_keys_pressed(KeyRepeat::Yes) {
            if let Some(key) = map_key(key) {
                events.push(InputEvent::KeyDown { key, modifiers });
            }
        }

        events
    }

    fn modifiers(&self) -> Modifiers {
        let any = |keys: [Key; 2]| keys.iter().any(|k| self.window.is_key_down(*k));
        Modifiers {
            shift: any([Key::LeftShift, Key::RightShift]),
            ctrl: any([Key::LeftCtrl, Key::RightCtrl]),
            alt: any([Key::LeftAlt, Key::RightAlt]),
            meta: any([Key::LeftSuper, Key::RightSuper]),
        }
    }
}

/// minifb key → the keys the controller understands.
fn map_key(key: Key) -> Option<InputKey> {
    Some(match key {
        Key::Escape => InputKey::Escape,
        Key::Q => InputKey::Q,
        Key::Z => InputKey::Z,
        Key::C => InputKey::C,
        Key::R => InputKey::R,
        Key::G => InputKey::G,
        Key::B => InputKey::B,
        Key::Y => InputKey::Y,
        Key::K => InputKey::K,
        Key::W => InputKey::W,
        Key::Backspace => InputKey::Backspace,
        Key::Equal | Key::NumPadPlus => InputKey::Plus,
        Key::Minus | Key::NumPadMinus => InputKey::Minus,
        Key::LeftBracket => InputKey::BracketLeft,
        Key::RightBracket => InputKey::BracketRight,
        _ => return None,
    })
}

/// Filled disc at the pointer in the brush color, half as opaque.
pub fn draw_brush_preview(fb: &mut FrameBuffer, at: Point, brush: BrushState) {
    let mut dot = Stroke::new(brush.color.with_alpha(brush.color.a / 2), brush.radius);
    dot.push(at);
    dot.render(fb);
}

/// Build the frame bottom to top: background, baked strokes, the stroke in
/// progress, brush preview.
pub fn compose_frame(screen: &mut FrameBuffer, background: &FrameBuffer, controller: &Controller) {
    screen.pixels.copy_from_slice(&background.pixels);
    controller.history().canvas().present(screen);
    controller.render_active(screen);
    if let Some(at) = controller.cursor() {
        draw_brush_preview(screen, at, controller.brush());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::StrokeLimits;
    use crate::types::Color;

    fn grey_background(w: usize, h: usize) -> FrameBuffer {
        FrameBuffer { width: w, height: h, pixels: vec![0x00_40_40_40; w * h] }
    }

    fn press(c: &mut Controller, x: i32, y: i32) {
        c.handle(InputEvent::PointerDown { position: Point::new(x, y), button: InputButton::Left });
    }

    fn release(c: &mut Controller, x: i32, y: i32) {
        c.handle(InputEvent::PointerUp { position: Point::new(x, y), button: InputButton::Left });
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(Key::Escape), Some(InputKey::Escape));
        assert_eq!(map_key(Key::Equal), Some(InputKey::Plus));
        assert_eq!(map_key(Key::NumPadMinus), Some(InputKey::Minus));
        assert_eq!(map_key(Key::F5), None);
    }

    #[test]
    fn test_empty_scene_shows_background() {
        let bg = grey_background(16, 16);
        let c = Controller::new(16, 16, BrushState::default(), StrokeLimits::default());
        let mut screen = FrameBuffer::new(16, 16);
        compose_frame(&mut screen, &bg, &c);
        assert_eq!(screen.pixels, bg.pixels);
    }

    #[test]
    fn test_layers_stack_in_order() {
        let bg = grey_background(40, 40);
        let brush = BrushState { color: Color::RED, radius: 2 };
        let mut c = Controller::new(40, 40, brush, StrokeLimits::default());

        // Baked red dot at (10,10)
        press(&mut c, 10, 10);
        release(&mut c, 10, 10);
        // In-progress blue dot at (30,30); cursor sits there too
        c.handle(InputEvent::KeyDown { key: InputKey::B, modifiers: Modifiers::NONE });
        press(&mut c, 30, 30);

        let mut screen = FrameBuffer::new(40, 40);
        compose_frame(&mut screen, &bg, &c);

        assert_eq!(screen.pixel(10, 10), 0x00_FF_00_00);
        // blue stroke with a half-alpha blue preview on top is still pure blue
        assert_eq!(screen.pixel(30, 30), 0x00_00_00_FF);
        assert_eq!(screen.pixel(20, 20), 0x00_40_40_40);
        // the canvas was not touched by the in-progress stroke
        assert_eq!(c.history().canvas().pixel(30, 30), Color::TRANSPARENT);
    }

    #[test]
    fn test_brush_preview_is_translucent() {
        let bg = grey_background(20, 20);
        let brush = BrushState { color: Color::WHITE, radius: 3 };
        let mut c = Controller::new(20, 20, brush, StrokeLimits::default());
        c.handle(InputEvent::PointerMove { position: Point::new(10, 10) });

        let mut screen = FrameBuffer::new(20, 20);
        compose_frame(&mut screen, &bg, &c);

        let px = screen.pixel(10, 10);
        assert_ne!(px, 0x00_40_40_40);
        assert_ne!(px, 0x00_FF_FF_FF);
        assert_eq!(screen.pixel(14, 10), 0x00_40_40_40);
        assert!(c.history().is_empty());
    }
}
