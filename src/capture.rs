// Finds the display under the mouse and grabs a screenshot of it.
// The result is a FrameBuffer of 0x00RRGGBB pixels sized like the display,
// ready to be copied under the strokes every frame.

use crate::error::Error;
use crate::types::{FrameBuffer, Point};

use enigo::{Enigo, Mouse, Settings};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::{info, warn};
use xcap::Monitor;

/// Where a display sits in the global desktop space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInfo {
    pub index: usize,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl DisplayInfo {
    /// Half-open bounds check: [x, x+w) × [y, y+h).
    pub fn contains(&self, p: Point) -> bool {
        let (px, py) = (p.x as i64, p.y as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && px < x + self.width as i64 && py >= y && py < y + self.height as i64
    }
}

/// First display whose bounds contain `p`.
pub fn display_under(displays: &[DisplayInfo], p: Point) -> Option<&DisplayInfo> {
    displays.iter().find(|d| d.contains(p))
}

/// Global cursor position in desktop coordinates.
pub fn cursor_position() -> Result<Point, Error> {
    let enigo = Enigo::new(&Settings::default()).map_err(|e| Error::CursorQuery(e.to_string()))?;
    let (x, y) = enigo.location().map_err(|e| Error::CursorQuery(e.to_string()))?;
    Ok(Point::new(x, y))
}

/// The display the mouse is on plus its screenshot.
pub struct Screenshot {
    pub display: DisplayInfo,
    pub background: FrameBuffer,
}

/// Locate the display under the cursor and capture it.
pub fn capture_display_under_cursor() -> Result<Screenshot, Error> {
    let cursor = cursor_position()?;

    let monitors = Monitor::all().map_err(|e| Error::DisplayQuery(e.to_string()))?;
    let displays: Vec<DisplayInfo> = monitors
        .iter()
        .enumerate()
        .map(|(index, m)| DisplayInfo {
            index,
            name: m.name().to_string(),
            x: m.x(),
            y: m.y(),
            width: m.width(),
            height: m.height(),
        })
        .collect();

    let display = display_under(&displays, cursor)
        .cloned()
        .ok_or(Error::NoDisplayUnderCursor { x: cursor.x, y: cursor.y })?;
    info!(
        "Opening on display {} ({}) at {},{} with resolution {}x{}",
        display.index, display.name, display.x, display.y, display.width, display.height
    );

    let image = monitors[display.index]
        .capture_image()
        .map_err(|e| Error::Capture(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::Capture("captured an empty image".into()));
    }

    let background = to_frame_buffer(&image, display.width as usize, display.height as usize);
    Ok(Screenshot { display, background })
}

/// Convert an RGBA screenshot into a window frame of `width` × `height`,
/// resizing when the capture was taken at a different (e.g. HiDPI) scale.
pub fn to_frame_buffer(image: &RgbaImage, width: usize, height: usize) -> FrameBuffer {
    let resized;
    let src = if image.width() as usize != width || image.height() as usize != height {
        warn!(
            "screenshot is {}x{}, window is {}x{}; resizing",
            image.width(),
            image.height(),
            width,
            height
        );
        resized = imageops::resize(image, width as u32, height as u32, FilterType::Triangle);
        &resized
    } else {
        image
    };

    // Pack each RGBA pixel as 0x00RRGGBB; the screenshot is opaque.
    let pixels = src
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();

    FrameBuffer { width, height, pixels }
}
