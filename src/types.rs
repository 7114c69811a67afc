// Core value types shared by the stroke pipeline and the window.

/// A pixel coordinate on the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other` in pixels.
    pub fn distance(self, other: Point) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Straight (non-premultiplied) 8-bit RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[cfg(test)]
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 220, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Pack as 0xAARRGGBB.
    #[inline]
    pub fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub fn from_argb(px: u32) -> Self {
        Self {
            a: (px >> 24) as u8,
            r: (px >> 16) as u8,
            g: (px >> 8) as u8,
            b: px as u8,
        }
    }
}

/// Anything a stroke or a disc can be blended onto.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Source-over blend `color` into the pixel at (x, y). Callers stay in bounds.
    fn blend_pixel(&mut self, x: usize, y: usize, color: Color);
}

/// Opaque frame as minifb wants it.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is on screen (pixels)
    pub height: usize,    // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    #[inline]
    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

/// Mix one 8-bit channel: `(src*a + dst*(255-a)) / 255`, rounded.
#[inline]
fn mix(src: u8, dst: u8, a: u32) -> u32 {
    (src as u32 * a + dst as u32 * (255 - a) + 127) / 255
}

impl Surface for FrameBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn blend_pixel(&mut self, x: usize, y: usize, color: Color) {
        let idx = y * self.width + x;
        let a = color.a as u32;
        if a == 0 {
            return;
        }
        if a == 255 {
            self.pixels[idx] = color.to_argb() & 0x00FF_FFFF;
            return;
        }
        let old = Color::from_argb(self.pixels[idx]);
        let r = mix(color.r, old.r, a);
        let g = mix(color.g, old.g, a);
        let b = mix(color.b, old.b, a);
        self.pixels[idx] = (r << 16) | (g << 8) | b;
    }
}
