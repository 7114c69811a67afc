// Off-screen stroke layer.
// Holds every finalized stroke already rasterised, so a frame costs one blit
// no matter how long the history is. It is a cache: clear it and bake the
// history again and you get the same pixels back.

use crate::stroke::Stroke;
use crate::types::{Color, FrameBuffer, Surface};

pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>, // 0xAARRGGBB, straight alpha; starts fully transparent
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    #[cfg(test)]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        Color::from_argb(self.pixels[y * self.width + x])
    }

    #[cfg(test)]
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|&p| p >> 24 == 0)
    }

    /// Reset to fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Permanently paint `stroke` on top of what is already here.
    pub fn bake(&mut self, stroke: &Stroke) {
        stroke.render(self);
    }

    /// Clear, then bake `strokes` in order.
    pub fn rebuild_from<'a>(&mut self, strokes: impl IntoIterator<Item = &'a Stroke>) {
        self.clear();
        for stroke in strokes {
            self.bake(stroke);
        }
    }

    /// Composite this layer over `target` (the background). Does not touch the canvas.
    /// Sizes are expected to match; a smaller target is clipped.
    pub fn present(&self, target: &mut FrameBuffer) {
        let w = self.width.min(target.width);
        let h = self.height.min(target.height);
        for y in 0..h {
            let row = &self.pixels[y * self.width..y * self.width + w];
            for (x, &px) in row.iter().enumerate() {
                if px >> 24 != 0 {
                    target.blend_pixel(x, y, Color::from_argb(px));
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    /// Straight-alpha source-over in integer math. An opaque source overwrites.
    fn blend_pixel(&mut self, x: usize, y: usize, src: Color) {
        let idx = y * self.width + x;
        let sa = src.a as u32;
        if sa == 0 {
            return;
        }
        if sa == 255 {
            self.pixels[idx] = src.to_argb();
            return;
        }

        let dst = Color::from_argb(self.pixels[idx]);
        let da = dst.a as u32;
        // Scaled by 255: out_a * 255 = sa*255 + da*(255 - sa)
        let src_w = sa * 255;
        let dst_w = da * (255 - sa);
        let out_w = src_w + dst_w;

        let channel = |s: u8, d: u8| (s as u32 * src_w + d as u32 * dst_w + out_w / 2) / out_w;
        let out = Color {
            r: channel(src.r, dst.r) as u8,
            g: channel(src.g, dst.g) as u8,
            b: channel(src.b, dst.b) as u8,
            a: ((out_w + 127) / 255) as u8,
        };
        self.pixels[idx] = out.to_argb();
    }
}
