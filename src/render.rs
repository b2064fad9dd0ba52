//! Software drawing onto the RGBA frame handed out by `pixels`.

use crate::assets::Texture;
use crate::controller::GenerationController;
use crate::pos::Pos;

pub type Rgba = (u8, u8, u8, u8);

pub struct Frame<'a> {
    buf: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    pub fn new(buf: &'a mut [u8], width: u32, height: u32) -> Self {
        Self { buf, width, height }
    }

    pub fn clear(&mut self, col: Rgba) {
        for px in self.buf.chunks_exact_mut(4) {
            px[0] = col.0;
            px[1] = col.1;
            px[2] = col.2;
            px[3] = col.3;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        Some([self.buf[idx], self.buf[idx + 1], self.buf[idx + 2], self.buf[idx + 3]])
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        (idx + 3 < self.buf.len()).then_some(idx)
    }

    pub fn blend_pixel(&mut self, x: u32, y: u32, col: Rgba) {
        let Some(idx) = self.index(x, y) else { return };
        let a = col.3 as u16;
        let ia = 255 - a;
        self.buf[idx] = ((col.0 as u16 * a + self.buf[idx] as u16 * ia) / 255) as u8;
        self.buf[idx + 1] = ((col.1 as u16 * a + self.buf[idx + 1] as u16 * ia) / 255) as u8;
        self.buf[idx + 2] = ((col.2 as u16 * a + self.buf[idx + 2] as u16 * ia) / 255) as u8;
        self.buf[idx + 3] = 255;
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, col: Rgba) {
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);
        for py in y..y2 {
            for px in x..x2 {
                self.blend_pixel(px, py, col);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: u32, y: u32, w: u32, h: u32, col: Rgba) {
        if w == 0 || h == 0 || x >= self.width || y >= self.height {
            return;
        }
        let x2 = (x + w - 1).min(self.width - 1);
        let y2 = (y + h - 1).min(self.height - 1);
        for px in x..=x2 {
            self.blend_pixel(px, y, col);
            self.blend_pixel(px, y2, col);
        }
        for py in y..=y2 {
            self.blend_pixel(x, py, col);
            self.blend_pixel(x2, py, col);
        }
    }

    pub fn fill_circle(&mut self, center: Pos, radius: f32, col: Rgba) {
        let r2 = radius * radius;
        let x0 = (center.x - radius).floor().max(0.0) as u32;
        let y0 = (center.y - radius).floor().max(0.0) as u32;
        let x1 = ((center.x + radius).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((center.y + radius).ceil().max(0.0) as u32).min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - center.x;
                let dy = py as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(px, py, col);
                }
            }
        }
    }

    /// Nearest-neighbour scaled blit with `pos` as the top-left corner.
    pub fn draw_sprite(&mut self, tex: &Texture, pos: Pos, scale: f32) {
        if tex.width == 0 || tex.height == 0 || scale <= 0.0 {
            return;
        }
        let (w, h) = tex.scaled_size(scale);
        let (w, h) = (w.ceil().max(1.0) as u32, h.ceil().max(1.0) as u32);
        let ox = pos.x.round() as i64;
        let oy = pos.y.round() as i64;
        for sy in 0..h {
            let py = oy + sy as i64;
            if py < 0 || py >= self.height as i64 {
                continue;
            }
            let ty = ((sy as f32 / scale) as u32).min(tex.height - 1);
            for sx in 0..w {
                let px = ox + sx as i64;
                if px < 0 || px >= self.width as i64 {
                    continue;
                }
                let tx = ((sx as f32 / scale) as u32).min(tex.width - 1);
                let Some([r, g, b, a]) = tex.pixel(tx, ty) else { continue };
                if a > 0 {
                    self.blend_pixel(px as u32, py as u32, (r, g, b, a));
                }
            }
        }
    }

    fn draw_char(&mut self, ch: char, x: u32, y: u32, scale: u32, col: Rgba) -> u32 {
        if let Some(rows) = glyph_5x7(ch) {
            for (ry, row) in rows.iter().enumerate() {
                for rx in 0..5u32 {
                    if (row >> (4 - rx)) & 1 == 1 {
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.blend_pixel(x + rx * scale + sx, y + ry as u32 * scale + sy, col);
                            }
                        }
                    }
                }
            }
        }
        5 * scale + scale
    }

    pub fn draw_text(&mut self, text: &str, x: u32, y: u32, scale: u32, col: Rgba) {
        let mut cx = x;
        for ch in text.chars() {
            cx += self.draw_char(ch, cx, y, scale, col);
        }
    }

    /// Bar chart of the most recent values that fit; negative bars hang
    /// below a zero line.
    pub fn draw_chart(&mut self, x: u32, y: u32, w: u32, h: u32, data: &[f32]) {
        self.stroke_rect(x, y, w, h, (200, 200, 200, 120));
        if data.is_empty() || w < 6 || h < 4 {
            return;
        }
        let max_val = data.iter().copied().fold(0.0f32, f32::max);
        let min_val = data.iter().copied().fold(0.0f32, f32::min);
        let span = max_val - min_val;
        if span <= 0.0 {
            return;
        }
        let inner = (h - 2) as f32;
        let zero_y = y + 1 + ((max_val / span) * inner) as u32;
        let bars = data.len().min(w as usize / 6).max(1);
        let bar_w = (w / bars as u32).max(2);
        for (i, &v) in data[data.len() - bars..].iter().enumerate() {
            let bh = ((v.abs() / span) * inner) as u32;
            let bx = x + 1 + i as u32 * bar_w;
            let (by, col) = if v >= 0.0 {
                (zero_y.saturating_sub(bh), (120, 180, 255, 160))
            } else {
                (zero_y, (255, 120, 120, 160))
            };
            self.fill_rect(bx, by, bar_w - 1, bh, col);
        }
    }
}

/// Agents, target, generation label and best-reward chart.
pub fn draw_scene(frame: &mut Frame, sim: &GenerationController, car: &Texture) {
    frame.clear((0, 0, 0, 255));

    let scale = sim.config().sprite_scale;
    for agent in sim.agents() {
        frame.draw_sprite(car, agent.pos, scale);
    }

    let target = sim.target();
    let [r, g, b] = target.color;
    frame.fill_circle(target.pos, target.radius, (r, g, b, 255));

    frame.draw_text(&format!("GENERATION: {}", sim.generation()), 10, 10, 2, (255, 255, 255, 255));

    let best: Vec<f32> = sim.history().iter().map(|s| s.best_reward).collect();
    if !best.is_empty() {
        frame.draw_text("BEST REWARD", 10, 34, 1, (200, 220, 255, 255));
        frame.draw_chart(10, 46, 180, 60, &best);
    }
}

fn glyph_5x7(ch: char) -> Option<[u8; 7]> {
    let c = ch.to_ascii_uppercase();
    Some(match c {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ' ' => [0b00000; 7],
        _ => return None,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn buffer(w: u32, h: u32) -> Vec<u8> {
        vec![0; (w * h * 4) as usize]
    }

    #[test]
    fn opaque_blend_overwrites_and_out_of_range_is_ignored() {
        let mut buf = buffer(4, 4);
        let mut frame = Frame::new(&mut buf, 4, 4);
        frame.blend_pixel(1, 2, (10, 20, 30, 255));
        frame.blend_pixel(9, 9, (255, 255, 255, 255));
        assert_eq!(frame.pixel(1, 2), Some([10, 20, 30, 255]));
        assert_eq!(frame.pixel(9, 9), None);
    }

    #[test]
    fn circle_covers_center_not_corners() {
        let mut buf = buffer(20, 20);
        let mut frame = Frame::new(&mut buf, 20, 20);
        frame.fill_circle(Pos::new(10.0, 10.0), 5.0, (255, 0, 0, 255));
        assert_eq!(frame.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(frame.pixel(16, 16), Some([0, 0, 0, 0]));
    }

    #[test]
    fn sprite_is_scaled_and_clipped() {
        let tex = Texture { width: 10, height: 10, rgba: vec![200; 400] };
        let mut buf = buffer(8, 8);
        let mut frame = Frame::new(&mut buf, 8, 8);
        frame.draw_sprite(&tex, Pos::new(6.0, 6.0), 0.5);
        assert_ne!(frame.pixel(7, 7), Some([0, 0, 0, 0]));
        assert_eq!(frame.pixel(5, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn truncated_texture_draws_what_it_has() {
        let tex = Texture { width: 4, height: 4, rgba: vec![255; 16] };
        let mut buf = buffer(4, 4);
        let mut frame = Frame::new(&mut buf, 4, 4);
        frame.draw_sprite(&tex, Pos::new(0.0, 0.0), 1.0);
        assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(frame.pixel(0, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn text_marks_pixels() {
        let mut buf = buffer(64, 16);
        let mut frame = Frame::new(&mut buf, 64, 16);
        frame.draw_text("GENERATION: 1", 0, 0, 1, (255, 255, 255, 255));
        // Top row of 'G' is 0b01110.
        assert_eq!(frame.pixel(1, 0), Some([255, 255, 255, 255]));
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn chart_handles_negative_rewards() {
        let mut buf = buffer(100, 40);
        let mut frame = Frame::new(&mut buf, 100, 40);
        frame.draw_chart(0, 0, 100, 40, &[-3.0, 5.0, 2.0]);
        // First bar is negative and hangs below the zero line.
        assert_ne!(frame.pixel(2, 30), Some([0, 0, 0, 0]));
        frame.draw_chart(0, 0, 100, 40, &[]);
    }
}
