//! Terminal rendering
//!
//! Draws the camera's view of the world into a pixel buffer scaled to fit
//! the terminal, letterboxed to keep the screen's aspect ratio.

pub mod pixels;

use std::io::{self, Write};

pub use pixels::{Ink, PixelBuf, Rgb, draw_number};

use crate::game::Game;
use crate::platform::Clock;
use crate::sim::{GamePhase, Rect, WingFrame};

const BORDER: Rgb = Rgb(20, 20, 28);
const SKY: Rgb = Rgb(112, 197, 206);
const PIPE: Rgb = Rgb(100, 170, 40);
const PIPE_EDGE: Rgb = Rgb(60, 100, 20);
const BIRD: Rgb = Rgb(245, 200, 66);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const WHITE: Rgb = Rgb(255, 255, 255);
const PANEL: Rgb = Rgb(220, 195, 120);
const SHADOW: Rgb = Rgb(30, 30, 30);

/// Score over the sky
const SCORE_INK: Ink = Ink::shadowed(WHITE, SHADOW);

/// Maps world pixels onto terminal pixels
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    scale: f64,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Viewport {
    fn fit(buf_w: usize, buf_h: usize, screen_w: i32, screen_h: i32) -> Self {
        let scale = (buf_w as f64 / screen_w as f64).min(buf_h as f64 / screen_h as f64);
        let w = (screen_w as f64 * scale) as i32;
        let h = (screen_h as f64 * scale) as i32;
        Self {
            scale,
            x: (buf_w as i32 - w) / 2,
            y: (buf_h as i32 - h) / 2,
            w,
            h,
        }
    }

    /// Screen-space rect to buffer pixels, clipped to the viewport
    fn project(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let x0 = ((r.x as f64 * self.scale).floor() as i32).max(0);
        let y0 = ((r.y as f64 * self.scale).floor() as i32).max(0);
        let x1 = ((r.right() as f64 * self.scale).ceil() as i32).min(self.w);
        let y1 = ((r.bottom() as f64 * self.scale).ceil() as i32).min(self.h);
        (self.x + x0, self.y + y0, x1 - x0, y1 - y0)
    }
}

pub struct Renderer {
    buf: PixelBuf,
    viewport: Viewport,
    screen_w: i32,
    screen_h: i32,
}

impl Renderer {
    /// Renderer for a terminal of `cols` x `rows` cells
    pub fn new(cols: u16, rows: u16, screen_w: i32, screen_h: i32) -> Self {
        let (w, h) = (cols as usize, rows as usize * 2);
        Self {
            buf: PixelBuf::new(w, h, BORDER),
            viewport: Viewport::fit(w, h, screen_w, screen_h),
            screen_w,
            screen_h,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (w, h) = (cols as usize, rows as usize * 2);
        self.buf.resize(w, h, BORDER);
        self.viewport = Viewport::fit(w, h, self.screen_w, self.screen_h);
    }

    pub fn buffer(&self) -> &PixelBuf {
        &self.buf
    }

    /// Draw the current frame into the buffer
    pub fn draw<C: Clock>(&mut self, game: &Game<C>) {
        self.buf.clear(BORDER);
        let vp = self.viewport;
        self.buf.fill_rect(vp.x, vp.y, vp.w, vp.h, SKY);

        let camera = game.camera();
        for pipe in game.visible_pipes() {
            for rect in [pipe.top(), pipe.bottom()] {
                self.fill(&rect.translated(camera.x, camera.y), PIPE);
                self.outline(&rect.translated(camera.x, camera.y), PIPE_EDGE);
            }
        }

        let player = game.player();
        self.draw_bird(
            &player.collider().translated(camera.x, camera.y),
            player.rotation(),
            player.frame(),
        );

        let cx = vp.x + vp.w / 2;
        match game.phase() {
            GamePhase::Playing => {
                draw_number(&mut self.buf, cx, vp.y + vp.h / 8, game.score(), SCORE_INK);
            }
            GamePhase::NotStarted => self.draw_title(cx, game.best_score()),
            GamePhase::Paused => {
                draw_number(&mut self.buf, cx, vp.y + vp.h / 8, game.score(), SCORE_INK);
                self.draw_pause(cx);
            }
            GamePhase::Dead => self.draw_game_over(cx, game.score(), game.best_score()),
        }
    }

    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        self.buf.render(out)
    }

    fn fill(&mut self, r: &Rect, c: Rgb) {
        let (x, y, w, h) = self.viewport.project(r);
        self.buf.fill_rect(x, y, w, h, c);
    }

    fn outline(&mut self, r: &Rect, c: Rgb) {
        let (x, y, w, h) = self.viewport.project(r);
        if w <= 0 || h <= 0 {
            return;
        }
        self.buf.fill_rect(x, y, 1, h, c);
        self.buf.fill_rect(x + w - 1, y, 1, h, c);
    }

    /// Bird body with a wing and a beak that dips as the bird tilts
    fn draw_bird(&mut self, body: &Rect, rotation: f64, frame: WingFrame) {
        self.fill(body, BIRD);

        let wing_y = match frame {
            WingFrame::Up => body.y,
            WingFrame::Neutral => body.y + body.h / 3,
            WingFrame::Down => body.y + body.h * 2 / 3,
        };
        self.fill(&Rect::new(body.x, wing_y, body.w / 2, body.h / 3), BIRD_WING);

        let eye = Rect::new(body.x + body.w * 3 / 5, body.y + body.h / 6, body.w / 5, body.h / 4);
        self.fill(&eye, BIRD_EYE);

        // Nose-down tilt lowers the beak by up to half the body height
        let tilt = (rotation / 90.0).clamp(-1.0, 1.0);
        let beak_y = body.y + body.h / 3 + (tilt * body.h as f64 / 2.0) as i32;
        let beak = Rect::new(body.right(), beak_y, body.w / 4, body.h / 3);
        self.fill(&beak, BIRD_BEAK);
    }

    fn draw_title(&mut self, cx: i32, best: u32) {
        self.buf.dim();
        let vp = self.viewport;
        let bar_w = (vp.w / 2).max(6);
        let bar_h = (vp.h / 12).max(3);
        let y = vp.y + vp.h / 4;
        self.buf.fill_rect(cx - bar_w / 2, y, bar_w, bar_h, BIRD);
        self.buf.fill_rect(cx - bar_w / 2, y, bar_w, 1, WHITE);
        draw_number(&mut self.buf, cx, y + bar_h + 4, best, Ink::shadowed(BIRD, SHADOW));
    }

    fn draw_pause(&mut self, cx: i32) {
        self.buf.dim();
        let vp = self.viewport;
        let bar_h = (vp.h / 6).max(4);
        let bar_w = (vp.w / 16).max(1);
        let y = vp.y + vp.h / 2 - bar_h / 2;
        self.buf.fill_rect(cx - bar_w * 2, y, bar_w, bar_h, WHITE);
        self.buf.fill_rect(cx + bar_w, y, bar_w, bar_h, WHITE);
    }

    fn draw_game_over(&mut self, cx: i32, score: u32, best: u32) {
        self.buf.dim();
        let vp = self.viewport;
        let panel_w = (vp.w * 2 / 3).max(16);
        let panel_h = 16;
        let px = cx - panel_w / 2;
        let py = vp.y + vp.h / 2 - panel_h / 2;
        self.buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, BORDER);
        self.buf.fill_rect(px, py, panel_w, panel_h, PANEL);
        draw_number(&mut self.buf, cx, py + 2, score, Ink::plain(WHITE));
        draw_number(&mut self.buf, cx, py + 9, best, Ink::plain(BIRD));
    }
}
