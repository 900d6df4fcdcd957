use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::font;
use crate::core::render_target::RenderTarget;
use crate::math::Color;
use crate::traits::Scene;

const COLOR_START: u32 = 0xff6b6b;
const COLOR_END: u32 = 0x4ecdc4;

const TYPING_SPEED: f32 = 200.0; // base characters per second
const BURST_MIN: u32 = 3;
const BURST_MAX: u32 = 15;
const PAUSE_MIN: f32 = 0.02; // seconds between bursts
const PAUSE_MAX: f32 = 0.15;

const OPACITY: f32 = 0.25;
const GLOW_OPACITY: f32 = 0.15;

const MARGIN_LEFT: f32 = 0.05; // fractions of the target
const MARGIN_TOP: f32 = 0.1;
const MARGIN_BOTTOM: f32 = 0.1;

const COLOR_LERP_SPEED: f32 = 3.0;

static SNIPPETS: [&str; 8] = [
    "async function loadSlides(url) {\n  const res = await fetch(url);\n  if (!res.ok) throw new Error(res.status);\n  return res.json();\n}",
    "SELECT t.name, COUNT(e.id) AS events\nFROM tracks t\nJOIN events e ON e.track_id = t.id\nWHERE e.ts > NOW() - INTERVAL '7 days'\nGROUP BY t.id\nORDER BY events DESC;",
    "fn spawn_worker(rx: Receiver<Job>) {\n    thread::spawn(move || {\n        while let Ok(job) = rx.recv() {\n            job.run();\n        }\n    });\n}",
    "def backoff(attempt, base=0.5, cap=30):\n    delay = min(cap, base * 2 ** attempt)\n    return delay * random.uniform(0.5, 1.0)",
    "#!/bin/sh\nfor f in logs/*.gz; do\n  zcat \"$f\" | grep ERROR >> errors.txt\ndone\nwc -l errors.txt",
    "type Result<T> =\n  | { ok: true; value: T }\n  | { ok: false; error: string };",
    "func (c *Cache) Get(key string) ([]byte, bool) {\n    c.mu.RLock()\n    defer c.mu.RUnlock()\n    v, ok := c.items[key]\n    return v, ok\n}",
    "services:\n  web:\n    image: hero:latest\n    ports:\n      - \"8080:8080\"\n    environment:\n      RUST_LOG: info",
];

/// Simulated live-coding overlay. Characters appear in short bursts with
/// randomized pauses, as if someone were typing; when the column fills a
/// randomized fraction of the usable height it either appends another
/// snippet or wipes and starts over. Rendered twice, the second pass as a
/// faint additive glow, with the two palette colors swapping on demand.
pub struct CodeRainScene {
    rng: StdRng,

    snippet_index: usize,
    target_text: Vec<char>,
    current_text: String,
    char_index: usize,
    burst_remaining: u32,
    pause_remaining: f32,
    time_since_char: f32,
    max_fill_ratio: f32,

    scheme: f32,
    target_scheme: f32,
    color_start: Color,
    color_end: Color,

    width: u32,
    height: u32,
}

impl CodeRainScene {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let snippet_index = rng.gen_range(0..SNIPPETS.len());
        let max_fill_ratio = 0.7 + rng.gen::<f32>() * 0.3;
        let burst_remaining = rng.gen_range(BURST_MIN..=BURST_MAX);
        Self {
            rng,
            snippet_index,
            target_text: SNIPPETS[snippet_index].chars().collect(),
            current_text: String::new(),
            char_index: 0,
            burst_remaining,
            pause_remaining: 0.0,
            time_since_char: 0.0,
            max_fill_ratio,
            scheme: 0.0,
            target_scheme: 0.0,
            color_start: Color::from_hex(COLOR_START),
            color_end: Color::from_hex(COLOR_END),
            width: 1024,
            height: 1024,
        }
    }

    fn pick_other_snippet(&mut self) -> usize {
        let mut index = self.snippet_index;
        while index == self.snippet_index && SNIPPETS.len() > 1 {
            index = self.rng.gen_range(0..SNIPPETS.len());
        }
        index
    }

    fn usable_height(&self) -> f32 {
        self.height as f32 * (1.0 - MARGIN_TOP - MARGIN_BOTTOM)
    }

    fn fill_ratio(&self) -> f32 {
        let lines = self.current_text.lines().count().max(1) as u32;
        let text_height = (lines * font::LINE_ADVANCE) as f32;
        text_height / self.usable_height().max(1.0)
    }

    fn advance_typing(&mut self, dt: f32) {
        self.time_since_char += dt;
        let char_interval = 1.0 / TYPING_SPEED;

        if self.pause_remaining > 0.0 {
            self.pause_remaining -= dt;
            if self.pause_remaining <= 0.0 {
                self.burst_remaining = self.rng.gen_range(BURST_MIN..=BURST_MAX);
            }
        } else {
            while self.time_since_char >= char_interval
                && self.char_index < self.target_text.len()
                && self.burst_remaining > 0
            {
                self.time_since_char -= char_interval;
                self.current_text.push(self.target_text[self.char_index]);
                self.char_index += 1;
                self.burst_remaining -= 1;
            }

            if self.burst_remaining == 0 && self.char_index < self.target_text.len() {
                self.pause_remaining = PAUSE_MIN + self.rng.gen::<f32>() * (PAUSE_MAX - PAUSE_MIN);
            }
        }

        if self.char_index >= self.target_text.len() {
            if self.fill_ratio() < self.max_fill_ratio {
                // Keep going: append another snippet below
                self.snippet_index = self.pick_other_snippet();
                self.target_text.push('\n');
                self.target_text.push('\n');
                self.target_text.extend(SNIPPETS[self.snippet_index].chars());
            } else {
                // Column is full, wipe and restart
                self.snippet_index = self.pick_other_snippet();
                self.target_text = SNIPPETS[self.snippet_index].chars().collect();
                self.current_text.clear();
                self.char_index = 0;
                self.max_fill_ratio = 0.7 + self.rng.gen::<f32>() * 0.3;
            }
            self.burst_remaining = self.rng.gen_range(BURST_MIN..=BURST_MAX);
        }
    }

    fn advance_colors(&mut self, dt: f32) {
        let diff = self.target_scheme - self.scheme;
        if diff.abs() > 0.001 {
            self.scheme += diff * (dt * COLOR_LERP_SPEED).min(1.0);
        } else {
            self.scheme = self.target_scheme;
        }
    }
}

impl Default for CodeRainScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for CodeRainScene {
    fn update(&mut self, dt: f32) {
        self.advance_typing(dt);
        self.advance_colors(dt);
    }

    fn render(&mut self, target: &mut RenderTarget) {
        target.clear(Color::BLACK, 0.0);
        if self.current_text.is_empty() {
            return;
        }

        let x = (target.width() as f32 * MARGIN_LEFT) as i32;
        let y = (target.height() as f32 * MARGIN_TOP) as i32;

        let text_color = self.color_start.lerp(self.color_end, self.scheme);
        let glow_color = self.color_end.lerp(self.color_start, self.scheme);

        font::draw_text_add(
            target,
            &self.current_text,
            x + 1,
            y + 1,
            1,
            glow_color.to_rgba8(GLOW_OPACITY),
        );
        font::draw_text(
            target,
            &self.current_text,
            x,
            y,
            1,
            text_color.to_rgba8(OPACITY),
        );
    }

    fn resize(&mut self, w: u32, h: u32, _aspect: f32) {
        self.width = w;
        self.height = h;
    }

    fn set_color_scheme(&mut self, t: f32) {
        self.target_scheme = t.clamp(0.0, 1.0);
    }

    fn name(&self) -> &str {
        "CodeRain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_advances_in_bursts() {
        let mut scene = CodeRainScene::with_seed(9);
        // Plenty of time for the first burst
        scene.update(0.5);
        let typed = scene.current_text.chars().count();
        assert!(typed >= BURST_MIN as usize, "typed {typed}");
        assert!(typed <= BURST_MAX as usize, "typed {typed}");
    }

    #[test]
    fn pause_follows_burst() {
        let mut scene = CodeRainScene::with_seed(9);
        scene.update(0.5);
        assert!(scene.pause_remaining > 0.0);
        assert!(scene.pause_remaining <= PAUSE_MAX);
    }

    #[test]
    fn never_types_past_target() {
        let mut scene = CodeRainScene::with_seed(3);
        scene.resize(256, 256, 1.0);
        for _ in 0..5_000 {
            scene.update(0.016);
            assert!(scene.char_index <= scene.target_text.len());
        }
    }

    #[test]
    fn column_eventually_resets() {
        let mut scene = CodeRainScene::with_seed(3);
        // Small target so the column fills quickly
        scene.resize(64, 64, 1.0);
        let mut reset_seen = false;
        let mut longest = 0usize;
        for _ in 0..20_000 {
            scene.update(0.016);
            let len = scene.current_text.len();
            if len < longest {
                reset_seen = true;
                break;
            }
            longest = longest.max(len);
        }
        assert!(reset_seen, "column never reset, longest {longest}");
    }

    #[test]
    fn color_scheme_converges() {
        let mut scene = CodeRainScene::with_seed(1);
        scene.set_color_scheme(1.0);
        for _ in 0..500 {
            scene.update(0.016);
        }
        assert!((scene.scheme - 1.0).abs() < 1e-3);
    }

    #[test]
    fn scheme_input_is_clamped() {
        let mut scene = CodeRainScene::with_seed(1);
        scene.set_color_scheme(7.0);
        assert_eq!(scene.target_scheme, 1.0);
    }

    #[test]
    fn renders_translucent_text() {
        let mut scene = CodeRainScene::with_seed(5);
        scene.resize(256, 256, 1.0);
        for _ in 0..60 {
            scene.update(0.016);
        }
        let mut target = RenderTarget::new(256, 256);
        scene.render(&mut target);
        let lit = target.pixels().chunks_exact(4).filter(|p| p[3] > 0).count();
        assert!(lit > 20, "glyph pixels drawn: {lit}");
    }
}
