//! Decorative particle background.
//!
//! `ParticleField` is the simulation (drift, toroidal wrap, opacity pulse)
//! and knows nothing about the browser; `ParticleBackground` owns the canvas
//! and drives the field from `requestAnimationFrame`.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::config::ParticleConfig;
use crate::dom;
use crate::error::{PortfolioError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Diameter in CSS pixels.
    pub size: f64,
    pub opacity: f64,
    /// Index into the field's palette.
    pub color: usize,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    palette: Vec<String>,
    width: f64,
    height: f64,
    frame: u64,
    pulse_rate: f64,
    pulse_amplitude: f64,
}

fn range(rng: &mut fastrand::Rng, lo: f64, hi: f64) -> f64 {
    lo + rng.f64() * (hi - lo)
}

/// Wrap `v` into `[0, extent)`.
fn wrap(v: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    let w = v.rem_euclid(extent);
    // rem_euclid rounds tiny negatives up to `extent` itself.
    if w >= extent { 0.0 } else { w }
}

impl ParticleField {
    pub fn new(config: &ParticleConfig, width: f64, height: f64, rng: &mut fastrand::Rng) -> Self {
        let palette = if config.palette.is_empty() {
            vec!["#FFFFFF".to_string()]
        } else {
            config.palette.clone()
        };
        let particles = (0..config.count)
            .map(|_| Particle {
                x: range(rng, 0.0, width.max(0.0)),
                y: range(rng, 0.0, height.max(0.0)),
                vx: range(rng, -config.max_speed, config.max_speed),
                vy: range(rng, -config.max_speed, config.max_speed),
                size: range(rng, config.min_size, config.max_size),
                opacity: range(rng, config.min_opacity, config.max_opacity),
                color: rng.usize(..palette.len()),
            })
            .collect();
        let mut field = Self {
            particles,
            palette,
            width,
            height,
            frame: 0,
            pulse_rate: config.pulse_rate,
            pulse_amplitude: config.pulse_amplitude,
        };
        field.wrap_all();
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.frame += 1;
        let pulse = (self.frame as f64 * self.pulse_rate).sin() * self.pulse_amplitude;
        for p in &mut self.particles {
            p.x = wrap(p.x + p.vx, self.width);
            p.y = wrap(p.y + p.vy, self.height);
            p.opacity = (p.opacity + pulse).clamp(0.0, 1.0);
        }
    }

    /// New canvas extent. Particles keep their motion; positions outside the
    /// new extent wrap back in.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.wrap_all();
    }

    fn wrap_all(&mut self) {
        for p in &mut self.particles {
            p.x = wrap(p.x, self.width);
            p.y = wrap(p.y, self.height);
        }
    }

    /// `#RRGGBB` palette color with the particle's opacity appended as alpha.
    pub fn fill_style(&self, p: &Particle) -> String {
        let base = self.palette.get(p.color).map(String::as_str).unwrap_or("#FFFFFF");
        let alpha = (p.opacity.clamp(0.0, 1.0) * 255.0).floor() as u8;
        format!("{base}{alpha:02x}")
    }
}

// --- Canvas binding ----------------------------------------------------------

struct Scene {
    field: ParticleField,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Scene {
    fn render(&self) {
        let (w, h) = self.field.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
        for p in self.field.particles() {
            self.ctx.begin_path();
            if self.ctx.arc(p.x, p.y, p.size / 2.0, 0.0, TAU).is_err() {
                continue;
            }
            self.ctx.set_fill_style_str(&self.field.fill_style(p));
            self.ctx.fill();
        }
    }

    fn fit(&mut self, win: &Window) {
        let (w, h) = viewport(win);
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
        self.field.resize(w, h);
    }
}

fn viewport(win: &Window) -> (f64, f64) {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
    (w, h)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct ParticleBackground {
    _scene: Rc<RefCell<Scene>>,
}

impl ParticleBackground {
    /// Mount a full-window canvas inside the container and start animating.
    pub fn install(doc: &Document, config: &ParticleConfig) -> Result<Self> {
        let win = dom::window()?;
        let container = doc
            .get_element_by_id(&config.container_id)
            .ok_or_else(|| PortfolioError::MissingElement(format!("#{}", config.container_id)))?;
        let canvas = doc
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(JsValue::from)?;
        let (w, h) = viewport(&win);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
        container.append_child(&canvas)?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| PortfolioError::Js("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;

        let mut rng = fastrand::Rng::with_seed(dom::entropy_seed());
        let field = ParticleField::new(config, w, h, &mut rng);
        let scene = Rc::new(RefCell::new(Scene { field, canvas, ctx }));

        let on_resize = scene.clone();
        dom::listen(&win, "resize", move |_| {
            if let Ok(win) = dom::window() {
                on_resize.borrow_mut().fit(&win);
            }
        })?;

        start_loop(scene.clone());
        log::debug!(target: "particles", "{} particles on {w}x{h}", config.count);
        Ok(Self { _scene: scene })
    }
}

fn start_loop(scene: Rc<RefCell<Scene>>) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        {
            let mut s = scene.borrow_mut();
            s.field.tick();
            s.render();
        }
        if let (Some(w), Some(cb)) = (web_sys::window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (web_sys::window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(count: usize, w: f64, h: f64, seed: u64) -> ParticleField {
        let cfg = ParticleConfig { count, ..ParticleConfig::default() };
        ParticleField::new(&cfg, w, h, &mut fastrand::Rng::with_seed(seed))
    }

    fn in_bounds(f: &ParticleField) -> bool {
        let (w, h) = f.size();
        f.particles().iter().all(|p| p.x >= 0.0 && p.x < w && p.y >= 0.0 && p.y < h)
    }

    #[test]
    fn initial_particles_respect_configured_ranges() {
        let f = field(50, 800.0, 600.0, 7);
        assert_eq!(f.particles().len(), 50);
        assert!(in_bounds(&f));
        for p in f.particles() {
            assert!((-0.5..0.5).contains(&p.vx) && (-0.5..0.5).contains(&p.vy));
            assert!((1.0..3.0).contains(&p.size));
            assert!((0.3..0.8).contains(&p.opacity));
            assert!(p.color < 3);
        }
    }

    #[test]
    fn positions_stay_in_bounds_over_many_ticks() {
        let mut f = field(50, 320.0, 200.0, 42);
        for _ in 0..5_000 {
            f.tick();
            assert!(in_bounds(&f));
        }
        assert_eq!(f.frame(), 5_000);
    }

    #[test]
    fn crossing_an_edge_reenters_on_the_opposite_side() {
        let cfg = ParticleConfig { count: 1, ..ParticleConfig::default() };
        let mut f = ParticleField::new(&cfg, 100.0, 100.0, &mut fastrand::Rng::with_seed(1));
        f.particles[0] = Particle { x: 99.8, y: 0.1, vx: 0.4, vy: -0.3, size: 2.0, opacity: 0.5, color: 0 };
        f.tick();
        let p = &f.particles()[0];
        assert!(p.x < 1.0, "x wrapped to {}", p.x);
        assert!(p.y > 99.0, "y wrapped to {}", p.y);
    }

    #[test]
    fn tiny_negative_positions_wrap_below_extent() {
        assert_eq!(wrap(-1e-18, 100.0), 0.0);
        assert_eq!(wrap(100.0, 100.0), 0.0);
        assert!((wrap(-0.25, 100.0) - 99.75).abs() < 1e-9);
    }

    #[test]
    fn resize_keeps_particles_and_motion() {
        let mut f = field(30, 1000.0, 800.0, 9);
        let before: Vec<(f64, f64)> = f.particles().iter().map(|p| (p.vx, p.vy)).collect();
        f.resize(300.0, 200.0);
        assert_eq!(f.particles().len(), 30);
        assert!(in_bounds(&f));
        let after: Vec<(f64, f64)> = f.particles().iter().map(|p| (p.vx, p.vy)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn opacity_pulses_but_stays_renderable() {
        let mut f = field(10, 100.0, 100.0, 3);
        let start: Vec<f64> = f.particles().iter().map(|p| p.opacity).collect();
        for _ in 0..100 {
            f.tick();
        }
        let now: Vec<f64> = f.particles().iter().map(|p| p.opacity).collect();
        assert_ne!(start, now);
        assert!(now.iter().all(|o| (0.0..=1.0).contains(o)));
    }

    #[test]
    fn fill_style_appends_alpha_byte() {
        let f = field(1, 10.0, 10.0, 5);
        let p = Particle { x: 0.0, y: 0.0, vx: 0.0, vy: 0.0, size: 1.0, opacity: 0.5, color: 1 };
        assert_eq!(f.fill_style(&p), "#00F0FF7f");
        let opaque = Particle { opacity: 1.0, color: 0, ..p };
        assert_eq!(f.fill_style(&opaque), "#F8E602ff");
    }
}
