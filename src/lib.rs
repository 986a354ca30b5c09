//! Cyber portfolio page interactivity.
//!
//! Every effect on the page is an explicitly constructed controller:
//! typewriter, particle background, fade-in and skill-bar animators, radar
//! chart, project cards and the project modal. `start_portfolio()` builds them
//! once, in a fixed order, after the document is parsed. A missing element or
//! library disables only its own effect.
//!
//! The simulation and state-machine halves of each controller (particle
//! field, modal registry, visibility latch, skill-bar timing) are plain Rust
//! and tested natively; the browser wiring only runs under wasm.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::Document;

pub mod animator;
mod banner;
pub mod cards;
pub mod chart;
pub mod config;
mod dom;
pub mod error;
pub mod modal;
pub mod page;
pub mod particles;
pub mod projects;
pub mod typewriter;

pub use config::PortfolioConfig;
pub use error::PortfolioError;
pub use projects::{PROJECTS, ProjectRecord};

use animator::{FadeInAnimator, LazyImages, SkillBarAnimator};
use cards::CardInteractions;
use chart::RadarChart;
use modal::ModalController;
use particles::ParticleBackground;
use typewriter::Typewriter;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    wasm_logger::init(wasm_logger::Config::new(level));
}

/// The live controllers. Held for the lifetime of the page.
#[allow(dead_code)]
struct Portfolio {
    config: PortfolioConfig,
    modal: ModalController,
    typewriter: Option<Typewriter>,
    particles: Option<ParticleBackground>,
    fade_in: Option<FadeInAnimator>,
    chart: Option<RadarChart>,
    cards: Option<CardInteractions>,
    skill_bars: Option<SkillBarAnimator>,
    lazy_images: Option<LazyImages>,
}

/// Where `start_portfolio` is in its one-time boot.
enum BootState {
    Idle,
    /// Waiting for `DOMContentLoaded`.
    Pending,
    Running(Portfolio),
}

// All DOM state lives on the UI thread.
thread_local! {
    static PORTFOLIO: RefCell<BootState> = const { RefCell::new(BootState::Idle) };
}

/// Move `Idle -> Pending`. `false` when a boot is already pending or done.
fn claim_start() -> bool {
    PORTFOLIO.with(|p| {
        let mut state = p.borrow_mut();
        if matches!(*state, BootState::Idle) {
            *state = BootState::Pending;
            true
        } else {
            false
        }
    })
}

fn finish_start(portfolio: Portfolio) {
    PORTFOLIO.with(|p| p.replace(BootState::Running(portfolio)));
}

/// Whether a failed initializer just means the page does not use that effect.
fn is_absent(err: &PortfolioError) -> bool {
    matches!(err, PortfolioError::MissingElement(_) | PortfolioError::MissingLibrary(_))
}

fn optional<T>(name: &str, result: error::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) if is_absent(&e) => {
            log::debug!(target: "init", "{name} disabled: {e}");
            None
        }
        Err(e) => {
            log::error!(target: "init", "{name} failed: {e}");
            None
        }
    }
}

fn initialize(doc: &Document, config: PortfolioConfig) -> Portfolio {
    optional("mobile menu", page::install_mobile_menu(doc));
    let typewriter = optional("typewriter", Typewriter::install(doc, &config.typewriter));
    let particles = optional("particles", ParticleBackground::install(doc, &config.particles));
    let fade_in = optional("fade-in", FadeInAnimator::install(doc, &config.animator));
    let chart = optional("skills chart", RadarChart::install(doc, &config.chart));
    let modal = ModalController::new(doc.clone(), config.modal.clone());
    let cards = optional("project cards", CardInteractions::install(doc, &config.cards, modal.clone()));
    let skill_bars = optional("skill bars", SkillBarAnimator::install(doc, &config.animator));
    optional("styles", page::inject_styles(doc));
    banner::print_banner();
    optional("anchor scrolling", page::install_anchor_scrolling(doc));
    let lazy_images = optional("lazy images", LazyImages::install(doc, &config.animator));
    optional("loaded marker", page::mark_loaded(doc));
    log::info!(target: "init", "portfolio ready");
    Portfolio {
        config,
        modal,
        typewriter,
        particles,
        fade_in,
        chart,
        cards,
        skill_bars,
        lazy_images,
    }
}

fn boot(config: PortfolioConfig) -> error::Result<()> {
    let doc = dom::document()?;
    if !claim_start() {
        log::warn!(target: "init", "portfolio already started");
        return Ok(());
    }
    if doc.ready_state() == "loading" {
        let target = doc.clone();
        let mut pending = Some(config);
        let listening = dom::listen(&doc, "DOMContentLoaded", move |_| {
            if let Some(cfg) = pending.take() {
                finish_start(initialize(&target, cfg));
            }
        });
        if listening.is_err() {
            PORTFOLIO.with(|p| p.replace(BootState::Idle));
        }
        listening
    } else {
        finish_start(initialize(&doc, config));
        Ok(())
    }
}

#[wasm_bindgen]
pub fn start_portfolio() -> Result<(), JsValue> {
    boot(PortfolioConfig::default()).map_err(Into::into)
}

/// Start with a JSON overlay on the default configuration.
#[wasm_bindgen]
pub fn start_portfolio_with_config(json: &str) -> Result<(), JsValue> {
    let config = PortfolioConfig::from_json(json)?;
    boot(config).map_err(Into::into)
}

fn with_modal<T>(f: impl FnOnce(&ModalController) -> error::Result<T>) -> error::Result<T> {
    let modal = PORTFOLIO
        .with(|p| match &*p.borrow() {
            BootState::Running(portfolio) => Some(portfolio.modal.clone()),
            _ => None,
        })
        .ok_or(PortfolioError::NotStarted)?;
    f(&modal)
}

/// Open the detail modal for a project id. Throws for unknown ids.
#[wasm_bindgen]
pub fn open_project(id: &str) -> Result<u32, JsValue> {
    with_modal(|m| m.open(id)).map_err(|e| {
        log::error!(target: "modal", "{e}");
        e.into()
    })
}

#[wasm_bindgen]
pub fn close_all_modals() -> Result<(), JsValue> {
    with_modal(|m| m.close_all()).map_err(Into::into)
}
