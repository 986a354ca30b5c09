//! Scroll-triggered effects driven by `IntersectionObserver`.
//!
//! Each effect is one-shot per element: `VisibilityLatch` remembers which
//! elements already fired, and the observer stops watching them afterwards.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::config::AnimatorConfig;
use crate::dom;
use crate::error::Result;

// Browsers report ratios a hair under the configured threshold on the
// crossing callback.
const RATIO_TOLERANCE: f64 = 0.01;

/// Fires at most once per key, the first time it is seen intersecting at or
/// above `threshold`.
#[derive(Debug)]
pub struct VisibilityLatch<K> {
    threshold: f64,
    fired: Vec<K>,
}

impl<K: PartialEq> VisibilityLatch<K> {
    pub fn new(threshold: f64) -> Self {
        Self { threshold, fired: Vec::new() }
    }

    /// Returns `true` exactly when the effect for `key` should run now.
    pub fn observe(&mut self, key: K, ratio: f64, intersecting: bool) -> bool {
        if !intersecting || ratio + RATIO_TOLERANCE < self.threshold {
            return false;
        }
        if self.fired.contains(&key) {
            return false;
        }
        self.fired.push(key);
        true
    }

    pub fn has_fired(&self, key: &K) -> bool {
        self.fired.contains(key)
    }

    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }
}

/// Fill level of a skill bar, in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillLevel(f64);

impl SkillLevel {
    pub fn new(percent: f64) -> Self {
        Self(percent.clamp(0.0, 100.0))
    }

    /// Accepts `"85"`, `"85%"` and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        number
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Self::new)
    }

    pub fn percent(self) -> f64 {
        self.0
    }

    pub fn css(self) -> String {
        format!("{}%", self.0)
    }
}

/// One skill bar reveal: collapse to zero, wait `delay_ms`, then let a CSS
/// `ease-out` width transition of `duration_ms` carry the bar to `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillBarReveal {
    pub target: SkillLevel,
    pub delay_ms: u32,
    pub duration_ms: u32,
}

impl SkillBarReveal {
    pub fn transition_css(&self) -> String {
        format!("width {}s ease-out", self.duration_ms as f64 / 1000.0)
    }

    /// Inline styles set on the bar once the delay has passed.
    pub fn expanded_styles(&self) -> [(&'static str, String); 2] {
        [("transition", self.transition_css()), ("width", self.target.css())]
    }

    pub fn start(self, bar: Element) -> Result<()> {
        dom::set_style(&bar, "width", "0%")?;
        dom::set_timeout(self.delay_ms, move || {
            for (property, value) in self.expanded_styles() {
                if let Err(e) = dom::set_style(&bar, property, &value) {
                    log::warn!(target: "animator", "skill bar {property}: {e}");
                }
            }
        })?;
        Ok(())
    }
}

/// Target for a bar: the `data-skill-level` attribute, or the declared
/// inline width for markup that predates the attribute.
pub fn skill_target(attribute: Option<&str>, inline_width: Option<&str>) -> Option<SkillLevel> {
    attribute
        .and_then(SkillLevel::parse)
        .or_else(|| inline_width.and_then(SkillLevel::parse))
}

// --- DOM binding -------------------------------------------------------------

type EntryHandler = Box<dyn FnMut(&IntersectionObserverEntry, &IntersectionObserver)>;

fn observe_all(
    targets: &[Element],
    threshold: f64,
    root_margin: Option<&str>,
    mut handler: EntryHandler,
) -> Result<IntersectionObserver> {
    let closure = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                handler(&entry, &observer);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
    closure.forget();
    for target in targets {
        observer.observe(target);
    }
    Ok(observer)
}

/// Adds the fade-in class to cards and skill items as they scroll in.
pub struct FadeInAnimator {
    _observer: IntersectionObserver,
}

impl FadeInAnimator {
    pub fn install(doc: &Document, config: &AnimatorConfig) -> Result<Self> {
        let targets = dom::query_all(doc, &config.fade_selector)?;
        let mut latch = VisibilityLatch::new(config.fade_threshold);
        let class = config.fade_class.clone();
        let observer = observe_all(
            &targets,
            config.fade_threshold,
            Some(&config.fade_root_margin),
            Box::new(move |entry: &IntersectionObserverEntry, observer: &IntersectionObserver| {
                let target = entry.target();
                let fire = latch.observe(
                    target.clone(),
                    entry.intersection_ratio(),
                    entry.is_intersecting(),
                );
                if fire {
                    if let Err(e) = target.class_list().add_1(&class) {
                        log::warn!(target: "animator", "fade-in class: {e:?}");
                    }
                    observer.unobserve(&target);
                }
            }),
        )?;
        log::debug!(target: "animator", "fade-in watching {} elements", targets.len());
        Ok(Self { _observer: observer })
    }
}

/// Grows each skill bar from zero to its level once it is half visible.
pub struct SkillBarAnimator {
    _observer: IntersectionObserver,
}

impl SkillBarAnimator {
    pub fn install(doc: &Document, config: &AnimatorConfig) -> Result<Self> {
        let bars = dom::query_all(doc, &config.skill_selector)?;
        // Resolve targets up front so a collapsed bar never reads back its own 0%.
        let mut plans: Vec<(Element, SkillBarReveal)> = Vec::new();
        for bar in bars {
            let attribute = bar.get_attribute("data-skill-level");
            let inline = dom::inline_style(&bar, "width");
            match skill_target(attribute.as_deref(), inline.as_deref()) {
                Some(target) => plans.push((
                    bar,
                    SkillBarReveal {
                        target,
                        delay_ms: config.skill_delay_ms,
                        duration_ms: config.skill_duration_ms,
                    },
                )),
                None => log::warn!(target: "animator", "skill bar without a level; skipped"),
            }
        }
        let targets: Vec<Element> = plans.iter().map(|(el, _)| el.clone()).collect();
        let mut latch = VisibilityLatch::new(config.skill_threshold);
        let observer = observe_all(
            &targets,
            config.skill_threshold,
            None,
            Box::new(move |entry: &IntersectionObserverEntry, observer: &IntersectionObserver| {
                let bar = entry.target();
                if !latch.observe(bar.clone(), entry.intersection_ratio(), entry.is_intersecting()) {
                    return;
                }
                observer.unobserve(&bar);
                if let Some((_, reveal)) = plans.iter().find(|(el, _)| *el == bar) {
                    if let Err(e) = reveal.start(bar) {
                        log::error!(target: "animator", "{e}");
                    }
                }
            }),
        )?;
        Ok(Self { _observer: observer })
    }
}

/// Swaps `data-src` into `src` for images as they approach the viewport.
pub struct LazyImages {
    _observer: IntersectionObserver,
}

impl LazyImages {
    pub fn install(doc: &Document, config: &AnimatorConfig) -> Result<Self> {
        let images = dom::query_all(doc, &config.lazy_image_selector)?;
        let observer = observe_all(
            &images,
            0.0,
            None,
            Box::new(|entry: &IntersectionObserverEntry, observer: &IntersectionObserver| {
                if !entry.is_intersecting() {
                    return;
                }
                let target = entry.target();
                if let (Some(img), Some(src)) = (
                    target.dyn_ref::<HtmlImageElement>(),
                    target.get_attribute("data-src"),
                ) {
                    img.set_src(&src);
                }
                let _ = target.class_list().remove_1("lazy");
                observer.unobserve(&target);
            }),
        )?;
        Ok(Self { _observer: observer })
    }
}
