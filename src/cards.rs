//! Project card hover and click behavior.

use web_sys::{Document, Element};

use crate::config::CardConfig;
use crate::dom;
use crate::error::Result;
use crate::modal::ModalController;

const GLITCH_CLASS: &str = "animate-glitch";
const GLITCH_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '-', '=', '[', ']', '{', '}', '|',
    ';', ':', ',', '.', '<', '>', '?',
];
const SCRAMBLE_MARK: &str = "data-scrambling";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardPose {
    Resting,
    Elevated,
}

impl CardPose {
    /// `(box-shadow, transform)` for this pose.
    pub fn styles(self, config: &CardConfig) -> (&str, &str) {
        match self {
            CardPose::Resting => (config.rest_shadow.as_str(), config.rest_transform.as_str()),
            CardPose::Elevated => (config.hover_shadow.as_str(), config.hover_transform.as_str()),
        }
    }
}

/// One frame of the title scramble: the first `revealed` characters are
/// shown as-is, the rest are random glitch characters.
pub fn scramble_frame(original: &str, revealed: usize, rng: &mut fastrand::Rng) -> String {
    original
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i < revealed {
                c
            } else {
                GLITCH_CHARS[rng.usize(..GLITCH_CHARS.len())]
            }
        })
        .collect()
}

/// When frame `step` of the scramble is due, in ms after the hover.
pub fn scramble_delay(interval_ms: u32, step: usize) -> u32 {
    let frames = u32::try_from(step).unwrap_or(u32::MAX).saturating_add(1);
    interval_ms.saturating_mul(frames)
}

fn apply_pose(card: &Element, pose: CardPose, config: &CardConfig) -> Result<()> {
    let (shadow, transform) = pose.styles(config);
    dom::set_style(card, "box-shadow", shadow)?;
    dom::set_style(card, "transform", transform)
}

pub struct CardInteractions {
    _cards: Vec<Element>,
}

impl CardInteractions {
    pub fn install(doc: &Document, config: &CardConfig, modal: ModalController) -> Result<Self> {
        let cards = dom::query_all(doc, &config.selector)?;
        for card in &cards {
            let cfg = config.clone();
            let target = card.clone();
            dom::listen(card, "mouseenter", move |_| {
                if let Err(e) = on_enter(&target, &cfg) {
                    log::error!(target: "cards", "{e}");
                }
            })?;

            let cfg = config.clone();
            let target = card.clone();
            dom::listen(card, "mouseleave", move |_| {
                if let Err(e) = apply_pose(&target, CardPose::Resting, &cfg) {
                    log::error!(target: "cards", "{e}");
                }
            })?;

            let target = card.clone();
            let modal = modal.clone();
            dom::listen(card, "click", move |_| match target.get_attribute("data-project") {
                Some(id) => {
                    if let Err(e) = modal.open(&id) {
                        log::error!(target: "cards", "{e}");
                    }
                }
                None => log::warn!(target: "cards", "project card has no data-project attribute"),
            })?;
        }
        log::debug!(target: "cards", "wired {} project cards", cards.len());
        Ok(Self { _cards: cards })
    }
}

fn on_enter(card: &Element, config: &CardConfig) -> Result<()> {
    if let Some(title) = card.query_selector("h3")? {
        title.class_list().add_1(GLITCH_CLASS)?;
        let t = title.clone();
        dom::set_timeout(config.glitch_ms, move || {
            if let Err(e) = t.class_list().remove_1(GLITCH_CLASS) {
                log::warn!(target: "cards", "glitch class: {e:?}");
            }
        })?;
        if config.scramble_titles {
            scramble_title(title, config)?;
        }
    }
    apply_pose(card, CardPose::Elevated, config)
}

fn scramble_title(title: Element, config: &CardConfig) -> Result<()> {
    // A hover during a running scramble would capture scrambled text.
    if title.has_attribute(SCRAMBLE_MARK) {
        return Ok(());
    }
    let original = title.text_content().unwrap_or_default();
    if original.is_empty() {
        return Ok(());
    }
    title.set_attribute(SCRAMBLE_MARK, "")?;
    let iterations = config.scramble_iterations;
    for step in 0..=iterations {
        let t = title.clone();
        let text = original.clone();
        let delay = scramble_delay(config.scramble_interval_ms, step);
        dom::set_timeout(delay, move || {
            if step == iterations {
                t.set_text_content(Some(&text));
                let _ = t.remove_attribute(SCRAMBLE_MARK);
            } else {
                let mut rng = fastrand::Rng::with_seed(dom::entropy_seed());
                t.set_text_content(Some(&scramble_frame(&text, step, &mut rng)));
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poses_map_to_configured_styles() {
        let cfg = CardConfig::default();
        assert_eq!(
            CardPose::Elevated.styles(&cfg),
            ("0 0 30px rgba(248, 230, 2, 0.4)", "translateY(-10px) scale(1.02)")
        );
        assert_eq!(
            CardPose::Resting.styles(&cfg),
            ("0 0 20px rgba(248, 230, 2, 0.2)", "translateY(0) scale(1)")
        );
    }

    #[test]
    fn scramble_reveals_prefix() {
        let mut rng = fastrand::Rng::with_seed(11);
        let frame = scramble_frame("Veil Of Vows", 4, &mut rng);
        assert_eq!(frame.chars().count(), 12);
        assert!(frame.starts_with("Veil"));
        assert!(frame.chars().skip(4).all(|c| GLITCH_CHARS.contains(&c)));
    }

    #[test]
    fn scramble_fully_revealed_is_identity() {
        let mut rng = fastrand::Rng::with_seed(2);
        assert_eq!(scramble_frame("Miracle X", 9, &mut rng), "Miracle X");
        assert_eq!(scramble_frame("Miracle X", 50, &mut rng), "Miracle X");
    }

    #[test]
    fn scramble_delays_step_and_saturate() {
        assert_eq!(scramble_delay(50, 0), 50);
        assert_eq!(scramble_delay(50, 9), 500);
        assert_eq!(scramble_delay(u32::MAX / 2, 10), u32::MAX);
        assert_eq!(scramble_delay(50, usize::MAX), u32::MAX);
    }

    #[test]
    fn scramble_is_off_unless_enabled() {
        assert!(!CardConfig::default().scramble_titles);
    }
}
