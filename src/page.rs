//! Page chrome: mobile menu, in-page anchor scrolling, the injected
//! animation style sheet and the `loaded` body marker.

use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom;
use crate::error::{PortfolioError, Result};

const STYLE_ID: &str = "portfolio-animations";

pub const ANIMATION_CSS: &str = r#"
.animate-fade-in {
    animation: fadeInUp 0.8s ease-out forwards;
}

@keyframes fadeInUp {
    from {
        opacity: 0;
        transform: translateY(30px);
    }
    to {
        opacity: 1;
        transform: translateY(0);
    }
}

.animate-glitch {
    animation: glitch 0.3s ease-in-out;
}

.project-card {
    cursor: pointer;
}

.modal-content {
    max-height: 90vh;
    overflow-y: auto;
}

.modal-content::-webkit-scrollbar {
    width: 8px;
}

.modal-content::-webkit-scrollbar-track {
    background: rgba(44, 44, 46, 0.5);
}

.modal-content::-webkit-scrollbar-thumb {
    background: #F8E602;
    border-radius: 4px;
}

.modal-content::-webkit-scrollbar-thumb:hover {
    background: #00F0FF;
}
"#;

/// Fragment target of an in-page link, `None` for bare `#` or external hrefs.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty()).map(|_| href)
}

pub fn install_mobile_menu(doc: &Document) -> Result<()> {
    let button = doc
        .get_element_by_id("mobile-menu-btn")
        .ok_or_else(|| PortfolioError::MissingElement("#mobile-menu-btn".into()))?;
    let menu = doc
        .get_element_by_id("mobile-menu")
        .ok_or_else(|| PortfolioError::MissingElement("#mobile-menu".into()))?;
    dom::listen(&button, "click", move |_| {
        let _ = menu.class_list().toggle("hidden");
    })
}

pub fn install_anchor_scrolling(doc: &Document) -> Result<usize> {
    let anchors = dom::query_all(doc, r##"a[href^="#"]"##)?;
    for anchor in &anchors {
        let link = anchor.clone();
        let doc = doc.clone();
        dom::listen(anchor, "click", move |evt| {
            evt.prevent_default();
            let Some(href) = link.get_attribute("href") else { return };
            let Some(selector) = anchor_target(&href) else { return };
            if let Ok(Some(target)) = doc.query_selector(selector) {
                scroll_to(&target);
            }
        })?;
    }
    Ok(anchors.len())
}

fn scroll_to(target: &Element) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&opts);
}

/// Append the animation style sheet to `<head>` once.
pub fn inject_styles(doc: &Document) -> Result<()> {
    if doc.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let head = doc
        .head()
        .ok_or(PortfolioError::MissingEnvironment("head"))?;
    let style = doc.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(ANIMATION_CSS));
    head.append_child(&style)?;
    Ok(())
}

/// Add `loaded` to `<body>` when the window finishes loading, or right away
/// if it already has.
pub fn mark_loaded(doc: &Document) -> Result<()> {
    if doc.ready_state() == "complete" {
        dom::body(doc)?.class_list().add_1("loaded")?;
        return Ok(());
    }
    let doc = doc.clone();
    let win = dom::window()?;
    dom::listen(&win, "load", move |_| {
        match doc.body() {
            Some(body) => {
                if let Err(e) = body.class_list().add_1("loaded") {
                    log::warn!(target: "page", "loaded marker: {e:?}");
                }
            }
            None => log::warn!(target: "page", "load fired without a body"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target("#projects"), Some("#projects"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("https://example.com/#top"), None);
    }

    #[test]
    fn stylesheet_covers_animation_classes() {
        for needle in [".animate-fade-in", "@keyframes fadeInUp", ".animate-glitch", ".modal-content::-webkit-scrollbar-thumb"] {
            assert!(ANIMATION_CSS.contains(needle), "missing {needle}");
        }
    }
}
