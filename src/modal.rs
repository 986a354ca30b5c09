//! Project detail modal.
//!
//! A modal walks `Closed -> Opening -> Open -> Closing -> Destroyed`. The
//! registry owns those phases for every modal ever opened and is the only
//! place transitions happen, so deferred continuations (the reveal tick and
//! the removal after the closing transition) become no-ops once the modal
//! has moved on. `ModalController` binds the registry to real DOM nodes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::config::{BlankFeatures, ModalConfig};
use crate::dom;
use crate::error::Result;
use crate::projects::{self, ProjectRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Opening,
    Open,
    Closing,
    Destroyed,
}

#[derive(Debug)]
pub struct ModalLifecycle {
    phase: ModalPhase,
}

impl Default for ModalLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalLifecycle {
    pub fn new() -> Self {
        Self { phase: ModalPhase::Closed }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    fn transition(&mut self, from: &[ModalPhase], to: ModalPhase) -> bool {
        if from.contains(&self.phase) {
            self.phase = to;
            true
        } else {
            false
        }
    }

    /// Node inserted in its hidden state.
    pub fn mount(&mut self) -> bool {
        self.transition(&[ModalPhase::Closed], ModalPhase::Opening)
    }

    /// Visible styles applied.
    pub fn reveal(&mut self) -> bool {
        self.transition(&[ModalPhase::Opening], ModalPhase::Open)
    }

    /// Visible styles removed, removal pending.
    pub fn begin_close(&mut self) -> bool {
        self.transition(&[ModalPhase::Opening, ModalPhase::Open], ModalPhase::Closing)
    }

    /// Node detached.
    pub fn finish_close(&mut self) -> bool {
        self.transition(&[ModalPhase::Closing], ModalPhase::Destroyed)
    }

    pub fn is_live(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Open)
    }
}

/// Everything the modal displays, resolved from a `ProjectRecord`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalView {
    pub project_id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: Vec<&'static str>,
    pub features: Vec<&'static str>,
    pub image: &'static str,
}

impl ModalView {
    pub fn from_record(record: &ProjectRecord, policy: BlankFeatures) -> Self {
        Self {
            project_id: record.id,
            title: record.title,
            description: record.description,
            technologies: record.technologies.to_vec(),
            features: record.features(policy),
            image: record.image,
        }
    }

    pub fn for_project(id: &str, policy: BlankFeatures) -> Result<Self> {
        Ok(Self::from_record(projects::lookup(id)?, policy))
    }
}

pub type ModalId = u32;

/// Result of a successful `ModalRegistry::open`.
#[derive(Debug)]
pub struct OpenPlan {
    pub id: ModalId,
    pub view: ModalView,
    /// Live modals moved to `Closing` to keep the new one exclusive.
    pub superseded: Vec<ModalId>,
}

#[derive(Debug)]
pub struct ModalRegistry {
    next_id: ModalId,
    exclusive: bool,
    policy: BlankFeatures,
    entries: Vec<(ModalId, ModalLifecycle)>,
}

impl ModalRegistry {
    pub fn new(exclusive: bool, policy: BlankFeatures) -> Self {
        Self { next_id: 1, exclusive, policy, entries: Vec::new() }
    }

    /// Resolve the project and mount a new modal. Fails before touching any
    /// existing modal when the identifier is unknown.
    pub fn open(&mut self, project_id: &str) -> Result<OpenPlan> {
        let view = ModalView::for_project(project_id, self.policy)?;
        Ok(self.admit(view))
    }

    /// Mount a modal for an already resolved view.
    pub fn admit(&mut self, view: ModalView) -> OpenPlan {
        let superseded = if self.exclusive {
            self.entries
                .iter_mut()
                .filter_map(|(id, lc)| lc.begin_close().then_some(*id))
                .collect()
        } else {
            Vec::new()
        };
        let id = self.next_id;
        self.next_id += 1;
        let mut lifecycle = ModalLifecycle::new();
        lifecycle.mount();
        self.entries.push((id, lifecycle));
        OpenPlan { id, view, superseded }
    }

    /// Drop a modal whose DOM never came up, whatever its phase.
    pub fn forget(&mut self, id: ModalId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(eid, _)| *eid != id);
        self.entries.len() != before
    }

    fn entry(&mut self, id: ModalId) -> Option<&mut ModalLifecycle> {
        self.entries.iter_mut().find(|(eid, _)| *eid == id).map(|(_, lc)| lc)
    }

    pub fn reveal(&mut self, id: ModalId) -> bool {
        self.entry(id).is_some_and(|lc| lc.reveal())
    }

    pub fn begin_close(&mut self, id: ModalId) -> bool {
        self.entry(id).is_some_and(|lc| lc.begin_close())
    }

    /// Completes the closing transition and forgets the modal.
    pub fn finish_close(&mut self, id: ModalId) -> bool {
        let done = self.entry(id).is_some_and(|lc| lc.finish_close());
        if done {
            self.entries.retain(|(eid, _)| *eid != id);
        }
        done
    }

    /// Phase of `id`; forgotten or never-issued ids read as `Destroyed`.
    pub fn phase(&self, id: ModalId) -> ModalPhase {
        self.entries
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, lc)| lc.phase())
            .unwrap_or(ModalPhase::Destroyed)
    }

    pub fn live(&self) -> Vec<ModalId> {
        self.entries
            .iter()
            .filter(|(_, lc)| lc.is_live())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Modals still attached to the document, closing ones included.
    pub fn attached(&self) -> usize {
        self.entries.len()
    }
}

// --- DOM binding -------------------------------------------------------------

const OVERLAY_CLASS: &str = "fixed inset-0 bg-cyber-black/80 backdrop-blur-md z-50 flex items-center justify-center p-4 opacity-0 transition-opacity duration-300";
const CONTENT_CLASS: &str = "modal-content bg-cyber-gray border border-cyber-yellow/50 rounded-xl max-w-4xl w-full max-h-[90vh] overflow-y-auto transform scale-95 transition-transform duration-300";
const OVERLAY_VISIBLE: &str = "opacity-100";
const CONTENT_VISIBLE: &str = "scale-100";

const CLOSE_ICON: &str = r#"<svg class="w-8 h-8" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"></path></svg>"#;
const CHECK_ICON: &str = r#"<svg class="w-4 h-4 text-cyber-green" fill="currentColor" viewBox="0 0 20 20"><path fill-rule="evenodd" d="M16.707 5.293a1 1 0 010 1.414l-8 8a1 1 0 01-1.414 0l-4-4a1 1 0 011.414-1.414L8 12.586l7.293-7.293a1 1 0 011.414 0z" clip-rule="evenodd"></path></svg>"#;

#[derive(Clone)]
struct ModalNodes {
    overlay: Element,
    content: Element,
}

struct ModalShared {
    document: Document,
    config: ModalConfig,
    registry: ModalRegistry,
    nodes: HashMap<ModalId, ModalNodes>,
}

/// Opens and closes project modals on a document. Cheap to clone; clones
/// share one registry.
#[derive(Clone)]
pub struct ModalController {
    shared: Rc<RefCell<ModalShared>>,
}

impl ModalController {
    pub fn new(document: Document, config: ModalConfig) -> Self {
        let registry = ModalRegistry::new(config.exclusive, config.blank_features);
        Self {
            shared: Rc::new(RefCell::new(ModalShared {
                document,
                config,
                registry,
                nodes: HashMap::new(),
            })),
        }
    }

    pub fn open(&self, project_id: &str) -> Result<ModalId> {
        let (view, doc) = {
            let shared = self.shared.borrow();
            let view = ModalView::for_project(project_id, shared.config.blank_features)?;
            (view, shared.document.clone())
        };
        let (nodes, close_button) = build_modal(&doc, &view)?;
        dom::body(&doc)?.append_child(&nodes.overlay)?;

        // Only a modal with nodes in the document enters the registry.
        let plan = {
            let mut shared = self.shared.borrow_mut();
            let plan = shared.registry.admit(view);
            shared.nodes.insert(plan.id, nodes.clone());
            plan
        };
        let id = plan.id;
        for old in &plan.superseded {
            if let Err(e) = self.hide_and_schedule_removal(*old) {
                log::warn!(target: "modal", "closing superseded #{old}: {e}");
            }
        }
        if let Err(e) = self.wire(id, &nodes, &close_button) {
            self.discard(id);
            return Err(e);
        }
        log::debug!(target: "modal", "opened '{}' as modal #{id}", plan.view.project_id);
        Ok(id)
    }

    fn wire(&self, id: ModalId, nodes: &ModalNodes, close_button: &Element) -> Result<()> {
        let overlay_js: JsValue = nodes.overlay.clone().into();
        let ctrl = self.clone();
        dom::listen(&nodes.overlay, "click", move |evt| {
            // Clicks inside the content panel bubble up here too.
            let on_scrim = evt.target().is_some_and(|t| JsValue::from(t) == overlay_js);
            if on_scrim {
                ctrl.close_or_log(id);
            }
        })?;
        let ctrl = self.clone();
        dom::listen(close_button, "click", move |evt| {
            evt.stop_propagation();
            ctrl.close_or_log(id);
        })?;
        let open_delay = self.shared.borrow().config.open_delay_ms;
        let ctrl = self.clone();
        dom::set_timeout(open_delay, move || ctrl.reveal(id))?;
        Ok(())
    }

    fn discard(&self, id: ModalId) {
        let mut shared = self.shared.borrow_mut();
        shared.registry.forget(id);
        if let Some(nodes) = shared.nodes.remove(&id) {
            nodes.overlay.remove();
        }
    }

    fn reveal(&self, id: ModalId) {
        let mut shared = self.shared.borrow_mut();
        if !shared.registry.reveal(id) {
            return;
        }
        if let Some(nodes) = shared.nodes.get(&id) {
            for (el, class) in [(&nodes.overlay, OVERLAY_VISIBLE), (&nodes.content, CONTENT_VISIBLE)] {
                if let Err(e) = el.class_list().add_1(class) {
                    log::warn!(target: "modal", "reveal #{id}: {e:?}");
                }
            }
        }
    }

    /// Start the closing transition. A modal already closing or gone is left
    /// alone.
    pub fn close(&self, id: ModalId) -> Result<()> {
        if !self.shared.borrow_mut().registry.begin_close(id) {
            return Ok(());
        }
        self.hide_and_schedule_removal(id)
    }

    pub fn close_all(&self) -> Result<()> {
        let live = self.shared.borrow().registry.live();
        for id in live {
            self.close(id)?;
        }
        Ok(())
    }

    pub fn phase(&self, id: ModalId) -> ModalPhase {
        self.shared.borrow().registry.phase(id)
    }

    pub fn attached(&self) -> usize {
        self.shared.borrow().registry.attached()
    }

    fn close_or_log(&self, id: ModalId) {
        if let Err(e) = self.close(id) {
            log::error!(target: "modal", "{e}");
        }
    }

    // Caller has already moved `id` to Closing.
    fn hide_and_schedule_removal(&self, id: ModalId) -> Result<()> {
        let duration = {
            let shared = self.shared.borrow();
            if let Some(nodes) = shared.nodes.get(&id) {
                nodes.overlay.class_list().remove_1(OVERLAY_VISIBLE)?;
                nodes.content.class_list().remove_1(CONTENT_VISIBLE)?;
            }
            shared.config.close_duration_ms
        };
        let ctrl = self.clone();
        dom::set_timeout(duration, move || ctrl.destroy(id))?;
        Ok(())
    }

    fn destroy(&self, id: ModalId) {
        let mut shared = self.shared.borrow_mut();
        if shared.registry.finish_close(id) {
            if let Some(nodes) = shared.nodes.remove(&id) {
                nodes.overlay.remove();
            }
        }
    }
}

fn build_modal(doc: &Document, view: &ModalView) -> Result<(ModalNodes, Element)> {
    let overlay = dom::create(doc, "div", OVERLAY_CLASS)?;
    let content = dom::create(doc, "div", CONTENT_CLASS)?;
    let frame = dom::create(doc, "div", "relative")?;

    let close = dom::create(
        doc,
        "button",
        "absolute top-4 right-4 z-10 text-cyber-white hover:text-cyber-yellow transition-colors",
    )?;
    close.set_inner_html(CLOSE_ICON);
    close.set_attribute("aria-label", "Close")?;
    frame.append_child(&close)?;

    let img = dom::create(doc, "img", "w-full h-64 object-cover rounded-t-xl")?;
    img.set_attribute("src", view.image)?;
    img.set_attribute("alt", view.title)?;
    frame.append_child(&img)?;

    let body = dom::create(doc, "div", "p-8")?;
    let title = dom::create(doc, "h2", "font-orbitron font-bold text-3xl mb-4 neon-text text-cyber-yellow")?;
    title.set_text_content(Some(view.title));
    body.append_child(&title)?;
    let desc = dom::create(doc, "p", "text-lg text-gray-300 mb-6")?;
    desc.set_text_content(Some(view.description));
    body.append_child(&desc)?;

    let grid = dom::create(doc, "div", "grid md:grid-cols-2 gap-8")?;

    let tech_col = dom::create(doc, "div", "")?;
    let tech_head = dom::create(doc, "h3", "font-orbitron font-bold text-xl mb-4 text-cyber-cyan")?;
    tech_head.set_text_content(Some("Technologies"));
    tech_col.append_child(&tech_head)?;
    let tags = dom::create(doc, "div", "flex flex-wrap gap-2 modal-technologies")?;
    for tech in &view.technologies {
        let tag = dom::create(
            doc,
            "span",
            "bg-cyber-cyan/20 text-cyber-cyan px-3 py-1 rounded-full text-sm font-medium",
        )?;
        tag.set_text_content(Some(tech));
        tags.append_child(&tag)?;
    }
    tech_col.append_child(&tags)?;
    grid.append_child(&tech_col)?;

    let feat_col = dom::create(doc, "div", "")?;
    let feat_head = dom::create(doc, "h3", "font-orbitron font-bold text-xl mb-4 text-cyber-green")?;
    feat_head.set_text_content(Some("Key Features"));
    feat_col.append_child(&feat_head)?;
    let list = dom::create(doc, "ul", "space-y-2 modal-features")?;
    for feature in &view.features {
        let item = dom::create(doc, "li", "flex items-center space-x-2")?;
        item.set_inner_html(CHECK_ICON);
        let text = dom::create(doc, "span", "text-gray-300")?;
        text.set_text_content(Some(feature));
        item.append_child(&text)?;
        list.append_child(&item)?;
    }
    feat_col.append_child(&list)?;
    grid.append_child(&feat_col)?;
    body.append_child(&grid)?;

    let actions = dom::create(doc, "div", "flex space-x-4 mt-8")?;
    for class in [
        "cyber-btn px-6 py-3 rounded-lg font-orbitron font-bold",
        "border-2 border-cyber-cyan px-6 py-3 rounded-lg font-orbitron font-bold text-cyber-cyan hover:bg-cyber-cyan hover:text-cyber-black transition-all duration-300",
    ] {
        let button = dom::create(doc, "button", class)?;
        button.set_text_content(Some("restricted"));
        actions.append_child(&button)?;
    }
    body.append_child(&actions)?;

    frame.append_child(&body)?;
    content.append_child(&frame)?;
    overlay.append_child(&content)?;
    Ok((ModalNodes { overlay, content }, close))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortfolioError;
    use crate::projects::PROJECTS;

    #[test]
    fn lifecycle_walks_every_phase_in_order() {
        let mut lc = ModalLifecycle::new();
        assert_eq!(lc.phase(), ModalPhase::Closed);
        assert!(lc.mount());
        assert_eq!(lc.phase(), ModalPhase::Opening);
        assert!(lc.reveal());
        assert_eq!(lc.phase(), ModalPhase::Open);
        assert!(lc.begin_close());
        assert_eq!(lc.phase(), ModalPhase::Closing);
        assert!(lc.finish_close());
        assert_eq!(lc.phase(), ModalPhase::Destroyed);
    }

    #[test]
    fn lifecycle_rejects_out_of_order_transitions() {
        let mut lc = ModalLifecycle::new();
        assert!(!lc.reveal());
        assert!(!lc.begin_close());
        assert!(!lc.finish_close());
        lc.mount();
        assert!(!lc.mount());
        assert!(!lc.finish_close());
    }

    #[test]
    fn every_project_renders_its_record() {
        for record in PROJECTS {
            let view = ModalView::for_project(record.id, BlankFeatures::Preserve).unwrap();
            assert_eq!(view.title, record.title);
            assert_eq!(view.description, record.description);
            assert_eq!(view.technologies, record.technologies);
            assert_eq!(view.features, record.features);
            assert_eq!(view.image, record.image);
        }
    }

    #[test]
    fn neon_racer_scenario() {
        let view = ModalView::for_project("neon-racer", BlankFeatures::Preserve).unwrap();
        assert_eq!(view.title, "Veil Of Vows");
        assert_eq!(view.technologies, vec!["Unity", "main scripter", "C#"]);
        assert_eq!(view.features.len(), 3);
    }

    #[test]
    fn unknown_project_fails_without_touching_live_modals() {
        let mut reg = ModalRegistry::new(true, BlankFeatures::Preserve);
        let first = reg.open("cyber-glitch").unwrap().id;
        let err = reg.open("does-not-exist").unwrap_err();
        assert!(matches!(err, PortfolioError::UnknownProject(_)));
        assert_eq!(reg.phase(first), ModalPhase::Opening);
        assert_eq!(reg.attached(), 1);
    }

    #[test]
    fn open_then_close_then_wait_removes_modal() {
        let mut reg = ModalRegistry::new(true, BlankFeatures::Preserve);
        let id = reg.open("neon-racer").unwrap().id;
        assert!(reg.begin_close(id));
        assert_eq!(reg.phase(id), ModalPhase::Closing);
        assert!(reg.finish_close(id));
        assert_eq!(reg.phase(id), ModalPhase::Destroyed);
        assert_eq!(reg.attached(), 0);
    }

    #[test]
    fn closing_twice_or_after_removal_is_a_no_op() {
        let mut reg = ModalRegistry::new(true, BlankFeatures::Preserve);
        let id = reg.open("neural-nexus").unwrap().id;
        reg.reveal(id);
        assert!(reg.begin_close(id));
        assert!(!reg.begin_close(id));
        assert!(reg.finish_close(id));
        assert!(!reg.begin_close(id));
        assert!(!reg.finish_close(id));
        assert!(!reg.begin_close(4242));
    }

    #[test]
    fn reveal_after_close_does_nothing() {
        let mut reg = ModalRegistry::new(true, BlankFeatures::Preserve);
        let id = reg.open("neon-racer").unwrap().id;
        reg.begin_close(id);
        assert!(!reg.reveal(id));
        assert_eq!(reg.phase(id), ModalPhase::Closing);
        reg.finish_close(id);
        assert!(!reg.reveal(id));
    }

    #[test]
    fn exclusive_registry_supersedes_live_modal() {
        let mut reg = ModalRegistry::new(true, BlankFeatures::Preserve);
        let first = reg.open("neon-racer").unwrap();
        reg.reveal(first.id);
        let second = reg.open("cyber-glitch").unwrap();
        assert_eq!(second.superseded, vec![first.id]);
        assert_eq!(reg.phase(first.id), ModalPhase::Closing);
        assert_eq!(reg.live(), vec![second.id]);
    }

    #[test]
    fn non_exclusive_registry_stacks_modals() {
        let mut reg = ModalRegistry::new(false, BlankFeatures::Preserve);
        let first = reg.open("neon-racer").unwrap();
        let second = reg.open("neon-racer").unwrap();
        assert!(second.superseded.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(reg.live(), vec![first.id, second.id]);
        assert_eq!(reg.attached(), 2);
    }

    #[test]
    fn forgotten_modal_leaves_no_trace() {
        let mut reg = ModalRegistry::new(true, BlankFeatures::Preserve);
        let view = ModalView::for_project("cyber-glitch", BlankFeatures::Preserve).unwrap();
        let id = reg.admit(view).id;
        assert!(reg.forget(id));
        assert!(reg.live().is_empty());
        assert_eq!(reg.attached(), 0);
        assert_eq!(reg.phase(id), ModalPhase::Destroyed);
        assert!(!reg.forget(id));
    }
}
