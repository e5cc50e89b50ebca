//! Interaction engine: turns pointer and key events into element geometry changes.
//!
//! [`EngineCore`] is the state machine. It works purely in label units and
//! owns the label, the selection, and the active gesture. [`Engine`] is the
//! host-facing wrapper: it accepts device-pixel [`DevicePoint`]s, converts them
//! through its [`Viewport`], and delegates. Device pixels never reach the core.
//!
//! Every handler runs to completion and returns the [`Action`]s the host
//! should act on (redraw, update the cursor, persist a committed gesture).

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::element::{ElementId, GeometryPatch, Label, LabelElement};
use crate::geometry;
use crate::hit::{self, Cursor, Handle, HitPart};
use crate::input::{Button, InputState, Key, Tool, UiState};
use crate::units::{DevicePoint, Point, Viewport};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Live geometry of an element changed during a gesture.
    ElementUpdated { id: ElementId, patch: GeometryPatch },
    /// A gesture finished; `patch` holds every field that differs from press time.
    GestureCommitted { id: ElementId, patch: GeometryPatch },
    /// A gesture was aborted and the element restored to its press-time geometry.
    GestureCancelled { id: ElementId },
    /// The selected element changed.
    SelectionChanged(Option<ElementId>),
    /// The pointer cursor hint changed.
    SetCursor(Cursor),
    /// The label needs to be redrawn.
    RenderNeeded,
}

/// Label-space engine state: selection, gesture, and the label it edits.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub label: Label,
    pub ui: UiState,
    pub input: InputState,
    pub config: EngineConfig,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Data inputs ---

    /// Replace the label contents. Drops any selection and gesture.
    pub fn load(&mut self, elements: Vec<LabelElement>) {
        self.label = Label::from_elements(elements);
        self.ui.selected_id = None;
        self.input = InputState::Idle;
    }

    /// Add (or replace) an element created by the editor.
    pub fn apply_insert(&mut self, element: LabelElement) {
        self.label.push(element);
    }

    /// Remove an element deleted by the editor. Selection and any gesture on it are dropped.
    pub fn apply_remove(&mut self, id: &ElementId) -> Option<LabelElement> {
        let removed = self.label.remove(id)?;
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
        }
        if self.gesture_target() == Some(*id) || matches!(self.input, InputState::Hovering { id: h, .. } if h == *id) {
            self.input = InputState::Idle;
        }
        Some(removed)
    }

    // --- Tool ---

    /// Set the active tool. Switching away mid-gesture cancels the gesture.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let actions = if tool.can_manipulate() { Vec::new() } else { self.cancel() };
        self.ui.tool = tool;
        actions
    }

    // --- Input events ---

    /// Resolve the target under `pt` and start a gesture on it.
    ///
    /// Only the primary button acts. A press while a gesture is already active is ignored.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || self.input.is_active() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        let Some(hit) = hit::hit_test(pt, &self.label, self.ui.selected_id, &self.config) else {
            self.input = InputState::Idle;
            if self.select(None) {
                actions.push(Action::SelectionChanged(None));
                actions.push(Action::RenderNeeded);
            }
            self.push_cursor(&mut actions, Cursor::Default);
            return actions;
        };

        let id = hit.element_id;
        if self.select(Some(id)) {
            actions.push(Action::SelectionChanged(Some(id)));
            actions.push(Action::RenderNeeded);
        }

        let Some(origin) = self.label.get(&id).map(|el| el.geometry) else {
            return actions;
        };

        if !self.ui.tool.can_manipulate() {
            self.input = InputState::Hovering { id, handle: hit.handle() };
            return actions;
        }

        let (state, cursor) = match hit.part {
            HitPart::Body => (InputState::Dragging { id, start: pt, origin }, Cursor::Move),
            HitPart::Handle(Handle::Rotate) => (InputState::Rotating { id, start: pt, origin }, Cursor::Grabbing),
            HitPart::Handle(handle) => (InputState::Resizing { id, handle, start: pt, origin }, handle.cursor()),
        };
        debug!(%id, part = ?hit.part, x = pt.x, y = pt.y, "gesture started");
        self.input = state;
        self.push_cursor(&mut actions, cursor);
        actions
    }

    /// Advance the active gesture, or update hover state when no button is held.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let (id, patch) = match self.input {
            InputState::Dragging { id, start, origin } => (id, geometry::move_by(&origin, pt - start)),
            InputState::Resizing { id, handle, start, origin } => (id, geometry::resize(&origin, handle, pt - start)),
            InputState::Rotating { id, origin, .. } => (id, geometry::rotation_toward(&origin, pt)),
            InputState::Idle | InputState::Hovering { .. } => return self.update_hover(pt),
        };

        if !self.label.apply_patch(&id, &patch) {
            debug!(%id, "gesture target vanished");
            self.input = InputState::Idle;
            return Vec::new();
        }
        trace!(%id, x = pt.x, y = pt.y, "gesture moved");
        vec![Action::ElementUpdated { id, patch }, Action::RenderNeeded]
    }

    /// Finish the active gesture at `pt`, keeping the resulting geometry.
    pub fn on_pointer_up(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let Some((id, origin)) = self.input.active() else {
            return self.update_hover(pt);
        };

        let mut actions = self.on_pointer_move(pt);
        if let Some(el) = self.label.get(&id) {
            let patch = origin.diff(&el.geometry);
            if !patch.is_empty() {
                debug!(%id, ?patch, "gesture committed");
                actions.push(Action::GestureCommitted { id, patch });
            }
        }
        self.input = InputState::Idle;
        actions.extend(self.update_hover(pt));
        actions
    }

    /// The pointer left the drawing surface: abort any gesture and clear hover.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = self.cancel();
        self.input = InputState::Idle;
        self.push_cursor(&mut actions, Cursor::Default);
        actions
    }

    /// Escape cancels an active gesture, or clears the selection when idle.
    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        if !key.is_escape() {
            return Vec::new();
        }
        if self.input.is_active() {
            return self.cancel();
        }
        if self.select(None) {
            return vec![Action::SelectionChanged(None), Action::RenderNeeded];
        }
        Vec::new()
    }

    /// Abort the active gesture and restore the element to its press-time geometry.
    pub fn cancel(&mut self) -> Vec<Action> {
        let Some((id, origin)) = self.input.active() else {
            return Vec::new();
        };
        self.input = InputState::Idle;

        let patch = origin.to_patch();
        if !self.label.apply_patch(&id, &patch) {
            return Vec::new();
        }
        debug!(%id, "gesture cancelled");
        vec![Action::ElementUpdated { id, patch }, Action::GestureCancelled { id }, Action::RenderNeeded]
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.ui.selected_id
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&LabelElement> {
        self.label.get(id)
    }

    /// Cursor hint last emitted.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.ui.cursor
    }

    /// Label-space outline of the selected element (TL, TR, BR, BL).
    #[must_use]
    pub fn selection_outline(&self) -> Option<[Point; 4]> {
        let el = self.ui.selected_id.and_then(|id| self.label.get(&id))?;
        Some(geometry::corners(&el.geometry))
    }

    /// Label-space handle centers of the selected element, matching what hit-testing uses.
    #[must_use]
    pub fn selection_handles(&self) -> Option<[(Handle, Point); 9]> {
        let el = self.ui.selected_id.and_then(|id| self.label.get(&id))?;
        Some(geometry::handle_positions(&el.geometry, self.config.rotation_handle_offset))
    }

    // --- Internals ---

    fn gesture_target(&self) -> Option<ElementId> {
        self.input.active().map(|(id, _)| id)
    }

    /// Update the selection. Returns `true` if it changed.
    fn select(&mut self, id: Option<ElementId>) -> bool {
        if self.ui.selected_id == id {
            return false;
        }
        debug!(selected = ?id, "selection changed");
        self.ui.selected_id = id;
        true
    }

    fn push_cursor(&mut self, actions: &mut Vec<Action>, cursor: Cursor) {
        if self.ui.cursor != cursor {
            self.ui.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }

    fn update_hover(&mut self, pt: Point) -> Vec<Action> {
        let hit = hit::hit_test(pt, &self.label, self.ui.selected_id, &self.config);
        let manipulate = self.ui.tool.can_manipulate();
        let cursor = match hit.map(|h| h.part) {
            Some(HitPart::Body) if manipulate => Cursor::Move,
            Some(HitPart::Handle(handle)) if manipulate => handle.cursor(),
            _ => Cursor::Default,
        };
        self.input = match hit {
            Some(hit) => InputState::Hovering { id: hit.element_id, handle: hit.handle() },
            None => InputState::Idle,
        };

        let mut actions = Vec::new();
        self.push_cursor(&mut actions, cursor);
        actions
    }
}

/// The host-facing engine. Wraps `EngineCore` and owns the device-to-label conversion.
///
/// Pointer positions arrive in device pixels and are divided down to label
/// units here, once, before anything else sees them.
#[derive(Debug, Default)]
pub struct Engine {
    pub viewport: Viewport,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine for a surface with the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport, config: EngineConfig) -> Self {
        Self { viewport, core: EngineCore::with_config(config) }
    }

    // --- Viewport ---

    /// Update the display placement after the surface is resized or zoomed.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Convert a device-pixel pointer position into label units.
    #[must_use]
    pub fn to_label(&self, device: DevicePoint) -> Point {
        self.viewport.device_to_label(device)
    }

    // --- Delegated data inputs ---

    pub fn load(&mut self, elements: Vec<LabelElement>) {
        self.core.load(elements);
    }

    pub fn apply_insert(&mut self, element: LabelElement) {
        self.core.apply_insert(element);
    }

    pub fn apply_remove(&mut self, id: &ElementId) -> Option<LabelElement> {
        self.core.apply_remove(id)
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, device: DevicePoint, button: Button) -> Vec<Action> {
        let pt = self.to_label(device);
        self.core.on_pointer_down(pt, button)
    }

    pub fn on_pointer_move(&mut self, device: DevicePoint) -> Vec<Action> {
        let pt = self.to_label(device);
        self.core.on_pointer_move(pt)
    }

    pub fn on_pointer_up(&mut self, device: DevicePoint, button: Button) -> Vec<Action> {
        let pt = self.to_label(device);
        self.core.on_pointer_up(pt, button)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        self.core.on_key_down(key)
    }

    pub fn cancel(&mut self) -> Vec<Action> {
        self.core.cancel()
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.core.selection()
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&LabelElement> {
        self.core.element(id)
    }

    #[must_use]
    pub fn label(&self) -> &Label {
        &self.core.label
    }
}
