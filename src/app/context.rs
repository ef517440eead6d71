//! Interaction context: the dispatch entry point and per-frame sweep
//!
//! Owns one input router, one UI registry and the named callbacks that
//! declarative scenes refer to. Hosts feed it raw events and call
//! [`update`](InteractionContext::update) and
//! [`render`](InteractionContext::render) once per frame.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::geometry::Point;
use super::input::{
    Callback, CallbackRegistry, Channel, DeviceCode, DeviceKind, InputConfig, InputError, InputRouter, RawEvent,
    Scope, Transition, buttons,
};
use super::ui::{Canvas, UiConfig, UiError, UiRegistry};

/// Callback ids registered by [`InteractionContext::register_navigation_callbacks`]
pub mod nav {
    pub const FOCUS_NEXT: &str = "focus_next";
    pub const FOCUS_PREV: &str = "focus_prev";
    pub const ACTIVATE_FOCUSED: &str = "activate_focused";

    pub const ALL: [&str; 3] = [FOCUS_NEXT, FOCUS_PREV, ACTIVATE_FOCUSED];

    pub fn is_navigation(id: &str) -> bool {
        ALL.contains(&id)
    }
}

/// Input and UI description applied when a scene becomes active
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Ui(#[from] UiError),

    #[error("UI registry is already borrowed")]
    Busy,

    #[error("element '{element}' cannot use navigation callback '{callback}'")]
    NavigationCallback { element: String, callback: String },
}

/// Shared UI registry handle
///
/// Callbacks hold it weakly. A callback must not reach back into the
/// registry that is currently running it; such attempts fail and are logged.
pub type UiHandle = Rc<RefCell<UiRegistry>>;

#[derive(Debug, Default)]
pub struct InteractionContext {
    input: InputRouter,
    ui: UiHandle,
    callbacks: CallbackRegistry,
    pointer: Option<Point>,
}

impl InteractionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &InputRouter {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputRouter {
        &mut self.input
    }

    pub fn ui(&self) -> &UiHandle {
        &self.ui
    }

    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Makes a callback available to declarative scenes by its id
    pub fn register_callback(&mut self, callback: Callback) {
        if let Some(old) = self.callbacks.register(callback) {
            debug!(callback = %old.id(), "Callback re-registered");
        }
    }

    /// Registers `focus_next`, `focus_prev` and `activate_focused`
    ///
    /// They drive the UI registry so scenes can bind them to keys.
    pub fn register_navigation_callbacks(&mut self) {
        let ui = Rc::downgrade(&self.ui);
        self.register_callback(ui_callback(nav::FOCUS_NEXT, &ui, UiRegistry::focus_next));
        self.register_callback(ui_callback(nav::FOCUS_PREV, &ui, UiRegistry::focus_prev));
        self.register_callback(ui_callback(nav::ACTIVATE_FOCUSED, &ui, |ui| {
            ui.activate_focused();
        }));
    }

    /// Last pointer position seen
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Overrides the pointer position used for clicks
    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
        if pointer.is_none()
            && let Ok(mut ui) = self.ui.try_borrow_mut()
        {
            ui.clear_hover();
        }
    }

    /// Processes one raw event to completion
    ///
    /// Button transitions go through the input router first; a primary
    /// pointer press then also reaches the pointer router at the last known
    /// position. Pointer motion only updates hover.
    pub fn dispatch(&mut self, event: RawEvent) {
        match event {
            RawEvent::PointerMoved { position } => {
                self.pointer = Some(position);
                match self.ui.try_borrow_mut() {
                    Ok(mut ui) => {
                        ui.handle_hover(position);
                    }
                    Err(_) => warn!("UI registry busy, hover skipped"),
                }
            }
            RawEvent::Button { kind, code, transition } => {
                self.input.dispatch(kind, code, transition);

                let primary_press =
                    kind == DeviceKind::Pointer && code == buttons::LEFT && transition == Transition::Pressed;
                if let (true, Some(position)) = (primary_press, self.pointer) {
                    match self.ui.try_borrow_mut() {
                        Ok(mut ui) => {
                            ui.handle_click(position);
                        }
                        Err(_) => warn!("UI registry busy, click skipped"),
                    }
                }
            }
        }
    }

    pub fn events(&mut self, events: impl IntoIterator<Item = RawEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }

    /// Per-frame sweep
    ///
    /// Advances element timers, then settles press/release edges. Poll
    /// [`InputRouter::is_action_just_pressed`] before calling this.
    pub fn update(&mut self, dt: f32) {
        match self.ui.try_borrow_mut() {
            Ok(mut ui) => ui.update(dt),
            Err(_) => warn!("UI registry busy, update skipped"),
        }
        self.input.advance_frame();
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        match self.ui.try_borrow() {
            Ok(ui) => ui.render(canvas),
            Err(_) => warn!("UI registry busy, render skipped"),
        }
    }

    /// Applies a scene's input bindings and UI elements
    ///
    /// Input is applied first; rebound codes from earlier loads are kept.
    /// Elements may not use the navigation callbacks, which need the
    /// registry unborrowed; such a scene changes nothing.
    pub fn load_scene(&mut self, scene: &SceneConfig) -> Result<(), SceneError> {
        let navigating = scene.ui.elements.iter().find_map(|(name, spec)| {
            spec.callback
                .as_ref()
                .filter(|id| nav::is_navigation(id.as_str()))
                .map(|id| (name, id))
        });
        if let Some((element, callback)) = navigating {
            return Err(SceneError::NavigationCallback {
                element: element.clone(),
                callback: callback.to_string(),
            });
        }

        self.input.load_config(&scene.input, &self.callbacks)?;
        self.ui
            .try_borrow_mut()
            .map_err(|_| SceneError::Busy)?
            .load_config(&scene.ui, &self.callbacks)?;

        info!(
            bindings = scene.input.bind.len(),
            actions = scene.input.map.len(),
            elements = scene.ui.elements.len(),
            "Scene loaded"
        );
        Ok(())
    }

    /// Drops local bindings and every UI element
    ///
    /// Global bindings, actions and the persisted snapshot survive.
    pub fn exit_scene(&mut self) {
        self.input.clear_local_bindings();
        match self.ui.try_borrow_mut() {
            Ok(mut ui) => ui.clear(),
            Err(_) => warn!("UI registry busy, elements kept"),
        }
        debug!("Scene exited");
    }

    /// Bindings, mappings, held devices, layers and focus
    pub fn debug_dump(&self) -> String {
        let ui = self
            .ui
            .try_borrow()
            .map_or_else(|_| "UI registry busy\n".to_string(), |ui| ui.debug_dump());
        format!("{}{ui}", self.input.debug_dump())
    }

    /// Binds one of the navigation callbacks to a key in global scope
    pub fn bind_navigation_key(&mut self, id: &str, code: DeviceCode) -> Result<(), InputError> {
        let callback = self.callbacks.resolve(&id.into())?;
        self.input
            .bind_callback(Scope::Global, Channel::KeyPressed, code, callback)
    }
}

fn ui_callback(id: &str, ui: &Weak<RefCell<UiRegistry>>, action: fn(&mut UiRegistry)) -> Callback {
    let ui = ui.clone();
    Callback::new(id, move || {
        let Some(ui) = ui.upgrade() else {
            return Ok(());
        };
        let mut ui = ui
            .try_borrow_mut()
            .map_err(|_| anyhow::anyhow!("UI registry is already borrowed"))?;
        action(&mut ui);
        Ok(())
    })
}
