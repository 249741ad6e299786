//! Input management system
//!
//! Platform code turns window events into [`InputEvent`]s and hands them to
//! [`InputManager::process`]. The manager folds them into an [`InputState`]
//! that systems read, and fires the handlers registered for each trigger.

use crate::foundation::math::Vec2;
use std::collections::{BTreeSet, HashMap};

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// P key
    P,
    /// R key
    R,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Raw event delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key went down
    KeyPressed(KeyCode),
    /// Key went up
    KeyReleased(KeyCode),
    /// Mouse button went down
    MousePressed(MouseButton),
    /// Mouse button went up
    MouseReleased(MouseButton),
    /// Cursor moved to a screen position
    MouseMoved {
        /// Screen x
        x: f32,
        /// Screen y
        y: f32,
    },
    /// Window close requested
    Quit,
}

/// When a handler fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// On the press event
    Press,
    /// On the release event
    Release,
    /// Once per processed batch while held
    Down,
}

/// What a handler listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCode {
    /// Keyboard key
    Key(KeyCode),
    /// Mouse button
    Mouse(MouseButton),
    /// Window close request
    Quit,
}

/// Handler table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputTrigger {
    /// Edge or level
    pub kind: TriggerKind,
    /// Source
    pub code: InputCode,
}

impl InputTrigger {
    /// Fire when `key` is pressed
    pub fn key_press(key: KeyCode) -> Self {
        Self {
            kind: TriggerKind::Press,
            code: InputCode::Key(key),
        }
    }

    /// Fire when `key` is released
    pub fn key_release(key: KeyCode) -> Self {
        Self {
            kind: TriggerKind::Release,
            code: InputCode::Key(key),
        }
    }

    /// Fire while `key` is held
    pub fn key_down(key: KeyCode) -> Self {
        Self {
            kind: TriggerKind::Down,
            code: InputCode::Key(key),
        }
    }

    /// Fire while `button` is held
    pub fn mouse_down(button: MouseButton) -> Self {
        Self {
            kind: TriggerKind::Down,
            code: InputCode::Mouse(button),
        }
    }

    /// Fire on a close request
    pub fn quit() -> Self {
        Self {
            kind: TriggerKind::Press,
            code: InputCode::Quit,
        }
    }
}

/// Snapshot of held inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    keys: BTreeSet<KeyCode>,
    buttons: BTreeSet<MouseButton>,
    mouse_position: Vec2,
    quit_requested: bool,
}

impl InputState {
    /// Empty state: nothing held, cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Whether `button` is held
    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    /// Last known cursor position in screen space
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Whether a close was requested
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Fold one event into the state
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed(key) => {
                self.keys.insert(key);
            }
            InputEvent::KeyReleased(key) => {
                self.keys.remove(&key);
            }
            InputEvent::MousePressed(button) => {
                self.buttons.insert(button);
            }
            InputEvent::MouseReleased(button) => {
                self.buttons.remove(&button);
            }
            InputEvent::MouseMoved { x, y } => self.mouse_position = Vec2::new(x, y),
            InputEvent::Quit => self.quit_requested = true,
        }
    }
}

/// Input handler callback
pub type InputHandler = Box<dyn FnMut(&InputState)>;

/// Input manager
#[derive(Default)]
pub struct InputManager {
    state: InputState,
    handlers: HashMap<InputTrigger, Vec<InputHandler>>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Register `handler` for `trigger`; handlers fire in registration order
    pub fn register<F>(&mut self, trigger: InputTrigger, handler: F)
    where
        F: FnMut(&InputState) + 'static,
    {
        self.handlers.entry(trigger).or_default().push(Box::new(handler));
    }

    /// Whether any handler is registered for `trigger`
    pub fn has_handler(&self, trigger: InputTrigger) -> bool {
        self.handlers.get(&trigger).is_some_and(|handlers| !handlers.is_empty())
    }

    /// Drop every handler
    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Fold a batch of events into the state and fire handlers.
    ///
    /// Press and release handlers fire per event, after the state reflects
    /// that event. Down handlers fire once per call for every input still
    /// held after the whole batch.
    pub fn process<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.state.apply(event);

            let trigger = match event {
                InputEvent::KeyPressed(key) => Some(InputTrigger::key_press(key)),
                InputEvent::KeyReleased(key) => Some(InputTrigger::key_release(key)),
                InputEvent::MousePressed(button) => Some(InputTrigger {
                    kind: TriggerKind::Press,
                    code: InputCode::Mouse(button),
                }),
                InputEvent::MouseReleased(button) => Some(InputTrigger {
                    kind: TriggerKind::Release,
                    code: InputCode::Mouse(button),
                }),
                InputEvent::Quit => Some(InputTrigger::quit()),
                InputEvent::MouseMoved { .. } => None,
            };

            if let Some(trigger) = trigger {
                fire(&mut self.handlers, &self.state, trigger);
            }
        }

        let held_keys: Vec<_> =
            self.state.keys.iter().copied().map(InputTrigger::key_down).collect();
        let held_buttons: Vec<_> =
            self.state.buttons.iter().copied().map(InputTrigger::mouse_down).collect();
        for trigger in held_keys.into_iter().chain(held_buttons) {
            fire(&mut self.handlers, &self.state, trigger);
        }
    }
}

fn fire(
    handlers: &mut HashMap<InputTrigger, Vec<InputHandler>>,
    state: &InputState,
    trigger: InputTrigger,
) {
    if let Some(handlers) = handlers.get_mut(&trigger) {
        log::trace!("Input trigger {:?} firing {} handler(s)", trigger, handlers.len());
        for handler in handlers.iter_mut() {
            handler(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counter(manager: &mut InputManager, trigger: InputTrigger) -> Rc<RefCell<u32>> {
        let count = Rc::new(RefCell::new(0));
        let handle = Rc::clone(&count);
        manager.register(trigger, move |_| *handle.borrow_mut() += 1);
        count
    }

    #[test]
    fn test_state_tracks_held_inputs() {
        let mut manager = InputManager::new();
        manager.process([
            InputEvent::KeyPressed(KeyCode::W),
            InputEvent::MousePressed(MouseButton::Left),
            InputEvent::MouseMoved { x: 10.0, y: 20.0 },
        ]);
        assert!(manager.state().is_key_down(KeyCode::W));
        assert!(manager.state().is_mouse_down(MouseButton::Left));
        assert_eq!(manager.state().mouse_position(), Vec2::new(10.0, 20.0));

        manager.process([InputEvent::KeyReleased(KeyCode::W)]);
        assert!(!manager.state().is_key_down(KeyCode::W));
    }

    #[test]
    fn test_press_release_fire_per_event() {
        let mut manager = InputManager::new();
        let presses = counter(&mut manager, InputTrigger::key_press(KeyCode::Space));
        let releases = counter(&mut manager, InputTrigger::key_release(KeyCode::Space));

        manager.process([
            InputEvent::KeyPressed(KeyCode::Space),
            InputEvent::KeyReleased(KeyCode::Space),
            InputEvent::KeyPressed(KeyCode::Space),
        ]);
        assert_eq!(*presses.borrow(), 2);
        assert_eq!(*releases.borrow(), 1);
    }

    #[test]
    fn test_down_fires_once_per_batch_while_held() {
        let mut manager = InputManager::new();
        let downs = counter(&mut manager, InputTrigger::key_down(KeyCode::A));

        manager.process([InputEvent::KeyPressed(KeyCode::A)]);
        manager.process([]);
        manager.process([InputEvent::KeyReleased(KeyCode::A)]);
        manager.process([]);
        assert_eq!(*downs.borrow(), 2);
    }

    #[test]
    fn test_quit_sets_flag_and_fires() {
        let mut manager = InputManager::new();
        let quits = counter(&mut manager, InputTrigger::quit());
        assert!(manager.has_handler(InputTrigger::quit()));

        manager.process([InputEvent::Quit]);
        assert!(manager.state().quit_requested());
        assert_eq!(*quits.borrow(), 1);

        manager.clear_handlers();
        assert!(!manager.has_handler(InputTrigger::quit()));
    }
}
