//! Physical input to signal bindings
//!
//! Decouples device events from the placement signals so a desktop harness
//! can drive a session with a mouse and keyboard in place of touch gestures.
//!
//! # Example
//!
//! ```ignore
//! let mut mapper = SignalMapper::with_defaults();
//! mapper.bind_key(KeyCode::Backspace, Signal::Reset);
//!
//! if let Some(signal) = mapper.signal_for_key(KeyCode::KeyR) {
//!     session.on_signal(signal)?;
//! }
//! ```

use rustc_hash::FxHashMap;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use super::signal::Signal;

/// A physical trigger that can be bound to a [`Signal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Maps physical inputs to signals.
///
/// Supports runtime rebinding and reverse lookup for displaying bindings.
#[derive(Debug, Clone, Default)]
pub struct SignalMapper {
    bindings: FxHashMap<Trigger, Signal>,
    /// Reverse lookup: signal to triggers
    triggers: FxHashMap<Signal, Vec<Trigger>>,
}

impl SignalMapper {
    /// Create an empty mapper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Left click or Space places, R resets.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut mapper = Self::new();

        mapper.bind(Trigger::Mouse(MouseButton::Left), Signal::ScreenTapped);
        mapper.bind(Trigger::Key(KeyCode::Space), Signal::ScreenTapped);
        mapper.bind(Trigger::Key(KeyCode::KeyR), Signal::Reset);

        mapper
    }

    /// Bind a trigger to a signal, replacing any previous binding of that trigger.
    pub fn bind(&mut self, trigger: Trigger, signal: Signal) {
        self.unbind(trigger);
        self.bindings.insert(trigger, signal);
        self.triggers.entry(signal).or_default().push(trigger);
    }

    pub fn bind_key(&mut self, key: KeyCode, signal: Signal) {
        self.bind(Trigger::Key(key), signal);
    }

    pub fn bind_mouse(&mut self, button: MouseButton, signal: Signal) {
        self.bind(Trigger::Mouse(button), signal);
    }

    /// Remove a trigger's binding, if any.
    pub fn unbind(&mut self, trigger: Trigger) {
        if let Some(old) = self.bindings.remove(&trigger)
            && let Some(triggers) = self.triggers.get_mut(&old)
        {
            triggers.retain(|t| *t != trigger);
        }
    }

    #[must_use]
    pub fn signal_for(&self, trigger: Trigger) -> Option<Signal> {
        self.bindings.get(&trigger).copied()
    }

    #[must_use]
    pub fn signal_for_key(&self, key: KeyCode) -> Option<Signal> {
        self.signal_for(Trigger::Key(key))
    }

    #[must_use]
    pub fn signal_for_mouse(&self, button: MouseButton) -> Option<Signal> {
        self.signal_for(Trigger::Mouse(button))
    }

    /// Get all triggers bound to a signal.
    #[must_use]
    pub fn triggers(&self, signal: Signal) -> &[Trigger] {
        self.triggers
            .get(&signal)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let mapper = SignalMapper::with_defaults();
        assert_eq!(mapper.signal_for_mouse(MouseButton::Left), Some(Signal::ScreenTapped));
        assert_eq!(mapper.signal_for_key(KeyCode::Space), Some(Signal::ScreenTapped));
        assert_eq!(mapper.signal_for_key(KeyCode::KeyR), Some(Signal::Reset));
        assert_eq!(mapper.signal_for_key(KeyCode::KeyW), None);
        assert_eq!(mapper.binding_count(), 3);
    }

    #[test]
    fn test_rebind_moves_trigger() {
        let mut mapper = SignalMapper::with_defaults();
        mapper.bind_key(KeyCode::Space, Signal::Reset);

        assert_eq!(mapper.signal_for_key(KeyCode::Space), Some(Signal::Reset));
        assert_eq!(
            mapper.triggers(Signal::ScreenTapped),
            &[Trigger::Mouse(MouseButton::Left)]
        );
        assert_eq!(mapper.triggers(Signal::Reset).len(), 2);
    }

    #[test]
    fn test_unbind() {
        let mut mapper = SignalMapper::with_defaults();
        mapper.unbind(Trigger::Key(KeyCode::KeyR));

        assert_eq!(mapper.signal_for_key(KeyCode::KeyR), None);
        assert!(mapper.triggers(Signal::Reset).is_empty());
    }
}
