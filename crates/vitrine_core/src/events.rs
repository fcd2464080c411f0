//! Keyboard listener registration.
//!
//! The host owns one [`KeyboardHub`] and forwards every key-down / key-up it
//! receives through [`KeyboardHub::dispatch`].  Controllers subscribe with
//! [`KeyboardHub::listen`] and hold on to the returned [`ListenerGuard`]; the
//! subscription lives exactly as long as the guard.
//!
//! ```rust,ignore
//! let hub = KeyboardHub::new();
//! let guard = hub.listen(KeyPhase::Down, |ev| log::info!("{:?}", ev.code));
//! hub.dispatch(KeyEvent::down(KeyCode::KeyW));
//! drop(guard); // listener is gone
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::input::KeyCode;

/// Which edge of a key stroke a listener wants to hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Down,
    Up,
}

/// A single key stroke, keyed by physical key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub phase: KeyPhase,
    /// OS auto-repeat of a key that is already down.
    pub repeat: bool,
}

impl KeyEvent {
    pub fn down(code: KeyCode) -> Self {
        Self { code, phase: KeyPhase::Down, repeat: false }
    }

    pub fn up(code: KeyCode) -> Self {
        Self { code, phase: KeyPhase::Up, repeat: false }
    }
}

type Listener = Rc<RefCell<dyn FnMut(&KeyEvent)>>;

struct Entry {
    id: u64,
    phase: KeyPhase,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Single-threaded key event dispatcher.  Cloning yields another handle to
/// the same set of listeners.
#[derive(Clone, Default)]
pub struct KeyboardHub {
    registry: Rc<RefCell<Registry>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `phase`.  Dropping the returned
    /// guard unregisters it.
    #[must_use = "the listener is removed as soon as the guard is dropped"]
    pub fn listen<F>(&self, phase: KeyPhase, listener: F) -> ListenerGuard
    where
        F: FnMut(&KeyEvent) + 'static,
    {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        reg.entries.push(Entry { id, phase, listener });
        log::trace!("key listener {id} registered for {phase:?}");

        ListenerGuard {
            registry: Rc::downgrade(&self.registry),
            id,
            phase,
        }
    }

    /// Delivers `event` to every listener of its phase, in registration order.
    ///
    /// Listeners may register or drop guards while being called; such changes
    /// take effect from the next dispatch.
    pub fn dispatch(&self, event: KeyEvent) {
        let listeners: Vec<Listener> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.phase == event.phase)
            .map(|e| e.listener.clone())
            .collect();

        for listener in listeners {
            let mut call = listener.borrow_mut();
            (&mut *call)(&event);
        }
    }

    /// Number of live listeners for `phase`.
    pub fn listener_count(&self, phase: KeyPhase) -> usize {
        self.registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.phase == phase)
            .count()
    }
}

impl fmt::Debug for KeyboardHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardHub")
            .field("down_listeners", &self.listener_count(KeyPhase::Down))
            .field("up_listeners", &self.listener_count(KeyPhase::Up))
            .finish()
    }
}

/// Keeps a listener registered.  Unregisters on drop, even when the hub
/// itself has already been dropped.
pub struct ListenerGuard {
    registry: Weak<RefCell<Registry>>,
    id: u64,
    phase: KeyPhase,
}

impl ListenerGuard {
    pub fn phase(&self) -> KeyPhase {
        self.phase
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let id = self.id;
            registry.borrow_mut().entries.retain(|e| e.id != id);
            log::trace!("key listener {id} unregistered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_reaches_matching_phase_only() {
        let hub = KeyboardHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log_down = seen.clone();
        let _down = hub.listen(KeyPhase::Down, move |ev| log_down.borrow_mut().push(("down", ev.code)));
        let log_up = seen.clone();
        let _up = hub.listen(KeyPhase::Up, move |ev| log_up.borrow_mut().push(("up", ev.code)));

        hub.dispatch(KeyEvent::down(KeyCode::KeyW));
        hub.dispatch(KeyEvent::up(KeyCode::KeyW));

        assert_eq!(
            *seen.borrow(),
            vec![("down", KeyCode::KeyW), ("up", KeyCode::KeyW)]
        );
    }

    #[test]
    fn dropping_guard_unregisters() {
        let hub = KeyboardHub::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        let guard = hub.listen(KeyPhase::Down, move |_| *counter.borrow_mut() += 1);
        assert_eq!(hub.listener_count(KeyPhase::Down), 1);

        hub.dispatch(KeyEvent::down(KeyCode::KeyA));
        drop(guard);
        hub.dispatch(KeyEvent::down(KeyCode::KeyA));

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(hub.listener_count(KeyPhase::Down), 0);
    }

    #[test]
    fn guard_outliving_hub_is_harmless() {
        let hub = KeyboardHub::new();
        let guard = hub.listen(KeyPhase::Up, |_| {});
        drop(hub);
        drop(guard);
    }

    #[test]
    fn listener_may_drop_its_own_guard() {
        let hub = KeyboardHub::new();
        let slot: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));
        let inner = slot.clone();
        let guard = hub.listen(KeyPhase::Down, move |_| {
            inner.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(guard);

        hub.dispatch(KeyEvent::down(KeyCode::Space));
        assert_eq!(hub.listener_count(KeyPhase::Down), 0);
    }
}
