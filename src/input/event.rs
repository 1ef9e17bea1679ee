//! Terminal event types.

use crate::input::keyboard::KeyEvent;
use crate::input::mouse::MouseEvent;

/// A terminal event.
///
/// Mouse variants name the button and action; the payload carries position
/// and modifiers only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Event {
    /// Nothing decodable yet, or a recognized sequence with no mapping.
    #[default]
    None,
    /// Key pressed.
    KeyPressed(KeyEvent),
    /// Key released (kitty keyboard protocol only).
    KeyReleased(KeyEvent),
    /// Key auto-repeat (kitty keyboard protocol only).
    KeyRepeat(KeyEvent),
    /// Pointer moved with no button held (SGR reporting only).
    MouseMove(MouseEvent),
    /// Pointer moved with the left button held.
    MouseDragLeft(MouseEvent),
    /// Pointer moved with the middle button held.
    MouseDragMiddle(MouseEvent),
    /// Pointer moved with the right button held.
    MouseDragRight(MouseEvent),
    /// Wheel scrolled up.
    MouseScrollUp(MouseEvent),
    /// Wheel scrolled down.
    MouseScrollDown(MouseEvent),
    /// Left button pressed.
    MouseLeftPressed(MouseEvent),
    /// Left button released.
    MouseLeftReleased(MouseEvent),
    /// Middle button pressed.
    MouseMiddlePressed(MouseEvent),
    /// Middle button released.
    MouseMiddleReleased(MouseEvent),
    /// Right button pressed.
    MouseRightPressed(MouseEvent),
    /// Right button released.
    MouseRightReleased(MouseEvent),
    /// Some button released; legacy X10 reporting does not say which.
    MouseReleased(MouseEvent),
    /// Terminal size changed.
    Resize(ResizeEvent),
}

impl Event {
    /// Check if this is the empty event.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Check if this is a key event.
    #[must_use]
    pub fn is_key(&self) -> bool {
        self.key().is_some()
    }

    /// Check if this is a mouse event.
    #[must_use]
    pub fn is_mouse(&self) -> bool {
        self.mouse().is_some()
    }

    /// Check if this is a resize event.
    #[must_use]
    pub fn is_resize(&self) -> bool {
        matches!(self, Self::Resize(_))
    }

    /// Get the key event if this is one.
    #[must_use]
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            Self::KeyPressed(e) | Self::KeyReleased(e) | Self::KeyRepeat(e) => Some(e),
            _ => None,
        }
    }

    /// Get the mouse event if this is one.
    #[must_use]
    pub fn mouse(&self) -> Option<&MouseEvent> {
        match self {
            Self::MouseMove(e)
            | Self::MouseDragLeft(e)
            | Self::MouseDragMiddle(e)
            | Self::MouseDragRight(e)
            | Self::MouseScrollUp(e)
            | Self::MouseScrollDown(e)
            | Self::MouseLeftPressed(e)
            | Self::MouseLeftReleased(e)
            | Self::MouseMiddlePressed(e)
            | Self::MouseMiddleReleased(e)
            | Self::MouseRightPressed(e)
            | Self::MouseRightReleased(e)
            | Self::MouseReleased(e) => Some(e),
            _ => None,
        }
    }

    /// Get the resize event if this is one.
    #[must_use]
    pub fn resize(&self) -> Option<&ResizeEvent> {
        match self {
            Self::Resize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ResizeEvent> for Event {
    fn from(e: ResizeEvent) -> Self {
        Self::Resize(e)
    }
}

/// Terminal resize event, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResizeEvent {
    /// Previous width in columns.
    pub old_width: u16,
    /// Previous height in rows.
    pub old_height: u16,
    /// New width in columns.
    pub width: u16,
    /// New height in rows.
    pub height: u16,
}

impl ResizeEvent {
    /// Create a resize event from the previous and current `(width, height)`.
    #[must_use]
    pub fn new(old: (u16, u16), new: (u16, u16)) -> Self {
        Self {
            old_width: old.0,
            old_height: old.1,
            width: new.0,
            height: new.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, MouseModifiers};

    #[test]
    fn test_event_key() {
        let key = KeyEvent::key(KeyCode::Enter);
        for event in [
            Event::KeyPressed(key),
            Event::KeyReleased(key),
            Event::KeyRepeat(key),
        ] {
            assert!(event.is_key());
            assert!(!event.is_mouse());
            assert_eq!(event.key(), Some(&key));
        }
    }

    #[test]
    fn test_event_mouse() {
        let mouse = MouseEvent::new(10, 5).with_mods(MouseModifiers::CTRL);
        let event = Event::MouseDragRight(mouse);
        assert!(event.is_mouse());
        assert!(!event.is_key());
        assert_eq!(event.mouse(), Some(&mouse));
        assert_eq!(Event::MouseReleased(mouse).mouse(), Some(&mouse));
    }

    #[test]
    fn test_resize_event() {
        let event: Event = ResizeEvent::new((80, 24), (100, 30)).into();
        let resize = event.resize().unwrap();
        assert_eq!((resize.old_width, resize.old_height), (80, 24));
        assert_eq!((resize.width, resize.height), (100, 30));
        assert!(event.is_resize());
    }

    #[test]
    fn test_default_is_none() {
        let event = Event::default();
        assert!(event.is_none());
        assert!(event.key().is_none());
        assert!(event.mouse().is_none());
        assert!(event.resize().is_none());
    }
}
