//! Keyboard input
//!
//! Terminals only report key presses, so input reaches applications as
//! [`AppEvent::KeyPressed`](crate::AppEvent) events rather than polled state.

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Space bar
    Space,
    /// Enter / Return
    Enter,
    /// Escape
    Escape,
    /// Q key
    Q,
}
