//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm,
/// termion, etc.) enabling deterministic testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key (open the selected match).
    Enter,
    /// Escape key (back, or quit from the lobby).
    Esc,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
}
