//! Keyboard input mapping

/// High-level command produced by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    Pause,
    /// Mute/unmute sound effects
    ToggleSound,
}

/// Map a `KeyboardEvent.code` to a command
pub fn command_for_code(code: &str) -> Option<Command> {
    match code {
        "Space" | "ArrowUp" => Some(Command::Jump),
        "KeyP" | "Escape" => Some(Command::Pause),
        "KeyM" => Some(Command::ToggleSound),
        _ => None,
    }
}
