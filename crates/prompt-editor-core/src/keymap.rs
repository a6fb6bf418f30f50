//! Default key bindings.
//!
//! The host owns the actual key handling; this module only decides which
//! [`NavigationCommand`] a key press stands for and whether it should open edit mode.

use crate::cursor::NavigationCommand;

/// A key as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// ↑
    ArrowUp,
    /// ↓
    ArrowDown,
    /// ←
    ArrowLeft,
    /// →
    ArrowRight,
    /// Tab
    Tab,
    /// Esc
    Escape,
    /// Enter / Return
    Enter,
    /// Backspace
    Backspace,
    /// A printable character.
    Char(char),
    /// Shift modifier key itself.
    Shift,
    /// Alt / Option modifier key itself.
    Alt,
    /// Meta / Command modifier key itself.
    Meta,
    /// Control modifier key itself.
    Control,
}

impl Key {
    /// Returns `true` for the modifier keys themselves.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Alt | Key::Meta | Key::Control)
    }
}

/// Modifier state at the time of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift held.
    pub shift: bool,
    /// Alt / Option held.
    pub alt: bool,
    /// Meta / Command held.
    pub meta: bool,
    /// Control held.
    pub control: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        meta: false,
        control: false,
    };
    /// Shift only.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    /// Alt only.
    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };
    /// Alt + Shift.
    pub const ALT_SHIFT: Modifiers = Modifiers {
        alt: true,
        shift: true,
        ..Modifiers::NONE
    };
    /// Meta + Shift.
    pub const META_SHIFT: Modifiers = Modifiers {
        meta: true,
        shift: true,
        ..Modifiers::NONE
    };

    /// Returns `true` if no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Modifiers::NONE
    }
}

/// The navigation command bound to `key` + `modifiers`, if any. Modifiers must match exactly.
pub fn navigation_command_for(key: Key, modifiers: Modifiers) -> Option<NavigationCommand> {
    use NavigationCommand as Nav;

    let Modifiers {
        shift,
        alt,
        meta,
        control,
    } = modifiers;
    if control {
        return None;
    }

    let command = match (key, shift, alt, meta) {
        (Key::ArrowUp, false, false, false) => Nav::MoveUp,
        (Key::ArrowDown, false, false, false) => Nav::MoveDown,
        (Key::ArrowLeft, false, false, false) => Nav::MoveLeft,
        (Key::ArrowRight, false, false, false) => Nav::MoveRight,
        (Key::Tab, false, false, false) => Nav::NextSentence,
        (Key::Tab, true, false, false) => Nav::PreviousSentence,
        (Key::ArrowLeft, false, true, false) => Nav::JumpPunctuationLeft,
        (Key::ArrowRight, false, true, false) => Nav::JumpPunctuationRight,
        (Key::ArrowUp, true, false, true) => Nav::ShiftRangeUp,
        (Key::ArrowDown, true, false, true) => Nav::ShiftRangeDown,
        (Key::ArrowUp, true, false, false) => Nav::ExpandUp,
        (Key::ArrowDown, true, false, false) => Nav::ExpandDown,
        (Key::ArrowLeft, true, false, false) => Nav::ExpandLeft,
        (Key::ArrowRight, true, false, false) => Nav::ExpandRight,
        (Key::ArrowUp, false, true, false) => Nav::ParagraphUp,
        (Key::ArrowDown, false, true, false) => Nav::ParagraphDown,
        (Key::ArrowUp, true, true, false) => Nav::ExpandParagraphUp,
        (Key::ArrowDown, true, true, false) => Nav::ExpandParagraphDown,
        (Key::ArrowLeft, true, true, false) => Nav::ExpandPunctuationLeft,
        (Key::ArrowRight, true, true, false) => Nav::ExpandPunctuationRight,
        (Key::Escape, false, false, false) => Nav::Escape,
        _ => return None,
    };
    Some(command)
}

/// Returns `true` if the key press should hand over to edit mode: Enter, Backspace, or a
/// printable character typed without Alt / Meta / Control.
pub fn requests_edit_mode(key: Key, modifiers: Modifiers) -> bool {
    let plain = !(modifiers.alt || modifiers.meta || modifiers.control);
    match key {
        Key::Enter | Key::Backspace => plain && !modifiers.shift,
        Key::Char(ch) => plain && !ch.is_control(),
        _ => false,
    }
}
