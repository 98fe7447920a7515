//! Key hints printed under the wizard's menus.

/// Keyboard shortcut hint for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(
        key: &'static str,
        action: &'static str,
    ) -> Self {
        Self { key, action }
    }
}

/// Joins hints into a single line.
pub fn build_status_bar(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.key, h.action))
        .collect::<Vec<_>>()
        .join(" │ ")
}

/// Hints shared by the wizard's menus.
pub mod hints {
    use super::KeyHint;

    pub const MOVE: KeyHint = KeyHint::new("↑/↓", "Move");
    pub const ENTER: KeyHint = KeyHint::new("Enter", "Select");
    pub const ESC_MENU: KeyHint = KeyHint::new("Esc", "Navigation");
    pub const ESC_BACK: KeyHint = KeyHint::new("Esc", "Back");

    pub const STEP: [KeyHint; 3] = [MOVE, ENTER, ESC_MENU];
    pub const NAVIGATION: [KeyHint; 3] = [MOVE, ENTER, ESC_BACK];
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hints_are_joined_with_separators() {
        assert_eq!(
            build_status_bar(&hints::STEP),
            "↑/↓: Move │ Enter: Select │ Esc: Navigation"
        );
    }

    #[test]
    fn empty_bar_is_blank() {
        assert_eq!(build_status_bar(&[]), "");
    }
}
