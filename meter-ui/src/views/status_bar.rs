//! Tab bar and key hints shown under every screen.

use crate::state::Screen;

/// Keyboard shortcut hint for the status bar.
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

const TABS: [Screen; 3] = [Screen::Meter, Screen::History, Screen::Settings];

/// `[Meter]  History  Settings`, with the current tab bracketed. Sub-screens
/// of Settings highlight Settings.
pub fn tab_bar(current: Screen) -> String {
    let active = match current {
        Screen::Tariffs | Screen::EditTariffs => Screen::Settings,
        other => other,
    };
    TABS.iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.title())
            } else {
                format!(" {} ", tab.title())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn build_status_bar(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.key, h.action))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub mod hints {
    use super::KeyHint;

    pub const START: KeyHint = KeyHint::new("s", "Start");
    pub const PAUSE: KeyHint = KeyHint::new("p", "Pause/Continue");
    pub const STOP: KeyHint = KeyHint::new("x", "Stop");
    pub const CONFIRM: KeyHint = KeyHint::new("Enter", "Confirm");
    pub const ESC: KeyHint = KeyHint::new("Esc", "Back");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn current_tab_is_bracketed() {
        assert_eq!(tab_bar(Screen::History), " Meter  [History]  Settings ");
    }

    #[test]
    fn tariff_screens_highlight_settings() {
        assert!(tab_bar(Screen::EditTariffs).contains("[Settings]"));
    }

    #[test]
    fn hints_are_joined() {
        assert_eq!(build_status_bar(&[hints::START, hints::ESC]), "s: Start | Esc: Back");
    }
}
