//! Theme and color definitions for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::types::Severity;

/// Theme for the TUI with consistent color scheme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub success: Color,
    pub danger: Color,
    pub info: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            success: Color::Green,
            danger: Color::Red,
            info: Color::Blue,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Get style for titles.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get the banner style for a severity.
    pub fn severity(&self, severity: Severity) -> Style {
        let color = match severity {
            Severity::Success => self.success,
            Severity::Danger => self.danger,
            Severity::Info => self.info,
        };
        Style::default().fg(color)
    }

    /// Get style for muted text.
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Get style for borders.
    pub fn border(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Get style for tabs (active).
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for tabs (inactive).
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.muted)
    }
}
