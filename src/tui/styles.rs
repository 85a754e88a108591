//! Color palette and preset styles for the assessment screen.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::Classification;

/// Palette shared by every view.
pub struct CardioTheme;

impl CardioTheme {
    /// Teal accent (#0D9488)
    pub const ACCENT: Color = Color::Rgb(13, 148, 136);
    /// Light teal highlight (#2DD4BF)
    pub const ACCENT_LIGHT: Color = Color::Rgb(45, 212, 191);
    /// Slate used for idle borders (#94A3B8)
    pub const SLATE: Color = Color::Rgb(148, 163, 184);

    /// Green for "no disease" (#16A34A)
    pub const HEALTHY: Color = Color::Rgb(22, 163, 74);
    /// Amber for advisories (#F59E0B)
    pub const CAUTION: Color = Color::Rgb(245, 158, 11);
    /// Red for "heart disease" and errors (#DC2626)
    pub const ALERT: Color = Color::Rgb(220, 38, 38);
    /// Blue for progress (#2563EB)
    pub const PROGRESS: Color = Color::Rgb(37, 99, 235);

    pub const TEXT: Color = Color::Rgb(248, 250, 252);
    pub const TEXT_DIM: Color = Color::Rgb(148, 163, 184);
    pub const TEXT_FAINT: Color = Color::Rgb(100, 116, 139);

    #[must_use]
    pub fn title() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn heading() -> Style {
        Style::default()
            .fg(Self::ACCENT_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    #[must_use]
    pub fn dim() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    #[must_use]
    pub fn faint() -> Style {
        Style::default().fg(Self::TEXT_FAINT)
    }

    #[must_use]
    pub fn healthy() -> Style {
        Style::default().fg(Self::HEALTHY)
    }

    #[must_use]
    pub fn caution() -> Style {
        Style::default().fg(Self::CAUTION)
    }

    #[must_use]
    pub fn alert() -> Style {
        Style::default().fg(Self::ALERT)
    }

    #[must_use]
    pub fn progress() -> Style {
        Style::default().fg(Self::PROGRESS)
    }

    /// Label of the field that has focus
    #[must_use]
    pub fn focused() -> Style {
        Self::heading()
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SLATE)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// `[Enter]`-style key hints in footers
    #[must_use]
    pub fn key_hint() -> Style {
        Self::heading()
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::ACCENT_LIGHT)
    }

    #[must_use]
    pub fn classification(classification: Classification) -> Style {
        match classification {
            Classification::NoDisease => Self::healthy(),
            Classification::HeartDisease => Self::alert(),
        }
    }
}
