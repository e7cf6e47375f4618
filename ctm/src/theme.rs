//! Color theme system for ctm.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface ctm renders. Two built-in themes are provided:
//!
//! - `dark` — uses ANSI 16 colors so it works on any terminal including
//!   256-color SSH sessions with no truecolor support.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

/// All color values used across ctm's UI surfaces.
///
/// Every field is a `ratatui::style::Color`. Callers use `theme.field`
/// directly inside `Style::default().fg(theme.border_active)`.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel or input field.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Form
    /// Placeholder text shown in empty input fields.
    pub input_placeholder: Color,
    /// Typed input text.
    pub input_text: Color,

    // Commit history rows
    /// Abbreviated commit hash.
    pub commit_hash: Color,
    /// Commit author name.
    pub commit_author: Color,
    /// Commit date.
    pub commit_date: Color,

    // Analysis view
    /// Section headings ("Analysis", "Suggested Fix").
    pub section_heading: Color,
    /// Body text in the content panel.
    pub body_text: Color,

    // Status bar
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground (general text).
    pub status_bar_fg: Color,
    /// Mode indicator color when in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color when in INSERT mode.
    pub status_mode_insert: Color,
    /// Spinner and "Loading..." text while a request is in flight.
    pub loading: Color,
    /// Error message text.
    pub error: Color,
    /// "backend offline" marker when the startup probe failed.
    pub offline: Color,
    /// Key hints for actions that are currently available.
    pub hint_enabled: Color,
    /// Key hints for actions blocked by a guard (empty URL, loading, ...).
    pub hint_disabled: Color,

    // General
    /// Application background (used for clearing areas).
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor. Suitable
    /// as the default when no config is present or color capability is unknown.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            input_placeholder: Color::DarkGray,
            input_text: Color::White,

            commit_hash: Color::Yellow,
            commit_author: Color::Blue,
            commit_date: Color::DarkGray,

            section_heading: Color::Cyan,
            body_text: Color::Reset,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
            loading: Color::Yellow,
            error: Color::Red,
            offline: Color::Red,
            hint_enabled: Color::White,
            hint_disabled: Color::DarkGray,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Requires a truecolor terminal. Colors degrade to the nearest ANSI
    /// 256-color approximation on non-truecolor terms, but visual fidelity is
    /// reduced. Use `dark()` on SSH or 256-color terminals.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        // Catppuccin Mocha palette (selected subset)
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let teal = Color::Rgb(148, 226, 213);     // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4
        let peach = Color::Rgb(250, 179, 135);    // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            input_placeholder: overlay1,
            input_text: text,

            commit_hash: peach,
            commit_author: blue,
            commit_date: overlay1,

            section_heading: teal,
            body_text: text,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
            loading: yellow,
            error: red,
            offline: red,
            hint_enabled: text,
            hint_disabled: overlay1,

            background: base,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup. The fallback is logged to stderr (not a hard error).
    ///
    /// # Arguments
    ///
    /// * `name` — theme name from config, e.g. `"dark"` or `"catppuccin-mocha"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                eprintln!("ctm: unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }
}
