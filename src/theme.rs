use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the editor, preview and chat views
#[derive(Clone, Debug)]
pub struct Theme {
    /// Foreground (text) color for the status bar
    pub status_bar_fg: Color,

    /// Background color for the status bar
    pub status_bar_bg: Color,

    /// Color for the document location in the status bar
    pub filename_color: Color,

    /// Color for section titles in the form and the preview
    pub heading_color: Color,

    /// Color for field labels
    pub label_color: Color,

    /// Foreground color for the focused field label
    pub focus_fg: Color,

    /// Background color for the focused field label
    pub focus_bg: Color,

    /// Color for secondary text (hints, link targets, empty placeholders)
    pub muted_color: Color,

    /// Color for links
    pub link_color: Color,

    /// Color for user chat bubbles
    pub chat_user_color: Color,

    /// Color for assistant chat bubbles
    pub chat_assistant_color: Color,

    /// Color for delivery ticks next to user messages
    pub tick_color: Color,

    /// Orb color while idle
    pub orb_idle_color: Color,

    /// Orb color while a request is in flight
    pub orb_processing_color: Color,

    /// Orb color while a reply is shown
    pub orb_responding_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
            filename_color: Color::LightYellow,
            heading_color: Color::LightCyan,
            label_color: Color::Gray,
            focus_fg: Color::Black,
            focus_bg: Color::LightYellow,
            muted_color: Color::DarkGray,
            link_color: Color::Blue,
            chat_user_color: Color::LightGreen,
            chat_assistant_color: Color::White,
            tick_color: Color::LightBlue,
            orb_idle_color: Color::DarkGray,
            orb_processing_color: Color::LightYellow,
            orb_responding_color: Color::LightGreen,
        }
    }
}

impl Theme {
    /// Create a new theme with default colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the style for the status bar
    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.status_bar_fg)
            .bg(self.status_bar_bg)
    }

    /// Get the style for the document location in the status bar
    pub fn filename_style(&self) -> Style {
        Style::default().fg(self.filename_color)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading_color)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.label_color)
    }

    pub fn focus_style(&self) -> Style {
        Style::default().fg(self.focus_fg).bg(self.focus_bg)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted_color)
    }

    /// Get the style for links
    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.link_color)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn chat_user_style(&self) -> Style {
        Style::default().fg(self.chat_user_color)
    }

    pub fn chat_assistant_style(&self) -> Style {
        Style::default().fg(self.chat_assistant_color)
    }

    pub fn tick_style(&self) -> Style {
        Style::default().fg(self.tick_color)
    }
}
