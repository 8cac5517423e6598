use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub const BG_DARK: Color = Color::Rgb(22, 24, 29);
    pub const BG_ELEVATED: Color = Color::Rgb(34, 37, 44);
    pub const BORDER_DIM: Color = Color::Rgb(70, 74, 84);
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 223, 228);
    pub const TEXT_SECONDARY: Color = Color::Rgb(150, 155, 165);
    pub const TEXT_MUTED: Color = Color::Rgb(100, 105, 115);
    pub const ACCENT_TEAL: Color = Color::Rgb(80, 200, 210);
    pub const ACCENT_AMBER: Color = Color::Rgb(230, 180, 80);
    pub const ACCENT_ROSE: Color = Color::Rgb(225, 110, 125);
    pub const ACCENT_GREEN: Color = Color::Rgb(90, 210, 130);
    pub const ACCENT_LAVENDER: Color = Color::Rgb(175, 140, 220);

    const NICK_PALETTE: [Color; 6] = [
        Color::Rgb(80, 200, 210),
        Color::Rgb(100, 170, 230),
        Color::Rgb(175, 140, 220),
        Color::Rgb(220, 150, 180),
        Color::Rgb(230, 180, 80),
        Color::Rgb(90, 210, 130),
    ];

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn timestamp() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn nick_self() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    /// Stable per-nick color.
    pub fn nick_color(nick: &str) -> Style {
        let hash = nick
            .bytes()
            .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
        Style::default().fg(Self::NICK_PALETTE[hash % Self::NICK_PALETTE.len()])
    }

    pub fn message_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn highlight_message() -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn notice_message() -> Style {
        Style::default().fg(Self::ACCENT_LAVENDER)
    }

    pub fn error_message() -> Style {
        Style::default().fg(Self::ACCENT_ROSE)
    }

    pub fn action_message() -> Style {
        Style::default().fg(Self::ACCENT_LAVENDER)
    }

    pub fn status_message() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn join_message() -> Style {
        Style::default().fg(Self::ACCENT_GREEN)
    }

    pub fn part_message() -> Style {
        Style::default().fg(Self::ACCENT_ROSE)
    }

    pub fn preview() -> Style {
        Style::default()
            .fg(Self::TEXT_SECONDARY)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn date_marker() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn unread_marker() -> Style {
        Style::default().fg(Self::ACCENT_ROSE)
    }

    pub fn channel_normal() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn channel_active() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .bg(Self::BG_ELEVATED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn channel_unread() -> Style {
        Style::default().fg(Self::ACCENT_AMBER)
    }

    pub fn channel_mention() -> Style {
        Style::default()
            .fg(Self::ACCENT_ROSE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn badge() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::TEXT_SECONDARY)
    }

    pub fn badge_highlight() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_ELEVATED)
    }

    pub fn header() -> Style {
        Style::default().bg(Self::BG_ELEVATED)
    }
}
