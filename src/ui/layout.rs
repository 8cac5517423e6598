use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub sidebar: Rect,
    pub user_list: Rect,
    pub channel_header: Rect,
    pub message_area: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = main_chunks[0];
    let status_bar = main_chunks[1];

    // Horizontal: left panel | gap | right content
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Length(24), // Networks and members
            Constraint::Min(30),    // Channel
        ])
        .split(content);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Networks
            Constraint::Percentage(40), // Members
        ])
        .split(h_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Channel header
            Constraint::Min(3),    // Timeline
        ])
        .split(h_chunks[1]);

    AppLayout {
        sidebar: left_chunks[0],
        user_list: left_chunks[1],
        channel_header: right_chunks[0],
        message_area: right_chunks[1],
        status_bar,
    }
}
