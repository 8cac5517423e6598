use crate::app::message::ChannelKind;
use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let channel = state
        .active_channel()
        .filter(|c| c.kind == ChannelKind::Channel);

    let mut items: Vec<ListItem> = Vec::new();
    let mut user_count = 0usize;

    if let Some(channel) = channel {
        user_count = channel.nicks.len();
        // Most recent speaker first.
        for nick in &channel.nicks {
            items.push(ListItem::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(nick.clone(), Theme::nick_color(nick)),
            ])));
        }
    }

    let title = if user_count > 0 {
        format!(" Users ({}) ", user_count)
    } else {
        " Users ".to_string()
    };

    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            " —",
            Style::default().fg(Theme::TEXT_MUTED),
        )));
    }

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
