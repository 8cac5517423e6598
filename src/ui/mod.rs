mod channel_header;
mod layout;
mod message_area;
mod sidebar;
mod status_bar;
mod theme;
mod user_list;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    sidebar::render(frame, app_layout.sidebar, state);
    user_list::render(frame, app_layout.user_list, state);
    channel_header::render(frame, app_layout.channel_header, state);
    message_area::render(frame, app_layout.message_area, state);
    status_bar::render(frame, app_layout.status_bar, state);
}
