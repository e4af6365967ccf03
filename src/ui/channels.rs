//! Channel list screen
//!
//! One row per channel in playlist order. The focused row is inverted and
//! the viewport scrolls to keep it visible.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::ui::Theme;

/// First visible row so that `focused` stays inside a window of `height` rows
pub fn scroll_offset(focused: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    focused.saturating_sub(height - 1)
}

pub fn render_channels(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(
            format!(" CHANNELS ({}) ", app.channels.len()),
            Theme::title(),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    if app.channels.is_empty() {
        let empty = Paragraph::new("No channels found in this playlist")
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[0]);
    } else {
        render_list(frame, chunks[0], app);
    }

    let now_playing = match &app.now_playing {
        Some(channel) => Line::from(vec![
            Span::styled("▶ ", Theme::success()),
            Span::styled(channel.name.as_str(), Theme::success()),
        ]),
        None => Line::from(Span::styled("Nothing playing", Theme::dimmed())),
    };
    frame.render_widget(Paragraph::new(now_playing), chunks[1]);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let height = area.height as usize;
    let focused = app.focused_channel().map(|_| app.focus.index());
    let offset = scroll_offset(focused.unwrap_or(0), height);

    let items: Vec<ListItem> = app
        .channels
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, channel)| {
            let is_focused = focused == Some(i);
            let marker = if is_focused { "▸ " } else { "  " };

            let mut spans = vec![
                Span::styled(marker, if is_focused { Theme::accent() } else { Theme::dimmed() }),
                Span::styled(
                    channel.name.as_str(),
                    if is_focused { Theme::focused() } else { Theme::text() },
                ),
            ];
            if let Some(group) = &channel.group {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(format!("[{}]", group), Theme::group()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(25, 10), 16);
        assert_eq!(scroll_offset(3, 0), 0);
    }
}
