use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, List, ListItem, ListState, Paragraph},
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::Theme;
use crate::map::MapOverlay;
use crate::screen::{PlaceListTemplate, TemplateBody};
use crate::types::{CategoryId, LatLon};

/// Label of the selectable slot appended when results were truncated.
pub(super) const MORE_RESULTS_LABEL: &str = "More results...";

/// Argument bundle for rendering the place list pane.
pub(super) struct ListContext<'a> {
    pub template: &'a PlaceListTemplate,
    pub selected: usize,
    pub searching: bool,
    pub throbber_state: &'a ThrobberState,
    pub theme: &'a Theme,
}

/// Render the list pane from the screen's template.
pub(super) fn render_list(frame: &mut Frame, area: Rect, ctx: ListContext<'_>) {
    let block = Block::bordered()
        .title(ctx.template.title.clone())
        .title_style(ctx.theme.header);

    match &ctx.template.body {
        TemplateBody::Loading => {
            let mut line = Line::default();
            if ctx.searching {
                let spinner = Throbber::default()
                    .style(ctx.theme.empty)
                    .throbber_style(ctx.theme.empty);
                line.spans.push(spinner.to_symbol_span(ctx.throbber_state));
            }
            line.spans
                .push(Span::styled("Searching nearby places", ctx.theme.empty));
            let paragraph = Paragraph::new(line)
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
        }
        TemplateBody::NoItems { message } => {
            let paragraph = Paragraph::new(Span::styled(message.clone(), ctx.theme.empty))
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
        }
        TemplateBody::Rows(rows) => {
            let title_width = usize::from(area.width.saturating_sub(6));
            let mut items: Vec<ListItem> = rows
                .rows()
                .iter()
                .map(|row| {
                    let first = Line::from(vec![
                        Span::raw(format!("{} ", row.icon.glyph)),
                        Span::raw(fit(&row.title, title_width)),
                    ]);
                    let second = Line::from(Span::styled(
                        format!("   {}", row.description.display()),
                        ctx.theme.badge,
                    ));
                    ListItem::new(Text::from(vec![first, second]))
                })
                .collect();
            if rows.truncated() {
                items.push(ListItem::new(Line::from(Span::styled(
                    MORE_RESULTS_LABEL,
                    ctx.theme.empty,
                ))));
            }

            let list = List::new(items)
                .block(block)
                .highlight_style(ctx.theme.row_highlight);
            let mut state = ListState::default();
            state.select(Some(ctx.selected));
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}

/// Render the map pane: the overlay membership plus highlighted places.
pub(super) fn render_map(
    frame: &mut Frame,
    area: Rect,
    overlay: &MapOverlay,
    reference: Option<LatLon>,
    theme: &Theme,
) {
    let mut lines = Vec::new();
    match reference {
        Some(position) => lines.push(Line::from(format!("position {position}"))),
        None => lines.push(Line::from(Span::styled("position unknown", theme.empty))),
    }

    let membership = overlay.membership();
    if membership.is_empty() {
        lines.push(Line::from(Span::styled(
            "no categories highlighted",
            theme.empty,
        )));
    } else {
        let names: Vec<&str> = membership.iter().map(CategoryId::as_str).collect();
        lines.push(Line::from(format!("highlighted: {}", names.join(", "))));
    }

    let capacity = usize::from(area.height.saturating_sub(4));
    for item in overlay.highlighted().iter().take(capacity) {
        if let Some(location) = item.location() {
            lines.push(Line::from(Span::styled(
                format!("* {} ({location})", item.name),
                theme.map,
            )));
        }
    }

    let block = Block::bordered().title("Map").title_style(theme.header);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the one-line key hint bar.
pub(super) fn render_status(frame: &mut Frame, area: Rect, hints: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled(hints.to_string(), theme.empty)),
        area,
    );
}

/// Truncate `text` to `width` display columns, ending with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
