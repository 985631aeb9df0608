use kanban_core::{Loggable, Point};
use kanban_domain::{Card, Column, ColumnId, DragSession, ElementId};
use unicode_width::UnicodeWidthStr;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::app::App;
use crate::hit_map::{ElementKind, HitMap};
use crate::surface::{BoardSurface, CardSlot};
use crate::theme::{palette, Palette};
use crate::wrap::wrap_text;

const ADD_LABEL: &str = "+ Add";
const PREVIEW_TEXT_WIDTH: usize = 24;

pub fn to_core_rect(area: Rect) -> kanban_core::Rect {
    kanban_core::Rect::new(area.x, area.y, area.width, area.height)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let palette = palette(app.theme);
    let area = frame.area();

    // Resolved against the previous frame's hit map, which is what the
    // pointer was over when it last moved.
    let drop_target = app
        .drag
        .session()
        .and_then(|s| app.board.locate_column_at_screen_point(s.current_pointer, &app.hit_map));

    app.hit_map.clear();
    let root = app.hit_map.push(ElementKind::Root, to_core_rect(area), None);
    frame.render_widget(Block::default().style(palette.base()), area);

    let footer_height = if app.show_help { 2 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(footer_height),
        ])
        .split(area);

    render_top_bar(app, frame, chunks[0], root, &palette);
    render_columns(app, frame, chunks[1], root, drop_target, &palette);
    render_footer(app, frame, chunks[2], root, &palette);
    render_preview(app, frame, &palette);
}

fn render_top_bar(app: &mut App, frame: &mut Frame, area: Rect, root: ElementId, palette: &Palette) {
    let bar = app.hit_map.push(ElementKind::TopBar, to_core_rect(area), Some(root));
    if area.height < 2 {
        return;
    }
    let row = Rect::new(area.x + 1, area.y + 1, area.width.saturating_sub(2), 1);
    frame.render_widget(
        Paragraph::new(Span::styled("Kanban Board", palette.title())),
        row,
    );

    let label = format!("[ {} ]", app.theme.switch_label());
    let width = (label.width() as u16).min(row.width);
    let button = Rect::new(row.right().saturating_sub(width), row.y, width, 1);
    frame.render_widget(Paragraph::new(Span::styled(label, palette.button())), button);
    app.hit_map
        .push(ElementKind::ThemeButton, to_core_rect(button), Some(bar));
}

fn render_columns(
    app: &mut App,
    frame: &mut Frame,
    area: Rect,
    root: ElementId,
    drop_target: Option<ColumnId>,
    palette: &Palette,
) {
    let App {
        board,
        surface,
        hit_map,
        drag,
        ..
    } = app;

    let area = Rect::new(
        area.x + 1,
        area.y,
        area.width.saturating_sub(2),
        area.height,
    );
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (column, column_area) in board.columns().iter().zip(areas.iter()) {
        let is_target = drop_target == Some(column.id);
        render_column(
            frame,
            *column_area,
            column,
            ColumnContext {
                surface: &mut *surface,
                hit_map: &mut *hit_map,
                dragging: drag.session(),
                parent: root,
                is_target,
                palette,
            },
        );
    }
}

struct ColumnContext<'a> {
    surface: &'a mut BoardSurface,
    hit_map: &'a mut HitMap,
    dragging: Option<&'a DragSession>,
    parent: ElementId,
    is_target: bool,
    palette: &'a Palette,
}

fn render_column(frame: &mut Frame, area: Rect, column: &Column, ctx: ColumnContext<'_>) {
    let ColumnContext {
        surface,
        hit_map,
        dragging,
        parent,
        is_target,
        palette,
    } = ctx;

    let column_el = hit_map.push(ElementKind::Column(column.id), to_core_rect(area), Some(parent));
    let block = Block::bordered()
        .title(Span::styled(
            format!(" {} ({}) ", column.title, column.len()),
            palette.title(),
        ))
        .border_style(if is_target {
            palette.drop_target_border()
        } else {
            palette.border()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 || inner.width < 4 {
        surface.set_geometry(column.id, 0, 0);
        return;
    }

    let add_width = (ADD_LABEL.width() as u16).min(inner.width);
    let add_button = Rect::new(inner.right() - add_width, inner.y, add_width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(ADD_LABEL, palette.button())),
        add_button,
    );
    hit_map.push(
        ElementKind::AddButton(column.id),
        to_core_rect(add_button),
        Some(column_el),
    );

    let list = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);
    let card_width = list.width - 1;
    surface.set_geometry(column.id, card_width, list.height);
    let list_el = hit_map.push(ElementKind::CardList(column.id), to_core_rect(list), Some(column_el));

    let slots = surface.slots(column);
    if let Some(slot) = slots.iter().find(|s| surface.is_editing(s.card_id)) {
        surface.reveal(column.id, *slot);
    }
    let viewport = surface.viewport(column.id);

    if column.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("Drop cards here", palette.separator())),
            Rect::new(list.x, list.y, card_width, 1),
        );
    }

    for (card, slot) in column.cards().iter().zip(slots.iter()) {
        let layout = CardLayout {
            list,
            card_width,
            scroll_offset: viewport.scroll_offset,
            slot: *slot,
        };
        let Some(clipped) = layout.visible_rect() else {
            continue;
        };
        let card_el =
            hit_map.push_with_origin(ElementKind::Card(card.id), clipped, layout.origin(), Some(list_el));
        let is_drag_source = dragging.is_some_and(|s| s.card_id == card.id);
        render_card(frame, card, &layout, card_el, surface, hit_map, is_drag_source, palette);
    }

    if viewport.scrollbar_visible {
        let track = Rect::new(list.right() - 1, list.y, 1, list.height);
        let mut state = ScrollbarState::new(viewport.max_scroll() as usize)
            .position(viewport.scroll_offset as usize)
            .viewport_content_length(viewport.rows as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            track,
            &mut state,
        );
        hit_map.push(
            ElementKind::Scrollbar(column.id),
            to_core_rect(track),
            Some(column_el),
        );
    }
}

/// Maps a card's content rows onto the screen through the column's scroll.
struct CardLayout {
    list: Rect,
    card_width: u16,
    scroll_offset: u16,
    slot: CardSlot,
}

impl CardLayout {
    fn origin(&self) -> Point {
        Point::new(
            self.list.x as i32,
            self.list.y as i32 + self.slot.top as i32 - self.scroll_offset as i32,
        )
    }

    /// Screen row of one of the card's rows, if it is scrolled into view.
    fn screen_row(&self, row: u16) -> Option<u16> {
        let content_row = self.slot.top + row;
        if content_row < self.scroll_offset || content_row >= self.scroll_offset + self.list.height {
            return None;
        }
        Some(self.list.y + content_row - self.scroll_offset)
    }

    fn visible_rect(&self) -> Option<kanban_core::Rect> {
        let rows: Vec<u16> = (0..self.slot.rows)
            .filter_map(|r| self.screen_row(r))
            .collect();
        let first = *rows.first()?;
        Some(kanban_core::Rect::new(
            self.list.x,
            first,
            self.card_width,
            rows.len() as u16,
        ))
    }

    fn row_rect(&self, row: u16, width: u16) -> Option<Rect> {
        self.screen_row(row)
            .map(|y| Rect::new(self.list.x, y, width, 1))
    }
}

#[allow(clippy::too_many_arguments)]
fn render_card(
    frame: &mut Frame,
    card: &Card,
    layout: &CardLayout,
    card_el: ElementId,
    surface: &BoardSurface,
    hit_map: &mut HitMap,
    is_drag_source: bool,
    palette: &Palette,
) {
    let text_width = layout.card_width.saturating_sub(crate::surface::DELETE_BUTTON_WIDTH);

    let body_rows = if card.is_editing() {
        let (visible, cursor) = match surface.editor().filter(|e| e.card_id == card.id) {
            Some(editor) => editor.buffer.window(layout.card_width as usize),
            None => (card.text.clone(), 0),
        };
        if let Some(field) = layout.row_rect(0, layout.card_width) {
            frame.render_widget(
                Paragraph::new(Span::styled(visible, palette.edit_field()))
                    .style(palette.edit_field()),
                field,
            );
            hit_map.push(ElementKind::EditField(card.id), to_core_rect(field), Some(card_el));
            if surface.is_editing(card.id) {
                frame.set_cursor_position((field.x + cursor as u16, field.y));
            }
        }
        1
    } else {
        let lines = surface.card_lines(card);
        let text_style = if is_drag_source {
            palette.separator()
        } else {
            palette.base()
        };
        for (row, line) in lines.iter().enumerate() {
            if let Some(rect) = layout.row_rect(row as u16, text_width) {
                frame.render_widget(Paragraph::new(Span::styled(line.clone(), text_style)), rect);
                hit_map.push(ElementKind::CardLabel(card.id), to_core_rect(rect), Some(card_el));
            }
        }
        if let Some(row) = layout.row_rect(0, layout.card_width) {
            let button = Rect::new(row.right() - 1, row.y, 1, 1);
            frame.render_widget(
                Paragraph::new(Span::styled("×", palette.delete_button())),
                button,
            );
            hit_map.push(ElementKind::DeleteButton(card.id), to_core_rect(button), Some(card_el));
        }
        lines.len() as u16
    };

    if let Some(rect) = layout.row_rect(body_rows, layout.card_width) {
        let rule = "─".repeat(layout.card_width as usize);
        frame.render_widget(Paragraph::new(Span::styled(rule, palette.separator())), rect);
    }
}

fn render_footer(app: &mut App, frame: &mut Frame, area: Rect, root: ElementId, palette: &Palette) {
    app.hit_map
        .push(ElementKind::Footer, to_core_rect(area), Some(root));

    let status = app
        .board
        .latest_log()
        .map(|entry| entry.display())
        .unwrap_or_else(|| "No activity yet".to_string());
    let mut lines = vec![Line::from(Span::styled(format!(" {}", status), palette.footer()))];
    if app.show_help {
        lines.push(Line::from(Span::styled(
            " +Add/1-3: new card | drag: move | double-click: edit | Enter: save | Esc: cancel | t: theme | ?: help | q: quit",
            palette.footer(),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_preview(app: &App, frame: &mut Frame, palette: &Palette) {
    let Some(state) = app.preview.state() else {
        return;
    };
    let area = frame.area();
    let lines = wrap_text(&state.text, PREVIEW_TEXT_WIDTH);
    let text_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let width = (text_width + 4).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    if width == 0 || height == 0 {
        return;
    }

    let max_x = (area.right() - width) as i32;
    let max_y = (area.bottom() - height) as i32;
    let x = state.origin.x.clamp(area.x as i32, max_x) as u16;
    let y = state.origin.y.clamp(area.y as i32, max_y) as u16;
    let rect = Rect::new(x, y, width, height);

    let style = palette.preview(app.config.drag_preview_dim);
    let content: Vec<Line> = lines
        .into_iter()
        .map(|l| Line::from(Span::styled(format!(" {}", l), style)))
        .collect();
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(content).block(Block::bordered().style(style)),
        rect,
    );
}
