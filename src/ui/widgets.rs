use super::constants::{UiStyle, POPUP_HEIGHT, POPUP_WIDTH};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Row, Table},
};

pub fn default_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

pub fn popup_rect(area: Rect) -> Rect {
    let width = POPUP_WIDTH.min(area.width);
    let height = POPUP_HEIGHT.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn header_table<'a, const N: usize>(
    header: [&'a str; N],
    rows: Vec<[String; N]>,
    widths: [Constraint; N],
) -> Table<'a> {
    let header = Row::new(header.map(|h| Cell::from(h).style(UiStyle::HEADER)));
    let rows = rows.into_iter().map(|row| Row::new(row.map(Cell::from)));
    Table::new(rows, widths).header(header)
}
