//! Plain-text presenter for terminals and logs-free smoke output.

use crate::view::model::{ListView, MetricCard, SectionView, TableView};
use crate::view::notice::Notice;

/// Turns view-models into a concrete UI representation.
pub trait Presenter {
    type Output;

    fn list(&self, view: &ListView) -> Self::Output;
    fn section(&self, view: &SectionView) -> Self::Output;
    fn notice(&self, notice: &Notice) -> Self::Output;
}

/// Renders aligned, pipe-separated tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    type Output = String;

    fn list(&self, view: &ListView) -> String {
        match view {
            ListView::Table(table) => render_table(table),
            ListView::Empty(empty) => format!("{}\n{}\n", empty.title, empty.hint),
        }
    }

    fn section(&self, view: &SectionView) -> String {
        let mut out = format!("== {} ==\n{}\n", view.title, view.subtitle);
        if !view.cards.is_empty() {
            out.push('\n');
            out.push_str(&render_cards(&view.cards));
        }
        if let Some(tabs) = &view.tabs {
            let strip = tabs
                .tabs
                .iter()
                .map(|tab| {
                    if *tab == tabs.active {
                        format!("[{tab}]")
                    } else {
                        tab.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            out.push('\n');
            out.push_str(&strip);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.list(&view.content));
        out
    }

    fn notice(&self, notice: &Notice) -> String {
        format!("[{}] {}", notice.level.as_str(), notice.message)
    }
}

fn render_cards(cards: &[MetricCard]) -> String {
    cards
        .iter()
        .map(|card| format!("{}: {}\n", card.title, card.value))
        .collect()
}

fn render_table(table: &TableView) -> String {
    let mut header = table
        .columns
        .iter()
        .map(|column| column.to_string())
        .collect::<Vec<_>>();
    header.push("Status".to_string());

    let body = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = row.cells.clone();
            cells.push(
                row.badge
                    .as_ref()
                    .map(|badge| badge.label.to_string())
                    .unwrap_or_default(),
            );
            cells
        })
        .collect::<Vec<_>>();

    let mut widths = header
        .iter()
        .map(|cell| cell.chars().count())
        .collect::<Vec<_>>();
    for cells in &body {
        for (index, cell) in cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = render_line(&header, &widths);
    for cells in &body {
        out.push_str(&render_line(cells, &widths));
    }
    out
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{}\n", padded.trim_end())
}
