//! Sortable, filterable table over JSON rows.

use std::{cmp::Ordering, fmt, rc::Rc};

use egui::{
    pos2, vec2, Align2, Color32, CornerRadius, FontId, Margin, Pos2, Rect, RichText, ScrollArea,
    Sense, Stroke, Ui,
};
use serde_json::Value;
use theme::{style, ComponentKind, Restyle, StyleSheet, Theme, ThemeHandle, Themed};
use tracing::debug;

use crate::{
    button::Button,
    paint::{sheet_color, sheet_color_or},
};

pub const DEFAULT_COLUMN_WIDTH: f32 = 120.0;
const ROW_HEIGHT: f32 = 30.0;
const HEADER_HEIGHT: f32 = 32.0;
const CELL_PADDING: f32 = 8.0;

pub type Formatter = Rc<dyn Fn(&Value) -> String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub title: String,
    pub width: Option<f32>,
    pub auto_size: bool,
    pub align: Align,
    pub formatter: Option<Formatter>,
}

impl Column {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            width: None,
            auto_size: false,
            align: Align::Left,
            formatter: None,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn auto_size(mut self) -> Self {
        self.auto_size = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn formatter(mut self, formatter: impl Fn(&Value) -> String + 'static) -> Self {
        self.formatter = Some(Rc::new(formatter));
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("auto_size", &self.auto_size)
            .field("align", &self.align)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Row indices refer to the loaded data, not to the filtered view.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    RowSelected(usize, Value),
    RowDoubleClicked(usize, Value),
    ColumnSorted { key: String, order: SortOrder },
}

/// Search field with a clear button.
#[derive(Debug)]
pub struct FilterBar {
    search: String,
    clear: Themed<Button>,
    style: StyleSheet,
}

impl FilterBar {
    pub const PLACEHOLDER: &'static str = "Search...";

    pub fn new(engine: &ThemeHandle) -> Self {
        Self {
            search: String::new(),
            clear: Button::secondary("Clear").themed(engine),
            style: StyleSheet::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.search
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn clear_button(&self) -> &Themed<Button> {
        &self.clear
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    /// Returns the new search text when it changed this frame.
    pub fn show(&mut self, ui: &mut Ui) -> Option<String> {
        let selector = "filter_bar input";
        let background = sheet_color_or(&self.style, selector, "background-color", Color32::WHITE);
        let text_color = sheet_color_or(&self.style, selector, "color", Color32::BLACK);
        let border = sheet_color_or(&self.style, selector, "border", Color32::GRAY);

        let mut changed = false;
        ui.horizontal(|ui| {
            ui.visuals_mut().widgets.inactive.bg_stroke = Stroke::new(1.0, border);
            let edit = egui::TextEdit::singleline(&mut self.search)
                .hint_text(Self::PLACEHOLDER)
                .text_color(text_color)
                .background_color(background)
                .margin(Margin::symmetric(12, 6))
                .desired_width(ui.available_width() - 110.0);
            changed |= ui.add(edit).changed();

            if self.clear.borrow().show(ui).clicked() && !self.search.is_empty() {
                self.search.clear();
                changed = true;
            }
        });

        changed.then(|| self.search.clone())
    }
}

impl Restyle for FilterBar {
    fn component_kind(&self) -> ComponentKind {
        ComponentKind::FilterBar
    }

    fn restyle(&mut self, theme: &Theme) {
        self.style = style::filter_bar(theme);
    }
}

#[derive(Debug)]
pub struct DataGrid {
    filter_bar: Themed<FilterBar>,
    columns: Vec<Column>,
    rows: Vec<Value>,
    filter_columns: Vec<String>,
    filter_text: String,
    sort: Option<(usize, SortOrder)>,
    selected: Option<usize>,
    style: StyleSheet,
}

impl DataGrid {
    pub fn new(engine: &ThemeHandle) -> Self {
        Self {
            filter_bar: FilterBar::new(engine).themed(engine),
            columns: Vec::new(),
            rows: Vec::new(),
            filter_columns: Vec::new(),
            filter_text: String::new(),
            sort: None,
            selected: None,
            style: StyleSheet::new(),
        }
    }

    /// Builds the grid and binds it in one step.
    pub fn bound(engine: &ThemeHandle) -> Themed<DataGrid> {
        Self::new(engine).themed(engine)
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        self.sort = None;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Replaces the rows with a copy of `rows`. Selection is cleared.
    pub fn load_data(&mut self, rows: &[Value]) {
        self.rows = rows.to_vec();
        self.selected = None;
        debug!(rows = self.rows.len(), "loaded grid data");
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn filter_bar(&self) -> &Themed<FilterBar> {
        &self.filter_bar
    }

    pub fn set_filter_columns(&mut self, keys: &[&str]) {
        self.filter_columns = keys.iter().map(|key| (*key).to_string()).collect();
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.filter_bar.borrow_mut().set_text(self.filter_text.clone());
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn sort_state(&self) -> Option<(&str, SortOrder)> {
        self.sort
            .and_then(|(index, order)| Some((self.columns.get(index)?.key.as_str(), order)))
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    /// Cell text: empty for null or missing values, strings unquoted.
    pub fn display_text(column: &Column, row: &Value) -> String {
        let value = row.get(&column.key).unwrap_or(&Value::Null);
        if value.is_null() {
            return String::new();
        }
        if let Some(formatter) = &column.formatter {
            return formatter(value);
        }
        match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    /// Indices of rows that pass the filter, in display order.
    pub fn visible_rows(&self) -> Vec<usize> {
        let needle = self.filter_text.to_lowercase();
        let searched: Vec<&Column> = if self.filter_columns.is_empty() {
            self.columns.iter().collect()
        } else {
            self.columns
                .iter()
                .filter(|column| self.filter_columns.contains(&column.key))
                .collect()
        };

        let mut visible: Vec<usize> = (0..self.rows.len())
            .filter(|&index| {
                needle.is_empty()
                    || searched.iter().any(|column| {
                        Self::display_text(column, &self.rows[index])
                            .to_lowercase()
                            .contains(&needle)
                    })
            })
            .collect();

        if let Some((column, order)) = self.sort.and_then(|(i, o)| Some((self.columns.get(i)?, o))) {
            visible.sort_by(|&a, &b| {
                let ordering = Self::compare(column, &self.rows[a], &self.rows[b]);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
        visible
    }

    // Numbers order before everything else, so mixed columns still sort
    // totally.
    fn compare(column: &Column, a: &Value, b: &Value) -> Ordering {
        let numbers = (
            a.get(&column.key).and_then(Value::as_f64),
            b.get(&column.key).and_then(Value::as_f64),
        );
        match numbers {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Self::display_text(column, a).cmp(&Self::display_text(column, b)),
        }
    }

    /// Sorts by column `index`; a repeated call flips the order.
    pub fn sort_by(&mut self, index: usize) -> Option<GridEvent> {
        let column = self.columns.get(index)?;
        let order = match self.sort {
            Some((current, order)) if current == index => order.toggled(),
            _ => SortOrder::Ascending,
        };
        self.sort = Some((index, order));
        debug!(column = %column.key, ?order, "sorting grid");
        Some(GridEvent::ColumnSorted {
            key: column.key.clone(),
            order,
        })
    }

    pub fn select_row(&mut self, index: usize) -> Option<GridEvent> {
        let row = self.rows.get(index)?.clone();
        self.selected = Some(index);
        Some(GridEvent::RowSelected(index, row))
    }

    pub fn activate_row(&mut self, index: usize) -> Option<GridEvent> {
        let row = self.rows.get(index)?.clone();
        self.selected = Some(index);
        Some(GridEvent::RowDoubleClicked(index, row))
    }

    fn column_widths(&self, visible: &[usize], available: f32) -> Vec<f32> {
        let mut widths: Vec<f32> = self
            .columns
            .iter()
            .map(|column| match (column.width, column.auto_size) {
                (Some(width), _) => width,
                (None, true) => {
                    let longest = visible
                        .iter()
                        .map(|&row| Self::display_text(column, &self.rows[row]).chars().count())
                        .chain(std::iter::once(column.title.chars().count() + 2))
                        .max()
                        .unwrap_or_default();
                    longest as f32 * 7.5 + 2.0 * CELL_PADDING
                }
                (None, false) => DEFAULT_COLUMN_WIDTH,
            })
            .collect();

        let fixed: f32 = widths.iter().rev().skip(1).sum();
        if let Some(last) = widths.last_mut() {
            *last = last.max(available - fixed);
        }
        widths
    }

    fn paint_cell(ui: &Ui, rect: Rect, text: String, align: Align, color: Color32) {
        let (anchor, pos): (Align2, Pos2) = match align {
            Align::Left => (Align2::LEFT_CENTER, pos2(rect.left() + CELL_PADDING, rect.center().y)),
            Align::Center => (Align2::CENTER_CENTER, rect.center()),
            Align::Right => (Align2::RIGHT_CENTER, pos2(rect.right() - CELL_PADDING, rect.center().y)),
        };
        ui.painter()
            .with_clip_rect(rect)
            .text(pos, anchor, text, FontId::proportional(14.0), color);
    }

    pub fn show(&mut self, ui: &mut Ui) -> Vec<GridEvent> {
        let mut events = Vec::new();
        if let Some(text) = self.filter_bar.borrow_mut().show(ui) {
            self.filter_text = text;
        }
        ui.add_space(4.0);

        let sheet = &self.style;
        let background = sheet_color_or(sheet, "table", "background-color", Color32::WHITE);
        let alternate = sheet_color_or(sheet, "table", "alternate-background-color", background);
        let gridline = sheet_color_or(sheet, "table", "gridline-color", Color32::LIGHT_GRAY);
        let text_color = sheet_color_or(sheet, "table", "color", Color32::BLACK);
        let header_bg = sheet_color_or(sheet, "table::header", "background-color", alternate);
        let selected_bg = sheet_color_or(sheet, "table::item:selected", "background-color", Color32::BLUE);
        let selected_text = sheet_color(sheet, "table::item:selected", "color").unwrap_or(Color32::WHITE);
        let grid_stroke = Stroke::new(1.0, gridline);

        let visible = self.visible_rows();
        let widths = self.column_widths(&visible, ui.available_width());
        let total: f32 = widths.iter().sum();
        let offsets: Vec<f32> = widths
            .iter()
            .scan(0.0, |x, width| {
                let start = *x;
                *x += width;
                Some(start)
            })
            .collect();
        let cell = |row: Rect, index: usize| {
            Rect::from_min_size(pos2(row.left() + offsets[index], row.top()), vec2(widths[index], row.height()))
        };

        let (header, header_response) = ui.allocate_exact_size(vec2(total, HEADER_HEIGHT), Sense::click());
        ui.painter().rect_filled(header, CornerRadius::ZERO, header_bg);
        for (index, column) in self.columns.iter().enumerate() {
            let rect = cell(header, index);
            let marker = match self.sort {
                Some((sorted, SortOrder::Ascending)) if sorted == index => " ▲",
                Some((sorted, SortOrder::Descending)) if sorted == index => " ▼",
                _ => "",
            };
            Self::paint_cell(ui, rect, format!("{}{marker}", column.title), column.align, text_color);
            ui.painter().vline(rect.right(), rect.y_range(), grid_stroke);
        }
        ui.painter().hline(header.x_range(), header.bottom(), grid_stroke);

        if header_response.clicked() {
            let clicked = header_response
                .interact_pointer_pos()
                .and_then(|pos| (0..self.columns.len()).find(|&i| cell(header, i).contains(pos)));
            if let Some(event) = clicked.and_then(|index| self.sort_by(index)) {
                events.push(event);
            }
        }

        let mut clicked_row = None;
        let mut activated_row = None;
        ScrollArea::vertical()
            .id_salt(ui.id().with("data_grid_rows"))
            .auto_shrink([false, true])
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.y = 0.0;
                for (position, &row_index) in visible.iter().enumerate() {
                    let (row_rect, response) = ui.allocate_exact_size(vec2(total, ROW_HEIGHT), Sense::click());
                    if !ui.is_rect_visible(row_rect) {
                        continue;
                    }
                    let is_selected = self.selected == Some(row_index);
                    let (fill, color) = match (is_selected, position % 2 == 1) {
                        (true, _) => (selected_bg, selected_text),
                        (false, true) => (alternate, text_color),
                        (false, false) => (background, text_color),
                    };
                    ui.painter().rect_filled(row_rect, CornerRadius::ZERO, fill);
                    for (index, column) in self.columns.iter().enumerate() {
                        let text = Self::display_text(column, &self.rows[row_index]);
                        Self::paint_cell(ui, cell(row_rect, index), text, column.align, color);
                    }
                    ui.painter().hline(row_rect.x_range(), row_rect.bottom(), grid_stroke);

                    if response.double_clicked() {
                        activated_row = Some(row_index);
                    } else if response.clicked() {
                        clicked_row = Some(row_index);
                    }
                }
                if visible.is_empty() {
                    ui.add_space(CELL_PADDING);
                    ui.label(RichText::new("No rows").color(text_color).weak());
                }
            });

        events.extend(clicked_row.and_then(|row| self.select_row(row)));
        events.extend(activated_row.and_then(|row| self.activate_row(row)));
        events
    }
}

impl Restyle for DataGrid {
    fn component_kind(&self) -> ComponentKind {
        ComponentKind::DataGrid
    }

    fn restyle(&mut self, theme: &Theme) {
        self.style = style::data_grid(theme);
    }
}

#[cfg(test)]
#[path = "tests/data_grid_tests.rs"]
mod tests;
