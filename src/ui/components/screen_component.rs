//! One CRUD screen: filter bar, record table, pager and record dialogs.
//!
//! All state lives in the wrapped [`TableController`]; this component only
//! maps keys to controller calls and draws what the controller holds.

use crate::api::AdminApi;
use crate::config::{Config, DisplayConfig};
use crate::constants::{EMPTY_TABLE_TEXT, ERROR_NO_SELECTION, LOADING_TEXT, MIN_COLUMN_WIDTH};
use crate::controller::{Command, Outcome, TableController};
use crate::dialog::{DialogState, StatusFocus};
use crate::notify::Notification;
use crate::record::RecordId;
use crate::schema::{FieldKind, FILTER_ALL};
use crate::ui::components::cell::table_cell;
use crate::ui::components::dialogs::record_dialogs;
use crate::ui::core::{Action, Component, Screen};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use std::sync::Arc;
use std::time::Instant;

pub struct ScreenComponent {
    screen: Screen,
    controller: TableController,
    selected: usize,
    table_state: TableState,
    search_editing: bool,
    loaded: bool,
    display: DisplayConfig,
    api: Arc<dyn AdminApi>,
}

impl ScreenComponent {
    pub fn new(screen: Screen, controller: TableController, config: &Config, api: Arc<dyn AdminApi>) -> Self {
        Self {
            screen,
            controller,
            selected: 0,
            table_state: TableState::default(),
            search_editing: false,
            loaded: false,
            display: config.display.clone(),
            api,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn controller(&self) -> &TableController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TableController {
        &mut self.controller
    }

    pub fn title(&self) -> &'static str {
        self.controller.schema().title
    }

    pub fn is_search_editing(&self) -> bool {
        self.search_editing
    }

    /// True while keys must go to this screen only (open dialog or search box).
    pub fn is_capturing_input(&self) -> bool {
        self.search_editing || self.controller.dialog().is_open()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Commands for the first visit of the screen.
    pub fn ensure_loaded(&mut self) -> Vec<Command> {
        if self.loaded {
            return Vec::new();
        }
        self.reload()
    }

    /// Re-fetch the collection and lookups.
    pub fn reload(&mut self) -> Vec<Command> {
        self.loaded = true;
        let mut commands = vec![self.controller.refresh()];
        commands.extend(self.controller.load_lookups());
        commands
    }

    pub fn handle_outcome(&mut self, outcome: Outcome) -> Vec<Command> {
        let commands = self.controller.handle_outcome(outcome);
        self.clamp_selection();
        commands
    }

    pub fn notify(&mut self, notification: Notification) {
        self.controller.notifications_mut().push(notification);
    }

    pub fn tick(&mut self, now: Instant) {
        self.controller.notifications_mut().expire(now);
    }

    /// Insert pasted text into whatever input has focus.
    pub fn handle_paste(&mut self, text: &str) -> Action {
        let text = text.replace(['\n', '\r'], "");
        if self.search_editing {
            let search = format!("{}{}", self.controller.filter().search, text);
            self.controller.set_search(search);
            self.clamp_selection();
            return Action::None;
        }
        for c in text.chars() {
            self.type_char(c);
        }
        Action::None
    }

    fn selected_id(&self) -> Option<RecordId> {
        self.controller
            .visible_records()
            .get(self.selected)
            .map(|record| record.id().clone())
    }

    fn clamp_selection(&mut self) {
        let rows = self.controller.visible_records().len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    fn dispatch(&self, commands: impl IntoIterator<Item = Command>) -> Action {
        let commands: Vec<Command> = commands.into_iter().collect();
        if commands.is_empty() {
            Action::None
        } else {
            Action::Dispatch {
                screen: self.screen,
                commands,
            }
        }
    }

    fn page_changed(&mut self, command: Option<Command>) -> Action {
        self.selected = 0;
        self.clamp_selection();
        self.dispatch(command)
    }

    /// Run `open` with the selected row, or complain when there is none.
    fn with_selected(&mut self, open: impl FnOnce(&mut TableController, &RecordId) -> bool) -> Action {
        match self.selected_id() {
            Some(id) => {
                open(&mut self.controller, &id);
            }
            None => self.notify(Notification::info(ERROR_NO_SELECTION)),
        }
        Action::None
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let rows = self.controller.visible_records().len();
                if self.selected + 1 < rows {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Char('n') | KeyCode::PageDown => {
                let command = self.controller.next_page();
                self.page_changed(command)
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                let command = self.controller.previous_page();
                self.page_changed(command)
            }
            KeyCode::Char('z') => {
                let command = self.controller.cycle_page_size();
                self.page_changed(command)
            }
            KeyCode::Char('f') => {
                let command = self.controller.cycle_status_filter();
                self.page_changed(command)
            }
            KeyCode::Char('t') => {
                let command = self.controller.cycle_type_filter();
                self.page_changed(command)
            }
            KeyCode::Char('/') => {
                self.search_editing = true;
                Action::None
            }
            KeyCode::Char('r') => {
                let commands = self.reload();
                self.dispatch(commands)
            }
            KeyCode::Enter | KeyCode::Char('v') => self.with_selected(|c, id| c.open_view(id)),
            KeyCode::Char('e') => self.with_selected(|c, id| c.open_edit(id)),
            KeyCode::Char('d') => self.with_selected(|c, id| c.open_delete(id)),
            KeyCode::Char('s') if self.controller.schema().supports_status_change() => {
                self.with_selected(|c, id| c.open_status(id))
            }
            KeyCode::Char('a') => {
                self.controller.open_create();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => {
                self.search_editing = false;
                let command = self.controller.apply_search();
                self.page_changed(command)
            }
            KeyCode::Esc => {
                self.search_editing = false;
                Action::None
            }
            KeyCode::Backspace => {
                let mut search = self.controller.filter().search.clone();
                search.pop();
                self.controller.set_search(search);
                self.clamp_selection();
                Action::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let search = format!("{}{}", self.controller.filter().search, c);
                self.controller.set_search(search);
                self.clamp_selection();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Esc {
            self.controller.close_dialog();
            return Action::None;
        }
        if self.controller.dialog().is_submitting() {
            return Action::None;
        }

        match self.controller.dialog() {
            DialogState::Closed => Action::None,
            DialogState::Viewing(_) => {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Enter => self.controller.close_dialog(),
                    KeyCode::Char('e') => {
                        self.controller.edit_viewed();
                    }
                    _ => {}
                }
                Action::None
            }
            DialogState::Deleting { .. } => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    let command = self.controller.submit();
                    self.dispatch(command)
                }
                KeyCode::Char('n') => {
                    self.controller.close_dialog();
                    Action::None
                }
                _ => Action::None,
            },
            DialogState::ChangingStatus(_) => self.handle_status_key(key),
            DialogState::Editing(_) | DialogState::Creating(_) => self.handle_form_key(key),
        }
    }

    fn handle_status_key(&mut self, key: KeyEvent) -> Action {
        let focus = match self.controller.dialog() {
            DialogState::ChangingStatus(change) => change.focus,
            _ => return Action::None,
        };
        match key.code {
            KeyCode::Enter => {
                let command = self.controller.submit();
                self.dispatch(command)
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.controller.toggle_status_focus();
                Action::None
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if focus == StatusFocus::Status => {
                self.controller.toggle_status_choice();
                Action::None
            }
            KeyCode::Backspace if focus == StatusFocus::Duration => {
                if let DialogState::ChangingStatus(change) = self.controller.dialog_mut() {
                    change.duration.pop();
                }
                Action::None
            }
            KeyCode::Char(c) if focus == StatusFocus::Duration => {
                self.type_char(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn focused_kind(&self) -> Option<FieldKind> {
        let draft = self.controller.dialog().draft()?;
        let key = draft.focused_key()?;
        self.controller.schema().field(key).map(|field| field.kind.clone())
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('u') && key.modifiers.contains(KeyModifiers::CONTROL) {
            let command = self.controller.request_upload();
            return self.dispatch(command);
        }

        let kind = self.focused_kind();
        match key.code {
            KeyCode::Enter => {
                let command = self.controller.submit();
                self.dispatch(command)
            }
            KeyCode::Tab | KeyCode::Down => {
                if let Some(draft) = self.controller.dialog_mut().draft_mut() {
                    draft.focus_next();
                }
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(draft) = self.controller.dialog_mut().draft_mut() {
                    draft.focus_previous();
                }
                Action::None
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                let options: Vec<String> = match kind {
                    Some(FieldKind::Choice(options)) => options.iter().map(|o| o.to_string()).collect(),
                    Some(FieldKind::Lookup) => self.controller.employees().to_vec(),
                    _ => Vec::new(),
                };
                if let Some(value) = self.controller.dialog_mut().draft_mut().and_then(|d| d.focused_value_mut()) {
                    if let Some(next) = cycle_option(&options, value.as_str(), forward) {
                        *value = next;
                    }
                }
                Action::None
            }
            KeyCode::Backspace => {
                if let Some(draft) = self.controller.dialog_mut().draft_mut() {
                    if kind == Some(FieldKind::Image) {
                        draft.upload_path.pop();
                    } else if let Some(value) = draft.focused_value_mut() {
                        value.pop();
                    }
                }
                Action::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.type_char(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Type one character into the focused free-text input of the open dialog.
    fn type_char(&mut self, c: char) {
        let kind = self.focused_kind();
        let has_employees = !self.controller.employees().is_empty();
        match self.controller.dialog_mut() {
            DialogState::ChangingStatus(change) if change.focus == StatusFocus::Duration => change.duration.push(c),
            DialogState::Editing(draft) | DialogState::Creating(draft) => match kind {
                Some(FieldKind::Image) => draft.upload_path.push(c),
                Some(FieldKind::Choice(_)) => {}
                Some(FieldKind::Lookup) if has_employees => {}
                Some(_) => {
                    if let Some(value) = draft.focused_value_mut() {
                        value.push(c);
                    }
                }
                None => {}
            },
            _ => {}
        }
    }

    fn render_filter_bar(&self, f: &mut Frame, area: Rect) {
        let schema = self.controller.schema();
        let filter = self.controller.filter();
        let label = Style::default().fg(Color::Gray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let search = if self.search_editing {
            format!("{}█", filter.search)
        } else if filter.search.is_empty() {
            "(press /)".to_string()
        } else {
            filter.search.clone()
        };
        let mut spans = vec![Span::styled("Search: ", label), Span::styled(search, value)];

        if let Some(status) = &schema.status_filter {
            spans.push(Span::styled(format!("   {} [f]: ", status.label), label));
            spans.push(Span::styled(filter.status.clone(), choice_style(&filter.status)));
        }
        if let Some(kind) = &schema.type_filter {
            spans.push(Span::styled(format!("   {} [t]: ", kind.label), label));
            spans.push(Span::styled(filter.kind.clone(), choice_style(&filter.kind)));
        }
        spans.push(Span::styled("   Rows [z]: ", label));
        spans.push(Span::styled(self.controller.pager().page_size().to_string(), value));

        let border_color = if self.search_editing { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", schema.title))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().fg(border_color));

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_table(&mut self, f: &mut Frame, area: Rect) {
        let schema = self.controller.schema();
        let records = self.controller.visible_records();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::DarkGray));

        if records.is_empty() {
            let text = if self.controller.is_loading() {
                LOADING_TEXT
            } else {
                EMPTY_TABLE_TEXT
            };
            let empty = Paragraph::new(text)
                .block(block)
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let fields: Vec<_> = schema.table_fields().collect();
        let header_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let header = Row::new(
            std::iter::once(Cell::from("ID"))
                .chain(fields.iter().map(|field| Cell::from(field.label)))
                .collect::<Vec<_>>(),
        )
        .style(header_style);

        let rows: Vec<Row> = records
            .iter()
            .map(|record| {
                let cells = std::iter::once(Cell::from(record.id().to_string())).chain(
                    fields
                        .iter()
                        .map(|field| Cell::from(table_cell(field, record, &self.display))),
                );
                Row::new(cells.collect::<Vec<_>>()).style(Style::default().fg(Color::White))
            })
            .collect();

        let widths: Vec<Constraint> = std::iter::once(Constraint::Length(MIN_COLUMN_WIDTH))
            .chain(fields.iter().map(|field| Constraint::Percentage(field.width)))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        self.table_state.select(Some(self.selected));
        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_pager(&self, f: &mut Frame, area: Rect) {
        let pager = self.controller.pager();
        let text = format!(
            "Page {} of {} • {} • [p]rev [n]ext ",
            pager.page() + 1,
            pager.page_count(),
            pager.range_label()
        );
        f.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Right),
            area,
        );
    }

    fn render_dialog(&self, f: &mut Frame, area: Rect) {
        let schema = self.controller.schema();
        match self.controller.dialog() {
            DialogState::Closed => {}
            DialogState::Viewing(record) => {
                let image_url = schema
                    .image_field()
                    .and_then(|field| record.text(field.key))
                    .map(|filename| self.api.image_url(&filename));
                record_dialogs::render_view_dialog(f, area, schema, record, image_url, &self.display);
            }
            DialogState::Editing(draft) | DialogState::Creating(draft) => {
                record_dialogs::render_form_dialog(f, area, schema, draft, self.controller.employees());
            }
            DialogState::Deleting { submitting, .. } => {
                record_dialogs::render_delete_dialog(f, area, schema.singular, *submitting);
            }
            DialogState::ChangingStatus(change) => record_dialogs::render_status_dialog(f, area, change),
        }
    }
}

impl Component for ScreenComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.controller.dialog().is_open() {
            self.handle_dialog_key(key)
        } else if self.search_editing {
            self.handle_search_key(key)
        } else {
            self.handle_table_key(key)
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = LayoutManager::screen_layout(rect);
        self.render_filter_bar(f, chunks[0]);
        self.render_table(f, chunks[1]);
        self.render_pager(f, chunks[2]);
        self.render_dialog(f, rect);
    }
}

fn choice_style(value: &str) -> Style {
    if value == FILTER_ALL {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }
}

/// Neighbour of `current` in `options`, wrapping around.
fn cycle_option(options: &[String], current: &str, forward: bool) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match options.iter().position(|o| o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    Some(options[next].clone())
}
