use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info, warn};

use crate::io::store::{Store, StoreError};
use crate::model::{Config, Filter, Status, Task, TimeOrder};
use crate::ops::grouping::{self, DayGroup};
use crate::ops::task_list::TaskList;
use crate::ops::task_ops::{self, TaskError};

use super::dialog::{Dialog, DialogKind};
use super::input;
use super::line_edit::LineEdit;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the quick-add field
    QuickAdd,
    /// Add/edit form is open
    Dialog,
    /// Waiting for y/n on a delete
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

/// A one-line message in the status row, dismissed by the next key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Main application state. Handlers take `&mut App`; nothing lives
/// outside it.
pub struct App {
    pub store: Store,
    pub list: TaskList,
    pub time_order: TimeOrder,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub mode: Mode,
    /// Index into display order (headers excluded)
    pub cursor: usize,
    /// First visible list row (headers included)
    pub scroll_offset: usize,
    pub quick_add: LineEdit,
    pub dialog: Option<Dialog>,
    /// Task awaiting delete confirmation
    pub pending_delete: Option<i64>,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl App {
    /// Build the app with the All filter loaded
    pub fn new(store: Store, config: &Config) -> Result<Self, StoreError> {
        let list = TaskList::load(&store, Filter::All)?;
        Ok(App {
            store,
            list,
            time_order: config.view.time_order,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            mode: Mode::Navigate,
            cursor: 0,
            scroll_offset: 0,
            quick_add: LineEdit::default(),
            dialog: None,
            pending_delete: None,
            notice: None,
            should_quit: false,
        })
    }

    pub fn filter(&self) -> Filter {
        self.list.filter()
    }

    pub fn groups(&self) -> Vec<DayGroup<'_>> {
        grouping::group_by_day(self.list.tasks(), self.time_order)
    }

    /// Task ids in the order they appear on screen
    pub fn display_ids(&self) -> Vec<i64> {
        grouping::display_order(&self.groups())
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.display_ids().get(self.cursor).copied()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_id().and_then(|id| self.list.get(id))
    }

    pub fn task_count(&self) -> usize {
        self.list.len()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.task_count();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        let max = count - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn cursor_to(&mut self, index: usize) {
        self.cursor = index.min(self.task_count().saturating_sub(1));
    }

    pub fn set_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            text: text.into(),
        });
    }

    fn report(&mut self, err: &TaskError) {
        if err.is_validation() {
            warn!(error = %err, "rejected input");
            self.set_notice(NoticeKind::Warning, err.to_string());
        } else {
            error!(error = %err, "task operation failed");
            self.set_notice(NoticeKind::Error, err.to_string());
        }
    }

    /// Reload the snapshot for the active filter, then put the cursor back
    /// on `keep` if it is still listed, else clamp it.
    pub fn reload(&mut self, keep: Option<i64>) {
        if let Err(e) = self.list.reload(&self.store) {
            self.report(&TaskError::Persistence(e));
        }
        let ids = self.display_ids();
        match keep.and_then(|id| ids.iter().position(|x| *x == id)) {
            Some(pos) => self.cursor = pos,
            None => self.cursor = self.cursor.min(ids.len().saturating_sub(1)),
        }
    }

    /// Tab controller: switch filter and reload
    pub fn set_filter(&mut self, filter: Filter) {
        if filter == self.filter() {
            return;
        }
        if let Err(e) = self.list.set_filter(filter, &self.store) {
            self.report(&TaskError::Persistence(e));
            return;
        }
        self.cursor = 0;
        self.scroll_offset = 0;
        info!(?filter, "switched filter");
    }

    /// Checkbox: flip the selected task between complete and incomplete
    pub fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, status) = (task.id, task.status.toggled());
        self.set_status(id, status);
    }

    pub fn set_status(&mut self, id: i64, status: Status) {
        match task_ops::set_status(&self.store, id, status) {
            Ok(()) => self.reload(Some(id)),
            Err(e) => {
                self.report(&e);
                self.reload(Some(id));
            }
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_id() {
            self.pending_delete = Some(id);
            self.mode = Mode::Confirm;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.mode = Mode::Navigate;
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        if let Err(e) = task_ops::delete_task(&self.store, id) {
            self.report(&e);
        }
        self.reload(None);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Navigate;
    }

    pub fn start_quick_add(&mut self) {
        self.mode = Mode::QuickAdd;
    }

    /// Insert the quick-add text. Blank input is ignored and the field
    /// stays focused.
    pub fn submit_quick_add(&mut self) {
        let text = self.quick_add.as_str().to_string();
        match task_ops::quick_add(&self.store, &text) {
            Ok(Some(id)) => {
                self.quick_add.take();
                self.mode = Mode::Navigate;
                self.reload(Some(id));
            }
            Ok(None) => {}
            Err(e) => {
                self.report(&e);
                self.reload(None);
            }
        }
    }

    pub fn cancel_quick_add(&mut self) {
        self.mode = Mode::Navigate;
    }

    pub fn open_add_dialog(&mut self) {
        self.dialog = Some(Dialog::add());
        self.mode = Mode::Dialog;
    }

    pub fn open_edit_dialog(&mut self) {
        if let Some(task) = self.selected_task() {
            self.dialog = Some(Dialog::edit(task));
            self.mode = Mode::Dialog;
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
        self.mode = Mode::Navigate;
    }

    /// Confirm the open dialog. On success the dialog closes and the list
    /// reloads; on failure it stays open with the error shown.
    pub fn submit_dialog(&mut self) {
        let Some(dialog) = self.dialog.as_ref() else {
            return;
        };
        let form = dialog.to_form();
        let result = match dialog.kind {
            DialogKind::Add => task_ops::add_task(&self.store, &form),
            DialogKind::Edit { id } => task_ops::edit_task(&self.store, id, &form).map(|()| id),
        };
        match result {
            Ok(id) => {
                self.dialog = None;
                self.mode = Mode::Navigate;
                self.reload(Some(id));
            }
            Err(e) => {
                if let Some(d) = self.dialog.as_mut() {
                    d.error = Some(e.to_string());
                }
                self.report(&e);
            }
        }
    }
}

/// Run the TUI application
pub fn run(store: Store, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(store, config)?;
    info!(path = %app.store.path().display(), tasks = app.task_count(), "starting tui");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
