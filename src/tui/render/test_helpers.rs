use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::store::Store;
use crate::model::{ActivityType, Config, Difficulty, Status, TaskDraft, Weekday};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over a fresh, empty database. Keep the TempDir alive.
pub fn empty_app() -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    let store = Store::open(&tmp.path().join("database.db")).unwrap();
    let app = App::new(store, &Config::default()).unwrap();
    (tmp, app)
}

/// Four tasks across Monday, Wednesday and the unscheduled group:
///
/// - Segunda-feira: Standup 09:00-09:15
/// - Quarta-feira: Gym 07:00 (complete), Read 20:00
/// - Sem dia: Call mom
pub fn app_with_tasks() -> (TempDir, App) {
    let (tmp, mut app) = empty_app();
    let store = &app.store;
    store
        .insert(&TaskDraft {
            name: "Read".into(),
            day: Some(Weekday::Wednesday),
            start_time: Some("20:00".into()),
            activity_type: Some(ActivityType::Study),
            ..Default::default()
        })
        .unwrap();
    store
        .insert(&TaskDraft {
            name: "Standup".into(),
            day: Some(Weekday::Monday),
            start_time: Some("09:00".into()),
            end_time: Some("09:15".into()),
            difficulty: Some(Difficulty::Easy),
            activity_type: Some(ActivityType::Work),
        })
        .unwrap();
    let gym = store
        .insert(&TaskDraft {
            name: "Gym".into(),
            day: Some(Weekday::Wednesday),
            start_time: Some("07:00".into()),
            end_time: Some("08:00".into()),
            difficulty: Some(Difficulty::Hard),
            activity_type: Some(ActivityType::Leisure),
        })
        .unwrap();
    store.set_status(gym, Status::Complete).unwrap();
    store.insert_quick("Call mom").unwrap();
    app.reload(None);
    (tmp, app)
}
