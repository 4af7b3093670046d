use crate::config::Config;
use crate::deadline::DeadlineTracker;
use crate::i18n::{Catalog, Language};
use crate::models::{AssignmentConfig, AssignmentPatch, StagedFile};
use crate::submission::Submission;
use crate::ticker::Ticker;
use crate::ui::render::render_ui;
use crate::ui::state::{ConfigField, View};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};

/// File extensions the picker offers for submission, matching the accepted
/// upload formats of the assignment screen.
const ACCEPTED_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "txt", "rtf"];

const TICK_PERIOD: std::time::Duration = std::time::Duration::from_secs(1);

pub struct App {
    pub(crate) config: AssignmentConfig,
    pub(crate) language: Language,
    pub(crate) catalog: Catalog,
    pub(crate) tracker: DeadlineTracker,
    pub(crate) submission: Submission,
    pub(crate) view: View,
    ticker: Ticker,
}

impl App {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let now = Utc::now();
        Self {
            tracker: DeadlineTracker::new(config.assignment.due_date, now),
            ticker: Ticker::start(TICK_PERIOD),
            config: config.assignment,
            language: config.language,
            catalog,
            submission: Submission::default(),
            view: View::Overview,
        }
    }

    pub(crate) fn translate(&self, key: &str) -> String {
        self.catalog.translate(self.language, key)
    }

    pub(crate) fn translate_with(&self, key: &str, replacements: &[(&str, &str)]) -> String {
        self.catalog.translate_with(self.language, key, replacements)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main event loop
        let result = self.event_loop(&mut terminal).await;

        // Deregister the tick task before tearing the terminal down.
        self.ticker.stop();

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            // Drain pending clock ticks so the countdown is current before
            // drawing.
            while let Some(tick) = self.ticker.try_recv() {
                self.tracker.tick(tick);
            }

            // Always redraw the UI
            terminal.draw(|f| render_ui(f, self))?;

            // Check for keyboard events with a short timeout
            if event::poll(std::time::Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key_event(key) {
                        break; // User quit
                    }
                }
            }

            // Small yield to allow other async tasks to run
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        Ok(())
    }

    /// Handle one key press. Returns true when the user quits.
    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        // Take the view out to avoid borrowing issues
        let current_view = std::mem::replace(&mut self.view, View::Overview);

        match current_view {
            View::Overview => match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('c') => {
                    self.view = View::config_edit(&self.config);
                }
                KeyCode::Char('a') if !self.submission.is_submitted() => {
                    self.view = match list_submission_files(Path::new(".")) {
                        Ok(files) => View::FilePicker {
                            files,
                            selected_index: 0,
                            error: None,
                        },
                        Err(e) => View::FilePicker {
                            files: Vec::new(),
                            selected_index: 0,
                            error: Some(format!("Failed to list files: {}", e)),
                        },
                    };
                }
                KeyCode::Char('l') => {
                    self.language = self.language.toggled();
                }
                _ => {}
            },
            View::ConfigEdit {
                mut title_input,
                mut description_input,
                mut date_input,
                mut time_input,
                mut focused_field,
                invalid_deadline,
            } => {
                match key.code {
                    KeyCode::Esc => {
                        // Discard edits
                    }
                    KeyCode::Tab => {
                        focused_field = focused_field.next();
                        self.view = View::ConfigEdit {
                            title_input,
                            description_input,
                            date_input,
                            time_input,
                            focused_field,
                            invalid_deadline,
                        };
                    }
                    KeyCode::BackTab => {
                        focused_field = focused_field.prev();
                        self.view = View::ConfigEdit {
                            title_input,
                            description_input,
                            date_input,
                            time_input,
                            focused_field,
                            invalid_deadline,
                        };
                    }
                    KeyCode::Char(c) => {
                        match focused_field {
                            ConfigField::Title => title_input.push(c),
                            ConfigField::Description => description_input.push(c),
                            ConfigField::DueDate => {
                                if date_input.len() < 10 {
                                    date_input.push(c);
                                }
                            }
                            ConfigField::DueTime => {
                                if time_input.len() < 5 {
                                    time_input.push(c);
                                }
                            }
                        }
                        self.view = View::ConfigEdit {
                            title_input,
                            description_input,
                            date_input,
                            time_input,
                            focused_field,
                            invalid_deadline,
                        };
                    }
                    KeyCode::Backspace => {
                        match focused_field {
                            ConfigField::Title => {
                                title_input.pop();
                            }
                            ConfigField::Description => {
                                description_input.pop();
                            }
                            ConfigField::DueDate => {
                                date_input.pop();
                            }
                            ConfigField::DueTime => {
                                time_input.pop();
                            }
                        }
                        self.view = View::ConfigEdit {
                            title_input,
                            description_input,
                            date_input,
                            time_input,
                            focused_field,
                            invalid_deadline,
                        };
                    }
                    KeyCode::Enter => match parse_deadline(&date_input, &time_input) {
                        Ok(due) => {
                            self.apply_config_edit(title_input, description_input, due);
                        }
                        Err(_) => {
                            self.view = View::ConfigEdit {
                                title_input,
                                description_input,
                                date_input,
                                time_input,
                                focused_field,
                                invalid_deadline: true,
                            };
                        }
                    },
                    _ => {
                        self.view = View::ConfigEdit {
                            title_input,
                            description_input,
                            date_input,
                            time_input,
                            focused_field,
                            invalid_deadline,
                        };
                    }
                }
            }
            View::FilePicker {
                files,
                mut selected_index,
                mut error,
            } => match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Esc => {
                    // Closing the picker discards the staged file.
                    self.submission.cancel();
                }
                KeyCode::Up => {
                    if selected_index > 0 {
                        selected_index -= 1;
                    }
                    self.view = View::FilePicker {
                        files,
                        selected_index,
                        error,
                    };
                }
                KeyCode::Down => {
                    if selected_index < files.len().saturating_sub(1) {
                        selected_index += 1;
                    }
                    self.view = View::FilePicker {
                        files,
                        selected_index,
                        error,
                    };
                }
                KeyCode::Enter => {
                    if let Some(path) = files.get(selected_index).cloned() {
                        match StagedFile::from_path(path) {
                            Ok(file) => {
                                self.submission.stage(file);
                                error = None;
                            }
                            Err(e) => {
                                error = Some(format!("Cannot read file: {}", e));
                            }
                        }
                    }
                    self.view = View::FilePicker {
                        files,
                        selected_index,
                        error,
                    };
                }
                KeyCode::Char('s') => {
                    let late = self.tracker.is_late();
                    if !self.submission.confirm(Utc::now(), late) {
                        // Nothing staged yet, keep the picker open.
                        self.view = View::FilePicker {
                            files,
                            selected_index,
                            error,
                        };
                    }
                }
                _ => {
                    self.view = View::FilePicker {
                        files,
                        selected_index,
                        error,
                    };
                }
            },
        }

        false
    }

    fn apply_config_edit(&mut self, title: String, description: String, due: DateTime<Utc>) {
        let due_changed = due != self.config.due_date;

        self.config.apply(AssignmentPatch {
            title: Some(title),
            description: Some(description),
            due_date: Some(due),
            open_date: None,
        });

        if due_changed {
            // One tick task per due-date configuration.
            self.tracker.set_due(due);
            self.tracker.tick(Utc::now());
            self.ticker.restart();
        }

        self.view = View::Overview;
    }
}

fn parse_deadline(date_str: &str, time_str: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date format (expected YYYY-MM-DD): {}", e))?;

    let time = NaiveTime::parse_from_str(time_str, "%H:%M")
        .map_err(|e| anyhow::anyhow!("Invalid time format (expected HH:MM): {}", e))?;

    let datetime = NaiveDateTime::new(date, time);
    Ok(datetime.and_utc())
}

/// List the files the picker offers: regular files in `dir` with an accepted
/// submission extension, in name order.
fn list_submission_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);

        if accepted {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn test_app() -> App {
        let config = Config {
            assignment: AssignmentConfig::demo(Utc::now()),
            language: Language::En,
        };
        App::new(config, Catalog::load().unwrap())
    }

    #[test]
    fn test_parse_deadline() {
        let parsed = parse_deadline("2025-03-10", "23:59").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 0).unwrap());

        assert!(parse_deadline("03/10/2025", "23:59").is_err());
        assert!(parse_deadline("2025-03-10", "midnight").is_err());
    }

    #[test]
    fn test_list_submission_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_essay.pdf"), b"b").unwrap();
        std::fs::write(dir.path().join("a_notes.txt"), b"a").unwrap();
        std::fs::write(dir.path().join("code.rs"), b"no").unwrap();
        std::fs::write(dir.path().join("REPORT.DOCX"), b"caps").unwrap();
        std::fs::create_dir(dir.path().join("drafts.pdf")).unwrap();

        let files = list_submission_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["REPORT.DOCX", "a_notes.txt", "b_essay.pdf"]);
    }

    #[tokio::test]
    async fn test_config_edit_applies_due_change() {
        let mut app = test_app();
        app.view = View::ConfigEdit {
            title_input: "Updated Title".to_string(),
            description_input: "Updated description".to_string(),
            date_input: "2030-01-02".to_string(),
            time_input: "08:30".to_string(),
            focused_field: ConfigField::Title,
            invalid_deadline: false,
        };

        assert!(!app.handle_key_event(press(KeyCode::Enter)));

        assert_eq!(app.config.title, "Updated Title");
        assert_eq!(
            app.config.due_date,
            Utc.with_ymd_and_hms(2030, 1, 2, 8, 30, 0).unwrap()
        );
        assert_eq!(app.tracker.due(), app.config.due_date);
        assert!(matches!(app.view, View::Overview));
    }

    #[tokio::test]
    async fn test_config_edit_rejects_garbage_deadline() {
        let mut app = test_app();
        let due_before = app.config.due_date;
        app.view = View::ConfigEdit {
            title_input: "Title".to_string(),
            description_input: "Description".to_string(),
            date_input: "soon".to_string(),
            time_input: "ish".to_string(),
            focused_field: ConfigField::DueDate,
            invalid_deadline: false,
        };

        app.handle_key_event(press(KeyCode::Enter));

        assert_eq!(app.config.due_date, due_before);
        match &app.view {
            View::ConfigEdit { invalid_deadline, .. } => assert!(*invalid_deadline),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_language_toggle_key() {
        let mut app = test_app();
        assert_eq!(app.language, Language::En);
        app.handle_key_event(press(KeyCode::Char('l')));
        assert_eq!(app.language, Language::Fr);
        app.handle_key_event(press(KeyCode::Char('l')));
        assert_eq!(app.language, Language::En);
    }

    #[tokio::test]
    async fn test_picker_stage_then_submit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("essay.pdf");
        std::fs::write(&path, b"final").unwrap();

        let mut app = test_app();
        app.view = View::FilePicker {
            files: vec![path],
            selected_index: 0,
            error: None,
        };

        app.handle_key_event(press(KeyCode::Enter));
        assert_eq!(app.submission.staged_file().unwrap().name, "essay.pdf");

        app.handle_key_event(press(KeyCode::Char('s')));
        assert!(app.submission.is_submitted());
        assert!(matches!(app.view, View::Overview));
    }

    #[tokio::test]
    async fn test_picker_submit_without_staged_file_stays_open() {
        let mut app = test_app();
        app.view = View::FilePicker {
            files: Vec::new(),
            selected_index: 0,
            error: None,
        };

        app.handle_key_event(press(KeyCode::Char('s')));
        assert!(!app.submission.is_submitted());
        assert!(matches!(app.view, View::FilePicker { .. }));
    }

    #[tokio::test]
    async fn test_picker_cancel_discards_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("essay.txt");
        std::fs::write(&path, b"draft").unwrap();

        let mut app = test_app();
        app.view = View::FilePicker {
            files: vec![path],
            selected_index: 0,
            error: None,
        };

        app.handle_key_event(press(KeyCode::Enter));
        app.handle_key_event(press(KeyCode::Esc));

        assert_eq!(app.submission, Submission::NotSubmitted);
        assert!(matches!(app.view, View::Overview));
    }
}
