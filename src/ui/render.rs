use crate::ui::app::App;
use crate::ui::state::{ConfigField, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::path::PathBuf;

pub fn render_ui(frame: &mut Frame, app: &App) {
    match &app.view {
        View::Overview => render_overview(frame, app),
        View::ConfigEdit {
            title_input,
            description_input,
            date_input,
            time_input,
            focused_field,
            invalid_deadline,
        } => render_config_edit(
            frame,
            app,
            title_input,
            description_input,
            date_input,
            time_input,
            *focused_field,
            *invalid_deadline,
        ),
        View::FilePicker {
            files,
            selected_index,
            error,
        } => {
            // The picker is a modal over the assignment screen.
            render_overview(frame, app);
            render_file_picker(frame, app, files, *selected_index, error.as_deref());
        }
    }
}

fn render_overview(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(7), // assignment card
            Constraint::Length(6), // countdown card
            Constraint::Min(5),    // submission panel
            Constraint::Length(7), // status table
            Constraint::Length(3), // footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_assignment_card(frame, app, chunks[1]);
    render_countdown_card(frame, app, chunks[2]);
    render_submission_panel(frame, app, chunks[3]);
    render_status_table(frame, app, chunks[4]);
    render_footer(frame, app, chunks[5]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let hints = format!(
        "[c: {} | a: {} | l: {} | q: Quit]",
        app.translate("configureAssignment"),
        app.translate("addSubmission"),
        app.translate("language"),
    );

    let header = Paragraph::new(hints)
        .block(
            Block::default()
                .title(app.translate("appTitle"))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

fn render_assignment_card(frame: &mut Frame, app: &App, area: Rect) {
    let config = &app.config;
    let opened = format!(
        "{}: {} {} {}",
        app.translate("opened"),
        config.open_date.format("%Y-%m-%d"),
        app.translate("at"),
        config.open_date.format("%H:%M:%S"),
    );
    let due = format!(
        "{}: {} {} {}",
        app.translate("due"),
        config.due_date.format("%Y-%m-%d"),
        app.translate("at"),
        config.due_date.format("%H:%M:%S"),
    );

    let card = Paragraph::new(vec![
        Line::from(Span::raw(opened)),
        Line::from(Span::raw(due)),
        Line::from(""),
        Line::from(Span::raw(config.description.clone())),
    ])
    .block(
        Block::default()
            .title(config.title.clone())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .wrap(Wrap { trim: true });

    frame.render_widget(card, area);
}

fn render_countdown_card(frame: &mut Frame, app: &App, area: Rect) {
    let countdown = app.tracker.countdown();
    let late = countdown.overdue;

    let accent = if late { Color::Red } else { Color::Yellow };
    let title = if late {
        app.translate("timeOverdue")
    } else {
        app.translate("timeRemaining")
    };

    let overdue_by = countdown.unsigned_string();
    let hint = if late {
        vec![
            Line::from(Span::styled(
                app.translate("submissionLate"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                app.translate_with("lateMessage", &[("time", overdue_by.as_str())]),
                Style::default().fg(Color::Red),
            )),
        ]
    } else {
        vec![Line::from(Span::styled(
            app.translate("submitDeadline"),
            Style::default().fg(Color::Yellow),
        ))]
    };

    let mut lines = vec![Line::from(Span::styled(
        countdown.to_string(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(hint);

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(card, area);
}

fn render_submission_panel(frame: &mut Frame, app: &App, area: Rect) {
    let submission = &app.submission;

    let (accent, lines) = if let Some(at) = submission.submitted_at() {
        let date = at.format("%Y-%m-%d").to_string();
        let time = at.format("%H:%M:%S").to_string();
        let mut submitted_line = vec![Span::raw(app.translate_with(
            "submittedOn",
            &[("date", date.as_str()), ("time", time.as_str())],
        ))];
        if submission.submitted_late() {
            submitted_line.push(Span::styled(
                format!(" {}", app.translate("lateSubmission")),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }

        (
            Color::Green,
            vec![
                Line::from(Span::styled(
                    app.translate("submissionSuccessful"),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(submitted_line),
            ],
        )
    } else {
        (
            Color::Cyan,
            vec![
                Line::from(Span::styled(
                    app.translate("readyToSubmit"),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::raw(app.translate("clickToSubmit"))),
                Line::from(""),
                Line::from(Span::styled(
                    format!("[a] {}", app.translate("addSubmission")),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
            ],
        )
    };

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(panel, area);
}

fn render_status_table(frame: &mut Frame, app: &App, area: Rect) {
    let submission = &app.submission;
    let countdown = app.tracker.countdown();

    let status_value = if submission.is_submitted() {
        Span::styled(
            app.translate("submittedForGrading"),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled(
            app.translate("noSubmissions"),
            Style::default().fg(Color::Yellow),
        )
    };

    let overdue_by = countdown.unsigned_string();
    let remaining_value = if countdown.overdue {
        Span::styled(
            app.translate_with("assignmentSubmittedLate", &[("time", overdue_by.as_str())]),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::styled(countdown.to_string(), Style::default().fg(Color::Blue))
    };

    let last_modified = submission
        .submitted_at()
        .map(|at| {
            format!(
                "{} {} {}",
                at.format("%Y-%m-%d"),
                app.translate("at"),
                at.format("%H:%M:%S"),
            )
        })
        .unwrap_or_else(|| "-".to_string());

    let label = |key: &str| {
        Span::styled(
            format!("{}: ", app.translate(key)),
            Style::default().add_modifier(Modifier::BOLD),
        )
    };

    let rows = vec![
        Line::from(vec![label("attemptNumber"), Span::raw(app.translate("attemptText"))]),
        Line::from(vec![label("submissionStatusLabel"), status_value]),
        Line::from(vec![
            label("gradingStatus"),
            Span::raw(app.translate("notGraded")),
        ]),
        Line::from(vec![label("timeRemainingLabel"), remaining_value]),
        Line::from(vec![label("lastModified"), Span::raw(last_modified)]),
    ];

    let table = Paragraph::new(rows).block(
        Block::default()
            .title(app.translate("submissionStatus"))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let active = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let inactive = Style::default();

    let footer = Paragraph::new(Line::from(vec![
        Span::raw(app.translate("copyright")),
        Span::raw(format!("  |  {}: ", app.translate("language"))),
        Span::styled(
            app.translate("english"),
            if app.language == crate::i18n::Language::En {
                active
            } else {
                inactive
            },
        ),
        Span::raw(" / "),
        Span::styled(
            app.translate("french"),
            if app.language == crate::i18n::Language::Fr {
                active
            } else {
                inactive
            },
        ),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

#[allow(clippy::too_many_arguments)]
fn render_config_edit(
    frame: &mut Frame,
    app: &App,
    title_input: &str,
    description_input: &str,
    date_input: &str,
    time_input: &str,
    focused_field: ConfigField,
    invalid_deadline: bool,
) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // motivational banner
            Constraint::Length(3), // title
            Constraint::Length(3), // due date
            Constraint::Length(3), // due time
            Constraint::Length(3), // description
            Constraint::Min(1),    // error line
            Constraint::Length(3), // help
        ])
        .split(area);

    let banner = Paragraph::new(vec![
        Line::from(Span::styled(
            app.translate("realityCheck"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(format!(
            "{} {}",
            app.translate("motivationalMessage"),
            app.translate("stickToDeadline"),
        ))),
    ])
    .block(
        Block::default()
            .title(app.translate("assignmentConfiguration"))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
    .wrap(Wrap { trim: true });

    frame.render_widget(banner, chunks[0]);

    let field_style = |field: ConfigField| {
        if field == focused_field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    let title_field = Paragraph::new(format!(
        "{}: {}_",
        app.translate("assignmentTitle"),
        title_input
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_style(ConfigField::Title)),
    );
    frame.render_widget(title_field, chunks[1]);

    let date_field = Paragraph::new(format!(
        "{} (YYYY-MM-DD): {}_",
        app.translate("dueDateTime"),
        date_input
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_style(ConfigField::DueDate)),
    );
    frame.render_widget(date_field, chunks[2]);

    let time_field = Paragraph::new(format!(
        "{} (HH:MM): {}_",
        app.translate("dueDateTime"),
        time_input
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_style(ConfigField::DueTime)),
    );
    frame.render_widget(time_field, chunks[3]);

    let description_field = Paragraph::new(format!(
        "{}: {}_",
        app.translate("description"),
        description_input
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_style(ConfigField::Description)),
    );
    frame.render_widget(description_field, chunks[4]);

    if invalid_deadline {
        let error = Paragraph::new(app.translate("invalidDeadline"))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(error, chunks[5]);
    }

    let help = Paragraph::new("[Tab: Switch Field | Enter: Apply | Esc: Cancel]")
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[6]);
}

fn render_file_picker(
    frame: &mut Frame,
    app: &App,
    files: &[PathBuf],
    selected_index: usize,
    error: Option<&str>,
) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(app.translate("uploadFile"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // file list
            Constraint::Length(2), // staged file / error
            Constraint::Length(1), // help
        ])
        .split(inner);

    let items: Vec<ListItem> = files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let style = if i == selected_index {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let prefix = if i == selected_index { "> " } else { "  " };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            ListItem::new(format!("{}{}", prefix, name)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(app.translate("selectFile"))
            .borders(Borders::ALL),
    );
    frame.render_widget(list, chunks[0]);

    let staged_line = if let Some(message) = error {
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(file) = app.submission.staged_file() {
        let selected = format!(
            "{} ({} bytes)",
            app.translate_with("fileSelected", &[("filename", file.name.as_str())]),
            file.size,
        );
        Line::from(Span::styled(selected, Style::default().fg(Color::Green)))
    } else {
        Line::from(Span::styled(
            app.translate("noFileSelected"),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(staged_line), chunks[1]);

    let help = Paragraph::new(format!(
        "[↑↓ | Enter: {} | s: {} | Esc: {}]",
        app.translate("selectFile"),
        app.translate("submit"),
        app.translate("cancel"),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}

/// Centered popup rect, as a fraction of the surrounding area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
