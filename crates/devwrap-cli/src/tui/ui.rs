use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use devwrap_core::format::thousands;
use devwrap_session::{NoticeLevel, Phase, CLOSING_MESSAGE};

use super::app::{App, Field};
use crate::plain::profile_line;

/// Render the full TUI frame.
pub fn render(f: &mut Frame, app: &App) {
    let notice_height = if app.controller.notice().is_some() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(notice_height), // notice banner
            Constraint::Min(5),                // main area
            Constraint::Length(1),             // progress
            Constraint::Length(1),             // status bar
        ])
        .split(f.area());

    render_notice(f, app, chunks[0]);
    match app.controller.phase() {
        Phase::Input => render_form(f, app, chunks[1]),
        Phase::Presenting(_) => render_slide(f, app, chunks[1]),
        Phase::Summary => render_summary(f, app, chunks[1]),
    }
    render_progress(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);
}

fn render_notice(f: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = app.controller.notice() else {
        return;
    };
    let style = match notice.level {
        NoticeLevel::Info => Style::default().fg(Color::Black).bg(Color::Green),
        NoticeLevel::Error => Style::default().fg(Color::White).bg(Color::Red),
    };
    let text = format!(" {}  (d: dismiss)", notice.message);
    f.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
}

// ── Input ──

fn field_style(app: &App, field: Field) -> Style {
    if app.form.focus == field {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Unwrap Your Dev Year! ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // github
            Constraint::Length(3), // stackoverflow
            Constraint::Length(1), // error / status
            Constraint::Min(0),
        ])
        .split(inner);

    let inputs = [
        (
            Field::Github,
            " GitHub Profile URL ",
            &app.form.github,
            "https://github.com/yourusername",
        ),
        (
            Field::StackOverflow,
            " Stack Overflow Profile URL (Optional) ",
            &app.form.stackoverflow,
            "https://stackoverflow.com/users/youruserid/username",
        ),
    ];
    for (row, (field, title, value, placeholder)) in rows.iter().zip(inputs) {
        let line = if value.is_empty() {
            Line::from(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(value.as_str())
        };
        let input = Paragraph::new(line).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(field_style(app, field)),
        );
        f.render_widget(input, *row);
    }

    let status = if let Some(err) = &app.form.error {
        Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::White).bg(Color::Red),
        ))
    } else if app.is_fetching() {
        Line::from(Span::styled(
            "Unwrapping your year...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(status), rows[2]);
}

// ── Slides ──

fn render_slide(f: &mut Frame, app: &App, area: Rect) {
    let Some(slide) = app.controller.current_slide() else {
        return;
    };
    let (from, to) = gradient(slide.color);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", slide.title),
            Style::default().fg(from).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(to));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            slide.value.clone(),
            Style::default().fg(from).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(slide.description, Style::default().fg(to))),
    ];
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(body, area);
}

fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let Some((shown, total)) = app.controller.progress() else {
        return;
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .label(format!("{}/{total}", shown + 1))
        .ratio(progress_ratio(shown, total));
    f.render_widget(gauge, area);
}

// ── Summary ──

fn render_summary(f: &mut Frame, app: &App, area: Rect) {
    let Some(summary) = app.controller.summary() else {
        return;
    };
    let block = Block::default()
        .title(format!(" Your {} Dev Wrapped ", app.controller.options().year))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let mut lines = Vec::new();
    if let Some(payload) = app.controller.state().payload() {
        lines.push(Line::from(Span::styled(
            format!(
                " {}",
                profile_line(
                    app.controller.state().username(),
                    payload.total_contributions,
                    summary.tier
                )
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    lines.extend([
        Line::from(vec![
            Span::raw(" Tier: "),
            Span::styled(
                summary.tier.label(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ]);
    for slide in app.controller.slides() {
        let (from, _) = gradient(slide.color);
        lines.push(Line::from(vec![
            Span::raw(format!(" {:<30}", slide.title)),
            Span::styled(slide.value.clone(), Style::default().fg(from)),
        ]));
    }
    if let Some(payload) = app.controller.state().payload() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Project Breakdown",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (size, count) in payload.project_categories.entries() {
            lines.push(Line::from(format!(
                "   {:<10}{}",
                capitalize(size),
                thousands(count)
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {CLOSING_MESSAGE}"),
        Style::default().fg(Color::Green),
    )));
    lines.push(Line::from(Span::styled(
        format!(" Press s to share @{}'s Wrapped", app.controller.state().username()),
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(body, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let phase = app.controller.phase();
    let text = format!(" devwrap | {} | {}", phase_label(phase), key_hints(phase));
    let bar = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::White).bg(Color::DarkGray),
    )));
    f.render_widget(bar, area);
}

// ── Helpers ──

/// Map a `from-<hue>-N to-<hue>-N` token to a pair of terminal colors.
fn gradient(token: &str) -> (Color, Color) {
    let mut from = Color::White;
    let mut to = Color::White;
    for part in token.split_whitespace() {
        if let Some(rest) = part.strip_prefix("from-") {
            from = hue(rest);
        } else if let Some(rest) = part.strip_prefix("to-") {
            to = hue(rest);
        }
    }
    (from, to)
}

fn hue(token: &str) -> Color {
    match token.split('-').next().unwrap_or("") {
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        _ => Color::White,
    }
}

fn progress_ratio(shown: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (shown as f64 / total as f64).clamp(0.0, 1.0)
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Input => "Profile",
        Phase::Presenting(_) => "Unwrapping",
        Phase::Summary => "Summary",
    }
}

fn key_hints(phase: Phase) -> &'static str {
    match phase {
        Phase::Input => "Tab:switch field  Enter:unwrap  Esc:quit",
        Phase::Presenting(_) => "d:dismiss  q:quit",
        Phase::Summary => "s:share  d:dismiss  q:quit",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
