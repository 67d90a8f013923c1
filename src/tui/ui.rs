//! UI rendering for the TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::update::{
    FilterMode, Model, Stage, BODY_QUESTION, PREFIX_QUESTION, SCOPE_QUESTION, SUBJECT_QUESTION,
};

pub const LIMIT_NOTICE: &str =
    "Number of characters equals total input limit. Value will be left blank";
const SELECTION_MARKER: &str = "» ";

/// Main draw function - orchestrates all rendering
pub fn draw(frame: &mut Frame, model: &Model) {
    let area = frame.area();

    let main_layout = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Stage content
        Constraint::Length(1), // Footer/help
    ])
    .split(area);

    draw_header(frame, main_layout[0]);

    match model.stage {
        Stage::ChoosingPrefix => draw_prefix_list(frame, model, main_layout[1]),
        Stage::EnteringScope | Stage::EnteringSubject | Stage::ConfirmingBody => {
            draw_text_stage(frame, model, main_layout[1])
        }
        Stage::Done | Stage::Cancelled => {}
    }

    draw_footer(frame, model, main_layout[2]);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(format!(" comet v{}", env!("CARGO_PKG_VERSION")))
        .style(Style::default().bg(Color::Blue).fg(Color::White).bold());
    frame.render_widget(header, area);
}

fn draw_prefix_list(frame: &mut Frame, model: &Model, area: Rect) {
    let filter_rows = if model.filter_mode == FilterMode::Off { 0 } else { 1 };
    let layout = Layout::vertical([
        Constraint::Length(1),           // Question
        Constraint::Length(filter_rows), // Filter bar
        Constraint::Min(1),              // Candidates
        Constraint::Length(1),           // Selected description
    ])
    .split(area);

    frame.render_widget(question_line(PREFIX_QUESTION, ""), layout[0]);

    if model.filter_mode != FilterMode::Off {
        let mut spans = vec![
            Span::styled(" / ", Style::default().fg(Color::Yellow)),
            Span::raw(model.filter.value()),
        ];
        if model.visible.is_empty() {
            spans.push(Span::styled("  no match", Style::default().fg(Color::DarkGray)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), layout[1]);
        if model.filter_mode == FilterMode::Editing {
            let x = layout[1].x + 3 + model.filter.cursor() as u16;
            frame.set_cursor_position((x.min(layout[1].right().saturating_sub(1)), layout[1].y));
        }
    }

    let items: Vec<ListItem> = model
        .visible
        .iter()
        .enumerate()
        .skip(model.scroll_offset)
        .take(model.visible_items)
        .filter_map(|(position, &index)| {
            let prefix = model.prefixes.get(index)?;
            let selected = position == model.selected_index;
            let marker = if selected { SELECTION_MARKER } else { "  " };
            let style = if selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default()
            };
            Some(ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{}. {}", position + 1, prefix.title), style),
            ])))
        })
        .collect();
    frame.render_widget(List::new(items), layout[2]);

    if let Some(prefix) = model.selected_prefix() {
        let description = Paragraph::new(format!("  {}", prefix.description))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(description, layout[3]);
    }
}

fn draw_text_stage(frame: &mut Frame, model: &Model, area: Rect) {
    let transcript_rows = model.transcript.len() as u16;
    let layout = Layout::vertical([
        Constraint::Length(transcript_rows), // Answered questions
        Constraint::Length(1),               // Active question
        Constraint::Length(3),               // Input box
        Constraint::Length(1),               // Notice
        Constraint::Min(0),
    ])
    .split(area);

    let answered: Vec<Line> = model
        .transcript
        .iter()
        .map(|(question, answer)| {
            Line::from(vec![
                Span::styled("✔ ", Style::default().fg(Color::Green)),
                Span::styled(*question, Style::default().bold()),
                Span::raw(" "),
                Span::styled(answer.as_str(), Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(answered), layout[0]);

    let (question, hint) = prompt_for(model);
    frame.render_widget(question_line(question, &hint), layout[1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if model.limit_reached {
            Color::DarkGray
        } else {
            Color::Cyan
        }));
    let content = if model.input.is_empty() {
        Span::styled(placeholder_for(model.stage), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(model.input.value())
    };
    frame.render_widget(Paragraph::new(content).block(block), layout[2]);

    if model.limit_reached {
        let notice = Paragraph::new(LIMIT_NOTICE).style(Style::default().fg(Color::Yellow));
        frame.render_widget(notice, layout[3]);
    } else {
        let inner = layout[2];
        let x = inner.x + 1 + model.input.cursor() as u16;
        frame.set_cursor_position((x.min(inner.right().saturating_sub(2)), inner.y + 1));
    }
}

fn draw_footer(frame: &mut Frame, model: &Model, area: Rect) {
    let help = match model.stage {
        Stage::ChoosingPrefix => match model.filter_mode {
            FilterMode::Editing => " enter keep filter · esc clear filter",
            FilterMode::Applied => " ↑/↓ move · 1-9 select · enter confirm · esc clear filter",
            FilterMode::Off => " ↑/↓ move · 1-9 select · / filter · enter confirm · q quit",
        },
        Stage::EnteringScope => " tab (scope) cycle through changed file paths",
        Stage::EnteringSubject => " tab cycle through previous commit messages",
        _ => " enter confirm · esc cancel",
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn question_line<'a>(question: &'a str, hint: &str) -> Paragraph<'a> {
    Paragraph::new(Line::from(vec![
        Span::styled("? ", Style::default().fg(Color::Green).bold()),
        Span::styled(question, Style::default().bold()),
        Span::styled(format!(" {hint}"), Style::default().fg(Color::DarkGray)),
    ]))
}

/// Active question and its hint, including the live counter
pub fn prompt_for(model: &Model) -> (&'static str, String) {
    let counter = model
        .counter()
        .map(|c| format!(" {c}"))
        .unwrap_or_default();
    match model.stage {
        Stage::EnteringScope => (
            SCOPE_QUESTION,
            format!("(Enter to skip / Esc to cancel){counter}:"),
        ),
        Stage::EnteringSubject => (SUBJECT_QUESTION, format!("(Esc to cancel){counter}:")),
        Stage::ConfirmingBody => (BODY_QUESTION, "(Esc to cancel):".to_string()),
        _ => (PREFIX_QUESTION, String::new()),
    }
}

fn placeholder_for(stage: Stage) -> &'static str {
    match stage {
        Stage::EnteringScope => "Scope",
        Stage::EnteringSubject => "Commit message",
        _ => "y/N",
    }
}
