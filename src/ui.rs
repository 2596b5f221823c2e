use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::client::{HealthStatus, ModelInfo};
use crate::controller::{DashboardController, RequestState};
use crate::gauge::encode;
use crate::recommend::recommend;
use crate::risk::{classify, RISK_CRITICAL, RISK_WARNING};
use crate::sample::Field;

const BORDER: Color = Color::Rgb(0x50, 0x50, 0x78);
const LABEL: Color = Color::Gray;
const FOCUSED: Color = Color::Rgb(0x00, 0xd9, 0xff);

/// UI-side state: the controller plus cursor focus and startup metadata.
pub struct App {
    pub controller: DashboardController,
    pub focus: usize,
    pub endpoint: String,
    pub backend: Option<HealthStatus>,
    pub model_info: Option<ModelInfo>,
    pub should_quit: bool,
}

impl App {
    pub fn new(endpoint: String) -> Self {
        Self {
            controller: DashboardController::new(),
            focus: 0,
            endpoint,
            backend: None,
            model_info: None,
            should_quit: false,
        }
    }

    pub fn focused_field(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }

    /// Append one character to the focused field. Only numeric input is
    /// meaningful here; letters are reserved for key commands.
    pub fn push_char(&mut self, c: char) {
        if !matches!(c, '0'..='9' | '.' | '-' | '+') {
            return;
        }
        let field = self.focused_field();
        let mut value = self.controller.sample().get(field).to_string();
        value.push(c);
        self.controller.edit_field(field, value);
    }

    pub fn backspace(&mut self) {
        let field = self.focused_field();
        let mut value = self.controller.sample().get(field).to_string();
        value.pop();
        self.controller.edit_field(field, value);
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(16),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, rows[0], app);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(rows[1]);

    draw_form(f, cols[0], app);
    draw_results(f, cols[1], app);
    draw_footer(f, rows[2], app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let backend = match &app.backend {
        Some(h) if h.model_loaded => Span::styled(
            "● backend online",
            Style::default().fg(Color::Rgb(0x00, 0xff, 0x88)),
        ),
        Some(_) => Span::styled("● model not loaded", Style::default().fg(RISK_WARNING)),
        None => Span::styled("● backend unreachable", Style::default().fg(RISK_CRITICAL)),
    };
    let model = app
        .model_info
        .as_ref()
        .map(|m| {
            format!(
                "  {} · R² {:.2} · RMSE {:.2}",
                m.model_type, m.performance.r2_score, m.performance.rmse
            )
        })
        .unwrap_or_default();

    let header = Paragraph::new(Line::from(vec![
        backend,
        Span::styled(model, Style::default().fg(LABEL)),
        Span::styled(
            format!("  {}", app.endpoint),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title(Span::styled(
                " MOTOR TEMP PREDICTOR ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(header, area);
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
    let busy = app.controller.is_busy();
    let items: Vec<ListItem> = Field::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == app.focus && !busy;
            let value = app.controller.sample().get(*field);
            let value_style = if focused {
                Style::default().fg(FOCUSED).add_modifier(Modifier::BOLD)
            } else if busy {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if focused { "▸ " } else { "  " };
            let shown = if value.is_empty() && !focused {
                Span::styled("—", Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(format!("{}{}", value, if focused { "_" } else { "" }), value_style)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(FOCUSED)),
                Span::styled(format!("{:<22}", field.label()), Style::default().fg(LABEL)),
                shown,
                Span::styled(format!(" {}", field.unit()), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let (min, max, step) = app.focused_field().hint_range();
    let hint = Line::from(Span::styled(
        format!(
            "range {}..{} step {} (advisory only)",
            min, max, step
        ),
        Style::default().fg(Color::DarkGray),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER))
        .title(" Input Parameters ");

    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(1)])
        .split(inner);
    f.render_widget(List::new(items), parts[0]);
    f.render_widget(Paragraph::new(hint), parts[1]);
}

fn draw_results(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER))
        .title(" Prediction Results ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.controller.state() {
        RequestState::Submitting => {
            let msg = Paragraph::new("Analyzing motor parameters...")
                .style(Style::default().fg(FOCUSED))
                .alignment(Alignment::Center);
            f.render_widget(msg, centered_line(inner));
            return;
        }
        RequestState::Failed(reason) => {
            let msg = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Prediction failed",
                    Style::default()
                        .fg(RISK_CRITICAL)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(reason.as_str(), Style::default().fg(Color::White))),
            ])
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true });
            f.render_widget(msg, inner);
            return;
        }
        _ => {}
    }

    let Some(result) = app.controller.last_result() else {
        let msg = Paragraph::new(vec![
            Line::from(Span::styled(
                "No predictions yet",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Enter motor parameters and press Enter to predict",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(msg, inner);
        return;
    };

    let style = classify(result.risk_tier);
    let enc = encode(result.prediction, result.risk_tier);
    let rec = recommend(result.risk_tier);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // gauge
            Constraint::Length(2), // badge
            Constraint::Length(rec.actions.len() as u16 + 2),
            Constraint::Min(4), // audit details
        ])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(enc.color))
        .ratio(enc.percent / 100.0)
        .label(Span::styled(
            format!("{} °C", enc.display_value),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(BORDER)));
    f.render_widget(gauge, rows[0]);

    let badge = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} {} ", style.icon, style.headline),
            Style::default()
                .fg(Color::Black)
                .bg(style.color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(style.advisory, Style::default().fg(style.color)),
    ]));
    f.render_widget(badge, rows[1]);

    let actions: Vec<ListItem> = rec
        .actions
        .iter()
        .map(|a| {
            ListItem::new(Line::from(vec![
                Span::styled("• ", Style::default().fg(style.color)),
                Span::raw(*a),
            ]))
        })
        .collect();
    let rec_list = List::new(actions).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(BORDER))
            .title(format!(" {} ", rec.title)),
    );
    f.render_widget(rec_list, rows[2]);

    let features = Field::ALL
        .iter()
        .map(|field| format!("{}={:.2}", field.key(), result.input_features.get(*field)))
        .collect::<Vec<_>>()
        .join("  ");
    let details = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("raw prediction ", Style::default().fg(LABEL)),
            Span::raw(format!("{:.4}", result.prediction)),
            Span::styled("   at ", Style::default().fg(LABEL)),
            Span::raw(result.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ]),
        Line::from(Span::styled(features, Style::default().fg(Color::DarkGray))),
    ])
    .wrap(ratatui::widgets::Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(BORDER))
            .title(" Input audit "),
    );
    f.render_widget(details, rows[3]);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(err) = app.controller.validation_error() {
        Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(RISK_WARNING),
        ))
    } else if app.controller.is_busy() {
        Line::from(Span::styled(
            "Analyzing... submission locked",
            Style::default().fg(FOCUSED),
        ))
    } else {
        Line::from(vec![
            key_hint("Enter", "predict"),
            key_hint("Tab/↑↓", "field"),
            key_hint("l", "load sample"),
            key_hint("r", "reset"),
            key_hint("q", "quit"),
        ])
    };
    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER)),
    );
    f.render_widget(footer, area);
}

fn key_hint(key: &'static str, action: &'static str) -> Span<'static> {
    Span::styled(
        format!(" {} {}  ", key, action),
        Style::default().fg(LABEL),
    )
}

/// Middle line of a rect, for short centered messages.
fn centered_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y.min(area.y + area.height.saturating_sub(1)), area.width, 1)
}
