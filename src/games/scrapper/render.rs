//! Cosmic Scrapper rendering: ship, station gauge, shop, tasks, controls, log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::{
    task_key, upgrade_key, BUY_UPGRADE_BASE, CANCEL_RESET, CHECK_TASK_BASE, CLICK_SHIP,
    CONFIRM_RESET, LOAD_GAME, RESET_GAME, SAVE_GAME,
};
use super::catalog::{EffectKind, TaskGoal, TASKS, UPGRADES};
use super::logic::{claimable_tasks, format_scrap, STATION_MAX};
use super::pricing;
use super::state::Session;
use super::UiState;

const SHIP_ART: &[&str] = &[
    r"   __/‾‾‾‾\__   ",
    r"  <=[ o  o ]=>  ",
    r"    ‾‾\__/‾‾    ",
];

/// "Pressed" ship, shown for a few frames after a click.
const SHIP_FLASH_ART: &[&str] = &[
    r" * __/‾‾‾‾\__ * ",
    r" *<=[ x  x ]=>* ",
    r"  * ‾‾\__/‾‾ *  ",
];

const SHIP_PANEL_HEIGHT: u16 = 9;
const STATION_HEIGHT: u16 = 3;
const CONTROLS_HEIGHT: u16 = 5;

pub fn render(
    session: &Session,
    ui: &UiState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_title(session, f, chunks[0]);

    if is_narrow_layout(area.width) {
        render_narrow(session, ui, f, chunks[1], click_state);
    } else {
        render_wide(session, ui, f, chunks[1], click_state);
    }
}

/// Left: ship, station, tasks, controls. Right: shop above the log.
fn render_wide(
    session: &Session,
    ui: &UiState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SHIP_PANEL_HEIGHT),
            Constraint::Length(STATION_HEIGHT),
            Constraint::Length(tasks_height()),
            Constraint::Length(CONTROLS_HEIGHT),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    let shop = shop_list(session);
    let shop_rows = shop.height(columns[1].width.saturating_sub(2)) + 2;
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(shop_rows), Constraint::Min(3)])
        .split(columns[1]);

    render_ship(session, ui, f, left[0], click_state);
    render_station(session, f, left[1]);
    render_tasks(session, f, left[2], click_state);
    render_controls(ui, f, left[3], click_state);
    render_shop(shop, f, right[0], click_state);
    render_log(ui, f, right[1]);
}

/// Everything stacked; the log takes what is left.
fn render_narrow(
    session: &Session,
    ui: &UiState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let shop = shop_list(session);
    let shop_rows = shop.height(area.width.saturating_sub(2)) + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SHIP_PANEL_HEIGHT),
            Constraint::Length(STATION_HEIGHT),
            Constraint::Min(shop_rows),
            Constraint::Length(tasks_height()),
            Constraint::Length(CONTROLS_HEIGHT),
            Constraint::Min(3),
        ])
        .split(area);

    render_ship(session, ui, f, chunks[0], click_state);
    render_station(session, f, chunks[1]);
    render_shop(shop, f, chunks[2], click_state);
    render_tasks(session, f, chunks[3], click_state);
    render_controls(ui, f, chunks[4], click_state);
    render_log(ui, f, chunks[5]);
}

fn tasks_height() -> u16 {
    TASKS.len() as u16 + 2
}

fn key_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_title(session: &Session, f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            "✦ Cosmic Scrapper ✦",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   clicks {}", session.counters.total_clicks),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let widget = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// The whole ship panel is one big click target.
fn render_ship(
    session: &Session,
    ui: &UiState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = &session.state;
    let flashing = ui.click_flash > 0;
    let (art, art_style) = if flashing {
        (
            SHIP_FLASH_ART,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (SHIP_ART, Style::default().fg(Color::Gray))
    };

    let mut cl = ClickableList::new();
    for row in art {
        cl.push_clickable(Line::from(Span::styled(*row, art_style)), CLICK_SHIP);
    }
    cl.push_clickable(
        Line::from(Span::styled(
            format!("Scrap: {}", format_scrap(state.scrap)),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        CLICK_SHIP,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            format!(
                "+{} per click   +{:.1}/s",
                format_scrap(state.scrap_per_click),
                state.scrap_per_second
            ),
            Style::default().fg(Color::Green),
        )),
        CLICK_SHIP,
    );
    cl.push_clickable(Line::from(" [C] Scrap the wreck "), CLICK_SHIP);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if flashing { Color::Yellow } else { Color::Cyan }))
        .title(" Salvage ");

    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1, 0);
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn render_station(session: &Session, f: &mut Frame, area: Rect) {
    let progress = session.state.station_progress;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(" Station "),
        )
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio((progress / STATION_MAX).clamp(0.0, 1.0))
        .label(format!("{progress:.1}%"));
    f.render_widget(gauge, area);
}

/// Shop lines are built before layout so the panel can be sized from their
/// wrapped height.
fn shop_list(session: &Session) -> ClickableList<'static> {
    let state = &session.state;
    let mut cl = ClickableList::new();

    for (i, def) in UPGRADES.iter().enumerate() {
        let owned = state.owned(def.id);
        let cost = pricing::cost(def, owned);
        let affordable = state.scrap >= cost;
        let action = BUY_UPGRADE_BASE + i as u16;

        let text_style = if affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let effect = match def.effect {
            EffectKind::Click => format!("+{} per click", def.effect_value),
            EffectKind::Aps => format!("+{}/s", def.effect_value),
            EffectKind::Progress => format!("+{}% station", def.effect_value),
        };

        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", upgrade_key(i)), key_style(affordable)),
                Span::styled(format!("{} x{}", def.name, owned), text_style),
                Span::styled(
                    format!("  {} Scrap", format_scrap(cost)),
                    Style::default().fg(if affordable { Color::Green } else { Color::Red }),
                ),
            ]),
            action,
        );
        cl.push_clickable(
            Line::from(Span::styled(
                format!("     {effect}. {}", def.description),
                Style::default().fg(Color::DarkGray),
            )),
            action,
        );
    }
    cl
}

fn render_shop(
    cl: ClickableList,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Upgrades ");
    let inner_width = block.inner(area).width;

    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1, inner_width);
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

/// How far along a task is, for display.
fn task_progress(session: &Session, goal: &TaskGoal) -> String {
    match *goal {
        TaskGoal::ScrapTotal(t) => {
            let best = session
                .counters
                .total_scrap_earned
                .max(session.state.scrap)
                .min(t);
            format!("{}/{}", format_scrap(best), format_scrap(t))
        }
        TaskGoal::Clicks(n) => format!("{}/{}", session.counters.total_clicks.min(n), n),
        TaskGoal::StationProgress(t) => {
            format!("{:.0}/{:.0}%", session.state.station_progress.min(t), t)
        }
    }
}

fn render_tasks(
    session: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let claimable = claimable_tasks(session);
    let mut cl = ClickableList::new();

    for (i, task) in TASKS.iter().enumerate() {
        if session.state.is_task_done(task.id) {
            cl.push(Line::from(Span::styled(
                format!("  ✔ {}", task.description),
                Style::default().fg(Color::Green),
            )));
            continue;
        }

        let ready = claimable.iter().any(|t| t.id == task.id);
        let status = if ready {
            Span::styled(
                "  Ready!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("  {}", task_progress(session, &task.goal)),
                Style::default().fg(Color::DarkGray),
            )
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", task_key(i).to_ascii_uppercase()),
                    key_style(ready),
                ),
                Span::styled(task.description, Style::default().fg(Color::White)),
                Span::styled(
                    format!(" +{}", format_scrap(task.reward)),
                    Style::default().fg(Color::Yellow),
                ),
                status,
            ]),
            CHECK_TASK_BASE + i as u16,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Tasks ");

    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_controls(
    ui: &UiState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    let (title, border) = if ui.confirming_reset {
        cl.push(Line::from(Span::styled(
            " Erase all progress and the save?",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        cl.push_clickable(Line::from(" [Y] Yes, start over"), CONFIRM_RESET);
        cl.push_clickable(Line::from(" [N] Cancel"), CANCEL_RESET);
        (" Reset? ", Color::Red)
    } else {
        cl.push_clickable(Line::from(" [S] Save"), SAVE_GAME);
        cl.push_clickable(Line::from(" [L] Load"), LOAD_GAME);
        cl.push_clickable(Line::from(" [R] Reset"), RESET_GAME);
        (" Game ", Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);

    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

/// Newest first; the latest few entries are bold.
fn render_log(ui: &UiState, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = ui
        .log
        .iter()
        .rev()
        .take(visible)
        .enumerate()
        .map(|(i, entry)| {
            let recent = i < 3;
            let style = match (entry.is_important, recent) {
                (true, true) => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Yellow),
                (false, true) => Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
