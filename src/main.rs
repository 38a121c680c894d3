//! lotpick - terminal unit picker
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering, acts as the host
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async catalog loads and submissions

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use lotpick::constants::APP_NAME;
use lotpick::host::HostHandle;
use lotpick::messages::render::{FloorRow, ViewPhase};
use lotpick::messages::ui_events::key_to_ui_event;
use lotpick::navigation::StatusFilter;
use lotpick::network::NetworkActor;
use lotpick::tui::{MainButtonView, TuiHost};
use lotpick::ui::{chip, format_price, short_price, status_color, status_glyph};
use lotpick::{AppActor, Building, Config, NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// Pick a unit from the catalog and hand it off to the bot
#[derive(Parser, Debug)]
#[command(name = "lotpick", version, about)]
struct Cli {
    /// Config file (defaults to <config dir>/lotpick/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long)]
    base_url: Option<String>,

    /// User identifier sent along with the request
    #[arg(long)]
    user_id: Option<i64>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load_from(&path)?,
        None => Config::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if cli.user_id.is_some() {
        config.user_id = cli.user_id;
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = log_file.clone();
    }
    Ok(config)
}

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_name = config
        .log_file
        .file_name()
        .context("log file path has no file name")?;
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let endpoints = config.endpoints();
    tracing::info!(lots = %endpoints.lots_url, action = %endpoints.action_url, "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    let host = Arc::new(TuiHost::new(config.user_id));

    // Spawn network actor
    let network_actor = NetworkActor::new(endpoints, net_resp_tx);
    let network_task = tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(HostHandle::new(host.clone()), net_cmd_tx, render_tx, ui_tx.clone());
    let app_task = tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, &host, ui_tx, &mut render_rx).await?;

    // let the app actor detach from the host and stop the network layer
    let _ = app_task.await;
    drop(terminal_guard);
    // a submission still in flight must not die with the runtime
    let _ = network_task.await;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    host: &TuiHost,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        let button = host.button_view();
        terminal.draw(|f| draw_ui(f, &current_state, &button))?;

        if host.is_closed() {
            let _ = ui_tx.send(UiEvent::Quit);
            break;
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('m') {
                    host.press();
                } else if let Some(event) = key_to_ui_event(key, current_state.phase) {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, button: &MainButtonView) {
    let area = f.area();

    match state.phase {
        ViewPhase::Loading => draw_centered(f, area, vec![Line::from("Загрузка лотов...").yellow()]),
        ViewPhase::Failed => draw_centered(
            f,
            area,
            vec![
                Line::from("❌ Ошибка загрузки").red(),
                Line::from(state.error.clone().unwrap_or_default()).gray(),
                Line::from(""),
                Line::from("r  Повторить    q  Выход").yellow(),
            ],
        ),
        ViewPhase::Ready => draw_catalog(f, state, button, area),
    }
}

fn draw_centered(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);
}

fn draw_catalog(f: &mut Frame, state: &RenderState, button: &MainButtonView, area: Rect) {
    let card_height = if state.selected.is_some() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Header
            Constraint::Length(1),           // Buildings
            Constraint::Length(1),           // Filters
            Constraint::Length(card_height), // Selection card
            Constraint::Min(0),              // Floors
            Constraint::Length(1),           // Main button / hints
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Yellow).bold()),
        Span::raw("  Выбор лота"),
        Span::styled(format!("   {} свободно", state.stats.available), Style::default().fg(Color::Green).bold()),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let buildings: Vec<Span> = Building::ALL
        .iter()
        .map(|b| chip(format!("{}: Корпус {} {}", b.number(), b.number(), b.label()), *b == state.building))
        .collect();
    f.render_widget(Paragraph::new(Line::from(buildings)), chunks[1]);

    let filters: Vec<Span> = StatusFilter::ALL
        .iter()
        .map(|k| {
            chip(
                format!("{} ({})", k.label(), state.building_counts.count_for(*k)),
                *k == state.filter,
            )
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(filters)), chunks[2]);

    if let Some(unit) = &state.selected {
        let card = vec![
            Line::from(vec![
                Span::styled(unit.code.clone(), Style::default().fg(Color::Yellow).bold()),
                Span::raw(" "),
                Span::styled(status_glyph(unit.status), Style::default().fg(status_color(unit.status))),
            ]),
            Line::from(format!(
                "Корпус {} ({}) • {} этаж",
                unit.building.number(),
                unit.building.label(),
                unit.floor
            ))
            .gray(),
            Line::from(format!("{} м²   {} ₽", unit.area, format_price(unit.price))),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(if unit.layout_url.is_some() { " План есть " } else { " Нет плана " });
        f.render_widget(Paragraph::new(card).block(block), chunks[3]);
    }

    draw_floors(f, &state.floors, chunks[4]);
    draw_status_bar(f, button, chunks[5]);
}

fn draw_floors(f: &mut Frame, floors: &[FloorRow], area: Rect) {
    let mut lines = Vec::new();
    let mut focused_line = 0usize;

    for row in floors {
        if row.focused {
            focused_line = lines.len();
        }
        let marker = if row.focused { "▸" } else { " " };
        let arrow = if row.expanded { "▲" } else { "▼" };
        let from = row
            .summary
            .min_price
            .map(|p| format!("от {}", format_price(p)))
            .unwrap_or_default();
        let style = if row.focused { Style::default().bold() } else { Style::default() };
        lines.push(Line::from(vec![
            Span::styled(format!("{} {:>3} этаж  ", marker, row.summary.floor), style),
            Span::styled(row.summary.available.to_string(), Style::default().fg(Color::Green)),
            Span::raw(format!(" / {}   ", row.summary.total)),
            Span::styled(from, Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}", arrow)),
        ]));

        for tiles in row.tiles.chunks(4) {
            let mut spans = vec![Span::raw("      ")];
            for tile in tiles {
                let mut style = Style::default().fg(Color::Black).bg(status_color(tile.status));
                if tile.selected {
                    style = style.bold().underlined();
                }
                if tile.focused {
                    style = style.reversed();
                }
                spans.push(Span::styled(
                    format!(" {} м² {} млн ", tile.area, short_price(tile.price)),
                    style,
                ));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
    }

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = focused_line.saturating_sub(visible / 2) as u16;
    let block = Block::default().borders(Borders::ALL).title(" Этажи ");
    f.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

fn draw_status_bar(f: &mut Frame, button: &MainButtonView, area: Rect) {
    let mut spans = Vec::new();
    if button.visible {
        let style = if button.enabled {
            Style::default().fg(Color::Black).bg(Color::Green).bold()
        } else {
            Style::default().fg(Color::Gray).bg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" m: {} ", button.text), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        "1/2 корпус  f фильтр  ↑↓ этаж  Enter открыть  ←→ лот  Space выбрать  x сброс  q выход",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
