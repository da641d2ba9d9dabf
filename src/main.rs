// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod app;
mod config;
mod data;
mod events;
mod source;
mod ui;

use app::App;
use config::Settings;
use source::{DataSource, FileSource};
use ui::Theme;

#[derive(Parser, Debug)]
#[command(name = "uptime-bar")]
#[command(about = "Terminal status dashboard with 24-hour uptime bars")]
struct Args {
    /// Config file (TOML, YAML or JSON). Missing file means defaults.
    #[arg(short, long, default_value = "uptime-bar.toml")]
    config: PathBuf,

    /// Incident state JSON written by the poller (overrides config)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// How often to check the state file, e.g. "5s" (overrides config)
    #[arg(short, long)]
    refresh: Option<String>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export the computed hourly buckets to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let mut settings = Settings::load(&args.config)?;
    if let Some(state) = args.state {
        settings.state_path = state;
    }
    if let Some(refresh) = args.refresh {
        settings.refresh = refresh;
    }
    let refresh = settings.refresh_interval()?;

    info!(
        state = %settings.state_path.display(),
        monitors = settings.monitors.len(),
        ?refresh,
        "starting"
    );

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&settings, &export_path);
    }

    let source = Box::new(FileSource::new(&settings.state_path));
    run_tui(source, settings, refresh)
}

/// Send tracing output to a file; the terminal belongs to the TUI.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, settings: Settings, refresh_interval: Duration) -> Result<()> {
    // Detect the theme before raw mode; the query needs a normal terminal
    let theme = Theme::auto_detect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Create app and load initial data
    let mut app = App::new(source, settings.monitors)
        .with_title(settings.title)
        .with_theme(theme);
    let _ = app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);
    if let Err(ref e) = result {
        error!(error = %e, "dashboard stopped");
    }

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

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 30;
    const MIN_HEIGHT: u16 = 8;

    while app.running {
        // The clock moves even when the state doesn't
        app.refresh(Local::now().timestamp());

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                        .intersection(area);
                frame.render_widget(paragraph, centered);
                app.bar_layouts.clear();
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(4),    // Monitors
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::status::render(frame, app, chunks[1]);
            ui::common::render_status_bar(frame, app, chunks[2]);

            if app.modal.is_none() && !app.show_help {
                ui::tooltip::render(frame, app, area);
            }
            ui::detail::render_overlay(frame, app, area);
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Bars are re-measured on the next draw
                }
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Compute the buckets once and write them to a JSON file
fn export_to_file(settings: &Settings, export_path: &Path) -> Result<()> {
    let state = data::rows::load_state(&settings.state_path)?;
    let rows = data::build_rows(Local::now().timestamp(), &settings.monitors, &state, &Local);

    for row in rows.iter().filter(|r| r.missing) {
        tracing::warn!(monitor = %row.target.id, "no incident history for monitor");
    }

    app::write_export(&rows, export_path)?;

    info!(path = %export_path.display(), monitors = rows.len(), "exported buckets");
    println!("Exported {} monitors to: {}", rows.len(), export_path.display());
    Ok(())
}
