use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use world_news::api::TimeWindow;
use world_news::app::{App, InputMode};
use world_news::config::Config;
use world_news::{logging, ui};

#[derive(Parser)]
#[command(name = "world-news")]
#[command(about = "Terminal UI for browsing world news by time window", long_about = None)]
struct Cli {
    /// Time window to open with (today, week, month, year)
    #[arg(short, long)]
    window: Option<TimeWindow>,

    /// API key for the content search endpoint
    #[arg(long)]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(window) = cli.window {
        config.session.selected_window = window;
    }
    if let Some(key) = cli.api_key {
        config.query.api_key = key;
    }
    let level = cli.log_level.unwrap_or_else(|| config.log_level.clone());
    logging::init(&Config::log_path()?, &level)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config)?;
    app.start();

    let result = run_app(&mut terminal, &mut app);

    app.shutdown();
    if let Err(e) = app.config.save() {
        tracing::warn!(error = %e, "could not save session state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "terminal loop failed");
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.tick();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Short poll keeps finished fetches flowing into the view
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('?') => app.show_help(),
                KeyCode::Char('/') => app.start_search(),
                KeyCode::Char('r') => app.refresh(),
                KeyCode::Char('s') => app.cycle_sort_column(),
                KeyCode::Char('S') => app.toggle_sort_direction(),
                KeyCode::Char('1') | KeyCode::Char('t') => app.select_window(TimeWindow::Today),
                KeyCode::Char('2') | KeyCode::Char('w') => app.select_window(TimeWindow::Week),
                KeyCode::Char('3') | KeyCode::Char('m') => app.select_window(TimeWindow::Month),
                KeyCode::Char('4') | KeyCode::Char('y') => app.select_window(TimeWindow::Year),
                KeyCode::Left | KeyCode::Char('h') => app.prev_window(),
                KeyCode::Right | KeyCode::Char('l') => app.next_window(),
                KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                KeyCode::Enter | KeyCode::Char('o') => app.open_selected(),
                KeyCode::Esc => app.clear_filter(),
                _ => {}
            },
            InputMode::Help => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => app.close_help(),
                _ => {}
            },
            InputMode::Search => match key.code {
                KeyCode::Enter => app.confirm_search(),
                KeyCode::Esc => app.cancel_search(),
                KeyCode::Backspace => {
                    app.input_buffer.pop();
                }
                KeyCode::Char(c) => {
                    app.input_buffer.push(c);
                }
                _ => {}
            },
        }
    }
}
