// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::EnvFilter;

mod app;
mod auth;
mod data;
mod events;
mod feed;
mod ui;

use app::{App, Route};
use auth::ConfigAuth;
use data::FileStore;
use feed::{FeedSource, FileSource, StreamSource};

#[derive(Parser, Debug)]
#[command(name = "hearthwatch")]
#[command(about = "Terminal dashboard for smart-house sensor telemetry")]
struct Args {
    /// Path to a JSON file of current sensor values
    #[arg(short, long, default_value = "sensors.json", conflicts_with = "connect")]
    file: PathBuf,

    /// Connect to a TCP endpoint for live feed events (host:port)
    #[arg(short, long, conflicts_with = "file")]
    connect: Option<String>,

    /// Path to the auth config file (accounts)
    #[arg(short, long, default_value = "hearthwatch.toml")]
    auth_config: PathBuf,

    /// Directory for persisted state (metric histories, session)
    #[arg(short, long, default_value = ".hearthwatch")]
    state_dir: PathBuf,

    /// Refresh interval in seconds (only used with --file)
    #[arg(short, long, default_value = "1")]
    refresh: u64,

    /// Write tracing output to this file (stdout would corrupt the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(file)
            .with_ansi(false)
            .init();
    }

    // Handle TCP connection mode
    if let Some(ref addr) = args.connect {
        return run_with_tcp(addr, &args);
    }

    // Default: file-based mode
    let source = Box::new(FileSource::new(&args.file));
    run_tui(source, &args, Duration::from_secs(args.refresh))
}

/// Run with a TCP stream feed source
fn run_with_tcp(addr: &str, args: &Args) -> Result<()> {
    // Build a tokio runtime for the TCP connection; the reader task keeps
    // running on it while the TUI drives the main thread.
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                println!("Connected!");
                Ok(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn FeedSource>)
            }
            Err(e) => Err(anyhow::anyhow!("Failed to connect to {}: {}", addr, e)),
        }
    })?;

    let _guard = rt.enter();
    run_tui(source, args, Duration::from_millis(100))
}

/// Run the TUI with the given feed source
fn run_tui(source: Box<dyn FeedSource>, args: &Args, refresh_interval: Duration) -> Result<()> {
    let store = Box::new(FileStore::new(&args.state_dir));
    let auth = match ConfigAuth::from_file(&args.auth_config) {
        Ok(auth) => Box::new(auth),
        // A missing config degrades to a login screen that reports the
        // service as unreachable instead of crashing.
        Err(e) => {
            eprintln!("Warning: {}", e);
            Box::new(ConfigAuth::with_accounts(Vec::<(String, String)>::new()))
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app; any persisted session resolves before the first frame
    let mut app = App::new(source, store, auth);

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
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
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5);
                frame.render_widget(paragraph, centered.intersection(area));
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(12),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header
            ui::common::render_header(frame, app, chunks[0]);

            // Render current screen
            match app.route {
                Route::Login => ui::login::render(frame, app, chunks[1]),
                Route::Dashboard => ui::dashboard::render(frame, app, chunks[1]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[2]);

            // Render logout confirmation if active
            if app.show_logout_confirm {
                ui::dashboard::render_logout_confirm(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Drain the feed periodically
        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.poll_feed();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
