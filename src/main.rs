use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::{Write, stdout};

mod app;
mod clipboard;
mod config;
mod error;
mod suggest;

use app::App;
use config::provider_types::ProviderKind;
use error::ParvisError;

/// Interactive place search for a parish directory
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Search municipalities, parishes and churches interactively"
)]
struct Args {
    /// Initial search query
    query: Option<String>,

    /// Override the configured suggestion provider
    #[arg(long, value_enum)]
    provider: Option<ProviderKind>,
}

fn main() -> Result<()> {
    // Writes to /tmp/parvis-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/parvis-debug.log")
            .expect("Failed to open /tmp/parvis-debug.log");

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .format(|buf, record| {
                use std::time::SystemTime;
                let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .init();

        log::debug!("=== PARVIS DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    // Load config early to avoid defaults during app initialization
    let mut config_result = config::load_config();

    let args = Args::parse();
    if let Some(provider) = args.provider {
        config_result.config.provider.kind = provider;
    }

    let terminal = init_terminal()?;

    let app = App::new(&config_result.config, args.query);
    let result = run(terminal, app, config_result);

    restore_terminal()?;
    let app = result?;

    // Output after terminal restore to prevent corruption
    handle_output(&app)?;

    #[cfg(debug_assertions)]
    log::debug!("=== PARVIS DEBUG SESSION ENDED ===");

    Ok(())
}

/// Initialize terminal with raw mode and alternate screen
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    match execute!(stdout(), EnterAlternateScreen) {
        Ok(_) => {}
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(
    mut terminal: DefaultTerminal,
    mut app: App,
    config_result: config::ConfigResult,
) -> Result<App> {
    if let Some(warning) = config_result.warning {
        app.set_status(warning);
    }

    setup_fetch_worker(&mut app, &config_result.config);

    loop {
        // Fire due debounces and drain worker responses before drawing
        app.tick();

        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_dirty();
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(app)
}

/// Set up the fetch worker thread and channels
fn setup_fetch_worker(app: &mut App, config: &config::Config) {
    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let (response_tx, response_rx) = std::sync::mpsc::channel();
    app.set_channels(request_tx, response_rx);

    suggest::worker::spawn_worker(
        &config.provider,
        config.suggest.max_results,
        request_rx,
        response_tx,
    );
}

/// Print the accepted place as JSON after the terminal is restored
fn handle_output(app: &App) -> Result<(), ParvisError> {
    if let Some(selection) = app.selection() {
        let json = serde_json::to_string_pretty(selection)?;
        writeln!(stdout(), "{json}")?;
    }
    Ok(())
}
