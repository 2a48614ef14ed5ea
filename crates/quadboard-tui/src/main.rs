use std::fs::OpenOptions;
use std::io;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quadboard_service::HttpService;
use quadboard_tui::app::App;
use quadboard_tui::config::ClientConfig;
use quadboard_tui::persist::Persister;
use ratatui::prelude::*;
use tokio::runtime::Runtime;
use tracing::info;

fn main() -> Result<()> {
    let config = ClientConfig::parse();
    init_logging(&config)?;

    let rt = Runtime::new().context("failed to start async runtime")?;
    let server_url = config.server_url();

    let mut child = if config.spawns_server() {
        Some(spawn_server(config.port)?)
    } else {
        None
    };

    let service = HttpService::new(&server_url);
    let result = wait_for_server(&rt, &service).and_then(|()| {
        info!("connected to {server_url}");
        let persister = Persister::new(Arc::new(service), rt.handle().clone());
        run_tui(persister)
    });

    // Cleanup: kill server if we spawned it
    if let Some(ref mut child) = child {
        let _ = child.kill();
        let _ = child.wait();
    }

    result
}

/// The terminal is taken over by the board, so logs go to a file.
fn init_logging(config: &ClientConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn spawn_server(port: u16) -> Result<Child> {
    // Look for quadboard-server next to our own binary first,
    // then fall back to PATH
    let self_exe = std::env::current_exe().unwrap_or_default();
    let server_bin = self_exe
        .parent()
        .map(|d| d.join("quadboard-server"))
        .filter(|p| p.exists())
        .unwrap_or_else(|| "quadboard-server".into());

    let child = Command::new(&server_bin)
        .env("QUADBOARD_BIND", "127.0.0.1")
        .env("QUADBOARD_PORT", port.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to start {}", server_bin.display()))?;

    info!("started {} (pid {})", server_bin.display(), child.id());
    Ok(child)
}

fn wait_for_server(rt: &Runtime, service: &HttpService) -> Result<()> {
    let start = Instant::now();
    let timeout = Duration::from_secs(10);

    loop {
        if rt.block_on(service.health_check()).is_ok() {
            return Ok(());
        }
        if start.elapsed() > timeout {
            bail!(
                "server at {} did not become ready within {}s",
                service.base_url(),
                timeout.as_secs()
            );
        }
        thread::sleep(Duration::from_millis(50));
    }
}

fn run_tui(persister: Persister) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, persister);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    persister: Persister,
) -> Result<()> {
    let mut app = App::new(persister);

    loop {
        let size = terminal.size()?;
        app.resize(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|frame| app.render(frame))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Ctrl+C always quits
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                // q quits unless a note is being edited
                if key.code == KeyCode::Char('q') && !app.is_input_mode() {
                    break;
                }
                app.handle_key(key);
            }
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }

    Ok(())
}
