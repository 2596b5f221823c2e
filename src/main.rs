use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use motor_temp_dashboard::client::{ClientError, PredictionClient, PredictionResult};
use motor_temp_dashboard::config::ClientConfig;
use motor_temp_dashboard::ui::{self, App};

/// Restores the terminal even if the draw loop panics.
struct TerminalCleanup;

impl Drop for TerminalCleanup {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; the TUI owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let client = PredictionClient::new(&config)?;
    let mut app = App::new(config.base_url.clone());

    // Startup probes: non-fatal, shown in the header.
    let (health, info) = tokio::join!(client.health(), client.model_info());
    match health {
        Ok(h) => {
            tracing::info!(status = %h.status, model_loaded = h.model_loaded, "backend health");
            app.backend = Some(h);
        }
        Err(e) => tracing::warn!(%e, "health probe failed"),
    }
    app.model_info = info.ok();

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let _cleanup = TerminalCleanup;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &client).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    std::mem::forget(_cleanup);

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &PredictionClient,
) -> Result<()> {
    // The one outstanding request reports back over this channel; the
    // controller's begin_submit guard keeps it at most one.
    let (tx, mut rx) = mpsc::unbounded_channel::<Result<PredictionResult, ClientError>>();

    while !app.should_quit {
        if let Ok(outcome) = rx.try_recv() {
            app.controller.finish_submit(outcome);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, client, &tx, key.code);
                }
            }
        }
    }
    Ok(())
}

fn handle_key(
    app: &mut App,
    client: &PredictionClient,
    tx: &mpsc::UnboundedSender<Result<PredictionResult, ClientError>>,
    key: KeyCode,
) {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('l') => app.controller.load_sample(),
        KeyCode::Char('r') => app.controller.reset(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => {
            // Validation failures stay on the controller for the footer;
            // an in-flight request simply ignores the keypress.
            if let Ok(sample) = app.controller.begin_submit() {
                let client = client.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(client.submit(&sample).await);
                });
            }
        }
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}
