//! tvremote - remote-driven IPTV playlist player
//!
//! Log in with an M3U link or provider credentials, move through the
//! channel list with the arrow keys and play a channel.
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! tvremote
//!
//! # CLI mode (for automation)
//! tvremote channels --url http://host/list.m3u
//! tvremote play http://host/live/u/p/42.ts
//! ```

use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use tvremote::api::{PlaylistSource, RetrievalError, Retriever};
use tvremote::app::{App, Command as AppCommand};
use tvremote::cli::{Cli, Command, ExitCode, Output};
use tvremote::config::Config;
use tvremote::keymap::map_key_event;
use tvremote::models::Channel;
use tvremote::stream::{LocalPlayer, PlaybackHandle};
use tvremote::{commands, ui};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

type FetchResult = Result<Vec<Channel>, RetrievalError>;

const DEFAULT_LOG_FILTER: &str = "info,hyper_util=warn,reqwest=warn";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref());
    if let Some(backend) = cli.backend {
        config.backend = backend.into();
    }

    if cli.is_cli_mode() {
        init_stderr_logging();
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        let log_path = init_file_logging()?;
        tracing::info!(log = %log_path.display(), backend = %config.backend, "tvremote starting");
        run_tui(config).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Channels(cmd)) => commands::channels_cmd(cmd, config, &output).await,
        Some(Command::Parse(cmd)) => commands::parse_cmd(cmd, &output).await,
        Some(Command::Play(cmd)) => commands::play_cmd(cmd, config, &output).await,
        None => ExitCode::Success,
    }
}

// =============================================================================
// Logging
// =============================================================================

fn log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter().as_str())
        .init();
}

/// The TUI owns the terminal, so logs go to a file
fn init_file_logging() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tvremote");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let log_path = dir.join("tvremote.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_env_filter(log_filter().as_str())
        .with_ansi(false)
        .init();

    Ok(log_path)
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: Config) -> Result<()> {
    let mut terminal = init_terminal()?;

    let (results_tx, results_rx) = mpsc::unbounded_channel();
    let mut runner = Runner {
        retriever: Arc::new(Retriever::new(config.backend, &config.client_options())),
        player: LocalPlayer::new(config.player),
        playback: None,
        results: results_tx,
    };
    let mut app = App::new();

    let result = run_event_loop(&mut terminal, &mut app, &mut runner, results_rx).await;

    runner.stop_playback().await;
    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, runs commands, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    runner: &mut Runner,
    mut results: UnboundedReceiver<FetchResult>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = map_key_event(key, app.is_editing())
                        .and_then(|event| app.handle_event(event))
                    {
                        runner.run(app, command).await;
                    }
                }
            }
        }

        while let Ok(result) = results.try_recv() {
            app.complete_login(result);
        }

        runner.check_playback(app);
    }

    Ok(())
}

/// Carries out app commands
struct Runner {
    retriever: Arc<Retriever>,
    player: LocalPlayer,
    playback: Option<PlaybackHandle>,
    results: UnboundedSender<FetchResult>,
}

impl Runner {
    async fn run(&mut self, app: &mut App, command: AppCommand) {
        match command {
            AppCommand::Fetch(request) => {
                let retriever = Arc::clone(&self.retriever);
                let results = self.results.clone();
                tokio::spawn(async move {
                    let result = retriever.fetch(&request).await;
                    // Receiver only goes away when the app is quitting
                    let _ = results.send(result);
                });
            }
            AppCommand::Play(channel) => {
                self.stop_playback().await;
                match self.player.play(&channel.url) {
                    Ok(handle) => {
                        tracing::info!(
                            channel = %channel.name,
                            player = %self.player.player_type(),
                            strategy = ?handle.strategy,
                            "now playing"
                        );
                        self.playback = Some(handle);
                        app.playback_started(channel);
                    }
                    Err(e) => app.playback_failed(e),
                }
            }
            AppCommand::StopPlayback => self.stop_playback().await,
        }
    }

    async fn stop_playback(&mut self) {
        if let Some(handle) = self.playback.take() {
            handle.stop().await;
        }
    }

    /// Clear the now-playing line once the player window is closed
    fn check_playback(&mut self, app: &mut App) {
        if self.playback.as_mut().is_some_and(|h| h.has_exited()) {
            tracing::info!("player exited");
            self.playback = None;
            app.now_playing = None;
        }
    }
}
