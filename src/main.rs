use quill::adapters::FileSessionStore;
use quill::api::BlogApiClient;
use quill::app::{App, AppMessage};
use quill::cli::{parse_args, report, run_cli_command, CliCommand, USAGE};
use quill::config::ClientConfig;
use quill::error::QuillError;
use quill::logging::{init_cli_logging, init_file_logging};
use quill::terminal::{setup_panic_hook, TerminalManager};
use quill::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use tokio::sync::mpsc;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    let config = ClientConfig::from_env().with_api_url_override(args.api_url.as_deref());
    config
        .validate()
        .map_err(|message| report(QuillError::configuration(message)))?;

    let runtime = tokio::runtime::Runtime::new()?;

    if args.command != CliCommand::RunTui {
        init_cli_logging(&config);
        return runtime
            .block_on(run_cli_command(&args.command, &config))
            .unwrap_or(Ok(()));
    }

    match init_file_logging(&config) {
        Ok(Some(path)) => tracing::info!("quill {} logging to {}", quill::cli::VERSION, path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: could not open log file: {}", e),
    }

    runtime.block_on(run_tui(config))
}

async fn run_tui(config: ClientConfig) -> Result<()> {
    let store = FileSessionStore::at(config.session_path.as_deref())
        .map_err(|e| report(e.into()))?;
    tracing::debug!("Session file: {}", store.path().display());

    let client = BlogApiClient::with_base_url(&config.api_url);
    let mut app = App::new(client, Arc::new(store));
    app.start(chrono::Utc::now().timestamp()).await;

    setup_panic_hook();
    let mut manager = TerminalManager::new()?;
    let result = run_app(manager.terminal(), &mut app).await;
    manager.restore()?;

    if let Err(e) = &result {
        tracing::error!("TUI exited with error: {}", e);
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(std::time::Duration::from_millis(50));

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("Terminal event error: {}", e);
                        return Err(e.into());
                    }
                    None => return Ok(()),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
