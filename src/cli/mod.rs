//! CLI module for quill.
//!
//! Parses the command line and runs the non-interactive subcommands. The
//! dispatcher is called early in `main()`; `None` means "run the TUI".
//!
//! ```ignore
//! use quill::cli::{parse_args, run_cli_command};
//!
//! let args = parse_args(std::env::args())?;
//! if let Some(result) = run_cli_command(&args.command, &config).await {
//!     return result;
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliArgs, CliCommand, USAGE};
pub use version::{version_line, VERSION};

use std::io;

use color_eyre::eyre::eyre;
use color_eyre::{Report, Result, Section};

use crate::adapters::FileSessionStore;
use crate::api::{BlogApiClient, LoginRequest, Registration};
use crate::config::ClientConfig;
use crate::error::{classify_io_error, QuillError, QuillResult};

/// Run a CLI command if applicable.
///
/// * `None` - the command is `RunTui`
/// * `Some(Ok(()))` - a CLI command ran successfully
/// * `Some(Err(e))` - a CLI command failed
pub async fn run_cli_command(command: &CliCommand, config: &ClientConfig) -> Option<Result<()>> {
    let result = match command {
        CliCommand::RunTui => return None,
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        other => run_backend_command(other, config).await.map_err(report),
    };
    Some(result)
}

/// Turn a [`QuillError`] into a report that carries its recovery hint.
pub fn report(err: QuillError) -> Report {
    tracing::error!("{} [{}]", err, err.error_code());
    eyre!(err.user_message()).suggestion(err.recovery_hint())
}

async fn run_backend_command(command: &CliCommand, config: &ClientConfig) -> QuillResult<()> {
    let client = BlogApiClient::with_base_url(&config.api_url);
    let store = FileSessionStore::at(config.session_path.as_deref())?;
    let mut out = io::stdout();

    match command {
        CliCommand::Posts => commands::posts_command(&client, &mut out).await,
        CliCommand::Register { email, username } => {
            let password = rpassword::prompt_password("Password: ")
                .map_err(|e| classify_io_error(e, None, "read the password"))?;
            let registration = Registration::new(email, username, password);
            commands::register_command(&client, &registration, &mut out).await
        }
        CliCommand::Login { username } => {
            let password = rpassword::prompt_password("Password: ")
                .map_err(|e| classify_io_error(e, None, "read the password"))?;
            let request = LoginRequest::new(username, password);
            commands::login_command(&client, &store, &request, &mut out).await
        }
        CliCommand::Logout => commands::logout_command(&store, &mut out).await,
        CliCommand::Status => {
            let now = chrono::Utc::now().timestamp();
            commands::status_command(&client, &store, now, &mut out).await
        }
        CliCommand::RunTui | CliCommand::Version | CliCommand::Help => Ok(()),
    }
}
