//! Command-line argument parsing for the quill CLI.
//!
//! Arguments are parsed by hand: one optional subcommand with positional
//! arguments, plus the global `--api-url` option which may appear anywhere.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Print the post list
    Posts,
    /// Create an account; the password is prompted for
    Register { email: String, username: String },
    /// Log in and store the session; the password is prompted for
    Login { username: String },
    /// Remove the stored session
    Logout,
    /// Print API URL, backend health and session state
    Status,
    /// Run the TUI application (default)
    RunTui,
}

/// Everything taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: CliCommand,
    /// `--api-url <url>` override
    pub api_url: Option<String>,
}

pub const USAGE: &str = "\
Usage: quill [--api-url <url>] [command]

Commands:
  (none)                        Run the terminal UI
  posts                         Print all posts
  register <email> <username>   Create an account (prompts for a password)
  login <username>              Log in and save the session (prompts for a password)
  logout                        Remove the saved session
  status                        Show API URL, backend health and session state

Options:
  --api-url <url>   Backend base URL (overrides QUILL_API_URL)
  -V, --version     Print version
  -h, --help        Print this help";

/// Parse command-line arguments.
///
/// The first item is the program name and is skipped.
///
/// # Examples
///
/// ```
/// use quill::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["quill".to_string(), "login".to_string(), "alice".to_string()];
/// let parsed = parse_args(args.into_iter()).unwrap();
/// assert_eq!(parsed.command, CliCommand::Login { username: "alice".to_string() });
/// ```
pub fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: Iterator<Item = String>,
{
    let mut api_url = None;
    let mut words = Vec::new();

    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                return Ok(CliArgs {
                    command: CliCommand::Version,
                    api_url,
                })
            }
            "--help" | "-h" => {
                return Ok(CliArgs {
                    command: CliCommand::Help,
                    api_url,
                })
            }
            "--api-url" => match args.next() {
                Some(url) => api_url = Some(url),
                None => return Err("--api-url requires a value".to_string()),
            },
            other => {
                if let Some(url) = other.strip_prefix("--api-url=") {
                    api_url = Some(url.to_string());
                } else if other.starts_with('-') {
                    return Err(format!("Unknown option '{}'", other));
                } else {
                    words.push(arg);
                }
            }
        }
    }

    let command = parse_command(&words)?;
    Ok(CliArgs { command, api_url })
}

fn parse_command(words: &[String]) -> Result<CliCommand, String> {
    let Some((name, rest)) = words.split_first() else {
        return Ok(CliCommand::RunTui);
    };

    let command = match (name.as_str(), rest) {
        ("posts", []) => CliCommand::Posts,
        ("register", [email, username]) => CliCommand::Register {
            email: email.clone(),
            username: username.clone(),
        },
        ("register", _) => return Err("Usage: quill register <email> <username>".to_string()),
        ("login", [username]) => CliCommand::Login {
            username: username.clone(),
        },
        ("login", _) => return Err("Usage: quill login <username>".to_string()),
        ("logout", []) => CliCommand::Logout,
        ("status", []) => CliCommand::Status,
        ("posts" | "logout" | "status", _) => {
            return Err(format!("'{}' takes no arguments", name));
        }
        _ => return Err(format!("Unknown command '{}'", name)),
    };
    Ok(command)
}
