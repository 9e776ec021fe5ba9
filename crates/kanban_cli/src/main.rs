//! Kanban CLI
//!
//! Command-line client for the kanban board server.
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - Manage the session
//! - `register` / `activate` / `reset-*` - Account onboarding and recovery
//! - `account` - Update or delete the signed-in account
//! - `users` - Search users
//! - `boards` - Create, inspect and share boards
//! - `cards` - Create, move and delete cards
//! - `files` - Attach files to cards

mod commands;

use clap::{Parser, Subcommand};
use commands::{CliSession, CommandResult};
use kanban_client::{Category, ClientConfig, ReqwestClient, Session};
use kanban_storage::FileTokenStore;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Kanban board command-line client.
#[derive(Parser)]
#[command(name = "kanban")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server origin
    #[arg(global = true, long, default_value = "http://localhost:8080")]
    server: String,

    /// Path prefix the API is deployed under
    #[arg(global = true, long, default_value = kanban_client::DEFAULT_PATH_PREFIX)]
    prefix: String,

    /// File holding the session token (default: ~/.kanban/token)
    #[arg(global = true, long)]
    token_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(global = true, long, default_value = "30")]
    timeout_secs: u64,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        /// Username
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Forget the session token
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Ask the server instead of reading the token
        #[arg(long)]
        remote: bool,
    },

    /// Register a new account
    Register {
        /// Username
        username: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name (defaults to the username)
        #[arg(short, long)]
        displayname: Option<String>,
        /// Language code
        #[arg(short, long, default_value = "de")]
        language: String,
    },

    /// Activate a registered account
    Activate {
        /// Username
        username: String,
        /// Activation token from the registration mail
        token: String,
    },

    /// Request a password reset mail
    ResetRequest {
        /// Email address of the account
        email: String,
    },

    /// Check a password reset token
    ResetCheck {
        /// Username
        username: String,
        /// Reset token from the mail
        token: String,
    },

    /// Set a new password with a reset token
    Reset {
        /// Username
        username: String,
        /// Reset token from the mail
        token: String,
        /// New password
        #[arg(short, long)]
        password: String,
    },

    /// Manage the signed-in account
    #[command(subcommand)]
    Account(AccountCommand),

    /// Search users
    #[command(subcommand)]
    Users(UsersCommand),

    /// Manage boards
    #[command(subcommand)]
    Boards(BoardsCommand),

    /// Manage cards
    #[command(subcommand)]
    Cards(CardsCommand),

    /// Manage card attachments
    #[command(subcommand)]
    Files(FilesCommand),
}

#[derive(Subcommand)]
enum AccountCommand {
    /// Update display name, language or password
    Update {
        /// New display name
        #[arg(short, long)]
        displayname: String,
        /// New language code
        #[arg(short, long)]
        language: String,
        /// Current password
        #[arg(long)]
        old_password: String,
        /// New password (keeps the current one if omitted)
        #[arg(long, default_value = "")]
        new_password: String,
    },
    /// Delete the account
    Delete,
}

#[derive(Subcommand)]
enum UsersCommand {
    /// Find users by name or email
    Find {
        /// Search text
        query: String,
    },
}

#[derive(Subcommand)]
enum BoardsCommand {
    /// List your boards
    List,
    /// Show a board with its cards
    Show {
        /// Board id
        board: String,
    },
    /// Create a board
    Create {
        /// Board name
        name: String,
    },
    /// Rename a board
    Rename {
        /// Board id
        board: String,
        /// New name
        name: String,
    },
    /// Delete a board
    Delete {
        /// Board id
        board: String,
    },
    /// Add a member
    AddMember {
        /// Board id
        board: String,
        /// Username
        username: String,
    },
    /// Remove a member
    RemoveMember {
        /// Board id
        board: String,
        /// Username
        username: String,
    },
}

#[derive(Subcommand)]
enum CardsCommand {
    /// List your cards across boards
    Mine {
        /// Page number
        #[arg(short, long, default_value = "0")]
        page: u32,
        /// Search text
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// List the cards of a board
    List {
        /// Board id
        board: String,
    },
    /// Show a card
    Show {
        /// Board id
        board: String,
        /// Card id
        card: String,
    },
    /// Create a card
    Create {
        /// Board id
        board: String,
        /// Card title
        name: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Column (TODO, DOING, DONE)
        #[arg(short, long, default_value = "TODO")]
        state: Category,
    },
    /// Move a card to another column
    Move {
        /// Board id
        board: String,
        /// Card id
        card: String,
        /// Column (TODO, DOING, DONE)
        state: Category,
    },
    /// Delete a card
    Delete {
        /// Board id
        board: String,
        /// Card id
        card: String,
    },
}

#[derive(Subcommand)]
enum FilesCommand {
    /// List the files of a card
    List {
        /// Board id
        board: String,
        /// Card id
        card: String,
    },
    /// Upload a file
    Upload {
        /// Board id
        board: String,
        /// Card id
        card: String,
        /// File to upload
        path: PathBuf,
    },
    /// Download a file
    Download {
        /// Board id
        board: String,
        /// Card id
        card: String,
        /// File id
        file: String,
        /// Destination path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Delete a file
    Delete {
        /// Board id
        board: String,
        /// Card id
        card: String,
        /// File id
        file: String,
    },
}

fn default_token_file() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".kanban")
        .join("token")
}

fn open_session(cli: &Cli) -> Result<CliSession, Box<dyn std::error::Error>> {
    let config = ClientConfig::new(cli.server.clone())
        .with_path_prefix(cli.prefix.clone())
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let token_file = cli.token_file.clone().unwrap_or_else(default_token_file);
    tracing::debug!(
        server = %cli.server,
        api = %config.api_root(),
        token_file = %token_file.display(),
        "opening session"
    );
    let store = FileTokenStore::open_named(&token_file, config.token_entry.clone())?;
    let client = ReqwestClient::new(&config)?;
    Ok(Session::new(config, client, store))
}

async fn dispatch(session: &CliSession, command: Commands) -> CommandResult {
    match command {
        Commands::Login { username, password } => {
            commands::auth::login(session, &username, &password).await
        }
        Commands::Logout => commands::auth::logout(session),
        Commands::Whoami { remote } => commands::auth::whoami(session, remote).await,
        Commands::Register {
            username,
            email,
            password,
            displayname,
            language,
        } => {
            let displayname = displayname.unwrap_or_else(|| username.clone());
            commands::auth::register(session, username, email, password, displayname, language)
                .await
        }
        Commands::Activate { username, token } => {
            commands::auth::activate(session, &username, &token).await
        }
        Commands::ResetRequest { email } => commands::auth::reset_request(session, &email).await,
        Commands::ResetCheck { username, token } => {
            commands::auth::reset_check(session, &username, &token).await
        }
        Commands::Reset {
            username,
            token,
            password,
        } => commands::auth::reset(session, &username, &token, &password).await,
        Commands::Account(AccountCommand::Update {
            displayname,
            language,
            old_password,
            new_password,
        }) => {
            commands::users::update(session, displayname, language, old_password, new_password)
                .await
        }
        Commands::Account(AccountCommand::Delete) => commands::users::delete(session).await,
        Commands::Users(UsersCommand::Find { query }) => {
            commands::users::find(session, &query).await
        }
        Commands::Boards(command) => match command {
            BoardsCommand::List => commands::boards::list(session).await,
            BoardsCommand::Show { board } => commands::boards::show(session, &board).await,
            BoardsCommand::Create { name } => commands::boards::create(session, &name).await,
            BoardsCommand::Rename { board, name } => {
                commands::boards::rename(session, &board, name).await
            }
            BoardsCommand::Delete { board } => commands::boards::delete(session, &board).await,
            BoardsCommand::AddMember { board, username } => {
                commands::boards::add_member(session, &board, &username).await
            }
            BoardsCommand::RemoveMember { board, username } => {
                commands::boards::remove_member(session, &board, &username).await
            }
        },
        Commands::Cards(command) => match command {
            CardsCommand::Mine { page, search } => {
                commands::cards::mine(session, page, &search).await
            }
            CardsCommand::List { board } => commands::cards::list(session, &board).await,
            CardsCommand::Show { board, card } => {
                commands::cards::show(session, &board, &card).await
            }
            CardsCommand::Create {
                board,
                name,
                description,
                state,
            } => commands::cards::create(session, &board, name, description, state).await,
            CardsCommand::Move { board, card, state } => {
                commands::cards::move_to(session, &board, &card, state).await
            }
            CardsCommand::Delete { board, card } => {
                commands::cards::delete(session, &board, &card).await
            }
        },
        Commands::Files(command) => match command {
            FilesCommand::List { board, card } => {
                commands::files::list(session, &board, &card).await
            }
            FilesCommand::Upload { board, card, path } => {
                commands::files::upload(session, &board, &card, &path).await
            }
            FilesCommand::Download {
                board,
                card,
                file,
                output,
            } => commands::files::download(session, &board, &card, &file, &output).await,
            FilesCommand::Delete { board, card, file } => {
                commands::files::delete(session, &board, &card, &file).await
            }
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let session = match open_session(&cli) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch(&session, cli.command).await {
        Ok(report) => {
            println!("{report:#}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
