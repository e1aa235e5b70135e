//! Command-line front end for the inkpost record layer.
//!
//! # Responsibility
//! - Open a database, wire logging, and route subcommands to core services.
//! - Print stored records as JSON lines; print rejections to stderr.

use clap::{Args, Parser, Subcommand};
use inkpost_core::db::{open_db, open_db_in_memory, DbError};
use inkpost_core::{
    default_log_level, init_logging, Author, AuthorId, AuthorService, LoggingError,
    NewPostRequest, Post, PostId, PostService, RecordListQuery, RepoError,
    SqliteAuthorRepository, SqlitePostRepository, ValidationError,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "inkpost", version, about = "Validate and store authors and posts")]
struct Cli {
    /// SQLite database file. Uses a throwaway in-memory database when unset.
    #[arg(long, env = "INKPOST_DB", global = true)]
    db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, env = "INKPOST_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "INKPOST_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the core library is linked.
    Ping,
    AddAuthor(AddAuthorArgs),
    AddPost(AddPostArgs),
    ListAuthors(ListArgs),
    ListPosts(ListArgs),
    DeleteAuthor { id: AuthorId },
    DeletePost { id: PostId },
}

#[derive(Debug, Args)]
struct AddAuthorArgs {
    #[arg(long, required_unless_present = "from_json")]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// Read the author from a JSON object instead of flags.
    #[arg(long, conflicts_with_all = ["name", "phone"])]
    from_json: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct AddPostArgs {
    #[arg(long, required_unless_present = "from_json")]
    title: Option<String>,
    #[arg(long, conflicts_with = "content_file")]
    content: Option<String>,
    /// Read the post body from a text file.
    #[arg(long)]
    content_file: Option<PathBuf>,
    #[arg(long)]
    summary: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Read the post from a JSON object instead of flags.
    #[arg(long, conflicts_with_all = ["title", "content", "content_file", "summary", "category"])]
    from_json: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long, default_value_t = 0)]
    offset: u32,
    /// Print one compact label per record instead of JSON.
    #[arg(long)]
    plain: bool,
}

impl From<&ListArgs> for RecordListQuery {
    fn from(args: &ListArgs) -> Self {
        Self {
            limit: args.limit,
            offset: args.offset,
        }
    }
}

#[derive(Debug)]
enum CliError {
    Logging(LoggingError),
    Db(DbError),
    Repo(RepoError),
    Input(String),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::Repo(RepoError::Validation(_)) => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(RepoError::Validation(err)) => write!(f, "{}: {err}", err.field()),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Input(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CliError {}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ValidationError> for CliError {
    fn from(value: ValidationError) -> Self {
        Self::Repo(RepoError::Validation(value))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    if let Command::Ping = cli.command {
        println!("inkpost_core ping={}", inkpost_core::ping());
        println!("inkpost_core version={}", inkpost_core::core_version());
        return Ok(());
    }

    let conn = match cli.db.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    info!("event=cli_command module=cli status=start");

    let authors = AuthorService::new(SqliteAuthorRepository::new(&conn));
    let posts = PostService::new(SqlitePostRepository::new(&conn));

    match cli.command {
        Command::Ping => {}
        Command::AddAuthor(args) => {
            let stored = match args.from_json {
                Some(path) => authors.create_from(&Author::from_json(&read_json(&path)?)?)?,
                None => authors.create_author(
                    args.name.unwrap_or_default(),
                    args.phone.as_deref(),
                )?,
            };
            print_record(&stored)?;
        }
        Command::AddPost(args) => {
            let stored = match args.from_json {
                Some(path) => posts.create_from(&Post::from_json(&read_json(&path)?)?)?,
                None => {
                    let content = match args.content_file {
                        Some(path) => Some(read_text(&path)?),
                        None => args.content,
                    };
                    posts.create_post(NewPostRequest {
                        title: args.title.unwrap_or_default(),
                        content,
                        summary: args.summary,
                        category: args.category,
                    })?
                }
            };
            print_record(&stored)?;
        }
        Command::ListAuthors(args) => {
            for author in authors.list_authors(&RecordListQuery::from(&args))? {
                print_listed(&author, args.plain)?;
            }
        }
        Command::ListPosts(args) => {
            for post in posts.list_posts(&RecordListQuery::from(&args))? {
                print_listed(&post, args.plain)?;
            }
        }
        Command::DeleteAuthor { id } => authors.delete_author(id)?,
        Command::DeletePost { id } => posts.delete_post(id)?,
    }

    info!("event=cli_command module=cli status=ok");
    Ok(())
}

fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|err| CliError::Input(format!("cannot read `{}`: {err}", path.display())))
}

fn read_json(path: &Path) -> Result<serde_json::Value, CliError> {
    let text = read_text(path)?;
    serde_json::from_str(&text)
        .map_err(|err| CliError::Input(format!("`{}` is not valid JSON: {err}", path.display())))
}

fn print_record(record: &impl serde::Serialize) -> Result<(), CliError> {
    let line = serde_json::to_string(record)
        .map_err(|err| CliError::Input(format!("cannot encode record: {err}")))?;
    println!("{line}");
    Ok(())
}

fn print_listed(record: &(impl serde::Serialize + Display), plain: bool) -> Result<(), CliError> {
    if plain {
        println!("{record}");
        Ok(())
    } else {
        print_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn add_author_requires_name_or_json() {
        assert!(Cli::try_parse_from(["inkpost", "add-author"]).is_err());
        assert!(Cli::try_parse_from(["inkpost", "add-author", "--name", "Ann"]).is_ok());
        assert!(Cli::try_parse_from(["inkpost", "add-author", "--from-json", "a.json"]).is_ok());
    }

    #[test]
    fn json_input_conflicts_with_field_flags() {
        let parsed = Cli::try_parse_from([
            "inkpost",
            "add-post",
            "--title",
            "Top",
            "--from-json",
            "post.json",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_db_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["inkpost", "list-posts", "--db", "/tmp/x.db", "--limit", "3"])
            .unwrap();
        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/x.db")));
        match cli.command {
            Command::ListPosts(args) => {
                assert_eq!(args.limit, Some(3));
                assert!(!args.plain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
