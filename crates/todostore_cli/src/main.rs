//! Command-line front end for the todo store.
//!
//! # Responsibility
//! - Pick a backend (SQLite file or JSON session blob) from flags/env.
//! - Map subcommands onto `TodoService` and credential operations.
//! - Persist the session blob back to disk after session-backed commands.

use clap::{Args, Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::{Path, PathBuf};
use todostore_core::db::open_db;
use todostore_core::{
    create_user, default_log_level, init_logging, is_authorized_user, SessionData,
    SessionTodoStore, SqliteTodoStore, TodoId, TodoListId, TodoService, TodoStore,
};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "todostore")]
#[command(about = "Manage personal todo lists", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "TODOSTORE_DB", conflicts_with = "session")]
    db: Option<PathBuf>,

    /// JSON session file used instead of a database
    #[arg(long, env = "TODOSTORE_SESSION")]
    session: Option<PathBuf>,

    /// Username that scopes database-backed commands
    #[arg(long, env = "TODOSTORE_USER")]
    user: Option<String>,

    /// Absolute directory for rotating log files; logging is off when unset
    #[arg(long, env = "TODOSTORE_LOG_DIR")]
    log_dir: Option<String>,

    #[arg(long, env = "TODOSTORE_LOG_LEVEL", default_value = default_log_level())]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a user in the database
    AddUser(Credentials),
    /// Check a username/password pair
    Login(Credentials),
    /// Show all lists, incomplete first
    Lists,
    /// Show one list and its todos
    Show { list_id: TodoListId },
    /// Create an empty list
    NewList { title: String },
    RenameList { list_id: TodoListId, title: String },
    DeleteList { list_id: TodoListId },
    /// Add a todo to a list
    AddTodo { list_id: TodoListId, title: String },
    Toggle(TodoRef),
    Done(TodoRef),
    Undone(TodoRef),
    DeleteTodo(TodoRef),
    /// Mark every todo of a list done
    CompleteAll { list_id: TodoListId },
}

#[derive(Debug, Args)]
struct Credentials {
    username: String,
    #[arg(long, env = "TODOSTORE_PASSWORD")]
    password: String,
}

#[derive(Debug, Args)]
struct TodoRef {
    list_id: TodoListId,
    todo_id: TodoId,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir)?;
    }

    match (&cli.db, &cli.session) {
        (Some(db), _) => run_with_db(db, cli.user.as_deref(), cli.command),
        (None, Some(session)) => run_with_session(session, cli.command),
        (None, None) => Err("either --db or --session is required".into()),
    }
}

fn run_with_db(path: &Path, user: Option<&str>, command: Command) -> CliResult<()> {
    let conn = open_db(path)?;

    match command {
        Command::AddUser(credentials) => {
            if create_user(&conn, &credentials.username, &credentials.password)? {
                println!("Created user {}", credentials.username);
                Ok(())
            } else {
                Err(format!("user `{}` already exists", credentials.username).into())
            }
        }
        Command::Login(credentials) => {
            if is_authorized_user(&conn, &credentials.username, &credentials.password)? {
                println!("Welcome, {}", credentials.username);
                Ok(())
            } else {
                Err("invalid credentials".into())
            }
        }
        command => {
            let user = user.ok_or("--user is required with --db")?;
            let mut service = TodoService::new(SqliteTodoStore::new(&conn, user));
            execute(&mut service, command)
        }
    }
}

fn run_with_session(path: &Path, command: Command) -> CliResult<()> {
    if matches!(command, Command::AddUser(_) | Command::Login(_)) {
        return Err("user accounts require --db".into());
    }

    let mut session = load_session(path)?;
    {
        let mut service = TodoService::new(SessionTodoStore::new(&mut session));
        execute(&mut service, command)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&session)?)?;
    info!("event=session_save module=cli status=ok");
    Ok(())
}

fn load_session(path: &Path) -> CliResult<SessionData> {
    if !path.exists() {
        return Ok(SessionData::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn execute<S: TodoStore>(service: &mut TodoService<S>, command: Command) -> CliResult<()> {
    match command {
        Command::Lists => {
            for summary in service.overview()? {
                println!(
                    "[{}] {:>4}  {}  ({}/{})",
                    if summary.is_done { "x" } else { " " },
                    summary.id,
                    summary.title,
                    summary.done_count,
                    summary.todo_count
                );
            }
        }
        Command::Show { list_id } => {
            let list = service.todo_list(list_id)?;
            println!("{}", list.title);
            for todo in &list.todos {
                println!(
                    "  [{}] {:>4}  {}",
                    if todo.done { "x" } else { " " },
                    todo.id,
                    todo.title
                );
            }
        }
        Command::NewList { title } => {
            service.create_list(&title)?;
            println!("The todo list has been created.");
        }
        Command::RenameList { list_id, title } => {
            service.rename_list(list_id, &title)?;
            println!("Todo list updated.");
        }
        Command::DeleteList { list_id } => {
            service.delete_list(list_id)?;
            println!("Todo list deleted.");
        }
        Command::AddTodo { list_id, title } => {
            service.add_todo(list_id, &title)?;
            println!("The todo has been created.");
        }
        Command::Toggle(todo) => {
            service.toggle_todo(todo.list_id, todo.todo_id)?;
            println!("Todo toggled.");
        }
        Command::Done(todo) => {
            service.set_todo_done(todo.list_id, todo.todo_id, true)?;
            println!("Todo marked done.");
        }
        Command::Undone(todo) => {
            service.set_todo_done(todo.list_id, todo.todo_id, false)?;
            println!("Todo marked not done.");
        }
        Command::DeleteTodo(todo) => {
            service.delete_todo(todo.list_id, todo.todo_id)?;
            println!("The todo has been deleted.");
        }
        Command::CompleteAll { list_id } => {
            service.complete_all(list_id)?;
            println!("All todos have been marked as done.");
        }
        Command::AddUser(_) | Command::Login(_) => {
            return Err("user commands are handled before a store is opened".into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_session_backed_command() {
        let cli = Cli::try_parse_from(["todostore", "--session", "s.json", "new-list", "Work"])
            .unwrap();
        assert!(cli.db.is_none());
        assert!(matches!(cli.command, Command::NewList { ref title } if title == "Work"));
    }

    #[test]
    fn db_and_session_conflict() {
        let result = Cli::try_parse_from([
            "todostore", "--db", "t.db", "--session", "s.json", "lists",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_todo_reference() {
        let cli = Cli::try_parse_from(["todostore", "--db", "t.db", "--user", "a", "done", "3", "9"])
            .unwrap();
        match cli.command {
            Command::Done(todo) => {
                assert_eq!(todo.list_id, 3);
                assert_eq!(todo.todo_id, 9);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
