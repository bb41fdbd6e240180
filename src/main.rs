use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use xg::areas::repository::Repository;
use xg::commands::plumbing::cat_file::CatFileMode;
use xg::commands::plumbing::update_index::{CacheInfo, UpdateMode};
use xg::errors::RepositoryError;

/// Exit status for command line misuse
const USAGE_ERROR: u8 = 129;
/// Exit status for fatal errors
const FATAL_ERROR: u8 = 128;

const LOG_ENV: &str = "XG_LOG";

#[derive(Parser)]
#[command(
    name = "xg",
    version = "0.1.0",
    about = "A minimal git index toolkit",
    long_about = "This is a small implementation of git plumbing, written in Rust. \
    It manages the object store and the index (staging area) using git's own \
    on-disk formats.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        directory: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command computes the blob id of a file and can write the blob to the object database."
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Show information about a stored object",
        group(ArgGroup::new("mode").required(true).multiple(false))
    )]
    CatFile {
        #[arg(short = 'p', group = "mode", help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(short = 's', group = "mode", help = "Show the object size")]
        size: bool,
        #[arg(short = 't', group = "mode", help = "Show the object type")]
        kind: bool,
        #[arg(short = 'e', group = "mode", help = "Exit with zero status if the object exists")]
        exists: bool,
        #[arg(index = 1)]
        object: String,
    },
    #[command(
        name = "update-index",
        about = "Register file contents in the working tree to the index",
        group(ArgGroup::new("update_mode").multiple(false))
    )]
    UpdateIndex {
        #[arg(short, long, help = "Report what is being added and removed")]
        verbose: bool,
        #[arg(long, group = "update_mode", conflicts_with_all = ["files", "cacheinfo"], help = "Refresh the stat data of unchanged entries")]
        refresh: bool,
        #[arg(long, group = "update_mode", help = "Add files that are not tracked yet")]
        add: bool,
        #[arg(long, group = "update_mode", help = "Remove files that no longer exist on disk")]
        remove: bool,
        #[arg(long = "force-remove", group = "update_mode", help = "Remove files even if they still exist on disk")]
        force_remove: bool,
        #[arg(long, value_name = "MODE,OBJECT,PATH", conflicts_with = "files", help = "Stage an object id directly")]
        cacheinfo: Vec<CacheInfo>,
        #[arg(index = 1)]
        files: Vec<PathBuf>,
    },
    #[command(name = "ls-files", about = "List the files tracked in the index")]
    LsFiles,
    #[command(name = "show-index", about = "Pretty-print the contents of the index file")]
    ShowIndex {
        #[arg(short, long, help = "Show every field of every entry")]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(USAGE_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing();

    match run(cli) {
        Ok(code) => code,
        Err(err) => report(err),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let pwd = std::env::current_dir()?.canonicalize()?;

    match cli.command {
        Commands::Init { directory } => {
            let path = directory.map_or_else(|| pwd.clone(), |directory| pwd.join(directory));
            Repository::new(&path, stdout())?.init()?;
        }
        Commands::HashObject { write, file } => {
            let repository = if write {
                Repository::discover(&pwd, stdout())?
            } else {
                Repository::new(&pwd, stdout())?
            };

            repository.hash_object(&pwd.join(file), write)?;
        }
        Commands::CatFile {
            pretty,
            size,
            kind,
            exists,
            object,
        } => {
            let repository = Repository::discover(&pwd, stdout())?;

            if exists {
                return Ok(if repository.object_exists(&object) {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                });
            }

            let mode = match (pretty, size, kind) {
                (true, _, _) => CatFileMode::Pretty,
                (_, true, _) => CatFileMode::Size,
                _ => CatFileMode::Type,
            };

            repository.cat_file(&object, mode)?;
        }
        Commands::UpdateIndex {
            verbose,
            refresh,
            add,
            remove,
            force_remove,
            cacheinfo,
            files,
        } => {
            let repository = Repository::discover(&pwd, stdout())?;

            if !refresh && files.is_empty() && cacheinfo.is_empty() {
                return Ok(ExitCode::SUCCESS);
            }

            let mode = match (add, remove, force_remove) {
                (true, _, _) => UpdateMode::Add,
                (_, true, _) => UpdateMode::Remove,
                (_, _, true) => UpdateMode::ForceRemove,
                _ => UpdateMode::Update,
            };

            if refresh {
                repository.refresh_index()?;
            } else if !cacheinfo.is_empty() {
                repository.update_index_cache_info(&cacheinfo, mode, verbose)?;
            } else {
                let files = files.iter().map(|file| pwd.join(file)).collect::<Vec<_>>();
                repository.update_index_files(&files, mode, verbose)?;
            }
        }
        Commands::LsFiles => {
            Repository::discover(&pwd, stdout())?.ls_files(&pwd)?;
        }
        Commands::ShowIndex { verbose } => {
            Repository::discover(&pwd, stdout())?.show_index(verbose)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn stdout() -> Box<dyn std::io::Write> {
    Box::new(std::io::stdout())
}

/// Print `err` git-style and pick the exit status
fn report(err: anyhow::Error) -> ExitCode {
    let root_cause = err.root_cause();
    if err.chain().count() > 1 {
        eprintln!("error: {root_cause}");
    }
    eprintln!("fatal: {err}");

    match err.downcast_ref::<RepositoryError>() {
        Some(RepositoryError::AlreadyInitialized(_)) => ExitCode::FAILURE,
        _ => ExitCode::from(FATAL_ERROR),
    }
}
