mod build;
mod clean;
mod config_cmd;
mod list;
mod run;
mod scaffold;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{HarnessError, Result};
use crate::interrupt::Interrupt;
use crate::models::{config, HarnessConfig, PoolSelection, ProblemId};
use crate::workspace::Workspace;

#[derive(Parser)]
#[command(name = "euler-harness")]
#[command(about = "Build, run and scaffold numbered problems", long_about = None)]
pub struct Cli {
    /// Directory holding the new/ and done/ pools (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile one or all problems
    Build {
        /// Particular problem number to build, instead of all
        #[arg(short, long)]
        number: Option<ProblemId>,
        /// Build with debug symbols and no optimization
        #[arg(short = 'g', long)]
        debug: bool,
        /// Echo the compiler command line
        #[arg(short, long)]
        verbose: bool,
        #[arg(long, value_enum, default_value_t)]
        pool: PoolSelection,
    },
    /// Run one or all built problems
    Run {
        /// Particular problem number to run, instead of all
        #[arg(short, long)]
        number: Option<ProblemId>,
        /// Separate build tree to take executables from
        #[arg(short, long)]
        build_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t)]
        pool: PoolSelection,
    },
    /// Remove build artifacts
    Clean {
        #[arg(short, long)]
        number: Option<ProblemId>,
        #[arg(long, value_enum, default_value_t)]
        pool: PoolSelection,
    },
    /// Create a new problem skeleton
    Scaffold {
        /// The number of the problem to create
        #[arg(short, long)]
        number: ProblemId,
    },
    /// List known problems
    List {
        #[arg(long, value_enum, default_value_t)]
        pool: PoolSelection,
    },
    /// Show the effective configuration
    Config {
        /// Write it to the project config file under the root
        #[arg(long)]
        save: bool,
    },
}

pub struct Context {
    pub workspace: Workspace,
    pub config: HarnessConfig,
    pub interrupt: Interrupt,
}

impl Context {
    fn load(root: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let explicit = root.is_some();
        let root = root.unwrap_or(cwd);
        let config = config::load_config(&root)?;

        let root = match (&config.root, explicit) {
            (Some(configured), false) => configured.clone(),
            _ => root,
        };
        tracing::debug!(root = %root.display(), "using problem root");

        Ok(Self {
            workspace: Workspace::new(root),
            config,
            interrupt: Interrupt::install()?,
        })
    }

    fn select(&self, number: Option<ProblemId>, pool: PoolSelection) -> Result<Vec<ProblemId>> {
        match number {
            Some(id) => Ok(vec![id]),
            None => self.workspace.list_selection(pool),
        }
    }
}

/// Prints a per-problem failure and lets the batch continue. Interruption is
/// the one failure that stops the batch.
fn report(err: HarnessError) -> Result<()> {
    match err {
        HarnessError::Interrupted => Err(err),
        err => {
            eprintln!("ERROR: {}", err);
            Ok(())
        }
    }
}

/// Process exit status for the outcome of a whole command. Per-problem
/// failures never get here, so they leave it at 0.
pub fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(HarnessError::Interrupted) => 130,
        Err(_) => 1,
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context::load(cli.root)?;

    match cli.command {
        Commands::Build {
            number,
            debug,
            verbose,
            pool,
        } => build::build(&ctx, number, debug, verbose, pool),
        Commands::Run {
            number,
            build_dir,
            pool,
        } => run::run(&ctx, number, build_dir, pool),
        Commands::Clean { number, pool } => clean::clean(&ctx, number, pool),
        Commands::Scaffold { number } => scaffold::scaffold(&ctx, number),
        Commands::List { pool } => list::list(&ctx, pool),
        Commands::Config { save } => config_cmd::show_config(&ctx, save),
    }
}
