use anyhow::Result;
use budgetflow::AppCommand;
use budgetflow::cli::OutputFormat;
use budgetflow::core::TransactionKind;
use budgetflow::core::log::init_logging;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Income,
    Expense,
}

impl From<Kind> for TransactionKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Income => TransactionKind::Income,
            Kind::Expense => TransactionKind::Expense,
        }
    }
}

#[derive(Args)]
struct FormatArgs {
    /// Print raw values as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl From<FormatArgs> for OutputFormat {
    fn from(args: FormatArgs) -> Self {
        if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record an income or expense
    Add {
        #[arg(value_enum)]
        kind: Kind,
        description: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Date of the transaction (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction by id
    Remove { id: i64 },
    /// List transactions, newest first
    List(FormatArgs),
    /// Manage savings goals
    #[command(subcommand)]
    Goal(GoalCommands),
    /// Display income, expense and balance totals
    Summary(FormatArgs),
    /// Display the running balance
    Balance(FormatArgs),
    /// Display income and expenses per month
    Monthly(FormatArgs),
    /// Delete all transactions and goals
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum GoalCommands {
    /// Create a savings goal
    Add {
        description: String,
        #[arg(allow_hyphen_values = true)]
        target: String,
        /// Due date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        due: Option<String>,
    },
    /// Add savings towards a goal
    Contribute {
        id: i64,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// List goals with their progress
    List(FormatArgs),
}

impl Commands {
    /// Maps a parsed subcommand onto a ledger command. `Setup` has none.
    fn into_app_command(self) -> Option<AppCommand> {
        let command = match self {
            Commands::Setup => return None,
            Commands::Add {
                kind,
                description,
                amount,
                date,
            } => AppCommand::AddTransaction {
                kind: kind.into(),
                description,
                amount,
                date,
            },
            Commands::Remove { id } => AppCommand::RemoveTransaction { id },
            Commands::List(args) => AppCommand::ListTransactions {
                format: args.into(),
            },
            Commands::Goal(GoalCommands::Add {
                description,
                target,
                due,
            }) => AppCommand::AddGoal {
                description,
                target,
                due,
            },
            Commands::Goal(GoalCommands::Contribute { id, amount }) => {
                AppCommand::Contribute { id, amount }
            }
            Commands::Goal(GoalCommands::List(args)) => AppCommand::ListGoals {
                format: args.into(),
            },
            Commands::Summary(args) => AppCommand::Summary {
                format: args.into(),
            },
            Commands::Balance(args) => AppCommand::Balance {
                format: args.into(),
            },
            Commands::Monthly(args) => AppCommand::Monthly {
                format: args.into(),
            },
            Commands::Clear { yes } => AppCommand::Clear { confirmed: yes },
        };
        Some(command)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(cmd) => match cmd.into_app_command() {
            Some(command) => budgetflow::run_command(command, cli.config_path.as_deref()),
            None => setup(cli.config_path.as_deref()),
        },
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}

fn setup(config_path: Option<&str>) -> Result<()> {
    let message = match config_path {
        Some(path) => budgetflow::cli::setup::setup_at_path(path)?,
        None => budgetflow::cli::setup::setup()?,
    };
    println!("{message}");
    Ok(())
}
