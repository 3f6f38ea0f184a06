use api_types::record::{Record, RecordNew};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use store::{ApiClient, FinanceStore, RecordKind};

mod config;
mod error;

use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "walletsync")]
#[command(about = "Command-line front end for the WalletSync finance store")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override log level.
    #[arg(long)]
    level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Income(Category),
    Expense(Category),
    /// Totals and balance across both collections.
    Summary,
    /// The most recent transactions.
    History,
}

#[derive(Args, Debug)]
struct Category {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    Add(AddArgs),
    List,
    Delete {
        /// Server-assigned record id.
        id: String,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    note: Option<String>,
}

impl AddArgs {
    fn into_record(self) -> RecordNew {
        let mut extra = serde_json::Map::new();
        if let Some(title) = self.title {
            extra.insert("title".to_string(), Value::String(title));
        }
        if let Some(category) = self.category {
            extra.insert("category".to_string(), Value::String(category));
        }
        if let Some(note) = self.note {
            extra.insert("description".to_string(), Value::String(note));
        }
        RecordNew {
            amount: self.amount,
            extra,
        }
    }
}

fn title_of(record: &Record) -> &str {
    record
        .extra
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("-")
}

fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("(empty)");
        return;
    }
    for record in records {
        println!(
            "{}  {:>10.2}  {}  {}",
            record.created_at.format("%Y-%m-%d"),
            record.amount,
            record.id,
            title_of(record),
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(cli.config.as_deref(), cli.base_url, cli.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "walletsync={level},store={level}",
            level = settings.level
        ))
        .init();

    let mut store = FinanceStore::new(ApiClient::new(settings.base_url));

    match cli.command {
        Command::Income(Category {
            command: CategoryCommand::Add(args),
        }) => {
            store.add_income(args.into_record()).await;
        }
        Command::Income(Category {
            command: CategoryCommand::List,
        }) => {
            store.fetch_incomes().await;
            print_records(store.incomes());
        }
        Command::Income(Category {
            command: CategoryCommand::Delete { id },
        }) => {
            store.delete_income(&id).await;
        }
        Command::Expense(Category {
            command: CategoryCommand::Add(args),
        }) => {
            store.add_expense(args.into_record()).await;
        }
        Command::Expense(Category {
            command: CategoryCommand::List,
        }) => {
            store.fetch_expenses().await;
            print_records(store.expenses());
        }
        Command::Expense(Category {
            command: CategoryCommand::Delete { id },
        }) => {
            store.delete_expense(&id).await;
        }
        Command::Summary => {
            store.fetch_all().await;
            println!("income:  {:.2}", store.total_income());
            println!("expense: {:.2}", store.total_expenses());
            println!("balance: {:.2}", store.total_balance());
        }
        Command::History => {
            store.fetch_all().await;
            for entry in store.transaction_history() {
                let sign = match entry.kind {
                    RecordKind::Income => '+',
                    RecordKind::Expense => '-',
                };
                println!(
                    "{}  {}{:.2}  {}",
                    entry.record.created_at.format("%Y-%m-%d"),
                    sign,
                    entry.record.amount,
                    title_of(&entry.record),
                );
            }
        }
    }

    if let Some(message) = store.error() {
        eprintln!("{message}");
        std::process::exit(1);
    }

    Ok(())
}
