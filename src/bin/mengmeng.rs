use std::{
    io::{self},
    path::{Path, PathBuf},
    process::exit,
};

use clap::{Parser, Subcommand};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use mengmeng_budget::{
    BudgetClient, Config, Error, NewTransaction, QueryMonth, Session, SummaryFilter,
    Transaction, TransactionFilter, TransactionPager, TransactionType,
    account::{ACCOUNTS, get_account},
    category::{CATEGORIES, get_category},
    config::DEFAULT_CONFIG_PATH,
    format::{format_currency, format_time},
    timezone,
    transaction::parse_datetime,
};

/// The command line client for 萌萌记账.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the TOML config file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// The API base URL, e.g. "http://localhost:8080/api". Overrides the config file.
    #[arg(long)]
    base_url: Option<String>,

    /// Log filter, e.g. "debug" or "mengmeng_budget=trace". Overrides RUST_LOG and the config file.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new account. The password is prompted for.
    Register {
        /// The ID to log in with.
        #[arg(long)]
        id: String,

        /// The name shown to family members.
        #[arg(long)]
        username: String,
    },

    /// Log in and remember the session. The password is prompted for.
    Login {
        /// The ID to log in with.
        #[arg(long)]
        id: String,
    },

    /// Forget the saved session.
    Logout,

    /// Show income, expense and balance for a month.
    Summary {
        /// The month as yyyy-MM. Defaults to the current month.
        #[arg(long)]
        month: Option<QueryMonth>,

        /// A filter ID such as "expense" or "food", or its label.
        #[arg(long, default_value = "all")]
        filter: TransactionFilter,
    },

    /// Show the most recent transactions.
    Recent,

    /// List a month's transactions grouped by day.
    List {
        /// The month as yyyy-MM. Defaults to the current month.
        #[arg(long)]
        month: Option<QueryMonth>,

        /// A filter ID such as "expense" or "food", or its label.
        #[arg(long, default_value = "all")]
        filter: TransactionFilter,

        /// Transactions per page. Defaults to the config file's page size.
        #[arg(long)]
        page_size: Option<u32>,

        /// Load every page instead of only the first.
        #[arg(long)]
        all: bool,
    },

    /// Record a transaction.
    Add {
        /// The amount, always positive.
        #[arg(long)]
        amount: f64,

        /// "expense", "income" or "transfer".
        #[arg(long = "type", default_value = "expense")]
        kind: TransactionType,

        /// A category ID, see `categories`.
        #[arg(long)]
        category: Option<String>,

        /// An account ID, see `accounts`.
        #[arg(long)]
        account: Option<String>,

        /// When it happened, e.g. "2025-03-06 12:30". Defaults to now.
        #[arg(long)]
        date: Option<String>,

        /// A free text note.
        #[arg(long)]
        note: Option<String>,
    },

    /// Generate a code family members can use to join your ledger.
    FamilyCode,

    /// List the built-in categories.
    Categories,

    /// List the built-in accounts.
    Accounts,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(error) => {
            print_error(error);
            exit(1);
        }
    };

    setup_logging(args.log_level.as_deref(), &config.logging.level);

    if let Some(base_url) = args.base_url {
        config.server.base_url = base_url;
    }

    if let Err(error) = run(args.command, &config).await {
        print_error(error);
        exit(1);
    }
}

fn setup_logging(cli_level: Option<&str>, config_level: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level)),
    };

    let stderr_log = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .init();
}

async fn run(command: Command, config: &Config) -> Result<(), Error> {
    let client = BudgetClient::from_config(&config.server)?;
    let session_path = Path::new(&config.client.session_path);

    if let Some(session) = Session::restore(session_path) {
        tracing::debug!("restored session for {}", session.user_id);
        client.set_token(session.token);
    }

    let offset = timezone::resolve_offset(config.client.timezone.as_deref());

    match command {
        Command::Register { id, username } => {
            let Some(password) = prompt_new_password() else {
                return Ok(());
            };
            client.register(&id, &username, &password).await?;
            println!("Registered {username}. Log in with `mengmeng login --id {id}`.");
        }
        Command::Login { id } => {
            let Some(password) = prompt_password("Password: ") else {
                return Ok(());
            };
            let token = client.login(&id, &password).await?;
            Session { user_id: id.clone(), token }.save(session_path)?;
            println!("Logged in as {id}.");
        }
        Command::Logout => {
            Session::remove(session_path)?;
            client.logout();
            println!("Logged out.");
        }
        Command::Summary { month, filter } => {
            let month = month.unwrap_or_else(|| QueryMonth::containing(timezone::today(offset)));
            let summary = client
                .home_summary(&SummaryFilter::new(filter, month))
                .await?;

            print_summary_card(&month, filter, summary.income, summary.expense, summary.balance);
        }
        Command::Recent => {
            let transactions = client.recent_transactions().await?;
            if transactions.is_empty() {
                println!("No transactions yet.");
            }

            for transaction in &transactions {
                println!(
                    "{}  {}",
                    transaction.date.date(),
                    transaction_line(transaction)
                );
            }
        }
        Command::List {
            month,
            filter,
            page_size,
            all,
        } => {
            let today = timezone::today(offset);
            let month = month.unwrap_or_else(|| QueryMonth::containing(today));
            let mut pager = TransactionPager::new(
                filter,
                month,
                page_size.unwrap_or(config.client.page_size),
            );

            if all {
                pager.load_all(&client).await?;
            } else {
                pager.load_next(&client).await?;
            }

            let summary = pager.month_summary(&client).await;
            print_summary_card(&month, filter, summary.income, summary.expense, summary.balance);
            print_day_groups(&pager, today);
        }
        Command::Add {
            amount,
            kind,
            category,
            account,
            date,
            note,
        } => {
            let date = match date {
                Some(date) => parse_datetime(&date)?,
                None => now(offset),
            };

            let mut transaction = NewTransaction::build(amount, kind, date)?;
            if let Some(category) = category {
                transaction = transaction.category(&category);
            }
            if let Some(account) = account {
                transaction = transaction.account(&account);
            }
            if let Some(note) = note {
                transaction = transaction.note(&note);
            }

            client.add_transaction(&transaction).await?;
            println!(
                "Recorded {} {} in {}.",
                transaction.kind.title(),
                format_currency(transaction.amount),
                get_category(&transaction.category_id).name
            );
        }
        Command::FamilyCode => {
            let code = client.generate_family_code().await?;
            println!("{code}");
        }
        Command::Categories => {
            for category in &CATEGORIES {
                println!("{:<14} {}", category.id, category.name);
            }
        }
        Command::Accounts => {
            for account in &ACCOUNTS {
                println!(
                    "{:<8} {:<6} {:>14}",
                    account.id,
                    account.name,
                    account.formatted_balance()
                );
            }
        }
    }

    Ok(())
}

fn now(offset: UtcOffset) -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc().to_offset(offset);
    PrimitiveDateTime::new(now.date(), now.time())
}

fn print_summary_card(
    month: &QueryMonth,
    filter: TransactionFilter,
    income: f64,
    expense: f64,
    balance: f64,
) {
    println!("{} {}", month.title(), filter.label());
    println!(
        "收入 {}   支出 {}   结余 {}",
        format_currency(income),
        format_currency(expense),
        format_currency(balance)
    );
}

fn print_day_groups(pager: &TransactionPager, today: time::Date) {
    let groups = pager.day_groups();
    if groups.is_empty() {
        println!();
        println!("No transactions this month.");
        return;
    }

    for group in groups {
        println!();
        println!("{}", group.header(today));

        for transaction in &group.transactions {
            println!("  {}", transaction_line(transaction));
        }
    }

    if pager.has_more() {
        println!();
        println!("More transactions available, use --all to load them.");
    }
}

fn transaction_line(transaction: &Transaction) -> String {
    let category = get_category(&transaction.category_id);
    let account = get_account(&transaction.account_id);
    let mut line = format!(
        "{}  {}  {}",
        format_time(transaction.date),
        category.name,
        account.name
    );

    if !transaction.note.is_empty() {
        line.push_str(&format!("  {}", transaction.note));
    }
    if let Some(created_by) = &transaction.created_by {
        line.push_str(&format!("  ({created_by})"));
    }

    line.push_str(&format!("  {}", transaction.formatted_amount()));
    line
}

fn prompt_password(prompt: &str) -> Option<String> {
    match rpassword::prompt_password(prompt) {
        Ok(string) => Some(string),
        Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => None,
        Err(error) => {
            print_error(format!("Could not read password from stdin: {error}"));
            None
        }
    }
}

fn prompt_new_password() -> Option<String> {
    loop {
        let first_password = prompt_password("Enter a new password: ")?;
        if first_password.is_empty() {
            print_error("Password must not be empty, try again.");
            continue;
        }

        let second_password = prompt_password("Enter the same password again: ")?;
        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        return Some(first_password);
    }
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

/// From https://crates.io/crates/capitalize
fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
