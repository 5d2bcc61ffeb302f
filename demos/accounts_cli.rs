use clap::{Parser, Subcommand};
use form3api::{Account, AccountFilter, Client, ClientConfig, Form3Error, Resource};
use std::error::Error;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "accounts-cli", about = "CLI wrapper for the Form3 accounts API")]
struct Cli {
    /// API host; falls back to FORM3_API_HOST env var, then localhost
    #[arg(long, env = "FORM3_API_HOST")]
    host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create an account
    Create {
        #[arg(long, default_value = "GB")]
        country: String,
        #[arg(long)]
        bank_id: String,
        #[arg(long, default_value = "GBDSC")]
        bank_id_code: String,
        #[arg(long)]
        account_number: Option<String>,
        #[arg(long)]
        bic: Option<String>,
        /// Account holder name (repeatable)
        #[arg(long = "name")]
        names: Vec<String>,
    },
    /// Fetch a single account
    Fetch { id: Uuid },
    /// List one page of accounts
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        #[arg(long)]
        bank_id: Option<String>,
        #[arg(long)]
        account_number: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Print every account, following pagination to the end
    Walk {
        #[arg(long, default_value_t = 100)]
        size: u32,
    },
    /// Delete an account at the given version
    Delete {
        id: Uuid,
        #[arg(long)]
        version: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(host) = cli.host {
        config = config.with_base_url(host);
    }
    let accounts = Client::with_config(config)?.accounts();

    match cli.command {
        Commands::Create {
            country,
            bank_id,
            bank_id_code,
            account_number,
            bic,
            names,
        } => {
            let account = Account {
                country: Some(country),
                bank_id: Some(bank_id),
                bank_id_code: Some(bank_id_code),
                account_number,
                bic,
                name: (!names.is_empty()).then_some(names),
                ..Default::default()
            };
            let created = accounts.create(&account).await?;
            print_account(0, &created);
        }
        Commands::Fetch { id } => {
            let account = accounts.fetch(id).await?;
            println!("{}", serde_json::to_string_pretty(&account)?);
        }
        Commands::List {
            page,
            size,
            bank_id,
            account_number,
            country,
        } => {
            let filter = AccountFilter {
                bank_id,
                account_number,
                country,
                ..Default::default()
            };
            let page = accounts.list(page, size, Some(&filter)).await?;
            page.iterate(|i, account| {
                print_account(i, account);
                Ok::<_, Form3Error>(())
            })?;
            if page.has_next() {
                println!("(more pages available)");
            }
        }
        Commands::Walk { size } => {
            let page = accounts.list(0, size, None).await?;
            let mut total = 0;
            page.walk(|i, account| {
                print_account(i, account);
                total += 1;
                Ok::<_, Form3Error>(())
            })
            .await?;
            println!("{total} accounts");
        }
        Commands::Delete { id, version } => {
            accounts.delete(id, version).await?;
            println!("Deleted account {id}");
        }
    }

    Ok(())
}

fn print_account(i: usize, account: &Resource<Account>) {
    println!(
        "{:>3} | {} v{} | {} {}",
        i,
        account.id,
        account.version,
        account.attributes.bank_id.as_deref().unwrap_or("-"),
        account.attributes.account_number.as_deref().unwrap_or("-"),
    );
}
