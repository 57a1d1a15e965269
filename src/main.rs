use clap::Parser;
use miette::{IntoDiagnostic, Result};
use reward_network::application::network::RewardNetwork;
use reward_network::domain::ports::{
    AccountRepositoryBox, RestaurantRepositoryBox, RewardRepositoryBox,
};
use reward_network::infrastructure::in_memory::{
    InMemoryAccountRepository, InMemoryRestaurantRepository, InMemoryRewardRepository,
};
use reward_network::interfaces::catalog::Catalog;
use reward_network::interfaces::csv::confirmation_writer::ConfirmationWriter;
use reward_network::interfaces::csv::dining_reader::DiningReader;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input dinings CSV file
    input: PathBuf,

    /// JSON file with the accounts and restaurants to load
    #[arg(long)]
    catalog: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

/// Initialize tracing from the REWARD_NETWORK_LOG environment variable.
///
/// Defaults to "info". Logs go to stderr so stdout stays CSV.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("REWARD_NETWORK_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .init();
}

fn in_memory(catalog: Catalog) -> Result<RewardNetwork> {
    let accounts: AccountRepositoryBox =
        Box::new(InMemoryAccountRepository::from_accounts(catalog.accounts).into_diagnostic()?);
    let restaurants: RestaurantRepositoryBox =
        Box::new(InMemoryRestaurantRepository::from_restaurants(catalog.restaurants));
    let rewards: RewardRepositoryBox = Box::new(InMemoryRewardRepository::new());

    Ok(RewardNetwork::new(accounts, restaurants, rewards))
}

#[cfg(feature = "storage-rocksdb")]
fn persistent(catalog: Catalog, db_path: PathBuf) -> Result<RewardNetwork> {
    use reward_network::infrastructure::rocksdb::RocksDBStore;

    let store = RocksDBStore::open(&db_path).into_diagnostic()?;
    for account in &catalog.accounts {
        if !store.insert_account(account).into_diagnostic()? {
            info!(account = %account.number, "Keeping stored account");
        }
    }
    for restaurant in &catalog.restaurants {
        store.insert_restaurant(restaurant).into_diagnostic()?;
    }

    let accounts: AccountRepositoryBox = Box::new(store.clone());
    let restaurants: RestaurantRepositoryBox = Box::new(store.clone());
    let rewards: RewardRepositoryBox = Box::new(store);

    Ok(RewardNetwork::new(accounts, restaurants, rewards))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn persistent(catalog: Catalog, _db_path: PathBuf) -> Result<RewardNetwork> {
    eprintln!(
        "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
    );
    in_memory(catalog)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let catalog = Catalog::from_reader(File::open(&cli.catalog).into_diagnostic()?).into_diagnostic()?;
    for number in catalog.invalid_accounts() {
        warn!(account = %number, "Beneficiary allocations do not total 100%");
    }

    let network = match cli.db_path {
        Some(db_path) => persistent(catalog, db_path)?,
        None => in_memory(catalog)?,
    };

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = DiningReader::new(file);
    let stdout = io::stdout();
    let mut writer = ConfirmationWriter::new(stdout.lock());

    let mut rewarded = 0usize;
    for dining_result in reader.dinings() {
        match dining_result {
            Ok(dining) => match network.reward_account_for(&dining).await {
                Ok(confirmation) => {
                    writer.write_confirmation(&confirmation).into_diagnostic()?;
                    rewarded += 1;
                }
                Err(e) => {
                    eprintln!("Error rewarding dining: {}", e);
                }
            },
            Err(e) => {
                eprintln!("Error reading dining: {}", e);
            }
        }
    }
    writer.flush().into_diagnostic()?;
    info!(rewarded, "Finished processing dinings");

    Ok(())
}
