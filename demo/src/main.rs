use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use gateway_core::client::DEFAULT_BASE_URL;
use gateway_core::{ClientConfig, GatewayClient};
use gateway_demo::load::{self, LoadConfig};
use gateway_demo::scenarios;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Demo scenarios and load test for the banking gateway", long_about = None)]
#[command(name = "gateway-demo")]
struct Cli {
    /// Gateway base URL.
    #[arg(long, env = "GATEWAY_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "GATEWAY_TIMEOUT_SECS", default_value_t = 10, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user and read it back.
    GetUser,
    /// Create a user and open a deposit account.
    OpenDepositAccount,
    /// Open a debit card account and issue a virtual card on it.
    IssueVirtualCard,
    /// Fetch the tariff and contract documents of a new credit card account.
    GetDocuments,
    /// Make a purchase and fetch its receipt after a delay.
    GetOperationReceipt {
        #[arg(long, default_value_t = 5)]
        delay_secs: u64,
    },
    /// Make every kind of operation, then list them and fetch the summary.
    OperationsTour,
    /// Open debit card accounts from several virtual users.
    Load(LoadArgs),
}

#[derive(Args)]
struct LoadArgs {
    #[arg(long, default_value_t = 10)]
    users: usize,
    #[arg(long, default_value_t = 60)]
    duration_secs: u64,
    #[arg(long, default_value_t = 1)]
    min_wait_secs: u64,
    #[arg(long, default_value_t = 3)]
    max_wait_secs: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gateway_demo=info,gateway_core=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ClientConfig {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout_secs),
    };
    let gateway = GatewayClient::connect(&config);

    match cli.command {
        Commands::GetUser => {
            let user = scenarios::get_user(&gateway).context("get-user scenario")?;
            println!("{user:#?}");
        }
        Commands::OpenDepositAccount => {
            let account = scenarios::open_deposit_account(&gateway).context("open-deposit-account scenario")?;
            println!("{account:#?}");
        }
        Commands::IssueVirtualCard => {
            let card = scenarios::issue_virtual_card(&gateway).context("issue-virtual-card scenario")?;
            println!("{card:#?}");
        }
        Commands::GetDocuments => {
            let documents = scenarios::get_documents(&gateway).context("get-documents scenario")?;
            println!("{documents:#?}");
        }
        Commands::GetOperationReceipt { delay_secs } => {
            let receipt = scenarios::get_operation_receipt(&gateway, Duration::from_secs(delay_secs))
                .context("get-operation-receipt scenario")?;
            println!("{receipt:#?}");
        }
        Commands::OperationsTour => {
            let tour = scenarios::operations_tour(&gateway).context("operations-tour scenario")?;
            println!("{tour:#?}");
        }
        Commands::Load(args) => {
            let report = load::run(&LoadConfig {
                client: config,
                users: args.users,
                duration: Duration::from_secs(args.duration_secs),
                min_wait: Duration::from_secs(args.min_wait_secs),
                max_wait: Duration::from_secs(args.max_wait_secs),
            });
            println!("{report}");
        }
    }
    Ok(())
}
