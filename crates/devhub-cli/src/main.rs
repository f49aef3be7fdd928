use clap::{Parser, Subcommand};
use devhub_cli::commands::{issue_token, sign_meeting};
use devhub_config::{JwtConfig, ZoomConfig};
use devhub_observability::init_basic_console_logging;
use dotenvy::dotenv;
use tracing::error;

#[derive(Parser)]
#[command(name = "devhub-cli")]
#[command(about = "DevHub CLI - Development tools for DevHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign an access token accepted by the API (reads JWT_SECRET)
    IssueToken {
        /// User ID placed in the `id` claim
        #[arg(long)]
        id: String,

        /// Email placed in the `email` claim
        #[arg(short = 'e', long)]
        email: String,

        /// Optional role claim, e.g. `admin`
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Lifetime in seconds (defaults to JWT_ACCESS_EXPIRY)
        #[arg(long)]
        expires_in: Option<i64>,
    },
    /// Issue a meeting SDK signature (reads ZOOM_SDK_KEY and ZOOM_SDK_SECRET)
    SignMeeting {
        /// Meeting number to sign for
        #[arg(short = 'm', long)]
        meeting_number: String,

        /// 0 for participant, 1 for host
        #[arg(short = 'r', long, default_value = "0")]
        role: i32,
    },
}

fn run(cli: Cli) -> anyhow::Result<String> {
    match cli.command {
        Commands::IssueToken {
            id,
            email,
            role,
            expires_in,
        } => {
            let jwt_config = JwtConfig::from_env()?;
            Ok(issue_token(
                &id,
                &email,
                role.as_deref(),
                expires_in,
                &jwt_config,
            )?)
        }
        Commands::SignMeeting {
            meeting_number,
            role,
        } => sign_meeting(&meeting_number, role, &ZoomConfig::from_env()),
    }
}

fn main() {
    dotenv().ok();
    init_basic_console_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}
