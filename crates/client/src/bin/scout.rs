use clap::{Parser, Subcommand};
use client::{
    ApiClient, ClientError,
    dashboard::Dashboard,
    detail::ProfileDetail,
    directory::DirectoryView,
    session::SessionContext,
    verification::VerificationBoard,
};
use storage::dto::search::{SearchFilters, SortBy};
use storage::models::{Level, Role};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "Athlete directory client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "SCOUT_API_URL", default_value = "http://127.0.0.1:8080")]
    api_url: String,

    /// Session token issued at sign-in
    #[arg(long, env = "SCOUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the public directory
    Search {
        #[command(flatten)]
        filters: FilterArgs,

        /// Replay a saved query string instead of the filter flags
        #[arg(long, conflicts_with_all = ["city", "sport", "level", "age_min", "age_max", "position", "verified", "sort_by", "page"])]
        location: Option<String>,
    },
    /// Show one athlete's full profile
    Show { id: Uuid },
    /// Show the dashboard for the signed-in account
    Dashboard,
    /// Admin verification tools
    Verify {
        #[command(subcommand)]
        action: VerifyAction,
    },
    /// Revoke the current session
    SignOut,
}

#[derive(Subcommand)]
enum VerifyAction {
    List,
    Toggle { id: Uuid },
}

#[derive(clap::Args)]
struct FilterArgs {
    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    sport: Option<String>,

    /// high_school, college, academy or semi_pro
    #[arg(long)]
    level: Option<Level>,

    #[arg(long)]
    age_min: Option<i32>,

    #[arg(long)]
    age_max: Option<i32>,

    #[arg(long)]
    position: Option<String>,

    #[arg(long)]
    verified: bool,

    /// newest or age
    #[arg(long, default_value = "newest")]
    sort_by: String,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

impl From<FilterArgs> for SearchFilters {
    fn from(args: FilterArgs) -> Self {
        Self {
            city: args.city,
            sport: args.sport,
            level: args.level,
            age_min: args.age_min,
            age_max: args.age_max,
            position: args.position,
            verified: args.verified,
            sort_by: SortBy::from_param(&args.sort_by),
            page: args.page,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("scout={},client={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api = ApiClient::new(&cli.api_url, cli.token)?;

    match cli.command {
        Commands::Search { filters, location } => {
            let mut view = match location {
                Some(location) => DirectoryView::restore(&location)?,
                None => DirectoryView::new(filters.into()),
            };
            let page = view.page();
            view.fetch(&api, page).await;

            println!("{}", view.render());
            println!();
            println!("Location: ?{}", view.location());
        }
        Commands::Show { id } => match ProfileDetail::load(&api, id).await {
            Ok(detail) => println!("{}", detail.render()),
            Err(ClientError::NotFound) => {
                println!("Athlete not found");
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Dashboard => {
            let session = SessionContext::init(&api).await?;
            println!("{}", Dashboard::for_session(&session).render(&session));
        }
        Commands::Verify { action } => {
            let session = SessionContext::init(&api).await?;
            if session.role() != Role::Admin {
                println!("Admin access required");
                std::process::exit(1);
            }

            let mut board = VerificationBoard::load(&api).await?;
            match action {
                VerifyAction::List => println!("{}", board.render()),
                VerifyAction::Toggle { id } => {
                    let updated = board.toggle(&api, id).await;
                    println!("{}", board.render());
                    if !updated {
                        std::process::exit(1);
                    }
                }
            }
        }
        Commands::SignOut => {
            let session = SessionContext::init(&api).await?;
            session.teardown(&api).await?;
            println!("Signed out");
        }
    }

    Ok(())
}
