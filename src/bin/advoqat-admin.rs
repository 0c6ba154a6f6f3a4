//! Command-line access to the Advoqat admin backend.
//!
//! ```bash
//! advoqat-admin login --email admin@example.com --password secret
//! advoqat-admin stats
//! advoqat-admin cases --status active --priority high
//! ```
//!
//! Credentials persist in a JSON file between invocations.

use std::path::PathBuf;
use std::time::Duration;

use advoqat_admin::auth::LoginCredentials;
use advoqat_admin::cases::{CaseStatus, Priority};
use advoqat_admin::config::ClientOptions;
use advoqat_admin::error::Result;
use advoqat_admin::users::{UserRole, VerificationStatus};
use advoqat_admin::view::filters::{
    self, Availability, BarristerFilter, CaseFilter, DocumentFilter, FreelancerFilter, UserFilter,
};
use advoqat_admin::view::{self, Badge, Placeholder};
use advoqat_admin::Advoqat;
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;

const DEFAULT_CREDENTIALS_FILE: &str = ".advoqat-credentials.json";

#[derive(Parser)]
#[command(name = "advoqat-admin", version, about = "Advoqat admin backend client")]
struct Args {
    /// Backend URL, with or without the trailing /api
    #[arg(long, env = "ADVOQAT_API_URL")]
    api_url: Option<String>,

    /// File the admin token and user are kept in
    #[arg(long, env = "ADVOQAT_CREDENTIALS_PATH")]
    credentials: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "ADVOQAT_REQUEST_TIMEOUT_SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in as an admin
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ADVOQAT_PASSWORD")]
        password: String,
    },
    /// Forget the stored credentials
    Logout,
    /// Show the signed-in admin
    Whoami,
    /// Check the backend health endpoint
    Health,
    /// Dashboard totals and recent activity as JSON
    Stats,
    Users {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        role: Option<String>,
    },
    Barristers {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        status: Option<String>,
    },
    Freelancers {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, value_enum, default_value_t = AvailabilityArg::All)]
        availability: AvailabilityArg,
    },
    Cases {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    Documents {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long = "type")]
        document_type: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AvailabilityArg {
    All,
    Available,
    Unavailable,
}

impl From<AvailabilityArg> for Availability {
    fn from(arg: AvailabilityArg) -> Self {
        match arg {
            AvailabilityArg::All => Availability::All,
            AvailabilityArg::Available => Availability::Available,
            AvailabilityArg::Unavailable => Availability::Unavailable,
        }
    }
}

fn options(args: &Args) -> Result<ClientOptions> {
    let mut options = ClientOptions::from_env()?;
    if let Some(url) = &args.api_url {
        options = options.with_base_url(url);
    }
    if let Some(secs) = args.timeout {
        options = options.with_request_timeout(Some(Duration::from_secs(secs)));
    }
    let path = args
        .credentials
        .clone()
        .or_else(|| options.credentials_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_FILE));
    Ok(options.with_credentials_path(path))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let args = Args::parse();
    let advoqat = Advoqat::new_with_options(options(&args)?)?;
    debug!("using backend {}", advoqat.client().base_url());

    match args.command {
        Command::Login { email, password } => {
            let credentials = LoginCredentials::new(email, password);
            match advoqat.auth().login(&credentials).await.into_result()? {
                Some(user) => println!("Signed in as {} ({})", user.email, user.role.as_str()),
                None => println!("Signed in"),
            }
        }
        Command::Logout => {
            advoqat.session().logout();
            println!("Signed out");
        }
        Command::Whoami => {
            advoqat.session().restore();
            if !advoqat.session().revalidate().await {
                eprintln!("Not signed in");
                std::process::exit(1);
            }
            if let Some(user) = advoqat.session().user() {
                println!(
                    "[{}] {} <{}> {}",
                    view::initials(Some(user.name.as_str()), Placeholder::User),
                    view::or_na(Some(user.name.as_str())),
                    user.email,
                    view::role_label(&UserRole::from(user.role.as_str())),
                );
            }
        }
        Command::Health => {
            let healthy = advoqat.health().await;
            println!("{}", if healthy { "ok" } else { "unreachable" });
            if !healthy {
                std::process::exit(1);
            }
        }
        Command::Stats => {
            let stats = advoqat.dashboard().get_stats().await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Users { query, role } => {
            let users = advoqat.users().get_all().await?;
            let filter = UserFilter {
                query,
                role: role.map(UserRole::from),
            };
            for user in filter.apply(&users) {
                println!(
                    "{:>6}  {:<28} {:<32} {}",
                    user.id,
                    view::or_na(user.name.as_deref()),
                    view::or_na(user.email.as_deref()),
                    Badge::role(&user.role()).label,
                );
            }
            for (role, count) in filters::role_counts(&users) {
                println!("{}: {}", role, count);
            }
        }
        Command::Barristers { query, status } => {
            let barristers = advoqat.barristers().get_all().await?;
            let filter = BarristerFilter {
                query,
                status: status.map(VerificationStatus::from),
            };
            for barrister in filter.apply(&barristers) {
                println!(
                    "{:>6}  {:<28} {:<10} {:>5.0}%",
                    barrister.id,
                    view::or_na(barrister.name()),
                    Badge::verification(&barrister.verification_status).label,
                    barrister.completion_percent(),
                );
            }
            let stats = filters::barrister_stats(&barristers);
            println!(
                "total {} / verified {} / pending {} / rejected {}",
                stats.total, stats.verified, stats.pending, stats.rejected
            );
        }
        Command::Freelancers { query, availability } => {
            let freelancers = advoqat.freelancers().get_all().await?;
            let filter = FreelancerFilter {
                query,
                availability: availability.into(),
            };
            for freelancer in filter.apply(&freelancers) {
                println!(
                    "{:>6}  {:<28} {:<12} score {:<5} earned {}",
                    freelancer.id,
                    view::or_na(freelancer.name()),
                    Badge::availability(freelancer.is_available()).label,
                    view::format_score(freelancer.performance_score()),
                    view::format_earnings(freelancer.total_earnings()),
                );
            }
            let stats = filters::freelancer_stats(&freelancers);
            println!(
                "total {} / available {} / unavailable {} / verified {}",
                stats.total, stats.available, stats.unavailable, stats.verified
            );
        }
        Command::Cases {
            query,
            status,
            priority,
        } => {
            let cases = advoqat.cases().get_all().await?;
            let filter = CaseFilter {
                query,
                status: status.map(CaseStatus::from),
                priority: priority.map(Priority::from),
            };
            for case in filter.apply(&cases) {
                let priority = Badge::priority(case.priority.as_ref())
                    .map(|b| b.label)
                    .unwrap_or_else(|| view::NOT_AVAILABLE.to_string());
                println!(
                    "{:>6}  {:<32} {:<10} {:<8} {}",
                    case.id,
                    case.title,
                    Badge::case_status(&case.status).label,
                    priority,
                    view::or_na(case.client_name()),
                );
            }
            let stats = filters::case_stats(&cases);
            println!(
                "total {} / active {} / pending {} / completed {}",
                stats.total, stats.active, stats.pending, stats.completed
            );
        }
        Command::Documents {
            query,
            document_type,
        } => {
            let documents = advoqat.documents().get_all().await?;
            let filter = DocumentFilter {
                query,
                document_type,
            };
            for document in filter.apply(&documents) {
                println!(
                    "{:>6}  {:<20} {:<28} {}",
                    document.id,
                    view::or_na(document.document_type.as_deref()),
                    view::or_na(document.user_name()),
                    view::or_na(document.case_title()),
                );
            }
            println!(
                "types: {} / this month: {}",
                filters::document_types(&documents).join(", "),
                filters::documents_this_month(&documents, chrono::Utc::now()),
            );
        }
    }

    Ok(())
}
