use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use nestegg::core::{
    EmploymentType, HorizonBasis, ProjectionInput, RateBasis, ReserveInput, project_accumulation,
    size_reserve,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRateBasis {
    Annual,
    Monthly,
}

impl From<CliRateBasis> for RateBasis {
    fn from(value: CliRateBasis) -> Self {
        match value {
            CliRateBasis::Annual => RateBasis::Annual,
            CliRateBasis::Monthly => RateBasis::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliHorizonBasis {
    Years,
    Months,
}

impl From<CliHorizonBasis> for HorizonBasis {
    fn from(value: CliHorizonBasis) -> Self {
        match value {
            CliHorizonBasis::Years => HorizonBasis::Years,
            CliHorizonBasis::Months => HorizonBasis::Months,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliEmploymentType {
    CivilServant,
    Salaried,
    SelfEmployed,
}

impl From<CliEmploymentType> for EmploymentType {
    fn from(value: CliEmploymentType) -> Self {
        match value {
            CliEmploymentType::CivilServant => EmploymentType::CivilServant,
            CliEmploymentType::Salaried => EmploymentType::Salaried,
            CliEmploymentType::SelfEmployed => EmploymentType::SelfEmployed,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Compound-interest projection and emergency reserve calculators"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Project savings growth month by month, printed as JSON
    Project(ProjectArgs),
    /// Size an emergency reserve, printed as JSON
    Reserve(ReserveArgs),
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[arg(long, help = "Starting balance in major units, e.g. 1000.50")]
    initial_amount: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Recurring monthly deposit in major units"
    )]
    monthly_contribution: f64,
    #[arg(long, help = "Interest rate in percent, e.g. 12 for 12%")]
    rate: f64,
    #[arg(
        long,
        value_enum,
        default_value_t = CliRateBasis::Annual,
        help = "Whether --rate is an annual or a monthly rate"
    )]
    rate_basis: CliRateBasis,
    #[arg(long, help = "Projection length in the unit chosen by --horizon-basis")]
    horizon: u32,
    #[arg(long, value_enum, default_value_t = CliHorizonBasis::Years)]
    horizon_basis: CliHorizonBasis,
}

#[derive(Args, Debug)]
struct ReserveArgs {
    #[arg(long, help = "Fixed monthly cost of living in major units")]
    fixed_monthly_cost: f64,
    #[arg(long, help = "Net monthly income in major units")]
    monthly_income: f64,
    #[arg(long, help = "Share of income saved each month, in percent")]
    savings_percent: f64,
    #[arg(
        long,
        help = "Months of fixed costs the reserve should cover; defaults per employment type"
    )]
    safety_months: Option<u32>,
    #[arg(long, value_enum, default_value_t = CliEmploymentType::Salaried)]
    employment_type: CliEmploymentType,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = nestegg::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Project(args) => {
            let input = ProjectionInput {
                initial_amount: args.initial_amount,
                monthly_contribution: args.monthly_contribution,
                nominal_rate: args.rate,
                rate_basis: args.rate_basis.into(),
                horizon: args.horizon,
                horizon_basis: args.horizon_basis.into(),
            };
            match project_accumulation(&input) {
                Ok(result) => print_json(&result),
                Err(e) => fail(&e.to_string()),
            }
        }
        Command::Reserve(args) => {
            let employment_type: EmploymentType = args.employment_type.into();
            let input = ReserveInput {
                fixed_monthly_cost: args.fixed_monthly_cost,
                monthly_income: args.monthly_income,
                savings_percent: args.savings_percent,
                safety_months: args
                    .safety_months
                    .unwrap_or_else(|| employment_type.suggested_safety_months()),
                employment_type,
            };
            match size_reserve(&input) {
                Ok(result) => print_json(&result),
                Err(e) => fail(&e.to_string()),
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("result structs serialize")
    );
}

fn fail(msg: &str) -> ! {
    eprintln!("error: {msg}");
    std::process::exit(2);
}
