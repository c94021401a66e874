#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use readiness_harness::controller::{AppController, AssessmentOutcome};
use readiness_harness::relay::{self, RelayState};
use readiness_harness::{
    catalog, score, FlowState, OpenRouterReportClient, PlaceholderReportClient, RelayReportClient,
    ReportClient, Response,
};

#[derive(Parser)]
#[command(name = "readiness", version, about = "AI cost readiness assessment CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the assessment dimensions and scoring options
    Dimensions,
    /// Run the questionnaire interactively and generate a report
    Assess {
        /// Write the full outcome JSON here in addition to the terminal summary
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        wiring: WiringArgs,
    },
    /// Generate a report from a responses JSON file (array of {dimensionId, score})
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        wiring: WiringArgs,
    },
    /// Serve the relay endpoint that keeps the provider credential server-side
    Serve {
        #[arg(long, default_value = "127.0.0.1:8787")]
        bind: SocketAddr,
    },
}

/// How the report client is wired. Exactly one implementation is selected
/// here; nothing downstream branches on provider identity.
#[derive(Args)]
struct WiringArgs {
    /// Use the development placeholder report instead of a live provider
    #[arg(long, conflicts_with = "relay")]
    placeholder: bool,
    /// Post to a relay endpoint (full URL) instead of calling the provider directly
    #[arg(long)]
    relay: Option<String>,
    /// Override the provider model (direct wiring only)
    #[arg(long, conflicts_with_all = ["placeholder", "relay"])]
    model: Option<String>,
}

impl WiringArgs {
    fn build_client(&self) -> Result<Arc<dyn ReportClient>, Box<dyn std::error::Error>> {
        if self.placeholder {
            return Ok(Arc::new(PlaceholderReportClient));
        }
        if let Some(endpoint) = &self.relay {
            return Ok(Arc::new(RelayReportClient::new(endpoint.clone())?));
        }
        let mut client = OpenRouterReportClient::from_env()?;
        if let Some(model) = &self.model {
            client = client.with_model(model.clone());
        }
        Ok(Arc::new(client))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "readiness_harness=info,readiness=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dimensions => {
            print_dimensions();
        }
        Commands::Assess { out, wiring } => {
            let client = wiring.build_client()?;
            let outcome = run_interactive_assessment(client.as_ref()).await?;
            if let Some(outcome) = outcome {
                print_outcome(&outcome);
                if let Some(path) = out {
                    write_outcome(&path, &outcome)?;
                }
            }
        }
        Commands::Report { input, out, wiring } => {
            let responses: Vec<Response> = serde_json::from_reader(File::open(&input)?)?;
            let client = wiring.build_client()?;
            let report = client.generate(&responses).await?;
            let outcome = AssessmentOutcome {
                scorecard: score::scorecard(&responses),
                chart_series: score::chart_series(&responses),
                report,
            };
            print_outcome(&outcome);
            if let Some(path) = out {
                write_outcome(&path, &outcome)?;
            }
        }
        Commands::Serve { bind } => {
            let state = match OpenRouterReportClient::from_env() {
                Ok(client) => RelayState::new(Arc::new(client)),
                Err(err) => {
                    tracing::warn!(error = %err, "relay starting without a provider credential");
                    RelayState::misconfigured()
                }
            };
            relay::serve(bind, state).await?;
        }
    }

    Ok(())
}

fn print_dimensions() {
    for (i, dim) in catalog::DIMENSIONS.iter().enumerate() {
        println!(
            "{:2}. [{}] {} — {}",
            i + 1,
            dim.category.as_str(),
            dim.label,
            dim.question
        );
    }
    println!();
    for opt in &catalog::OPTIONS {
        println!("{:2} = {} ({})", opt.value, opt.label, opt.description);
    }
}

/// Drive the controller from stdin. Returns `None` when the user quits early
/// or report generation fails (the failure message is printed).
async fn run_interactive_assessment(
    client: &dyn ReportClient,
) -> Result<Option<AssessmentOutcome>, Box<dyn std::error::Error>> {
    let mut controller = AppController::new();
    controller.start_assessment()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(flow) = controller.flow() else {
            break;
        };
        let FlowState::AtDimension(index) = flow.state() else {
            break;
        };
        let dim = catalog::DIMENSIONS[index];

        println!();
        println!(
            "[{}/{}] {} ({})",
            index + 1,
            catalog::DIMENSION_COUNT,
            dim.label,
            dim.category.as_str()
        );
        println!("{}", dim.question);
        for opt in &catalog::OPTIONS {
            println!("  {:2} = {}", opt.value, opt.label);
        }
        if index > 0 {
            println!("   p = previous question");
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("input closed; assessment abandoned");
            return Ok(None);
        };
        let input = line?.trim().to_lowercase();

        match input.as_str() {
            "p" => {
                if let Err(err) = controller.previous() {
                    println!("{err}");
                }
            }
            "q" => {
                println!("assessment abandoned");
                return Ok(None);
            }
            _ => match input.parse::<u8>() {
                Ok(value) => {
                    if let Err(err) = controller.select(value) {
                        println!("{err}");
                    }
                }
                Err(_) => println!("enter 0, 5, 10, p or q"),
            },
        }
    }

    println!();
    println!("Analyzing readiness...");
    controller.generate_report(client).await?;

    if let Some(message) = controller.last_error() {
        println!("{message}");
        return Ok(None);
    }
    Ok(controller.outcome())
}

fn print_outcome(outcome: &AssessmentOutcome) {
    println!();
    println!(
        "Overall score: {}% — {}",
        outcome.scorecard.score_percentage, outcome.report.overall_readiness
    );
    println!();
    for point in &outcome.chart_series {
        println!("  {:24} {:2}/{}", point.label, point.value, point.max);
    }
    println!();
    println!("{}", outcome.report.executive_summary);
    if !outcome.report.key_strengths.is_empty() {
        println!();
        println!("Strengths:");
        for s in &outcome.report.key_strengths {
            println!("  + {s}");
        }
    }
    if !outcome.report.critical_gaps.is_empty() {
        println!();
        println!("Gaps:");
        for g in &outcome.report.critical_gaps {
            println!("  - {g}");
        }
    }
    if !outcome.report.roadmap.is_empty() {
        println!();
        println!("Roadmap:");
        for step in &outcome.report.roadmap {
            println!("  [{}] {} (impact: {})", step.phase, step.action, step.impact);
        }
    }
}

fn write_outcome(path: &PathBuf, outcome: &AssessmentOutcome) -> io::Result<()> {
    let mut file = File::create(path)?;
    let json = serde_json::to_string_pretty(outcome)?;
    writeln!(file, "{json}")?;
    Ok(())
}
