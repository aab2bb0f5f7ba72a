use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

mod api;
mod chat;
mod config;
mod error;
mod insights;
mod logging;
mod models;
mod prediction;
mod report;
mod resources;
mod risk;
mod stress;

use api::SupportApi;
use chat::ChatSession;
use models::{PredictionForm, Sender};
use prediction::PredictionPage;
use stress::StressAnswers;

#[derive(Parser)]
#[command(name = "student-support")]
#[command(about = "Dropout risk prediction and counseling client", long_about = None)]
struct Cli {
    /// Support service origin (overrides SUPPORT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a stress score from the five-question check-in
    Stress {
        /// Five answers from 1 to 10; prompts for them when omitted
        #[arg(value_delimiter = ',')]
        answers: Vec<u8>,
    },
    /// Request a dropout risk prediction for one student
    Predict {
        #[arg(long)]
        name: String,
        #[arg(long)]
        attendance: String,
        #[arg(long)]
        gpa: String,
        #[arg(long)]
        participation: String,
        /// Stress level from 1 to 10
        #[arg(long, conflicts_with = "stress_answers")]
        stress: Option<String>,
        /// Five check-in answers used to compute the stress level
        #[arg(long, value_delimiter = ',')]
        stress_answers: Vec<u8>,
        #[arg(long)]
        family_income: String,
        /// Write a markdown report of the result
        #[arg(long = "report")]
        report_out: Option<PathBuf>,
    },
    /// Score every student in a CSV file
    Batch {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Talk to the counseling assistant
    Chat {
        /// Send a single message and exit
        #[arg(long)]
        message: Option<String>,
    },
    /// List assessments stored by the service
    Students,
    /// Check that the service is reachable
    Health,
    /// Browse the resource library
    Resources {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long = "type", default_value = "all")]
        kind: String,
        /// Only featured resources
        #[arg(long)]
        featured: bool,
    },
    /// Show a fixed analytics report
    Reports {
        /// Report id; lists the available reports when omitted
        id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let settings = config::install(config::Settings::from_env()?.with_api_url(cli.api_url));
    let api = SupportApi::new(settings.api_url.clone()).context("failed to build HTTP client")?;

    match cli.command {
        Commands::Stress { answers } => {
            let mut collected = if answers.is_empty() {
                prompt_stress_answers().await?
            } else {
                StressAnswers::from_values(&answers)?
            };

            match collected.take_score() {
                Some(score) => println!("Stress score: {score:.1}/10"),
                None => println!(
                    "Answer all {} questions to compute a stress score ({} answered).",
                    stress::QUESTION_COUNT,
                    collected.answered()
                ),
            }
        }
        Commands::Predict {
            name,
            attendance,
            gpa,
            participation,
            stress,
            stress_answers,
            family_income,
            report_out,
        } => {
            let mut form = PredictionForm {
                name,
                attendance,
                gpa,
                participation,
                stress: stress.unwrap_or_default(),
                family_income,
            };

            if !stress_answers.is_empty() {
                let mut answers = StressAnswers::from_values(&stress_answers)?;
                let score = answers
                    .take_score()
                    .context("--stress-answers needs all five answers")?;
                form.set_stress_score(score);
            }

            let mut page = PredictionPage::new();
            page.submit(&api, &form).await?;

            if let Some(error) = &page.error {
                println!("{error}");
                return Ok(());
            }

            if let (Some(result), Some(scheme)) = (&page.result, page.scheme()) {
                println!(
                    "{} {} risk (score {:.0}%, {})",
                    scheme.icon.glyph(),
                    result.risk_level.label(),
                    result.risk_score,
                    scheme.color.name()
                );
                for recommendation in &result.recommendations {
                    println!("- {recommendation}");
                }

                if let Some(out) = report_out {
                    let request = form.parse()?;
                    let text =
                        report::build_prediction_report(&request, result, Utc::now().date_naive());
                    std::fs::write(&out, text)?;
                    println!("Report written to {}.", out.display());
                }
            }
        }
        Commands::Batch { csv, out } => {
            let forms = prediction::load_forms(&csv)
                .with_context(|| format!("failed to read {}", csv.display()))?;
            let outcomes = prediction::run_batch(&api, &forms).await;
            let text = report::build_batch_report(&outcomes, Utc::now().date_naive());

            match out {
                Some(out) => {
                    std::fs::write(&out, text)?;
                    println!("Report written to {}.", out.display());
                }
                None => print!("{text}"),
            }
        }
        Commands::Chat { message } => {
            let mut session = ChatSession::new(settings.chat_delay);
            tracing::info!(session = %session.id(), api = api.base_url(), "chat session started");
            print_message(&session.messages()[0]);

            match message {
                Some(message) => {
                    session.set_input(message);
                    if let Some(reply) = session.send(&api).await {
                        print_message(reply);
                    }
                }
                None => run_chat_loop(&api, &mut session).await?,
            }
        }
        Commands::Students => {
            let students = api.students().await.context("failed to list students")?;

            if students.is_empty() {
                println!("No assessments stored yet.");
                return Ok(());
            }

            for student in students {
                println!(
                    "- #{} {} {} ({:.0}%) attendance {:.0}%, gpa {:.1}, participation {:.0}, stress {:.1}, income {:.0} at {}",
                    student.id,
                    student.name,
                    student.risk_level.label(),
                    student.risk_score,
                    student.attendance,
                    student.gpa,
                    student.participation,
                    student.stress,
                    student.family_income,
                    student.timestamp
                );
            }
        }
        Commands::Health => {
            let health = api
                .health()
                .await
                .with_context(|| format!("service at {} is unreachable", api.base_url()))?;
            println!("{}: {} ({})", health.status, health.message, health.timestamp);
        }
        Commands::Resources {
            search,
            category,
            kind,
            featured,
        } => {
            let filter = resources::ResourceFilter {
                search,
                category: Some(category),
                kind: Some(kind),
            };
            let found: Vec<&resources::Resource> = if featured {
                resources::featured(&resources::LIBRARY)
                    .into_iter()
                    .filter(|r| filter.matches(r))
                    .collect()
            } else {
                resources::filter(&resources::LIBRARY, &filter)
            };

            if found.is_empty() {
                println!("No resources found. Try adjusting your search terms or filters.");
                println!(
                    "Types: {}",
                    resources::KINDS.map(|(id, _)| id).join(", ")
                );
                return Ok(());
            }

            for resource in found {
                println!(
                    "- {} [{} / {}] {} ({:.1} stars, {} downloads)",
                    resource.title,
                    resources::category_name(resource.category).unwrap_or(resource.category),
                    resource.kind,
                    resource.duration,
                    resource.rating,
                    resource.downloads
                );
            }
        }
        Commands::Reports { id } => match id {
            None => {
                for report in insights::REPORTS.iter() {
                    println!("- {}: {}", report.id, report.title);
                }
            }
            Some(id) => {
                let report =
                    insights::find(&id).with_context(|| format!("unknown report {id:?}"))?;
                println!("# {}", report.title);
                println!("{}", report.summary);
                println!();
                for (label, value) in report.metrics.iter() {
                    println!("- {label}: {value}");
                }
                println!();
                for insight in report.insights.iter() {
                    println!("* {insight}");
                }
            }
        },
    }

    Ok(())
}

async fn prompt_stress_answers() -> anyhow::Result<StressAnswers> {
    let mut answers = StressAnswers::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    for (index, question) in stress::QUESTIONS.iter().enumerate() {
        println!("{}. {}", index + 1, question.prompt);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let value: u8 = line
            .trim()
            .parse()
            .with_context(|| format!("expected a number from 1 to 10, got {:?}", line.trim()))?;
        answers.set(index, value)?;
    }

    Ok(answers)
}

async fn run_chat_loop(api: &SupportApi, session: &mut ChatSession) -> anyhow::Result<()> {
    println!("Type a message, /quick to list suggestions, /quick N to use one, /quit to leave.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();

        if trimmed == "/quit" {
            break;
        }

        if trimmed == "/quick" {
            for (index, text) in chat::QUICK_RESPONSES.iter().enumerate() {
                println!("  {}. {}", index + 1, text);
            }
            continue;
        }

        let quick_choice = trimmed.strip_prefix("/quick ").map(|c| c.trim().to_string());
        match quick_choice {
            Some(choice) => {
                let picked = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .map(|index| session.choose_quick_response(index))
                    .unwrap_or(false);
                if !picked {
                    println!("No suggestion {choice}.");
                    continue;
                }
            }
            None => session.set_input(line),
        }

        if session.input().trim().is_empty() {
            continue;
        }

        println!("...");
        if let Some(reply) = session.send(api).await {
            print_message(reply);
        }
    }

    Ok(())
}

fn print_message(message: &models::ChatMessage) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "counselor",
    };
    println!("[{}] {}: {}", message.timestamp.format("%H:%M"), who, message.text);
}
