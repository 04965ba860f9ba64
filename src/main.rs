use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scenario_session_core::{
    classify,
    config::Config,
    engine::EngineClient,
    session::{Phase, SessionController, TurnOutcome},
    RiskTier,
};

#[derive(Parser)]
#[command(name = "scenario-session", version, about = "Scenario session runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the scenario catalog
    List,
    /// Run a scenario interactively on stdin/stdout
    Run {
        /// Scenario identifier from the catalog
        scenario_id: String,
    },
    /// Classify a query for legal-advice risk
    Classify {
        /// Query text to classify
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Classification needs no configuration or network.
    if let Command::Classify { query } = &cli.command {
        let result = classify(query);
        match result.tier {
            RiskTier::None => println!("none"),
            tier => println!("{} (rule: {})", tier, result.rule.unwrap_or("-")),
        }
        return Ok(());
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let engine = match EngineClient::new(&config.engine, config.request.clone()) {
        Ok(c) => {
            info!(base_url = %config.engine.base_url, "Engine client initialized");
            c
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize engine client");
            return Err(e.into());
        }
    };

    let controller = SessionController::new(engine, &config.rewards);

    match cli.command {
        Command::List => {
            let scenarios = controller.available_scenarios().await?;
            for scenario in scenarios {
                println!(
                    "{:<30} {} (difficulty {}/5)",
                    scenario.id, scenario.title, scenario.difficulty
                );
            }
        }
        Command::Run { scenario_id } => {
            run_session(&controller, &scenario_id).await?;
        }
        Command::Classify { .. } => unreachable!(),
    }

    Ok(())
}

async fn run_session(
    controller: &SessionController<EngineClient>,
    scenario_id: &str,
) -> anyhow::Result<()> {
    use std::io::Write as _;
    use tokio::io::{AsyncBufReadExt, BufReader};

    controller.start(scenario_id).await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while controller.phase() == Phase::Active {
        let snapshot = controller.snapshot();
        let session = match snapshot.session {
            Some(s) => s,
            None => break,
        };

        println!("\n== {} ==", session.current_node.title);
        println!("{}", session.current_node.description);

        // A terminal or choiceless node ends the session; the engine should
        // have reported completion, so there is nothing left to submit.
        if session.current_node.is_end() {
            println!("(this scenario has reached an end node)");
            controller.reset();
            break;
        }

        for (i, choice) in session.current_node.choices.iter().enumerate() {
            println!("  [{}] {}", i, choice.text);
        }
        println!("score: {}", session.running_score);
        print!("choice> ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                controller.reset();
                break;
            }
        };

        let index: usize = match line.trim().parse() {
            Ok(i) => i,
            Err(_) => {
                println!("enter a choice number");
                continue;
            }
        };

        match controller.submit_choice(index).await {
            Ok(TurnOutcome::Continued(turn)) => {
                println!("\n{}", turn.feedback_text);
                if !turn.consequence_text.is_empty() {
                    println!("{}", turn.consequence_text);
                }
                if let Some(reward) = controller.current_reward() {
                    println!("+{} points", reward.points);
                }
            }
            Ok(TurnOutcome::Completed(artifact)) => {
                println!("\n== Scenario complete ==");
                println!(
                    "final score: {} ({:.0}%)",
                    artifact.final_score, artifact.final_score_percentage
                );
                println!("elapsed: {}s", artifact.elapsed_seconds);
                println!("\n{}", artifact.outcome_narrative);
                println!("\n{}", artifact.legal_explanation);
                if artifact.total_xp_earned > 0 {
                    println!("\n+{} XP", artifact.total_xp_earned);
                }
            }
            Err(e) => {
                // Transient failures are reported and the caller (here, the
                // user) decides whether to retry. State is unchanged.
                println!("submission failed: {}", e);
            }
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        scenario_session_core::config::LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        scenario_session_core::config::LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
