use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    drive_submission, AnalysisBackend, ControllerKind, FinanceApiClient, InsightController,
    QueryController, RequestController, TableQaController, TableQuestion, UploadController,
};
use shared::{domain::RequestState, error::ApiError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "finqa", about = "Ask questions about uploaded financial documents")]
struct Args {
    /// Base URL of the analysis API. Overrides finqa.toml and the environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Print one JSON object instead of plain text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask a question about the indexed documents.
    Ask { question: String },
    /// Generate financial insights for a question.
    Insights { question: String },
    /// Upload a document for indexing.
    Upload { path: PathBuf },
    /// Ask a question about a single uploaded table file.
    TableQa {
        #[arg(long)]
        file_path: String,
        #[arg(long)]
        question: String,
    },
    /// Check that the API is reachable.
    Health,
}

/// What a finished command prints and how the process exits.
#[derive(Debug)]
struct Outcome {
    state: RequestState,
    text: String,
    error: Option<ApiError>,
}

impl Outcome {
    fn from_controller<K: ControllerKind>(controller: &RequestController<K>) -> Self {
        Self {
            state: controller.state(),
            text: controller.result_text().to_string(),
            error: controller.last_failure().map(|failure| failure.to_api_error()),
        }
    }

    fn exit_code(&self) -> i32 {
        self.error
            .as_ref()
            .map(|err| err.code.exit_code())
            .unwrap_or(0)
    }

    fn render(&self, json: bool) -> String {
        if json {
            serde_json::json!({
                "state": self.state,
                "result": self.text,
                "error": self.error,
            })
            .to_string()
        } else {
            self.text.clone()
        }
    }
}

async fn run_controller<K: ControllerKind>(
    mut controller: RequestController<K>,
    backend: &dyn AnalysisBackend,
) -> Result<Outcome> {
    if drive_submission(&mut controller, backend).await.is_none() {
        bail!("{}: input rejected, nothing was sent", K::NAME);
    }
    Ok(Outcome::from_controller(&controller))
}

async fn run(command: Command, backend: &dyn AnalysisBackend) -> Result<Outcome> {
    match command {
        Command::Ask { question } => {
            let mut controller = QueryController::new();
            controller.set_input(question);
            run_controller(controller, backend).await
        }
        Command::Insights { question } => {
            let mut controller = InsightController::new();
            controller.set_input(question);
            run_controller(controller, backend).await
        }
        Command::Upload { path } => {
            let mut controller = UploadController::new();
            controller.set_input(Some(path));
            run_controller(controller, backend).await
        }
        Command::TableQa {
            file_path,
            question,
        } => {
            let mut controller = TableQaController::new();
            controller.set_input(TableQuestion {
                file_path,
                question,
            });
            run_controller(controller, backend).await
        }
        Command::Health => Ok(match backend.health().await {
            Ok(health) => Outcome {
                state: RequestState::Succeeded,
                text: health.message.unwrap_or_else(|| "API online".to_string()),
                error: None,
            },
            Err(failure) => Outcome {
                state: RequestState::Failed,
                text: "API unreachable".to_string(),
                error: Some(failure.to_api_error()),
            },
        }),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = client_core::load_settings()
        .context("failed to load client settings")?
        .with_api_url_override(args.api_url)
        .context("invalid --api-url")?;
    let client = FinanceApiClient::new(&settings).context("failed to build API client")?;

    let outcome = run(args.command, &client).await?;
    println!("{}", outcome.render(args.json));
    if let Some(err) = &outcome.error {
        if !args.json {
            eprintln!("{err}");
        }
    }

    let code = outcome.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use client_core::RequestFailure;
    use shared::error::ErrorCode;

    use super::*;

    #[test]
    fn table_qa_flags_parse() {
        let args = Args::try_parse_from([
            "finqa",
            "--json",
            "table-qa",
            "--file-path",
            "./uploads/t.csv",
            "--question",
            "total?",
        ])
        .expect("args");
        assert!(args.json);
        assert!(matches!(
            args.command,
            Command::TableQa { ref file_path, .. } if file_path == "./uploads/t.csv"
        ));
    }

    #[test]
    fn failed_upload_exits_with_transport_code() {
        let mut controller = UploadController::new();
        controller.set_input(Some(PathBuf::from("report.pdf")));
        let submission = controller.begin_submit().expect("submission");
        controller.complete(
            submission.sequence,
            Err(RequestFailure::Transport {
                endpoint: "/upload",
                message: "connection refused".to_string(),
            }),
        );

        let outcome = Outcome::from_controller(&controller);
        assert_eq!(outcome.state, RequestState::Idle);
        assert_eq!(outcome.text, "Error uploading file.");
        assert_eq!(outcome.exit_code(), ErrorCode::Unreachable.exit_code());
    }

    #[test]
    fn json_rendering_carries_state_and_result() {
        let outcome = Outcome {
            state: RequestState::Succeeded,
            text: "Q2 revenue was $4.2M".to_string(),
            error: None,
        };
        let value: serde_json::Value =
            serde_json::from_str(&outcome.render(true)).expect("json");
        assert_eq!(value["state"], "succeeded");
        assert_eq!(value["result"], "Q2 revenue was $4.2M");
        assert!(value["error"].is_null());
        assert_eq!(outcome.exit_code(), 0);
    }
}
