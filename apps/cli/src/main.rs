use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hdp_client::{
    load_settings, FormController, FormState, HttpBackend, InputEdit, QuickStartBackend,
    SelectedProgramFile,
};
use hdp_shared::{domain::Visibility, status::StatusPhase};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Overrides the registry service base url.
    #[arg(long, global = true)]
    registry_url: Option<String>,
    /// Overrides the batch query service base url.
    #[arg(long, global = true)]
    batch_query_url: Option<String>,
    /// Prints the final form state as JSON.
    #[arg(long, global = true)]
    show_state: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Uploads a program file to the registry.
    Upload { file: PathBuf },
    /// Submits a batch query for a previously uploaded program.
    Submit {
        #[arg(long, default_value = "")]
        api_key: String,
        #[arg(long, default_value = "")]
        program_hash: String,
        /// Task input as `private:VALUE`, `public:VALUE`, or a bare private VALUE.
        #[arg(long = "input")]
        inputs: Vec<String>,
    },
}

/// Splits a raw `--input` into its edits. A prefix that is not a visibility
/// is kept as part of a private value.
fn input_edits(raw: &str) -> [InputEdit; 2] {
    let (visibility, value) = match raw.split_once(':') {
        Some((prefix, rest)) => match InputEdit::parse("visibility", prefix) {
            Ok(edit) => (edit, rest),
            Err(_) => (InputEdit::Visibility(Visibility::Private), raw),
        },
        None => (InputEdit::Visibility(Visibility::Private), raw),
    };
    [visibility, InputEdit::Value(value.to_string())]
}

async fn fill_inputs<B: QuickStartBackend>(
    controller: &FormController<B>,
    inputs: &[String],
) -> Result<()> {
    for (index, raw) in inputs.iter().enumerate() {
        if index > 0 {
            controller.add_input().await?;
        }
        for edit in input_edits(raw) {
            controller
                .edit_input(index, edit)
                .await
                .with_context(|| format!("invalid input #{index}: '{raw}'"))?;
        }
    }
    Ok(())
}

const REDACTED: &str = "<redacted>";

/// Form snapshot for `--show-state`, with the API key masked.
fn state_report(state: &FormState) -> Result<serde_json::Value> {
    let mut report = serde_json::to_value(state)?;
    if let Some(api_key) = report.get_mut("api_key") {
        if !state.api_key().is_empty() {
            *api_key = serde_json::Value::from(REDACTED);
        }
    }
    Ok(report)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(url) = cli.registry_url {
        settings.registry_url = url;
    }
    if let Some(url) = cli.batch_query_url {
        settings.batch_query_url = url;
    }
    let endpoints = settings.endpoints()?;
    let controller = FormController::with_state(
        HttpBackend::new(endpoints),
        FormState::new().with_input_limit(settings.max_input_entries),
    );

    let (message, phase) = match cli.command {
        Command::Upload { file } => {
            let selected = SelectedProgramFile::from_path(&file);
            println!("Selected file: {}", selected.file_name);
            let status = controller.upload_program(selected).await?;
            (status.message(), status.phase())
        }
        Command::Submit {
            api_key,
            program_hash,
            inputs,
        } => {
            tracing::debug!(has_api_key = !api_key.is_empty(), "preparing batch query");
            controller.set_api_key(api_key).await?;
            controller.set_program_hash(program_hash).await?;
            fill_inputs(&controller, &inputs).await?;
            let status = controller.submit_batch_query().await?;
            (status.message(), status.phase())
        }
    };

    println!("{message}");
    if cli.show_state {
        let report = state_report(&controller.snapshot().await)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if let StatusPhase::Failure(kind) = phase {
        bail!("operation did not succeed ({kind:?})");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_prefix_selects_visibility() {
        assert_eq!(
            input_edits("public:42"),
            [
                InputEdit::Visibility(Visibility::Public),
                InputEdit::Value("42".to_string())
            ]
        );
    }

    #[test]
    fn bare_or_unknown_prefix_is_private_value() {
        assert_eq!(
            input_edits("7"),
            [
                InputEdit::Visibility(Visibility::Private),
                InputEdit::Value("7".to_string())
            ]
        );
        assert_eq!(
            input_edits("0x1:ff"),
            [
                InputEdit::Visibility(Visibility::Private),
                InputEdit::Value("0x1:ff".to_string())
            ]
        );
    }

    #[test]
    fn submit_flags_parse_repeated_inputs() {
        let cli = Cli::try_parse_from([
            "hdp_cli",
            "submit",
            "--api-key",
            "k1",
            "--program-hash",
            "0xabc",
            "--input",
            "private:5",
            "--input",
            "public:6",
        ])
        .expect("parse");

        match cli.command {
            Command::Submit {
                api_key,
                program_hash,
                inputs,
            } => {
                assert_eq!(api_key, "k1");
                assert_eq!(program_hash, "0xabc");
                assert_eq!(inputs, vec!["private:5", "public:6"]);
            }
            Command::Upload { .. } => panic!("expected submit"),
        }
    }

    #[test]
    fn state_report_masks_api_key() {
        let mut state = FormState::new();
        state
            .apply(hdp_client::FormEvent::ApiKeyChanged("secret-key".to_string()))
            .expect("api key");
        state
            .apply(hdp_client::FormEvent::ProgramHashChanged("0xabc".to_string()))
            .expect("program hash");

        let report = state_report(&state).expect("report");
        let printed = report.to_string();

        assert!(!printed.contains("secret-key"));
        assert_eq!(report["api_key"], REDACTED);
        assert_eq!(report["program_hash"], "0xabc");
    }

    #[test]
    fn state_report_leaves_missing_api_key_empty() {
        let report = state_report(&FormState::new()).expect("report");
        assert_eq!(report["api_key"], "");
    }

    #[tokio::test]
    async fn filled_inputs_keep_command_line_order() {
        let endpoints = hdp_client::Endpoints::from_bases("http://127.0.0.1:9", "http://127.0.0.1:9")
            .expect("endpoints");
        let controller = FormController::new(HttpBackend::new(endpoints));

        fill_inputs(
            &controller,
            &["public:a".to_string(), "b".to_string()],
        )
        .await
        .expect("fill");

        let state = controller.snapshot().await;
        let values: Vec<_> = state
            .inputs()
            .iter()
            .map(|entry| (entry.visibility, entry.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![(Visibility::Public, "a"), (Visibility::Private, "b")]
        );
    }
}
