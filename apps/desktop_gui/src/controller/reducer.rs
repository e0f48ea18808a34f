//! Applies UI actions and backend events to the form state.

use crossbeam_channel::Sender;
use hdp_client::{Effect, FormEvent, FormState};
use hdp_shared::error::ServiceOutcome;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

/// Applies a user action. Any network work it yields is queued on `cmd_tx`;
/// if the queue refuses it the invocation settles as a transport failure so
/// its status never stays pending.
pub fn apply_form_event(
    form: &mut FormState,
    event: FormEvent,
    cmd_tx: &Sender<BackendCommand>,
    banner: &mut String,
) {
    let effect = match form.apply(event) {
        Ok(Some(effect)) => effect,
        Ok(None) => return,
        Err(err) => {
            *banner = UiError::from_message(UiErrorContext::EditInputs, err.to_string()).banner();
            return;
        }
    };

    let settled_on_failure = match &effect {
        Effect::Upload { ticket, .. } => FormEvent::UploadSettled {
            ticket: *ticket,
            outcome: ServiceOutcome::TransportFailed,
        },
        Effect::SubmitBatchQuery { ticket, .. } => FormEvent::SubmitSettled {
            ticket: *ticket,
            outcome: ServiceOutcome::TransportFailed,
        },
    };
    if !dispatch_backend_command(cmd_tx, effect.into(), banner) {
        let _ = form.apply(settled_on_failure);
    }
}

pub fn apply_ui_event(form: &mut FormState, event: UiEvent, banner: &mut String) {
    match event {
        UiEvent::Info(message) => {
            tracing::info!("{message}");
        }
        UiEvent::Settled(settled) => {
            if let Err(err) = form.apply(settled) {
                tracing::warn!("failed to apply settlement: {err}");
                *banner = UiError::from_message(UiErrorContext::General, err.to_string()).banner();
            }
        }
        UiEvent::Error(err) => {
            tracing::error!(context = ?err.context(), category = ?err.category(), "{}", err.message());
            *banner = err.banner();
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use hdp_client::{InvocationTicket, SelectedProgramFile};
    use hdp_shared::status::{RequestStatus, UploadStatus};

    use super::*;
    use crate::controller::events::UiErrorCategory;

    #[test]
    fn selecting_program_queues_upload_command() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut form = FormState::new();
        let mut banner = String::new();

        apply_form_event(
            &mut form,
            FormEvent::ProgramSelected(SelectedProgramFile::from_path("module.json")),
            &cmd_tx,
            &mut banner,
        );

        assert_eq!(form.upload_status(), Some(UploadStatus::Uploading));
        match cmd_rx.try_recv().expect("queued command") {
            BackendCommand::UploadProgram { ticket, file } => {
                assert_eq!(ticket, InvocationTicket(1));
                assert_eq!(file.file_name, "module.json");
            }
            BackendCommand::SubmitBatchQuery { .. } => panic!("expected upload command"),
        }
        assert!(banner.is_empty());
    }

    #[test]
    fn validation_failure_queues_nothing() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut form = FormState::new();
        let mut banner = String::new();

        apply_form_event(&mut form, FormEvent::SubmitRequested, &cmd_tx, &mut banner);

        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(form.request_status(), Some(RequestStatus::MissingApiKey));
    }

    #[test]
    fn disconnected_worker_settles_request_as_error() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let mut form = FormState::new();
        let mut banner = String::new();
        for event in [
            FormEvent::ApiKeyChanged("k".to_string()),
            FormEvent::ProgramHashChanged("h".to_string()),
            FormEvent::SubmitRequested,
        ] {
            apply_form_event(&mut form, event, &cmd_tx, &mut banner);
        }

        assert_eq!(form.request_status(), Some(RequestStatus::Errored));
        assert!(banner.contains("disconnected"));
    }

    #[test]
    fn rejected_edit_sets_input_banner() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut form = FormState::new();
        let mut banner = String::new();

        apply_form_event(
            &mut form,
            FormEvent::InputEdited {
                index: 9,
                edit: hdp_client::InputEdit::Value("x".to_string()),
            },
            &cmd_tx,
            &mut banner,
        );

        assert!(banner.starts_with("Input:"), "unexpected banner: {banner}");
        assert_eq!(form.inputs().len(), 1);
    }

    #[test]
    fn settlement_event_updates_status() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut form = FormState::new();
        let mut banner = String::new();
        apply_form_event(
            &mut form,
            FormEvent::ProgramSelected(SelectedProgramFile::from_path("p.json")),
            &cmd_tx,
            &mut banner,
        );

        apply_ui_event(
            &mut form,
            UiEvent::Settled(FormEvent::UploadSettled {
                ticket: InvocationTicket(1),
                outcome: ServiceOutcome::Succeeded,
            }),
            &mut banner,
        );

        assert_eq!(
            form.upload_status().map(UploadStatus::message),
            Some("Program uploaded successfully!")
        );
    }

    #[test]
    fn startup_errors_are_classified_as_startup() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "backend worker startup failure: invalid service base url",
        );
        assert_eq!(err.category(), UiErrorCategory::Startup);

        let err = UiError::from_message(UiErrorContext::General, "connection refused");
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }
}
