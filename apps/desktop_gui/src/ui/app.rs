use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use hdp_client::{FormEvent, FormState, InputEdit, SelectedProgramFile};
use hdp_shared::domain::Visibility;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::reducer::{apply_form_event, apply_ui_event};

const START_NOW_URL: &str = "https://github.com/HerodotusDev/hdp-module-template";
const READ_DOCS_URL: &str = "https://docs.herodotus.dev/herodotus-docs/developers/data-processor";

pub struct QuickStartApp {
    form: FormState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    banner: String,
}

impl QuickStartApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, form: FormState) -> Self {
        Self {
            form,
            cmd_tx,
            ui_rx,
            banner: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.form, event, &mut self.banner);
        }
    }

    fn apply(&mut self, event: FormEvent) {
        apply_form_event(&mut self.form, event, &self.cmd_tx, &mut self.banner);
    }

    fn pick_program_file() -> Option<SelectedProgramFile> {
        // The filter is a hint; any file the dialog returns is uploaded as-is.
        rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
            .map(SelectedProgramFile::from_path)
    }

    fn show_header(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("HDP (Herodotus Data Processor)");
        });
        ui.label("1. Enhance zk-offchain compute for verifiable onchain data using zkVMs");
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                ui.hyperlink_to("Start Now", START_NOW_URL);
                ui.hyperlink_to("Read Docs", READ_DOCS_URL);
            });
        });
    }

    fn show_quick_start(&mut self, ui: &mut egui::Ui) {
        let mut events = Vec::new();
        let mut deploy_clicked = false;

        ui.heading("Quick Start");
        ui.horizontal(|ui| {
            if ui.button("Deploy Program").clicked() {
                deploy_clicked = true;
            }
            if ui.button("Send Request").clicked() {
                events.push(FormEvent::SubmitRequested);
            }
            ui.add_enabled(false, egui::Button::new("Get Status"));
            ui.add_enabled(false, egui::Button::new("Get Value"));
        });
        ui.add_space(6.0);

        let mut api_key = self.form.api_key().as_str().to_string();
        let api_key_resp = ui.add(
            egui::TextEdit::singleline(&mut api_key)
                .hint_text("Enter API Key")
                .desired_width(f32::INFINITY),
        );
        if api_key_resp.changed() {
            events.push(FormEvent::ApiKeyChanged(api_key));
        }

        let mut program_hash = self.form.program_hash().as_str().to_string();
        let hash_resp = ui.add(
            egui::TextEdit::singleline(&mut program_hash)
                .hint_text("Enter Program Hash")
                .desired_width(f32::INFINITY),
        );
        if hash_resp.changed() {
            events.push(FormEvent::ProgramHashChanged(program_hash));
        }
        ui.add_space(6.0);

        for (index, entry) in self.form.inputs().iter().enumerate() {
            ui.horizontal(|ui| {
                let mut visibility = entry.visibility;
                egui::ComboBox::from_id_salt(("input_visibility", index))
                    .selected_text(visibility.label())
                    .show_ui(ui, |ui| {
                        for option in Visibility::ALL {
                            ui.selectable_value(&mut visibility, option, option.label());
                        }
                    });
                if visibility != entry.visibility {
                    events.push(FormEvent::InputEdited {
                        index,
                        edit: InputEdit::Visibility(visibility),
                    });
                }

                let mut value = entry.value.clone();
                let value_resp = ui.add(
                    egui::TextEdit::singleline(&mut value)
                        .hint_text("Input Value")
                        .desired_width(f32::INFINITY),
                );
                if value_resp.changed() {
                    events.push(FormEvent::InputEdited {
                        index,
                        edit: InputEdit::Value(value),
                    });
                }
            });
        }
        if ui.button("Add Input").clicked() {
            events.push(FormEvent::InputAdded);
        }

        ui.add_space(8.0);
        if let Some(file) = self.form.selected_program() {
            ui.label(format!("Selected file: {}", file.file_name));
        }
        if let Some(status) = self.form.upload_status() {
            ui.label(status.message());
        }
        if let Some(status) = self.form.request_status() {
            ui.label(status.message());
        }

        if deploy_clicked {
            if let Some(file) = Self::pick_program_file() {
                events.push(FormEvent::ProgramSelected(file));
            }
        }
        for event in events {
            self.apply(event);
        }
    }
}

impl eframe::App for QuickStartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_max_width(800.0);
                Self::show_header(ui);
                ui.separator();

                if !self.banner.is_empty() {
                    let color = ui.visuals().warn_fg_color;
                    ui.horizontal(|ui| {
                        ui.colored_label(color, &self.banner);
                        if ui.small_button("Dismiss").clicked() {
                            self.banner.clear();
                        }
                    });
                }

                self.show_quick_start(ui);
            });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
