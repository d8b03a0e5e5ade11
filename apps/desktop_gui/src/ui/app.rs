use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use client_core::{score_color, FormField, FormState, SubmissionState};
use shared::domain::{AssessmentResult, LatencyRequirement, Role};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{category_label, UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{self, ViewModel};
use crate::ui::theme;

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub service_url: Option<String>,
}

pub struct AssessorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    form: FormState,
    view: ViewModel,
}

impl AssessorApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: FormState::new(),
            view: ViewModel {
                status: "Ready".to_string(),
                ..ViewModel::default()
            },
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            reducer::apply(&mut self.view, event);
        }
    }

    fn submit(&mut self) {
        if !self.form.is_submittable() {
            return;
        }
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Submit {
                inputs: self.form.inputs(),
            },
            &mut self.view.status,
        );
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.view.banner.clone() else {
            return;
        };
        egui::Frame::new()
            .fill(theme::BANNER_FILL)
            .stroke(egui::Stroke::new(1.0, theme::DANGER))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(theme::DANGER, format!("Startup: {}", banner.message()));
                    if ui.small_button("Dismiss").clicked() {
                        self.view.banner = None;
                    }
                });
            });
        ui.add_space(8.0);
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let loading = self.view.submission.is_loading();

        let mut role = self.form.role();
        egui::ComboBox::from_label("Who is building this?")
            .selected_text(role.label())
            .show_ui(ui, |ui| {
                for option in Role::ALL {
                    ui.selectable_value(&mut role, *option, option.label());
                }
            });
        if role != self.form.role() {
            self.form.set_field(FormField::Role(role));
        }

        ui.add_space(6.0);
        ui.label("Tech stack");
        let mut stack = self.form.stack().to_string();
        let stack_edit = egui::TextEdit::singleline(&mut stack)
            .hint_text("e.g. Node, Postgres")
            .desired_width(f32::INFINITY);
        if ui.add(stack_edit).changed() {
            self.form.set_field(FormField::Stack(stack));
        }

        ui.add_space(6.0);
        ui.label("The idea");
        let mut idea = self.form.idea_description().to_string();
        let idea_edit = egui::TextEdit::multiline(&mut idea)
            .hint_text("e.g. Add a Kubernetes cluster for a single cron job")
            .desired_rows(4)
            .desired_width(f32::INFINITY);
        if ui.add(idea_edit).changed() {
            self.form.set_field(FormField::IdeaDescription(idea));
        }

        ui.add_space(6.0);
        let mut latency = self.form.latency_requirement();
        egui::ComboBox::from_label("Latency requirement")
            .selected_text(latency.label())
            .show_ui(ui, |ui| {
                for option in LatencyRequirement::ALL {
                    ui.selectable_value(&mut latency, *option, option.label());
                }
            });
        if latency != self.form.latency_requirement() {
            self.form.set_field(FormField::LatencyRequirement(latency));
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let label = if loading { "Re-assess" } else { "Reality check" };
            let clicked = ui
                .add_enabled(self.form.is_submittable(), egui::Button::new(label))
                .on_disabled_hover_text("Fill in the tech stack and the idea first")
                .clicked();
            if clicked {
                self.submit();
            }
            if loading && ui.button("Cancel").clicked() {
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::Cancel,
                    &mut self.view.status,
                );
            }
        });
    }

    fn show_submission(&self, ui: &mut egui::Ui) {
        match &self.view.submission {
            SubmissionState::Idle => {
                ui.weak("Describe the plan and run a reality check.");
            }
            SubmissionState::Loading { .. } => {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label(self.view.submission.loading_message().unwrap_or_default());
                });
            }
            SubmissionState::Succeeded { result } => show_result(ui, result),
            SubmissionState::Failed { reason } => {
                let heading = self
                    .view
                    .failure
                    .as_ref()
                    .map(|failure| category_label(failure.category()))
                    .unwrap_or("Assessment failed");
                ui.colored_label(theme::DANGER, heading);
                ui.label(reason.as_str());
                if self
                    .view
                    .failure
                    .as_ref()
                    .is_some_and(UiError::is_retryable)
                {
                    ui.weak("Press the button again to retry.");
                }
            }
        }
    }
}

fn show_result(ui: &mut egui::Ui, result: &AssessmentResult) {
    let accent = theme::score_fill(score_color(result.score()));
    egui::Frame::new()
        .fill(theme::CARD_FILL)
        .stroke(egui::Stroke::new(1.0, theme::CARD_STROKE))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("{}/10", result.score()))
                        .size(36.0)
                        .strong()
                        .color(accent),
                );
                ui.vertical(|ui| {
                    ui.heading(result.verdict());
                });
            });

            if !result.red_flags().is_empty() {
                ui.add_space(8.0);
                ui.label(egui::RichText::new("Red flags").strong());
                for flag in result.red_flags() {
                    ui.colored_label(theme::DANGER, format!("• {flag}"));
                }
            }

            if !result.alternative_plan().is_empty() {
                ui.add_space(8.0);
                ui.label(egui::RichText::new("Alternative plan").strong());
                ui.label(result.alternative_plan());
            }
        });
}

impl eframe::App for AssessorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.weak(self.view.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Tech Idea Reality Check");
                ui.add_space(8.0);
                self.show_banner(ui);
                self.show_form(ui);
                ui.separator();
                self.show_submission(ui);
            });
        });
    }
}
