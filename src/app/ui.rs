use super::markup_view::show_markup;
use super::FileParserApp;
use crate::utils::FileSizeUtils;
use eframe::egui::{self, Align, Color32, CursorIcon, Layout, RichText, Sense, Stroke};

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
const DOCS_URL: &str = "https://ai.google.dev/gemini-api/docs";

enum ResultAction {
    Clear,
    SaveHtml(String),
}

impl FileParserApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 40.0;
            let footer_margin = 15.0;
            let content_height = total_height - footer_height - footer_margin;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("AI File Parser");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Drop a file, describe what you need, read the answer")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });
                    ui.add_space(20.0);

                    if self.widget.state().shows_result() {
                        self.render_result(ui);
                    } else {
                        self.render_editor(ui);
                    }

                    ui.add_space(20.0);
                });

            ui.with_layout(Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                self.render_footer(ui);
            });
        });
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        let in_flight = self.widget.state().is_in_flight();

        ui.group(|ui| {
            ui.label("Prompt");
            ui.add_space(8.0);
            let text_edit = egui::TextEdit::multiline(self.widget.prompt_mut())
                .desired_width(f32::INFINITY)
                .hint_text("What should the model do with the file?")
                .interactive(!in_flight);
            ui.add_sized([ui.available_width(), 100.0], text_edit);
        });

        ui.add_space(12.0);
        self.render_drop_zone(ui, in_flight);
        ui.add_space(8.0);
        self.render_file_list(ui);
        ui.add_space(20.0);

        ui.vertical_centered(|ui| {
            let can_submit = self.widget.state().can_submit();
            ui.add_enabled_ui(can_submit, |ui| {
                if in_flight {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new());
                        ui.label("Generating...");
                    });
                } else {
                    let button = egui::Button::new("✨ Generate").min_size(egui::vec2(200.0, 40.0));
                    if ui.add(button).clicked() {
                        self.widget.submit();
                    }
                }
            });

            if let Some(message) = self.widget.state().error_message() {
                ui.add_space(5.0);
                ui.colored_label(ERROR, message);
            }

            let has_input =
                !self.widget.intake().files().is_empty() || !self.widget.prompt().is_empty();
            ui.add_space(5.0);
            ui.add_enabled_ui(!in_flight && has_input, |ui| {
                if ui.button("🗑 Clear All").clicked() {
                    self.widget.reset();
                    self.notice = None;
                }
            });
        });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui, in_flight: bool) {
        let dragging = self.widget.intake().is_dragging();
        let stroke_color = if dragging {
            ACCENT
        } else {
            ui.visuals().weak_text_color()
        };
        let fill = if dragging {
            ACCENT.gamma_multiply(0.1)
        } else {
            Color32::TRANSPARENT
        };

        let response = egui::Frame::none()
            .stroke(Stroke::new(1.5, stroke_color))
            .fill(fill)
            .rounding(8.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("⬆").size(28.0).color(stroke_color));
                    ui.label(RichText::new("Click to upload or drag and drop").strong());
                    ui.label(
                        RichText::new(format!(
                            "{} (Max: {}MB)",
                            self.widget.accept().display(),
                            self.widget.intake().limits().max_file_size_mb
                        ))
                        .small()
                        .weak(),
                    );
                    if let Some(error) = self.widget.intake().error() {
                        ui.add_space(6.0);
                        ui.colored_label(ERROR, error.to_string());
                    }
                });
            })
            .response
            .interact(Sense::click())
            .on_hover_cursor(CursorIcon::PointingHand);

        if response.clicked() && !in_flight {
            self.browse_files();
        }
    }

    fn render_file_list(&mut self, ui: &mut egui::Ui) {
        let mut remove = None;

        for (index, file) in self.widget.intake().files().iter().enumerate() {
            egui::Frame::none()
                .fill(ui.style().visuals.faint_bg_color)
                .inner_margin(6.0)
                .rounding(4.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("📄");
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&file.name).strong());
                            ui.label(
                                RichText::new(FileSizeUtils::format_size(file.size_bytes))
                                    .small()
                                    .weak(),
                            );
                        });
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui
                                .small_button("✕")
                                .on_hover_text(format!("Remove {}", file.name))
                                .clicked()
                            {
                                remove = Some(index);
                            }
                        });
                    });
                });
            ui.add_space(4.0);
        }

        if let Some(index) = remove {
            self.widget.remove_file(index);
        }
    }

    fn render_result(&mut self, ui: &mut egui::Ui) {
        let mut action = None;

        if let Some(markup) = self.widget.state().result() {
            ui.horizontal(|ui| {
                if ui.button("↩ Clear").clicked() {
                    action = Some(ResultAction::Clear);
                }
                if ui.button("📋 Copy text").clicked() {
                    ui.output_mut(|o| o.copied_text = markup.source.clone());
                }
                if ui.button("💾 Save HTML").clicked() {
                    action = Some(ResultAction::SaveHtml(markup.html.clone()));
                }
            });
            ui.add_space(10.0);

            ui.group(|ui| {
                ui.set_width(ui.available_width());
                show_markup(ui, markup);
            });
        }

        match action {
            Some(ResultAction::Clear) => {
                self.widget.clear_result();
                self.notice = None;
            }
            Some(ResultAction::SaveHtml(html)) => self.save_html(&html),
            None => {}
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        if let Some(notice) = &self.notice {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(notice).small());
            });
            ui.add_space(5.0);
        }

        ui.horizontal(|ui| {
            let intake = self.widget.intake();
            ui.label(
                RichText::new(format!(
                    "{} of {} files",
                    intake.files().len(),
                    intake.limits().max_files
                ))
                .small()
                .weak(),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .add(
                        egui::Label::new(RichText::new("Powered by Gemini").small().color(ACCENT))
                            .sense(Sense::click()),
                    )
                    .clicked()
                {
                    if let Err(e) = open::that(DOCS_URL) {
                        tracing::warn!("Failed to open link: {}", e);
                    }
                }
            });
        });
    }
}
