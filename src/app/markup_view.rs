use crate::markup::{Block, RenderedMarkup, Span};
use eframe::egui::{self, RichText};

const LIST_INDENT: f32 = 16.0;

pub fn show_markup(ui: &mut egui::Ui, markup: &RenderedMarkup) {
    for block in &markup.blocks {
        match block {
            Block::Heading { level, spans } => {
                ui.add_space(6.0);
                show_spans(ui, spans, Some(heading_size(*level)), true);
                ui.add_space(4.0);
            }
            Block::Paragraph(spans) => {
                show_spans(ui, spans, None, false);
                ui.add_space(6.0);
            }
            Block::ListItem {
                depth,
                marker,
                spans,
            } => {
                ui.horizontal(|ui| {
                    ui.add_space(LIST_INDENT * (*depth as f32 + 1.0));
                    ui.label(marker.as_str());
                    show_spans(ui, spans, None, false);
                });
            }
            Block::CodeBlock { language, code } => {
                egui::Frame::none()
                    .fill(ui.style().visuals.extreme_bg_color)
                    .inner_margin(8.0)
                    .rounding(4.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        if let Some(language) = language {
                            ui.label(RichText::new(language).small().weak());
                        }
                        ui.label(RichText::new(code).monospace());
                    });
                ui.add_space(6.0);
            }
            Block::Rule => {
                ui.separator();
            }
        }
    }
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 24.0,
        2 => 20.0,
        3 => 17.0,
        _ => 15.0,
    }
}

fn show_spans(ui: &mut egui::Ui, spans: &[Span], size: Option<f32>, strong: bool) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            let text = span_text(span, size, strong);
            match &span.style.link {
                Some(url) => {
                    ui.hyperlink_to(text, url);
                }
                None => {
                    ui.label(text);
                }
            }
        }
    });
}

fn span_text(span: &Span, size: Option<f32>, strong: bool) -> RichText {
    let mut text = RichText::new(&span.text);
    if let Some(size) = size {
        text = text.size(size);
    }
    if strong || span.style.strong {
        text = text.strong();
    }
    if span.style.emphasis {
        text = text.italics();
    }
    if span.style.strikethrough {
        text = text.strikethrough();
    }
    if span.style.code {
        text = text.code();
    }
    text
}
