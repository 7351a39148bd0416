mod markup_view;
mod state;
mod ui;
mod widget;

use crate::upload::UploadedFile;
use eframe::{egui, App};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub use widget::UploadSubmitWidget;

pub struct FileParserApp {
    widget: UploadSubmitWidget,
    notice: Option<String>,
}

impl FileParserApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, widget: UploadSubmitWidget) -> Self {
        info!("Initializing AI File Parser");
        Self {
            widget,
            notice: None,
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.widget.poll() {
            ctx.request_repaint();
        }
        if self.widget.state().is_in_flight() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
        self.handle_file_drops(ctx);
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });

        if !dropped.is_empty() {
            let candidates = dropped.iter().filter_map(dropped_to_upload).collect();
            if let Err(e) = self.widget.drop_files(candidates) {
                info!("Drop rejected: {}", e);
            }
            ctx.request_repaint();
        } else if hovering != self.widget.intake().is_dragging() {
            if hovering {
                self.widget.drag_enter();
            } else {
                self.widget.drag_leave();
            }
            ctx.request_repaint();
        }
    }

    fn browse_files(&mut self) {
        let mut dialog = FileDialog::new();
        let extensions = self.widget.accept().extensions();
        if !extensions.is_empty() {
            dialog = dialog.add_filter("Accepted files", &extensions);
        }

        if let Some(paths) = dialog.pick_files() {
            let candidates = load_paths(&paths);
            if let Err(e) = self.widget.add_files(candidates) {
                info!("Selection rejected: {}", e);
            }
        }
    }

    fn save_html(&mut self, html: &str) {
        let Some(path) = FileDialog::new()
            .set_file_name("result.html")
            .add_filter("HTML", &["html"])
            .save_file()
        else {
            return;
        };

        let document = format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Result</title></head><body>\n{}</body></html>\n",
            html
        );
        self.notice = Some(match std::fs::write(&path, document) {
            Ok(()) => {
                info!("Saved result to {}", path.display());
                format!("Saved to {}", path.display())
            }
            Err(e) => {
                warn!("Failed to save result to {}: {}", path.display(), e);
                format!("Could not save: {}", e)
            }
        });
    }
}

fn load_paths(paths: &[PathBuf]) -> Vec<UploadedFile> {
    paths
        .iter()
        .filter_map(|path| match UploadedFile::from_path(path) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

fn dropped_to_upload(file: &egui::DroppedFile) -> Option<UploadedFile> {
    if let Some(bytes) = &file.bytes {
        return Some(UploadedFile::from_bytes(file.name.clone(), Arc::clone(bytes)));
    }
    let path = file.path.as_ref()?;
    load_paths(std::slice::from_ref(path)).pop()
}

impl App for FileParserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
