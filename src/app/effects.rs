use std::path::Path;
use std::sync::mpsc::Sender;
use std::thread;

use crate::ai::{AiReply, build_prompt};
use crate::app::{App, Message, Model, ToastLevel};
use crate::export;
use crate::export::pdf::PdfOptions;

impl App {
    /// Run the IO attached to a message after `update` has applied its
    /// state transition. Worker threads report back over `ai_tx`.
    pub(super) fn handle_message_side_effects(
        &self,
        model: &mut Model,
        ai_tx: &Sender<AiReply>,
        msg: &Message,
    ) {
        match msg {
            Message::SaveDocument => {
                let name = export::markdown_target_name(model.document.file_name());
                match export::save_markdown(Path::new(&name), &model.document.text()) {
                    Ok(()) => {
                        model.document.mark_clean();
                        model.show_toast(ToastLevel::Info, format!("Saved {name}"));
                    }
                    Err(err) => {
                        model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                        tracing::warn!(file = %name, error = %err, "save failed");
                    }
                }
            }
            Message::ExportPdf => {
                let name = export::pdf_target_name(model.document.file_name());
                let result = export::pdf::export_pdf(
                    &model.document.text(),
                    model.document.file_name(),
                    Path::new(&name),
                    &PdfOptions::default(),
                );
                match result {
                    Ok(()) => model.show_toast(ToastLevel::Info, format!("Exported {name}")),
                    Err(err) => {
                        model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
                        tracing::warn!(file = %name, error = %err, "pdf export failed");
                    }
                }
            }
            Message::OpenFile(path) => {
                let path = path.trim();
                if path.is_empty() {
                    model.show_toast(ToastLevel::Warning, "No file name given");
                    return;
                }
                match export::open_markdown(Path::new(path)) {
                    Ok((content, file_name)) => {
                        model.document.load(&content, &file_name);
                        model.editor_scroll = 0;
                        model.viewport.go_to_top();
                        model.sync_preview();
                        model.show_toast(ToastLevel::Info, format!("Opened {file_name}"));
                    }
                    Err(err) => {
                        model.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
                        tracing::warn!(file = %path, error = %err, "open failed");
                    }
                }
            }
            Message::AiRequest {
                instruction,
                action,
            } => {
                let Some(generator) = self.generator.clone() else {
                    model.ai_pending = false;
                    model.show_toast(
                        ToastLevel::Error,
                        "Gemini API key is missing; set GEMINI_API_KEY",
                    );
                    return;
                };
                let prompt = build_prompt(instruction, &model.document.text());
                let action = *action;
                let tx = ai_tx.clone();
                thread::spawn(move || {
                    let result = generator.generate(&prompt);
                    // The receiver may be gone if the app quit mid-request.
                    let _ = tx.send(AiReply { action, result });
                });
            }
            _ => {}
        }
    }
}
