use std::sync::mpsc::{self, Receiver, Sender};

use egui_extras::{Size, StripBuilder};

use crate::form::{DEFAULT_MODEL, FormState};
use crate::generate::{self, GenerateError};
use crate::toast::Toasts;

/// What the right-hand panel is showing. A failed submission never lands
/// here: failures are toast-only and the panel falls back to `Idle`.
pub enum ResultPanel {
    Idle,
    Loading,
    Ready { url: String },
}

pub struct PixelPromptApp {
    form: FormState,
    panel: ResultPanel,
    toasts: Toasts,

    // Communication channel for the background request
    tx: Sender<Result<String, GenerateError>>,
    rx: Receiver<Result<String, GenerateError>>,
}

impl Default for PixelPromptApp {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            form: FormState::default(),
            panel: ResultPanel::Idle,
            toasts: Toasts::default(),
            tx,
            rx,
        }
    }
}

impl PixelPromptApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        Self::default()
    }

    pub fn name() -> &'static str {
        "PixelPrompt"
    }

    fn is_loading(&self) -> bool {
        matches!(self.panel, ResultPanel::Loading)
    }

    /// One user-initiated submission: validate, flip to loading, hand the
    /// request to a background worker. Invalid forms never leave the app.
    fn submit(&mut self) {
        if let Err(reason) = self.form.validate() {
            self.toasts.error(reason);
            return;
        }
        self.panel = ResultPanel::Loading;
        generate::spawn_generation(&self.form, self.tx.clone());
    }

    fn apply_outcome(&mut self, outcome: Result<String, GenerateError>) {
        match outcome {
            Ok(url) => {
                self.panel = ResultPanel::Ready { url };
                self.toasts.success("Image generated successfully!");
            }
            Err(e) => {
                self.panel = ResultPanel::Idle;
                self.toasts.error(e.to_string());
            }
        }
    }

    fn render_form_section(&mut self, ui: &mut egui::Ui) {
        egui::Frame::NONE
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(60)))
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.expand_to_include_rect(ui.max_rect());
                ui.strong("Request");
                ui.add_space(6.0);

                ui.label("Prompt");
                ui.add(
                    egui::TextEdit::multiline(&mut self.form.prompt)
                        .hint_text("Describe the image you want to generate...")
                        .desired_width(f32::INFINITY)
                        .desired_rows(5),
                );
                ui.add_space(6.0);

                ui.label("API Endpoint");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.endpoint)
                        .hint_text("https://api.openai.com/v1/images/generations")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(6.0);

                ui.label("API Key");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.api_key)
                        .password(true)
                        .hint_text("Enter your API key")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(6.0);

                ui.label("Model (optional)");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.model)
                        .hint_text(format!("Leave blank for the provider default ({DEFAULT_MODEL})"))
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(10.0);

                let loading = self.is_loading();
                let label = if loading {
                    "Generating..."
                } else {
                    "Generate Image"
                };
                let button = ui.add_enabled(
                    !loading,
                    egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 30.0)),
                );
                if button.clicked() {
                    self.submit();
                }
            });
    }

    fn render_result_section(&self, ui: &mut egui::Ui) {
        egui::Frame::NONE
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(60)))
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.expand_to_include_rect(ui.max_rect());
                ui.strong("Result");
                ui.add_space(6.0);

                ui.vertical_centered(|ui| match &self.panel {
                    ResultPanel::Idle => {
                        ui.add_space(40.0);
                        ui.label(egui::RichText::new("🖼").size(48.0));
                        ui.add_space(8.0);
                        ui.label("Your generated image will appear here");
                    }
                    ResultPanel::Loading => {
                        ui.add_space(40.0);
                        ui.add(egui::Spinner::new().size(32.0));
                        ui.add_space(8.0);
                        ui.label("Generating your image...");
                    }
                    ResultPanel::Ready { url } => {
                        egui::ScrollArea::vertical()
                            .id_salt("result_scroll")
                            .show(ui, |ui| {
                                ui.add(
                                    egui::Image::from_uri(url.as_str())
                                        .max_width(ui.available_width()),
                                );
                                ui.add_space(8.0);
                                if ui.button("View Full Size").clicked() {
                                    if let Err(e) = opener::open(url) {
                                        log::warn!("could not open {url}: {e}");
                                    }
                                }
                            });
                    }
                });
            });
    }
}

impl eframe::App for PixelPromptApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a finished request
        if let Ok(outcome) = self.rx.try_recv() {
            self.apply_outcome(outcome);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("PixelPrompt");
            ui.label("Describe an image, point the form at your provider, and generate.");
            ui.add_space(8.0);

            StripBuilder::new(ui)
                .size(Size::remainder())
                .size(Size::remainder())
                .horizontal(|mut strip| {
                    strip.cell(|ui| {
                        self.render_form_section(ui);
                    });
                    strip.cell(|ui| {
                        self.render_result_section(ui);
                    });
                });
        });

        self.toasts.show(ctx);

        // Keep repainting while a request is in flight
        if self.is_loading() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use super::*;
    use crate::toast::ToastKind;

    fn filled_app() -> PixelPromptApp {
        let mut app = PixelPromptApp::default();
        app.form.prompt = "a lighthouse at dusk".to_string();
        app.form.api_key = "sk-test".to_string();
        app
    }

    #[test]
    fn invalid_prompt_never_spawns_a_request() {
        let mut app = filled_app();
        app.form.prompt = "  ".to_string();

        app.submit();

        assert!(matches!(app.panel, ResultPanel::Idle));
        assert_eq!(app.toasts.queue.len(), 1);
        assert_eq!(app.toasts.queue[0].text, "Please enter a prompt");
        assert!(app.rx.try_recv().is_err(), "no worker should be running");
    }

    #[test]
    fn missing_api_key_never_spawns_a_request() {
        let mut app = filled_app();
        app.form.api_key = String::new();

        app.submit();

        assert!(matches!(app.panel, ResultPanel::Idle));
        assert_eq!(app.toasts.queue[0].text, "Please enter your API key");
        assert!(app.rx.try_recv().is_err());
    }

    #[test]
    fn success_shows_the_image_and_toasts_once() {
        let mut app = filled_app();
        app.panel = ResultPanel::Loading;

        app.apply_outcome(Ok("https://x/img.png".to_string()));

        assert!(!app.is_loading());
        match &app.panel {
            ResultPanel::Ready { url } => assert_eq!(url, "https://x/img.png"),
            _ => panic!("panel should show the image"),
        }
        assert_eq!(app.toasts.queue.len(), 1);
        assert_eq!(app.toasts.queue[0].kind, ToastKind::Success);
        assert_eq!(app.toasts.queue[0].text, "Image generated successfully!");
    }

    #[test]
    fn failure_falls_back_to_idle_with_an_error_toast() {
        let mut app = filled_app();
        app.panel = ResultPanel::Loading;

        app.apply_outcome(Err(GenerateError::Api("bad key".to_string())));

        assert!(!app.is_loading());
        assert!(matches!(app.panel, ResultPanel::Idle));
        assert_eq!(app.toasts.queue.len(), 1);
        assert_eq!(app.toasts.queue[0].kind, ToastKind::Error);
        assert_eq!(app.toasts.queue[0].text, "bad key");
    }

    #[test]
    fn loading_clears_even_when_the_connection_fails() {
        let mut app = filled_app();
        // Bind then drop so the port refuses connections.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        app.form.endpoint = format!("http://127.0.0.1:{port}");

        app.submit();
        assert!(app.is_loading(), "submit must enter the loading state");

        let outcome = app
            .rx
            .recv_timeout(Duration::from_secs(10))
            .expect("worker must report back");
        app.apply_outcome(outcome);

        assert!(!app.is_loading());
        assert!(matches!(app.panel, ResultPanel::Idle));
        assert_eq!(app.toasts.queue.len(), 1);
        assert_eq!(app.toasts.queue[0].kind, ToastKind::Error);
    }
}
