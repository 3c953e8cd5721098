use std::time::{Duration, Instant};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    born: Instant,
}

/// Transient notifications stacked in the top-right corner. Each toast lives
/// for a few seconds and disappears on its own; nothing is persisted in the
/// layout.
#[derive(Default)]
pub struct Toasts {
    pub queue: Vec<Toast>,
}

impl Toasts {
    pub fn success(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Success, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Error, text.into());
    }

    fn push(&mut self, kind: ToastKind, text: String) {
        self.queue.push(Toast {
            kind,
            text,
            born: Instant::now(),
        });
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.queue.retain(|toast| toast.born.elapsed() < TOAST_TTL);
        if self.queue.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.queue {
                    let accent = match toast.kind {
                        ToastKind::Success => egui::Color32::from_rgb(70, 160, 90),
                        ToastKind::Error => egui::Color32::from_rgb(200, 80, 80),
                    };
                    egui::Frame::NONE
                        .fill(egui::Color32::from_gray(25))
                        .stroke(egui::Stroke::new(1.0, accent))
                        .corner_radius(egui::CornerRadius::same(4))
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.colored_label(accent, &toast.text);
                        });
                    ui.add_space(6.0);
                }
            });

        // Keep repainting so expired toasts vanish without user input.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
