//! Terminal implementation of [`Surface`].
//!
//! Trigger controls become a busy flag plus an indicatif spinner, notices go
//! to stderr and results are printed to stdout.

use crate::models::SubmissionKind;
use crate::render::terminal::render_result;
use crate::render::ResultView;
use crate::surface::{ElementRole, NoticeLevel, Surface};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const TEXT_TRIGGER_LABEL: &str = "Analyze with AI";
pub const LINK_TRIGGER_LABEL: &str = "Analyze Link";

#[derive(Debug, Clone)]
struct Trigger {
    enabled: bool,
    label: String,
}

impl Trigger {
    fn new(label: &str) -> Self {
        Self {
            enabled: true,
            label: label.to_string(),
        }
    }
}

/// Console-backed surface.
pub struct TerminalSurface {
    text_trigger: Trigger,
    link_trigger: Trigger,
    spinner: Option<ProgressBar>,
    /// Print results to stdout when shown.
    echo: bool,
    color: bool,
    quiet: bool,
}

impl TerminalSurface {
    pub fn new(echo: bool, color: bool, quiet: bool) -> Self {
        Self {
            text_trigger: Trigger::new(TEXT_TRIGGER_LABEL),
            link_trigger: Trigger::new(LINK_TRIGGER_LABEL),
            spinner: None,
            echo,
            color,
            quiet,
        }
    }

    fn trigger(&self, kind: SubmissionKind) -> &Trigger {
        match kind {
            SubmissionKind::Text => &self.text_trigger,
            SubmissionKind::Link => &self.link_trigger,
        }
    }

    fn trigger_mut(&mut self, kind: SubmissionKind) -> &mut Trigger {
        match kind {
            SubmissionKind::Text => &mut self.text_trigger,
            SubmissionKind::Link => &mut self.link_trigger,
        }
    }

    fn start_spinner(&mut self, message: &str) {
        if self.quiet {
            return;
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        self.spinner = Some(bar);
    }

    fn stop_spinner(&mut self) {
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
    }
}

impl Surface for TerminalSurface {
    fn has_element(&self, _role: ElementRole) -> bool {
        true
    }

    fn trigger_enabled(&self, kind: SubmissionKind) -> bool {
        self.trigger(kind).enabled
    }

    fn trigger_label(&self, kind: SubmissionKind) -> String {
        self.trigger(kind).label.clone()
    }

    fn set_trigger(&mut self, kind: SubmissionKind, enabled: bool, label: &str) {
        {
            let trigger = self.trigger_mut(kind);
            trigger.enabled = enabled;
            trigger.label = label.to_string();
        }

        if enabled {
            self.stop_spinner();
        } else {
            self.start_spinner(label);
        }
    }

    fn notify(&mut self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Error => eprintln!("❌ {}", message),
            NoticeLevel::Success if !self.quiet => eprintln!("✅ {}", message),
            NoticeLevel::Success => {}
        }
    }

    fn show_results(&mut self, view: &ResultView) {
        if self.echo {
            println!("{}", "─".repeat(60));
            print!("{}", render_result(view, self.color));
        }
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}
