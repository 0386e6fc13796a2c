//! The display surface the controller drives.
//!
//! A [`Surface`] stands in for the page: it owns the trigger controls, the
//! inputs, the result areas and the notification toasts. The controller
//! only ever talks to it through this trait, so tests can substitute a fake.

pub mod terminal;

use crate::models::SubmissionKind;
use crate::render::ResultView;
use std::fmt;

pub use terminal::TerminalSurface;

/// Stable role of an element the controller depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    TextTrigger,
    LinkTrigger,
    TextInput,
    LinkInput,
    ResultsContainer,
    VerdictDisplay,
    CountsDisplay,
    SummaryDisplay,
    DetailsContainer,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementRole::TextTrigger => "text trigger control",
            ElementRole::LinkTrigger => "link trigger control",
            ElementRole::TextInput => "text input",
            ElementRole::LinkInput => "link input",
            ElementRole::ResultsContainer => "results container",
            ElementRole::VerdictDisplay => "verdict display",
            ElementRole::CountsDisplay => "counts display",
            ElementRole::SummaryDisplay => "summary display",
            ElementRole::DetailsContainer => "details container",
        };
        write!(f, "{}", name)
    }
}

const RESULT_ROLES: [ElementRole; 5] = [
    ElementRole::ResultsContainer,
    ElementRole::VerdictDisplay,
    ElementRole::CountsDisplay,
    ElementRole::SummaryDisplay,
    ElementRole::DetailsContainer,
];

/// Roles that must exist before a submission of `kind` may start.
pub fn required_roles(kind: SubmissionKind) -> Vec<ElementRole> {
    let mut roles = match kind {
        SubmissionKind::Text => vec![ElementRole::TextTrigger, ElementRole::TextInput],
        SubmissionKind::Link => vec![ElementRole::LinkTrigger, ElementRole::LinkInput],
    };
    roles.extend(RESULT_ROLES);
    roles
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Success,
}

/// Page collaborators used by the analysis controller.
pub trait Surface {
    /// Whether the element with `role` exists.
    fn has_element(&self, role: ElementRole) -> bool;

    /// Whether the trigger control for `kind` accepts activation.
    fn trigger_enabled(&self, kind: SubmissionKind) -> bool;

    /// Current label of the trigger control for `kind`.
    fn trigger_label(&self, kind: SubmissionKind) -> String;

    /// Enable or disable the trigger control for `kind` and set its label.
    fn set_trigger(&mut self, kind: SubmissionKind, enabled: bool, label: &str);

    /// Show a transient, non-blocking notice.
    fn notify(&mut self, level: NoticeLevel, message: &str);

    /// Fill the result area, make it visible and bring it into view.
    fn show_results(&mut self, view: &ResultView);
}
