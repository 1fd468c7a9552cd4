pub mod toast;

pub use toast::{HISTORY_LIMIT, Toast, ToastId, ToastLevel, ToastManager, ToastMessages};

#[derive(Clone)]
pub enum FeedbackMessage {
    DismissToast(ToastId),
    ClearToasts,
}

impl FeedbackMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DismissToast(_) => "UI::DismissToast",
            Self::ClearToasts => "UI::ClearToasts",
        }
    }
}

impl std::fmt::Debug for FeedbackMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DismissToast(id) => write!(f, "UI::DismissToast({id})"),
            Self::ClearToasts => write!(f, "UI::ClearToasts"),
        }
    }
}

pub fn update_feedback_ui(toasts: &ToastManager, message: FeedbackMessage) {
    log::trace!("{}", message.name());
    match message {
        FeedbackMessage::DismissToast(id) => toasts.dismiss(id),
        FeedbackMessage::ClearToasts => toasts.clear(),
    }
}
