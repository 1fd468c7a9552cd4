//! In-app navigation seam and deferred navigation after a settled toast.

use std::sync::Arc;
use std::time::Duration;

use bindery_contracts::routes::utils::replace_param;
use bindery_model::LibraryId;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domains::ui::feedback_ui::{ToastId, ToastManager};
use crate::infrastructure::constants::routes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CreateLibrary,
    ManageLibrary(LibraryId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => routes::HOME.to_string(),
            Route::CreateLibrary => routes::libraries::CREATE.to_string(),
            Route::ManageLibrary(id) => {
                replace_param(routes::libraries::MANAGE, "{id}", id.as_str())
            }
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Router the form hands control to once a submission has settled
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// A navigation waiting on a toast dismissal or a delay
#[derive(Debug)]
pub struct PendingNavigation {
    handle: JoinHandle<bool>,
    cancel: CancellationToken,
}

impl PendingNavigation {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the outcome; `true` when the navigator was invoked
    pub async fn finished(self) -> bool {
        self.handle.await.unwrap_or(false)
    }
}

/// Navigate to `route` when `toast` is dismissed or `delay` elapses,
/// whichever comes first. Cancelling `cancel` first suppresses it.
///
/// Returns `None` (and does not navigate) outside a tokio runtime.
pub fn navigate_after_toast(
    navigator: Arc<dyn Navigator>,
    toasts: &ToastManager,
    toast: ToastId,
    delay: Duration,
    cancel: CancellationToken,
    route: Route,
) -> Option<PendingNavigation> {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        log::warn!("No async runtime available, dropping navigation to {}", route);
        return None;
    };

    let dismissed = toasts.dismissed(toast);
    let token = cancel.clone();
    let handle = runtime.spawn(async move {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                log::debug!("Navigation to {} cancelled", route);
                false
            }
            _ = dismissed => {
                navigator.navigate(route);
                true
            }
            _ = tokio::time::sleep(delay) => {
                navigator.navigate(route);
                true
            }
        }
    });

    Some(PendingNavigation { handle, cancel })
}
