//! Request Dispatcher
//!
//! Runs remote operations keyed by entity id. At most one operation per id
//! is in flight; the sending map is reactive so controls can disable
//! themselves while a request runs.

use std::collections::HashMap;
use std::future::Future;
use std::pin::pin;
use std::sync::Arc;

use futures::future::{select, Either, LocalBoxFuture};
use futures::FutureExt;
use leptos::prelude::*;

use crate::error::{ApiError, ApiResult, SendError};
use crate::toast::{ToastMessage, ToastStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SendKind {
    Create,
    Update,
    Delete,
    Archive,
    Bookmark,
    Emoji,
}

impl SendKind {
    fn failure_description(&self) -> &'static str {
        match self {
            SendKind::Create => "Could not create the item",
            SendKind::Update => "Could not update the item",
            SendKind::Delete => "Could not delete the item",
            SendKind::Archive => "Could not change the archive state",
            SendKind::Bookmark => "Could not change the bookmark",
            SendKind::Emoji => "Could not update the emoji",
        }
    }
}

pub type SendingMap = HashMap<String, SendKind>;

/// Future that resolves after the given number of milliseconds
pub type Timer = Arc<dyn Fn(u32) -> LocalBoxFuture<'static, ()> + Send + Sync>;

#[derive(Clone, Copy)]
pub struct BulkSender {
    sending: RwSignal<SendingMap>,
    toast: ToastStore,
    timeout_ms: Option<u32>,
    timer: StoredValue<Timer>,
}

/// Releases the id when dropped
struct InFlight {
    sending: RwSignal<SendingMap>,
    id: String,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let id = &self.id;
        self.sending.try_update(|map| {
            map.remove(id);
        });
    }
}

impl BulkSender {
    pub fn new(toast: ToastStore, timeout_ms: Option<u32>) -> Self {
        Self::with_timer(toast, timeout_ms, Arc::new(|ms: u32| sleep(ms).boxed_local()))
    }

    pub fn with_timer(toast: ToastStore, timeout_ms: Option<u32>, timer: Timer) -> Self {
        Self {
            sending: RwSignal::new(HashMap::new()),
            toast,
            timeout_ms,
            timer: StoredValue::new(timer),
        }
    }

    pub fn sending_map(&self) -> Signal<SendingMap> {
        self.sending.into()
    }

    /// Tracked: re-runs the caller when the id starts or stops sending
    pub fn is_sending(&self, id: &str) -> bool {
        self.sending.with(|map| map.contains_key(id))
    }

    fn acquire(&self, id: &str, kind: SendKind) -> Option<InFlight> {
        if self.sending.with_untracked(|map| map.contains_key(id)) {
            return None;
        }
        self.sending.update(|map| {
            map.insert(id.to_string(), kind);
        });
        Some(InFlight {
            sending: self.sending,
            id: id.to_string(),
        })
    }

    /// Run `request` under `id`. `cb` receives the response on success;
    /// on failure an error toast is shown and nothing else changes.
    pub async fn send<T, F, C>(
        &self,
        id: impl Into<String>,
        kind: SendKind,
        request: F,
        cb: C,
    ) -> Result<(), SendError>
    where
        F: Future<Output = ApiResult<T>>,
        C: FnOnce(T),
    {
        let id = id.into();
        let Some(_guard) = self.acquire(&id, kind) else {
            log::debug!("[bulk] {:?} on {} rejected, already sending", kind, id);
            return Err(SendError::Busy(id));
        };

        let timer = self.timeout_ms.map(|ms| (self.timer.get_value())(ms));
        match with_timeout(request, timer).await {
            Ok(response) => {
                cb(response);
                Ok(())
            }
            Err(e) => {
                log::error!("[bulk] {:?} on {} failed: {}", kind, id, e);
                self.toast
                    .push_message(ToastMessage::error("Error", kind.failure_description()));
                Err(e.into())
            }
        }
    }
}

async fn with_timeout<T, F>(request: F, timer: Option<LocalBoxFuture<'static, ()>>) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    let Some(timer) = timer else {
        return request.await;
    };
    let request = pin!(request);
    match select(request, timer).await {
        Either::Left((response, _)) => response,
        Either::Right(_) => Err(ApiError::Timeout),
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

/// Default off the browser: only an injected timer cuts requests short
#[cfg(not(target_arch = "wasm32"))]
async fn sleep(_ms: u32) {
    futures::future::pending::<()>().await;
}

pub fn use_bulk() -> BulkSender {
    expect_context::<BulkSender>()
}
