pub mod transport;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::core::Movie;
use crate::engine::MIN_QUERY_LEN;
use crate::ranking;

pub use transport::{HttpTransport, SearchTransport, TransportError};

/// Quiet window between the last keystroke and the dispatched request
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(250);

/// Status line while a request is in flight
pub const MSG_SEARCHING: &str = "Searching…";

/// Status line for transport failures
pub const MSG_NETWORK_ERROR: &str = "Network error.";

/// Status line for upstream errors without a message
pub const MSG_SEARCH_ERROR: &str = "Error searching.";

/// Prompt shown while the input is below the search threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdlePrompt {
    /// Input is empty
    Empty,
    /// Input has fewer trimmed characters than the threshold
    TooShort,
}

impl IdlePrompt {
    pub fn message(self) -> &'static str {
        match self {
            IdlePrompt::Empty => "Start typing to search.",
            IdlePrompt::TooShort => "Type at least 2 characters…",
        }
    }
}

/// Render seam between the dispatcher and whatever displays results.
///
/// The dispatcher is the only writer: each method call fully describes the
/// next visible state.
pub trait SearchView: Send + Sync {
    /// Sub-threshold input: clear results, show the prompt
    fn idle(&self, prompt: IdlePrompt);

    /// A request was dispatched
    fn searching(&self);

    /// The latest request resolved; `movies` is already re-ranked for `query`
    fn results(&self, query: &str, movies: Vec<Movie>);

    /// The latest request failed
    fn error(&self, message: &str);
}

/// Debounced, cancellation-safe bridge between keystrokes and the ranking
/// engine.
///
/// One controller per input box; controllers are independent, so several can
/// coexist. Every dispatched request carries a sequence number, and a
/// response is applied only while its number is still the latest — an older
/// request finishing late can never overwrite a newer one's results. Task
/// aborts on superseded requests are an optimization on top of that check,
/// not the guarantee.
pub struct SearchController<T, V> {
    inner: Arc<Inner<T, V>>,
}

struct Inner<T, V> {
    transport: T,
    view: V,
    debounce: Duration,
    seq: AtomicU64,
    debounce_task: Mutex<Option<AbortHandle>>,
    inflight: Mutex<Option<AbortHandle>>,
}

impl<T, V> SearchController<T, V>
where
    T: SearchTransport + 'static,
    V: SearchView + 'static,
{
    /// Create a controller with the default debounce delay
    pub fn new(transport: T, view: V) -> Self {
        Self::with_debounce(transport, view, DEBOUNCE_DELAY)
    }

    /// Create a controller with a custom debounce delay
    pub fn with_debounce(transport: T, view: V, debounce: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                view,
                debounce,
                seq: AtomicU64::new(0),
                debounce_task: Mutex::new(None),
                inflight: Mutex::new(None),
            }),
        }
    }

    /// Keystroke entry point.
    ///
    /// Re-arms the debounce timer; sub-threshold input instead cancels any
    /// in-flight request, clears results and shows the idle prompt.
    pub fn on_input(&self, raw: &str) {
        self.cancel_debounce();

        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            // Invalidate first: the abort below races with completion, the
            // sequence bump does not.
            self.inner.seq.fetch_add(1, Ordering::SeqCst);
            if let Some(handle) = self.inner.inflight.lock().unwrap().take() {
                handle.abort();
            }
            let prompt = if trimmed.is_empty() {
                IdlePrompt::Empty
            } else {
                IdlePrompt::TooShort
            };
            self.inner.view.idle(prompt);
            return;
        }

        let inner = Arc::clone(&self.inner);
        let query = raw.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            inner.dispatch(&query);
        });
        *self.inner.debounce_task.lock().unwrap() = Some(handle.abort_handle());
    }

    /// Form-submit entry point: dispatches immediately, no debounce
    pub fn submit(&self, raw: &str) {
        self.cancel_debounce();
        if raw.trim().chars().count() >= MIN_QUERY_LEN {
            self.inner.dispatch(raw);
        }
    }

    fn cancel_debounce(&self) {
        if let Some(handle) = self.inner.debounce_task.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl<T, V> Inner<T, V>
where
    T: SearchTransport + 'static,
    V: SearchView + 'static,
{
    fn dispatch(self: &Arc<Self>, raw: &str) {
        let query = raw.trim().to_string();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        // Best-effort cancellation of the superseded request
        if let Some(handle) = self.inflight.lock().unwrap().take() {
            handle.abort();
        }

        self.view.searching();

        let inner = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let outcome = inner.transport.fetch(&query).await;

            // Stale responses never touch the view, success or failure alike
            if inner.seq.load(Ordering::SeqCst) != seq {
                return;
            }

            match outcome {
                Ok(page) => {
                    // Rank against the query that triggered this request, not
                    // whatever the server echoed back
                    let ranked = ranking::rank(&query, &page.results);
                    inner.view.results(&query, ranked);
                }
                Err(TransportError::Aborted) => {}
                Err(TransportError::Upstream { message }) => match message {
                    Some(msg) => inner.view.error(&format!("Error: {}", msg)),
                    None => inner.view.error(MSG_SEARCH_ERROR),
                },
                Err(TransportError::Network(e)) => {
                    tracing::debug!("search transport failed: {}", e);
                    inner.view.error(MSG_NETWORK_ERROR);
                }
            }
        });
        *self.inflight.lock().unwrap() = Some(handle.abort_handle());
    }
}
