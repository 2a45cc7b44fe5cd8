//! Load-more trigger for paginated lists
//!
//! Scroll positions near the end of a list request the next page. Requests go
//! through a [`DebounceThrottle`]: the first one in a window runs at once and
//! later ones collapse into a single trailing request, so a user who stops at
//! the bottom while a page finishes still gets the next page. No request is
//! made while a page is loading or once the source reports no further pages.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::Scheduler;
use crate::config::PagingConfig;
use crate::debounce::{DebounceThrottle, Dispatch};
use crate::error::TimingError;

/// Load-more tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagingSettings {
    /// Delay before a request made inside the throttle window is sent
    pub debounce: Duration,
    pub throttle: Duration,
    /// Distance from the end of the list, in scroll units, that triggers a load
    pub threshold: f64,
}

impl Default for PagingSettings {
    fn default() -> Self {
        PagingConfig::default().into()
    }
}

impl From<PagingConfig> for PagingSettings {
    fn from(config: PagingConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            throttle: Duration::from_millis(config.throttle_ms),
            threshold: config.threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageState {
    loaded_pages: u32,
    loading: bool,
    has_more: bool,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            loaded_pages: 0,
            loading: false,
            has_more: true,
        }
    }
}

type LoadHandler = Rc<dyn Fn(u32)>;

pub struct LoadMoreTrigger<C: Scheduler + Clone + 'static> {
    requests: DebounceThrottle<C>,
    threshold: f64,
    /// Shared with a trailing request, which reads it when it fires
    state: Rc<Cell<PageState>>,
    on_load: LoadHandler,
}

impl<C: Scheduler + Clone + 'static> LoadMoreTrigger<C> {
    /// `on_load` receives the 1-based number of the page to fetch.
    pub fn new<F>(clock: C, settings: PagingSettings, on_load: F) -> Self
    where
        F: Fn(u32) + 'static,
    {
        Self {
            requests: DebounceThrottle::new(clock, settings.debounce, settings.throttle),
            threshold: settings.threshold,
            state: Rc::new(Cell::new(PageState::default())),
            on_load: Rc::new(on_load),
        }
    }

    /// Report the list's scroll position.
    ///
    /// Returns `Ok(true)` if a page was requested right away. A request made
    /// inside the throttle window is deferred and returns `Ok(false)`; see
    /// [`is_pending`](Self::is_pending). Non-finite positions are ignored.
    pub fn on_scroll(&self, offset: f64, max_extent: f64) -> Result<bool, TimingError> {
        if self.requests.is_disposed() {
            return Err(TimingError::Disposed("load-more trigger"));
        }

        let state = self.state.get();
        let remaining = max_extent - offset;
        if state.loading
            || !state.has_more
            || !remaining.is_finite()
            || remaining > self.threshold
        {
            return Ok(false);
        }

        let page_state = self.state.clone();
        let on_load = self.on_load.clone();
        let dispatch = self.requests.call(move || {
            request_next(&page_state, &on_load);
        })?;
        Ok(dispatch == Dispatch::Immediate)
    }

    /// Mark the in-flight page as loaded.
    pub fn finish_page(&self, has_more: bool) {
        let state = self.state.get();
        if !state.loading {
            log::warn!("paging: finish_page called with no page in flight");
            return;
        }
        self.state.set(PageState {
            loaded_pages: state.loaded_pages + 1,
            loading: false,
            has_more,
        });
    }

    /// Mark the in-flight page as failed so the same page can be requested again.
    pub fn fail_page(&self) {
        let state = self.state.get();
        self.state.set(PageState {
            loading: false,
            ..state
        });
    }

    /// Start over from the first page, e.g. on pull-to-refresh. A deferred
    /// request is dropped.
    pub fn reset(&self) {
        self.requests.reset();
        self.state.set(PageState::default());
    }

    pub fn dispose(&self) {
        self.requests.dispose();
    }

    /// `true` while a deferred request is waiting to be sent.
    pub fn is_pending(&self) -> bool {
        self.requests.is_pending()
    }

    pub fn loaded_pages(&self) -> u32 {
        self.state.get().loaded_pages
    }

    pub fn is_loading(&self) -> bool {
        self.state.get().loading
    }

    pub fn has_more(&self) -> bool {
        self.state.get().has_more
    }
}

/// Request the page after the last loaded one, unless the list state changed
/// since the request was made.
fn request_next(state: &Cell<PageState>, on_load: &LoadHandler) {
    let current = state.get();
    if current.loading || !current.has_more {
        return;
    }

    let page = current.loaded_pages + 1;
    #[cfg(debug_assertions)]
    log::debug!("paging: requesting page {}", page);
    state.set(PageState {
        loading: true,
        ..current
    });
    on_load(page);
}
