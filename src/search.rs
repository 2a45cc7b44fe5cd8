//! Search-as-you-type query submission
//!
//! Keystrokes are debounced into a single search once typing pauses.
//! Queries are trimmed, queries shorter than the minimum length are held back,
//! and a query identical to the last submitted one is not submitted again.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::Scheduler;
use crate::config::SearchConfig;
use crate::debounce::Debouncer;
use crate::error::TimingError;

/// Search input tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_chars: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchConfig::default().into()
    }
}

impl From<SearchConfig> for SearchSettings {
    fn from(config: SearchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            min_chars: config.min_chars,
        }
    }
}

type SearchHandler = Rc<dyn Fn(&str)>;

pub struct SearchInput<S: Scheduler> {
    debouncer: Debouncer<S>,
    min_chars: usize,
    last_query: Rc<RefCell<Option<String>>>,
    on_search: SearchHandler,
}

impl<S: Scheduler> SearchInput<S> {
    pub fn new<F>(scheduler: S, settings: SearchSettings, on_search: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        Self {
            debouncer: Debouncer::new(scheduler, settings.debounce),
            min_chars: settings.min_chars,
            last_query: Rc::new(RefCell::new(None)),
            on_search: Rc::new(on_search),
        }
    }

    /// Feed the current text of the search field.
    pub fn input(&self, text: &str) -> Result<(), TimingError> {
        if self.debouncer.is_disposed() {
            return Err(TimingError::Disposed("search input"));
        }

        let query = text.trim();
        if query.is_empty() {
            self.debouncer.cancel();
            // Clearing the field resets results right away
            let had_query = self
                .last_query
                .borrow()
                .as_deref()
                .is_some_and(|last| !last.is_empty());
            if had_query {
                submit(&self.last_query, &self.on_search, String::new());
            }
            return Ok(());
        }

        if query.chars().count() < self.min_chars {
            self.debouncer.cancel();
            return Ok(());
        }

        let query = query.to_string();
        let last_query = self.last_query.clone();
        let on_search = self.on_search.clone();
        self.debouncer
            .debounce(move || submit(&last_query, &on_search, query))
    }

    /// Submit the pending query now, e.g. on Enter. Returns `true` if one was pending.
    pub fn submit(&self) -> bool {
        self.debouncer.flush()
    }

    pub fn cancel(&self) {
        self.debouncer.cancel();
    }

    pub fn dispose(&self) {
        self.debouncer.dispose();
    }

    /// The most recently submitted query
    pub fn last_query(&self) -> Option<String> {
        self.last_query.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

fn submit(last_query: &RefCell<Option<String>>, on_search: &SearchHandler, query: String) {
    if last_query.borrow().as_deref() == Some(query.as_str()) {
        #[cfg(debug_assertions)]
        log::trace!("search: skipping repeated query {:?}", query);
        return;
    }

    #[cfg(debug_assertions)]
    log::debug!("search: submitting {:?}", query);
    last_query.replace(Some(query.clone()));
    on_search(&query);
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
