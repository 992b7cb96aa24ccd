use crate::api::{ApiClient, SongRecord};
use crate::config::SEARCH_DEBOUNCE_MS;
use crate::lifecycle::{Generation, ScopedTask};
use crate::utils::delay_ms;
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Song search that waits for typing to settle. Each keystroke restarts
/// the debounce; only the newest request may publish results.
pub fn use_debounced_song_search(term: Signal<String>) -> Signal<Vec<SongRecord>> {
    let api = use_context::<ApiClient>();
    let mut results = use_signal(Vec::<SongRecord>::new);
    let generation = use_hook(Generation::default);
    let pending = use_hook(|| Rc::new(RefCell::new(None::<ScopedTask>)));

    use_effect(move || {
        let query = term();
        let ticket = generation.advance();
        // Dropping the previous task cancels its timer.
        pending.borrow_mut().take();

        if query.is_empty() {
            results.set(Vec::new());
            return;
        }

        let api = api.clone();
        let generation = generation.clone();
        let task = ScopedTask::spawn(async move {
            delay_ms(SEARCH_DEBOUNCE_MS).await;
            match api.search_songs(&query).await {
                Ok(songs) if generation.is_current(ticket) => results.set(songs),
                Ok(_) => tracing::debug!(%query, "dropping superseded search results"),
                Err(err) => tracing::warn!(error = %err, %query, "song search failed"),
            }
        });
        *pending.borrow_mut() = Some(task);
    });

    results
}
