use dioxus::prelude::{Callback, Signal, WritableExt};
use web_sys::File;

use crate::api;
use crate::upload::state::UploadState;

/// Runs one submission end to end: tags it with a fresh generation, posts
/// the image, and applies the outcome unless a newer submission superseded
/// it while the request was in flight. `on_applied` fires only for applied
/// outcomes so the caller can reposition the overlay.
pub async fn submit_file(file: File, mut state: Signal<UploadState>, on_applied: Callback<()>) {
    let generation = state.write().submission_started();
    dioxus_logger::tracing::info!(
        "submitting {} ({} bytes, generation {generation})",
        file.name(),
        file.size()
    );

    let result = api::solve_puzzle(&file).await;
    if let Err(error) = &result {
        dioxus_logger::tracing::error!("solve failed: {error:?}");
    }

    if !state.write().response_arrived(generation, result) {
        dioxus_logger::tracing::debug!("dropping stale solve response (generation {generation})");
        return;
    }
    on_applied.call(());
}

/// Fetches a sample puzzle and feeds it into the normal submission path.
/// A failed fetch is logged and submits nothing.
pub async fn fetch_sample_and_submit(url: String, on_file: Callback<File>) {
    match api::fetch_sample(&url).await {
        Ok(file) => on_file.call(file),
        Err(error) => {
            dioxus_logger::tracing::error!("sample fetch failed for {url}: {error}");
        }
    }
}
