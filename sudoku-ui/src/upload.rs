//! The upload widget: one funnel from file picker, drop target, and sample
//! gallery into a single submission path, plus the solution overlay.

pub mod effects;
pub mod state;

use dioxus::prelude::*;
use sudoku_types::Point;
use web_sys::File;

use crate::components::{SampleGallery, SolutionGrid, SolveErrorNode, UploadSpinner, WIDGET_STYLES};
use crate::interop::{self, DropTargetRuntime, FileInputRuntime, ImageLoadRuntime};
use crate::overlay::{self, HandleOverlay};
use self::state::{SolveOutcome, UploadState};

pub const DROP_ZONE_ID: &str = "puzzle-drop-zone";
pub const FILE_INPUT_ID: &str = "puzzle-file-input";
pub const PREVIEW_IMAGE_ID: &str = "puzzle-preview";
pub const GRID_CONTAINER_ID: &str = "solution-grid";

/// Raw DOM listeners held for the widget's lifetime (the page has exactly
/// one upload widget).
struct ListenerRuntime {
    _drop_target: Option<DropTargetRuntime>,
    _file_input: Option<FileInputRuntime>,
    _image_load: Option<ImageLoadRuntime>,
}

#[component]
pub fn UploadWidget() -> Element {
    let mut state = use_signal(UploadState::new);
    let mut preview_src = use_signal(|| None::<String>);
    let mut marker_src = use_signal(|| None::<String>);
    let mut pending_corners = use_signal(|| None::<[Point; 4]>);
    let mut handles = use_signal(|| None::<HandleOverlay>);
    let mut listeners = use_signal(|| None::<ListenerRuntime>);
    let mut show_note = use_signal(|| false);
    let dnd_supported = use_signal(interop::supports_drag_and_drop);

    let on_preview = use_callback(move |src: String| preview_src.set(Some(src)));

    // Places handles and markers for the newest solution's corners. Also
    // retried from the preview's load event: the data URL may finish
    // decoding after the solve response lands, and mapping needs nonzero
    // natural dimensions.
    let reposition = use_callback(move |()| {
        let Some(corners) = pending_corners() else {
            return;
        };
        if handles.read().is_none() {
            handles.set(HandleOverlay::mount(GRID_CONTAINER_ID));
        }
        let placed = handles
            .read()
            .as_ref()
            .map(|overlay| overlay.reposition(&corners, PREVIEW_IMAGE_ID, GRID_CONTAINER_ID))
            .unwrap_or(false);
        if placed {
            marker_src.set(overlay::corner_marker_layer(&corners, PREVIEW_IMAGE_ID));
            pending_corners.set(None);
        }
    });

    // Runs after a response is applied to the state.
    let on_applied = use_callback(move |()| {
        let corners = match state.read().outcome.as_ref() {
            Some(SolveOutcome::Solved(response)) => response.corners(),
            _ => None,
        };
        pending_corners.set(corners);
        if corners.is_some() {
            reposition.call(());
        }
    });

    // The single submission entry point all three input sources feed.
    // Preview decode and the network round-trip are started together and
    // resolve in either order.
    let begin_submission = use_callback(move |file: File| {
        marker_src.set(None);
        pending_corners.set(None);
        interop::read_file_to_data_url(&file, on_preview);
        spawn(effects::submit_file(file, state, on_applied));
    });

    // The widget owns one preview and one grid, so only the first dropped
    // or picked file is submitted.
    let on_files = use_callback(move |files: Vec<File>| {
        let mut files = files.into_iter();
        let Some(first) = files.next() else { return };
        let skipped = files.count();
        if skipped > 0 {
            dioxus_logger::tracing::warn!("ignoring {skipped} extra file(s); one puzzle at a time");
        }
        begin_submission.call(first);
    });

    let on_drag_state = use_callback(move |active: bool| {
        let mut current = state.write();
        if active {
            current.drag_entered();
        } else {
            current.drag_left();
        }
    });

    let on_sample_pick = use_callback(move |url: String| {
        spawn(effects::fetch_sample_and_submit(url, begin_submission));
    });

    // Attach the raw listeners once the widget's elements are mounted.
    use_effect(move || {
        if listeners.read().is_some() {
            return;
        }
        let drop_target = interop::register_drop_target(DROP_ZONE_ID, on_drag_state, on_files);
        let file_input = interop::register_file_input(FILE_INPUT_ID, on_files);
        let image_load = interop::watch_image_load(PREVIEW_IMAGE_ID, reposition);
        if drop_target.is_none() && file_input.is_none() && image_load.is_none() {
            return;
        }
        listeners.set(Some(ListenerRuntime {
            _drop_target: drop_target,
            _file_input: file_input,
            _image_load: image_load,
        }));
    });

    let is_loading = state.read().is_loading();
    let drag_active = state.read().is_drag_active();
    let outcome = state.read().outcome.clone();

    let solution_body = match &outcome {
        Some(SolveOutcome::Solved(response)) => match response.cells() {
            Some(cells) => rsx! {
                SolutionGrid { cells: cells.to_vec() }
            },
            None => rsx! {
                SolveErrorNode { message: "The solver returned an incomplete grid.".to_string() }
            },
        },
        Some(SolveOutcome::Rejected(message)) => rsx! {
            SolveErrorNode { message: message.clone() }
        },
        None => rsx! {},
    };

    let marker_layer = match marker_src() {
        Some(src) => rsx! {
            img { class: "corner-markers", src: src }
        },
        None => rsx! {},
    };

    rsx! {
        style { {WIDGET_STYLES} }

        div {
            class: "sudoku-widget",

            div {
                id: DROP_ZONE_ID,
                class: if drag_active { "drop-zone drag-active" } else { "drop-zone" },
                if dnd_supported() {
                    p { class: "drop-hint", "Drag a photo of a sudoku here, or" }
                } else {
                    p { class: "drop-hint", "Choose a photo of a sudoku:" }
                }
                label {
                    class: "file-label",
                    r#for: FILE_INPUT_ID,
                    "browse for an image"
                }
                input {
                    id: FILE_INPUT_ID,
                    class: "file-input",
                    r#type: "file",
                    accept: "image/*",
                }
            }

            SampleGallery { on_pick: move |url: String| on_sample_pick.call(url) }

            button {
                class: "ack-toggle",
                onclick: move |_| {
                    let shown = show_note();
                    show_note.set(!shown);
                },
                if show_note() { "Hide the details" } else { "How does this work?" }
            }
            if show_note() {
                p {
                    class: "ack-note",
                    "The photo is uploaded to the solver, which locates the \
                     grid, reads the printed digits, and sends back the \
                     completed puzzle with the detected corner points. Drag \
                     the corner handles if the detection is slightly off."
                }
            }

            div {
                class: "puzzle-stage",
                img {
                    id: PREVIEW_IMAGE_ID,
                    class: "puzzle-photo",
                    src: preview_src().unwrap_or_default(),
                }
                {marker_layer}
                div {
                    id: GRID_CONTAINER_ID,
                    class: "solution-container",
                    if is_loading {
                        UploadSpinner {}
                    }
                    {solution_body}
                }
            }
        }
    }
}
