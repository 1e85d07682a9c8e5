use dioxus::prelude::*;
use sudoku_types::{Cell, CellSource};

/// Built-in sample puzzles offered below the drop zone. Each trigger
/// carries its source URL as a data attribute.
pub const SAMPLES: &[(&str, &str)] = &[
    ("Newspaper photo", "/samples/newspaper.png"),
    ("Phone snapshot", "/samples/phone.jpg"),
    ("Book scan", "/samples/book.png"),
];

#[component]
pub fn SampleGallery(on_pick: EventHandler<String>) -> Element {
    rsx! {
        div {
            class: "sample-gallery",
            span { class: "sample-caption", "or try a sample:" }
            for (label, url) in SAMPLES.iter() {
                button {
                    key: "{url}",
                    class: "sample-trigger",
                    "data-sample-url": *url,
                    onclick: move |_| on_pick.call((*url).to_string()),
                    "{label}"
                }
            }
        }
    }
}

/// The 81-cell solution grid, row-major. Solved digits are shown as text;
/// digits already printed in the photo render as styled blanks so the
/// overlay does not obscure them.
#[component]
pub fn SolutionGrid(cells: Vec<Cell>) -> Element {
    rsx! {
        div {
            class: "solution-cells",
            for (index, cell) in cells.iter().enumerate() {
                div {
                    key: "{index}",
                    class: if cell.source == CellSource::Solved { "cell cell-solved" } else { "cell cell-given" },
                    if cell.source == CellSource::Solved {
                        "{cell.value}"
                    }
                }
            }
        }
    }
}

/// Single error node shown inside the solution container.
#[component]
pub fn SolveErrorNode(message: String) -> Element {
    rsx! {
        div { class: "solve-error", "{message}" }
    }
}

#[component]
pub fn UploadSpinner() -> Element {
    rsx! {
        div {
            class: "upload-spinner",
            span {}
            span {}
            span {}
        }
    }
}

// Widget-specific CSS styles
pub const WIDGET_STYLES: &str = r#"
/* Widget container */
.sudoku-widget {
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
    max-width: 40rem;
    margin: 0 auto;
    color: var(--text-primary, #f8fafc);
}

/* Drop zone */
.drop-zone {
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    gap: 0.5rem;
    padding: 2rem 1rem;
    background: var(--bg-secondary, #1e293b);
    border: 2px dashed var(--border-color, #334155);
    border-radius: 0.75rem;
    text-align: center;
    transition: border-color 0.15s, background 0.15s;
}

.drop-zone.drag-active {
    border-color: var(--accent-bg, #3b82f6);
    background: var(--accent-bg-faint, #1d2c4d);
}

.drop-hint {
    margin: 0;
    color: var(--text-secondary, #94a3b8);
}

.file-label {
    color: var(--accent-bg, #3b82f6);
    text-decoration: underline;
    cursor: pointer;
}

.file-input {
    position: fixed;
    left: -9999px;
    width: 1px;
    height: 1px;
    opacity: 0;
}

/* Sample gallery */
.sample-gallery {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    flex-wrap: wrap;
}

.sample-caption {
    font-size: 0.875rem;
    color: var(--text-muted, #64748b);
}

.sample-trigger {
    padding: 0.375rem 0.75rem;
    background: var(--bg-secondary, #1e293b);
    color: var(--text-primary, #f8fafc);
    border: 1px solid var(--border-color, #334155);
    border-radius: 0.5rem;
    cursor: pointer;
    font-size: 0.875rem;
}

.sample-trigger:hover {
    border-color: var(--accent-bg, #3b82f6);
}

/* Acknowledgement toggle */
.ack-toggle {
    align-self: flex-start;
    background: none;
    border: none;
    padding: 0;
    color: var(--text-muted, #64748b);
    font-size: 0.8125rem;
    text-decoration: underline;
    cursor: pointer;
}

.ack-note {
    margin: 0;
    font-size: 0.8125rem;
    color: var(--text-secondary, #94a3b8);
}

/* Puzzle stage: photo, marker layer, and grid share one footprint */
.puzzle-stage {
    position: relative;
}

.puzzle-photo {
    display: block;
    width: 100%;
    border-radius: 0.5rem;
}

.corner-markers {
    position: absolute;
    inset: 0;
    width: 100%;
    height: 100%;
    pointer-events: none;
}

.solution-container {
    position: absolute;
    inset: 0;
}

/* Solution grid */
.solution-cells {
    display: grid;
    grid-template-columns: repeat(9, 1fr);
    grid-template-rows: repeat(9, 1fr);
    width: 100%;
    height: 100%;
}

.cell {
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 1.25rem;
    font-weight: 600;
}

.cell-solved {
    color: var(--accent-bg, #3b82f6);
    text-shadow: 0 0 4px rgba(255, 255, 255, 0.9);
}

.cell-given {
    color: transparent;
}

/* Error node */
.solve-error {
    padding: 0.75rem 1rem;
    background: var(--error-bg, #7f1d1d);
    color: var(--text-primary, #f8fafc);
    border-radius: 0.5rem;
    font-size: 0.9375rem;
}

/* Spinner */
.upload-spinner {
    position: absolute;
    top: 50%;
    left: 50%;
    transform: translate(-50%, -50%);
    display: flex;
    gap: 0.25rem;
}

.upload-spinner span {
    width: 0.625rem;
    height: 0.625rem;
    background: var(--accent-bg, #3b82f6);
    border-radius: 50%;
    animation: upload-bounce 1.4s infinite ease-in-out both;
}

.upload-spinner span:nth-child(1) { animation-delay: -0.32s; }
.upload-spinner span:nth-child(2) { animation-delay: -0.16s; }

@keyframes upload-bounce {
    0%, 80%, 100% { transform: scale(0); }
    40% { transform: scale(1); }
}
"#;
