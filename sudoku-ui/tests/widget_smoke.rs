#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn browser_supports_advanced_upload() {
    assert!(sudoku_ui::interop::supports_drag_and_drop());
}

#[wasm_bindgen_test]
fn sample_bytes_become_a_named_file() {
    let file = sudoku_ui::api::file_from_bytes(&[0x89, 0x50, 0x4e, 0x47], "sample.png")
        .expect("file construction");
    assert_eq!(file.name(), "sample.png");
    assert_eq!(file.type_(), "image/png");
    assert_eq!(file.size(), 4.0);
}

#[wasm_bindgen_test]
fn gif_samples_keep_their_mime_type() {
    let file =
        sudoku_ui::api::file_from_bytes(&[0x47, 0x49, 0x46], "grid.gif").expect("file construction");
    assert_eq!(file.type_(), "image/gif");
}
