use dioxus::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DragEvent, Element, Event, File, FileReader, HtmlImageElement, HtmlInputElement};

fn document() -> web_sys::Document {
    web_sys::window()
        .expect("no global `window` exists")
        .document()
        .expect("no document on window")
}

pub fn element_by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

/// Client (layout) size of an element, in CSS pixels.
pub fn client_size(element_id: &str) -> Option<(f64, f64)> {
    let element = element_by_id(element_id)?;
    Some((
        f64::from(element.client_width()),
        f64::from(element.client_height()),
    ))
}

/// Natural (decoded) size of an image element. Zero until the image loads.
pub fn natural_image_size(element_id: &str) -> Option<(f64, f64)> {
    let image = element_by_id(element_id)?.dyn_into::<HtmlImageElement>().ok()?;
    Some((
        f64::from(image.natural_width()),
        f64::from(image.natural_height()),
    ))
}

/// Advanced-upload feature check: drag events plus the FormData and
/// FileReader APIs. Browsers missing any of these fall back to the plain
/// file-picker path.
pub fn supports_drag_and_drop() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Some(doc) = window.document() else {
        return false;
    };
    let Ok(probe) = doc.create_element("div") else {
        return false;
    };

    let has = |target: &JsValue, key: &str| {
        js_sys::Reflect::has(target, &JsValue::from_str(key)).unwrap_or(false)
    };

    (has(&probe, "ondragstart") && has(&probe, "ondrop"))
        && has(&window, "FormData")
        && has(&window, "FileReader")
}

/// Keeps the drop-target listeners alive for the widget's lifetime.
/// Dropping this detaches nothing but invalidates the closures, so it must
/// be held until the page unloads.
pub struct DropTargetRuntime {
    _on_drag_enter: Closure<dyn FnMut(DragEvent)>,
    _on_drag_over: Closure<dyn FnMut(DragEvent)>,
    _on_drag_leave: Closure<dyn FnMut(DragEvent)>,
    _on_drag_end: Closure<dyn FnMut(DragEvent)>,
    _on_drop: Closure<dyn FnMut(DragEvent)>,
}

/// Wires dragenter/dragover/dragleave/dragend/drop on the element.
/// `on_drag_state` receives `true` on enter and `false` on every terminal
/// event, so the active marker can never stay stuck on. `on_files` receives
/// the dropped items of kind "file".
pub fn register_drop_target(
    element_id: &str,
    on_drag_state: Callback<bool>,
    on_files: Callback<Vec<File>>,
) -> Option<DropTargetRuntime> {
    let Some(target) = element_by_id(element_id) else {
        log::error!("drop target #{element_id} is not mounted");
        return None;
    };

    let on_drag_state_enter = on_drag_state.clone();
    let on_drag_enter = Closure::wrap(Box::new(move |e: DragEvent| {
        e.prevent_default();
        on_drag_state_enter.call(true);
    }) as Box<dyn FnMut(DragEvent)>);

    // Without preventDefault here the browser navigates to the dropped file.
    let on_drag_over = Closure::wrap(Box::new(move |e: DragEvent| {
        e.prevent_default();
    }) as Box<dyn FnMut(DragEvent)>);

    let on_drag_state_leave = on_drag_state.clone();
    let on_drag_leave = Closure::wrap(Box::new(move |_e: DragEvent| {
        on_drag_state_leave.call(false);
    }) as Box<dyn FnMut(DragEvent)>);

    let on_drag_state_end = on_drag_state.clone();
    let on_drag_end = Closure::wrap(Box::new(move |_e: DragEvent| {
        on_drag_state_end.call(false);
    }) as Box<dyn FnMut(DragEvent)>);

    let on_drop = Closure::wrap(Box::new(move |e: DragEvent| {
        e.prevent_default();
        on_drag_state.call(false);
        let files = dropped_files(&e);
        if !files.is_empty() {
            on_files.call(files);
        }
    }) as Box<dyn FnMut(DragEvent)>);

    let listeners: [(&str, &Closure<dyn FnMut(DragEvent)>); 5] = [
        ("dragenter", &on_drag_enter),
        ("dragover", &on_drag_over),
        ("dragleave", &on_drag_leave),
        ("dragend", &on_drag_end),
        ("drop", &on_drop),
    ];
    for (name, closure) in listeners {
        if let Err(e) =
            target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        {
            log::error!("failed to add {name} listener: {e:?}");
        }
    }

    Some(DropTargetRuntime {
        _on_drag_enter: on_drag_enter,
        _on_drag_over: on_drag_over,
        _on_drag_leave: on_drag_leave,
        _on_drag_end: on_drag_end,
        _on_drop: on_drop,
    })
}

fn dropped_files(event: &DragEvent) -> Vec<File> {
    let Some(transfer) = event.data_transfer() else {
        return Vec::new();
    };

    let items = transfer.items();
    let mut files = Vec::new();
    for i in 0..items.length() {
        let Some(item) = items.get(i) else { continue };
        if item.kind() != "file" {
            continue;
        }
        if let Ok(Some(file)) = item.get_as_file() {
            files.push(file);
        }
    }
    files
}

/// Keeps the file-input change listener alive.
pub struct FileInputRuntime {
    _on_change: Closure<dyn FnMut(Event)>,
}

/// Wires the change event of an `<input type="file">` to `on_files`.
pub fn register_file_input(
    element_id: &str,
    on_files: Callback<Vec<File>>,
) -> Option<FileInputRuntime> {
    let Some(target) = element_by_id(element_id) else {
        log::error!("file input #{element_id} is not mounted");
        return None;
    };

    let on_change = Closure::wrap(Box::new(move |e: Event| {
        let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            return;
        };
        let Some(list) = input.files() else { return };

        let mut files = Vec::new();
        for i in 0..list.length() {
            if let Some(file) = list.get(i) {
                files.push(file);
            }
        }
        // Reset so re-selecting the same file fires change again.
        input.set_value("");

        if !files.is_empty() {
            on_files.call(files);
        }
    }) as Box<dyn FnMut(Event)>);

    if let Err(e) =
        target.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
    {
        log::error!("failed to add change listener: {e:?}");
    }

    Some(FileInputRuntime {
        _on_change: on_change,
    })
}

/// Keeps the preview image's load listener alive.
pub struct ImageLoadRuntime {
    _on_load: Closure<dyn FnMut(Event)>,
}

/// Fires `on_load` every time the image element finishes decoding a new
/// source, which is when its natural dimensions become trustworthy.
pub fn watch_image_load(element_id: &str, on_load: Callback<()>) -> Option<ImageLoadRuntime> {
    let Some(target) = element_by_id(element_id) else {
        log::error!("image #{element_id} is not mounted");
        return None;
    };

    let listener = Closure::wrap(Box::new(move |_e: Event| {
        on_load.call(());
    }) as Box<dyn FnMut(Event)>);

    if let Err(e) =
        target.add_event_listener_with_callback("load", listener.as_ref().unchecked_ref())
    {
        log::error!("failed to add load listener: {e:?}");
    }

    Some(ImageLoadRuntime { _on_load: listener })
}

/// Reads the file as a data URL for the preview image. Runs independently
/// of the network submission; the two may complete in either order.
pub fn read_file_to_data_url(file: &File, on_loaded: Callback<String>) {
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            log::error!("FileReader construction failed: {e:?}");
            return;
        }
    };

    let reader_for_load = reader.clone();
    let onload = Closure::once(Box::new(move |_e: JsValue| {
        match reader_for_load.result() {
            Ok(result) => {
                if let Some(url) = result.as_string() {
                    on_loaded.call(url);
                }
            }
            Err(e) => log::error!("preview read produced no result: {e:?}"),
        }
    }) as Box<dyn FnOnce(JsValue)>);
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    if let Err(e) = reader.read_as_data_url(file) {
        log::error!("preview read failed to start: {e:?}");
    }
}
