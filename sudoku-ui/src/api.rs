use gloo_net::http::Request;
use std::sync::OnceLock;
use sudoku_types::SolutionResponse;
use web_sys::{File, FormData};

/// Multipart field name the solver expects the image under.
pub const UPLOAD_FIELD: &str = "sudokuFile";

/// Get the API base URL based on current environment
/// - In development (localhost): use http://localhost:8080
/// - In production: use same origin (the solver serves the static files)
fn get_api_base() -> String {
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();

    if hostname == "localhost" || hostname == "127.0.0.1" {
        "http://localhost:8080".to_string()
    } else {
        "".to_string()
    }
}

/// Lazy-static equivalent for WASM - computed at first use
static API_BASE_CACHE: OnceLock<String> = OnceLock::new();

/// Get the cached API base URL
pub fn api_base() -> &'static str {
    API_BASE_CACHE.get_or_init(get_api_base).as_str()
}

/// Why a submission failed. Everything here is recovered locally and shown
/// as a single error node; nothing is fatal to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// No response at all: network down, endpoint unreachable.
    Transport(String),
    /// The solver answered but reported failure (non-2xx or `Success:false`).
    Server { message: String },
    /// The body was not the expected JSON shape.
    Malformed(String),
}

impl SolveError {
    /// The text placed in the error node. Transport and parse details stay
    /// in the log; the user gets something actionable.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => {
                "Could not reach the solver. Check your connection and try again.".to_string()
            }
            Self::Server { message } => message.clone(),
            Self::Malformed(_) => "The solver returned an unreadable response.".to_string(),
        }
    }
}

/// Submits one puzzle image and returns the parsed solution.
///
/// The solver reports panics as JSON with a non-2xx status, so the body is
/// parsed before the status is inspected and its `Error`/`Title` text is
/// preferred over a bare status code.
pub async fn solve_puzzle(file: &File) -> Result<SolutionResponse, SolveError> {
    let form = FormData::new()
        .map_err(|e| SolveError::Transport(format!("form construction failed: {e:?}")))?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
        .map_err(|e| SolveError::Transport(format!("form field append failed: {e:?}")))?;

    let response = Request::post(&format!("{}/", api_base()))
        .header("X-Requested-With", "XMLHttpRequest")
        .body(form)
        .map_err(|e| SolveError::Transport(format!("request build failed: {e}")))?
        .send()
        .await
        .map_err(|e| SolveError::Transport(format!("request failed: {e}")))?;

    let status_ok = response.ok();
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| SolveError::Transport(format!("response body read failed: {e}")))?;

    let data: SolutionResponse = serde_json::from_str(&text)
        .map_err(|e| SolveError::Malformed(format!("failed to parse JSON: {e}")))?;

    if !status_ok || !data.success {
        let mut message = data.failure_message();
        if !status_ok {
            log::warn!("solver answered HTTP {status}: {message}");
        }
        if message.is_empty() {
            message = format!("HTTP error: {status}");
        }
        return Err(SolveError::Server { message });
    }

    Ok(data)
}

/// Fetches a sample puzzle image and wraps it so it submits identically to
/// a user-chosen file. A zero status is accepted alongside HTTP success;
/// it is what local/offline fetches report despite carrying a body.
pub async fn fetch_sample(url: &str) -> Result<File, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("sample fetch failed: {e}"))?;

    let status = response.status();
    if !response.ok() && status != 0 {
        return Err(format!("HTTP error: {status}"));
    }

    let bytes = response
        .binary()
        .await
        .map_err(|e| format!("sample body read failed: {e}"))?;

    let name = url
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("sample.png");
    file_from_bytes(&bytes, name)
}

/// Builds a `File` from raw bytes, guessing the MIME type from the name's
/// extension (the solver special-cases GIF uploads server-side).
pub fn file_from_bytes(bytes: &[u8], name: &str) -> Result<File, String> {
    let mime = match name.rsplit('.').next() {
        Some("gif") => "image/gif",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    };

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::FilePropertyBag::new();
    options.set_type(mime);

    File::new_with_u8_array_sequence_and_options(&parts, name, &options)
        .map_err(|e| format!("file construction failed: {e:?}"))
}
