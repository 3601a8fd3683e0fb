//! Safety net for failures outside the error taxonomy.
//!
//! A panic anywhere in the pipeline is reported as an unexpected failure:
//! one `[ERROR]` line followed by a captured backtrace on stderr. `main`
//! catches the unwind and exits with `ExitCode::UNEXPECTED`.

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;

/// Installs the process-wide panic hook.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[ERROR] Unexpected exception: {}", panic_message(info));
        eprintln!("{}", Backtrace::force_capture());
    }));
}

/// Prints the backtrace for an unexpected error that did not panic.
pub fn report_unexpected() {
    eprintln!("{}", Backtrace::force_capture());
}

/// Extracts the payload and location of a panic as one line.
#[must_use]
pub fn panic_message(info: &PanicHookInfo<'_>) -> String {
    let payload = payload_text(info.payload());
    match info.location() {
        Some(loc) => format!("{payload} ({}:{})", loc.file(), loc.line()),
        None => payload,
    }
}

/// Text of a panic payload, for `&str` and `String` payloads.
#[must_use]
pub fn payload_text(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "<non-string panic payload>".to_string())
}
