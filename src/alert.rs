//! Expiry alerts - terminal bell plus desktop notification, both best-effort
//!
//! Platform capability may be absent (no notification daemon, bell muted);
//! every failure here is logged at debug and swallowed so the countdown
//! state never depends on it.

use std::io::Write;

use notify_rust::Notification;
use tracing::debug;

/// Fire the "rest is over" alerts.
pub fn timer_expired(base_secs: u32) {
    ring_bell();

    let result = Notification::new()
        .appname("abruscheda")
        .summary("Riposo finito!")
        .body(&format!("{base_secs}s di recupero completati. Sotto col prossimo set."))
        .icon("alarm-clock")
        .show();
    if let Err(e) = result {
        debug!(error = %e, "desktop notification unavailable");
    }
}

fn ring_bell() {
    let mut out = std::io::stdout();
    // Two tones in the browser original; the terminal gets a double bell.
    if out.write_all(b"\x07\x07").and_then(|_| out.flush()).is_err() {
        debug!("could not ring terminal bell");
    }
}
