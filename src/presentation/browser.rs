// Hand the authorization URL to the desktop browser
use std::io;

/// Opens `url` with the system browser. Failure is logged and reported as
/// `false` so the caller can fall back to the printed URL.
pub fn open_authorization_url(url: &str) -> bool {
    launch_with(url, webbrowser::open)
}

fn launch_with<F>(url: &str, open: F) -> bool
where
    F: FnOnce(&str) -> io::Result<()>,
{
    match open(url) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Could not open a browser: {}", e);
            false
        }
    }
}
