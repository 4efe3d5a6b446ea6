/// Activation page launcher
///
/// Best-effort: a headless environment or missing browser must not abort
/// the run, so failures are reported and the URL is printed for manual use.

/// Open `url` in the user's default browser.
pub fn open_activation_page(url: &str) {
    eprintln!("🌐 Opening activation page in your browser...");

    if let Err(e) = open::that(url) {
        eprintln!("⚠️  Could not open browser: {}", e);
        eprintln!("    Visit this URL to obtain your authorization code:");
        eprintln!("    {}", url);
    }
}
