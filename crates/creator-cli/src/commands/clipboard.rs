use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::io::Write;

use creator_application::Clipboard;

/// Copies through the terminal with an OSC 52 escape sequence.
///
/// Terminals without OSC 52 support ignore the sequence.
pub struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    fn copy(&self, text: &str) {
        let encoded = BASE64_STANDARD.encode(text);
        let mut stdout = std::io::stdout();
        if let Err(e) = write!(stdout, "\x1b]52;c;{}\x07", encoded).and_then(|_| stdout.flush()) {
            tracing::warn!("Clipboard write failed: {}", e);
        }
    }
}
