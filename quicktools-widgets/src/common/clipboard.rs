//! Clipboard integration for the copy-output actions
//!
//! Uses arboard for cross-platform clipboard access. An unavailable
//! clipboard (headless session, missing capability) is a silent no-op:
//! the caller gets `false` and shows nothing.

use arboard::Clipboard;

/// Copy text to the system clipboard. Returns whether the copy happened,
/// so widgets only flash their "copied" indicator on success.
pub fn copy(text: &str) -> bool {
    if text.is_empty() {
        return false; // Nothing to copy
    }

    match Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text.to_string()) {
            Ok(()) => {
                tracing::debug!("copied {} bytes to clipboard", text.len());
                true
            }
            Err(e) => {
                tracing::debug!("clipboard write failed: {e}");
                false
            }
        },
        Err(e) => {
            tracing::debug!("clipboard unavailable: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_copy_is_a_no_op() {
        assert!(!copy(""));
    }

    #[test]
    #[ignore] // Requires clipboard access, may fail in CI
    fn test_copy() {
        assert!(copy("Hello, clipboard!"));
    }
}
