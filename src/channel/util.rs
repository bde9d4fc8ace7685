use crate::channel::patterns::ansi_pattern;

/// Strips ansi escape sequences out of the given byte slice.
#[must_use]
pub fn strip_ansi(b: &[u8]) -> Vec<u8> {
    ansi_pattern().replace_all(b, &b""[..]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_colors_and_cursor_moves() {
        assert_eq!(
            strip_ansi(b"\x1b[0;32mrouter\x1b[0m#\x1b[K"),
            b"router#".to_vec()
        );
        assert_eq!(strip_ansi(b"\x1b]0;title\x07r1>"), b"r1>".to_vec());
        assert_eq!(strip_ansi(b"plain"), b"plain".to_vec());
    }
}
