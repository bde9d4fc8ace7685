use std::time::Duration;

/// The default return character, sessions normally replace it with their line terminator.
pub const DEFAULT_RETURN_CHAR: &str = "\n";

/// The default delay between reads from the underlying transport object.
pub const DEFAULT_READ_DELAY: Duration = Duration::from_micros(250);

/// The ANSI escape byte.
pub const ANSI_ESCAPE_BYTE: u8 = 0x1b;
