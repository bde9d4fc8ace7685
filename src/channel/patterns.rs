use once_cell::sync::OnceCell;
use regex::bytes::Regex;

/// # Panics
///
///  Returns (once), the compiled ansi matching pattern. This should realistically never panic.
#[allow(clippy::expect_used)]
pub fn ansi_pattern() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();

    RE.get_or_init(|| {
        Regex::new(r"\x1b(?:\[[0-9;?]*[ -/]*[@-~]|\][^\x07\x1b]*(?:\x07|\x1b\\)|[()][0-9A-Za-z]|[=>78DEHM])")
            .expect("failed compiling pattern, this is a bug")
    })
}
