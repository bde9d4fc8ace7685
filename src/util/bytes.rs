/// Trim all bytes in the cutset from the *right* side of `b`.
#[must_use]
pub fn trim_cutset_right<'a>(
    b: &'a [u8],
    cutset: &[u8],
) -> &'a [u8] {
    let to = b
        .iter()
        .rposition(|c| !cutset.contains(c))
        .map_or(0, |idx| idx + 1);

    b.get(..to).unwrap_or_default()
}
