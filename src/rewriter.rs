//! Splicing expanded directive blocks back into template text

/// Replace `text[start..end]` with `replacement`.
///
/// When the replacement is empty, the block sat on its own after a blank line
/// (`"\n\n"` before it) and a newline follows it, one of the preceding
/// newlines is dropped too, so removing a block never leaves a double blank
/// line behind.
pub fn integrate_block(text: &str, replacement: &str, start: usize, end: usize) -> String {
    let bytes = text.as_bytes();
    let collapse = replacement.is_empty()
        && start >= 2
        && bytes[start - 1] == b'\n'
        && bytes[start - 2] == b'\n'
        && bytes.get(end) == Some(&b'\n');

    if collapse {
        let mut result = String::with_capacity(text.len());
        result.push_str(&text[..start - 1]);
        result.push_str(&text[end..]);
        result
    } else {
        let mut result = String::with_capacity(text.len() - (end - start) + replacement.len());
        result.push_str(&text[..start]);
        result.push_str(replacement);
        result.push_str(&text[end..]);
        result
    }
}
