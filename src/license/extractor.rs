use std::io::{self, Read};

use super::UNKNOWN;

const SPDX_MARKER: &str = "SPDX-License-Identifier:";

/// Comment terminators that may follow the identifier on the same line.
const CLOSE_COMMENTS: [&str; 4] = ["*/", "*}", "#}", "-->"];

/// Only the file header is searched.
const MAX_HEADER_LINES: usize = 21;

/// Find the SPDX license token in the header of already-decoded lines.
///
/// Returns [`UNKNOWN`] if no identifier appears in the first
/// 21 lines, including for empty input.
pub fn find_license<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .take(MAX_HEADER_LINES)
        .find_map(|line| match_line(line.as_ref()))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Read all of `reader` and find its SPDX token.
///
/// The whole content must decode as UTF-8, not only the scanned header. A
/// decode failure surfaces as an `io::Error` of kind `InvalidData`.
pub fn read_license<R: Read>(mut reader: R) -> io::Result<String> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    let text = std::str::from_utf8(&content)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(find_license(text.lines()))
}

/// Extract the token from one line, if it carries the SPDX marker.
fn match_line(line: &str) -> Option<String> {
    let (_, rest) = line.trim().split_once(SPDX_MARKER)?;
    let mut text = rest.trim();
    // Everything from the first close-comment marker on is dropped.
    if let Some(end) = CLOSE_COMMENTS.iter().filter_map(|close| text.find(close)).min() {
        text = text[..end].trim_end();
    }

    // A marker with nothing after it is as good as no marker.
    if text.is_empty() {
        return Some(UNKNOWN.to_string());
    }
    Some(text.to_string())
}
