/// Separator between documents in one file, in its LF form: a line holding exactly `---`.
pub const DOCUMENT_SEPARATOR: &[u8] = b"\n---\n";

/// Split raw file content into document segments, in source order.
///
/// A separator is a line holding exactly `---` (a trailing `\r` is allowed) that follows
/// a newline and is itself terminated by one. The line break before a separator,
/// `\n` or `\r\n`, belongs to the separator.
///
/// Content without a separator is a single segment. A leading `---` on the first line
/// is not a separator and stays with the first segment, where the YAML decoder accepts
/// it as a document start marker.
pub fn split_documents(data: &[u8]) -> Vec<&[u8]> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut line = 0;
    while line < data.len() {
        let end = data[line..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(data.len(), |p| line + p);

        if line > 0 && end < data.len() && matches!(&data[line..end], b"---" | b"---\r") {
            let mut seg_end = if line == start { start } else { line - 1 };
            if seg_end > start && data[seg_end - 1] == b'\r' {
                seg_end -= 1;
            }
            out.push(&data[start..seg_end]);
            start = end + 1;
        }
        line = end + 1;
    }
    out.push(&data[start..]);
    out
}
