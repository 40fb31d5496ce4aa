// Lightweight text scanning shared by the construct heuristics.
//
// None of this tokenizes a language. It only blanks out string literals and
// comments so brace counting is not thrown off by `"{"`, `// }` or `/* { */`.

/// Source text with string literals and comments blanked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Masked {
    pub code: String,
    /// Line and block comments seen while masking (a leading `#!` line is not one).
    pub comments: usize,
}

/// Replace string literal and comment bytes with spaces.
///
/// Byte offsets and newlines are preserved, so positions in the masked text
/// map one-to-one onto the input.
pub(crate) fn mask_literals(text: &str) -> Masked {
    let bytes = text.as_bytes();
    let mut out = bytes.to_vec();
    let mut comments = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' if starts_triple(bytes, i, b) => {
                let end = find_triple_end(bytes, i + 3, b);
                blank(&mut out, i, end);
                i = end;
            }
            b'"' | b'\'' => {
                let end = find_quote_end(bytes, i + 1, b, false);
                blank(&mut out, i, end);
                i = end;
            }
            b'`' => {
                let end = find_quote_end(bytes, i + 1, b, true);
                blank(&mut out, i, end);
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = line_end(bytes, i);
                blank(&mut out, i, end);
                comments += 1;
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = block_comment_end(bytes, i + 2);
                blank(&mut out, i, end);
                comments += 1;
                i = end;
            }
            b'#' if i == 0 || bytes[i - 1].is_ascii_whitespace() => {
                let end = line_end(bytes, i);
                blank(&mut out, i, end);
                if !(i == 0 && bytes.get(1) == Some(&b'!')) {
                    comments += 1;
                }
                i = end;
            }
            _ => {
                i += 1;
            }
        }
    }

    // Masked ranges start and end on ASCII delimiters, so the buffer stays UTF-8.
    let code = String::from_utf8(out)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned());
    Masked { code, comments }
}

/// Byte offset of the delimiter closing the `{`, `(` or `[` at `open`, if balanced.
pub(crate) fn matching_delimiter(masked: &str, open: usize) -> Option<usize> {
    let bytes = masked.as_bytes();
    let (opener, closer) = match bytes.get(open)? {
        b'{' => (b'{', b'}'),
        b'(' => (b'(', b')'),
        b'[' => (b'[', b']'),
        _ => return None,
    };
    let mut depth = 0usize;
    for (offset, b) in bytes.iter().enumerate().skip(open) {
        match *b {
            b if b == opener => depth += 1,
            b if b == closer => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Leading whitespace width of a line (tabs count as four columns).
pub(crate) fn indent_of(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn starts_triple(bytes: &[u8], i: usize, quote: u8) -> bool {
    bytes.get(i + 1) == Some(&quote) && bytes.get(i + 2) == Some(&quote)
}

fn find_triple_end(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i + 2 < bytes.len() {
        if bytes[i] == quote && bytes[i + 1] == quote && bytes[i + 2] == quote {
            return i + 3;
        }
        i += 1;
    }
    bytes.len()
}

fn find_quote_end(bytes: &[u8], mut i: usize, quote: u8, multiline: bool) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if !multiline => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn block_comment_end(bytes: &[u8], i: usize) -> usize {
    bytes[i.min(bytes.len())..]
        .windows(2)
        .position(|pair| pair == b"*/")
        .map(|pos| i + pos + 2)
        .unwrap_or(bytes.len())
}

fn line_end(bytes: &[u8], i: usize) -> usize {
    bytes[i..]
        .iter()
        .position(|b| *b == b'\n')
        .map(|pos| i + pos)
        .unwrap_or(bytes.len())
}

fn blank(out: &mut [u8], start: usize, end: usize) {
    let end = end.min(out.len());
    for byte in &mut out[start..end] {
        if *byte != b'\n' {
            *byte = b' ';
        }
    }
}
