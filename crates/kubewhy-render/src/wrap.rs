//! Word wrapping for long report lines.

/// Column width used by the human renderer.
pub const WRAP_WIDTH: usize = 80;

/// How far past the width to look for a space when none precedes it.
const LOOKAHEAD: usize = 20;

/// Wrap `text` at `width` characters.
///
/// The first line is not indented (the caller has already written its prefix);
/// continuation lines start with `indent` and are shortened by its length.
/// Breaks prefer the nearest space before the limit within half the width,
/// then a space within [`LOOKAHEAD`] characters after it, then a hard break.
/// Widths are counted in characters so multi-byte text never splits a code point.
pub fn wrap_indent(text: &str, width: usize, indent: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }

    let indent_len = indent.chars().count();
    let mut out = String::with_capacity(text.len() + indent.len() * 2);
    let mut remaining: &[char] = &chars;
    let mut first = true;

    while !remaining.is_empty() {
        let take = if first {
            width.max(1)
        } else {
            out.push('\n');
            out.push_str(indent);
            width.saturating_sub(indent_len).max(1)
        };

        if remaining.len() <= take {
            out.extend(remaining);
            break;
        }

        let cut = break_point(remaining, take);
        out.extend(&remaining[..cut]);
        remaining = trim_spaces(&remaining[cut..]);
        first = false;
    }
    out
}

fn break_point(chars: &[char], take: usize) -> usize {
    let mut i = take;
    while i > take / 2 {
        if chars[i] == ' ' {
            return i;
        }
        i -= 1;
    }
    chars[take..]
        .iter()
        .take(LOOKAHEAD)
        .position(|c| *c == ' ')
        .map_or(take, |offset| take + offset)
}

fn trim_spaces(chars: &[char]) -> &[char] {
    let start = chars
        .iter()
        .position(|c| !c.is_whitespace())
        .unwrap_or(chars.len());
    let end = chars
        .iter()
        .rposition(|c| !c.is_whitespace())
        .map_or(start, |i| i + 1);
    &chars[start..end.max(start)]
}
