//! Character-count line wrapping for the fixed display regions.
//!
//! Widths are counted in chars, not pixels, so the same rules apply whatever
//! face or size ends up drawing the text.

/// Wrap threshold for the category label.
pub const LABEL_BREAK: usize = 15;
/// Wrap threshold for the headline.
pub const TITLE_BREAK: usize = 34;
/// Wrap threshold for the description.
pub const DESCRIPTION_BREAK: usize = 60;

/// Greedy word wrap.
///
/// Scans left to right remembering the last space and the last break. Once
/// the current position is more than `break_length` chars past the last
/// break, the last space becomes a newline and is the new break. Spaces are
/// replaced, never inserted, so the char count is unchanged.
///
/// When no space has been seen yet, the remembered space is index 0 and the
/// first char is turned into the newline. Callers that feed unbroken runs
/// longer than `break_length` lose that char.
pub fn wrap(text: &str, break_length: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let breaks = break_positions(&chars, break_length);

    let mut next = breaks.iter().peekable();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if next.peek() == Some(&&i) {
                next.next();
                '\n'
            } else {
                c
            }
        })
        .collect()
}

/// Indices that become newlines, ascending and without repeats.
fn break_positions(chars: &[char], break_length: usize) -> Vec<usize> {
    let mut breaks: Vec<usize> = Vec::new();
    let mut last_space = 0;
    let mut last_break = 0;

    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            last_space = i;
        }
        if i - last_break > break_length {
            // Re-breaking at the same space is a no-op
            if breaks.last() != Some(&last_space) {
                breaks.push(last_space);
            }
            last_break = last_space;
        }
    }

    breaks
}

/// Force one newline after the 15th char of a long label, then wrap it.
pub fn break_label(label: &str) -> String {
    let forced = match label.char_indices().nth(LABEL_BREAK) {
        Some((at, _)) => format!("{}\n{}", &label[..at], &label[at..]),
        None => label.to_string(),
    };
    wrap(&forced, LABEL_BREAK)
}

pub fn wrap_title(title: &str) -> String {
    wrap(title, TITLE_BREAK)
}

pub fn wrap_description(description: &str) -> String {
    wrap(description, DESCRIPTION_BREAK)
}
