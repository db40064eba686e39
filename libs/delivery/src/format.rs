//! Bordered note rendering
//!
//! A delivered note interrupts someone's terminal, so it is framed to stand
//! apart from whatever it lands in: a header block naming the sender and a
//! body block, each word-wrapped to the configured column width, each visual
//! line padded to that width and framed with the border character. Header
//! and body are wrapped and bordered independently, separated by a rule.
//!
//! Rendering is a pure function of `(sender, body, columns)` and knows
//! nothing about sinks.

use msp_types::protocol_constants::NOTE_BORDER;
use msp_types::text;

/// Narrowest usable content width; anything smaller degenerates into a
/// column of single characters.
const MIN_COLUMNS: usize = 8;

/// Render the full note block, framed by one leading and one trailing
/// newline so it detaches from the victim's prompt.
pub fn format_note(sender: &[u8], body: &[u8], columns: usize) -> String {
    let columns = columns.max(MIN_COLUMNS);
    let header = format!("New message from {}:", text::lossy(sender));
    let body = text::lossy(body);

    let rule: String = NOTE_BORDER.to_string().repeat(columns + 4);
    let mut note = String::new();

    note.push('\n');
    note.push_str(&rule);
    note.push('\n');
    for line in wrap(&header, columns) {
        push_bordered(&mut note, &line, columns);
    }
    note.push_str(&rule);
    note.push('\n');
    for line in wrap(&body, columns) {
        push_bordered(&mut note, &line, columns);
    }
    note.push_str(&rule);
    note.push('\n');

    note
}

fn push_bordered(note: &mut String, line: &str, columns: usize) {
    note.push(NOTE_BORDER);
    note.push(' ');
    note.push_str(line);
    for _ in line.chars().count()..columns {
        note.push(' ');
    }
    note.push(' ');
    note.push(NOTE_BORDER);
    note.push('\n');
}

/// Greedy word wrap. Explicit newlines in the input are respected; blank
/// input lines survive as blank visual lines; words wider than the column
/// width are hard-broken.
fn wrap(input: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in input.split('\n') {
        let mut current = String::new();
        let mut wrote_word = false;

        for word in raw_line.split_whitespace() {
            wrote_word = true;
            let mut piece = word;

            // Hard-break anything that cannot fit on a line of its own.
            while piece.chars().count() > columns {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let break_at = piece
                    .char_indices()
                    .nth(columns)
                    .map(|(offset, _)| offset)
                    .unwrap_or(piece.len());
                let (head, rest) = piece.split_at(break_at);
                lines.push(head.to_string());
                piece = rest;
            }

            let separator = usize::from(!current.is_empty());
            if current.chars().count() + separator + piece.chars().count() > columns {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(piece);
        }

        if !current.is_empty() || !wrote_word {
            lines.push(current);
        }
    }

    lines
}
