// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fragment splitting for raw backend replies.
//!
//! A reply part may hold several JSON objects back to back (`{..}{..}`),
//! objects separated by newlines, and free text lines. The splitter tracks
//! brace depth and JSON string state so braces and newlines inside string
//! values never split a fragment. Array brackets are not tracked.

/// Split a raw segment into trimmed, non-empty fragments in source order.
///
/// - a top-level `{...}` span is flushed as soon as its closing brace is seen
/// - outside objects and strings, `\n` and `\r` end the current fragment
/// - whatever remains at end of input is the final fragment
pub fn split_fragments(segment: &str) -> Vec<String> {
    let mut splitter = Splitter::default();
    for ch in segment.chars() {
        splitter.feed(ch);
    }
    splitter.finish()
}

#[derive(Default)]
struct Splitter {
    fragments: Vec<String>,
    buffer: String,
    depth: usize,
    in_string: bool,
    escape_next: bool,
}

impl Splitter {
    fn feed(&mut self, ch: char) {
        if self.in_string {
            self.buffer.push(ch);
            if self.escape_next {
                self.escape_next = false;
            } else if ch == '\\' {
                self.escape_next = true;
            } else if ch == '"' {
                self.in_string = false;
            }
            return;
        }

        match ch {
            '"' => {
                self.in_string = true;
                self.buffer.push(ch);
            }
            '{' => {
                self.depth += 1;
                self.buffer.push(ch);
            }
            '}' => {
                self.buffer.push(ch);
                if self.depth > 0 {
                    self.depth -= 1;
                    if self.depth == 0 {
                        self.flush();
                    }
                }
            }
            '\n' | '\r' if self.depth == 0 => self.flush(),
            _ => self.buffer.push(ch),
        }
    }

    fn flush(&mut self) {
        let trimmed = self.buffer.trim();
        if !trimmed.is_empty() {
            self.fragments.push(trimmed.to_string());
        }
        self.buffer.clear();
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.fragments
    }
}
