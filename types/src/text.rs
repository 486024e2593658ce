//! Terminal-safe rendering of repository-supplied text.
//!
//! Check descriptions and error messages come from the network. Before they
//! reach the terminal, escape sequences and control characters are removed so
//! they cannot move the cursor, retitle the window or write to the clipboard.

use std::borrow::Cow;
use std::iter::Peekable;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Strip escape sequences and control characters, folding line breaks and
/// tabs into single spaces so the result fits on one logical line.
#[must_use]
pub fn display_line(input: &str) -> Cow<'_, str> {
    if !input.chars().any(needs_rewrite) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ESC => skip_sequence(&mut chars),
            '\u{009b}' => skip_csi(&mut chars),
            '\n' | '\r' | '\t' => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn needs_rewrite(c: char) -> bool {
    c.is_control()
}

fn skip_sequence<I: Iterator<Item = char>>(chars: &mut Peekable<I>) {
    match chars.peek() {
        Some('[') => {
            chars.next();
            skip_csi(chars);
        }
        Some(']' | 'P' | '^' | '_') => {
            chars.next();
            skip_string(chars);
        }
        Some(_) => {
            chars.next();
        }
        None => {}
    }
}

/// Parameter and intermediate bytes, then one final byte.
fn skip_csi<I: Iterator<Item = char>>(chars: &mut Peekable<I>) {
    while let Some(&c) = chars.peek() {
        if ('\x40'..='\x7e').contains(&c) {
            chars.next();
            return;
        }
        if !('\x20'..='\x3f').contains(&c) {
            return;
        }
        chars.next();
    }
}

/// OSC/DCS payload up to BEL or ST (`ESC \`).
fn skip_string<I: Iterator<Item = char>>(chars: &mut Peekable<I>) {
    while let Some(c) = chars.next() {
        if c == BEL {
            return;
        }
        if c == ESC && chars.peek() == Some(&'\\') {
            chars.next();
            return;
        }
    }
}
