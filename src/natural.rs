//! Natural-order string comparison.
//!
//! Runs of ASCII digits compare by numeric value, so `app-9` sorts before
//! `app-10`. The order is total and agrees with string equality.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl<'a> Chunk<'a> {
    fn as_str(&self) -> &'a str {
        match *self {
            Chunk::Digits(s) | Chunk::Text(s) => s,
        }
    }
}

fn chunks(value: &str) -> Vec<Chunk<'_>> {
    let bytes = value.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let digits = bytes[start].is_ascii_digit();
        let mut end = start + 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() == digits {
            end += 1;
        }
        // Digit runs are ASCII, so both boundaries fall on char boundaries.
        let run = &value[start..end];
        out.push(if digits { Chunk::Digits(run) } else { Chunk::Text(run) });
        start = end;
    }
    out
}

fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two strings in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l, r) {
            (Chunk::Digits(x), Chunk::Digits(y)) => cmp_numeric(x, y),
            _ => l.as_str().cmp(r.as_str()),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

/// True when `candidate` sorts strictly after `existing`.
pub fn is_newer(existing: &str, candidate: &str) -> bool {
    natural_cmp(existing, candidate) == Ordering::Less
}
