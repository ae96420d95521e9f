//! Natural ordering for asset identifiers.
//!
//! Asset files carry numeric suffixes (`hair2.png`, `hair10.png`), and explicit
//! index selection depends on their order being stable and numerically
//! intuitive. Identifiers are split into alternating non-digit and digit runs;
//! non-digit runs compare lexically, digit runs compare as integers.

use std::cmp::Ordering;

/// A run of an identifier: either text or a decimal number.
#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Text(&'a str),
    Digits(&'a str),
}

fn chunks(s: &str) -> impl Iterator<Item = Chunk<'_>> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_digit = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != is_digit)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        rest = tail;
        Some(if is_digit {
            Chunk::Digits(head)
        } else {
            Chunk::Text(head)
        })
    })
}

/// Compares two digit runs by numeric value without overflowing.
///
/// Leading zeros are ignored for the value comparison; when values tie the
/// shorter run sorts first so that the overall order stays total.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.len().cmp(&b.len()))
}

/// Natural-order comparison of two identifiers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);
    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => cmp_digits(x, y),
            (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => x.cmp(y),
            // Mixed runs fall back to plain lexical order of the runs.
            (Some(Chunk::Digits(x)), Some(Chunk::Text(y)))
            | (Some(Chunk::Text(x)), Some(Chunk::Digits(y))) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

/// Sorts identifiers in natural order, in place.
pub fn natural_sort<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}
