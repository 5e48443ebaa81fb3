use std::cmp::Ordering;

/// Compares strings so that embedded numbers order by value: `ds2 < ds10`.
///
/// Runs of ASCII digits compare numerically, everything else compares
/// byte-wise. Ties (`ds01` vs `ds1`) fall back to plain string order so the
/// result stays a total order.
#[must_use]
pub fn natural_cmp(left: &str, right: &str) -> Ordering {
    let mut a = Chunks::new(left);
    let mut b = Chunks::new(right);

    loop {
        let ordering = match (a.next(), b.next()) {
            (None, None) => return left.cmp(right),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => compare_digits(x, y),
            (Some(x), Some(y)) => x.as_str().cmp(y.as_str()),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// Sorts in place with [`natural_cmp`].
pub fn natural_sort<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}

fn compare_digits(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl<'a> Chunk<'a> {
    fn as_str(self) -> &'a str {
        match self {
            Self::Digits(s) | Self::Text(s) => s,
        }
    }
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}
