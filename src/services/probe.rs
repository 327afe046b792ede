//! Probe-and-stop sequences.
//!
//! Seasons, tours and games are listed without a count, so iteration asks
//! for position 1, 2, 3... until the first position that is absent.

use std::iter::FusedIterator;

/// Lazy sequence of `(position, item)` pairs ending at the first failed probe.
///
/// Positions start at 1. The sequence is finite as long as the underlying
/// page is, and [`Probe::restart`] rewinds it to position 1.
#[derive(Clone)]
pub struct Probe<F> {
    probe: F,
    next: usize,
    done: bool,
}

impl<F> Probe<F> {
    pub fn new(probe: F) -> Self {
        Self {
            probe,
            next: 1,
            done: false,
        }
    }

    /// Rewind to position 1.
    pub fn restart(&mut self) {
        self.next = 1;
        self.done = false;
    }
}

impl<T, F> Iterator for Probe<F>
where
    F: FnMut(usize) -> Option<T>,
{
    type Item = (usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let position = self.next;
        match (self.probe)(position) {
            Some(item) => {
                self.next += 1;
                Some((position, item))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<T, F> FusedIterator for Probe<F> where F: FnMut(usize) -> Option<T> {}

/// Shorthand for [`Probe::new`].
pub fn probe<T, F>(f: F) -> Probe<F>
where
    F: FnMut(usize) -> Option<T>,
{
    Probe::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_at_first_gap() {
        let present = [true, true, false, true];
        let items: Vec<_> = probe(|pos| present.get(pos - 1).copied().filter(|p| *p).map(|_| pos))
            .map(|(_, v)| v)
            .collect();
        assert_eq!(items, [1, 2]);
    }

    #[test]
    fn test_never_probes_past_end() {
        let mut calls = 0;
        let mut seq = probe(|pos| {
            calls += 1;
            (pos <= 2).then_some(pos)
        });
        assert_eq!(seq.next(), Some((1, 1)));
        assert_eq!(seq.next(), Some((2, 2)));
        assert_eq!(seq.next(), None);
        assert_eq!(seq.next(), None);
        drop(seq);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_restart() {
        let mut seq = probe(|pos| (pos <= 3).then_some(pos * 10));
        assert_eq!(seq.by_ref().count(), 3);
        seq.restart();
        assert_eq!(seq.next(), Some((1, 10)));
    }

    #[test]
    fn test_empty_when_first_probe_fails() {
        assert_eq!(probe(|_| None::<()>).count(), 0);
    }
}
