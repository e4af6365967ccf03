//! Focus navigation for remote-control input
//!
//! Focus is a single index into whatever set of focusable elements the
//! active screen exposes at the moment of the key press. The set is never
//! cached here; callers pass its current size on every move.

/// Direction of a focus move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Next element (remote Down)
    Forward,
    /// Previous element (remote Up)
    Backward,
}

impl Direction {
    fn delta(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Next focus index, wrapping at both ends
///
/// Returns `None` for an empty focusable set.
pub fn next_index(previous: usize, direction: Direction, size: usize) -> Option<usize> {
    if size == 0 {
        return None;
    }
    let size = size as isize;
    let previous = (previous as isize) % size;
    Some(((previous + direction.delta() + size) % size) as usize)
}

/// Focus index owned by the session controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusNavigator {
    index: usize,
}

impl FocusNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move focus within a set of `size` elements. No-op when the set is empty.
    pub fn navigate(&mut self, direction: Direction, size: usize) -> Option<usize> {
        let next = next_index(self.index, direction, size)?;
        self.index = next;
        Some(next)
    }

    /// Back to the first focusable element
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_ways() {
        assert_eq!(next_index(0, Direction::Backward, 5), Some(4));
        assert_eq!(next_index(4, Direction::Forward, 5), Some(0));
        assert_eq!(next_index(2, Direction::Forward, 5), Some(3));
    }

    #[test]
    fn test_empty_set_is_noop() {
        let mut focus = FocusNavigator::new();
        assert_eq!(focus.navigate(Direction::Forward, 0), None);
        assert_eq!(focus.index(), 0);
    }

    #[test]
    fn test_single_element_stays_put() {
        assert_eq!(next_index(0, Direction::Forward, 1), Some(0));
        assert_eq!(next_index(0, Direction::Backward, 1), Some(0));
    }

    #[test]
    fn test_stale_index_after_shrink() {
        // Set shrank from 10 to 3 while focus sat on 7.
        assert_eq!(next_index(7, Direction::Forward, 3), Some(2));
    }
}
