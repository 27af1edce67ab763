//! Reordering helpers
//!
//! There is no index-addressed move on the server. A move is computed here
//! on a copy of the list and the whole result is submitted as a
//! full-collection replace.

use std::fmt;
use std::str::FromStr;

use crate::models::LinkItem;

/// Direction to move a link by one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("unknown direction '{}' (expected up or down)", other)),
        }
    }
}

/// The list with the item at `index` moved one step in `direction`
///
/// Returns `None` when the move is a no-op: the first item cannot move up,
/// the last cannot move down, and out-of-range indexes do nothing.
pub fn moved(links: &[LinkItem], index: usize, direction: Direction) -> Option<Vec<LinkItem>> {
    if index >= links.len() {
        return None;
    }

    let target = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down if index + 1 < links.len() => index + 1,
        Direction::Down => return None,
    };

    let mut reordered = links.to_vec();
    let item = reordered.remove(index);
    reordered.insert(target, item);
    Some(reordered)
}

/// Like [`moved`], addressing the item by id
pub fn moved_by_id(links: &[LinkItem], id: &str, direction: Direction) -> Option<Vec<LinkItem>> {
    let index = links.iter().position(|link| link.id == id)?;
    moved(links, index, direction)
}
