//! Chainable seat queries over a bracket
//!
//! Condition methods (`winners`, `losers`, `round`) only record filters.
//! Access methods (`all`, `first`, `last`, `seat`) walk the bracket every time
//! they are called and return nodes in top-down order.
//!
//! ```ignore
//! let bracket = service.by_size(4)?;
//! let seat = bracket.winners().round(1).seat(3);
//! ```

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::bracket::{Bracket, Node};

/// Half of a bracket relative to the root seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Seats positioned below the root
    Winners,
    /// Seats positioned above the root
    Losers,
}

/// Query builder over a borrowed bracket.
#[derive(Debug, Clone, Copy)]
pub struct PositionalRelation<'a> {
    bracket: &'a Bracket,
    side: Option<Side>,
    round: Option<usize>,
}

impl<'a> PositionalRelation<'a> {
    pub fn new(bracket: &'a Bracket) -> Self {
        Self {
            bracket,
            side: None,
            round: None,
        }
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn round_number(&self) -> Option<usize> {
        self.round
    }

    pub fn winners(mut self) -> Self {
        self.side = Some(Side::Winners);
        self
    }

    pub fn losers(mut self) -> Self {
        self.side = Some(Side::Losers);
        self
    }

    /// Restrict to a round; round 1 is the deepest tier of a side.
    pub fn round(mut self, number: usize) -> Self {
        self.round = Some(number);
        self
    }

    /// Every seat matching the current conditions.
    #[instrument(level = "trace", skip(self), fields(side = ?self.side, round = ?self.round))]
    pub fn all(&self) -> Vec<&'a Node> {
        match (self.side, self.round) {
            (Some(side), Some(round)) => self.by_round(round, side),
            (Some(side), None) => match self.bracket.side_root(side) {
                Some(start) => self.bracket.iter_top_down_from(start).collect(),
                None => Vec::new(),
            },
            (None, Some(round)) => {
                let mut seats = self.by_round(round, Side::Winners);
                seats.extend(self.by_round(round, Side::Losers));
                seats
            }
            (None, None) => self.bracket.to_vec(),
        }
    }

    pub fn first(&self) -> Option<&'a Node> {
        self.all().first().copied()
    }

    pub fn last(&self) -> Option<&'a Node> {
        self.all().last().copied()
    }

    /// 1-indexed seat among the matching nodes.
    pub fn seat(&self, number: usize) -> Option<&'a Node> {
        let index = number.checked_sub(1)?;
        self.all().get(index).copied()
    }

    fn by_round(&self, round: usize, side: Side) -> Vec<&'a Node> {
        // depth[side] - (round - 1); zero or negative matches nothing
        let Some(target) = (self.bracket.depth().side(side) + 1).checked_sub(round) else {
            return Vec::new();
        };
        let Some(start) = self.bracket.side_root(side) else {
            return Vec::new();
        };

        self.bracket
            .iter_top_down_from(start)
            .filter(|node| node.depth() == target)
            .collect()
    }
}
