use hashbrown::HashMap;
use std::ops::{Add, AddAssign, Index};

use crate::severity::Severity;

/// Per-severity counters for one route, indexed in column order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LevelCounts([usize; Severity::COUNT]);

impl LevelCounts {
    #[inline]
    pub const fn zero() -> Self {
        Self([0; Severity::COUNT])
    }

    #[inline]
    pub const fn get(&self, severity: Severity) -> usize {
        self.0[severity.index()]
    }

    #[inline]
    pub fn increment(&mut self, severity: Severity) {
        self.0[severity.index()] += 1;
    }

    /// Sum over all levels.
    #[inline]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Severity, usize)> + '_ {
        Severity::ALL.into_iter().map(|level| (level, self.get(level)))
    }
}

impl Index<Severity> for LevelCounts {
    type Output = usize;

    fn index(&self, severity: Severity) -> &Self::Output {
        &self.0[severity.index()]
    }
}

impl Add for LevelCounts {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for LevelCounts {
    fn add_assign(&mut self, rhs: Self) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}

impl<'a> std::iter::Sum<&'a LevelCounts> for LevelCounts {
    fn sum<I: Iterator<Item = &'a LevelCounts>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, counts| acc + *counts)
    }
}

/// Route × severity count table.
///
/// Routes iterate in the order they were first seen; a route is only present
/// once at least one line has been counted for it.
#[derive(Debug, Clone, Default)]
pub struct CountTable {
    index: HashMap<String, usize>,
    rows: Vec<(String, LevelCounts)>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct routes.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn increment(&mut self, route: &str, severity: Severity) {
        self.row_mut(route).increment(severity);
    }

    /// Count for `(route, severity)`, `0` when the route was never seen.
    pub fn get_or_zero(&self, route: &str, severity: Severity) -> usize {
        self.row(route).map_or(0, |counts| counts.get(severity))
    }

    pub fn row(&self, route: &str) -> Option<&LevelCounts> {
        self.index.get(route).map(|&i| &self.rows[i].1)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &LevelCounts)> {
        self.rows.iter().map(|(route, counts)| (route.as_str(), counts))
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(route, _)| route.as_str())
    }

    /// Add every cell of `other` into this table.
    ///
    /// Routes new to this table are appended in `other`'s order.
    pub fn merge(&mut self, other: &Self) {
        for (route, counts) in other.rows() {
            *self.row_mut(route) += *counts;
        }
    }

    /// Per-severity sums over all routes.
    pub fn column_totals(&self) -> LevelCounts {
        self.rows.iter().map(|(_, counts)| counts).sum()
    }

    /// Number of classified lines in the table.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|(_, counts)| counts.total()).sum()
    }

    fn row_mut(&mut self, route: &str) -> &mut LevelCounts {
        let i = match self.index.get(route) {
            Some(&i) => i,
            None => {
                let i = self.rows.len();
                self.index.insert(route.to_string(), i);
                self.rows.push((route.to_string(), LevelCounts::zero()));
                i
            }
        };
        &mut self.rows[i].1
    }
}
