//! Integer intervals with open, closed and unbounded endpoints.
//!
//! An [`Interval`] describes a range over a discrete ordered domain where
//! either end may be inclusive (`At`), exclusive (`After` / `Before`) or
//! missing altogether (`Unbound`). Clamping it against a concrete
//! `[lowest, highest]` domain produces a [`BoundedInterval`], which can be
//! tested for membership and enumerated in either direction.
//!
//! # Example
//!
//! ```
//! use scanplate_interval::Interval;
//!
//! let lengths = Interval::at_least(2usize).bounded_within(0, 5).unwrap();
//! assert_eq!(lengths.to_list(), vec![2, 3, 4, 5]);
//! assert_eq!(lengths.iter().rev().next(), Some(5));
//!
//! // An exact requirement that does not fit the domain is rejected.
//! assert!(Interval::exact(7usize).bounded_within(0, 5).is_err());
//! ```

use std::fmt;
use std::ops::ControlFlow;
use thiserror::Error;

// ============ Domain ============

/// An ordered domain where every value has at most one successor and one
/// predecessor.
///
/// `succ` and `pred` return `None` at the edges of the domain instead of
/// wrapping, which is what lets an exclusive bound at the domain's edge
/// normalize to an empty interval.
pub trait Discrete: Copy + Ord + fmt::Debug + fmt::Display {
    fn succ(self) -> Option<Self>;
    fn pred(self) -> Option<Self>;
}

macro_rules! impl_discrete {
    ($($t:ty),*) => {
        $(
            impl Discrete for $t {
                #[inline]
                fn succ(self) -> Option<Self> {
                    self.checked_add(1)
                }

                #[inline]
                fn pred(self) -> Option<Self> {
                    self.checked_sub(1)
                }
            }
        )*
    };
}

impl_discrete!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// ============ Endpoints ============

/// Lower end of an [`Interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lower<T> {
    /// Greater than or equal to the value.
    At(T),
    /// Strictly greater than the value.
    After(T),
    /// No lower bound.
    Unbound,
}

/// Upper end of an [`Interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upper<T> {
    /// Less than or equal to the value.
    At(T),
    /// Strictly less than the value.
    Before(T),
    /// No upper bound.
    Unbound,
}

/// Lower end of a [`BoundedInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundedLower<T> {
    At(T),
    After(T),
}

/// Upper end of a [`BoundedInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundedUpper<T> {
    At(T),
    Before(T),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("interval {interval} is not within [{lowest}, {highest}]")]
    OutOfBounds {
        interval: String,
        lowest: String,
        highest: String,
    },
}

// ============ Interval ============

/// A possibly unbounded range over a discrete domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    pub from: Lower<T>,
    pub to: Upper<T>,
}

impl<T: Discrete> Interval<T> {
    pub fn new(from: Lower<T>, to: Upper<T>) -> Self {
        Self { from, to }
    }

    /// The single value `v`.
    pub fn exact(v: T) -> Self {
        Self::new(Lower::At(v), Upper::At(v))
    }

    pub fn at_least(v: T) -> Self {
        Self::new(Lower::At(v), Upper::Unbound)
    }

    pub fn at_most(v: T) -> Self {
        Self::new(Lower::Unbound, Upper::At(v))
    }

    /// The whole domain.
    pub fn all() -> Self {
        Self::new(Lower::Unbound, Upper::Unbound)
    }

    /// Returns the value if this interval admits exactly one.
    pub fn as_exact(&self) -> Option<T> {
        match (self.from, self.to) {
            (Lower::At(a), Upper::At(b)) if a == b => Some(a),
            _ => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self.from, Lower::Unbound) || matches!(self.to, Upper::Unbound)
    }

    /// Replaces an `Unbound` lower end with `lowest`, e.g. the minimum of the
    /// domain the interval is used in.
    pub fn floored(self, lowest: T) -> Self {
        match self.from {
            Lower::Unbound => Self::new(Lower::At(lowest), self.to),
            _ => self,
        }
    }

    /// An interval with an `Unbound` end is never empty; otherwise it is
    /// empty when its normalized first value exceeds its last.
    pub fn is_empty(&self) -> bool {
        let from = match self.from {
            Lower::At(v) => BoundedLower::At(v),
            Lower::After(v) => BoundedLower::After(v),
            Lower::Unbound => return false,
        };
        let to = match self.to {
            Upper::At(v) => BoundedUpper::At(v),
            Upper::Before(v) => BoundedUpper::Before(v),
            Upper::Unbound => return false,
        };
        BoundedInterval::new(from, to).is_empty()
    }

    /// Membership test that needs no concrete domain.
    pub fn contains(&self, value: T) -> bool {
        let above = match self.from {
            Lower::At(v) => value >= v,
            Lower::After(v) => value > v,
            Lower::Unbound => true,
        };
        let below = match self.to {
            Upper::At(v) => value <= v,
            Upper::Before(v) => value < v,
            Upper::Unbound => true,
        };
        above && below
    }

    /// Replaces `Unbound` ends with `lowest` / `highest` and checks that the
    /// result lies within `[lowest, highest]`.
    pub fn bounded_within(&self, lowest: T, highest: T) -> Result<BoundedInterval<T>, IntervalError> {
        let from = match self.from {
            Lower::At(v) => BoundedLower::At(v),
            Lower::After(v) => BoundedLower::After(v),
            Lower::Unbound => BoundedLower::At(lowest),
        };
        let to = match self.to {
            Upper::At(v) => BoundedUpper::At(v),
            Upper::Before(v) => BoundedUpper::Before(v),
            Upper::Unbound => BoundedUpper::At(highest),
        };
        let bounded = BoundedInterval::new(from, to);
        let domain = BoundedInterval::closed(lowest, highest);

        if bounded.is_within(&domain) {
            Ok(bounded)
        } else {
            Err(IntervalError::OutOfBounds {
                interval: bounded.to_string(),
                lowest: lowest.to_string(),
                highest: highest.to_string(),
            })
        }
    }
}

impl<T: Discrete> Default for Interval<T> {
    fn default() -> Self {
        Self::all()
    }
}

// ============ BoundedInterval ============

/// An interval whose ends are both concrete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundedInterval<T> {
    from: BoundedLower<T>,
    to: BoundedUpper<T>,
}

impl<T: Discrete> BoundedInterval<T> {
    pub fn new(from: BoundedLower<T>, to: BoundedUpper<T>) -> Self {
        Self { from, to }
    }

    /// `[first, last]`, both inclusive.
    pub fn closed(first: T, last: T) -> Self {
        Self::new(BoundedLower::At(first), BoundedUpper::At(last))
    }

    pub fn lower(&self) -> BoundedLower<T> {
        self.from
    }

    pub fn upper(&self) -> BoundedUpper<T> {
        self.to
    }

    /// Inclusive `(first, last)` pair, or `None` when the interval is empty.
    ///
    /// `After(MAX)` and `Before(MIN)` have no inclusive counterpart in the
    /// domain and normalize to empty.
    pub fn bounds(&self) -> Option<(T, T)> {
        let first = match self.from {
            BoundedLower::At(v) => Some(v),
            BoundedLower::After(v) => v.succ(),
        }?;
        let last = match self.to {
            BoundedUpper::At(v) => Some(v),
            BoundedUpper::Before(v) => v.pred(),
        }?;
        (first <= last).then_some((first, last))
    }

    pub fn is_empty(&self) -> bool {
        self.bounds().is_none()
    }

    pub fn first(&self) -> Option<T> {
        self.bounds().map(|(first, _)| first)
    }

    pub fn last(&self) -> Option<T> {
        self.bounds().map(|(_, last)| last)
    }

    pub fn contains(&self, value: T) -> bool {
        self.bounds()
            .is_some_and(|(first, last)| first <= value && value <= last)
    }

    /// An empty interval is within any non-empty one; nothing is within an
    /// empty interval.
    pub fn is_within(&self, outer: &Self) -> bool {
        match (self.bounds(), outer.bounds()) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some((first, last)), Some((outer_first, outer_last))) => {
                outer_first <= first && last <= outer_last
            }
        }
    }

    /// Lowers the upper end to `max` when it currently exceeds it.
    pub fn truncate_to(self, max: T) -> Self {
        match self.bounds() {
            Some((_, last)) if last > max => Self {
                to: BoundedUpper::At(max),
                ..self
            },
            _ => self,
        }
    }

    /// Ascending iterator over every value; `.rev()` walks it descending.
    pub fn iter(&self) -> Walk<T> {
        Walk {
            remaining: self.bounds(),
        }
    }

    pub fn to_list(&self) -> Vec<T> {
        self.iter().collect()
    }

    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> Vec<U> {
        self.iter().map(f).collect()
    }

    /// Folds `f` over the values in ascending order.
    pub fn walk<A>(&self, init: A, mut f: impl FnMut(A, T) -> A) -> A {
        let mut acc = init;
        for value in self.iter() {
            acc = f(acc, value);
        }
        acc
    }

    /// Like [`walk`](Self::walk), but `f` can stop early with
    /// `ControlFlow::Break`, whose payload becomes the result.
    pub fn walk_until<A>(&self, init: A, mut f: impl FnMut(A, T) -> ControlFlow<A, A>) -> A {
        let mut acc = init;
        for value in self.iter() {
            match f(acc, value) {
                ControlFlow::Continue(next) => acc = next,
                ControlFlow::Break(done) => return done,
            }
        }
        acc
    }
}

impl<'a, T: Discrete> IntoIterator for &'a BoundedInterval<T> {
    type Item = T;
    type IntoIter = Walk<T>;

    fn into_iter(self) -> Walk<T> {
        self.iter()
    }
}

/// Iterator over the values of a [`BoundedInterval`].
#[derive(Debug, Clone)]
pub struct Walk<T> {
    remaining: Option<(T, T)>,
}

impl<T: Discrete> Iterator for Walk<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (first, last) = self.remaining?;
        self.remaining = if first < last {
            first.succ().map(|next| (next, last))
        } else {
            None
        };
        Some(first)
    }
}

impl<T: Discrete> DoubleEndedIterator for Walk<T> {
    fn next_back(&mut self) -> Option<T> {
        let (first, last) = self.remaining?;
        self.remaining = if first < last {
            last.pred().map(|prev| (first, prev))
        } else {
            None
        };
        Some(last)
    }
}

impl<T: Discrete> std::iter::FusedIterator for Walk<T> {}

// ============ Display ============

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.from {
            Lower::At(v) => write!(f, "[{}", v)?,
            Lower::After(v) => write!(f, "({}", v)?,
            Lower::Unbound => write!(f, "(-∞")?,
        }
        match &self.to {
            Upper::At(v) => write!(f, ", {}]", v),
            Upper::Before(v) => write!(f, ", {})", v),
            Upper::Unbound => write!(f, ", +∞)"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for BoundedInterval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.from {
            BoundedLower::At(v) => write!(f, "[{}", v)?,
            BoundedLower::After(v) => write!(f, "({}", v)?,
        }
        match &self.to {
            BoundedUpper::At(v) => write!(f, ", {}]", v),
            BoundedUpper::Before(v) => write!(f, ", {})", v),
        }
    }
}
