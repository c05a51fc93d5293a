use std::{fmt, num::NonZeroU64};

use serde::{Serialize, Serializer};

use super::input::RawLimitInput;

/// Row limit used when the caller's input is not a usable positive number.
pub const DEFAULT_LIMIT: NonZeroU64 = match NonZeroU64::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedLimit {
    Unbounded,
    Bounded(NonZeroU64),
}

impl ResolvedLimit {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, ResolvedLimit::Unbounded)
    }

    /// The row count, or `None` when unbounded.
    pub fn count(&self) -> Option<NonZeroU64> {
        match self {
            ResolvedLimit::Unbounded => None,
            ResolvedLimit::Bounded(n) => Some(*n),
        }
    }
}

impl fmt::Display for ResolvedLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedLimit::Unbounded => f.write_str("all"),
            ResolvedLimit::Bounded(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for ResolvedLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResolvedLimit::Unbounded => serializer.serialize_str("all"),
            ResolvedLimit::Bounded(n) => serializer.serialize_u64(n.get()),
        }
    }
}

/// Outcome of a resolution, keeping track of whether the default was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub limit: ResolvedLimit,
    pub defaulted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitResolver {
    default_limit: NonZeroU64,
}

impl Default for LimitResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl LimitResolver {
    pub const fn new(default_limit: NonZeroU64) -> Self {
        Self { default_limit }
    }

    pub fn default_limit(&self) -> NonZeroU64 {
        self.default_limit
    }

    /// Never fails: anything that is neither `all` nor a positive count falls
    /// back to the default.
    pub fn resolve(&self, raw: impl Into<RawLimitInput>) -> ResolvedLimit {
        self.resolve_detailed(&raw.into()).limit
    }

    pub fn resolve_detailed(&self, raw: &RawLimitInput) -> Resolution {
        if raw.is_all_token() {
            return Resolution {
                limit: ResolvedLimit::Unbounded,
                defaulted: false,
            };
        }
        match raw.positive_count() {
            Some(n) => Resolution {
                limit: ResolvedLimit::Bounded(n),
                defaulted: false,
            },
            None => Resolution {
                limit: ResolvedLimit::Bounded(self.default_limit),
                defaulted: true,
            },
        }
    }
}

/// Resolves with [`DEFAULT_LIMIT`] as the fallback.
pub fn resolve(raw: impl Into<RawLimitInput>) -> ResolvedLimit {
    LimitResolver::default().resolve(raw)
}
