//! Normalizes untyped "limit" parameters into an effective row limit.
//!
//! The input is a [`RawLimitInput`]: absent, text, or an integer. The case-insensitive
//! token `all` yields [`ResolvedLimit::Unbounded`]; a positive count passes through;
//! anything else falls back to the resolver's default ([`DEFAULT_LIMIT`] unless
//! configured otherwise). Resolution never fails.

pub mod adapters;
pub mod cli;
pub mod core;
pub mod error;
pub mod logging;

pub use crate::core::{resolve, LimitResolver, Page, RawLimitInput, Resolution, ResolvedLimit, DEFAULT_LIMIT};
