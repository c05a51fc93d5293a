pub mod input;
pub mod limits;
pub mod page;

pub use input::RawLimitInput;
pub use limits::{resolve, LimitResolver, Resolution, ResolvedLimit, DEFAULT_LIMIT};
pub use page::Page;
