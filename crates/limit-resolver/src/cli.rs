use std::{io::Write, num::NonZeroU64};

use clap::Parser;

use crate::{
    core::{LimitResolver, RawLimitInput, DEFAULT_LIMIT},
    error::AppResult,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "limit-resolver", version)]
pub struct Args {
    /// Serve resolution requests as NDJSON over stdio
    #[arg(long)]
    pub stdio: bool,

    /// Logging level (stderr). Also supports RUST_LOG.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Row limit used when an input is not `all` or a positive number.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub default_limit: NonZeroU64,

    /// Raw limit values to resolve, one result per line.
    #[arg(allow_hyphen_values = true)]
    pub values: Vec<String>,
}

impl Args {
    pub fn resolver(&self) -> LimitResolver {
        LimitResolver::new(self.default_limit)
    }
}

/// Writes one resolved limit per value; with no values, resolves the absent input once.
pub fn print_resolutions<W: Write>(args: &Args, mut out: W) -> AppResult<()> {
    let resolver = args.resolver();
    if args.values.is_empty() {
        writeln!(out, "{}", resolver.resolve(RawLimitInput::Absent))?;
    }
    for value in &args.values {
        let resolved = resolver.resolve(value.as_str());
        tracing::debug!(input = %value, %resolved, "resolved");
        writeln!(out, "{resolved}")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["limit-resolver"]).unwrap();
        assert!(!args.stdio);
        assert_eq!(args.log_level, "info");
        assert_eq!(args.default_limit, DEFAULT_LIMIT);
        assert!(args.values.is_empty());
    }

    #[test]
    fn accepts_negative_values() {
        let args = Args::try_parse_from(["limit-resolver", "-5", "all", "25"]).unwrap();
        assert_eq!(args.values, vec!["-5", "all", "25"]);
    }

    fn printed(argv: &[&str]) -> String {
        let args = Args::try_parse_from(argv.iter().copied()).unwrap();
        let mut out = Vec::new();
        print_resolutions(&args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_default_without_values() {
        assert_eq!(printed(&["limit-resolver"]), "10\n");
    }

    #[test]
    fn prints_one_line_per_value() {
        assert_eq!(printed(&["limit-resolver", "-5", "all", "25"]), "10\nall\n25\n");
    }

    #[test]
    fn prints_with_custom_default() {
        assert_eq!(
            printed(&["limit-resolver", "--default-limit", "3", "abc", "ALL", "7"]),
            "3\nall\n7\n"
        );
        assert_eq!(printed(&["limit-resolver", "--default-limit", "42"]), "42\n");
    }

    #[test]
    fn rejects_zero_default() {
        assert!(Args::try_parse_from(["limit-resolver", "--default-limit", "0"]).is_err());
        let args = Args::try_parse_from(["limit-resolver", "--default-limit", "50"]).unwrap();
        assert_eq!(args.resolver().default_limit().get(), 50);
    }
}
