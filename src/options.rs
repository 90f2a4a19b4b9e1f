use std::time::Duration;

use anyhow::{Context, Result, bail};

/// How long `--test` keeps the app alive when no duration is given.
pub const DEFAULT_TEST_DURATION: Duration = Duration::from_secs(3);

pub const USAGE: &str = "\
Usage: text-overlay [OPTIONS]

Options:
  --test                   Show the overlay at startup and quit after 3 seconds
  --test-duration <SECS>   Like --test, quitting after SECS seconds
  -h, --help               Print this help and exit

Logging is controlled with RUST_LOG (default: info).";

/// Command-line launch options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// When set, show the overlay immediately and quit after this long.
    pub exit_after: Option<Duration>,
    pub show_help: bool,
}

impl LaunchOptions {
    /// Parse options from arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--test" => {
                    options.exit_after.get_or_insert(DEFAULT_TEST_DURATION);
                }
                "--test-duration" => {
                    let value = args.next().context("--test-duration needs a value")?;
                    options.exit_after = Some(parse_seconds(value.as_ref())?);
                }
                "-h" | "--help" => options.show_help = true,
                other => {
                    if let Some(value) = other.strip_prefix("--test-duration=") {
                        options.exit_after = Some(parse_seconds(value)?);
                    } else {
                        bail!("unknown argument '{other}'\n\n{USAGE}");
                    }
                }
            }
        }

        Ok(options)
    }

    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::args().skip(1))
    }
}

fn parse_seconds(value: &str) -> Result<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid test duration '{value}'"))?;
    if secs == 0 {
        bail!("test duration must be at least one second");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_is_interactive() {
        let options = LaunchOptions::parse(Vec::<String>::new()).unwrap();
        assert_eq!(options, LaunchOptions::default());
        assert!(options.exit_after.is_none());
    }

    #[test]
    fn test_flag_uses_default_duration() {
        let options = LaunchOptions::parse(["--test"]).unwrap();
        assert_eq!(options.exit_after, Some(DEFAULT_TEST_DURATION));
    }

    #[test]
    fn test_duration_in_both_spellings() {
        let options = LaunchOptions::parse(["--test-duration", "7"]).unwrap();
        assert_eq!(options.exit_after, Some(Duration::from_secs(7)));

        let options = LaunchOptions::parse(["--test-duration=2"]).unwrap();
        assert_eq!(options.exit_after, Some(Duration::from_secs(2)));
    }

    #[test]
    fn explicit_duration_wins_over_plain_test_flag() {
        let options = LaunchOptions::parse(["--test-duration", "9", "--test"]).unwrap();
        assert_eq!(options.exit_after, Some(Duration::from_secs(9)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(LaunchOptions::parse(["--test-duration"]).is_err());
        assert!(LaunchOptions::parse(["--test-duration", "soon"]).is_err());
        assert!(LaunchOptions::parse(["--test-duration", "0"]).is_err());

        let err = LaunchOptions::parse(["--fullscreen"]).unwrap_err();
        assert!(err.to_string().contains("--fullscreen"));
    }

    #[test]
    fn help_flag() {
        assert!(LaunchOptions::parse(["-h"]).unwrap().show_help);
        assert!(LaunchOptions::parse(["--help"]).unwrap().show_help);
    }
}
