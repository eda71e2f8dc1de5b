//! Reporter capability - verbosity-aware console output
//!
//! Commands construct one `Reporter` at startup and pass it by reference
//! into every component that needs to talk to the user. Components never
//! consult global flags.

use colored::Colorize;

/// Output verbosity, ordered from quietest to loudest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Normal,
    Verbose,
    Debug,
}

/// Console reporter passed into pipeline components
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    verbosity: Verbosity,
}

impl Reporter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Map the CLI `-v` / `--debug` flags onto a verbosity level
    ///
    /// `--debug` implies verbose output.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        let verbosity = if debug {
            Verbosity::Debug
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Self::new(verbosity)
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Warnings are always shown
    pub fn warn(&self, msg: impl AsRef<str>) {
        eprintln!("{} {}", "⚠".yellow().bold(), msg.as_ref());
    }

    /// Informational line, shown at Verbose and above
    pub fn info(&self, msg: impl AsRef<str>) {
        if self.verbosity >= Verbosity::Verbose {
            println!("{} {}", "→".cyan(), msg.as_ref());
        }
    }

    /// Debug line, shown only at Debug
    pub fn debug(&self, msg: impl AsRef<str>) {
        if self.verbosity >= Verbosity::Debug {
            println!("{} {}", "·".dimmed(), msg.as_ref());
        }
    }

    /// Completion line, always shown
    pub fn success(&self, msg: impl AsRef<str>) {
        println!("{} {}", "✓".green().bold(), msg.as_ref());
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_normal() {
        let reporter = Reporter::from_flags(false, false);
        assert_eq!(reporter.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_from_flags_verbose() {
        let reporter = Reporter::from_flags(true, false);
        assert_eq!(reporter.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_debug_implies_verbose() {
        let reporter = Reporter::from_flags(false, true);
        assert_eq!(reporter.verbosity(), Verbosity::Debug);
        assert!(reporter.verbosity() >= Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Debug > Verbosity::Verbose);
        assert!(Verbosity::Verbose > Verbosity::Normal);
    }
}
