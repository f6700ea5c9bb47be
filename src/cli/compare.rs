//! `compare`: report whether one version tag is newer than another

use clap::Args;

use crate::updater::is_newer;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Version being evaluated, e.g. v2.3.1
    pub candidate: String,

    /// Version to compare against (defaults to the configured current version)
    pub current: Option<String>,
}

/// Prints the verdict and returns whether the candidate is newer
pub fn run(args: CompareArgs, current_version: &str) -> bool {
    let current = args.current.as_deref().unwrap_or(current_version);
    let newer = is_newer(&args.candidate, current);

    if newer {
        println!("{} is newer than {}", args.candidate, current);
    } else {
        println!("{} is not newer than {}", args.candidate, current);
    }

    newer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_current_wins() {
        let args = CompareArgs {
            candidate: "v2.0.0".to_string(),
            current: Some("v3.0.0".to_string()),
        };
        assert!(!run(args, "v1.0.0"));
    }

    #[test]
    fn test_falls_back_to_configured_version() {
        let args = CompareArgs {
            candidate: "v2.0.0".to_string(),
            current: None,
        };
        assert!(run(args, "v1.0.0"));
    }
}
