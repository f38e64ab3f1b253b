/// Implementation of `xbf regress`.
///
/// Serializes every [`RegressionCase`] to disk, reopens it through the same
/// path `info` uses, and prints TAP:
///
/// ```text
/// 1..11
/// ok 1
/// ok 2
/// not ok 3 # Test: No null termination of the header : Error: (none)
/// ```
///
/// Details follow `#` on failures, and on every line with `-v`.
use anyhow::{Context, Result, bail};
use tracing::debug;
use xbf_decoder::HeaderDecoder;
use xbf_fixtures::{RegressionCase, regression_cases, run_case};

use crate::RegressArgs;

/// Run the `xbf regress` command.
///
/// # Errors
///
/// Returns an error if the case number is invalid, a case file can't be
/// written, or any case produces an unexpected outcome.
pub fn run(args: &RegressArgs, decoder: &HeaderDecoder, verbose: bool) -> Result<()> {
    let cases = regression_cases();
    let selected = select(&cases, &args.case)?;

    let indent = cases.iter().map(|c| c.description.len()).max().unwrap_or(0);
    println!("1..{}", cases.len());

    for (number, case) in selected {
        let outcome = run_case(&args.dir, case, decoder)
            .with_context(|| format!("cannot write case {} to {}", case.name, args.dir.display()))?;
        debug!(case = case.name, passed = outcome.passed, "regression case");

        let status = if outcome.passed { "ok" } else { "not ok" };
        if outcome.passed && !verbose {
            println!("{status} {number}");
        } else {
            let error = outcome.error.as_deref().unwrap_or("(none)");
            println!(
                "{status} {number} # Test: {:<indent$} : Error: {error}",
                case.description
            );
        }

        if !outcome.passed {
            bail!("regression case {number} ({}) failed", case.name);
        }
    }

    Ok(())
}

/// Resolve `all` or a 1-based case number into `(number, case)` pairs.
fn select<'c>(cases: &'c [RegressionCase], arg: &str) -> Result<Vec<(usize, &'c RegressionCase)>> {
    let numbered = cases.iter().enumerate().map(|(i, c)| (i + 1, c));
    if arg == "all" {
        return Ok(numbered.collect());
    }

    let wanted: usize = arg
        .parse()
        .with_context(|| format!("expected `all` or a case number, got {arg:?}"))?;
    let picked: Vec<_> = numbered.filter(|(n, _)| *n == wanted).collect();
    if picked.is_empty() {
        bail!("no case {wanted}: cases are numbered 1..={}", cases.len());
    }
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_all() {
        let cases = regression_cases();
        let picked = select(&cases, "all").unwrap();
        assert_eq!(picked.len(), cases.len());
        assert_eq!(picked[0].0, 1);
    }

    #[test]
    fn select_one_is_one_based() {
        let cases = regression_cases();
        let picked = select(&cases, "2").unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].1.name, cases[1].name);
    }

    #[test]
    fn select_rejects_out_of_range_and_garbage() {
        let cases = regression_cases();
        assert!(select(&cases, "0").is_err());
        assert!(select(&cases, "999").is_err());
        assert!(select(&cases, "some").is_err());
    }
}
