use birkhoff_core::{FiniteLattice, Inf, Lattice, Polarity, Sup};
use birkhoff_logic::{
    build_isomorphism, derive_embedding, extract_irreducibles, run_diagnostics, BirkhoffReport,
};
use clap::ValueEnum;
use std::fmt::{self, Write};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolarityArg {
    /// Sup-irreducibles, joins and lower sets
    Sup,
    /// Inf-irreducibles, meets and upper sets
    Inf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub verify: bool,
}

/// Runs the decomposition with the requested polarity.
/// Returns whether every diagnostic passed.
pub fn dispatch<T>(
    lattice: &FiniteLattice<T>,
    polarity: PolarityArg,
    opts: &RunOptions,
) -> anyhow::Result<bool>
where
    T: Lattice + fmt::Display,
{
    match polarity {
        PolarityArg::Sup => run::<T, Sup>(lattice, opts),
        PolarityArg::Inf => run::<T, Inf>(lattice, opts),
    }
}

fn run<T, P>(lattice: &FiniteLattice<T>, opts: &RunOptions) -> anyhow::Result<bool>
where
    T: Lattice + fmt::Display,
    P: Polarity,
{
    let report = decompose::<T, P>(lattice, opts.verify);
    print!("{}", render(&report, opts.format)?);
    Ok(report.passed())
}

fn decompose<T, P>(lattice: &FiniteLattice<T>, verify: bool) -> BirkhoffReport
where
    T: Lattice + fmt::Display,
    P: Polarity,
{
    info!(polarity = P::NAME, elements = lattice.len(), "decomposing lattice");

    let iso = build_isomorphism(extract_irreducibles::<T, P>(lattice));
    let embedding = derive_embedding(&iso);
    let mut report = BirkhoffReport::from_embedding(&embedding);

    if verify {
        report = report.with_diagnostics(run_diagnostics(&iso, &embedding));
        for d in report.diagnostics.iter().filter(|d| !d.passed) {
            warn!(check = %d.check, detail = ?d.detail, "diagnostic failed");
        }
    }
    report
}

fn render(report: &BirkhoffReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
    }
}

fn render_text(report: &BirkhoffReport) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "polarity: {}", report.polarity)?;
    writeln!(
        out,
        "elements ({}): {}",
        report.elements.len(),
        report.elements.join(", ")
    )?;
    writeln!(
        out,
        "irreducibles ({}): {}",
        report.irreducibles.len(),
        report.irreducibles.join(", ")
    )?;
    writeln!(out, "lower sets: {}", report.lower_set_count)?;
    writeln!(out, "embedding:")?;
    for row in &report.embedding {
        writeln!(out, "  {} -> {{{}}}", row.element, row.image.join(", "))?;
    }

    if !report.diagnostics.is_empty() {
        writeln!(out, "checks:")?;
        for d in &report.diagnostics {
            match (&d.detail, d.passed) {
                (_, true) => writeln!(out, "  [ok] {}", d.check)?,
                (Some(detail), false) => writeln!(out, "  [FAIL] {}: {}", d.check, detail)?,
                (None, false) => writeln!(out, "  [FAIL] {}", d.check)?,
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use birkhoff_samples::{diamond, divisors, pentagon};

    fn verifying(format: OutputFormat) -> RunOptions {
        RunOptions {
            format,
            verify: true,
        }
    }

    #[test]
    fn verify_fails_on_non_distributive_samples() {
        assert!(!run::<_, Sup>(&pentagon(), &verifying(OutputFormat::Text)).unwrap());
        assert!(!run::<_, Inf>(&diamond(), &verifying(OutputFormat::Text)).unwrap());
        assert!(!dispatch(&pentagon(), PolarityArg::Sup, &verifying(OutputFormat::Json)).unwrap());
    }

    #[test]
    fn verify_passes_on_divisors() {
        assert!(run::<_, Sup>(&divisors(12), &verifying(OutputFormat::Text)).unwrap());
        assert!(run::<_, Inf>(&divisors(12), &verifying(OutputFormat::Json)).unwrap());
    }

    #[test]
    fn without_verify_nothing_is_checked() {
        let opts = RunOptions {
            format: OutputFormat::Text,
            verify: false,
        };
        assert!(run::<_, Sup>(&pentagon(), &opts).unwrap());
        assert!(decompose::<_, Sup>(&pentagon(), false).diagnostics.is_empty());
    }

    #[test]
    fn json_output_is_a_report() {
        let report = decompose::<_, Sup>(&pentagon(), true);
        let json = render(&report, OutputFormat::Json).unwrap();
        let back: BirkhoffReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.diagnostics.len(), 4);
        assert!(!back.passed());
    }

    #[test]
    fn text_output_lists_embedding_and_checks() {
        let report = decompose::<_, Sup>(&divisors(12), true);
        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.starts_with("polarity: sup\n"));
        assert!(text.contains("irreducibles (3): 2, 3, 4"));
        assert!(text.contains("  12 -> {2, 3, 4}"));
        assert!(text.contains("  [ok] distributive"));
    }
}
