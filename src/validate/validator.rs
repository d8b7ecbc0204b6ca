//! Runs the validation sweeps over a model.

use super::issue::{Issue, IssueType};
use super::rules::{duplicates, limit_sets, lines, machines, terminals, transformers};
use crate::index::ModelAccess;
use rayon::prelude::*;
use tracing::{debug, info};

/// Optional sweeps on top of the standard five.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Report elements whose `rdf:ID` repeats an earlier one.
    pub check_duplicate_ids: bool,
}

type Sweep<M> = fn(&M) -> Vec<Issue>;

/// The structural validator.
///
/// Issues come out grouped by sweep (machines, transformers, lines,
/// terminals, limit sets, then duplicates when enabled) and in document
/// order within each sweep.
pub struct Validator<'m, M: ModelAccess + ?Sized> {
    model: &'m M,
    options: ValidatorOptions,
}

impl<'m, M: ModelAccess + ?Sized> Validator<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self::with_options(model, ValidatorOptions::default())
    }

    pub fn with_options(model: &'m M, options: ValidatorOptions) -> Self {
        Validator { model, options }
    }

    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    fn sweeps(&self) -> Vec<(&'static str, Sweep<M>)> {
        let mut sweeps: Vec<(&'static str, Sweep<M>)> = vec![
            ("machines", machines::check::<M> as Sweep<M>),
            ("transformers", transformers::check::<M> as Sweep<M>),
            ("lines", lines::check::<M> as Sweep<M>),
            ("terminals", terminals::check::<M> as Sweep<M>),
            ("limit_sets", limit_sets::check::<M> as Sweep<M>),
        ];
        if self.options.check_duplicate_ids {
            sweeps.push(("duplicates", duplicates::check::<M> as Sweep<M>));
        }
        sweeps
    }

    fn run_sweep(&self, name: &'static str, sweep: Sweep<M>) -> Vec<Issue> {
        let issues = sweep(self.model);
        debug!(sweep = name, issues = issues.len(), "validation sweep finished");
        issues
    }

    /// Runs every sweep in turn and returns the issues found.
    pub fn run(&self) -> Vec<Issue> {
        let issues: Vec<Issue> = self
            .sweeps()
            .into_iter()
            .flat_map(|(name, sweep)| self.run_sweep(name, sweep))
            .collect();
        report(&issues);
        issues
    }

    /// Runs the sweeps on the rayon pool. The result is identical to
    /// [`run`](Self::run).
    pub fn run_parallel(&self) -> Vec<Issue>
    where
        M: Sync,
    {
        let per_sweep: Vec<Vec<Issue>> = self
            .sweeps()
            .into_par_iter()
            .map(|(name, sweep)| self.run_sweep(name, sweep))
            .collect();
        let issues = per_sweep.concat();
        report(&issues);
        issues
    }
}

fn report(issues: &[Issue]) {
    let count = |kind: IssueType| issues.iter().filter(|i| i.kind == kind).count();
    info!(
        issues = issues.len(),
        logical = count(IssueType::Logical),
        parameter = count(IssueType::Parameter),
        power_system = count(IssueType::PowerSystem),
        "validation finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CimIndex;
    use crate::testing::{fixture_index, index_of};

    fn summary(issues: &[Issue]) -> Vec<(IssueType, &str, &str)> {
        issues
            .iter()
            .map(|i| (i.kind, i.description, i.object.as_str()))
            .collect()
    }

    #[test]
    fn test_fixture_issues() {
        let index = fixture_index();
        let issues = Validator::new(&index).run();
        assert_eq!(
            summary(&issues),
            vec![
                (IssueType::Logical, "Generator without regulating control", "SM2"),
                (IssueType::Parameter, "Generator has zero voltage regulation range", "SM2"),
                (IssueType::Logical, "Generator without GeneratingUnit link", "SM2"),
                (IssueType::Logical, "Transformer with less than two windings", "T2"),
                (IssueType::PowerSystem, "Transformer winding without BaseVoltage", "T2"),
                (IssueType::Logical, "Line without terminals", "L2"),
                (IssueType::Logical, "Terminal without TopologicalNode", "TL1b"),
                (IssueType::Logical, "OperationalLimitSet without limits", "OLS2"),
            ]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let index = fixture_index();
        let options = ValidatorOptions { check_duplicate_ids: true };
        let validator = Validator::with_options(&index, options);
        assert_eq!(validator.run_parallel(), validator.run());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let index = fixture_index();
        let validator = Validator::new(&index);
        let first = validator.run();
        assert_eq!(first, validator.run());
        assert_eq!(validator.run_parallel(), validator.run_parallel());
        assert!(!first.is_empty());
    }

    #[test]
    fn test_duplicate_sweep_is_opt_in() {
        let index = index_of(r#"<cim:Terminal rdf:ID="X"/><cim:Terminal rdf:ID="X"/>"#);
        let tn_issues = Validator::new(&index).run();
        assert_eq!(tn_issues.len(), 2);
        assert!(tn_issues.iter().all(|i| i.description != "Duplicate identifier"));

        let issues = Validator::with_options(&index, ValidatorOptions { check_duplicate_ids: true }).run();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[2].description, "Duplicate identifier");
    }

    #[test]
    fn test_empty_model_is_clean() {
        let index = index_of("");
        assert!(Validator::new(&index).run().is_empty());
    }

    #[test]
    fn test_works_through_trait_object() {
        let index: CimIndex = fixture_index();
        let model: &dyn ModelAccess = &index;
        assert_eq!(Validator::new(model).run().len(), 8);
    }
}
