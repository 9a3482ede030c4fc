//! A thread safe register of the best known solution of every run.
//!
//! The reporter only records. Whether a reported solution is better than the last one is left to
//! the reporting solver.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use fxhash::FxBuildHasher;
use log::trace;

/// The last solution reported for a run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SolutionEntry<T> {
    pub value: T,
    pub is_final: bool,
}

#[derive(Debug)]
pub struct SolutionReporter<T> {
    solutions: DashMap<String, SolutionEntry<T>, FxBuildHasher>,
}

impl<T> Default for SolutionReporter<T> {
    fn default() -> Self {
        SolutionReporter {
            solutions: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }
}

impl<T: Clone> SolutionReporter<T> {

    pub fn new() -> Self {
        Self::default()
    }

    /// Records `solution` for `run_id`. Can be called from several threads at once.
    /// Returns `false` and keeps the old entry if the run was already marked as final.
    pub fn report_solution(&self, run_id: &str, solution: T, is_final: bool) -> bool {
        match self.solutions.entry(run_id.to_owned()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.is_final {
                    trace!("rejected report for finished run {}", run_id);
                    return false
                }
                entry.value = solution;
                entry.is_final = is_final;
            },
            Entry::Vacant(vacant) => {
                vacant.insert(SolutionEntry { value: solution, is_final });
            },
        }
        true
    }

    /// Records a non-final `solution` for `run_id`.
    pub fn report(&self, run_id: &str, solution: T) -> bool {
        self.report_solution(run_id, solution, false)
    }

    /// Returns the last solution recorded for `run_id`, or `None` if nothing was reported.
    pub fn get_solution(&self, run_id: &str) -> Option<SolutionEntry<T>> {
        self.solutions.get(run_id).map(|entry| entry.value().clone())
    }

    /// Returns a progress callback that records every given solution as non-final for `run_id`.
    pub fn callback<'a>(&'a self, run_id: &'a str) -> impl FnMut(&T) + 'a {
        move |solution: &T| {
            self.report(run_id, solution.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn final_is_terminal_test() {
        let reporter = SolutionReporter::new();
        assert!(reporter.get_solution("run").is_none());
        assert!(reporter.report("run", vec![1, 2, 3]));
        assert!(reporter.report("run", vec![1, 2]));
        assert_eq!(reporter.get_solution("run"), Some(SolutionEntry { value: vec![1, 2], is_final: false }));
        assert!(reporter.report_solution("run", vec![2], true));
        assert!(!reporter.report("run", vec![]));
        assert!(!reporter.report_solution("run", vec![], true));
        assert_eq!(reporter.get_solution("run"), Some(SolutionEntry { value: vec![2], is_final: true }));
    }

    #[test]
    fn callback_test() {
        let reporter = SolutionReporter::new();
        {
            let mut callback = reporter.callback("cb");
            callback(&5usize);
            callback(&3usize);
        }
        assert_eq!(reporter.get_solution("cb").map(|e| e.value), Some(3));
    }

    #[test]
    fn concurrent_reports_test() {
        let reporter = SolutionReporter::new();
        thread::scope(|scope| {
            for t in 0..8usize {
                let reporter = &reporter;
                scope.spawn(move || {
                    let id = format!("run-{}", t);
                    for value in 0..100usize {
                        reporter.report(&id, value);
                    }
                    reporter.report_solution(&id, t, true);
                });
            }
        });
        assert_eq!(reporter.len(), 8);
        for t in 0..8usize {
            let entry = reporter.get_solution(&format!("run-{}", t)).unwrap();
            assert!(entry.is_final);
            assert_eq!(entry.value, t);
        }
    }
}
