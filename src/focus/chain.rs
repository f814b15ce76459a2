//! Ordered, first-success-wins focus strategy chain.
//!
//! The chain owns an explicit list of strategies fixed at construction.
//! A run resolves the terminal identity once, then calls each strategy in
//! order, exactly once, until one succeeds. Strategies never run
//! concurrently and a failed strategy is never retried within a run.

use crate::error::{FocusError, Result};
use crate::exec::CommandExecutor;
use crate::focus::strategies::{FocusStrategy, standard_strategies};
use crate::identity::TerminalIdentity;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One failed strategy attempt.
#[derive(Debug)]
pub struct FailureRecord {
    pub strategy: &'static str,
    pub error: FocusError,
}

/// Everything that happened during one chain run.
#[derive(Debug)]
pub struct ChainReport {
    pub identity: TerminalIdentity,
    /// Name of the strategy that succeeded, if any.
    pub succeeded: Option<&'static str>,
    /// Failures in the order they occurred.
    pub failures: Vec<FailureRecord>,
}

impl ChainReport {
    /// Number of strategies that were invoked.
    pub fn attempted(&self) -> usize {
        self.failures.len() + usize::from(self.succeeded.is_some())
    }

    /// Collapse into the caller-facing result.
    ///
    /// On exhaustion only the last failure is carried; the full record is
    /// available from the report itself.
    pub fn into_result(self) -> Result<&'static str> {
        if let Some(name) = self.succeeded {
            return Ok(name);
        }

        let attempted = self.attempted();
        let last = self
            .failures
            .into_iter()
            .next_back()
            .map(|record| record.error)
            .unwrap_or(FocusError::NoStrategies);

        Err(FocusError::AllMethodsExhausted {
            attempted,
            last: Box::new(last),
        })
    }
}

/// Fixed-priority list of focus strategies.
pub struct FocusChain {
    strategies: Vec<Box<dyn FocusStrategy>>,
}

impl FocusChain {
    pub fn new(strategies: Vec<Box<dyn FocusStrategy>>) -> Self {
        Self { strategies }
    }

    /// The six built-in backends sharing one executor.
    pub fn standard(executor: Arc<dyn CommandExecutor>) -> Self {
        Self::new(standard_strategies(executor))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Strategy names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the chain and keep every failure.
    pub fn run(&self, raw_name: &str) -> ChainReport {
        let identity = TerminalIdentity::resolve(raw_name);
        debug!(
            terminal = %identity.raw,
            app_id = %identity.app_id,
            search_term = %identity.search_term,
            "focus requested"
        );

        let mut failures = Vec::new();
        for strategy in &self.strategies {
            let name = strategy.name();
            debug!(strategy = name, "trying");

            match strategy.focus(&identity) {
                Ok(()) => {
                    info!(strategy = name, terminal = %identity.raw, "window focused");
                    return ChainReport {
                        identity,
                        succeeded: Some(name),
                        failures,
                    };
                }
                Err(error) => {
                    debug!(
                        strategy = name,
                        error = %error,
                        unreachable = error.is_unreachable(),
                        "failed"
                    );
                    failures.push(FailureRecord {
                        strategy: name,
                        error,
                    });
                }
            }
        }

        warn!(
            terminal = %identity.raw,
            attempted = failures.len(),
            "all focus methods failed"
        );
        ChainReport {
            identity,
            succeeded: None,
            failures,
        }
    }

    /// Focus the window for `raw_name`, returning the winning strategy's name.
    pub fn try_focus(&self, raw_name: &str) -> Result<&'static str> {
        self.run(raw_name).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Strategy with a scripted outcome that logs its invocations.
    struct Scripted {
        name: &'static str,
        succeed: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl FocusStrategy for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        fn focus(&self, identity: &TerminalIdentity) -> Result<()> {
            self.log.lock().unwrap().push(self.name);
            if self.succeed {
                Ok(())
            } else {
                Err(FocusError::NoMatchingWindow {
                    search_term: format!("{}:{}", self.name, identity.search_term),
                })
            }
        }
    }

    const NAMES: [&str; 6] = ["s1", "s2", "s3", "s4", "s5", "s6"];

    fn chain(outcomes: &[bool]) -> (FocusChain, Arc<Mutex<Vec<&'static str>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let strategies = outcomes
            .iter()
            .zip(NAMES)
            .map(|(&succeed, name)| {
                Box::new(Scripted {
                    name,
                    succeed,
                    log: log.clone(),
                }) as Box<dyn FocusStrategy>
            })
            .collect();
        (FocusChain::new(strategies), log)
    }

    #[test]
    fn test_stops_at_first_success() {
        let (chain, log) = chain(&[false, false, true, true, true, true]);

        assert_eq!(chain.try_focus("code").unwrap(), "s3");
        assert_eq!(*log.lock().unwrap(), vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn test_first_strategy_success_invokes_nothing_else() {
        let (chain, log) = chain(&[true, true, true, true, true, true]);

        assert_eq!(chain.try_focus("code").unwrap(), "s1");
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_all_fail_invokes_each_exactly_once() {
        let (chain, log) = chain(&[false; 6]);

        let err = chain.try_focus("code").unwrap_err();

        assert_eq!(*log.lock().unwrap(), NAMES.to_vec());
        match err {
            FocusError::AllMethodsExhausted { attempted, last } => {
                assert_eq!(attempted, 6);
                match *last {
                    FocusError::NoMatchingWindow { search_term } => {
                        assert_eq!(search_term, "s6:Visual Studio Code")
                    }
                    other => panic!("Expected last error from s6, got {:?}", other),
                }
            }
            other => panic!("Expected AllMethodsExhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_report_keeps_every_failure_in_order() {
        let (chain, _) = chain(&[false, false, false, true]);

        let report = chain.run("xyz-editor");

        assert_eq!(report.succeeded, Some("s4"));
        assert_eq!(report.attempted(), 4);
        assert_eq!(report.identity.app_id, "xyz-editor.desktop");
        let failed: Vec<_> = report.failures.iter().map(|f| f.strategy).collect();
        assert_eq!(failed, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn test_identity_resolved_once_and_shared() {
        let (chain, _) = chain(&[false, false]);

        let report = chain.run("code");
        for failure in &report.failures {
            assert!(failure.error.to_string().contains("Visual Studio Code"));
        }
    }

    #[test]
    fn test_empty_chain() {
        let chain = FocusChain::new(Vec::new());
        assert!(chain.is_empty());

        match chain.try_focus("code").unwrap_err() {
            FocusError::AllMethodsExhausted { attempted, last } => {
                assert_eq!(attempted, 0);
                assert!(matches!(*last, FocusError::NoStrategies));
            }
            other => panic!("Expected AllMethodsExhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_chain_is_reusable_across_runs() {
        let (chain, log) = chain(&[false, true]);

        assert_eq!(chain.try_focus("code").unwrap(), "s2");
        assert_eq!(chain.try_focus("kitty").unwrap(), "s2");
        assert_eq!(log.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_standard_chain_has_six_backends() {
        let executor: Arc<dyn CommandExecutor> =
            Arc::new(crate::exec::mock::MockCommandExecutor::new());
        let chain = FocusChain::standard(executor);
        assert_eq!(chain.len(), 6);
        assert_eq!(chain.names()[0], "activate-window-by-title extension");
        assert_eq!(chain.names()[5], "kdotool");
    }
}
