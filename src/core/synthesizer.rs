use crate::domain::model::{DependencyEntry, Environment, Requirement, CONDA_FORGE_CHANNEL};
use crate::domain::ports::AvailabilityChecker;
use crate::utils::error::{BeniError, Result};
use crate::utils::progress::phase_bar;
use std::collections::HashSet;

/// Insertion-ordered set of dependency strings.
#[derive(Debug, Default)]
struct DependencySet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl DependencySet {
    fn insert(&mut self, dependency: String) -> bool {
        if self.seen.contains(&dependency) {
            return false;
        }
        self.seen.insert(dependency.clone());
        self.order.push(dependency);
        true
    }

    fn into_entries(self) -> impl Iterator<Item = DependencyEntry> {
        self.order.into_iter().map(DependencyEntry::Package)
    }
}

/// Builds an [`Environment`] from a module name, a python constraint and
/// the candidate requirements, keeping only packages the checker reports
/// as available.
pub struct Synthesizer<'a, C: AvailabilityChecker> {
    checker: &'a C,
    show_progress: bool,
}

impl<'a, C: AvailabilityChecker> Synthesizer<'a, C> {
    pub fn new(checker: &'a C) -> Self {
        Self {
            checker,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub async fn synthesize(
        &self,
        name: &str,
        python_version: Option<&str>,
        requirements: &[Requirement],
    ) -> Result<Environment> {
        if name.trim().is_empty() {
            return Err(BeniError::ValidationError {
                message: "environment name must not be empty".to_string(),
            });
        }

        let mut dependencies = DependencySet::default();
        dependencies.insert("pip".to_string());

        // An empty constraint counts as no constraint.
        match python_version.filter(|v| !v.is_empty()) {
            Some(version) => dependencies.insert(format!("python{}", version)),
            None => dependencies.insert("python".to_string()),
        };

        let progress = phase_bar("Checking packages", requirements.len(), self.show_progress);
        for requirement in requirements {
            progress.set_message(requirement.name.clone());
            let available = self.checker.is_available(&requirement.name).await?;
            progress.inc(1);

            if !available {
                tracing::info!("{} is not on {}, skipping", requirement.name, CONDA_FORGE_CHANNEL);
                continue;
            }
            let entry = requirement.environment_entry();
            if !dependencies.insert(entry.clone()) {
                tracing::debug!("Duplicate dependency {} dropped", entry);
            }
        }
        progress.finish_and_clear();

        Ok(Environment {
            name: name.to_string(),
            channels: vec![CONDA_FORGE_CHANNEL.to_string()],
            dependencies: std::iter::once(DependencyEntry::pip_bootstrap())
                .chain(dependencies.into_entries())
                .collect(),
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Checker stub that records every query.
    pub struct StubChecker {
        available: Option<HashSet<String>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl StubChecker {
        pub fn always(available: bool) -> Self {
            Self {
                available: if available { None } else { Some(HashSet::new()) },
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn only(names: &[&str]) -> Self {
            Self {
                available: Some(names.iter().map(|n| n.to_string()).collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AvailabilityChecker for StubChecker {
        async fn is_available(&self, package: &str) -> Result<bool> {
            self.calls.lock().unwrap().push(package.to_string());
            Ok(match &self.available {
                None => true,
                Some(names) => names.contains(package),
            })
        }
    }

    pub struct FailingChecker;

    #[async_trait]
    impl AvailabilityChecker for FailingChecker {
        async fn is_available(&self, _package: &str) -> Result<bool> {
            Err(BeniError::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }
    }
}
