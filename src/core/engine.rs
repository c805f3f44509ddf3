use crate::core::render;
use crate::core::requirement::parse_requirement;
use crate::core::synthesizer::Synthesizer;
use crate::domain::model::{Environment, Manifest, Requirement};
use crate::domain::ports::AvailabilityChecker;
use crate::utils::error::{BeniError, Result};
use crate::utils::progress::phase_bar;
use std::path::Path;

/// Everything gathered from the manifests of one run.
#[derive(Debug, Clone, Default)]
pub struct ManifestSet {
    /// Module of the first manifest; names the environment.
    pub name: Option<String>,
    /// User-supplied names plus every manifest's own module.
    pub ignored: Vec<String>,
    /// Last manifest declaring `requires_python` wins.
    pub python_version: Option<String>,
    pub requirements: Vec<Requirement>,
}

impl ManifestSet {
    pub fn new(ignored: Vec<String>) -> Self {
        Self {
            ignored,
            ..Self::default()
        }
    }

    pub fn absorb(&mut self, manifest: Manifest) -> Result<()> {
        let requirements = manifest
            .metadata
            .requires_dist
            .iter()
            .map(|spec| parse_requirement(spec))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Module {} declares {} requirement(s)",
            manifest.module,
            requirements.len()
        );

        if self.name.is_none() {
            self.name = Some(manifest.module.clone());
        }
        if let Some(python) = manifest.metadata.requires_python {
            if let Some(previous) = self.python_version.as_deref() {
                if previous != python {
                    tracing::warn!(
                        "requires-python {} from {} replaces {}",
                        python,
                        manifest.module,
                        previous
                    );
                }
            }
            self.python_version = Some(python);
        }
        self.ignored.push(manifest.module);
        self.requirements.extend(requirements);
        Ok(())
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|ignored| ignored == name)
    }

    /// Requirements left after dropping ignored names, in declaration order.
    pub fn candidates(&self) -> Vec<Requirement> {
        self.requirements
            .iter()
            .filter(|r| !self.is_ignored(&r.name))
            .cloned()
            .collect()
    }
}

pub struct EnvironmentEngine<C: AvailabilityChecker> {
    checker: C,
    show_progress: bool,
}

impl<C: AvailabilityChecker> EnvironmentEngine<C> {
    pub fn new(checker: C) -> Self {
        Self {
            checker,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    /// Reads every manifest in order into a [`ManifestSet`].
    pub fn collect<P: AsRef<Path>>(&self, paths: &[P], ignore: &[String]) -> Result<ManifestSet> {
        let mut set = ManifestSet::new(ignore.to_vec());
        let progress = phase_bar("Parsing configs", paths.len(), self.show_progress);

        for path in paths {
            let path = path.as_ref();
            tracing::info!("Reading {}", path.display());
            set.absorb(Manifest::from_file(path)?)?;
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(set)
    }

    pub async fn synthesize(&self, set: &ManifestSet) -> Result<Environment> {
        let name = set.name.as_deref().ok_or_else(|| BeniError::ValidationError {
            message: "no manifest was read, cannot name the environment".to_string(),
        })?;

        let candidates = set.candidates();
        tracing::info!(
            "Checking {} of {} requirement(s) against conda-forge",
            candidates.len(),
            set.requirements.len()
        );

        Synthesizer::new(&self.checker)
            .with_progress(self.show_progress)
            .synthesize(name, set.python_version.as_deref(), &candidates)
            .await
    }

    pub async fn run<P: AsRef<Path>>(&self, paths: &[P], ignore: &[String]) -> Result<Environment> {
        let set = self.collect(paths, ignore)?;
        self.synthesize(&set).await
    }

    pub async fn render<P: AsRef<Path>>(&self, paths: &[P], ignore: &[String]) -> Result<String> {
        let environment = self.run(paths, ignore).await?;
        render::to_yaml(&environment)
    }
}
