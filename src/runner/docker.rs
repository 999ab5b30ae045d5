//! runner::docker
//!
//! Default preparation and cleanup for a Docker-compatible runtime.
//!
//! # Design
//!
//! Preparation:
//! 1. Load `config.json` from the formula directory.
//! 2. Generate a fresh [`ContainerId`].
//! 3. Create `<state>/runs/<id>` as the run's scratch directory.
//! 4. `<runtime> build -t <id> <formula-dir>`.
//!
//! If any step after 3 fails the scratch directory is removed again, so a
//! failed preparation leaves nothing for cleanup to do.
//!
//! Cleanup removes the scratch directory and, when asked to force removal,
//! the image (`<runtime> rmi -f <id>`). Both steps are attempted even if
//! the first one fails.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::formula::FormulaConfig;
use crate::core::paths::StatePaths;
use crate::core::types::{ContainerId, FormulaDefinition, Setup};

use super::invocation::{Invocation, StreamBinding};
use super::process::ProcessRunner;
use super::traits::{CleanupError, PostRunner, PreRunner, SetupError};

/// Builds the formula image and allocates a scratch directory.
pub struct DockerPreRunner {
    runtime: String,
    paths: StatePaths,
    process: Box<dyn ProcessRunner>,
    pwd: Option<PathBuf>,
}

impl DockerPreRunner {
    pub fn new(
        runtime: impl Into<String>,
        paths: StatePaths,
        process: impl ProcessRunner + 'static,
    ) -> Self {
        Self {
            runtime: runtime.into(),
            paths,
            process: Box::new(process),
            pwd: None,
        }
    }

    /// Mount `pwd` as the formula's working directory instead of the
    /// process's current directory.
    pub fn with_pwd(mut self, pwd: impl Into<PathBuf>) -> Self {
        self.pwd = Some(pwd.into());
        self
    }

    fn build_image(&self, definition: &FormulaDefinition, id: &ContainerId) -> Result<(), SetupError> {
        let mut build = Invocation::new(&self.runtime);
        build
            .args(["build", "-t", id.as_str()])
            .arg(definition.path.to_string_lossy())
            .stdin(StreamBinding::Null);
        self.process
            .run(&build)
            .map_err(|source| SetupError::ImageBuild {
                formula: definition.name.clone(),
                source,
            })
    }
}

impl PreRunner for DockerPreRunner {
    fn pre_run(&self, definition: &FormulaDefinition) -> Result<Setup, SetupError> {
        if !definition.path.is_dir() {
            return Err(SetupError::NotFound {
                formula: definition.name.clone(),
                path: definition.path.display().to_string(),
            });
        }

        let config =
            FormulaConfig::load(&definition.path).map_err(|source| SetupError::Config {
                formula: definition.name.clone(),
                source,
            })?;
        let pwd = match &self.pwd {
            Some(pwd) => pwd.clone(),
            None => std::env::current_dir()?,
        };

        let container_id = ContainerId::generate();
        let work_dir = self.paths.run_dir(&container_id);
        fs::create_dir_all(&work_dir)?;
        debug!(path = %work_dir.display(), "created run directory");

        if let Err(e) = self.build_image(definition, &container_id) {
            // The build error wins over a failed removal.
            let _ = fs::remove_dir_all(&work_dir);
            return Err(e);
        }
        info!(formula = %definition.name, image = %container_id, "image built");

        Ok(Setup {
            pwd,
            work_dir,
            config,
            container_id,
        })
    }
}

/// Removes what [`DockerPreRunner`] created.
pub struct DockerPostRunner {
    runtime: String,
    process: Box<dyn ProcessRunner>,
    keep_images: bool,
}

impl DockerPostRunner {
    pub fn new(runtime: impl Into<String>, process: impl ProcessRunner + 'static) -> Self {
        Self {
            runtime: runtime.into(),
            process: Box::new(process),
            keep_images: false,
        }
    }

    /// Never remove images, even on forced cleanup.
    pub fn keep_images(mut self, keep: bool) -> Self {
        self.keep_images = keep;
        self
    }
}

impl PostRunner for DockerPostRunner {
    fn post_run(&self, setup: &Setup, force_remove: bool) -> Result<(), CleanupError> {
        let mut failures = Vec::new();

        if setup.work_dir.exists() {
            if let Err(e) = fs::remove_dir_all(&setup.work_dir) {
                failures.push(format!(
                    "failed to remove '{}': {}",
                    setup.work_dir.display(),
                    e
                ));
            }
        }

        if force_remove && !self.keep_images {
            let mut rmi = Invocation::new(&self.runtime);
            rmi.args(["rmi", "-f", setup.container_id.as_str()])
                .stdin(StreamBinding::Null)
                .stdout(StreamBinding::Null);
            if let Err(e) = self.process.run(&rmi) {
                failures.push(e.to_string());
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CleanupError {
                container_id: setup.container_id.clone(),
                failures,
            })
        }
    }
}
