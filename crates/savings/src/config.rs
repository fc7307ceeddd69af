//! Application configuration loaded from TOML.
//!
//! Every field is optional; missing fields take the tutorial values.
//!
//! ```toml
//! beta = 0.95
//! verbose = false
//!
//! [assets]
//! lower = 2.0
//! upper = 10.0
//! points = 9
//!
//! [savings]
//! lower = 0.1
//! upper = 11.0
//! points = 50
//!
//! [solver]
//! max_iters = 100
//! x_abs_tol = 0.001
//! x_rel_tol = 0.0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    driver::{OptionsError, SolveOptions},
    grid::{Grid, GridError, GridSpec},
};

/// Errors from loading or applying a [`SavingsConfig`].
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),

    #[error("invalid solver settings: {0}")]
    Solver(#[from] OptionsError),
}

/// Iteration cap and bracket-width tolerances shared by both solvers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    pub max_iters: usize,
    pub x_abs_tol: f64,
    pub x_rel_tol: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-3,
            x_rel_tol: 0.0,
        }
    }
}

/// Grids, preferences and solver settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SavingsConfig {
    pub assets: GridSpec,
    pub savings: GridSpec,
    pub beta: f64,
    pub solver: SolverSettings,
    pub verbose: bool,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            assets: GridSpec {
                lower: 2.0,
                upper: 10.0,
                points: 9,
            },
            savings: GridSpec {
                lower: 0.1,
                upper: 11.0,
                points: 50,
            },
            beta: 0.95,
            solver: SolverSettings::default(),
            verbose: false,
        }
    }
}

impl SavingsConfig {
    /// Loads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this config.
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the asset and savings grids.
    ///
    /// # Errors
    ///
    /// Returns an error if either grid spec is invalid.
    pub fn grid(&self) -> Result<Grid, ConfigFileError> {
        Ok(Grid::from_specs(&self.assets, &self.savings)?)
    }

    /// Builds the solver options.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite.
    pub fn options(&self) -> Result<SolveOptions, ConfigFileError> {
        let SolverSettings {
            max_iters,
            x_abs_tol,
            x_rel_tol,
        } = self.solver;
        Ok(SolveOptions::new(max_iters, x_abs_tol, x_rel_tol)?.verbose(self.verbose))
    }
}
