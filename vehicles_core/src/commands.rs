// vehicles_core/src/commands.rs

//! Declarative description of the command vector a model accepts.
//!
//! A command spec is metadata for whoever generates commands (a UI, a planner, a
//! scenario file). The integrators only use its dimension.

use crate::error::DynamicsError;
use crate::types::Commands;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format of a single command component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandFormat {
    /// Any value in the component's range.
    #[serde(rename = "C")]
    Continuous,
    /// Only the listed values.
    #[serde(rename = "D")]
    Discrete(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Human-readable description of the model.
    pub desc: String,
    pub shape: Vec<usize>,
    pub format: Vec<CommandFormat>,
    /// Per-component `[min, max]`.
    pub range: Vec<[f64; 2]>,
    pub names: Vec<String>,
    /// The "rest" command.
    pub default: Vec<f64>,
    /// Named model parameters (max velocities, mass...), for display only.
    #[serde(default)]
    pub parameters: BTreeMap<String, Vec<f64>>,
}

impl CommandSpec {
    /// A spec where every component is continuous in `[-1, 1]` and rests at zero.
    pub fn continuous<I, S>(desc: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let n = names.len();
        Self {
            desc: desc.to_string(),
            shape: vec![n],
            format: vec![CommandFormat::Continuous; n],
            range: vec![[-1.0, 1.0]; n],
            names,
            default: vec![0.0; n],
            parameters: BTreeMap::new(),
        }
    }

    /// Restricts component `index` to a discrete set of values.
    pub fn with_discrete(mut self, index: usize, values: &[f64]) -> Self {
        if let Some(format) = self.format.get_mut(index) {
            *format = CommandFormat::Discrete(values.to_vec());
        }
        self
    }

    pub fn with_parameter(mut self, name: &str, values: &[f64]) -> Self {
        self.parameters.insert(name.to_string(), values.to_vec());
        self
    }

    /// Number of command components.
    pub fn dimension(&self) -> usize {
        self.shape.iter().product()
    }

    /// The rest command as a vector.
    pub fn rest(&self) -> Commands {
        Commands::from_vec(self.default.clone())
    }

    /// Whether `commands` has the right length, lies in range, and respects the
    /// discrete components.
    pub fn contains(&self, commands: &Commands) -> bool {
        if commands.len() != self.dimension() {
            return false;
        }
        commands
            .iter()
            .zip(self.range.iter().zip(&self.format))
            .all(|(&c, (&[lo, hi], format))| {
                let in_range = c >= lo && c <= hi;
                match format {
                    CommandFormat::Continuous => in_range,
                    CommandFormat::Discrete(values) => in_range && values.contains(&c),
                }
            })
    }

    /// Checks the command spec is self-consistent.
    pub fn validate(&self, model: &str) -> Result<(), DynamicsError> {
        let n = self.dimension();
        if n == 0 {
            return Err(DynamicsError::construction(
                model,
                "command spec has no components",
            ));
        }
        let lengths = [
            ("format", self.format.len()),
            ("range", self.range.len()),
            ("names", self.names.len()),
            ("default", self.default.len()),
        ];
        for (field, len) in lengths {
            if len != n {
                return Err(DynamicsError::construction(
                    model,
                    format!("command spec '{field}' has {len} entries, expected {n}"),
                ));
            }
        }
        for (i, [lo, hi]) in self.range.iter().enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(DynamicsError::construction(
                    model,
                    format!("command {i} has an invalid range [{lo}, {hi}]"),
                ));
            }
        }
        if !self.contains(&self.rest()) {
            return Err(DynamicsError::construction(
                model,
                format!(
                    "default command {:?} is outside the declared range",
                    self.default
                ),
            ));
        }
        for (i, format) in self.format.iter().enumerate() {
            if let CommandFormat::Discrete(values) = format {
                let [lo, hi] = self.range[i];
                if values.is_empty() || values.iter().any(|v| *v < lo || *v > hi) {
                    return Err(DynamicsError::construction(
                        model,
                        format!("command {i} has discrete values {values:?} outside [{lo}, {hi}]"),
                    ));
                }
            }
        }
        Ok(())
    }
}
