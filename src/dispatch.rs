//! Named-operation dispatch shared by the HTTP API and the tool server.
//!
//! Both boundary surfaces resolve a request to one of the two calculators
//! through this module, so the wire-to-domain conversion and the choice of
//! statutory amounts happen in exactly one place.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::api::{IncapacityRequest, SeveranceRequest};
use crate::calculation::{calculate_incapacity, calculate_severance};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{IncapacityInput, IncapacityResult, SeveranceInput, SeveranceResult};

/// A calculator exposed as a named operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `calcular_incapacidad`: incapacity benefit under Law 26.773.
    Incapacity,
    /// `calcular_indemnizacion`: severance after dismissal without cause.
    Severance,
}

impl Operation {
    /// Every operation, in the order tools are advertised.
    pub const ALL: [Operation; 2] = [Operation::Incapacity, Operation::Severance];

    /// Returns the wire name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Incapacity => "calcular_incapacidad",
            Operation::Severance => "calcular_indemnizacion",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| EngineError::ToolNotFound {
                name: s.to_string(),
            })
    }
}

/// The result of a dispatched operation, serialized without any wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    /// Output of [`Operation::Incapacity`].
    Incapacity(IncapacityResult),
    /// Output of [`Operation::Severance`].
    Severance(SeveranceResult),
}

/// Runs the incapacity calculator for a wire request.
///
/// The statutory amounts are those effective on `fechaPMI` when given,
/// otherwise the latest loaded set.
pub fn incapacity(
    request: IncapacityRequest,
    config: &ConfigLoader,
) -> EngineResult<IncapacityResult> {
    let pmi_date = request.pmi_date()?;
    let input = IncapacityInput::try_from(request)?;
    let amounts = config.amounts_for(pmi_date)?;
    calculate_incapacity(&input, amounts)
}

/// Runs the severance calculator for a wire request.
pub fn severance(request: SeveranceRequest) -> EngineResult<SeveranceResult> {
    let input = SeveranceInput::try_from(request)?;
    calculate_severance(&input)
}

/// Resolves `name` to an operation and runs it on `arguments`.
///
/// Arguments are read field by field, so a missing or mistyped field is
/// reported as [`EngineError::InvalidInput`] under its own wire name.
///
/// # Examples
///
/// ```
/// use compensation_engine::config::ConfigLoader;
/// use compensation_engine::dispatch::{ToolOutput, dispatch};
/// use serde_json::json;
///
/// let config = ConfigLoader::builtin();
/// let output = dispatch(
///     "calcular_incapacidad",
///     json!({
///         "ingresoBase": 500000,
///         "porcentajeIncapacidad": 70,
///         "edad": 50,
///         "tipoContingencia": "accidente_trabajo"
///     }),
///     &config,
/// )
/// .unwrap();
/// assert!(matches!(output, ToolOutput::Incapacity(_)));
///
/// assert!(dispatch("calcular_jubilacion", json!({}), &config).is_err());
/// ```
pub fn dispatch(name: &str, arguments: Value, config: &ConfigLoader) -> EngineResult<ToolOutput> {
    match Operation::from_str(name)? {
        Operation::Incapacity => {
            incapacity(IncapacityRequest::try_from(arguments)?, config).map(ToolOutput::Incapacity)
        }
        Operation::Severance => {
            severance(SeveranceRequest::try_from(arguments)?).map(ToolOutput::Severance)
        }
    }
}
