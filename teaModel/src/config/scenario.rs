use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::economic::EconomicParameters;
use crate::config::stage_specs::{CaptureSpec, ConversionSpec, DistributionSpec, SynthesisSpec};
use crate::error::{RangeWarning, TeaError, TeaResult};
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInputs {
    pub economics: EconomicParameters,
    pub capture: CaptureSpec,
    pub conversion: ConversionSpec,
    pub synthesis: SynthesisSpec,
    pub distribution: DistributionSpec,
}

/// One complete, validated parameter set for the capture → electrolysis → FT → distribution chain.
///
/// A scenario is immutable once built; perturbations produce new scenarios.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScenarioInputs", into = "ScenarioInputs")]
pub struct Scenario {
    economics: EconomicParameters,
    capture: CaptureSpec,
    conversion: ConversionSpec,
    synthesis: SynthesisSpec,
    distribution: DistributionSpec,
}

impl Scenario {
    pub fn new(
        economics: EconomicParameters,
        capture: CaptureSpec,
        conversion: ConversionSpec,
        synthesis: SynthesisSpec,
        distribution: DistributionSpec,
    ) -> TeaResult<Self> {
        capture.validate()?;
        conversion.validate()?;
        synthesis.validate()?;
        distribution.validate()?;

        Ok(Self {
            economics,
            capture,
            conversion,
            synthesis,
            distribution,
        })
    }

    pub fn economics(&self) -> &EconomicParameters {
        &self.economics
    }

    pub fn capture(&self) -> &CaptureSpec {
        &self.capture
    }

    pub fn conversion(&self) -> &ConversionSpec {
        &self.conversion
    }

    pub fn synthesis(&self) -> &SynthesisSpec {
        &self.synthesis
    }

    pub fn distribution(&self) -> &DistributionSpec {
        &self.distribution
    }

    pub fn with_economics(&self, economics: EconomicParameters) -> Self {
        Self { economics, ..self.clone() }
    }

    pub fn with_capture(&self, capture: CaptureSpec) -> TeaResult<Self> {
        capture.validate()?;
        Ok(Self { capture, ..self.clone() })
    }

    pub fn with_conversion(&self, conversion: ConversionSpec) -> TeaResult<Self> {
        conversion.validate()?;
        Ok(Self { conversion, ..self.clone() })
    }

    pub fn with_synthesis(&self, synthesis: SynthesisSpec) -> TeaResult<Self> {
        synthesis.validate()?;
        Ok(Self { synthesis, ..self.clone() })
    }

    pub fn with_distribution(&self, distribution: DistributionSpec) -> TeaResult<Self> {
        distribution.validate()?;
        Ok(Self { distribution, ..self.clone() })
    }

    /// All plausibility warnings across the parameter groups.
    pub fn range_warnings(&self) -> Vec<RangeWarning> {
        let mut warnings = self.economics.range_warnings();
        warnings.extend(self.capture.range_warnings());
        warnings.extend(self.conversion.range_warnings());
        warnings
    }

    pub fn load_json(path: impl AsRef<Path>) -> TeaResult<Self> {
        let content = fs::read_to_string(path)?;
        let scenario: Self = serde_json::from_str(&content)?;
        Ok(scenario)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> TeaResult<()> {
        let _timing = logging::start_timing("save_scenario",
            OperationCategory::FileIO { subcategory: FileIOType::ScenarioSave });
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl TryFrom<ScenarioInputs> for Scenario {
    type Error = TeaError;

    fn try_from(inputs: ScenarioInputs) -> Result<Self, Self::Error> {
        Self::new(
            inputs.economics,
            inputs.capture,
            inputs.conversion,
            inputs.synthesis,
            inputs.distribution,
        )
    }
}

impl From<Scenario> for ScenarioInputs {
    fn from(scenario: Scenario) -> Self {
        Self {
            economics: scenario.economics,
            capture: scenario.capture,
            conversion: scenario.conversion,
            synthesis: scenario.synthesis,
            distribution: scenario.distribution,
        }
    }
}
