/*!

Vector-biology parameters and the JSON parameter file that configures a run.

```json
{
  "seed": 42,
  "diseases": [
    { "name": "DENV-1", "transmissibility": 1.0 },
    { "name": "DENV-2", "transmissibility": 1.0 }
  ],
  "vectors": {
    "infection_efficiency": 0.1,
    "bite_rate": 0.5,
    "transmission_efficiency": 0.05
  }
}
```

*/

use crate::{
    context::{Context, DataPlugin},
    disease::ContextDiseaseExt,
    error::IxaError,
    info,
    random::ContextRandomExt,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Process-wide vector biology, read only to the transmission step.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorParameters {
    /// Probability that a single bite on an infectious host infects the feeding vector.
    pub infection_efficiency: f64,
    /// Expected bites per vector per day.
    pub bite_rate: f64,
    /// Probability that a single bite from an infectious vector infects the host.
    pub transmission_efficiency: f64,
}

impl VectorParameters {
    pub fn validate(&self) -> Result<(), IxaError> {
        for (name, value) in [
            ("infection_efficiency", self.infection_efficiency),
            ("transmission_efficiency", self.transmission_efficiency),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(IxaError::IxaError(format!(
                    "{name} must be a probability in [0, 1], got {value}"
                )));
            }
        }
        if !self.bite_rate.is_finite() || self.bite_rate < 0.0 {
            return Err(IxaError::IxaError(format!(
                "bite_rate must be a finite non-negative number, got {}",
                self.bite_rate
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiseaseParameters {
    pub name: String,
    pub transmissibility: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub seed: u64,
    pub diseases: Vec<DiseaseParameters>,
    pub vectors: VectorParameters,
}

impl SimulationParameters {
    pub fn from_json_file(path: &Path) -> Result<Self, IxaError> {
        let data = std::fs::read_to_string(path)?;
        let parameters: SimulationParameters = serde_json::from_str(&data)?;
        Ok(parameters)
    }
}

struct VectorParametersPlugin {
    parameters: Option<VectorParameters>,
}

impl DataPlugin for VectorParametersPlugin {
    const new: &'static dyn Fn() -> Self = &|| VectorParametersPlugin { parameters: None };
}

pub trait ContextParametersExt {
    /// Validates and stores the vector parameters, replacing any previous values.
    fn set_vector_parameters(&mut self, parameters: VectorParameters) -> Result<(), IxaError>;

    /// Panics if the vector parameters were never set.
    fn get_vector_parameters(&self) -> &VectorParameters;

    /// Seeds the random module, registers the diseases and stores the vector parameters.
    fn init_parameters(&mut self, parameters: &SimulationParameters) -> Result<(), IxaError>;

    fn load_parameters_from_json(&mut self, path: &Path) -> Result<(), IxaError>;
}

impl ContextParametersExt for Context {
    fn set_vector_parameters(&mut self, parameters: VectorParameters) -> Result<(), IxaError> {
        parameters.validate()?;
        self.get_data_container_mut::<VectorParametersPlugin>().parameters = Some(parameters);
        Ok(())
    }

    fn get_vector_parameters(&self) -> &VectorParameters {
        self.get_data_container::<VectorParametersPlugin>()
            .and_then(|plugin| plugin.parameters.as_ref())
            .expect("vector parameters have not been set")
    }

    fn init_parameters(&mut self, parameters: &SimulationParameters) -> Result<(), IxaError> {
        if parameters.diseases.is_empty() {
            return Err("at least one disease must be configured".into());
        }
        // Validate everything before mutating the context.
        parameters.vectors.validate()?;
        if let Some(disease) = parameters
            .diseases
            .iter()
            .find(|disease| !disease.transmissibility.is_finite() || disease.transmissibility < 0.0)
        {
            return Err(IxaError::IxaError(format!(
                "transmissibility of {} must be a finite non-negative number, got {}",
                disease.name, disease.transmissibility
            )));
        }

        self.init_random(parameters.seed);
        for disease in &parameters.diseases {
            self.add_disease(&disease.name, disease.transmissibility)?;
        }
        self.set_vector_parameters(parameters.vectors)?;
        info!(
            "configured {} diseases, vectors {:?}, seed {}",
            parameters.diseases.len(),
            parameters.vectors,
            parameters.seed
        );
        Ok(())
    }

    fn load_parameters_from_json(&mut self, path: &Path) -> Result<(), IxaError> {
        let parameters = SimulationParameters::from_json_file(path)?;
        self.init_parameters(&parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disease::DiseaseId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PARAMETERS: &str = r#"{
        "seed": 42,
        "diseases": [
            { "name": "DENV-1", "transmissibility": 1.0 },
            { "name": "DENV-2", "transmissibility": 0.0 }
        ],
        "vectors": {
            "infection_efficiency": 0.1,
            "bite_rate": 0.5,
            "transmission_efficiency": 0.05
        }
    }"#;

    fn write_parameters(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_parameters_from_json() {
        let file = write_parameters(PARAMETERS);
        let mut context = Context::new();
        context.load_parameters_from_json(file.path()).unwrap();

        assert_eq!(context.get_base_random_seed(), 42);
        assert_eq!(context.get_number_of_diseases(), 2);
        assert_eq!(context.get_disease(DiseaseId(1)).transmissibility(), 0.0);
        assert_eq!(
            *context.get_vector_parameters(),
            VectorParameters {
                infection_efficiency: 0.1,
                bite_rate: 0.5,
                transmission_efficiency: 0.05,
            }
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut context = Context::new();
        let result = context.load_parameters_from_json(Path::new("/nonexistent/parameters.json"));
        assert!(matches!(result, Err(IxaError::IoError(_))));
    }

    #[test]
    fn malformed_file_is_a_json_error() {
        let file = write_parameters(r#"{ "seed": 42, "diseases": [] "#);
        let mut context = Context::new();
        let result = context.load_parameters_from_json(file.path());
        assert!(matches!(result, Err(IxaError::JsonError(_))));
    }

    #[test]
    fn rejects_out_of_range_efficiency() {
        let file = write_parameters(&PARAMETERS.replace("0.05", "1.5"));
        let mut context = Context::new();
        let result = context.load_parameters_from_json(file.path());
        assert!(matches!(result, Err(IxaError::IxaError(_))));
        // Nothing was registered.
        assert_eq!(context.get_number_of_diseases(), 0);
    }

    #[test]
    fn rejects_empty_disease_list() {
        let mut context = Context::new();
        let parameters = SimulationParameters {
            seed: 1,
            diseases: vec![],
            vectors: VectorParameters::default(),
        };
        assert!(context.init_parameters(&parameters).is_err());
    }

    #[test]
    fn rejects_negative_bite_rate() {
        let mut context = Context::new();
        let parameters = VectorParameters {
            infection_efficiency: 0.1,
            bite_rate: -0.5,
            transmission_efficiency: 0.1,
        };
        assert!(context.set_vector_parameters(parameters).is_err());
    }

    #[test]
    #[should_panic(expected = "vector parameters have not been set")]
    fn unset_parameters_panic() {
        let context = Context::new();
        let _ = context.get_vector_parameters();
    }
}
