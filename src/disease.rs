/*!

The configured set of co-circulating pathogens (e.g. dengue serotypes). Diseases are identified by
a dense `DiseaseId` in `0..get_number_of_diseases()`. An id outside that range is a scheduling bug
in the caller and panics.

*/

use crate::{
    context::{Context, DataPlugin},
    error::IxaError,
    place::PlaceData,
    people::PeopleData,
};
use std::fmt::{self, Display};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct DiseaseId(pub usize);

impl Display for DiseaseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "disease {}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Disease {
    id: DiseaseId,
    name: String,
    transmissibility: f64,
}

impl Disease {
    pub fn new(id: DiseaseId, name: &str, transmissibility: f64) -> Self {
        Disease {
            id,
            name: name.to_string(),
            transmissibility,
        }
    }

    #[must_use]
    pub fn id(&self) -> DiseaseId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pathogen's transmissibility coefficient (beta). Zero disables transmission.
    #[must_use]
    pub fn transmissibility(&self) -> f64 {
        self.transmissibility
    }
}

#[derive(Default)]
pub(crate) struct DiseaseList {
    diseases: Vec<Disease>,
}

impl DataPlugin for DiseaseList {
    const new: &'static dyn Fn() -> Self = &DiseaseList::default;
}

impl DiseaseList {
    pub(crate) fn len(&self) -> usize {
        self.diseases.len()
    }

    pub(crate) fn get(&self, disease_id: DiseaseId) -> &Disease {
        check_disease_id(disease_id, self.diseases.len());
        &self.diseases[disease_id.0]
    }
}

/// Panics unless `disease_id` is in `0..number_of_diseases`.
#[inline]
pub(crate) fn check_disease_id(disease_id: DiseaseId, number_of_diseases: usize) {
    assert!(
        disease_id.0 < number_of_diseases,
        "{disease_id} is outside the configured range of {number_of_diseases} diseases"
    );
}

pub trait ContextDiseaseExt {
    /// Registers a disease and returns its id. Diseases must all be registered before any place
    /// or person is created, because per-disease state is sized from the disease count.
    fn add_disease(&mut self, name: &str, transmissibility: f64) -> Result<DiseaseId, IxaError>;

    fn get_disease(&self, disease_id: DiseaseId) -> &Disease;

    fn get_number_of_diseases(&self) -> usize;
}

impl ContextDiseaseExt for Context {
    fn add_disease(&mut self, name: &str, transmissibility: f64) -> Result<DiseaseId, IxaError> {
        if !transmissibility.is_finite() || transmissibility < 0.0 {
            return Err(IxaError::IxaError(format!(
                "transmissibility of {name} must be finite and non-negative, got {transmissibility}"
            )));
        }
        let has_places = self
            .get_data_container::<PlaceData>()
            .is_some_and(|places| places.len() > 0);
        let has_people = self
            .get_data_container::<PeopleData>()
            .is_some_and(|people| people.len() > 0);
        if has_places || has_people {
            return Err(IxaError::IxaError(format!(
                "cannot add {name} after places or people have been created"
            )));
        }

        let disease_list = self.get_data_container_mut::<DiseaseList>();
        let id = DiseaseId(disease_list.diseases.len());
        disease_list.diseases.push(Disease::new(id, name, transmissibility));
        Ok(id)
    }

    fn get_disease(&self, disease_id: DiseaseId) -> &Disease {
        match self.get_data_container::<DiseaseList>() {
            Some(disease_list) => disease_list.get(disease_id),
            None => panic!("{disease_id} requested but no diseases are configured"),
        }
    }

    fn get_number_of_diseases(&self) -> usize {
        self.get_data_container::<DiseaseList>()
            .map_or(0, DiseaseList::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::{ContextPlaceExt, OpenDays};

    #[test]
    fn diseases_get_dense_ids() {
        let mut context = Context::new();
        let first = context.add_disease("DENV-1", 1.0).unwrap();
        let second = context.add_disease("DENV-2", 0.5).unwrap();

        assert_eq!(first, DiseaseId(0));
        assert_eq!(second, DiseaseId(1));
        assert_eq!(context.get_number_of_diseases(), 2);
        assert_eq!(context.get_disease(second).name(), "DENV-2");
        assert_eq!(context.get_disease(second).transmissibility(), 0.5);
    }

    #[test]
    fn rejects_invalid_transmissibility() {
        let mut context = Context::new();
        assert!(context.add_disease("DENV-1", -1.0).is_err());
        assert!(context.add_disease("DENV-1", f64::NAN).is_err());
        assert_eq!(context.get_number_of_diseases(), 0);
    }

    #[test]
    fn rejects_diseases_after_places_exist() {
        let mut context = Context::new();
        context.add_disease("DENV-1", 1.0).unwrap();
        context.add_place("household", OpenDays::Always).unwrap();
        assert!(context.add_disease("DENV-2", 1.0).is_err());
    }

    #[test]
    #[should_panic(expected = "outside the configured range")]
    fn out_of_range_id_panics() {
        let mut context = Context::new();
        context.add_disease("DENV-1", 1.0).unwrap();
        let _ = context.get_disease(DiseaseId(1));
    }
}
