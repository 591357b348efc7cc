use crate::{
    context::Context,
    disease::{ContextDiseaseExt, DiseaseId},
    error::IxaError,
    people::{Exposure, InfectionState, PeopleData, PersonId, Schedule},
    place::{ContextPlaceExt, PlaceData},
};

pub trait ContextPeopleExt {
    fn get_population_size(&self) -> usize;

    /// Adds a person and enrolls them at every place their schedule mentions.
    fn add_person(&mut self, schedule: Schedule) -> Result<PersonId, IxaError>;

    fn get_infection_state(&self, person_id: PersonId, disease_id: DiseaseId) -> InfectionState;

    fn get_exposure(&self, person_id: PersonId, disease_id: DiseaseId) -> Option<&Exposure>;

    fn get_schedule_mut(&mut self, person_id: PersonId) -> &mut Schedule;

    /// Counts the people in `state` for `disease_id`.
    fn count_people_in_state(&self, disease_id: DiseaseId, state: InfectionState) -> usize;
}

fn people_data(context: &Context) -> &PeopleData {
    context
        .get_data_container::<PeopleData>()
        .expect("no people have been added")
}

impl ContextPeopleExt for Context {
    fn get_population_size(&self) -> usize {
        match self.get_data_container::<PeopleData>() {
            None => 0,
            Some(people_data) => people_data.len(),
        }
    }

    fn add_person(&mut self, schedule: Schedule) -> Result<PersonId, IxaError> {
        let number_of_diseases = self.get_number_of_diseases();
        if number_of_diseases == 0 {
            return Err("diseases must be configured before people are added".into());
        }
        let number_of_places = self
            .get_data_container::<PlaceData>()
            .map_or(0, PlaceData::len);
        if let Some(place_id) = schedule.places().find(|place_id| place_id.0 >= number_of_places) {
            return Err(IxaError::IxaError(format!(
                "schedule refers to unknown {place_id:?}"
            )));
        }

        let places: Vec<_> = schedule.places().collect();
        let person_id = self
            .get_data_container_mut::<PeopleData>()
            .add_person(schedule, number_of_diseases);
        for place_id in places {
            self.enroll(place_id, person_id);
        }
        Ok(person_id)
    }

    fn get_infection_state(&self, person_id: PersonId, disease_id: DiseaseId) -> InfectionState {
        people_data(self).get_infection_state(person_id, disease_id)
    }

    fn get_exposure(&self, person_id: PersonId, disease_id: DiseaseId) -> Option<&Exposure> {
        people_data(self).get_exposure(person_id, disease_id)
    }

    fn get_schedule_mut(&mut self, person_id: PersonId) -> &mut Schedule {
        self.get_data_container_mut::<PeopleData>()
            .get_schedule_mut(person_id)
    }

    fn count_people_in_state(&self, disease_id: DiseaseId, state: InfectionState) -> usize {
        self.get_data_container::<PeopleData>()
            .map_or(0, |people_data| people_data.count_in_state(disease_id, state))
    }
}
