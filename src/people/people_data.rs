use crate::{
    context::DataPlugin,
    disease::{check_disease_id, DiseaseId},
    people::{Exposure, HostPopulation, InfectionSource, InfectionState, PersonId, Schedule},
    place::PlaceId,
    Day,
};

struct PersonRecord {
    schedule: Schedule,
    // Indexed by `DiseaseId`, sized from the disease count when the person is added
    infection_states: Vec<InfectionState>,
    exposures: Vec<Option<Exposure>>,
}

/// Stores all data associated to people.
#[derive(Default)]
pub(crate) struct PeopleData {
    people: Vec<PersonRecord>,
}

impl DataPlugin for PeopleData {
    const new: &'static dyn Fn() -> Self = &PeopleData::default;
}

impl PeopleData {
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn add_person(&mut self, schedule: Schedule, number_of_diseases: usize) -> PersonId {
        let person_id = PersonId(self.people.len());
        self.people.push(PersonRecord {
            schedule,
            infection_states: vec![InfectionState::Susceptible; number_of_diseases],
            exposures: vec![None; number_of_diseases],
        });
        person_id
    }

    fn get(&self, person_id: PersonId) -> &PersonRecord {
        self.people
            .get(person_id.0)
            .unwrap_or_else(|| panic!("{person_id:?} does not exist"))
    }

    fn get_mut(&mut self, person_id: PersonId) -> &mut PersonRecord {
        self.people
            .get_mut(person_id.0)
            .unwrap_or_else(|| panic!("{person_id:?} does not exist"))
    }

    pub fn get_infection_state(
        &self,
        person_id: PersonId,
        disease_id: DiseaseId,
    ) -> InfectionState {
        let person = self.get(person_id);
        check_disease_id(disease_id, person.infection_states.len());
        person.infection_states[disease_id.0]
    }

    pub fn get_exposure(&self, person_id: PersonId, disease_id: DiseaseId) -> Option<&Exposure> {
        let person = self.get(person_id);
        check_disease_id(disease_id, person.exposures.len());
        person.exposures[disease_id.0].as_ref()
    }

    pub fn get_schedule_mut(&mut self, person_id: PersonId) -> &mut Schedule {
        &mut self.get_mut(person_id).schedule
    }

    pub fn count_in_state(&self, disease_id: DiseaseId, state: InfectionState) -> usize {
        self.people
            .iter()
            .filter(|person| person.infection_states.get(disease_id.0) == Some(&state))
            .count()
    }
}

impl HostPopulation for PeopleData {
    fn update_schedule(&mut self, person_id: PersonId, day: Day) {
        self.get_mut(person_id).schedule.update(day);
    }

    fn is_present(&self, person_id: PersonId, day: Day, place_id: PlaceId) -> bool {
        self.get(person_id).schedule.is_present(day, place_id)
    }

    fn is_susceptible(&self, person_id: PersonId, disease_id: DiseaseId) -> bool {
        self.get_infection_state(person_id, disease_id) == InfectionState::Susceptible
    }

    fn become_exposed(
        &mut self,
        person_id: PersonId,
        disease_id: DiseaseId,
        source: InfectionSource,
        place_id: PlaceId,
        day: Day,
    ) {
        let person = self.get_mut(person_id);
        check_disease_id(disease_id, person.infection_states.len());
        person.infection_states[disease_id.0] = InfectionState::Exposed;
        person.exposures[disease_id.0] = Some(Exposure {
            disease_id,
            source,
            place_id,
            day,
        });
    }

    fn become_unsusceptible(&mut self, person_id: PersonId, disease_id: DiseaseId) {
        let person = self.get_mut(person_id);
        check_disease_id(disease_id, person.infection_states.len());
        person.infection_states[disease_id.0] = InfectionState::Unsusceptible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn people_start_susceptible_to_every_disease() {
        let mut people = PeopleData::default();
        let person = people.add_person(Schedule::new(), 2);

        assert_eq!(people.len(), 1);
        assert!(people.is_susceptible(person, DiseaseId(0)));
        assert!(people.is_susceptible(person, DiseaseId(1)));
        assert!(people.get_exposure(person, DiseaseId(0)).is_none());
    }

    #[test]
    fn exposure_is_recorded_with_its_source() {
        let mut people = PeopleData::default();
        let person = people.add_person(Schedule::new(), 2);

        people.become_exposed(person, DiseaseId(1), InfectionSource::Environmental, PlaceId(4), 9);

        assert_eq!(people.get_infection_state(person, DiseaseId(1)), InfectionState::Exposed);
        assert_eq!(
            people.get_exposure(person, DiseaseId(1)),
            Some(&Exposure {
                disease_id: DiseaseId(1),
                source: InfectionSource::Environmental,
                place_id: PlaceId(4),
                day: 9,
            })
        );
        assert_eq!(people.count_in_state(DiseaseId(1), InfectionState::Exposed), 1);
        assert_eq!(people.count_in_state(DiseaseId(0), InfectionState::Exposed), 0);
    }

    #[test]
    fn unsusceptible_overrides_exposed() {
        let mut people = PeopleData::default();
        let person = people.add_person(Schedule::new(), 1);
        people.become_exposed(person, DiseaseId(0), InfectionSource::Environmental, PlaceId(0), 0);
        people.become_unsusceptible(person, DiseaseId(0));
        assert_eq!(
            people.get_infection_state(person, DiseaseId(0)),
            InfectionState::Unsusceptible
        );
    }

    #[test]
    #[should_panic(expected = "outside the configured range")]
    fn out_of_range_disease_panics() {
        let mut people = PeopleData::default();
        let person = people.add_person(Schedule::new(), 2);
        people.become_unsusceptible(person, DiseaseId(2));
    }
}
