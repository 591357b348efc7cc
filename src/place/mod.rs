/*!

Places and their per-day transmission state. A place owns the vector counts at its location, the
count of infectious hosts visiting it today for each disease, and the roster of people enrolled
there. Places are created through `ContextPlaceExt` and live as long as the `Context`.

*/

mod context_ext;
mod place_data;

pub use context_ext::ContextPlaceExt;
pub(crate) use place_data::PlaceData;

use crate::{
    disease::{check_disease_id, DiseaseId},
    people::PersonId,
    Day,
};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PlaceId(pub(crate) usize);

impl PlaceId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The days of the week something happens on. Day 0 of the simulation is a Monday.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum OpenDays {
    #[default]
    Always,
    Weekdays,
    Weekends,
}

impl OpenDays {
    #[must_use]
    pub fn contains(self, day: Day) -> bool {
        let weekday = day % 7 < 5;
        match self {
            OpenDays::Always => true,
            OpenDays::Weekdays => weekday,
            OpenDays::Weekends => !weekday,
        }
    }
}

/// A policy closure, e.g. a school closed in response to an outbreak.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct Closure {
    // `None` closes the place for every disease
    disease_id: Option<DiseaseId>,
    first_day: Day,
    last_day: Day,
}

#[derive(Clone, Debug)]
pub struct Place {
    id: PlaceId,
    label: String,
    open_days: OpenDays,
    closures: Vec<Closure>,
    enrollees: Vec<PersonId>,
    susceptible_vectors: usize,
    // The per-disease vectors are indexed by `DiseaseId`
    infectious_vectors: Vec<usize>,
    infectious_hosts: Vec<usize>,
    vectors_infected_on: Option<Day>,
    infectious_days: Option<(Day, Day)>,
}

impl Place {
    pub(crate) fn new(
        id: PlaceId,
        label: &str,
        open_days: OpenDays,
        number_of_diseases: usize,
    ) -> Self {
        Place {
            id,
            label: label.to_string(),
            open_days,
            closures: vec![],
            enrollees: vec![],
            susceptible_vectors: 0,
            infectious_vectors: vec![0; number_of_diseases],
            infectious_hosts: vec![0; number_of_diseases],
            vectors_infected_on: None,
            infectious_days: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlaceId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn number_of_diseases(&self) -> usize {
        self.infectious_hosts.len()
    }

    #[must_use]
    pub fn is_open(&self, day: Day) -> bool {
        self.open_days.contains(day)
    }

    /// False while a closure policy for `disease_id` (or for every disease) is in effect.
    #[must_use]
    pub fn should_be_open(&self, day: Day, disease_id: DiseaseId) -> bool {
        check_disease_id(disease_id, self.number_of_diseases());
        !self.closures.iter().any(|closure| {
            closure.disease_id.is_none_or(|id| id == disease_id)
                && (closure.first_day..=closure.last_day).contains(&day)
        })
    }

    /// Closes the place from `first_day` through `last_day` for `disease_id`, or for every disease
    /// if `None`.
    pub fn close(&mut self, disease_id: Option<DiseaseId>, first_day: Day, last_day: Day) {
        if let Some(disease_id) = disease_id {
            check_disease_id(disease_id, self.number_of_diseases());
        }
        self.closures.push(Closure {
            disease_id,
            first_day,
            last_day,
        });
    }

    /// Widens the window of days on which transmission was attempted here.
    pub fn record_infectious_days(&mut self, day: Day) {
        self.infectious_days = Some(match self.infectious_days {
            None => (day, day),
            Some((first, last)) => (first.min(day), last.max(day)),
        });
    }

    /// The first and last day transmission was attempted here, if ever.
    #[must_use]
    pub fn infectious_days(&self) -> Option<(Day, Day)> {
        self.infectious_days
    }

    /// Clears the per-day transmission state for `disease_id`: the infectious hosts counted
    /// today. The vectors-infected marker is per day and expires on its own.
    pub fn reset_place_state(&mut self, disease_id: DiseaseId) {
        check_disease_id(disease_id, self.number_of_diseases());
        self.infectious_hosts[disease_id.0] = 0;
    }

    #[must_use]
    pub fn have_vectors_been_infected_today(&self, day: Day) -> bool {
        self.vectors_infected_on == Some(day)
    }

    pub fn mark_vectors_as_infected_today(&mut self, day: Day) {
        self.vectors_infected_on = Some(day);
    }

    #[must_use]
    pub fn get_susceptible_vectors(&self) -> usize {
        self.susceptible_vectors
    }

    pub fn set_susceptible_vectors(&mut self, count: usize) {
        self.susceptible_vectors = count;
    }

    #[must_use]
    pub fn get_infectious_vectors(&self, disease_id: DiseaseId) -> usize {
        check_disease_id(disease_id, self.number_of_diseases());
        self.infectious_vectors[disease_id.0]
    }

    pub fn set_infectious_vectors(&mut self, disease_id: DiseaseId, count: usize) {
        check_disease_id(disease_id, self.number_of_diseases());
        self.infectious_vectors[disease_id.0] = count;
    }

    /// Moves `count` susceptible vectors into the infectious pool for `disease_id`.
    pub fn expose_vectors(&mut self, disease_id: DiseaseId, count: usize) {
        check_disease_id(disease_id, self.number_of_diseases());
        debug_assert!(count <= self.susceptible_vectors);
        let count = count.min(self.susceptible_vectors);
        self.susceptible_vectors -= count;
        self.infectious_vectors[disease_id.0] += count;
    }

    #[must_use]
    pub fn get_infectious_hosts(&self, disease_id: DiseaseId) -> usize {
        check_disease_id(disease_id, self.number_of_diseases());
        self.infectious_hosts[disease_id.0]
    }

    /// Counts an infectious host visiting today.
    pub fn add_infectious_host(&mut self, disease_id: DiseaseId) {
        check_disease_id(disease_id, self.number_of_diseases());
        self.infectious_hosts[disease_id.0] += 1;
    }

    pub fn set_infectious_hosts(&mut self, disease_id: DiseaseId, count: usize) {
        check_disease_id(disease_id, self.number_of_diseases());
        self.infectious_hosts[disease_id.0] = count;
    }

    /// All people associated with the place, whether or not they are present or susceptible.
    #[must_use]
    pub fn enrollees(&self) -> &[PersonId] {
        &self.enrollees
    }

    /// The number of enrollees; the feeding pool vectors bite from.
    #[must_use]
    pub fn get_size(&self) -> usize {
        self.enrollees.len()
    }

    pub(crate) fn enroll(&mut self, person_id: PersonId) {
        if !self.enrollees.contains(&person_id) {
            self.enrollees.push(person_id);
        }
    }
}
