/*!

Vector transmission. For a (day, disease, place) the step first infects the place's vectors from
the infectious hosts visiting it (once per place per day, shared by every disease), then infects
hosts from the place's infectious vectors for the one disease, then clears the place's per-day
state for that disease.

Vector-side counts are truncated; the host-side count is stochastically rounded because it
drives the selection of individuals.

*/

mod host_infection;
mod vector_infection;

pub use host_infection::{infect_hosts, stochastic_round, HostInfectionOutcome};
pub use vector_infection::{infect_vectors, VectorInfectionOutcome};

use crate::{
    context::Context,
    debug,
    define_rng,
    disease::{check_disease_id, ContextDiseaseExt, DiseaseId},
    parameters::{ContextParametersExt, VectorParameters},
    people::{HostPopulation, PeopleData},
    place::{ContextPlaceExt, Place, PlaceData, PlaceId},
    random::{ContextRandomExt, RandomService},
    Day,
};

define_rng!(HostInfectionRng);

/// The daily probability that a biting target is infected:
/// `1 - (1 - efficiency)^(bite_rate * infectious / total)`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn infection_probability(
    efficiency: f64,
    bite_rate: f64,
    infectious: usize,
    total: usize,
) -> f64 {
    1.0 - (1.0 - efficiency).powf(bite_rate * infectious as f64 / total as f64)
}

/// Runs the transmission step for one disease at one place.
pub fn spread_infection<R, H>(
    day: Day,
    disease_id: DiseaseId,
    transmissibility: f64,
    place: &mut Place,
    parameters: &VectorParameters,
    rng: &mut R,
    hosts: &mut H,
) where
    R: RandomService + ?Sized,
    H: HostPopulation + ?Sized,
{
    check_disease_id(disease_id, place.number_of_diseases());

    // abort if transmissibility == 0 or if the place is closed
    if transmissibility == 0.0 || !place.is_open(day) || !place.should_be_open(day, disease_id) {
        place.reset_place_state(disease_id);
        return;
    }

    place.record_infectious_days(day);

    // infections of vectors by hosts
    if !place.have_vectors_been_infected_today(day) {
        infect_vectors(day, place, parameters);
    }

    // transmission from vectors to hosts
    let outcome = infect_hosts(day, disease_id, place, parameters, rng, hosts);
    if outcome.infected > 0 {
        debug!(
            "{:?} day {day}: {} hosts newly exposed to {disease_id}",
            place.id(),
            outcome.infected
        );
    }

    place.reset_place_state(disease_id);
}

pub trait ContextTransmissionExt {
    /// Runs the transmission step for `disease_id` at `place_id` on `day` against the context's
    /// registries. Host selection draws from a random stream keyed by (place, day, disease).
    fn spread_vector_infection(&mut self, day: Day, disease_id: DiseaseId, place_id: PlaceId);

    /// Runs the transmission step for every place and, within each place, every disease in id
    /// order.
    fn spread_infection_for_day(&mut self, day: Day);
}

impl ContextTransmissionExt for Context {
    fn spread_vector_infection(&mut self, day: Day, disease_id: DiseaseId, place_id: PlaceId) {
        let transmissibility = self.get_disease(disease_id).transmissibility();
        let parameters = *self.get_vector_parameters();
        let mut rng = self.substream::<HostInfectionRng>(&[
            place_id.index() as u64,
            u64::from(day),
            disease_id.0 as u64,
        ]);

        let (place_data, people_data) = self.get_data_container_pair_mut::<PlaceData, PeopleData>();
        spread_infection(
            day,
            disease_id,
            transmissibility,
            place_data.get_mut(place_id),
            &parameters,
            &mut rng,
            people_data,
        );
    }

    fn spread_infection_for_day(&mut self, day: Day) {
        let number_of_diseases = self.get_number_of_diseases();
        for place_id in self.get_place_ids() {
            for disease_id in (0..number_of_diseases).map(DiseaseId) {
                self.spread_vector_infection(day, disease_id, place_id);
            }
        }
    }
}
