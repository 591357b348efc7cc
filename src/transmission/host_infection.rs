use crate::{
    debug,
    disease::DiseaseId,
    parameters::VectorParameters,
    people::{HostPopulation, InfectionSource},
    place::Place,
    random::RandomService,
    trace,
    transmission::infection_probability,
    Day,
};

/// What one run of the host infection model did at a place for one disease.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HostInfectionOutcome {
    /// Each host's probability of infection today.
    pub probability: f64,
    /// The stochastically rounded number of hosts to attempt.
    pub target: usize,
    /// Candidates whose presence was checked. Never more than `target`.
    pub evaluated: usize,
    pub infected: usize,
}

/// Rounds `expected` down or up so that the result equals `expected` on average: with
/// `expected = m + r`, returns `m + 1` with probability `r`, otherwise `m`. Always consumes
/// exactly one uniform draw.
pub fn stochastic_round<R: RandomService + ?Sized>(expected: f64, rng: &mut R) -> usize {
    let whole = expected.floor();
    let remainder = expected - whole;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut count = whole as usize;
    if rng.draw_uniform() < remainder {
        count += 1;
    }
    count
}

/// Infects hosts enrolled at `place` from its infectious vectors for `disease_id`.
///
/// The number of attempts `k` is the stochastically rounded expected number of infections over
/// the whole roster. Candidates are the first `k` entries of a random permutation of the roster.
/// A candidate who turns out to be absent today or not susceptible uses up the attempt; no
/// replacement is drawn. A newly exposed host becomes unsusceptible to every other disease.
pub fn infect_hosts<R, H>(
    day: Day,
    disease_id: DiseaseId,
    place: &Place,
    parameters: &VectorParameters,
    rng: &mut R,
    hosts: &mut H,
) -> HostInfectionOutcome
where
    R: RandomService + ?Sized,
    H: HostPopulation + ?Sized,
{
    let roster = place.enrollees();
    let total_hosts = roster.len();
    if total_hosts == 0 {
        return HostInfectionOutcome::default();
    }

    let infectious_vectors = place.get_infectious_vectors(disease_id);
    if infectious_vectors == 0 {
        return HostInfectionOutcome::default();
    }

    let transmission_efficiency = parameters.transmission_efficiency;
    if transmission_efficiency == 0.0 {
        return HostInfectionOutcome::default();
    }

    let probability = infection_probability(
        transmission_efficiency,
        parameters.bite_rate,
        infectious_vectors,
        total_hosts,
    );
    #[allow(clippy::cast_precision_loss)]
    let expected_infections = total_hosts as f64 * probability;
    let target = stochastic_round(expected_infections, rng);
    debug!(
        "infect_hosts {:?} {disease_id} day {day}: expected {:.4} target {target}",
        place.id(),
        expected_infections
    );

    let mut outcome = HostInfectionOutcome {
        probability,
        target,
        ..HostInfectionOutcome::default()
    };
    if target == 0 {
        return outcome;
    }

    let order = rng.shuffle_indices(total_hosts);
    for &index in order.iter().take(target) {
        let person_id = roster[index];
        outcome.evaluated += 1;

        hosts.update_schedule(person_id, day);
        if !hosts.is_present(person_id, day, place.id()) {
            trace!("host {person_id:?} absent from {:?}", place.id());
            continue;
        }
        if !hosts.is_susceptible(person_id, disease_id) {
            trace!("host {person_id:?} not susceptible to {disease_id}");
            continue;
        }

        trace!("transmitting {disease_id} to host {person_id:?}");
        hosts.become_exposed(
            person_id,
            disease_id,
            InfectionSource::Environmental,
            place.id(),
            day,
        );
        outcome.infected += 1;

        // Cross-immunity between competing pathogens
        for other in (0..place.number_of_diseases()).map(DiseaseId) {
            if other != disease_id {
                hosts.become_unsusceptible(person_id, other);
            }
        }
    }

    outcome
}
