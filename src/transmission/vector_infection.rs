use crate::{
    debug,
    disease::DiseaseId,
    parameters::VectorParameters,
    place::Place,
    transmission::infection_probability,
    Day,
};

/// What one run of the vector infection model did at a place.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorInfectionOutcome {
    /// Each susceptible vector's probability of infection today.
    pub probability: f64,
    /// `floor(probability * susceptible_vectors)`
    pub total_infections: usize,
    /// Newly infected vectors per disease, indexed by `DiseaseId`.
    pub exposed: Vec<usize>,
}

impl VectorInfectionOutcome {
    #[must_use]
    pub fn newly_infected(&self) -> usize {
        self.exposed.iter().sum()
    }
}

/// Infects susceptible vectors at `place` from the infectious hosts visiting it today, across all
/// diseases at once, and marks the place's vectors as infected for `day`.
///
/// Returns `None` without touching the place when there are no susceptible vectors, no
/// infectious hosts, or no hosts at all. Otherwise the marker is set even if every disease's
/// share truncates to zero.
pub fn infect_vectors(
    day: Day,
    place: &mut Place,
    parameters: &VectorParameters,
) -> Option<VectorInfectionOutcome> {
    let susceptible_vectors = place.get_susceptible_vectors();
    if susceptible_vectors == 0 {
        return None;
    }

    // Includes all visitors: infectious, susceptible, or neither
    let total_hosts = place.get_size();

    let mut infectious_hosts: Vec<usize> = (0..place.number_of_diseases())
        .map(|disease| place.get_infectious_hosts(DiseaseId(disease)))
        .collect();
    let total_infectious_hosts: usize = infectious_hosts.iter().sum();
    if total_infectious_hosts == 0 || total_hosts == 0 {
        return None;
    }

    debug!(
        "infect_vectors {:?} day {day}: susceptible_vectors {} total_infectious_hosts {}",
        place.id(),
        susceptible_vectors,
        total_infectious_hosts
    );

    let probability = infection_probability(
        parameters.infection_efficiency,
        parameters.bite_rate,
        total_infectious_hosts,
        total_hosts,
    );
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_infections = (probability * susceptible_vectors as f64).floor() as usize;

    // Apportion by each disease's share of the infectious hosts. The buffer of host counts is
    // reused for the shares.
    for (disease, count) in infectious_hosts.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let share = (total_infections as u128 * *count as u128
            / total_infectious_hosts as u128) as usize;
        *count = share;
        if share > 0 {
            place.expose_vectors(DiseaseId(disease), share);
        }
    }
    place.mark_vectors_as_infected_today(day);

    let outcome = VectorInfectionOutcome {
        probability,
        total_infections,
        exposed: infectious_hosts,
    };
    debug!(
        "infect_vectors {:?} day {day}: total_infections {total_infections} newly_infected {}",
        place.id(),
        outcome.newly_infected()
    );
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::PersonId;
    use crate::place::{OpenDays, PlaceId};

    fn place_with(
        susceptible_vectors: usize,
        total_hosts: usize,
        infectious_hosts: &[usize],
    ) -> Place {
        let mut place = Place::new(
            PlaceId(0),
            "household",
            OpenDays::Always,
            infectious_hosts.len(),
        );
        place.set_susceptible_vectors(susceptible_vectors);
        for index in 0..total_hosts {
            place.enroll(PersonId(index));
        }
        for (disease, count) in infectious_hosts.iter().enumerate() {
            place.set_infectious_hosts(DiseaseId(disease), *count);
        }
        place
    }

    fn parameters(infection_efficiency: f64, bite_rate: f64) -> VectorParameters {
        VectorParameters {
            infection_efficiency,
            bite_rate,
            transmission_efficiency: 0.0,
        }
    }

    #[test]
    fn single_disease_scenario() {
        let mut place = place_with(1000, 100, &[10, 0]);
        let outcome = infect_vectors(3, &mut place, &parameters(0.1, 0.5)).unwrap();

        // 1 - 0.9^(0.5 * 10 / 100)
        assert!((outcome.probability - 0.005_254).abs() < 1e-5);
        assert_eq!(outcome.total_infections, 5);
        assert_eq!(outcome.exposed, vec![5, 0]);

        assert_eq!(place.get_susceptible_vectors(), 995);
        assert_eq!(place.get_infectious_vectors(DiseaseId(0)), 5);
        assert_eq!(place.get_infectious_vectors(DiseaseId(1)), 0);
        assert!(place.have_vectors_been_infected_today(3));
    }

    #[test]
    fn apportionment_never_exceeds_total() {
        let mut place = place_with(1000, 3, &[1, 1, 1]);
        let outcome = infect_vectors(0, &mut place, &parameters(0.5, 1.0)).unwrap();

        // p = 1 - 0.5^(1 * 3 / 3) = 0.5
        assert_eq!(outcome.total_infections, 500);
        assert_eq!(outcome.exposed, vec![166, 166, 166]);
        assert!(outcome.newly_infected() <= outcome.total_infections);
        assert_eq!(place.get_susceptible_vectors(), 1000 - 498);
    }

    #[test]
    fn shares_follow_infectious_host_proportions() {
        let mut place = place_with(10_000, 40, &[30, 10]);
        let outcome = infect_vectors(0, &mut place, &parameters(0.2, 1.0)).unwrap();

        let total = outcome.total_infections;
        assert_eq!(outcome.exposed, vec![total * 3 / 4, total / 4]);
        assert!(outcome.exposed[0] > outcome.exposed[1]);
    }

    #[test]
    fn marker_set_when_every_share_truncates_to_zero() {
        let mut place = place_with(10, 1000, &[1, 0]);
        let outcome = infect_vectors(7, &mut place, &parameters(0.1, 0.5)).unwrap();

        assert_eq!(outcome.total_infections, 0);
        assert_eq!(outcome.newly_infected(), 0);
        assert_eq!(place.get_susceptible_vectors(), 10);
        assert!(place.have_vectors_been_infected_today(7));
    }

    #[test]
    fn no_susceptible_vectors_is_a_no_op() {
        let mut place = place_with(0, 100, &[10, 5]);
        assert!(infect_vectors(1, &mut place, &parameters(0.1, 0.5)).is_none());
        assert!(!place.have_vectors_been_infected_today(1));
    }

    #[test]
    fn no_infectious_hosts_is_a_no_op() {
        let mut place = place_with(1000, 100, &[0, 0]);
        assert!(infect_vectors(1, &mut place, &parameters(0.1, 0.5)).is_none());
        assert!(!place.have_vectors_been_infected_today(1));
        assert_eq!(place.get_susceptible_vectors(), 1000);
    }

    #[test]
    fn empty_roster_is_a_no_op() {
        let mut place = place_with(1000, 0, &[2, 0]);
        assert!(infect_vectors(1, &mut place, &parameters(0.1, 0.5)).is_none());
        assert!(!place.have_vectors_been_infected_today(1));
    }
}
