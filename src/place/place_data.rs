use crate::{
    context::DataPlugin,
    place::{Place, PlaceId},
};

/// The place registry.
#[derive(Default)]
pub(crate) struct PlaceData {
    places: Vec<Place>,
}

impl DataPlugin for PlaceData {
    const new: &'static dyn Fn() -> Self = &PlaceData::default;
}

impl PlaceData {
    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn push(&mut self, place: Place) {
        debug_assert_eq!(place.id().0, self.places.len());
        self.places.push(place);
    }

    pub fn next_id(&self) -> PlaceId {
        PlaceId(self.places.len())
    }

    pub fn get(&self, place_id: PlaceId) -> &Place {
        self.places
            .get(place_id.0)
            .unwrap_or_else(|| panic!("{place_id:?} does not exist"))
    }

    pub fn get_mut(&mut self, place_id: PlaceId) -> &mut Place {
        self.places
            .get_mut(place_id.0)
            .unwrap_or_else(|| panic!("{place_id:?} does not exist"))
    }

    pub fn ids(&self) -> impl Iterator<Item = PlaceId> {
        (0..self.places.len()).map(PlaceId)
    }
}
