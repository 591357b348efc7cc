use crate::{type_of, HashMap, TypeId};
use std::any::Any;

/// A type that can serve as a data container held by `Context`. The container is created lazily
/// with `new` the first time it is requested mutably.
pub trait DataPlugin: Any {
    #[allow(non_upper_case_globals)]
    const new: &'static dyn Fn() -> Self;
}

/// Owns the registries consulted by the transmission step: diseases, vector parameters, places,
/// people and random number generators. Each lives in its own data container keyed by type.
pub struct Context {
    // This is actually a `HashMap<TypeId, Box<dyn DataPlugin>>` but must be declared this way to
    // avoid having to implement an `as_any()` method on everything.
    data_plugins: HashMap<TypeId, Box<dyn Any>>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Context {
            data_plugins: HashMap::default(),
        }
    }

    /// Returns a mutable reference for the data container for `T`, creating it if it doesn't
    /// exist yet.
    pub fn get_data_container_mut<T: DataPlugin>(&mut self) -> &mut T {
        self.data_plugins
            .entry(type_of::<T>())
            .or_insert_with(|| Box::new((T::new)()))
            .downcast_mut::<T>()
            .unwrap() // Will never panic as data container has the matching type
    }

    /// Returns a reference to the data container for `T` if it exists.
    /// If you need a mutable reference or lazy instantiation, use
    /// `Context::get_data_container_mut()`.
    pub fn get_data_container<T: DataPlugin>(&self) -> Option<&T> {
        self.data_plugins
            .get(&type_of::<T>())
            .and_then(|data| data.downcast_ref::<T>())
    }

    /// Returns mutable references to two distinct data containers at once, creating either if it
    /// doesn't exist yet. Panics if `A` and `B` are the same type.
    pub fn get_data_container_pair_mut<A: DataPlugin, B: DataPlugin>(
        &mut self,
    ) -> (&mut A, &mut B) {
        let (a_id, b_id) = (type_of::<A>(), type_of::<B>());
        assert_ne!(a_id, b_id, "cannot borrow the same data container twice");

        self.get_data_container_mut::<A>();
        self.get_data_container_mut::<B>();

        let [a, b] = self.data_plugins.get_disjoint_mut([&a_id, &b_id]);
        // Both entries were inserted above with their matching types.
        (
            a.unwrap().downcast_mut::<A>().unwrap(),
            b.unwrap().downcast_mut::<B>().unwrap(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(usize);
    impl DataPlugin for Counter {
        const new: &'static dyn Fn() -> Self = &|| Counter(0);
    }

    struct Labels(Vec<&'static str>);
    impl DataPlugin for Labels {
        const new: &'static dyn Fn() -> Self = &|| Labels(vec![]);
    }

    #[test]
    fn containers_are_created_lazily() {
        let mut context = Context::new();
        assert!(context.get_data_container::<Counter>().is_none());

        context.get_data_container_mut::<Counter>().0 += 3;
        assert_eq!(context.get_data_container::<Counter>().unwrap().0, 3);
    }

    #[test]
    fn pair_borrow_reaches_both_containers() {
        let mut context = Context::new();
        context.get_data_container_mut::<Labels>().0.push("school");

        {
            let (counter, labels) = context.get_data_container_pair_mut::<Counter, Labels>();
            counter.0 = labels.0.len();
            labels.0.push("household");
        }

        assert_eq!(context.get_data_container::<Counter>().unwrap().0, 1);
        assert_eq!(context.get_data_container::<Labels>().unwrap().0, vec!["school", "household"]);
    }

    #[test]
    #[should_panic(expected = "cannot borrow the same data container twice")]
    fn pair_borrow_rejects_same_type() {
        let mut context = Context::new();
        let _ = context.get_data_container_pair_mut::<Counter, Counter>();
    }
}
