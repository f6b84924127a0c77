//! Property tests for store ordering and change delivery.

use catalog_feed::{
    AddProduct, Catalog, ChangeEvent, ChangeKind, CatalogError, Mutation, Product, ProductId,
    UpdateDescription,
};
use proptest::prelude::*;
use std::time::Duration;

fn drain(listener: &catalog_feed::Listener) -> Vec<ChangeEvent> {
    let mut events = Vec::new();
    while let Ok(Some(event)) = listener.try_recv() {
        events.push(event);
    }
    events
}

fn add_strategy() -> impl Strategy<Value = AddProduct> {
    // Small id range so duplicates show up
    ("[a-z]{0,8}", 0i64..8, "[a-z ]{0,12}")
        .prop_map(|(name, id, description)| AddProduct::new(name, id, description))
}

fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        add_strategy().prop_map(Mutation::Add),
        (0i64..8).prop_map(|id| Mutation::Delete { id: ProductId(id) }),
        (0i64..8, "[a-z]{0,6}")
            .prop_map(|(id, d)| Mutation::UpdateDescription(UpdateDescription::new(id, d))),
    ]
}

proptest! {
    #[test]
    fn list_preserves_insertion_order(adds in prop::collection::vec(add_strategy(), 0..40)) {
        let catalog = Catalog::new();
        for add in &adds {
            catalog.add(add.clone());
        }

        let expected: Vec<Product> = adds
            .into_iter()
            .map(|a| Product::new(a.id, a.name, a.description))
            .collect();
        prop_assert_eq!(catalog.list(), expected);
    }

    #[test]
    fn one_event_per_successful_write(
        mutations in prop::collection::vec(mutation_strategy(), 0..60),
    ) {
        let catalog = Catalog::new();
        let listener = catalog.listen();

        let mut expected = Vec::new();
        for mutation in mutations {
            let kind = match &mutation {
                Mutation::Add(_) => ChangeKind::Added,
                Mutation::Delete { .. } => ChangeKind::Deleted,
                Mutation::UpdateDescription(_) => ChangeKind::Updated,
            };
            match catalog.apply(mutation) {
                Ok(product) => expected.push(ChangeEvent { kind, product }),
                Err(CatalogError::NotFound(_)) => {}
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            }
        }

        prop_assert_eq!(drain(&listener), expected);
    }

    #[test]
    fn update_changes_only_description(
        adds in prop::collection::vec(add_strategy(), 1..20),
        pick in any::<prop::sample::Index>(),
        description in "[a-z]{0,10}",
    ) {
        let catalog = Catalog::new();
        for add in &adds {
            catalog.add(add.clone());
        }
        let target = pick.get(&adds).id;
        let before = catalog.list();

        let updated = catalog
            .update_description(UpdateDescription::new(target, description.clone()))
            .unwrap();

        let after = catalog.list();
        let changed = before.iter().position(|p| p.id == target).unwrap();
        for (i, (old, new)) in before.iter().zip(after.iter()).enumerate() {
            prop_assert_eq!(old.id, new.id);
            prop_assert_eq!(&old.name, &new.name);
            if i == changed {
                prop_assert_eq!(&new.description, &description);
                prop_assert_eq!(new, &updated);
            } else {
                prop_assert_eq!(&old.description, &new.description);
            }
        }
    }

    #[test]
    fn late_listener_never_sees_earlier_events(
        before in prop::collection::vec(add_strategy(), 0..20),
        after in prop::collection::vec(add_strategy(), 0..20),
    ) {
        let catalog = Catalog::new();
        for add in before {
            catalog.add(add);
        }

        let listener = catalog.listen();
        for add in &after {
            catalog.add(add.clone());
        }

        let seen: Vec<Product> = drain(&listener).into_iter().map(|e| e.product).collect();
        let expected: Vec<Product> = after
            .into_iter()
            .map(|a| Product::new(a.id, a.name, a.description))
            .collect();
        prop_assert_eq!(seen, expected);
        prop_assert!(listener.recv_timeout(Duration::from_millis(1)).unwrap().is_none());
    }
}
