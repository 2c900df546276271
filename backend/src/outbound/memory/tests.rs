//! Relational rules enforced by the in-memory store.

use std::collections::BTreeSet;

use pagination::PageSelector;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    CookProfile, Email, NewPassword, PersonalName, Username, YearsOfExperience, listing_paginator,
};

#[fixture]
fn store() -> InMemoryKitchenStore {
    InMemoryKitchenStore::new()
}

fn name(raw: &str) -> RecordName {
    RecordName::new(raw).expect("valid name")
}

fn profile(username: &str) -> CookProfile {
    CookProfile {
        username: Username::new(username).expect("username"),
        first_name: PersonalName::default(),
        last_name: PersonalName::default(),
        email: Email::parse_optional("").expect("blank email"),
        years_of_experience: YearsOfExperience::try_from(3).expect("experience"),
    }
}

async fn add_cook(store: &InMemoryKitchenStore, username: &str) -> Cook {
    let password = NewPassword::confirm("pasta-al-dente", "pasta-al-dente").expect("password");
    let record = NewCookRecord {
        profile: profile(username),
        password_digest: password.digest().expect("hashed"),
    };
    CookRepository::create(store, &record).await.expect("cook created")
}

async fn add_dish(store: &InMemoryKitchenStore, dish_name: &str) -> Dish {
    let dish_type = DishTypeRepository::create(store, &name(&format!("{dish_name} type")))
        .await
        .expect("dish type created");
    let draft = DishDraft {
        name: name(dish_name),
        description: String::new(),
        price: Price::from_cents(1000).expect("price"),
        dish_type_id: dish_type.id,
        cook_ids: BTreeSet::new(),
        ingredient_ids: BTreeSet::new(),
    };
    DishRepository::create(store, &draft).await.expect("dish created")
}

#[rstest]
#[tokio::test]
async fn ingredients_are_listed_by_name_in_pages(store: InMemoryKitchenStore) {
    for index in (0..10).rev() {
        IngredientRepository::create(&store, &name(&format!("ingredient{index}")))
            .await
            .expect("ingredient created");
    }
    let page = IngredientRepository::list_page(
        &store,
        &SearchFilter::none(),
        PageSelector::Number(2),
        listing_paginator(),
    )
    .await
    .expect("list");

    let names: Vec<&str> = page
        .items()
        .iter()
        .map(|ingredient| ingredient.name.as_str())
        .collect();
    assert_eq!(
        names,
        ["ingredient5", "ingredient6", "ingredient7", "ingredient8", "ingredient9"]
    );
    assert_eq!((page.total_items(), page.total_pages()), (10, 2));
}

#[rstest]
#[tokio::test]
async fn listings_ignore_ascii_case_when_ordering(store: InMemoryKitchenStore) {
    for raw in ["cherry", "Banana", "apple"] {
        IngredientRepository::create(&store, &name(raw)).await.expect("created");
    }
    let page = IngredientRepository::list_page(
        &store,
        &SearchFilter::none(),
        PageSelector::default(),
        listing_paginator(),
    )
    .await
    .expect("list");
    let names: Vec<&str> = page
        .items()
        .iter()
        .map(|ingredient| ingredient.name.as_str())
        .collect();
    assert_eq!(names, ["apple", "Banana", "cherry"]);
}

#[rstest]
#[tokio::test]
async fn search_matches_substrings_case_insensitively(store: InMemoryKitchenStore) {
    for raw in ["tomato", "potato", "Cherry Tomato"] {
        IngredientRepository::create(&store, &name(raw)).await.expect("created");
    }
    let filter = SearchFilter::from_param(Some("TOMATO"));

    assert_eq!(IngredientRepository::count(&store, &filter).await.expect("count"), 2);
    let page = IngredientRepository::list_page(
        &store,
        &filter,
        PageSelector::default(),
        listing_paginator(),
    )
    .await
    .expect("list");
    let names: Vec<&str> = page
        .items()
        .iter()
        .map(|ingredient| ingredient.name.as_str())
        .collect();
    assert_eq!(names, ["Cherry Tomato", "tomato"]);
}

#[rstest]
#[tokio::test]
async fn duplicate_names_and_usernames_are_rejected(store: InMemoryKitchenStore) {
    DishTypeRepository::create(&store, &name("Soup")).await.expect("created");
    let err = DishTypeRepository::create(&store, &name("Soup"))
        .await
        .expect_err("duplicate");
    assert_eq!(err, KitchenRepositoryError::duplicate("name"));

    add_cook(&store, "chef1").await;
    let record = NewCookRecord {
        profile: profile("chef1"),
        password_digest: PasswordDigest::derive("whatever-else").expect("hashed"),
    };
    let err = CookRepository::create(&store, &record)
        .await
        .expect_err("duplicate username");
    assert_eq!(err, KitchenRepositoryError::duplicate("username"));
}

#[rstest]
#[tokio::test]
async fn toggle_twice_restores_membership(store: InMemoryKitchenStore) {
    let chef = add_cook(&store, "chef1").await;
    let pasta = add_dish(&store, "Pasta").await;

    let first = CookRepository::toggle_dish(&store, chef.id, pasta.id)
        .await
        .expect("toggle");
    assert_eq!(first, Some(AssignmentChange::Assigned));
    let dishes = CookRepository::dishes_for(&store, chef.id).await.expect("dishes");
    assert_eq!(dishes.len(), 1);

    let second = CookRepository::toggle_dish(&store, chef.id, pasta.id)
        .await
        .expect("toggle");
    assert_eq!(second, Some(AssignmentChange::Unassigned));
    let dishes = CookRepository::dishes_for(&store, chef.id).await.expect("dishes");
    assert!(dishes.is_empty());
}

#[rstest]
#[tokio::test]
async fn toggle_of_missing_dish_reports_none(store: InMemoryKitchenStore) {
    let chef = add_cook(&store, "chef1").await;
    let result = CookRepository::toggle_dish(&store, chef.id, DishId::new(404))
        .await
        .expect("toggle");
    assert_eq!(result, None);
}

#[rstest]
#[tokio::test]
async fn dish_type_in_use_cannot_be_deleted(store: InMemoryKitchenStore) {
    let pasta = add_dish(&store, "Pasta").await;
    let err = DishTypeRepository::delete(&store, pasta.dish_type.id)
        .await
        .expect_err("in use");
    assert!(matches!(err, KitchenRepositoryError::InUse { .. }));

    assert!(DishRepository::delete(&store, pasta.id).await.expect("dish deleted"));
    assert!(
        DishTypeRepository::delete(&store, pasta.dish_type.id)
            .await
            .expect("type deleted")
    );
}

#[rstest]
#[tokio::test]
async fn deleting_a_cook_keeps_their_dishes(store: InMemoryKitchenStore) {
    let chef = add_cook(&store, "chef1").await;
    let pasta = add_dish(&store, "Pasta").await;
    CookRepository::toggle_dish(&store, chef.id, pasta.id)
        .await
        .expect("toggle");

    assert!(CookRepository::delete(&store, chef.id).await.expect("deleted"));

    let detail = DishRepository::detail(&store, pasta.id)
        .await
        .expect("detail")
        .expect("dish remains");
    assert!(detail.cooks.is_empty());
}

#[rstest]
#[tokio::test]
async fn dish_update_replaces_relation_sets(store: InMemoryKitchenStore) {
    let chef = add_cook(&store, "chef1").await;
    let sous = add_cook(&store, "sous").await;
    let salt = IngredientRepository::create(&store, &name("salt")).await.expect("salt");
    let pasta = add_dish(&store, "Pasta").await;
    CookRepository::toggle_dish(&store, chef.id, pasta.id)
        .await
        .expect("toggle");

    let draft = DishDraft {
        name: name("Pasta al forno"),
        description: "Baked".to_owned(),
        price: Price::from_cents(1250).expect("price"),
        dish_type_id: pasta.dish_type.id,
        cook_ids: BTreeSet::from([sous.id]),
        ingredient_ids: BTreeSet::from([salt.id]),
    };
    DishRepository::update(&store, pasta.id, &draft)
        .await
        .expect("update")
        .expect("dish exists");

    let detail = DishRepository::detail(&store, pasta.id)
        .await
        .expect("detail")
        .expect("dish exists");
    assert_eq!(detail.dish.name.as_str(), "Pasta al forno");
    assert_eq!(detail.cooks.iter().map(|c| c.id).collect::<Vec<_>>(), [sous.id]);
    assert_eq!(detail.ingredients.len(), 1);
    assert!(!detail.is_cooked_by(chef.id));
}

#[rstest]
#[tokio::test]
async fn dangling_references_are_refused(store: InMemoryKitchenStore) {
    let draft = DishDraft {
        name: name("Ghost"),
        description: String::new(),
        price: Price::default(),
        dish_type_id: DishTypeId::new(99),
        cook_ids: BTreeSet::new(),
        ingredient_ids: BTreeSet::new(),
    };
    let err = DishRepository::create(&store, &draft)
        .await
        .expect_err("missing dish type");
    assert_eq!(err, KitchenRepositoryError::missing_reference("dish_type"));
}

#[rstest]
#[tokio::test]
async fn credentials_are_found_by_exact_username(store: InMemoryKitchenStore) {
    let chef = add_cook(&store, "chef1").await;
    let found = CookRepository::find_credentials(&store, "chef1")
        .await
        .expect("lookup")
        .expect("credentials");
    assert_eq!(found.id, chef.id);
    assert!(found.password_digest.verify("pasta-al-dente"));
    assert!(
        CookRepository::find_credentials(&store, "CHEF1")
            .await
            .expect("lookup")
            .is_none()
    );
}
