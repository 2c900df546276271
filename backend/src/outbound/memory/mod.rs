//! In-memory entity store.
//!
//! Implements every kitchen repository port over a single mutex-guarded
//! state, mirroring the relational rules of the PostgreSQL schema: unique
//! names and usernames, restricted dish type deletion, cascading join rows
//! and the listing orderings. Used when no database is configured and by the
//! HTTP integration tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::{Page, PageSelector, Paginator};

use crate::domain::ports::{
    CookRepository, DishRepository, DishTypeRepository, IngredientRepository,
    KitchenRepositoryError,
};
use crate::domain::{
    AssignmentChange, Cook, CookCredentials, CookId, CookProfile, Dish, DishDetail, DishDraft,
    DishId, DishType, DishTypeId, Ingredient, IngredientId, NewCookRecord, PasswordDigest, Price,
    RecordName, SearchFilter, listing_order,
};

#[derive(Debug, Clone)]
struct StoredCook {
    profile: CookProfile,
    password_digest: PasswordDigest,
}

#[derive(Debug, Clone)]
struct StoredDish {
    name: RecordName,
    description: String,
    price: Price,
    dish_type_id: DishTypeId,
}

#[derive(Debug, Default)]
struct KitchenState {
    last_id: i64,
    cooks: BTreeMap<CookId, StoredCook>,
    dishes: BTreeMap<DishId, StoredDish>,
    dish_types: BTreeMap<DishTypeId, RecordName>,
    ingredients: BTreeMap<IngredientId, RecordName>,
    dish_cooks: BTreeSet<(DishId, CookId)>,
    dish_ingredients: BTreeSet<(DishId, IngredientId)>,
}

/// Mutex-guarded kitchen store implementing all four repository ports.
#[derive(Debug, Default)]
pub struct InMemoryKitchenStore {
    state: Mutex<KitchenState>,
}

impl InMemoryKitchenStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, KitchenState>, KitchenRepositoryError> {
        self.state
            .lock()
            .map_err(|_| KitchenRepositoryError::query("kitchen store lock poisoned"))
    }
}

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

impl KitchenState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn cook(&self, id: CookId) -> Option<Cook> {
        self.cooks.get(&id).map(|stored| Cook {
            id,
            username: stored.profile.username.clone(),
            first_name: stored.profile.first_name.clone(),
            last_name: stored.profile.last_name.clone(),
            email: stored.profile.email.clone(),
            years_of_experience: stored.profile.years_of_experience,
        })
    }

    fn sorted_cooks(&self, filter: &SearchFilter) -> Vec<Cook> {
        let mut cooks: Vec<Cook> = self
            .cooks
            .keys()
            .filter_map(|id| self.cook(*id))
            .filter(|cook| filter.matches(cook.username.as_str()))
            .collect();
        cooks.sort_by(|a, b| {
            listing_order(a.username.as_str(), b.username.as_str()).then(a.id.cmp(&b.id))
        });
        cooks
    }

    fn dish_type(&self, id: DishTypeId) -> Option<DishType> {
        self.dish_types.get(&id).map(|name| DishType {
            id,
            name: name.clone(),
        })
    }

    fn sorted_dish_types(&self, filter: &SearchFilter) -> Vec<DishType> {
        let mut dish_types: Vec<DishType> = self
            .dish_types
            .iter()
            .filter(|(_, name)| filter.matches(name.as_str()))
            .map(|(id, name)| DishType {
                id: *id,
                name: name.clone(),
            })
            .collect();
        dish_types.sort_by(|a, b| {
            listing_order(a.name.as_str(), b.name.as_str()).then(a.id.cmp(&b.id))
        });
        dish_types
    }

    fn ingredient(&self, id: IngredientId) -> Option<Ingredient> {
        self.ingredients.get(&id).map(|name| Ingredient {
            id,
            name: name.clone(),
        })
    }

    fn sorted_ingredients(&self, filter: &SearchFilter) -> Vec<Ingredient> {
        let mut ingredients: Vec<Ingredient> = self
            .ingredients
            .iter()
            .filter(|(_, name)| filter.matches(name.as_str()))
            .map(|(id, name)| Ingredient {
                id: *id,
                name: name.clone(),
            })
            .collect();
        ingredients.sort_by(|a, b| {
            listing_order(a.name.as_str(), b.name.as_str()).then(a.id.cmp(&b.id))
        });
        ingredients
    }

    fn dish(&self, id: DishId) -> Option<Dish> {
        let stored = self.dishes.get(&id)?;
        Some(Dish {
            id,
            name: stored.name.clone(),
            description: stored.description.clone(),
            price: stored.price,
            dish_type: self.dish_type(stored.dish_type_id)?,
        })
    }

    fn sorted_dishes(&self, filter: &SearchFilter, only: Option<&BTreeSet<DishId>>) -> Vec<Dish> {
        let mut dishes: Vec<Dish> = self
            .dishes
            .iter()
            .filter(|(id, stored)| {
                only.is_none_or(|ids| ids.contains(*id)) && filter.matches(stored.name.as_str())
            })
            .filter_map(|(id, _)| self.dish(*id))
            .collect();
        dishes.sort_by(|a, b| {
            listing_order(a.name.as_str(), b.name.as_str()).then(a.id.cmp(&b.id))
        });
        dishes
    }

    fn username_taken(&self, username: &str, except: Option<CookId>) -> bool {
        self.cooks
            .iter()
            .any(|(id, stored)| Some(*id) != except && stored.profile.username.as_str() == username)
    }

    fn check_dish_references(&self, draft: &DishDraft) -> Result<(), KitchenRepositoryError> {
        if !self.dish_types.contains_key(&draft.dish_type_id) {
            return Err(KitchenRepositoryError::missing_reference("dish_type"));
        }
        if draft.cook_ids.iter().any(|id| !self.cooks.contains_key(id)) {
            return Err(KitchenRepositoryError::missing_reference("cooks"));
        }
        if draft
            .ingredient_ids
            .iter()
            .any(|id| !self.ingredients.contains_key(id))
        {
            return Err(KitchenRepositoryError::missing_reference("ingredients"));
        }
        Ok(())
    }

    fn write_dish(&mut self, id: DishId, draft: &DishDraft) {
        self.dishes.insert(
            id,
            StoredDish {
                name: draft.name.clone(),
                description: draft.description.clone(),
                price: draft.price,
                dish_type_id: draft.dish_type_id,
            },
        );
        self.dish_cooks.retain(|(dish, _)| *dish != id);
        self.dish_cooks
            .extend(draft.cook_ids.iter().map(|cook| (id, *cook)));
        self.dish_ingredients.retain(|(dish, _)| *dish != id);
        self.dish_ingredients
            .extend(draft.ingredient_ids.iter().map(|ingredient| (id, *ingredient)));
    }
}

#[async_trait]
impl CookRepository for InMemoryKitchenStore {
    async fn count(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        let state = self.lock()?;
        Ok(count(
            state
                .cooks
                .values()
                .filter(|stored| filter.matches(stored.profile.username.as_str()))
                .count(),
        ))
    }

    async fn list_page(
        &self,
        filter: &SearchFilter,
        page: PageSelector,
        paginator: Paginator,
    ) -> Result<Page<Cook>, KitchenRepositoryError> {
        Ok(paginator.paginate(self.lock()?.sorted_cooks(filter), page))
    }

    async fn all(&self) -> Result<Vec<Cook>, KitchenRepositoryError> {
        Ok(self.lock()?.sorted_cooks(&SearchFilter::none()))
    }

    async fn find_by_id(&self, id: CookId) -> Result<Option<Cook>, KitchenRepositoryError> {
        Ok(self.lock()?.cook(id))
    }

    async fn find_many(&self, ids: &BTreeSet<CookId>) -> Result<Vec<Cook>, KitchenRepositoryError> {
        let state = self.lock()?;
        Ok(ids.iter().filter_map(|id| state.cook(*id)).collect())
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<CookCredentials>, KitchenRepositoryError> {
        let state = self.lock()?;
        Ok(state
            .cooks
            .iter()
            .find(|(_, stored)| stored.profile.username.as_str() == username)
            .map(|(id, stored)| CookCredentials {
                id: *id,
                password_digest: stored.password_digest.clone(),
            }))
    }

    async fn create(&self, record: &NewCookRecord) -> Result<Cook, KitchenRepositoryError> {
        let mut state = self.lock()?;
        if state.username_taken(record.profile.username.as_str(), None) {
            return Err(KitchenRepositoryError::duplicate("username"));
        }
        let id = CookId::new(state.next_id());
        state.cooks.insert(
            id,
            StoredCook {
                profile: record.profile.clone(),
                password_digest: record.password_digest.clone(),
            },
        );
        state
            .cook(id)
            .ok_or_else(|| KitchenRepositoryError::query("inserted cook disappeared"))
    }

    async fn update(
        &self,
        id: CookId,
        profile: &CookProfile,
    ) -> Result<Option<Cook>, KitchenRepositoryError> {
        let mut state = self.lock()?;
        if !state.cooks.contains_key(&id) {
            return Ok(None);
        }
        if state.username_taken(profile.username.as_str(), Some(id)) {
            return Err(KitchenRepositoryError::duplicate("username"));
        }
        if let Some(stored) = state.cooks.get_mut(&id) {
            stored.profile = profile.clone();
        }
        Ok(state.cook(id))
    }

    async fn delete(&self, id: CookId) -> Result<bool, KitchenRepositoryError> {
        let mut state = self.lock()?;
        let removed = state.cooks.remove(&id).is_some();
        state.dish_cooks.retain(|(_, cook)| *cook != id);
        Ok(removed)
    }

    async fn dishes_for(&self, id: CookId) -> Result<Vec<Dish>, KitchenRepositoryError> {
        let state = self.lock()?;
        let assigned: BTreeSet<DishId> = state
            .dish_cooks
            .iter()
            .filter(|(_, cook)| *cook == id)
            .map(|(dish, _)| *dish)
            .collect();
        Ok(state.sorted_dishes(&SearchFilter::none(), Some(&assigned)))
    }

    async fn toggle_dish(
        &self,
        cook: CookId,
        dish: DishId,
    ) -> Result<Option<AssignmentChange>, KitchenRepositoryError> {
        let mut state = self.lock()?;
        if !state.dishes.contains_key(&dish) {
            return Ok(None);
        }
        if !state.cooks.contains_key(&cook) {
            return Err(KitchenRepositoryError::missing_reference("cook"));
        }
        let change = AssignmentChange::toggling(state.dish_cooks.contains(&(dish, cook)));
        match change {
            AssignmentChange::Assigned => state.dish_cooks.insert((dish, cook)),
            AssignmentChange::Unassigned => state.dish_cooks.remove(&(dish, cook)),
        };
        Ok(Some(change))
    }
}

#[async_trait]
impl DishRepository for InMemoryKitchenStore {
    async fn count(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        let state = self.lock()?;
        Ok(count(
            state
                .dishes
                .values()
                .filter(|stored| filter.matches(stored.name.as_str()))
                .count(),
        ))
    }

    async fn list_page(
        &self,
        filter: &SearchFilter,
        page: PageSelector,
        paginator: Paginator,
    ) -> Result<Page<Dish>, KitchenRepositoryError> {
        Ok(paginator.paginate(self.lock()?.sorted_dishes(filter, None), page))
    }

    async fn find_by_id(&self, id: DishId) -> Result<Option<Dish>, KitchenRepositoryError> {
        Ok(self.lock()?.dish(id))
    }

    async fn detail(&self, id: DishId) -> Result<Option<DishDetail>, KitchenRepositoryError> {
        let state = self.lock()?;
        let Some(dish) = state.dish(id) else {
            return Ok(None);
        };
        let mut cooks: Vec<Cook> = state
            .dish_cooks
            .iter()
            .filter(|(dish, _)| *dish == id)
            .filter_map(|(_, cook)| state.cook(*cook))
            .collect();
        cooks.sort_by(|a, b| {
            listing_order(a.username.as_str(), b.username.as_str()).then(a.id.cmp(&b.id))
        });
        let mut ingredients: Vec<Ingredient> = state
            .dish_ingredients
            .iter()
            .filter(|(dish, _)| *dish == id)
            .filter_map(|(_, ingredient)| state.ingredient(*ingredient))
            .collect();
        ingredients.sort_by(|a, b| {
            listing_order(a.name.as_str(), b.name.as_str()).then(a.id.cmp(&b.id))
        });
        Ok(Some(DishDetail {
            dish,
            cooks,
            ingredients,
        }))
    }

    async fn create(&self, draft: &DishDraft) -> Result<Dish, KitchenRepositoryError> {
        let mut state = self.lock()?;
        state.check_dish_references(draft)?;
        let id = DishId::new(state.next_id());
        state.write_dish(id, draft);
        state
            .dish(id)
            .ok_or_else(|| KitchenRepositoryError::query("inserted dish disappeared"))
    }

    async fn update(
        &self,
        id: DishId,
        draft: &DishDraft,
    ) -> Result<Option<Dish>, KitchenRepositoryError> {
        let mut state = self.lock()?;
        if !state.dishes.contains_key(&id) {
            return Ok(None);
        }
        state.check_dish_references(draft)?;
        state.write_dish(id, draft);
        Ok(state.dish(id))
    }

    async fn delete(&self, id: DishId) -> Result<bool, KitchenRepositoryError> {
        let mut state = self.lock()?;
        let removed = state.dishes.remove(&id).is_some();
        state.dish_cooks.retain(|(dish, _)| *dish != id);
        state.dish_ingredients.retain(|(dish, _)| *dish != id);
        Ok(removed)
    }
}

#[async_trait]
impl DishTypeRepository for InMemoryKitchenStore {
    async fn count(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        let state = self.lock()?;
        Ok(count(
            state
                .dish_types
                .values()
                .filter(|name| filter.matches(name.as_str()))
                .count(),
        ))
    }

    async fn list_page(
        &self,
        filter: &SearchFilter,
        page: PageSelector,
        paginator: Paginator,
    ) -> Result<Page<DishType>, KitchenRepositoryError> {
        Ok(paginator.paginate(self.lock()?.sorted_dish_types(filter), page))
    }

    async fn all(&self) -> Result<Vec<DishType>, KitchenRepositoryError> {
        Ok(self.lock()?.sorted_dish_types(&SearchFilter::none()))
    }

    async fn find_by_id(
        &self,
        id: DishTypeId,
    ) -> Result<Option<DishType>, KitchenRepositoryError> {
        Ok(self.lock()?.dish_type(id))
    }

    async fn create(&self, name: &RecordName) -> Result<DishType, KitchenRepositoryError> {
        let mut state = self.lock()?;
        if state.dish_types.values().any(|existing| existing == name) {
            return Err(KitchenRepositoryError::duplicate("name"));
        }
        let id = DishTypeId::new(state.next_id());
        state.dish_types.insert(id, name.clone());
        Ok(DishType {
            id,
            name: name.clone(),
        })
    }

    async fn update(
        &self,
        id: DishTypeId,
        name: &RecordName,
    ) -> Result<Option<DishType>, KitchenRepositoryError> {
        let mut state = self.lock()?;
        if !state.dish_types.contains_key(&id) {
            return Ok(None);
        }
        if state
            .dish_types
            .iter()
            .any(|(other, existing)| *other != id && existing == name)
        {
            return Err(KitchenRepositoryError::duplicate("name"));
        }
        state.dish_types.insert(id, name.clone());
        Ok(state.dish_type(id))
    }

    async fn delete(&self, id: DishTypeId) -> Result<bool, KitchenRepositoryError> {
        let mut state = self.lock()?;
        let users = state
            .dishes
            .values()
            .filter(|dish| dish.dish_type_id == id)
            .count();
        if users > 0 {
            return Err(KitchenRepositoryError::in_use(format!(
                "{users} dish(es) still use it"
            )));
        }
        Ok(state.dish_types.remove(&id).is_some())
    }
}

#[async_trait]
impl IngredientRepository for InMemoryKitchenStore {
    async fn count(&self, filter: &SearchFilter) -> Result<u64, KitchenRepositoryError> {
        let state = self.lock()?;
        Ok(count(
            state
                .ingredients
                .values()
                .filter(|name| filter.matches(name.as_str()))
                .count(),
        ))
    }

    async fn list_page(
        &self,
        filter: &SearchFilter,
        page: PageSelector,
        paginator: Paginator,
    ) -> Result<Page<Ingredient>, KitchenRepositoryError> {
        Ok(paginator.paginate(self.lock()?.sorted_ingredients(filter), page))
    }

    async fn all(&self) -> Result<Vec<Ingredient>, KitchenRepositoryError> {
        Ok(self.lock()?.sorted_ingredients(&SearchFilter::none()))
    }

    async fn find_by_id(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError> {
        Ok(self.lock()?.ingredient(id))
    }

    async fn find_many(
        &self,
        ids: &BTreeSet<IngredientId>,
    ) -> Result<Vec<Ingredient>, KitchenRepositoryError> {
        let state = self.lock()?;
        Ok(ids.iter().filter_map(|id| state.ingredient(*id)).collect())
    }

    async fn create(&self, name: &RecordName) -> Result<Ingredient, KitchenRepositoryError> {
        let mut state = self.lock()?;
        if state.ingredients.values().any(|existing| existing == name) {
            return Err(KitchenRepositoryError::duplicate("name"));
        }
        let id = IngredientId::new(state.next_id());
        state.ingredients.insert(id, name.clone());
        Ok(Ingredient {
            id,
            name: name.clone(),
        })
    }

    async fn update(
        &self,
        id: IngredientId,
        name: &RecordName,
    ) -> Result<Option<Ingredient>, KitchenRepositoryError> {
        let mut state = self.lock()?;
        if !state.ingredients.contains_key(&id) {
            return Ok(None);
        }
        if state
            .ingredients
            .iter()
            .any(|(other, existing)| *other != id && existing == name)
        {
            return Err(KitchenRepositoryError::duplicate("name"));
        }
        state.ingredients.insert(id, name.clone());
        Ok(state.ingredient(id))
    }

    async fn delete(&self, id: IngredientId) -> Result<bool, KitchenRepositoryError> {
        let mut state = self.lock()?;
        let removed = state.ingredients.remove(&id).is_some();
        state
            .dish_ingredients
            .retain(|(_, ingredient)| *ingredient != id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests;
