//! [`KitchenCommand`] implementation.

use async_trait::async_trait;
use tracing::info;

use super::{KitchenService, invalid_choice, invalid_choice_value, map_repository_error, not_found};
use crate::domain::ports::{
    CookRepository, DishRepository, DishTypeRepository, IngredientRepository, KitchenCommand,
    KitchenRepositoryError,
};
use crate::domain::{
    AssignmentOutcome, Cook, CookId, CookProfile, Dish, DishDraft, DishId, DishType, DishTypeId,
    EntityKind, Error, Ingredient, IngredientId, NewCook, RecordName,
};

fn cook_error(error: KitchenRepositoryError) -> Error {
    map_repository_error(EntityKind::Cook, error)
}

fn dish_error(error: KitchenRepositoryError) -> Error {
    map_repository_error(EntityKind::Dish, error)
}

fn dish_type_error(error: KitchenRepositoryError) -> Error {
    map_repository_error(EntityKind::DishType, error)
}

fn ingredient_error(error: KitchenRepositoryError) -> Error {
    map_repository_error(EntityKind::Ingredient, error)
}

impl<C, D, T, I> KitchenService<C, D, T, I>
where
    C: CookRepository,
    D: DishRepository,
    T: DishTypeRepository,
    I: IngredientRepository,
{
    /// Every id referenced by the draft must exist before it is written.
    async fn check_dish_references(&self, draft: &DishDraft) -> Result<(), Error> {
        if self
            .repos
            .dish_types
            .find_by_id(draft.dish_type_id)
            .await
            .map_err(dish_type_error)?
            .is_none()
        {
            return Err(invalid_choice("dish_type"));
        }

        if !draft.cook_ids.is_empty() {
            let found = self
                .repos
                .cooks
                .find_many(&draft.cook_ids)
                .await
                .map_err(cook_error)?;
            if let Some(missing) = draft
                .cook_ids
                .iter()
                .find(|id| !found.iter().any(|cook| cook.id == **id))
            {
                return Err(invalid_choice_value("cooks", missing));
            }
        }

        if !draft.ingredient_ids.is_empty() {
            let found = self
                .repos
                .ingredients
                .find_many(&draft.ingredient_ids)
                .await
                .map_err(ingredient_error)?;
            if let Some(missing) = draft
                .ingredient_ids
                .iter()
                .find(|id| !found.iter().any(|ingredient| ingredient.id == **id))
            {
                return Err(invalid_choice_value("ingredients", missing));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<C, D, T, I> KitchenCommand for KitchenService<C, D, T, I>
where
    C: CookRepository,
    D: DishRepository,
    T: DishTypeRepository,
    I: IngredientRepository,
{
    async fn register_cook(&self, cook: NewCook) -> Result<Cook, Error> {
        let record = cook
            .into_record()
            .map_err(|err| Error::internal(err.to_string()))?;
        let created = self.repos.cooks.create(&record).await.map_err(cook_error)?;
        info!(cook_id = %created.id, username = %created.username, "registered cook");
        Ok(created)
    }

    async fn update_cook(&self, id: CookId, profile: CookProfile) -> Result<Cook, Error> {
        let updated = self
            .repos
            .cooks
            .update(id, &profile)
            .await
            .map_err(cook_error)?
            .ok_or_else(|| not_found(EntityKind::Cook, id))?;
        info!(cook_id = %id, "updated cook");
        Ok(updated)
    }

    async fn delete_cook(&self, id: CookId) -> Result<(), Error> {
        if !self.repos.cooks.delete(id).await.map_err(cook_error)? {
            return Err(not_found(EntityKind::Cook, id));
        }
        info!(cook_id = %id, "deleted cook");
        Ok(())
    }

    async fn create_dish(&self, draft: DishDraft) -> Result<Dish, Error> {
        self.check_dish_references(&draft).await?;
        let created = self.repos.dishes.create(&draft).await.map_err(dish_error)?;
        info!(dish_id = %created.id, "created dish");
        Ok(created)
    }

    async fn update_dish(&self, id: DishId, draft: DishDraft) -> Result<Dish, Error> {
        self.check_dish_references(&draft).await?;
        let updated = self
            .repos
            .dishes
            .update(id, &draft)
            .await
            .map_err(dish_error)?
            .ok_or_else(|| not_found(EntityKind::Dish, id))?;
        info!(dish_id = %id, "updated dish");
        Ok(updated)
    }

    async fn delete_dish(&self, id: DishId) -> Result<(), Error> {
        if !self.repos.dishes.delete(id).await.map_err(dish_error)? {
            return Err(not_found(EntityKind::Dish, id));
        }
        info!(dish_id = %id, "deleted dish");
        Ok(())
    }

    async fn create_dish_type(&self, name: RecordName) -> Result<DishType, Error> {
        let created = self
            .repos
            .dish_types
            .create(&name)
            .await
            .map_err(dish_type_error)?;
        info!(dish_type_id = %created.id, "created dish type");
        Ok(created)
    }

    async fn update_dish_type(&self, id: DishTypeId, name: RecordName) -> Result<DishType, Error> {
        let updated = self
            .repos
            .dish_types
            .update(id, &name)
            .await
            .map_err(dish_type_error)?
            .ok_or_else(|| not_found(EntityKind::DishType, id))?;
        info!(dish_type_id = %id, "renamed dish type");
        Ok(updated)
    }

    async fn delete_dish_type(&self, id: DishTypeId) -> Result<(), Error> {
        if !self
            .repos
            .dish_types
            .delete(id)
            .await
            .map_err(dish_type_error)?
        {
            return Err(not_found(EntityKind::DishType, id));
        }
        info!(dish_type_id = %id, "deleted dish type");
        Ok(())
    }

    async fn create_ingredient(&self, name: RecordName) -> Result<Ingredient, Error> {
        let created = self
            .repos
            .ingredients
            .create(&name)
            .await
            .map_err(ingredient_error)?;
        info!(ingredient_id = %created.id, "created ingredient");
        Ok(created)
    }

    async fn update_ingredient(
        &self,
        id: IngredientId,
        name: RecordName,
    ) -> Result<Ingredient, Error> {
        let updated = self
            .repos
            .ingredients
            .update(id, &name)
            .await
            .map_err(ingredient_error)?
            .ok_or_else(|| not_found(EntityKind::Ingredient, id))?;
        info!(ingredient_id = %id, "renamed ingredient");
        Ok(updated)
    }

    async fn delete_ingredient(&self, id: IngredientId) -> Result<(), Error> {
        if !self
            .repos
            .ingredients
            .delete(id)
            .await
            .map_err(ingredient_error)?
        {
            return Err(not_found(EntityKind::Ingredient, id));
        }
        info!(ingredient_id = %id, "deleted ingredient");
        Ok(())
    }

    async fn toggle_assignment(
        &self,
        cook: CookId,
        dish: DishId,
    ) -> Result<AssignmentOutcome, Error> {
        let target = self
            .repos
            .dishes
            .find_by_id(dish)
            .await
            .map_err(dish_error)?
            .ok_or_else(|| not_found(EntityKind::Dish, dish))?;

        let change = self
            .repos
            .cooks
            .toggle_dish(cook, dish)
            .await
            .map_err(|error| match error {
                KitchenRepositoryError::MissingReference { .. } => {
                    Error::unauthorized("Your account no longer exists.")
                }
                other => cook_error(other),
            })?
            // The dish vanished between the lookup and the toggle.
            .ok_or_else(|| not_found(EntityKind::Dish, dish))?;

        info!(cook_id = %cook, dish_id = %dish, ?change, "toggled dish assignment");
        Ok(AssignmentOutcome {
            cook_id: cook,
            dish_id: dish,
            dish_name: target.name,
            change,
        })
    }
}
