//! [`KitchenQuery`] implementation.

use async_trait::async_trait;
use pagination::Page;

use super::{KitchenService, map_repository_error, not_found};
use crate::domain::ports::{
    CookRepository, DishFormChoices, DishRepository, DishTypeRepository, IngredientRepository,
    KitchenCounts, KitchenQuery, KitchenRepositoryError,
};
use crate::domain::{
    Cook, CookDetail, CookId, Dish, DishDetail, DishId, DishType, DishTypeId, EntityKind, Error,
    Ingredient, IngredientId, ListingQuery, SearchFilter,
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

#[async_trait]
impl<C, D, T, I> KitchenQuery for KitchenService<C, D, T, I>
where
    C: CookRepository,
    D: DishRepository,
    T: DishTypeRepository,
    I: IngredientRepository,
{
    async fn counts(&self) -> Result<KitchenCounts, Error> {
        let everything = SearchFilter::none();
        Ok(KitchenCounts {
            num_cooks: self.repos.cooks.count(&everything).await.map_err(cook_error)?,
            num_dishes: self.repos.dishes.count(&everything).await.map_err(dish_error)?,
            num_dish_types: self
                .repos
                .dish_types
                .count(&everything)
                .await
                .map_err(dish_type_error)?,
            num_ingredients: self
                .repos
                .ingredients
                .count(&everything)
                .await
                .map_err(ingredient_error)?,
        })
    }

    async fn list_cooks(&self, query: &ListingQuery) -> Result<Page<Cook>, Error> {
        self.repos
            .cooks
            .list_page(&query.filter, query.page, self.paginator)
            .await
            .map_err(cook_error)
    }

    async fn list_dishes(&self, query: &ListingQuery) -> Result<Page<Dish>, Error> {
        self.repos
            .dishes
            .list_page(&query.filter, query.page, self.paginator)
            .await
            .map_err(dish_error)
    }

    async fn list_dish_types(&self, query: &ListingQuery) -> Result<Page<DishType>, Error> {
        self.repos
            .dish_types
            .list_page(&query.filter, query.page, self.paginator)
            .await
            .map_err(dish_type_error)
    }

    async fn list_ingredients(&self, query: &ListingQuery) -> Result<Page<Ingredient>, Error> {
        self.repos
            .ingredients
            .list_page(&query.filter, query.page, self.paginator)
            .await
            .map_err(ingredient_error)
    }

    async fn cook(&self, id: CookId) -> Result<Cook, Error> {
        self.repos
            .cooks
            .find_by_id(id)
            .await
            .map_err(cook_error)?
            .ok_or_else(|| not_found(EntityKind::Cook, id))
    }

    async fn cook_detail(&self, id: CookId) -> Result<CookDetail, Error> {
        let cook = self.cook(id).await?;
        let dishes = self.repos.cooks.dishes_for(id).await.map_err(cook_error)?;
        Ok(CookDetail { cook, dishes })
    }

    async fn dish_detail(&self, id: DishId) -> Result<DishDetail, Error> {
        self.repos
            .dishes
            .detail(id)
            .await
            .map_err(dish_error)?
            .ok_or_else(|| not_found(EntityKind::Dish, id))
    }

    async fn dish_type(&self, id: DishTypeId) -> Result<DishType, Error> {
        self.repos
            .dish_types
            .find_by_id(id)
            .await
            .map_err(dish_type_error)?
            .ok_or_else(|| not_found(EntityKind::DishType, id))
    }

    async fn ingredient(&self, id: IngredientId) -> Result<Ingredient, Error> {
        self.repos
            .ingredients
            .find_by_id(id)
            .await
            .map_err(ingredient_error)?
            .ok_or_else(|| not_found(EntityKind::Ingredient, id))
    }

    async fn dish_form_choices(&self) -> Result<DishFormChoices, Error> {
        Ok(DishFormChoices {
            dish_types: self.repos.dish_types.all().await.map_err(dish_type_error)?,
            cooks: self.repos.cooks.all().await.map_err(cook_error)?,
            ingredients: self.repos.ingredients.all().await.map_err(ingredient_error)?,
        })
    }
}
