//! Builders wiring the kitchen services onto memory or PostgreSQL stores.

use std::sync::Arc;

use tracing::{info, warn};

use kitchen::domain::ports::{
    CookRepository, DishRepository, DishTypeRepository, IngredientRepository, KitchenCommand,
};
use kitchen::domain::{
    CookProfile, Error, ErrorCode, KitchenRepositories, KitchenService, NewCook, NewPassword,
    PasswordLoginService, PersonalName, Username, YearsOfExperience,
};
use kitchen::inbound::http::state::HttpState;
use kitchen::outbound::memory::InMemoryKitchenStore;
use kitchen::outbound::persistence::{
    DbPool, DieselCookRepository, DieselDishRepository, DieselDishTypeRepository,
    DieselIngredientRepository,
};

/// Handler state plus the command port used for startup tasks.
pub struct KitchenPorts {
    pub http_state: HttpState,
    pub commands: Arc<dyn KitchenCommand>,
}

fn assemble<C, D, T, I>(repos: KitchenRepositories<C, D, T, I>) -> KitchenPorts
where
    C: CookRepository + 'static,
    D: DishRepository + 'static,
    T: DishTypeRepository + 'static,
    I: IngredientRepository + 'static,
{
    let login = Arc::new(PasswordLoginService::new(Arc::clone(&repos.cooks)));
    let service = Arc::new(KitchenService::new(repos));
    KitchenPorts {
        http_state: HttpState::new(login, service.clone(), service.clone()),
        commands: service,
    }
}

/// Build the kitchen ports over PostgreSQL when a pool is configured,
/// otherwise over a fresh in-memory store.
pub fn build_kitchen_ports(pool: Option<&DbPool>) -> KitchenPorts {
    match pool {
        Some(pool) => assemble(KitchenRepositories {
            cooks: Arc::new(DieselCookRepository::new(pool.clone())),
            dishes: Arc::new(DieselDishRepository::new(pool.clone())),
            dish_types: Arc::new(DieselDishTypeRepository::new(pool.clone())),
            ingredients: Arc::new(DieselIngredientRepository::new(pool.clone())),
        }),
        None => {
            warn!("no database configured; records are kept in memory");
            assemble(KitchenRepositories::shared(Arc::new(
                InMemoryKitchenStore::new(),
            )))
        }
    }
}

/// Register the bootstrap cook unless the username is already taken.
///
/// # Errors
///
/// Returns an `invalid_request` error for unusable credentials and
/// propagates store failures.
pub async fn bootstrap_cook(
    commands: &dyn KitchenCommand,
    username: &str,
    password: &str,
) -> Result<(), Error> {
    let username = Username::new(username)
        .map_err(|err| Error::invalid_request(format!("bootstrap username: {err}")))?;
    let password = NewPassword::confirm(password, password)
        .map_err(|err| Error::invalid_request(format!("bootstrap password: {err}")))?;
    let profile = CookProfile {
        username,
        first_name: PersonalName::default(),
        last_name: PersonalName::default(),
        email: None,
        years_of_experience: YearsOfExperience::default(),
    };

    match commands.register_cook(NewCook { profile, password }).await {
        Ok(cook) => {
            info!(cook_id = %cook.id, "bootstrap cook registered");
            Ok(())
        }
        Err(err) if err.code() == ErrorCode::Conflict => {
            info!("bootstrap cook already present");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    //! Startup wiring over the in-memory store.

    use super::*;
    use kitchen::domain::LoginCredentials;
    use kitchen::domain::ports::{KitchenQuery, LoginService};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn bootstrap_cook_can_log_in() {
        let ports = build_kitchen_ports(None);
        bootstrap_cook(ports.commands.as_ref(), "chef", "pasta-al-dente")
            .await
            .expect("bootstrap");

        let creds = LoginCredentials::try_from_parts("chef", "pasta-al-dente").expect("creds");
        ports
            .http_state
            .login
            .authenticate(&creds)
            .await
            .expect("bootstrap cook authenticates");
    }

    #[rstest]
    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let ports = build_kitchen_ports(None);
        for _ in 0..2 {
            bootstrap_cook(ports.commands.as_ref(), "chef", "pasta-al-dente")
                .await
                .expect("bootstrap");
        }
        let counts = ports.http_state.kitchen.counts().await.expect("counts");
        assert_eq!(counts.num_cooks, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn blank_bootstrap_username_is_rejected() {
        let ports = build_kitchen_ports(None);
        let err = bootstrap_cook(ports.commands.as_ref(), "  ", "pasta-al-dente")
            .await
            .expect_err("blank username");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
