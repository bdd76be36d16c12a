use crate::error::{PoolError, Result};
use crate::types::config::PoolConfig;
use crate::types::model::{same_email, Prediction};

/// Admin-only operations need an address listed under `[admin].emails`.
pub fn require_admin(config: &PoolConfig, email: &str) -> Result<()> {
    if config.is_admin(email) {
        Ok(())
    } else {
        Err(PoolError::NotAdmin(if email.trim().is_empty() {
            "no identity given".to_string()
        } else {
            email.trim().to_string()
        }))
    }
}

/// The owner of a prediction or an admin may edit or delete it.
pub fn require_manage(config: &PoolConfig, actor: &str, prediction: &Prediction) -> Result<()> {
    if !actor.trim().is_empty() && (prediction.owned_by(actor) || config.is_admin(actor)) {
        Ok(())
    } else {
        Err(PoolError::NotOwner(prediction.id.clone()))
    }
}

/// Whether `viewer` may see the picks of a prediction owned by `owner_email`.
pub fn can_view_picks(
    config: &PoolConfig,
    hide_others_picks: bool,
    viewer: Option<&str>,
    owner_email: Option<&str>,
) -> bool {
    if !hide_others_picks {
        return true;
    }
    let Some(viewer) = viewer.map(str::trim).filter(|viewer| !viewer.is_empty()) else {
        return false;
    };
    config.is_admin(viewer) || owner_email.is_some_and(|owner| same_email(owner, viewer))
}
