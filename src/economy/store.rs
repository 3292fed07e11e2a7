//! Theme store: unlocking and selecting themes with coins.

use super::{EconomyError, EconomyProfile};
use crate::themes::{find_theme, ThemeDefinition};

fn lookup(theme_id: &str) -> Result<&'static ThemeDefinition, EconomyError> {
    find_theme(theme_id).ok_or_else(|| EconomyError::UnknownTheme(theme_id.to_string()))
}

/// Check whether the profile could unlock `theme_id` right now.
pub fn can_afford(theme_id: &str, profile: &EconomyProfile) -> bool {
    match find_theme(theme_id) {
        Some(theme) => !profile.owns(theme.id) && profile.coins >= theme.price,
        None => false,
    }
}

/// Unlock a theme, spending its price. The new theme becomes the selected one.
pub fn purchase_theme(
    theme_id: &str,
    profile: &EconomyProfile,
) -> Result<EconomyProfile, EconomyError> {
    let theme = lookup(theme_id)?;
    if profile.coins < theme.price {
        return Err(EconomyError::InsufficientFunds {
            price: theme.price,
            coins: profile.coins,
        });
    }
    if profile.owns(theme.id) {
        return Err(EconomyError::AlreadyOwned);
    }

    let mut updated = profile.clone();
    updated.coins -= theme.price;
    updated.owned_theme_ids.insert(theme.id.to_string());
    updated.selected_theme_id = theme.id.to_string();
    tracing::info!(theme = theme.id, price = theme.price, coins = updated.coins, "theme unlocked");
    Ok(updated)
}

/// Make an owned theme the active one.
pub fn select_theme(
    theme_id: &str,
    profile: &EconomyProfile,
) -> Result<EconomyProfile, EconomyError> {
    let theme = lookup(theme_id)?;
    if !profile.owns(theme.id) {
        return Err(EconomyError::NotOwned);
    }

    let mut updated = profile.clone();
    updated.selected_theme_id = theme.id.to_string();
    tracing::info!(theme = theme.id, "theme selected");
    Ok(updated)
}
