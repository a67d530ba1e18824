//! Show or change the theme preference

use anyhow::Result;

use crate::theme::{Theme, ThemePreference, ThemeResolver};
use crate::Site;

/// Print the stored preference and the theme it resolves to
pub fn show(site: &Site, system: Theme) -> Result<Theme> {
    let mut resolver = ThemeResolver::new(site.preference_store(), system == Theme::Dark);
    let preference = resolver.stored_preference()?;
    let theme = resolver.apply_theme()?;

    println!("preference: {}", preference);
    println!("data-theme=\"{}\"", theme);
    Ok(theme)
}

/// Persist a preference and print the resulting theme
pub fn set(site: &Site, preference: ThemePreference, system: Theme) -> Result<Theme> {
    let mut resolver = ThemeResolver::new(site.preference_store(), system == Theme::Dark);
    let theme = resolver.set_preference(preference)?;
    tracing::info!("Theme preference set to {}", preference);

    println!("preference: {}", preference);
    println!("data-theme=\"{}\"", theme);
    Ok(theme)
}
