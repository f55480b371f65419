//! Design Selector: picks one fragment from each catalog, uniformly at random.

use super::types::{
    DesignConfiguration, DesignData, DesignTheme, LayoutVariation, TimeDisplay, VisualEffect,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Assemble a random configuration from the four catalogs.
///
/// Returns `None` when any catalog is empty (content not seeded yet). Each
/// catalog gets an independent uniform draw; nothing is remembered between
/// calls, so combinations may repeat across page loads.
pub fn select<R: Rng + ?Sized>(
    rng: &mut R,
    themes: &[DesignTheme],
    displays: &[TimeDisplay],
    layouts: &[LayoutVariation],
    effects: &[VisualEffect],
) -> Option<DesignConfiguration> {
    if themes.is_empty() || displays.is_empty() || layouts.is_empty() || effects.is_empty() {
        tracing::warn!(
            themes = themes.len(),
            displays = displays.len(),
            layouts = layouts.len(),
            effects = effects.len(),
            "missing content for random design generation"
        );
        return None;
    }

    let (Some(theme), Some(time_display), Some(layout), Some(visual_effect)) = (
        themes.choose(rng),
        displays.choose(rng),
        layouts.choose(rng),
        effects.choose(rng),
    ) else {
        tracing::error!("failed to generate random design: a selected slot is empty");
        return None;
    };

    tracing::info!(
        theme = %theme.title,
        display = %time_display.title,
        layout = %layout.title,
        effect = %visual_effect.title,
        "generated random design"
    );

    Some(DesignConfiguration {
        theme: theme.clone(),
        time_display: time_display.clone(),
        layout: layout.clone(),
        visual_effect: visual_effect.clone(),
    })
}

/// [`select`] over a fetched [`DesignData`].
pub fn generate_random_design<R: Rng + ?Sized>(
    rng: &mut R,
    data: &DesignData,
) -> Option<DesignConfiguration> {
    select(rng, &data.themes, &data.displays, &data.layouts, &data.effects)
}
