//! Content Fetcher: the four design catalogs, fetched concurrently.

use super::interface::{ContentError, ContentSource, ObjectQuery};
use crate::design::types::{
    DesignData, DesignTheme, Fragment, FragmentKind, LayoutMetadata, LayoutVariation,
    ThemeMetadata, TimeDisplay, TimeDisplayMetadata, VisualEffect, VisualEffectMetadata,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
#[error("failed to fetch {kind}: {source}")]
pub struct FetchError {
    pub kind: &'static str,
    #[source]
    pub source: ContentError,
}

#[derive(Clone)]
pub struct DesignFetcher {
    source: Arc<dyn ContentSource>,
}

impl DesignFetcher {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// Fetch and decode one catalog. "Not found" is an empty catalog.
    pub async fn fetch_catalog<M: FragmentKind>(&self) -> Result<Vec<Fragment<M>>, FetchError> {
        let fail = |source| FetchError {
            kind: M::LABEL,
            source,
        };

        let page = match self
            .source
            .find_objects(&ObjectQuery::for_type(M::OBJECT_TYPE))
            .await
        {
            Ok(page) => page,
            Err(ContentError::NotFound) => {
                tracing::debug!(kind = M::LABEL, "no objects of this type yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(fail(e)),
        };

        page.objects
            .into_iter()
            .map(|object| {
                serde_json::from_value::<Fragment<M>>(object)
                    .map_err(|e| fail(ContentError::Decode(e.to_string())))
            })
            .collect()
    }

    pub async fn get_all_design_themes(&self) -> Result<Vec<DesignTheme>, FetchError> {
        self.fetch_catalog::<ThemeMetadata>().await
    }

    pub async fn get_all_time_displays(&self) -> Result<Vec<TimeDisplay>, FetchError> {
        self.fetch_catalog::<TimeDisplayMetadata>().await
    }

    pub async fn get_all_layout_variations(&self) -> Result<Vec<LayoutVariation>, FetchError> {
        self.fetch_catalog::<LayoutMetadata>().await
    }

    pub async fn get_all_visual_effects(&self) -> Result<Vec<VisualEffect>, FetchError> {
        self.fetch_catalog::<VisualEffectMetadata>().await
    }

    /// All four catalogs at once; the first failure aborts the rest.
    pub async fn get_all_design_data(&self) -> Result<DesignData, FetchError> {
        let (themes, displays, layouts, effects) = tokio::try_join!(
            self.get_all_design_themes(),
            self.get_all_time_displays(),
            self.get_all_layout_variations(),
            self.get_all_visual_effects(),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "error fetching design data");
            e
        })?;

        Ok(DesignData {
            themes,
            displays,
            layouts,
            effects,
        })
    }
}
