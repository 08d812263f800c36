//! Venue category directory, loaded once from the catalog.
//!
//! Top-level catalog groups 2000 and 3000 hold indoor facilities; every
//! other group is outdoor. Sub-categories inherit their group's side.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use sportlocate_core::ApiClient;

use crate::error::VenueError;
use crate::types::VenueCategory;

/// Top-level type codes whose sub-categories are indoor.
pub const INDOOR_GROUP_CODES: [i32; 2] = [2000, 3000];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryGroup {
    type_code: i32,
    #[serde(default)]
    sub_categories: Vec<SubCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubCategory {
    type_code: i32,
    name: String,
    #[serde(default)]
    sports_place_types: Vec<i32>,
}

/// All venue categories, partitioned into indoor and outdoor.
///
/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    all: Vec<VenueCategory>,
    indoor: Vec<VenueCategory>,
    outdoor: Vec<VenueCategory>,
}

impl CategoryDirectory {
    /// Fetch the category tree in `lang` and partition it.
    ///
    /// Best effort: any failure is logged and yields an empty directory, so
    /// filtering and recommendation degrade to "nothing matches".
    pub async fn load(client: &ApiClient, lang: &str) -> Self {
        let result = match client.get("/categories", Some(&[("lang", lang)])).await {
            Ok(body) => Self::from_json(body),
            Err(e) => Err(VenueError::from(e)),
        };

        match result {
            Ok(directory) => {
                tracing::info!(
                    "Loaded {} venue categories ({} indoor, {} outdoor)",
                    directory.all.len(),
                    directory.indoor.len(),
                    directory.outdoor.len()
                );
                directory
            }
            Err(e) => {
                tracing::error!("Failed to load venue categories, continuing without: {}", e);
                Self::default()
            }
        }
    }

    /// Build the directory from the catalog's `/categories` response.
    ///
    /// # Errors
    /// [`VenueError::Parse`] when the body is not a list of category groups.
    pub fn from_json(body: Value) -> Result<Self, VenueError> {
        let groups: Vec<CategoryGroup> =
            serde_json::from_value(body).map_err(|e| VenueError::Parse(e.to_string()))?;

        let mut indoor = Vec::new();
        let mut outdoor = Vec::new();
        for group in groups {
            let side = if INDOOR_GROUP_CODES.contains(&group.type_code) {
                &mut indoor
            } else {
                &mut outdoor
            };
            side.extend(group.sub_categories.into_iter().map(|sub| {
                VenueCategory::new(sub.name, sub.type_code, sub.sports_place_types)
            }));
        }

        Ok(Self::from_parts(indoor, outdoor))
    }

    /// Assemble a directory from already partitioned categories.
    pub fn from_parts(indoor: Vec<VenueCategory>, outdoor: Vec<VenueCategory>) -> Self {
        let all = indoor.iter().chain(outdoor.iter()).cloned().collect();
        Self {
            all,
            indoor,
            outdoor,
        }
    }

    /// Indoor categories first, then outdoor.
    pub fn all(&self) -> &[VenueCategory] {
        &self.all
    }

    pub fn indoor(&self) -> &[VenueCategory] {
        &self.indoor
    }

    pub fn outdoor(&self) -> &[VenueCategory] {
        &self.outdoor
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Look a category up by its display name.
    pub fn by_name(&self, name: &str) -> Option<&VenueCategory> {
        self.all.iter().find(|c| c.name == name)
    }

    /// Look a category up by its own type code.
    pub fn by_code(&self, category_code: i32) -> Option<&VenueCategory> {
        self.all.iter().find(|c| c.category_code == category_code)
    }

    /// Category a venue type code belongs to, if any.
    pub fn category_of(&self, venue_code: i32) -> Option<&VenueCategory> {
        self.all.iter().find(|c| c.contains(venue_code))
    }
}

/// Union of the member codes of `categories`.
pub fn member_codes<'a, I>(categories: I) -> HashSet<i32>
where
    I: IntoIterator<Item = &'a VenueCategory>,
{
    categories
        .into_iter()
        .flat_map(|c| c.member_codes.iter().copied())
        .collect()
}
