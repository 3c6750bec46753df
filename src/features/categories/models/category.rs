use serde::{Deserialize, Serialize};

/// Complaint category as served by the categories endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    pub fn new(category_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Lowercased name with whitespace runs collapsed to `-`
    pub fn slug(&self) -> String {
        self.name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase()
    }

    /// Bootstrap icon name for the category tile
    pub fn icon(&self) -> &'static str {
        match self.name.to_lowercase().as_str() {
            "water supply" => "water",
            "roads and infrastructure" => "bricks",
            "electricity" => "lightning",
            "sanitation" => "trash",
            "street lights" | "streetlight" => "lamp",
            "other" => "three-dots",
            _ => "exclamation-circle",
        }
    }
}

/// Built-in tiles used when the backend returns no categories.
///
/// Only roads carries a real backend id; the rest use stable slugs.
pub fn default_categories() -> Vec<Category> {
    [
        ("water-supply", "Water Supply"),
        ("0e6e0a5b-258b-4eec-8817-564fbb1f0009", "Roads and Infrastructure"),
        ("electricity-power", "Electricity"),
        ("sanitation-waste", "Sanitation"),
        ("street-lighting", "Street Lights"),
        ("general-other", "Other"),
    ]
    .into_iter()
    .map(|(id, name)| Category::new(id, name))
    .collect()
}
