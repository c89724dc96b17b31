//! Exercise model
//!
//! Items of the exercise collection and the labels the detail view shows.

use serde::{Deserialize, Serialize};

use crate::fetch::Resource;

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";
const MISSING_LABEL: &str = "N/A";

/// Every field is optional on the wire and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Exercise {
    pub exercise_id: String,
    pub name: String,
    pub gif_url: String,
    pub body_parts: Vec<String>,
    pub equipments: Vec<String>,
    pub target_muscles: Vec<String>,
    pub secondary_muscles: Vec<String>,
    pub instructions: Vec<String>,
}

impl Resource for Exercise {
    const COLLECTION_KEY: &'static str = "exercises";
}

impl Exercise {
    pub fn image_url(&self) -> &str {
        if self.gif_url.is_empty() {
            PLACEHOLDER_IMAGE_URL
        } else {
            &self.gif_url
        }
    }

    pub fn target_muscles_label(&self) -> String {
        join_or_missing(&self.target_muscles)
    }

    pub fn body_parts_label(&self) -> String {
        join_or_missing(&self.body_parts)
    }

    pub fn equipments_label(&self) -> String {
        join_or_missing(&self.equipments)
    }

    /// Instructions prefixed with their 1-based step number.
    pub fn numbered_instructions(&self) -> Vec<String> {
        self.instructions
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect()
    }
}

fn join_or_missing(values: &[String]) -> String {
    if values.is_empty() {
        MISSING_LABEL.to_string()
    } else {
        values.join(", ")
    }
}
