//! Admin submission form and the write payload built from it.
//!
//! The form mirrors what the dashboard posts: free-text fields plus a
//! separately-supplied cover image. Validation happens before any upload
//! or database call so a rejected submission issues zero writes.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::icons;
use crate::project::{parse_sort_order, split_tech_stack};

/// Raw form fields as submitted. `tech_stack` is comma-separated text and
/// `order` is uncoerced user input; both are interpreted in
/// [`ProjectForm::into_draft`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub long_description: String,
    pub timeline: String,
    pub tech_stack: String,
    pub live_href: String,
    pub source_href: String,
    pub icon_name: String,
    pub order: String,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            long_description: String::new(),
            timeline: String::new(),
            tech_stack: String::new(),
            live_href: String::new(),
            source_href: String::new(),
            icon_name: icons::DEFAULT_ICON_KEY.to_string(),
            order: "0".to_string(),
        }
    }
}

impl ProjectForm {
    /// Assign a named field from a multipart part. Returns `false` for
    /// field names the form does not know about.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "name" => self.name = value,
            "description" => self.description = value,
            "long_description" => self.long_description = value,
            "timeline" => self.timeline = value,
            "tech_stack" => self.tech_stack = value,
            "live_href" => self.live_href = value,
            "source_href" => self.source_href = value,
            "icon_name" => self.icon_name = value,
            "order" => self.order = value,
            _ => return false,
        }
        true
    }

    /// Check the submission as a whole: required text fields plus the
    /// presence of the cover image.
    pub fn validate_submission(&self, has_image: bool) -> Result<(), CoreError> {
        if let Err(errors) = self.validate() {
            return Err(CoreError::Validation(first_message(&errors)));
        }
        if !has_image {
            return Err(CoreError::Validation(
                "Please select an image for the project background".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the write payload once the cover image has been uploaded.
    ///
    /// Splits and trims the tech stack, coerces the sort weight with a 0
    /// fallback, resolves the icon to a known key, and stores the uploaded
    /// URL as the single element of `images`.
    pub fn into_draft(self, image_url: String) -> ProjectDraft {
        ProjectDraft {
            name: self.name,
            description: self.description,
            long_description: non_empty(self.long_description),
            timeline: non_empty(self.timeline),
            tech_stack: split_tech_stack(&self.tech_stack),
            live_href: non_empty(self.live_href),
            source_href: non_empty(self.source_href),
            icon_name: icons::resolve(&self.icon_name).key.to_string(),
            images: vec![image_url],
            sort_order: parse_sort_order(&self.order),
            grid_class: None,
        }
    }
}

/// A validated project ready to be persisted. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub long_description: Option<String>,
    pub timeline: Option<String>,
    pub tech_stack: Vec<String>,
    pub live_href: Option<String>,
    pub source_href: Option<String>,
    pub icon_name: String,
    pub images: Vec<String>,
    pub sort_order: i64,
    pub grid_class: Option<String>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Pull the first human-readable message out of a validator error set.
fn first_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, field_errors)| field_errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid submission".to_string())
}
