//! The `Project` entity and the record normalizer.
//!
//! Stored records arrive with loosely-typed fields (JSON text for the list
//! columns, free-form icon keys). [`normalize`] turns one into a fully
//! defaulted [`Project`] without ever rejecting the record: malformed or
//! missing fields degrade to safe defaults instead.

use chrono::DateTime;
use serde::Serialize;

use crate::icons;
use crate::types::{DbId, Timestamp};

/// A raw project record as it comes out of storage.
///
/// Everything beyond the id is optional; the JSON list columns are kept as
/// unparsed text so the normalizer owns all decoding decisions.
#[derive(Debug, Clone, Default)]
pub struct ProjectRecord {
    pub id: DbId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub timeline: Option<String>,
    /// JSON array of strings, e.g. `["React","Node.js"]`.
    pub tech_stack: Option<String>,
    pub live_href: Option<String>,
    pub source_href: Option<String>,
    pub icon_name: Option<String>,
    /// JSON array of URL strings.
    pub images: Option<String>,
    pub sort_order: Option<i64>,
    pub grid_class: Option<String>,
    pub created_at: Option<Timestamp>,
}

/// One portfolio entry, fully normalized for presentation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub long_description: Option<String>,
    pub timeline: Option<String>,
    pub tech_stack: Vec<String>,
    pub live_href: Option<String>,
    pub source_href: Option<String>,
    /// Always a key present in [`icons::REGISTRY`].
    pub icon_name: String,
    /// `true` when either outbound link is present.
    pub show_button_text: bool,
    pub images: Vec<String>,
    /// Serialized as `order`, the key the site's clients have always read.
    #[serde(rename = "order")]
    pub sort_order: i64,
    pub grid_class: Option<String>,
    pub created_at: Timestamp,
}

impl Project {
    /// The resolved icon for this project. Total by construction: the
    /// normalizer only stores known keys.
    pub fn icon(&self) -> &'static icons::Icon {
        icons::resolve(&self.icon_name)
    }

    /// Long description with the render-time fallback to the short one.
    /// The fallback is never persisted.
    pub fn display_long_description(&self) -> &str {
        match &self.long_description {
            Some(text) if !text.is_empty() => text,
            _ => &self.description,
        }
    }
}

/// Turn a raw record into a [`Project`]. Never fails.
pub fn normalize(record: ProjectRecord) -> Project {
    let live_href = non_empty(record.live_href);
    let source_href = non_empty(record.source_href);
    let show_button_text = live_href.is_some() || source_href.is_some();

    let icon_name = match record.icon_name.as_deref() {
        Some(key) if icons::is_known(key) => key.to_string(),
        _ => icons::DEFAULT_ICON_KEY.to_string(),
    };

    let mut tech_stack = parse_string_list(record.tech_stack.as_deref());
    tech_stack.retain(|entry| !entry.is_empty());

    Project {
        id: record.id,
        name: record.name.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        long_description: non_empty(record.long_description),
        timeline: non_empty(record.timeline),
        tech_stack,
        live_href,
        source_href,
        icon_name,
        show_button_text,
        images: parse_string_list(record.images.as_deref()),
        sort_order: record.sort_order.unwrap_or(0),
        grid_class: non_empty(record.grid_class),
        created_at: record.created_at.unwrap_or(DateTime::UNIX_EPOCH),
    }
}

/// Split a comma-separated tech-stack input: trim each segment, drop the
/// empty ones. `"React, , Node "` becomes `["React", "Node"]`.
pub fn split_tech_stack(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Coerce a user-supplied sort weight to an integer, defaulting to 0.
pub fn parse_sort_order(input: &str) -> i64 {
    input.trim().parse().unwrap_or(0)
}

/// Sort for display: ascending `sort_order`, then newest first.
pub fn sort_for_display(projects: &mut [Project]) {
    projects.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then(b.created_at.cmp(&a.created_at))
    });
}

/// Decode a JSON string array, treating anything malformed as empty.
fn parse_string_list(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|text| serde_json::from_str(text).ok())
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: DbId) -> ProjectRecord {
        ProjectRecord {
            id,
            name: Some("Billety".into()),
            description: Some("Smart billing software".into()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_record_normalizes_to_defaults() {
        let project = normalize(ProjectRecord { id: 7, ..Default::default() });
        assert_eq!(project.id, 7);
        assert_eq!(project.name, "");
        assert!(project.tech_stack.is_empty());
        assert!(project.images.is_empty());
        assert_eq!(project.sort_order, 0);
        assert!(!project.show_button_text);
        assert_eq!(project.icon_name, icons::DEFAULT_ICON_KEY);
    }

    #[test]
    fn unknown_icon_resolves_to_default() {
        let mut raw = record(1);
        raw.icon_name = Some("FaNotARealIcon".into());
        let project = normalize(raw);
        assert_eq!(project.icon_name, icons::DEFAULT_ICON_KEY);
        assert_eq!(project.icon().key, icons::DEFAULT_ICON_KEY);
    }

    #[test]
    fn known_icon_is_kept() {
        let mut raw = record(1);
        raw.icon_name = Some("FaGithub".into());
        assert_eq!(normalize(raw).icon_name, "FaGithub");
    }

    #[test]
    fn malformed_list_columns_degrade_to_empty() {
        let mut raw = record(1);
        raw.tech_stack = Some("not json at all".into());
        raw.images = Some("{\"wrong\": \"shape\"}".into());
        let project = normalize(raw);
        assert!(project.tech_stack.is_empty());
        assert!(project.images.is_empty());
    }

    #[test]
    fn stored_empty_strings_are_filtered_from_tech_stack() {
        let mut raw = record(1);
        raw.tech_stack = Some("[\"React\",\"\",\"Node\"]".into());
        assert_eq!(normalize(raw).tech_stack, vec!["React", "Node"]);
    }

    #[test]
    fn either_link_sets_show_button_text() {
        let mut raw = record(1);
        raw.live_href = Some("https://example.com".into());
        assert!(normalize(raw.clone()).show_button_text);

        raw.live_href = None;
        raw.source_href = Some("https://github.com/x/y".into());
        assert!(normalize(raw.clone()).show_button_text);

        raw.source_href = Some(String::new());
        assert!(!normalize(raw).show_button_text);
    }

    #[test]
    fn long_description_falls_back_at_render_time() {
        let project = normalize(record(1));
        assert_eq!(project.display_long_description(), "Smart billing software");
        assert!(project.long_description.is_none(), "fallback is not persisted");

        let mut raw = record(2);
        raw.long_description = Some("The full story".into());
        assert_eq!(normalize(raw).display_long_description(), "The full story");
    }

    #[test]
    fn split_tech_stack_trims_and_drops_empties() {
        assert_eq!(split_tech_stack("React, , Node "), vec!["React", "Node"]);
        assert_eq!(split_tech_stack(""), Vec::<String>::new());
        assert_eq!(split_tech_stack(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn sort_order_coercion_defaults_to_zero() {
        assert_eq!(parse_sort_order("3"), 3);
        assert_eq!(parse_sort_order(" -2 "), -2);
        assert_eq!(parse_sort_order("abc"), 0);
        assert_eq!(parse_sort_order(""), 0);
    }

    #[test]
    fn serializes_the_original_wire_shape() {
        let mut raw = record(9);
        raw.sort_order = Some(2);
        raw.live_href = Some("https://example.com".into());
        raw.tech_stack = Some("[\"React\"]".into());
        let value = serde_json::to_value(normalize(raw)).unwrap();

        assert_eq!(value["order"], 2);
        assert!(value.get("sortOrder").is_none(), "the wire key is `order`");
        assert_eq!(value["techStack"], serde_json::json!(["React"]));
        assert_eq!(value["iconName"], icons::DEFAULT_ICON_KEY);
        assert_eq!(value["liveHref"], "https://example.com");
        assert_eq!(value["showButtonText"], true);
    }

    #[test]
    fn display_order_is_weight_then_newest() {
        let at = |secs: i64| Utc.timestamp_opt(secs, 0).unwrap();
        let make = |id: DbId, order: i64, created: i64| {
            let mut raw = record(id);
            raw.sort_order = Some(order);
            raw.created_at = Some(at(created));
            normalize(raw)
        };

        let mut list = vec![make(1, 1, 100), make(2, 0, 100), make(3, 0, 200)];
        sort_for_display(&mut list);
        let ids: Vec<DbId> = list.iter().map(|p| p.id).collect();
        // order=0 before order=1; within order=0 the newer row wins.
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn equal_created_at_orders_by_weight() {
        let at = chrono::Utc.timestamp_opt(100, 0).unwrap();
        let mut list: Vec<Project> = [1i64, 0]
            .iter()
            .enumerate()
            .map(|(i, &order)| {
                let mut raw = record(i as DbId);
                raw.sort_order = Some(order);
                raw.created_at = Some(at);
                normalize(raw)
            })
            .collect();
        sort_for_display(&mut list);
        assert_eq!(list[0].sort_order, 0);
        assert_eq!(list[1].sort_order, 1);
    }
}
