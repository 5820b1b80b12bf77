use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::locale::{self, Localized};

/// SeaORM entity for the `profile` table.
///
/// The seven career-credit columns keep their legacy Spanish names in the
/// database; the Rust fields use the normalized English names and map via
/// `column_name`. JSON columns may hold either parsed structures or
/// JSON-encoded strings (legacy inconsistency) — they are resolved to
/// canonical shapes by [`ProfileDetail::from_model`], never re-checked ad hoc.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub birth_date: Option<Date>,
    #[sea_orm(column_type = "Double", nullable)]
    pub height: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub weight: Option<f64>,
    pub gender: Option<String>,
    pub nationality: Option<Json>,
    pub immigration_status: Option<Json>,
    pub appearance: Option<Json>,
    pub primary_image: Option<String>,
    pub socials: Option<Json>,
    pub demo_video: Option<String>,
    pub television: Option<Json>,
    #[sea_orm(column_name = "largometrajes")]
    pub feature_films: Option<Json>,
    #[sea_orm(column_name = "cortometrajes")]
    pub short_films: Option<Json>,
    #[sea_orm(column_name = "teatro")]
    pub theater: Option<Json>,
    #[sea_orm(column_name = "serie_documental")]
    pub documentary_series: Option<Json>,
    #[sea_orm(column_name = "doblaje_voz")]
    pub voice_dubbing: Option<Json>,
    #[sea_orm(column_name = "formacion")]
    pub training: Option<Json>,
    #[sea_orm(column_name = "habilidades")]
    pub skills: Option<Json>,
    /// Bucket folder path, e.g. `actors/FabioLevy/images`. Set lazily by the
    /// first upload and never re-derived afterwards.
    pub images: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::images::Entity")]
    Images,
}

impl Related<super::images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── Credit lists ──

/// One entry of a career-credit list. Legacy rows are free-form objects, so
/// unknown keys are preserved through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One skills group: a category plus its list of skills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Resolve a credit-list column: array, JSON-encoded array string, or absent.
pub fn credit_list(value: Option<&Json>) -> Vec<CreditEntry> {
    parse_list(value)
}

/// Resolve the skills column the same way.
pub fn skill_groups(value: Option<&Json>) -> Vec<SkillGroup> {
    parse_list(value)
}

fn parse_list<T: serde::de::DeserializeOwned + Default>(value: Option<&Json>) -> Vec<T> {
    let Some(value) = value else {
        return Vec::new();
    };
    let value = match value {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => parsed,
            Err(_) => return Vec::new(),
        },
        other => other.clone(),
    };
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    }
}

// ── Resolved view ──

/// A profile with every legacy JSON-or-string column resolved into its
/// canonical shape. Built once per load; the detail endpoint and the admin
/// draft both consume this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDetail {
    pub id: Uuid,
    pub name: String,
    pub birth_date: Option<Date>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub gender: Option<String>,
    pub nationality: Localized<String>,
    pub immigration_status: Localized<String>,
    /// Wire shape: Spanish keys on the `es` side.
    pub appearance: Value,
    pub primary_image: Option<String>,
    pub instagram: Option<String>,
    pub demo_video: Option<String>,
    pub television: Vec<CreditEntry>,
    pub feature_films: Vec<CreditEntry>,
    pub short_films: Vec<CreditEntry>,
    pub theater: Vec<CreditEntry>,
    pub documentary_series: Vec<CreditEntry>,
    pub voice_dubbing: Vec<CreditEntry>,
    pub training: Vec<CreditEntry>,
    pub skills: Vec<SkillGroup>,
    pub images: Option<String>,
}

impl ProfileDetail {
    pub fn from_model(m: &Model) -> Self {
        let instagram = m
            .socials
            .as_ref()
            .and_then(|s| s.get("instagram"))
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let appearance = locale::appearance_wire(&locale::parse_appearance(m.appearance.as_ref()));
        Self {
            id: m.id,
            name: m.name.clone(),
            birth_date: m.birth_date,
            height: m.height,
            weight: m.weight,
            gender: m.gender.clone(),
            nationality: locale::localized_text(m.nationality.as_ref()),
            immigration_status: locale::localized_text(m.immigration_status.as_ref()),
            appearance,
            primary_image: m.primary_image.clone(),
            instagram,
            demo_video: m.demo_video.clone(),
            television: credit_list(m.television.as_ref()),
            feature_films: credit_list(m.feature_films.as_ref()),
            short_films: credit_list(m.short_films.as_ref()),
            theater: credit_list(m.theater.as_ref()),
            documentary_series: credit_list(m.documentary_series.as_ref()),
            voice_dubbing: credit_list(m.voice_dubbing.as_ref()),
            training: credit_list(m.training.as_ref()),
            skills: skill_groups(m.skills.as_ref()),
            images: m.images.clone(),
        }
    }
}

// ── DTOs ──

/// Payload for `POST /api/profiles`. Insert-or-update keyed by `id`; a
/// missing `id` means the backend assigns one. The folder-path column is
/// absent on purpose — only the upload pipeline writes it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProfile {
    pub id: Option<Uuid>,
    pub name: String,
    pub birth_date: Option<Date>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub gender: Option<String>,
    pub nationality: Option<Json>,
    pub immigration_status: Option<Json>,
    pub appearance: Option<Json>,
    pub primary_image: Option<String>,
    pub socials: Option<Json>,
    pub demo_video: Option<String>,
    pub television: Option<Json>,
    pub feature_films: Option<Json>,
    pub short_films: Option<Json>,
    pub theater: Option<Json>,
    pub documentary_series: Option<Json>,
    pub voice_dubbing: Option<Json>,
    pub training: Option<Json>,
    pub skills: Option<Json>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credit_list_parses_arrays_and_encoded_strings() {
        let v = json!([{"role": "Lead", "title": "La Casa", "year": "2021"}]);
        let list = credit_list(Some(&v));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].role.as_deref(), Some("Lead"));

        let encoded = Value::String(v.to_string());
        assert_eq!(credit_list(Some(&encoded)), list);
    }

    #[test]
    fn credit_list_preserves_unknown_keys() {
        let v = json!([{"title": "Doc", "producer": "Canal 5"}]);
        let list = credit_list(Some(&v));
        assert_eq!(list[0].extra["producer"], "Canal 5");
    }

    #[test]
    fn unreadable_credit_column_is_an_empty_list() {
        assert!(credit_list(Some(&json!("not json"))).is_empty());
        assert!(credit_list(Some(&json!(42))).is_empty());
        assert!(credit_list(None).is_empty());
    }

    #[test]
    fn skill_groups_resolve() {
        let v = json!([{"category": "Sports", "skills": ["Swimming", "Fencing"]}]);
        let groups = skill_groups(Some(&v));
        assert_eq!(groups[0].category, "Sports");
        assert_eq!(groups[0].skills, vec!["Swimming", "Fencing"]);
    }
}
