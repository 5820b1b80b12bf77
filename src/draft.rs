//! Draft state for the admin profile editor.
//!
//! A draft is an owned snapshot of the whole nested record being edited.
//! Every mutation returns a new draft and leaves the receiver untouched, so
//! a UI holding the previous snapshot never observes a half-updated list.

use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::locale::{self, Appearance, Language, Localized};
use crate::models::profiles::{CreditEntry, Model, SkillGroup, credit_list, skill_groups};

/// Scalar fields editable as plain text inputs. Numeric fields stay strings
/// in the draft (form semantics) and are parsed when the payload is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    Name,
    BirthDate,
    Height,
    Weight,
    Gender,
    PrimaryImage,
    Instagram,
    DemoVideo,
}

/// Localized fields, flattened to (field, subfield) pairs so an update is
/// field × language × value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalizedField {
    Nationality,
    ImmigrationStatus,
    AppearanceEyes,
    AppearanceHair,
    AppearanceSkin,
}

/// The seven career-credit lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditList {
    Television,
    FeatureFilms,
    ShortFilms,
    Theater,
    DocumentarySeries,
    VoiceDubbing,
    Training,
}

/// Keys of one credit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditKey {
    Role,
    Title,
    Year,
    Network,
    Director,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub id: Option<Uuid>,
    pub name: String,
    pub birth_date: String,
    pub height: String,
    pub weight: String,
    pub gender: String,
    pub nationality: Localized<String>,
    pub immigration_status: Localized<String>,
    pub appearance: Localized<Appearance>,
    pub primary_image: String,
    pub instagram: String,
    pub demo_video: String,
    pub television: Vec<CreditEntry>,
    pub feature_films: Vec<CreditEntry>,
    pub short_films: Vec<CreditEntry>,
    pub theater: Vec<CreditEntry>,
    pub documentary_series: Vec<CreditEntry>,
    pub voice_dubbing: Vec<CreditEntry>,
    pub training: Vec<CreditEntry>,
    pub skills: Vec<SkillGroup>,
}

impl ProfileDraft {
    /// All-empty defaults for creating a new profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from a fetched profile, resolving the legacy JSON
    /// columns into their canonical shapes on the way in.
    pub fn from_profile(m: &Model) -> Self {
        Self {
            id: Some(m.id),
            name: m.name.clone(),
            birth_date: m
                .birth_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            height: m.height.map(|h| h.to_string()).unwrap_or_default(),
            weight: m.weight.map(|w| w.to_string()).unwrap_or_default(),
            gender: m.gender.clone().unwrap_or_default(),
            nationality: locale::localized_text(m.nationality.as_ref()),
            immigration_status: locale::localized_text(m.immigration_status.as_ref()),
            appearance: locale::parse_appearance(m.appearance.as_ref()),
            primary_image: m.primary_image.clone().unwrap_or_default(),
            instagram: m
                .socials
                .as_ref()
                .and_then(|s| s.get("instagram"))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            demo_video: m.demo_video.clone().unwrap_or_default(),
            television: credit_list(m.television.as_ref()),
            feature_films: credit_list(m.feature_films.as_ref()),
            short_films: credit_list(m.short_films.as_ref()),
            theater: credit_list(m.theater.as_ref()),
            documentary_series: credit_list(m.documentary_series.as_ref()),
            voice_dubbing: credit_list(m.voice_dubbing.as_ref()),
            training: credit_list(m.training.as_ref()),
            skills: skill_groups(m.skills.as_ref()),
        }
    }

    pub fn with_scalar(&self, field: ScalarField, value: &str) -> Self {
        let mut next = self.clone();
        let slot = match field {
            ScalarField::Name => &mut next.name,
            ScalarField::BirthDate => &mut next.birth_date,
            ScalarField::Height => &mut next.height,
            ScalarField::Weight => &mut next.weight,
            ScalarField::Gender => &mut next.gender,
            ScalarField::PrimaryImage => &mut next.primary_image,
            ScalarField::Instagram => &mut next.instagram,
            ScalarField::DemoVideo => &mut next.demo_video,
        };
        *slot = value.to_string();
        next
    }

    pub fn with_localized(&self, field: LocalizedField, lang: Language, value: &str) -> Self {
        let mut next = self.clone();
        match field {
            LocalizedField::Nationality => match lang {
                Language::En => next.nationality.en = value.to_string(),
                Language::Es => next.nationality.es = value.to_string(),
            },
            LocalizedField::ImmigrationStatus => match lang {
                Language::En => next.immigration_status.en = value.to_string(),
                Language::Es => next.immigration_status.es = value.to_string(),
            },
            LocalizedField::AppearanceEyes
            | LocalizedField::AppearanceHair
            | LocalizedField::AppearanceSkin => {
                let block = match lang {
                    Language::En => &mut next.appearance.en,
                    Language::Es => &mut next.appearance.es,
                };
                let slot = match field {
                    LocalizedField::AppearanceEyes => &mut block.eyes,
                    LocalizedField::AppearanceHair => &mut block.hair,
                    _ => &mut block.skin,
                };
                *slot = value.to_string();
            }
        }
        next
    }

    fn credits(&self, list: CreditList) -> &Vec<CreditEntry> {
        match list {
            CreditList::Television => &self.television,
            CreditList::FeatureFilms => &self.feature_films,
            CreditList::ShortFilms => &self.short_films,
            CreditList::Theater => &self.theater,
            CreditList::DocumentarySeries => &self.documentary_series,
            CreditList::VoiceDubbing => &self.voice_dubbing,
            CreditList::Training => &self.training,
        }
    }

    fn credits_mut(&mut self, list: CreditList) -> &mut Vec<CreditEntry> {
        match list {
            CreditList::Television => &mut self.television,
            CreditList::FeatureFilms => &mut self.feature_films,
            CreditList::ShortFilms => &mut self.short_films,
            CreditList::Theater => &mut self.theater,
            CreditList::DocumentarySeries => &mut self.documentary_series,
            CreditList::VoiceDubbing => &mut self.voice_dubbing,
            CreditList::Training => &mut self.training,
        }
    }

    /// Append an empty entry to a credit list.
    pub fn push_credit(&self, list: CreditList) -> Self {
        let mut next = self.clone();
        next.credits_mut(list).push(CreditEntry::default());
        next
    }

    /// Set one key of the entry at `index`, growing the list with empty
    /// entries when the index does not exist yet.
    pub fn set_credit(&self, list: CreditList, index: usize, key: CreditKey, value: &str) -> Self {
        let mut next = self.clone();
        let entries = next.credits_mut(list);
        if index >= entries.len() {
            entries.resize_with(index + 1, CreditEntry::default);
        }
        let entry = &mut entries[index];
        let slot = match key {
            CreditKey::Role => &mut entry.role,
            CreditKey::Title => &mut entry.title,
            CreditKey::Year => &mut entry.year,
            CreditKey::Network => &mut entry.network,
            CreditKey::Director => &mut entry.director,
        };
        *slot = Some(value.to_string());
        next
    }

    /// Remove the entry at `index`; out-of-range indices are a no-op.
    pub fn remove_credit(&self, list: CreditList, index: usize) -> Self {
        let mut next = self.clone();
        let entries = next.credits_mut(list);
        if index < entries.len() {
            entries.remove(index);
        }
        next
    }

    pub fn credit_entries(&self, list: CreditList) -> &[CreditEntry] {
        self.credits(list)
    }

    pub fn push_skill_group(&self) -> Self {
        let mut next = self.clone();
        next.skills.push(SkillGroup::default());
        next
    }

    pub fn set_skill_category(&self, index: usize, value: &str) -> Self {
        let mut next = self.clone();
        if index >= next.skills.len() {
            next.skills.resize_with(index + 1, SkillGroup::default);
        }
        next.skills[index].category = value.to_string();
        next
    }

    pub fn set_skill_items(&self, index: usize, items: Vec<String>) -> Self {
        let mut next = self.clone();
        if index >= next.skills.len() {
            next.skills.resize_with(index + 1, SkillGroup::default);
        }
        next.skills[index].skills = items;
        next
    }

    pub fn remove_skill_group(&self, index: usize) -> Self {
        let mut next = self.clone();
        if index < next.skills.len() {
            next.skills.remove(index);
        }
        next
    }

    /// Build the upsert payload for `POST /api/profiles`.
    ///
    /// When the draft has no identifier the `id` key is omitted entirely —
    /// an empty-string id must never be sent as if it were real. After a
    /// create, the caller re-fetches the profile list to pick up the
    /// generated identifier; the draft does not learn it.
    pub fn upsert_payload(&self) -> Value {
        let mut map = Map::new();
        if let Some(id) = self.id {
            map.insert("id".to_string(), json!(id));
        }
        map.insert("name".to_string(), json!(self.name));
        if !self.birth_date.is_empty() {
            map.insert("birth_date".to_string(), json!(self.birth_date));
        }
        if let Ok(height) = self.height.parse::<f64>() {
            map.insert("height".to_string(), json!(height));
        }
        if let Ok(weight) = self.weight.parse::<f64>() {
            map.insert("weight".to_string(), json!(weight));
        }
        if !self.gender.is_empty() {
            map.insert("gender".to_string(), json!(self.gender));
        }
        map.insert("nationality".to_string(), json!(self.nationality));
        map.insert(
            "immigration_status".to_string(),
            json!(self.immigration_status),
        );
        map.insert(
            "appearance".to_string(),
            locale::appearance_wire(&self.appearance),
        );
        if !self.primary_image.is_empty() {
            map.insert("primary_image".to_string(), json!(self.primary_image));
        }
        if !self.instagram.is_empty() {
            map.insert("socials".to_string(), json!({ "instagram": self.instagram }));
        }
        if !self.demo_video.is_empty() {
            map.insert("demo_video".to_string(), json!(self.demo_video));
        }
        map.insert("television".to_string(), json!(self.television));
        map.insert("feature_films".to_string(), json!(self.feature_films));
        map.insert("short_films".to_string(), json!(self.short_films));
        map.insert("theater".to_string(), json!(self.theater));
        map.insert(
            "documentary_series".to_string(),
            json!(self.documentary_series),
        );
        map.insert("voice_dubbing".to_string(), json!(self.voice_dubbing));
        map.insert("training".to_string(), json!(self.training));
        map.insert("skills".to_string(), json!(self.skills));
        Value::Object(map)
    }
}
