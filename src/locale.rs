//! Canonical in-memory shapes for the bilingual profile columns.
//!
//! Several legacy columns hold either an already-parsed JSON structure or a
//! JSON-encoded string of that structure, and the Spanish appearance block
//! uses its own key names (`ojos`/`cabello`/`piel`). Everything is resolved
//! here, once, at load time; the rest of the code only ever sees `Localized`
//! values with the English-named fields, and the Spanish key scheme appears
//! again only when serializing back out.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Site language. Passed explicitly wherever a localized value is read;
/// never a process-wide global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

/// A value with one variant per supported language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Localized<T> {
    #[serde(default)]
    pub en: T,
    #[serde(default)]
    pub es: T,
}

impl<T> Localized<T> {
    pub fn get(&self, lang: Language) -> &T {
        match lang {
            Language::En => &self.en,
            Language::Es => &self.es,
        }
    }
}

/// Resolve a legacy text column that may be a plain string, a `{en, es}`
/// object, or a JSON-encoded string of that object. A plain string is used
/// for both languages; anything unreadable resolves to empty text.
pub fn localized_text(value: Option<&Value>) -> Localized<String> {
    match value {
        Some(v) => resolve_text(v),
        None => Localized::default(),
    }
}

fn resolve_text(value: &Value) -> Localized<String> {
    match value {
        Value::String(s) => {
            if let Ok(parsed) = serde_json::from_str::<Value>(s) {
                if parsed.is_object() {
                    return resolve_text(&parsed);
                }
            }
            Localized {
                en: s.clone(),
                es: s.clone(),
            }
        }
        Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
        _ => Localized::default(),
    }
}

/// Normalized appearance descriptors. English field names internally; the
/// Spanish wire keys exist only in [`AppearanceEs`] at the serde boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    #[serde(default)]
    pub eyes: String,
    #[serde(default)]
    pub hair: String,
    #[serde(default)]
    pub skin: String,
}

/// Spanish wire shape of an appearance block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AppearanceEs {
    #[serde(default)]
    ojos: String,
    #[serde(default)]
    cabello: String,
    #[serde(default)]
    piel: String,
}

impl From<AppearanceEs> for Appearance {
    fn from(a: AppearanceEs) -> Self {
        Self {
            eyes: a.ojos,
            hair: a.cabello,
            skin: a.piel,
        }
    }
}

impl From<&Appearance> for AppearanceEs {
    fn from(a: &Appearance) -> Self {
        Self {
            ojos: a.eyes.clone(),
            cabello: a.hair.clone(),
            piel: a.skin.clone(),
        }
    }
}

/// Resolve a legacy appearance column (`{en: {eyes, hair, skin}, es: {ojos,
/// cabello, piel}}`, possibly JSON-encoded as a string) into the canonical
/// shape.
pub fn parse_appearance(value: Option<&Value>) -> Localized<Appearance> {
    let Some(value) = value else {
        return Localized::default();
    };
    let value = match value {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => parsed,
            Err(_) => return Localized::default(),
        },
        other => other.clone(),
    };
    let en = value
        .get("en")
        .cloned()
        .and_then(|v| serde_json::from_value::<Appearance>(v).ok())
        .unwrap_or_default();
    let es = value
        .get("es")
        .cloned()
        .and_then(|v| serde_json::from_value::<AppearanceEs>(v).ok())
        .map(Appearance::from)
        .unwrap_or_default();
    Localized { en, es }
}

/// Serialize a canonical appearance back to the legacy wire shape, restoring
/// the Spanish key names on the `es` side.
pub fn appearance_wire(appearance: &Localized<Appearance>) -> Value {
    serde_json::json!({
        "en": appearance.en,
        "es": AppearanceEs::from(&appearance.es),
    })
}
