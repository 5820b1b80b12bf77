use chrono::{Datelike, NaiveDate};
use sea_orm::*;
use uuid::Uuid;

use crate::models::profiles::{self, UpsertProfile};

/// Fetch all profiles (admin editor seed list).
pub async fn get_all_profiles(db: &DatabaseConnection) -> Result<Vec<profiles::Model>, DbErr> {
    profiles::Entity::find().all(db).await
}

/// Fetch a single profile by ID.
pub async fn get_profile_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find_by_id(id).one(db).await
}

/// The cutoff birth date separating adults from minors: anyone born on or
/// before this date is 18 or older on `today`. Computed at request time, so
/// listings shift at midnight boundaries — accepted behavior.
pub fn age_cutoff(today: NaiveDate) -> NaiveDate {
    let year = today.year() - 18;
    // Feb 29 birthdays clamp to Feb 28 in non-leap years.
    NaiveDate::from_ymd_opt(year, today.month(), today.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).expect("valid date"))
}

/// Adult listing: `birth_date <= cutoff`, optionally restricted to one
/// gender (the Actors and Actresses sections each pin a fixed value).
pub async fn list_adults(
    db: &DatabaseConnection,
    cutoff: NaiveDate,
    gender: Option<&str>,
) -> Result<Vec<profiles::Model>, DbErr> {
    let mut query = profiles::Entity::find().filter(profiles::Column::BirthDate.lte(cutoff));
    if let Some(gender) = gender {
        query = query.filter(profiles::Column::Gender.eq(gender));
    }
    query.order_by_asc(profiles::Column::Name).all(db).await
}

/// Young-actor listing: `birth_date > cutoff`. Disjoint from the adult
/// listings for any fixed "today".
pub async fn list_minors(
    db: &DatabaseConnection,
    cutoff: NaiveDate,
) -> Result<Vec<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::BirthDate.gt(cutoff))
        .order_by_asc(profiles::Column::Name)
        .all(db)
        .await
}

/// Insert-or-update keyed by `id`. Without an id a new row is created and
/// the generated identifier comes back on the returned model.
pub async fn upsert_profile(
    db: &DatabaseConnection,
    input: UpsertProfile,
) -> Result<profiles::Model, DbErr> {
    match input.id {
        Some(id) => {
            let existing = profiles::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or(DbErr::RecordNotFound(format!("Profile {id} not found")))?;
            let mut active: profiles::ActiveModel = existing.into();
            apply(&mut active, input);
            active.update(db).await
        }
        None => {
            let mut active = profiles::ActiveModel {
                id: Set(Uuid::new_v4()),
                ..Default::default()
            };
            apply(&mut active, input);
            active.insert(db).await
        }
    }
}

fn apply(active: &mut profiles::ActiveModel, input: UpsertProfile) {
    active.name = Set(input.name);
    active.birth_date = Set(input.birth_date);
    active.height = Set(input.height);
    active.weight = Set(input.weight);
    active.gender = Set(input.gender);
    active.nationality = Set(input.nationality);
    active.immigration_status = Set(input.immigration_status);
    active.appearance = Set(input.appearance);
    active.primary_image = Set(input.primary_image);
    active.socials = Set(input.socials);
    active.demo_video = Set(input.demo_video);
    active.television = Set(input.television);
    active.feature_films = Set(input.feature_films);
    active.short_films = Set(input.short_films);
    active.theater = Set(input.theater);
    active.documentary_series = Set(input.documentary_series);
    active.voice_dubbing = Set(input.voice_dubbing);
    active.training = Set(input.training);
    active.skills = Set(input.skills);
    // the folder-path column is owned by the upload pipeline; upserts never
    // touch it
}

/// Read the recorded folder path for a profile.
pub async fn folder_path(db: &DatabaseConnection, id: Uuid) -> Result<Option<String>, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound(format!("Profile {id} not found")))?;
    Ok(profile.images)
}

/// Persist a derived folder path. Last writer wins when two first uploads
/// race; the backend offers no row lock here and none is taken.
pub async fn set_folder_path(db: &DatabaseConnection, id: Uuid, path: &str) -> Result<(), DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound(format!("Profile {id} not found")))?;
    let mut active: profiles::ActiveModel = profile.into();
    active.images = Set(Some(path.to_string()));
    active.update(db).await?;
    Ok(())
}

/// `(id, name)` pairs for every profile, for folder matching.
pub async fn profile_names(db: &DatabaseConnection) -> Result<Vec<(Uuid, String)>, DbErr> {
    profiles::Entity::find()
        .select_only()
        .column(profiles::Column::Id)
        .column(profiles::Column::Name)
        .into_tuple::<(Uuid, String)>()
        .all(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn cutoff_is_eighteen_years_back() {
        assert_eq!(age_cutoff(d("2024-01-01")), d("2006-01-01"));
        assert_eq!(age_cutoff(d("2025-06-15")), d("2007-06-15"));
    }

    #[test]
    fn leap_day_clamps_to_february_28() {
        // 2010-02-28 is 18 years before 2028-02-29 once clamped.
        assert_eq!(age_cutoff(d("2028-02-29")), d("2010-02-28"));
    }

    #[test]
    fn ana_ruiz_is_a_young_actor_on_2024_01_01() {
        // birth_date > cutoff means the Young Actors section.
        let cutoff = age_cutoff(d("2024-01-01"));
        let birth = d("2010-01-01");
        assert!(birth > cutoff);
        assert!(!(birth <= cutoff)); // and therefore not in Actors
    }

    #[test]
    fn adult_and_minor_predicates_are_disjoint() {
        let cutoff = age_cutoff(d("2024-01-01"));
        for birth in ["1990-05-02", "2005-12-31", "2006-01-01", "2006-01-02", "2015-07-20"] {
            let birth = d(birth);
            assert_ne!(birth <= cutoff, birth > cutoff);
        }
    }
}
