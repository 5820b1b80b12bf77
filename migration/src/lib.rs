pub use sea_orm_migration::prelude::*;

mod m20250920_000001_create_profile_table;
mod m20250920_000002_create_profile_images_table;
mod m20250921_000001_add_profile_images_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250920_000001_create_profile_table::Migration),
            Box::new(m20250920_000002_create_profile_images_table::Migration),
            Box::new(m20250921_000001_add_profile_images_index::Migration),
        ]
    }
}
