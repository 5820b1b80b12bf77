use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum ProfileImages {
    Table,
    ProfileId,
}

#[derive(DeriveIden)]
enum Profile {
    Table,
    BirthDate,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on profile_images.profile_id for the getImages query
        manager
            .create_index(
                Index::create()
                    .name("idx_profile_images_profile_id")
                    .table(ProfileImages::Table)
                    .col(ProfileImages::ProfileId)
                    .to_owned(),
            )
            .await?;

        // Index on profile.birth_date for the age-cutoff listings
        manager
            .create_index(
                Index::create()
                    .name("idx_profile_birth_date")
                    .table(Profile::Table)
                    .col(Profile::BirthDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_profile_images_profile_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_profile_birth_date").to_owned())
            .await?;

        Ok(())
    }
}
