use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `profile` table and its columns. The career-credit
/// columns keep their legacy Spanish names.
#[derive(DeriveIden)]
enum Profile {
    Table,
    Id,
    Name,
    BirthDate,
    Height,
    Weight,
    Gender,
    Nationality,
    ImmigrationStatus,
    Appearance,
    PrimaryImage,
    Socials,
    DemoVideo,
    Television,
    Largometrajes,
    Cortometrajes,
    Teatro,
    SerieDocumental,
    DoblajeVoz,
    Formacion,
    Habilidades,
    Images,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profile::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Profile::Name).string().not_null())
                    .col(ColumnDef::new(Profile::BirthDate).date())
                    .col(ColumnDef::new(Profile::Height).double())
                    .col(ColumnDef::new(Profile::Weight).double())
                    .col(ColumnDef::new(Profile::Gender).string())
                    .col(ColumnDef::new(Profile::Nationality).json_binary())
                    .col(ColumnDef::new(Profile::ImmigrationStatus).json_binary())
                    .col(ColumnDef::new(Profile::Appearance).json_binary())
                    .col(ColumnDef::new(Profile::PrimaryImage).string())
                    .col(ColumnDef::new(Profile::Socials).json_binary())
                    .col(ColumnDef::new(Profile::DemoVideo).string())
                    .col(ColumnDef::new(Profile::Television).json_binary())
                    .col(ColumnDef::new(Profile::Largometrajes).json_binary())
                    .col(ColumnDef::new(Profile::Cortometrajes).json_binary())
                    .col(ColumnDef::new(Profile::Teatro).json_binary())
                    .col(ColumnDef::new(Profile::SerieDocumental).json_binary())
                    .col(ColumnDef::new(Profile::DoblajeVoz).json_binary())
                    .col(ColumnDef::new(Profile::Formacion).json_binary())
                    .col(ColumnDef::new(Profile::Habilidades).json_binary())
                    .col(ColumnDef::new(Profile::Images).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await
    }
}
