use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Enrollment: one row per (student_id, course_id); closes the check-then-insert race
        manager
            .create_index(
                Index::create()
                    .name("uniq_enrollment_student_course")
                    .table(Enrollment::Table)
                    .col(Enrollment::StudentId)
                    .col(Enrollment::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Enrollment: roster lookups by course
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollment_course")
                    .table(Enrollment::Table)
                    .col(Enrollment::CourseId)
                    .to_owned(),
            )
            .await?;

        // Course: default listing is newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_course_created_at")
                    .table(Course::Table)
                    .col(Course::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_enrollment_student_course").table(Enrollment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_enrollment_course").table(Enrollment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_course_created_at").table(Course::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Enrollment { Table, StudentId, CourseId }

#[derive(DeriveIden)]
enum Course { Table, CreatedAt }
