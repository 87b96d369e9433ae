use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 外部协作方数据（只读） ====================

        // 创建课程成员表
        manager
            .create_table(
                Table::create()
                    .table(CourseUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseUsers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseUsers::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(CourseUsers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(CourseUsers::Role).string().not_null())
                    .col(
                        ColumnDef::new(CourseUsers::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::Name).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::NumberOfComparisons)
                            .integer()
                            .not_null()
                            .default(3),
                    )
                    .col(
                        ColumnDef::new(Assignments::PairingAlgorithm)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Assignments::EducatorsCanCompare)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Assignments::AnswerStart).big_integer().null())
                    .col(ColumnDef::new(Assignments::AnswerEnd).big_integer().null())
                    .col(ColumnDef::new(Assignments::CompareStart).big_integer().null())
                    .col(ColumnDef::new(Assignments::CompareEnd).big_integer().null())
                    .col(
                        ColumnDef::new(Assignments::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评价标准表
        manager
            .create_table(
                Table::create()
                    .table(Criteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Criteria::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Criteria::Name).string().not_null())
                    .col(ColumnDef::new(Criteria::Description).text().null())
                    .col(ColumnDef::new(Criteria::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建作业-评价标准关联表
        manager
            .create_table(
                Table::create()
                    .table(AssignmentCriteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentCriteria::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentCriteria::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentCriteria::CriterionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentCriteria::Weight)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(AssignmentCriteria::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AssignmentCriteria::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssignmentCriteria::Table, AssignmentCriteria::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssignmentCriteria::Table, AssignmentCriteria::CriterionId)
                            .to(Criteria::Table, Criteria::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建答案表
        manager
            .create_table(
                Table::create()
                    .table(Answers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Answers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Answers::AssignmentId).big_integer().not_null())
                    .col(ColumnDef::new(Answers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Answers::Content).text().null())
                    .col(
                        ColumnDef::new(Answers::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Answers::Draft)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Answers::Practice)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Answers::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Answers::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answers::Table, Answers::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 比较引擎数据 ====================

        // 创建比较示例表
        manager
            .create_table(
                Table::create()
                    .table(ComparisonExamples::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComparisonExamples::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ComparisonExamples::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ComparisonExamples::Answer1Id)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ComparisonExamples::Answer2Id)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ComparisonExamples::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ComparisonExamples::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ComparisonExamples::Table, ComparisonExamples::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ComparisonExamples::Table, ComparisonExamples::Answer1Id)
                            .to(Answers::Table, Answers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ComparisonExamples::Table, ComparisonExamples::Answer2Id)
                            .to(Answers::Table, Answers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建比较记录表
        manager
            .create_table(
                Table::create()
                    .table(Comparisons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comparisons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Comparisons::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Comparisons::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Comparisons::Answer1Id).big_integer().not_null())
                    .col(ColumnDef::new(Comparisons::Answer2Id).big_integer().not_null())
                    .col(
                        ColumnDef::new(Comparisons::ComparisonExampleId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Comparisons::Winner).string().null())
                    .col(
                        ColumnDef::new(Comparisons::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // 未完成时为 1，完成后置 NULL；配合唯一索引保证每个评审者只有一条未完成记录
                    .col(ColumnDef::new(Comparisons::OpenSlot).small_integer().null())
                    .col(
                        ColumnDef::new(Comparisons::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Comparisons::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Comparisons::Table, Comparisons::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Comparisons::Table, Comparisons::Answer1Id)
                            .to(Answers::Table, Answers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Comparisons::Table, Comparisons::Answer2Id)
                            .to(Answers::Table, Answers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Comparisons::Table, Comparisons::ComparisonExampleId)
                            .to(ComparisonExamples::Table, ComparisonExamples::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建比较标准判定表
        manager
            .create_table(
                Table::create()
                    .table(ComparisonCriteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComparisonCriteria::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ComparisonCriteria::ComparisonId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ComparisonCriteria::CriterionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ComparisonCriteria::Winner).string().not_null())
                    .col(ColumnDef::new(ComparisonCriteria::Content).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ComparisonCriteria::Table, ComparisonCriteria::ComparisonId)
                            .to(Comparisons::Table, Comparisons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ComparisonCriteria::Table, ComparisonCriteria::CriterionId)
                            .to(Criteria::Table, Criteria::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建答案得分表
        manager
            .create_table(
                Table::create()
                    .table(AnswerCriterionScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnswerCriterionScores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AnswerCriterionScores::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnswerCriterionScores::AnswerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnswerCriterionScores::CriterionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnswerCriterionScores::RawWinCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AnswerCriterionScores::ComparisonsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AnswerCriterionScores::NormalizedScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnswerCriterionScores::Rank)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(AnswerCriterionScores::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnswerCriterionScores::Table, AnswerCriterionScores::AnswerId)
                            .to(Answers::Table, Answers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AnswerCriterionScores::Table,
                                AnswerCriterionScores::CriterionId,
                            )
                            .to(Criteria::Table, Criteria::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 课程成员唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_users_course_user")
                    .table(CourseUsers::Table)
                    .col(CourseUsers::CourseId)
                    .col(CourseUsers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignment_criteria_assignment_criterion")
                    .table(AssignmentCriteria::Table)
                    .col(AssignmentCriteria::AssignmentId)
                    .col(AssignmentCriteria::CriterionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_answers_assignment_id")
                    .table(Answers::Table)
                    .col(Answers::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comparison_examples_assignment_id")
                    .table(ComparisonExamples::Table)
                    .col(ComparisonExamples::AssignmentId)
                    .to_owned(),
            )
            .await?;

        // 每个 (作业, 评审者) 最多一条未完成的比较
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comparisons_one_open")
                    .table(Comparisons::Table)
                    .col(Comparisons::AssignmentId)
                    .col(Comparisons::UserId)
                    .col(Comparisons::OpenSlot)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comparisons_assignment_completed")
                    .table(Comparisons::Table)
                    .col(Comparisons::AssignmentId)
                    .col(Comparisons::Completed)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comparison_criteria_comparison_criterion")
                    .table(ComparisonCriteria::Table)
                    .col(ComparisonCriteria::ComparisonId)
                    .col(ComparisonCriteria::CriterionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_answer_criterion_scores_answer_criterion")
                    .table(AnswerCriterionScores::Table)
                    .col(AnswerCriterionScores::AnswerId)
                    .col(AnswerCriterionScores::CriterionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_answer_criterion_scores_cohort")
                    .table(AnswerCriterionScores::Table)
                    .col(AnswerCriterionScores::AssignmentId)
                    .col(AnswerCriterionScores::CriterionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(AnswerCriterionScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ComparisonCriteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comparisons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ComparisonExamples::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Answers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentCriteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Criteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseUsers::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum CourseUsers {
    #[sea_orm(iden = "course_users")]
    Table,
    Id,
    CourseId,
    UserId,
    Role,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    CourseId,
    Name,
    NumberOfComparisons,
    PairingAlgorithm,
    EducatorsCanCompare,
    AnswerStart,
    AnswerEnd,
    CompareStart,
    CompareEnd,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Criteria {
    #[sea_orm(iden = "criteria")]
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AssignmentCriteria {
    #[sea_orm(iden = "assignment_criteria")]
    Table,
    Id,
    AssignmentId,
    CriterionId,
    Weight,
    Position,
    Active,
}

#[derive(DeriveIden)]
enum Answers {
    #[sea_orm(iden = "answers")]
    Table,
    Id,
    AssignmentId,
    UserId,
    Content,
    Active,
    Draft,
    Practice,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ComparisonExamples {
    #[sea_orm(iden = "comparison_examples")]
    Table,
    Id,
    AssignmentId,
    #[sea_orm(iden = "answer1_id")]
    Answer1Id,
    #[sea_orm(iden = "answer2_id")]
    Answer2Id,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Comparisons {
    #[sea_orm(iden = "comparisons")]
    Table,
    Id,
    AssignmentId,
    UserId,
    #[sea_orm(iden = "answer1_id")]
    Answer1Id,
    #[sea_orm(iden = "answer2_id")]
    Answer2Id,
    ComparisonExampleId,
    Winner,
    Completed,
    OpenSlot,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ComparisonCriteria {
    #[sea_orm(iden = "comparison_criteria")]
    Table,
    Id,
    ComparisonId,
    CriterionId,
    Winner,
    Content,
}

#[derive(DeriveIden)]
enum AnswerCriterionScores {
    #[sea_orm(iden = "answer_criterion_scores")]
    Table,
    Id,
    AssignmentId,
    AnswerId,
    CriterionId,
    RawWinCount,
    ComparisonsCount,
    NormalizedScore,
    Rank,
    UpdatedAt,
}
