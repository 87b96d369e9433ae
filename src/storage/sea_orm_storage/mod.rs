//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod answers;
mod assignments;
mod comparison_examples;
mod comparisons;
mod course_users;
mod scores;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{CompairError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CompairError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// 底层数据库连接
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CompairError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存数据库不支持 WAL
        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout));

        // 每个内存数据库连接都是独立的库，连接不能被回收
        pool = if in_memory {
            pool.idle_timeout(None).max_lifetime(None)
        } else {
            pool.idle_timeout(Duration::from_secs(300))
        };

        let pool = pool
            .connect_with(opt)
            .await
            .map_err(|e| CompairError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CompairError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CompairError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::engine::verdict::CriterionVerdict;
use crate::models::{
    answers::entities::Answer,
    assignments::entities::{Assignment, AssignmentCriterion},
    comparisons::{
        entities::{Comparison, ComparisonExample, WinningAnswer},
        requests::{CreateComparisonExampleRequest, NewComparison, UpdateComparisonExampleRequest},
    },
    course_users::entities::{CourseRole, CourseUser},
    scores::{entities::AnswerCriterionScore, responses::RecomputeScoresResponse},
};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 作业模块
    async fn get_assignment(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_impl(assignment_id).await
    }

    async fn list_assignment_criteria(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentCriterion>> {
        self.list_assignment_criteria_impl(assignment_id).await
    }

    // 课程成员模块
    async fn get_course_user(&self, course_id: i64, user_id: i64) -> Result<Option<CourseUser>> {
        self.get_course_user_impl(course_id, user_id).await
    }

    async fn list_course_user_ids_by_roles(
        &self,
        course_id: i64,
        roles: &[CourseRole],
    ) -> Result<Vec<i64>> {
        self.list_course_user_ids_by_roles_impl(course_id, roles)
            .await
    }

    // 答案模块
    async fn list_answers(&self, assignment_id: i64) -> Result<Vec<Answer>> {
        self.list_answers_impl(assignment_id).await
    }

    async fn get_answer(&self, answer_id: i64) -> Result<Option<Answer>> {
        self.get_answer_impl(answer_id).await
    }

    // 比较示例模块
    async fn list_comparison_examples(
        &self,
        assignment_id: i64,
        include_inactive: bool,
    ) -> Result<Vec<ComparisonExample>> {
        self.list_comparison_examples_impl(assignment_id, include_inactive)
            .await
    }

    async fn create_comparison_example(
        &self,
        assignment_id: i64,
        example: CreateComparisonExampleRequest,
    ) -> Result<ComparisonExample> {
        self.create_comparison_example_impl(assignment_id, example)
            .await
    }

    async fn update_comparison_example(
        &self,
        assignment_id: i64,
        example_id: i64,
        update: UpdateComparisonExampleRequest,
    ) -> Result<Option<ComparisonExample>> {
        self.update_comparison_example_impl(assignment_id, example_id, update)
            .await
    }

    async fn deactivate_comparison_example(
        &self,
        assignment_id: i64,
        example_id: i64,
    ) -> Result<bool> {
        self.deactivate_comparison_example_impl(assignment_id, example_id)
            .await
    }

    // 比较模块
    async fn find_open_comparison(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<Comparison>> {
        self.find_open_comparison_impl(&self.db, assignment_id, user_id)
            .await
    }

    async fn get_comparison(&self, comparison_id: i64) -> Result<Option<Comparison>> {
        self.get_comparison_impl(comparison_id).await
    }

    async fn list_user_comparisons(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Vec<Comparison>> {
        self.list_user_comparisons_impl(assignment_id, user_id)
            .await
    }

    async fn count_completed_comparisons_by_answer(
        &self,
        assignment_id: i64,
    ) -> Result<HashMap<i64, i64>> {
        self.count_completed_comparisons_by_answer_impl(assignment_id)
            .await
    }

    async fn open_comparison(
        &self,
        comparison: NewComparison,
        criterion_ids: &[i64],
    ) -> Result<(Comparison, bool)> {
        self.open_comparison_impl(comparison, criterion_ids).await
    }

    async fn save_comparison_draft(
        &self,
        comparison_id: i64,
        verdicts: &[CriterionVerdict],
    ) -> Result<Comparison> {
        self.save_comparison_draft_impl(comparison_id, verdicts)
            .await
    }

    async fn complete_comparison(
        &self,
        comparison_id: i64,
        verdicts: &[CriterionVerdict],
        winner: WinningAnswer,
    ) -> Result<Comparison> {
        self.complete_comparison_impl(comparison_id, verdicts, winner)
            .await
    }

    // 得分模块
    async fn list_answer_scores(&self, assignment_id: i64) -> Result<Vec<AnswerCriterionScore>> {
        self.list_answer_scores_impl(assignment_id).await
    }

    async fn recompute_scores(&self, assignment_id: i64) -> Result<RecomputeScoresResponse> {
        self.recompute_scores_impl(assignment_id).await
    }
}
