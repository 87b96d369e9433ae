//! 集成测试公共数据
//!
//! 课程 1 下的成员与作业 1：
//! - 学生 1..=5 各有一份答案（101..=105）
//! - 教师 10 有一份答案（110），助教 11，已退课 12
//! - 两条评审标准（1、2），权重均为 1

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use compair_engine::config::{DatabaseConfig, EngineConfig};
use compair_engine::engine::observer::ComparisonObserver;
use compair_engine::entity::{answers, assignment_criteria, assignments, course_users, criteria};
use compair_engine::models::assignments::entities::AssignmentCriterion;
use compair_engine::models::comparisons::entities::Comparison;
use compair_engine::models::comparisons::requests::{
    ComparisonCriterionInput, SubmitComparisonRequest, WinnerInput,
};
use compair_engine::storage::sea_orm_storage::SeaOrmStorage;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

pub const COURSE_ID: i64 = 1;
pub const ASSIGNMENT_ID: i64 = 1;
pub const STUDENTS: [i64; 5] = [1, 2, 3, 4, 5];
pub const INSTRUCTOR: i64 = 10;
pub const TEACHING_ASSISTANT: i64 = 11;
pub const DROPPED: i64 = 12;
pub const OUTSIDER: i64 = 99;
pub const INSTRUCTOR_ANSWER: i64 = 110;

/// 学生的答案 ID
pub fn answer_of(student: i64) -> i64 {
    100 + student
}

pub fn engine_config(algorithm: &str) -> EngineConfig {
    EngineConfig {
        default_pairing_algorithm: algorithm.to_string(),
        compare_grace_seconds: 60,
        include_role_restricted_answers: false,
    }
}

/// 建立内存数据库并写入课程数据，作业需完成 3 次常规比较
pub async fn setup() -> Arc<SeaOrmStorage> {
    setup_with(3).await
}

pub async fn setup_with(number_of_comparisons: i32) -> Arc<SeaOrmStorage> {
    let storage = SeaOrmStorage::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 30,
    })
    .await
    .expect("创建内存数据库失败");

    seed(&storage, number_of_comparisons).await;
    Arc::new(storage)
}

async fn seed(storage: &SeaOrmStorage, number_of_comparisons: i32) {
    let db = storage.connection();
    let now = chrono::Utc::now().timestamp();

    let members = STUDENTS
        .iter()
        .map(|id| (*id, "student"))
        .chain([
            (INSTRUCTOR, "instructor"),
            (TEACHING_ASSISTANT, "teaching_assistant"),
            (DROPPED, "dropped"),
        ]);
    for (user_id, role) in members {
        course_users::ActiveModel {
            course_id: Set(COURSE_ID),
            user_id: Set(user_id),
            role: Set(role.to_string()),
            joined_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("写入课程成员失败");
    }

    assignments::ActiveModel {
        id: Set(ASSIGNMENT_ID),
        course_id: Set(COURSE_ID),
        name: Set("Persuasive essay".to_string()),
        number_of_comparisons: Set(number_of_comparisons),
        pairing_algorithm: Set(String::new()),
        educators_can_compare: Set(false),
        answer_start: Set(None),
        answer_end: Set(None),
        compare_start: Set(None),
        compare_end: Set(None),
        active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("写入作业失败");

    for (id, name) in [(1, "Argument"), (2, "Clarity")] {
        criteria::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            description: Set(None),
            created_at: Set(now),
        }
        .insert(db)
        .await
        .expect("写入评审标准失败");

        assignment_criteria::ActiveModel {
            assignment_id: Set(ASSIGNMENT_ID),
            criterion_id: Set(id),
            weight: Set(1),
            position: Set(id as i32),
            active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("写入作业评审标准失败");
    }

    let authors = STUDENTS
        .iter()
        .map(|s| (answer_of(*s), *s))
        .chain([(INSTRUCTOR_ANSWER, INSTRUCTOR)]);
    for (answer_id, user_id) in authors {
        answers::ActiveModel {
            id: Set(answer_id),
            assignment_id: Set(ASSIGNMENT_ID),
            user_id: Set(user_id),
            content: Set(Some(format!("answer by user {user_id}"))),
            active: Set(true),
            draft: Set(false),
            practice: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("写入答案失败");
    }
}

/// 修改作业字段
pub async fn update_assignment(
    storage: &SeaOrmStorage,
    change: impl FnOnce(&mut assignments::ActiveModel),
) {
    let db = storage.connection();
    let model = assignments::Entity::find_by_id(ASSIGNMENT_ID)
        .one(db)
        .await
        .expect("查询作业失败")
        .expect("作业不存在");
    let mut active: assignments::ActiveModel = model.into();
    change(&mut active);
    active.update(db).await.expect("更新作业失败");
}

/// 将答案标记为草稿或恢复为正式提交
pub async fn set_answer_draft(storage: &SeaOrmStorage, answer_id: i64, draft: bool) {
    let db = storage.connection();
    let model = answers::Entity::find_by_id(answer_id)
        .one(db)
        .await
        .expect("查询答案失败")
        .expect("答案不存在");
    let mut active: answers::ActiveModel = model.into();
    active.draft = Set(draft);
    active.update(db).await.expect("更新答案失败");
}

/// 每条标准都使用同一个关键字作为胜者
pub fn verdicts(criteria: &[AssignmentCriterion], keyword: &str, draft: bool) -> SubmitComparisonRequest {
    SubmitComparisonRequest {
        comparison_criteria: criteria
            .iter()
            .map(|c| ComparisonCriterionInput {
                criterion_id: c.criterion_id,
                winner: Some(WinnerInput::Keyword(keyword.to_string())),
                content: None,
            })
            .collect(),
        draft,
    }
}

/// 逐条指定胜者
pub fn verdicts_with(entries: &[(i64, Option<WinnerInput>)], draft: bool) -> SubmitComparisonRequest {
    SubmitComparisonRequest {
        comparison_criteria: entries
            .iter()
            .map(|(criterion_id, winner)| ComparisonCriterionInput {
                criterion_id: *criterion_id,
                winner: winner.clone(),
                content: None,
            })
            .collect(),
        draft,
    }
}

/// 记录观察者回调的测试观察者
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<(&'static str, i64)>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<(&'static str, i64)> {
        self.events.lock().expect("观察者锁已中毒").clone()
    }
}

impl ComparisonObserver for RecordingObserver {
    fn on_comparison_get(&self, comparison: &Comparison) {
        self.events
            .lock()
            .expect("观察者锁已中毒")
            .push(("get", comparison.id));
    }

    fn on_comparison_create(&self, comparison: &Comparison) {
        self.events
            .lock()
            .expect("观察者锁已中毒")
            .push(("create", comparison.id));
    }

    fn on_comparison_update(&self, comparison: &Comparison) {
        self.events
            .lock()
            .expect("观察者锁已中毒")
            .push(("update", comparison.id));
    }
}

/// 不做任何事的观察者
pub struct SilentObserver;

impl ComparisonObserver for SilentObserver {}
