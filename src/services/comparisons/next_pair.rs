use std::collections::{HashMap, HashSet};

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use super::ComparisonService;
use crate::config::{AppConfig, EngineConfig};
use crate::engine::observer::ComparisonObserver;
use crate::engine::pairing::{Candidate, PairKey, PairingAlgorithm, select_pair};
use crate::engine::{examples, guard, pool, scoring};
use crate::errors::{CompairError, Result};
use crate::models::{
    ApiResponse,
    answers::entities::{Answer, AnswerView},
    assignments::entities::{Assignment, AssignmentCriterion},
    comparisons::{entities::Comparison, requests::NewComparison, responses::NextPairResponse},
    course_users::entities::CourseRole,
};
use crate::services::{current_user_id, error_response, load_assignment_and_membership};
use crate::storage::Storage;

pub async fn next_pair(
    service: &ComparisonService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let observer = service.get_observer(request);
    let config = &AppConfig::get().engine;
    let mut rng = StdRng::from_rng(&mut rand::rng());

    match resolve_next_pair(
        storage.as_ref(),
        observer.as_ref(),
        config,
        assignment_id,
        user_id,
        Utc::now(),
        &mut rng,
    )
    .await
    {
        Ok(pair) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            pair,
            "Comparison pair retrieved successfully",
        ))),
        Err(err) => Ok(error_response(&err)),
    }
}

/// 为评审者确定下一对答案
///
/// 依次为：续用未完成比较、比较示例、配额检查、按配对策略生成新的答案对。
/// 新的答案对在返回之前持久化为未完成比较。
pub async fn resolve_next_pair<R: RngCore + Send>(
    storage: &dyn Storage,
    observer: &dyn ComparisonObserver,
    config: &EngineConfig,
    assignment_id: i64,
    judge_id: i64,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<NextPairResponse> {
    let (assignment, membership) =
        load_assignment_and_membership(storage, assignment_id, judge_id).await?;
    guard::check_eligible(&assignment, membership.as_ref())?;
    guard::check_compare_window(
        &assignment,
        now,
        Duration::seconds(config.compare_grace_seconds),
    )?;

    let reveal_author = membership.as_ref().is_some_and(|m| m.role.is_educator());
    let examples = storage.list_comparison_examples(assignment_id, false).await?;
    let answers = storage.list_answers(assignment_id).await?;
    let history = storage.list_user_comparisons(assignment_id, judge_id).await?;
    let criteria = storage.list_assignment_criteria(assignment_id).await?;

    let applicable = examples::applicable_examples(&examples, &answers, assignment_id, judge_id);
    let (regular_done, examples_done) = examples::completed_progress(&history, &applicable);
    let progress = Progress {
        completed: regular_done + examples_done,
        required: assignment.total_comparisons_required(applicable.len()),
        reveal_author,
    };

    if let Some(open) = history.iter().find(|c| !c.completed).cloned() {
        observer.on_comparison_get(&open);
        return build_response(storage, open, criteria, true, progress).await;
    }

    let consumed: HashSet<i64> = history
        .iter()
        .filter_map(|c| c.comparison_example_id)
        .collect();
    let example = examples::next_example(&applicable, &consumed);

    // 仍需完成的示例已全部完成，此时进度只取决于常规比较数
    if example.is_none() {
        guard::check_quota(progress.completed, progress.required)?;
    }

    if criteria.is_empty() {
        return Err(CompairError::validation("作业未配置有效的评审标准"));
    }

    let new = match example {
        Some(example) => {
            debug!(
                "Serving comparison example {} to user {}",
                example.id, judge_id
            );
            NewComparison {
                assignment_id,
                user_id: judge_id,
                answer1_id: example.answer1_id,
                answer2_id: example.answer2_id,
                comparison_example_id: Some(example.id),
            }
        }
        None => {
            let (answer1_id, answer2_id) = choose_pair(
                storage,
                config,
                &assignment,
                judge_id,
                &answers,
                &history,
                &criteria,
                rng,
            )
            .await?;
            NewComparison {
                assignment_id,
                user_id: judge_id,
                answer1_id,
                answer2_id,
                comparison_example_id: None,
            }
        }
    };

    let criterion_ids: Vec<i64> = criteria.iter().map(|c| c.criterion_id).collect();
    let (comparison, created) = storage.open_comparison(new, &criterion_ids).await?;

    if created {
        observer.on_comparison_create(&comparison);
    } else {
        observer.on_comparison_get(&comparison);
    }

    build_response(storage, comparison, criteria, !created, progress).await
}

struct Progress {
    completed: i64,
    required: i64,
    reveal_author: bool,
}

/// 运行配对策略
async fn choose_pair<R: RngCore + Send>(
    storage: &dyn Storage,
    config: &EngineConfig,
    assignment: &Assignment,
    judge_id: i64,
    answers: &[Answer],
    history: &[Comparison],
    criteria: &[AssignmentCriterion],
    rng: &mut R,
) -> Result<(i64, i64)> {
    let algorithm = PairingAlgorithm::resolve(
        &assignment.pairing_algorithm,
        &config.default_pairing_algorithm,
    )?;

    let restricted: HashSet<i64> = if config.include_role_restricted_answers {
        HashSet::new()
    } else {
        storage
            .list_course_user_ids_by_roles(assignment.course_id, CourseRole::educator_roles())
            .await?
            .into_iter()
            .collect()
    };
    let pool = pool::eligible_answers(
        answers,
        assignment.id,
        judge_id,
        &restricted,
        config.include_role_restricted_answers,
    )?;

    let counts = storage
        .count_completed_comparisons_by_answer(assignment.id)
        .await?;

    let mut per_answer: HashMap<i64, HashMap<i64, f64>> = HashMap::new();
    for score in storage.list_answer_scores(assignment.id).await? {
        per_answer
            .entry(score.answer_id)
            .or_default()
            .insert(score.criterion_id, score.normalized_score);
    }

    let candidates: Vec<Candidate> = pool
        .iter()
        .map(|a| Candidate {
            answer_id: a.id,
            comparisons: counts.get(&a.id).copied().unwrap_or(0),
            score: per_answer
                .get(&a.id)
                .map_or(scoring::NEUTRAL_SCORE, |s| scoring::weighted_score(s, criteria)),
        })
        .collect();

    let judged: HashSet<PairKey> = history
        .iter()
        .map(|c| PairKey::new(c.answer1_id, c.answer2_id))
        .collect();

    debug!(
        "Selecting pair with {} strategy from {} candidates for user {}",
        algorithm,
        candidates.len(),
        judge_id
    );

    select_pair(algorithm.strategy(), &candidates, &judged, rng)
}

async fn build_response(
    storage: &dyn Storage,
    comparison: Comparison,
    criteria: Vec<AssignmentCriterion>,
    is_resume: bool,
    progress: Progress,
) -> Result<NextPairResponse> {
    let answer1 = storage
        .get_answer(comparison.answer1_id)
        .await?
        .ok_or_else(|| CompairError::not_found("答案不存在"))?;
    let answer2 = storage
        .get_answer(comparison.answer2_id)
        .await?
        .ok_or_else(|| CompairError::not_found("答案不存在"))?;

    Ok(NextPairResponse {
        comparison,
        answer1: AnswerView::from_answer(answer1, progress.reveal_author),
        answer2: AnswerView::from_answer(answer2, progress.reveal_author),
        criteria,
        is_resume,
        current: progress.completed + 1,
        comparisons_done: progress.completed,
        comparisons_required: progress.required,
    })
}
