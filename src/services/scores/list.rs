use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScoreService;
use crate::engine::{guard, scoring};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    scores::{
        entities::AnswerCriterionScore,
        responses::{AnswerScoreSummary, AssignmentScoresResponse},
    },
};
use crate::services::{current_user_id, error_response, load_assignment_and_membership};
use crate::storage::Storage;

pub async fn list_scores(
    service: &ScoreService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match list_for_educator(storage.as_ref(), assignment_id, user_id).await {
        Ok(scores) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            scores,
            "Scores retrieved successfully",
        ))),
        Err(err) => Ok(error_response(&err)),
    }
}

/// 作业内每个可比较答案的得分，按整体得分降序
pub async fn list_for_educator(
    storage: &dyn Storage,
    assignment_id: i64,
    user_id: i64,
) -> Result<AssignmentScoresResponse> {
    let (_, membership) = load_assignment_and_membership(storage, assignment_id, user_id).await?;
    guard::check_educator(membership.as_ref())?;

    let criteria = storage.list_assignment_criteria(assignment_id).await?;
    let answers = storage.list_answers(assignment_id).await?;

    let mut by_answer: HashMap<i64, Vec<AnswerCriterionScore>> = HashMap::new();
    for score in storage.list_answer_scores(assignment_id).await? {
        by_answer.entry(score.answer_id).or_default().push(score);
    }

    let mut items: Vec<AnswerScoreSummary> = answers
        .into_iter()
        .filter(|a| a.is_comparable_for(assignment_id))
        .map(|answer| {
            let scores = by_answer.remove(&answer.id).unwrap_or_default();
            let per_criterion: HashMap<i64, f64> = scores
                .iter()
                .map(|s| (s.criterion_id, s.normalized_score))
                .collect();
            AnswerScoreSummary {
                answer_id: answer.id,
                user_id: answer.user_id,
                overall_score: scoring::weighted_score(&per_criterion, &criteria),
                criteria: scores,
            }
        })
        .collect();

    items.sort_by(|a, b| {
        b.overall_score
            .total_cmp(&a.overall_score)
            .then(a.answer_id.cmp(&b.answer_id))
    });

    Ok(AssignmentScoresResponse {
        assignment_id,
        items,
    })
}
