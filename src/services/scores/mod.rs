pub mod list;
pub mod recompute;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct ScoreService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScoreService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            super::storage_from_request(request)
        }
    }

    // 列出作业得分
    pub async fn list_scores(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_scores(self, req, assignment_id).await
    }

    // 重新计算作业得分
    pub async fn recompute_scores(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        recompute::recompute_scores(self, req, assignment_id).await
    }
}
