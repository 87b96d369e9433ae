pub mod next_pair;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::engine::observer::{ComparisonObserver, TracingObserver};
use crate::models::comparisons::requests::SubmitComparisonRequest;
use crate::storage::Storage;

pub struct ComparisonService {
    storage: Option<Arc<dyn Storage>>,
}

impl ComparisonService {
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

    /// 未注册观察者时使用默认的日志观察者
    pub(crate) fn get_observer(&self, request: &HttpRequest) -> Arc<dyn ComparisonObserver> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ComparisonObserver>>>()
            .map(|observer| observer.get_ref().clone())
            .unwrap_or_else(|| Arc::new(TracingObserver))
    }

    // 获取下一对需要比较的答案
    pub async fn next_pair(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        next_pair::next_pair(self, req, assignment_id).await
    }

    // 提交比较判定
    pub async fn submit_comparison(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
        comparison_id: i64,
        body: SubmitComparisonRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_comparison(self, req, assignment_id, comparison_id, body).await
    }
}
