pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::comparisons::requests::{
    CreateComparisonExampleRequest, UpdateComparisonExampleRequest,
};
use crate::storage::Storage;

pub struct ComparisonExampleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ComparisonExampleService {
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

    // 列出比较示例
    pub async fn list_examples(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_examples(self, req, assignment_id).await
    }

    // 创建比较示例
    pub async fn create_example(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
        body: CreateComparisonExampleRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_example(self, req, assignment_id, body).await
    }

    // 修改比较示例
    pub async fn update_example(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
        example_id: i64,
        body: UpdateComparisonExampleRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_example(self, req, assignment_id, example_id, body).await
    }

    // 停用比较示例
    pub async fn delete_example(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
        example_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_example(self, req, assignment_id, example_id).await
    }
}
