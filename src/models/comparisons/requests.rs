use serde::Deserialize;
use ts_rs::TS;

/// 单项胜者输入：答案 ID，或关键字 answer1/answer2/draw/undecided，null 视为 undecided
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "comparison.ts")]
pub enum WinnerInput {
    AnswerId(i64),
    Keyword(String),
}

// 单条评审标准的提交内容
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "comparison.ts")]
pub struct ComparisonCriterionInput {
    pub criterion_id: i64,
    #[serde(default)]
    pub winner: Option<WinnerInput>,
    #[serde(default)]
    pub content: Option<String>,
}

// 提交比较请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "comparison.ts")]
pub struct SubmitComparisonRequest {
    pub comparison_criteria: Vec<ComparisonCriterionInput>,
    #[serde(default)]
    pub draft: bool,
}

// 创建比较示例请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "comparison.ts")]
pub struct CreateComparisonExampleRequest {
    pub answer1_id: i64,
    pub answer2_id: i64,
}

// 修改比较示例请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "comparison.ts")]
pub struct UpdateComparisonExampleRequest {
    pub answer1_id: i64,
    pub answer2_id: i64,
}

// 新建比较（用于存储层）
#[derive(Debug, Clone)]
pub struct NewComparison {
    pub assignment_id: i64,
    pub user_id: i64,
    pub answer1_id: i64,
    pub answer2_id: i64,
    pub comparison_example_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_input_accepts_id_keyword_and_null() {
        let body = r#"{
            "comparison_criteria": [
                {"criterion_id": 1, "winner": 42},
                {"criterion_id": 2, "winner": "draw", "content": "close call"},
                {"criterion_id": 3, "winner": null},
                {"criterion_id": 4}
            ]
        }"#;
        let req: SubmitComparisonRequest = serde_json::from_str(body).unwrap();

        assert!(!req.draft);
        assert_eq!(req.comparison_criteria[0].winner, Some(WinnerInput::AnswerId(42)));
        assert_eq!(
            req.comparison_criteria[1].winner,
            Some(WinnerInput::Keyword("draw".to_string()))
        );
        assert_eq!(req.comparison_criteria[2].winner, None);
        assert_eq!(req.comparison_criteria[3].winner, None);
    }
}
