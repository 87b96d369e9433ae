use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 单项/整体胜者
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "comparison.ts")]
pub enum WinningAnswer {
    Answer1,   // 左侧答案胜出
    Answer2,   // 右侧答案胜出
    Draw,      // 平局
    Undecided, // 尚未决定
}

impl WinningAnswer {
    pub const ANSWER1: &'static str = "answer1";
    pub const ANSWER2: &'static str = "answer2";
    pub const DRAW: &'static str = "draw";
    pub const UNDECIDED: &'static str = "undecided";

    pub fn is_decided(&self) -> bool {
        !matches!(self, WinningAnswer::Undecided)
    }
}

impl<'de> Deserialize<'de> for WinningAnswer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<WinningAnswer>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的胜者取值: '{s}'. 支持: answer1, answer2, draw, undecided"
            ))
        })
    }
}

impl std::fmt::Display for WinningAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinningAnswer::Answer1 => write!(f, "{}", WinningAnswer::ANSWER1),
            WinningAnswer::Answer2 => write!(f, "{}", WinningAnswer::ANSWER2),
            WinningAnswer::Draw => write!(f, "{}", WinningAnswer::DRAW),
            WinningAnswer::Undecided => write!(f, "{}", WinningAnswer::UNDECIDED),
        }
    }
}

impl std::str::FromStr for WinningAnswer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            WinningAnswer::ANSWER1 => Ok(WinningAnswer::Answer1),
            WinningAnswer::ANSWER2 => Ok(WinningAnswer::Answer2),
            WinningAnswer::DRAW => Ok(WinningAnswer::Draw),
            WinningAnswer::UNDECIDED => Ok(WinningAnswer::Undecided),
            _ => Err(format!("Invalid winning answer: {s}")),
        }
    }
}

/// 单条评审标准的判定
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "comparison.ts")]
pub struct ComparisonCriterion {
    pub id: i64,
    pub comparison_id: i64,
    pub criterion_id: i64,
    pub winner: WinningAnswer,
    // 评语
    pub content: Option<String>,
}

/// 一次比较（评审者对一对答案的判定）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "comparison.ts")]
pub struct Comparison {
    pub id: i64,
    pub assignment_id: i64,
    // 评审者 ID
    pub user_id: i64,
    pub answer1_id: i64,
    pub answer2_id: i64,
    // 来源比较示例（校准练习）
    pub comparison_example_id: Option<i64>,
    // 整体胜者，未完成时为空
    pub winner: Option<WinningAnswer>,
    pub completed: bool,
    pub comparison_criteria: Vec<ComparisonCriterion>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Comparison {
    pub fn is_example(&self) -> bool {
        self.comparison_example_id.is_some()
    }
}

/// 比较示例：教师挑选的固定答案对，用于校准
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "comparison.ts")]
pub struct ComparisonExample {
    pub id: i64,
    pub assignment_id: i64,
    pub answer1_id: i64,
    pub answer2_id: i64,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winning_answer_serde() {
        let json = serde_json::to_string(&WinningAnswer::Answer1).unwrap();
        assert_eq!(json, "\"answer1\"");

        let parsed: WinningAnswer = serde_json::from_str("\"draw\"").unwrap();
        assert_eq!(parsed, WinningAnswer::Draw);

        assert!(serde_json::from_str::<WinningAnswer>("\"left\"").is_err());
        assert!(!WinningAnswer::Undecided.is_decided());
        assert!(WinningAnswer::Draw.is_decided());
    }
}
