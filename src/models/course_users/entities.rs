use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "course-user.ts")]
pub enum CourseRole {
    Student,           // 学生
    TeachingAssistant, // 助教
    Instructor,        // 教师
    Dropped,           // 已退课
}

impl CourseRole {
    pub const STUDENT: &'static str = "student";
    pub const TEACHING_ASSISTANT: &'static str = "teaching_assistant";
    pub const INSTRUCTOR: &'static str = "instructor";
    pub const DROPPED: &'static str = "dropped";

    /// 教师与助教视为教育者（elevated role）
    pub fn is_educator(&self) -> bool {
        matches!(self, CourseRole::Instructor | CourseRole::TeachingAssistant)
    }

    pub fn educator_roles() -> &'static [CourseRole] {
        &[Self::Instructor, Self::TeachingAssistant]
    }

    /// 仍在课程中的角色（未退课）
    pub fn is_enrolled(&self) -> bool {
        !matches!(self, CourseRole::Dropped)
    }
}

impl<'de> Deserialize<'de> for CourseRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<CourseRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的课程角色: '{s}'. 支持的角色: student, teaching_assistant, instructor, dropped"
            ))
        })
    }
}

impl std::fmt::Display for CourseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseRole::Student => write!(f, "{}", CourseRole::STUDENT),
            CourseRole::TeachingAssistant => write!(f, "{}", CourseRole::TEACHING_ASSISTANT),
            CourseRole::Instructor => write!(f, "{}", CourseRole::INSTRUCTOR),
            CourseRole::Dropped => write!(f, "{}", CourseRole::DROPPED),
        }
    }
}

impl std::str::FromStr for CourseRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CourseRole::STUDENT => Ok(CourseRole::Student),
            CourseRole::TEACHING_ASSISTANT => Ok(CourseRole::TeachingAssistant),
            CourseRole::INSTRUCTOR => Ok(CourseRole::Instructor),
            CourseRole::DROPPED => Ok(CourseRole::Dropped),
            _ => Err(format!("Invalid course role: {s}")),
        }
    }
}

/// 课程成员（由课程/选课协作方维护，此处只读）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course-user.ts")]
pub struct CourseUser {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub role: CourseRole,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_and_educators() {
        for role in [
            CourseRole::Student,
            CourseRole::TeachingAssistant,
            CourseRole::Instructor,
            CourseRole::Dropped,
        ] {
            assert_eq!(role.to_string().parse::<CourseRole>(), Ok(role));
        }
        assert!(CourseRole::Instructor.is_educator());
        assert!(CourseRole::TeachingAssistant.is_educator());
        assert!(!CourseRole::Student.is_educator());
        assert!("admin".parse::<CourseRole>().is_err());
    }
}
