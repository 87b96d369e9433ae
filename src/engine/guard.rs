use chrono::{DateTime, Duration, Utc};

use crate::errors::{CompairError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::course_users::entities::{CourseRole, CourseUser};

/// 检查用户是否有资格参与该作业的比较
///
/// 未选课、已退课，或作业未开放教育者比较时的教师/助教，均无资格。
pub fn check_eligible(assignment: &Assignment, membership: Option<&CourseUser>) -> Result<()> {
    let Some(member) = membership else {
        return Err(CompairError::not_eligible("您不是该课程的成员"));
    };

    match member.role {
        CourseRole::Dropped => Err(CompairError::not_eligible("您已退出该课程")),
        role if role.is_educator() && !assignment.educators_can_compare => Err(
            CompairError::not_eligible("该作业不允许教师或助教参与比较"),
        ),
        _ => Ok(()),
    }
}

/// 检查用户是否为课程在读成员（任意未退课角色）
pub fn check_member(membership: Option<&CourseUser>) -> Result<()> {
    match membership {
        Some(member) if member.role.is_enrolled() => Ok(()),
        _ => Err(CompairError::not_eligible("您不是该课程的成员")),
    }
}

/// 检查用户是否为课程教育者（教师/助教），用于管理类操作
pub fn check_educator(membership: Option<&CourseUser>) -> Result<()> {
    match membership {
        Some(member) if member.role.is_educator() => Ok(()),
        _ => Err(CompairError::not_eligible("需要课程教师或助教权限")),
    }
}

/// 检查比较时间窗口
pub fn check_compare_window(
    assignment: &Assignment,
    now: DateTime<Utc>,
    grace: Duration,
) -> Result<()> {
    if assignment.compare_period_open(now, grace) {
        return Ok(());
    }

    if assignment
        .compare_starts_at()
        .is_some_and(|start| now < start)
    {
        Err(CompairError::deadline_passed("比较阶段尚未开始"))
    } else {
        Err(CompairError::deadline_passed("比较阶段已结束"))
    }
}

/// 检查是否已达到需完成的比较数量
pub fn check_quota(completed: i64, required: i64) -> Result<()> {
    if completed >= required {
        return Err(CompairError::quota_exhausted(format!(
            "您已完成全部 {required} 次比较"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(educators_can_compare: bool) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: 1,
            course_id: 1,
            name: "Essay".to_string(),
            number_of_comparisons: 3,
            pairing_algorithm: String::new(),
            educators_can_compare,
            answer_start: None,
            answer_end: None,
            compare_start: None,
            compare_end: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn member(role: CourseRole) -> CourseUser {
        CourseUser {
            id: 1,
            course_id: 1,
            user_id: 7,
            role,
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn test_eligibility() {
        let closed = assignment(false);
        let open = assignment(true);

        assert!(check_eligible(&closed, Some(&member(CourseRole::Student))).is_ok());
        assert!(check_eligible(&closed, None).is_err());
        assert!(check_eligible(&closed, Some(&member(CourseRole::Dropped))).is_err());
        assert!(check_eligible(&closed, Some(&member(CourseRole::Instructor))).is_err());
        assert!(check_eligible(&open, Some(&member(CourseRole::TeachingAssistant))).is_ok());
    }

    #[test]
    fn test_member_check() {
        assert!(check_member(Some(&member(CourseRole::Student))).is_ok());
        assert!(check_member(Some(&member(CourseRole::Dropped))).is_err());
        assert!(check_member(None).is_err());
    }

    #[test]
    fn test_educator_check() {
        assert!(check_educator(Some(&member(CourseRole::Instructor))).is_ok());
        assert!(check_educator(Some(&member(CourseRole::Student))).is_err());
        assert!(check_educator(None).is_err());
    }

    #[test]
    fn test_compare_window() {
        let now = Utc::now();
        let grace = Duration::seconds(60);
        let mut a = assignment(false);

        a.compare_start = Some(now + Duration::hours(1));
        let err = check_compare_window(&a, now, grace).unwrap_err();
        assert!(matches!(err, CompairError::DeadlinePassed(_)));

        a.compare_start = Some(now - Duration::hours(1));
        a.compare_end = Some(now - Duration::minutes(5));
        assert!(check_compare_window(&a, now, grace).is_err());

        a.compare_end = Some(now - Duration::seconds(30));
        assert!(check_compare_window(&a, now, grace).is_ok());
    }

    #[test]
    fn test_quota() {
        assert!(check_quota(3, 4).is_ok());
        let err = check_quota(4, 4).unwrap_err();
        assert!(matches!(err, CompairError::QuotaExhausted(_)));
    }
}
