//! 教练提示词构建
//!
//! 将训练历史渲染为发送给模型的对话内容，纯函数便于测试

use crate::domain::log::HistoryEntry;
use crate::domain::workout::WorkoutType;

/// 系统提示词
pub const SYSTEM_PROMPT: &str = "You are a helpful personal training assistant. Your job is to \
     analyse workout history and suggest when to increase weight or adjust volume. Provide \
     succinct, actionable advice tailored to the user's recent performance.";

/// 将单条历史渲染为一行描述
///
/// 力量训练列出每组的次数和重量，有氧训练列出距离和时长，
/// 缺失数据时退化为仅说明完成了该训练
fn history_line(entry: &HistoryEntry) -> String {
    match entry.workout_type {
        WorkoutType::Strength if !entry.sets_completed.is_empty() => {
            let sets: Vec<String> = entry
                .sets_completed
                .iter()
                .map(|s| format!("{} reps @ {}kg", s.reps, s.weight))
                .collect();
            format!(
                "On {} you performed {} with sets: {}.",
                entry.date,
                entry.name,
                sets.join(", ")
            )
        }
        WorkoutType::Cardio => {
            let distance = entry
                .distance
                .map(|d| d.to_string())
                .unwrap_or_else(|| "?".to_string());
            let duration = entry
                .duration
                .map(|d| d.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!(
                "On {} you ran {} km in {} minutes for the workout {}.",
                entry.date, distance, duration, entry.name
            )
        }
        _ => format!("On {} you completed {}.", entry.date, entry.name),
    }
}

/// 构建用户消息：历史摘要加上固定的提问
pub fn build_user_message(history: &[HistoryEntry]) -> String {
    let lines: Vec<String> = history.iter().map(history_line).collect();
    format!(
        "Here is my recent workout history:\n{}\nBased on this, please recommend whether I \
         should increase the weight or intensity for each exercise, and provide suggestions \
         for progression in both strength and running workouts.",
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::log::SetEntry;
    use chrono::NaiveDate;

    fn entry(workout_type: WorkoutType) -> HistoryEntry {
        HistoryEntry {
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            name: "Bench Press".to_string(),
            workout_type,
            sets_completed: Vec::new(),
            distance: None,
            duration: None,
        }
    }

    #[test]
    fn test_strength_line() {
        let mut e = entry(WorkoutType::Strength);
        e.sets_completed = vec![
            SetEntry { reps: 8, weight: 60.0 },
            SetEntry { reps: 6, weight: 62.5 },
        ];

        let line = history_line(&e);
        assert_eq!(
            line,
            "On 2024-05-20 you performed Bench Press with sets: 8 reps @ 60kg, 6 reps @ 62.5kg."
        );
    }

    #[test]
    fn test_cardio_line() {
        let mut e = entry(WorkoutType::Cardio);
        e.name = "Morning Run".to_string();
        e.distance = Some(5.2);
        e.duration = Some(31.0);

        let line = history_line(&e);
        assert_eq!(
            line,
            "On 2024-05-20 you ran 5.2 km in 31 minutes for the workout Morning Run."
        );
    }

    #[test]
    fn test_cardio_line_missing_fields() {
        let mut e = entry(WorkoutType::Cardio);
        e.name = "Morning Run".to_string();

        let line = history_line(&e);
        assert_eq!(
            line,
            "On 2024-05-20 you ran ? km in ? minutes for the workout Morning Run."
        );
    }

    #[test]
    fn test_strength_without_sets_falls_back() {
        let line = history_line(&entry(WorkoutType::Strength));
        assert_eq!(line, "On 2024-05-20 you completed Bench Press.");
    }

    #[test]
    fn test_user_message_wraps_history() {
        let message = build_user_message(&[entry(WorkoutType::Strength)]);
        assert!(message.starts_with("Here is my recent workout history:\n"));
        assert!(message.contains("On 2024-05-20 you completed Bench Press."));
        assert!(message.ends_with("running workouts."));
    }
}
