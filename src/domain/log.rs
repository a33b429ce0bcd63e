//! 训练记录领域模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::workout::WorkoutType;

/// 已完成的训练记录
///
/// log_data 保留客户端提交的原始 JSON 对象：力量训练通常包含
/// sets_completed 数组，有氧训练包含 distance/duration 字段。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: i64,
    pub workout_id: i64,
    pub date: NaiveDate,
    pub log_data: Value,
    pub comment: Option<String>,
}

/// 训练记录视图（关联训练项目名称和类型）
#[derive(Clone, Debug, Serialize)]
pub struct LogView {
    pub id: i64,
    pub date: NaiveDate,
    pub log_data: Value,
    pub comment: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
}

/// 单组完成情况
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    pub reps: i64,
    pub weight: f64,
}

/// 提供给教练的历史条目
///
/// 从记录的 log_data 中按训练类型提取出结构化字段，无法解析的
/// 部分保持为 None
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub name: String,
    pub workout_type: WorkoutType,
    pub sets_completed: Vec<SetEntry>,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
}

impl HistoryEntry {
    /// 从记录和所属训练项目构建历史条目
    pub fn from_log(log: &WorkoutLog, name: &str, workout_type: WorkoutType) -> Self {
        let mut sets_completed = Vec::new();
        let mut distance = None;
        let mut duration = None;

        match workout_type {
            WorkoutType::Strength => {
                if let Some(sets) = log.log_data.get("sets_completed").and_then(Value::as_array) {
                    for set in sets {
                        let reps = set.get("reps").and_then(Value::as_i64);
                        let weight = set.get("weight").and_then(Value::as_f64);
                        if let (Some(reps), Some(weight)) = (reps, weight) {
                            sets_completed.push(SetEntry { reps, weight });
                        }
                    }
                }
            }
            WorkoutType::Cardio => {
                distance = log.log_data.get("distance").and_then(Value::as_f64);
                duration = log.log_data.get("duration").and_then(Value::as_f64);
            }
        }

        Self {
            date: log.date,
            name: name.to_string(),
            workout_type,
            sets_completed,
            distance,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strength_log(data: Value) -> WorkoutLog {
        WorkoutLog {
            id: 1,
            workout_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            log_data: data,
            comment: None,
        }
    }

    #[test]
    fn test_history_entry_strength() {
        let log = strength_log(json!({
            "sets_completed": [
                {"reps": 8, "weight": 60.0},
                {"reps": 6, "weight": 62.5}
            ]
        }));

        let entry = HistoryEntry::from_log(&log, "Bench Press", WorkoutType::Strength);
        assert_eq!(entry.sets_completed.len(), 2);
        assert_eq!(entry.sets_completed[0], SetEntry { reps: 8, weight: 60.0 });
        assert!(entry.distance.is_none());
    }

    #[test]
    fn test_history_entry_cardio() {
        let log = strength_log(json!({"distance": 5.2, "duration": 31.0}));

        let entry = HistoryEntry::from_log(&log, "Morning Run", WorkoutType::Cardio);
        assert_eq!(entry.distance, Some(5.2));
        assert_eq!(entry.duration, Some(31.0));
        assert!(entry.sets_completed.is_empty());
    }

    #[test]
    fn test_history_entry_tolerates_malformed_data() {
        let log = strength_log(json!({"sets_completed": [{"reps": "eight"}, 42]}));

        let entry = HistoryEntry::from_log(&log, "Bench Press", WorkoutType::Strength);
        assert!(entry.sets_completed.is_empty());
    }
}
