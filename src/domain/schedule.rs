//! 训练计划领域模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::workout::WorkoutType;

/// 计划条目：某一天安排某个训练项目
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub workout_id: i64,
}

/// 计划视图（关联训练项目字段）
#[derive(Clone, Debug, Serialize)]
pub struct ScheduledWorkout {
    pub id: i64,
    pub date: NaiveDate,
    pub workout_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
}
