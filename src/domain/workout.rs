//! 训练项目领域模型

use serde::{Deserialize, Serialize};

/// 训练类型
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Strength,
    Cardio,
}

impl WorkoutType {
    /// 转换为字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Strength => "strength",
            WorkoutType::Cardio => "cardio",
        }
    }

    /// 从字符串解析，拒绝未知类型
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "strength" => Some(WorkoutType::Strength),
            "cardio" => Some(WorkoutType::Cardio),
            _ => None,
        }
    }
}

/// 训练项目定义
///
/// 力量训练使用 sets/reps/weight 字段，有氧训练使用 distance/duration 字段。
/// 未使用的字段保持为 null，与 API 响应格式一致。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    /// 重量（kg）
    pub weight: Option<f64>,
    /// 距离（km）
    pub distance: Option<f64>,
    /// 时长（分钟）
    pub duration: Option<f64>,
}

/// 训练项目部分更新
#[derive(Debug, Default)]
pub struct WorkoutPatch {
    pub name: Option<String>,
    pub workout_type: Option<WorkoutType>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
}

impl WorkoutPatch {
    /// 是否不包含任何可更新字段
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.workout_type.is_none()
            && self.sets.is_none()
            && self.reps.is_none()
            && self.weight.is_none()
            && self.distance.is_none()
            && self.duration.is_none()
    }
}
