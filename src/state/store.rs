//! 训练数据存储
//!
//! 将训练项目、计划和记录持久化到本地 JSON 文件，启动时加载，
//! 每次变更后原子写回，以便服务重启后恢复

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::env::constants::DATA_FILE_NAME;
use crate::domain::log::{HistoryEntry, LogView, WorkoutLog};
use crate::domain::schedule::{ScheduleEntry, ScheduledWorkout};
use crate::domain::workout::{Workout, WorkoutPatch};

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("workout {0} not found")]
    WorkoutNotFound(i64),
    #[error("workout {0} does not exist")]
    UnknownWorkoutRef(i64),
    #[error("failed to persist store: {0}")]
    Persist(String),
}

impl StoreError {
    fn persist(err: anyhow::Error) -> Self {
        StoreError::Persist(err.to_string())
    }
}

/// 存储计数摘要（用于 health 端点）
#[derive(Clone, Copy, Debug)]
pub struct StoreCounts {
    pub workouts: usize,
    pub logs: usize,
    pub scheduled: usize,
}

/// 获取数据文件路径
fn resolve_data_file(data_dir: Option<&Path>) -> PathBuf {
    // 优先使用配置指定的目录
    if let Some(dir) = data_dir {
        return dir.join(DATA_FILE_NAME);
    }

    // 其次使用可执行文件所在目录
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(parent) = exe_path.parent() {
            return parent.join(DATA_FILE_NAME);
        }
    }

    // 默认使用 /opt/workout-coach
    PathBuf::from("/opt/workout-coach").join(DATA_FILE_NAME)
}

/// 持久化的存储内容
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreData {
    /// 版本号（用于未来格式升级）
    pub version: u32,
    pub next_workout_id: i64,
    pub next_log_id: i64,
    pub next_schedule_id: i64,
    pub workouts: Vec<Workout>,
    pub logs: Vec<WorkoutLog>,
    pub schedule: Vec<ScheduleEntry>,
    /// 保存时间
    pub saved_at: DateTime<Utc>,
}

impl StoreData {
    /// 创建新的空存储
    pub fn new() -> Self {
        Self {
            version: 1,
            next_workout_id: 1,
            next_log_id: 1,
            next_schedule_id: 1,
            workouts: Vec::new(),
            logs: Vec::new(),
            schedule: Vec::new(),
            saved_at: Utc::now(),
        }
    }

    /// 从文件加载
    pub async fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path).await {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(data) => {
                    info!(
                        path = %path.display(),
                        workouts = data.workouts.len(),
                        logs = data.logs.len(),
                        saved_at = %data.saved_at,
                        "Loaded workout data"
                    );
                    Some(data)
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to parse workout data file, starting empty"
                    );
                    None
                }
            },
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read workout data file"
                );
                None
            }
        }
    }

    /// 保存到文件（原子写入）
    pub async fn save(&self, path: &Path) -> anyhow::Result<()> {
        let temp_path = path.with_extension("json.tmp");

        // 确保目录存在
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;

        // 写入临时文件后原子重命名
        fs::write(&temp_path, &content).await?;
        fs::rename(&temp_path, path).await?;

        Ok(())
    }
}

impl Default for StoreData {
    fn default() -> Self {
        Self::new()
    }
}

/// 训练数据存储
///
/// 所有读写经过内存中的 `StoreData`，变更在返回前写回磁盘
pub struct WorkoutStore {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl WorkoutStore {
    /// 打开存储，按配置解析数据文件路径
    pub async fn open(data_dir: Option<&Path>) -> Self {
        let path = resolve_data_file(data_dir);
        Self::open_at(path).await
    }

    /// 在指定路径打开存储
    pub async fn open_at(path: PathBuf) -> Self {
        let data = StoreData::load(&path).await.unwrap_or_default();
        Self {
            path,
            data: RwLock::new(data),
        }
    }

    /// 数据文件路径
    pub fn data_file(&self) -> &Path {
        &self.path
    }

    /// 获取计数摘要
    pub async fn counts(&self) -> StoreCounts {
        let data = self.data.read().await;
        StoreCounts {
            workouts: data.workouts.len(),
            logs: data.logs.len(),
            scheduled: data.schedule.len(),
        }
    }

    // ========== 训练项目 ==========

    /// 列出所有训练项目
    pub async fn list_workouts(&self) -> Vec<Workout> {
        let data = self.data.read().await;
        data.workouts.clone()
    }

    /// 获取训练项目
    pub async fn get_workout(&self, id: i64) -> Option<Workout> {
        let data = self.data.read().await;
        data.workouts.iter().find(|w| w.id == id).cloned()
    }

    /// 创建训练项目，返回分配的 ID
    pub async fn create_workout(&self, mut workout: Workout) -> Result<i64, StoreError> {
        let mut data = self.data.write().await;
        workout.id = data.next_workout_id;
        data.next_workout_id += 1;
        let id = workout.id;
        data.workouts.push(workout);
        data.saved_at = Utc::now();
        data.save(&self.path).await.map_err(StoreError::persist)?;
        Ok(id)
    }

    /// 部分更新训练项目
    pub async fn update_workout(&self, id: i64, patch: WorkoutPatch) -> Result<Workout, StoreError> {
        let mut data = self.data.write().await;
        let workout = data
            .workouts
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(StoreError::WorkoutNotFound(id))?;

        if let Some(name) = patch.name {
            workout.name = name;
        }
        if let Some(workout_type) = patch.workout_type {
            workout.workout_type = workout_type;
        }
        if let Some(sets) = patch.sets {
            workout.sets = Some(sets);
        }
        if let Some(reps) = patch.reps {
            workout.reps = Some(reps);
        }
        if let Some(weight) = patch.weight {
            workout.weight = Some(weight);
        }
        if let Some(distance) = patch.distance {
            workout.distance = Some(distance);
        }
        if let Some(duration) = patch.duration {
            workout.duration = Some(duration);
        }
        let updated = workout.clone();

        data.saved_at = Utc::now();
        data.save(&self.path).await.map_err(StoreError::persist)?;
        Ok(updated)
    }

    /// 删除训练项目，级联删除其记录和计划条目
    ///
    /// 返回是否实际删除了项目；删除不存在的项目不是错误
    pub async fn delete_workout(&self, id: i64) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        let before = data.workouts.len();
        data.workouts.retain(|w| w.id != id);
        let removed = data.workouts.len() < before;

        if removed {
            data.logs.retain(|l| l.workout_id != id);
            data.schedule.retain(|s| s.workout_id != id);
            data.saved_at = Utc::now();
            data.save(&self.path).await.map_err(StoreError::persist)?;
        }

        Ok(removed)
    }

    // ========== 训练计划 ==========

    /// 列出计划（按日期排序，关联训练项目字段）
    pub async fn list_schedule(&self) -> Vec<ScheduledWorkout> {
        let data = self.data.read().await;
        let mut scheduled: Vec<ScheduledWorkout> = data
            .schedule
            .iter()
            .filter_map(|entry| {
                let workout = data.workouts.iter().find(|w| w.id == entry.workout_id)?;
                Some(ScheduledWorkout {
                    id: entry.id,
                    date: entry.date,
                    workout_id: entry.workout_id,
                    name: workout.name.clone(),
                    workout_type: workout.workout_type,
                    sets: workout.sets,
                    reps: workout.reps,
                    weight: workout.weight,
                })
            })
            .collect();
        scheduled.sort_by(|a, b| (a.date, a.id).cmp(&(b.date, b.id)));
        scheduled
    }

    /// 设置计划：同一天的已有条目被新条目整体替换
    pub async fn replace_schedule(
        &self,
        entries: Vec<(NaiveDate, i64)>,
    ) -> Result<(), StoreError> {
        let mut data = self.data.write().await;

        for (_, workout_id) in &entries {
            if !data.workouts.iter().any(|w| w.id == *workout_id) {
                return Err(StoreError::UnknownWorkoutRef(*workout_id));
            }
        }

        let dates: HashSet<NaiveDate> = entries.iter().map(|(date, _)| *date).collect();
        data.schedule.retain(|entry| !dates.contains(&entry.date));

        for (date, workout_id) in entries {
            let id = data.next_schedule_id;
            data.next_schedule_id += 1;
            data.schedule.push(ScheduleEntry {
                id,
                date,
                workout_id,
            });
        }

        data.saved_at = Utc::now();
        data.save(&self.path).await.map_err(StoreError::persist)?;
        Ok(())
    }

    /// 清空计划
    pub async fn clear_schedule(&self) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        data.schedule.clear();
        data.saved_at = Utc::now();
        data.save(&self.path).await.map_err(StoreError::persist)?;
        Ok(())
    }

    // ========== 训练记录 ==========

    /// 列出记录（最新在前，关联训练项目字段）
    pub async fn list_logs(&self) -> Vec<LogView> {
        let data = self.data.read().await;
        let mut views: Vec<LogView> = data
            .logs
            .iter()
            .filter_map(|log| {
                let workout = data.workouts.iter().find(|w| w.id == log.workout_id)?;
                Some(LogView {
                    id: log.id,
                    date: log.date,
                    log_data: log.log_data.clone(),
                    comment: log.comment.clone(),
                    name: workout.name.clone(),
                    workout_type: workout.workout_type,
                })
            })
            .collect();
        views.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
        views
    }

    /// 追加记录，返回分配的 ID
    pub async fn create_log(
        &self,
        workout_id: i64,
        date: NaiveDate,
        log_data: Value,
        comment: Option<String>,
    ) -> Result<i64, StoreError> {
        let mut data = self.data.write().await;

        if !data.workouts.iter().any(|w| w.id == workout_id) {
            return Err(StoreError::UnknownWorkoutRef(workout_id));
        }

        let id = data.next_log_id;
        data.next_log_id += 1;
        data.logs.push(WorkoutLog {
            id,
            workout_id,
            date,
            log_data,
            comment,
        });

        data.saved_at = Utc::now();
        data.save(&self.path).await.map_err(StoreError::persist)?;
        Ok(id)
    }

    /// 获取最近的历史条目（最多 limit 条，时间从旧到新）
    pub async fn recent_history(&self, limit: usize) -> Vec<HistoryEntry> {
        let data = self.data.read().await;
        let mut logs: Vec<&WorkoutLog> = data.logs.iter().collect();
        logs.sort_by(|a, b| (a.date, a.id).cmp(&(b.date, b.id)));

        let skip = logs.len().saturating_sub(limit);
        logs.into_iter()
            .skip(skip)
            .filter_map(|log| {
                let workout = data.workouts.iter().find(|w| w.id == log.workout_id)?;
                Some(HistoryEntry::from_log(log, &workout.name, workout.workout_type))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workout::WorkoutType;
    use serde_json::json;

    fn strength(name: &str) -> Workout {
        Workout {
            id: 0,
            name: name.to_string(),
            workout_type: WorkoutType::Strength,
            sets: Some(3),
            reps: Some(8),
            weight: Some(60.0),
            distance: None,
            duration: None,
        }
    }

    fn cardio(name: &str) -> Workout {
        Workout {
            id: 0,
            name: name.to_string(),
            workout_type: WorkoutType::Cardio,
            sets: None,
            reps: None,
            weight: None,
            distance: Some(5.0),
            duration: Some(30.0),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn temp_store() -> (tempfile::TempDir, WorkoutStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = WorkoutStore::open_at(dir.path().join("workouts.json")).await;
        (dir, store)
    }

    #[tokio::test]
    async fn test_workout_crud() {
        let (_dir, store) = temp_store().await;

        let id = store.create_workout(strength("Bench Press")).await.unwrap();
        assert_eq!(id, 1);
        let second = store.create_workout(cardio("Run")).await.unwrap();
        assert_eq!(second, 2);

        let workout = store.get_workout(id).await.unwrap();
        assert_eq!(workout.name, "Bench Press");

        let patch = WorkoutPatch {
            weight: Some(62.5),
            ..Default::default()
        };
        let updated = store.update_workout(id, patch).await.unwrap();
        assert_eq!(updated.weight, Some(62.5));
        assert_eq!(updated.name, "Bench Press");

        assert!(store.delete_workout(id).await.unwrap());
        assert!(store.get_workout(id).await.is_none());
        // 删除不存在的项目不是错误
        assert!(!store.delete_workout(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_workout() {
        let (_dir, store) = temp_store().await;
        let result = store.update_workout(42, WorkoutPatch::default()).await;
        assert!(matches!(result, Err(StoreError::WorkoutNotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let (_dir, store) = temp_store().await;
        let id = store.create_workout(strength("Squat")).await.unwrap();
        let keep = store.create_workout(cardio("Run")).await.unwrap();

        store
            .create_log(id, date("2024-05-20"), json!({"sets_completed": []}), None)
            .await
            .unwrap();
        store
            .replace_schedule(vec![(date("2024-05-21"), id), (date("2024-05-22"), keep)])
            .await
            .unwrap();

        store.delete_workout(id).await.unwrap();

        assert!(store.list_logs().await.is_empty());
        let schedule = store.list_schedule().await;
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].workout_id, keep);
    }

    #[tokio::test]
    async fn test_schedule_replaces_by_date() {
        let (_dir, store) = temp_store().await;
        let a = store.create_workout(strength("Squat")).await.unwrap();
        let b = store.create_workout(cardio("Run")).await.unwrap();

        store
            .replace_schedule(vec![(date("2024-05-20"), a), (date("2024-05-21"), a)])
            .await
            .unwrap();

        // 5-20 的条目被替换，5-21 的保留
        store
            .replace_schedule(vec![(date("2024-05-20"), b)])
            .await
            .unwrap();

        let schedule = store.list_schedule().await;
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].date, date("2024-05-20"));
        assert_eq!(schedule[0].workout_id, b);
        assert_eq!(schedule[1].date, date("2024-05-21"));
        assert_eq!(schedule[1].workout_id, a);
    }

    #[tokio::test]
    async fn test_schedule_rejects_unknown_workout() {
        let (_dir, store) = temp_store().await;
        let result = store.replace_schedule(vec![(date("2024-05-20"), 99)]).await;
        assert!(matches!(result, Err(StoreError::UnknownWorkoutRef(99))));
    }

    #[tokio::test]
    async fn test_logs_newest_first() {
        let (_dir, store) = temp_store().await;
        let id = store.create_workout(cardio("Run")).await.unwrap();

        for day in ["2024-05-20", "2024-05-22", "2024-05-21"] {
            store
                .create_log(id, date(day), json!({"distance": 5.0}), None)
                .await
                .unwrap();
        }

        let logs = store.list_logs().await;
        let dates: Vec<NaiveDate> = logs.iter().map(|l| l.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-05-22"), date("2024-05-21"), date("2024-05-20")]
        );
    }

    #[tokio::test]
    async fn test_log_rejects_unknown_workout() {
        let (_dir, store) = temp_store().await;
        let result = store
            .create_log(7, date("2024-05-20"), json!({}), None)
            .await;
        assert!(matches!(result, Err(StoreError::UnknownWorkoutRef(7))));
    }

    #[tokio::test]
    async fn test_recent_history_window() {
        let (_dir, store) = temp_store().await;
        let id = store.create_workout(cardio("Run")).await.unwrap();

        for day in 1..=12 {
            let d = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
            store
                .create_log(id, d, json!({"distance": day as f64}), None)
                .await
                .unwrap();
        }

        let history = store.recent_history(10).await;
        assert_eq!(history.len(), 10);
        // 窗口覆盖最近 10 条，时间从旧到新
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
        assert_eq!(history[9].date, NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
    }

    #[tokio::test]
    async fn test_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workouts.json");

        {
            let store = WorkoutStore::open_at(path.clone()).await;
            store.create_workout(strength("Bench Press")).await.unwrap();
            store.create_workout(cardio("Run")).await.unwrap();
        }

        let store = WorkoutStore::open_at(path).await;
        let workouts = store.list_workouts().await;
        assert_eq!(workouts.len(), 2);
        // ID 序列在重启后继续递增
        let next = store.create_workout(strength("Squat")).await.unwrap();
        assert_eq!(next, 3);
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workouts.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let store = WorkoutStore::open_at(path).await;
        assert!(store.list_workouts().await.is_empty());
    }
}
