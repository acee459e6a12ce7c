//! 答案存储 - 业务能力层
//!
//! 题目ID → 作答记录。本地先乐观写入，服务端确认后记为已保存；
//! 保存失败时回滚到最后一次服务端确认的值。每题一个单调递增的版本号，
//! 用于判断某次保存是否已被更新的编辑取代。

use crate::models::{AnswerRecord, AnswerValue};
use std::collections::HashMap;

/// 单题保存状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Saved,
    Saving,
    Failed { reason: String },
}

#[derive(Debug, Clone, Default)]
struct AnswerSlot {
    current: Option<AnswerRecord>,
    confirmed: Option<AnswerRecord>,
    version: u64,
    status: Option<SyncStatus>,
}

#[derive(Debug, Default)]
pub struct AnswerStore {
    slots: HashMap<String, AnswerSlot>,
}

impl AnswerStore {
    /// 用服务端返回的答案重建（恢复作答时使用）
    pub fn restore(records: impl IntoIterator<Item = AnswerRecord>) -> Self {
        let slots = records
            .into_iter()
            .map(|record| {
                let slot = AnswerSlot {
                    current: Some(record.clone()),
                    confirmed: Some(record.clone()),
                    version: 0,
                    status: Some(SyncStatus::Saved),
                };
                (record.question_id, slot)
            })
            .collect();
        Self { slots }
    }

    /// 乐观写入，返回本次编辑的版本号
    pub fn apply_local(&mut self, record: AnswerRecord) -> u64 {
        let slot = self.slots.entry(record.question_id.clone()).or_default();
        slot.version += 1;
        slot.current = Some(record);
        slot.status = Some(SyncStatus::Saving);
        slot.version
    }

    /// 该版本是否仍是本地最新的编辑
    pub fn is_latest(&self, question_id: &str, version: u64) -> bool {
        self.slots
            .get(question_id)
            .map(|slot| slot.version == version)
            .unwrap_or(false)
    }

    /// 服务端已确认某个版本
    pub fn confirm(&mut self, record: &AnswerRecord, version: u64) {
        if let Some(slot) = self.slots.get_mut(&record.question_id) {
            slot.confirmed = Some(record.clone());
            if slot.version == version {
                slot.status = Some(SyncStatus::Saved);
            }
        }
    }

    /// 保存失败。仅当失败的是最新版本时回滚，返回是否发生了回滚。
    pub fn reject(&mut self, question_id: &str, version: u64, reason: impl Into<String>) -> bool {
        match self.slots.get_mut(question_id) {
            Some(slot) if slot.version == version => {
                slot.current = slot.confirmed.clone();
                slot.status = Some(SyncStatus::Failed {
                    reason: reason.into(),
                });
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerRecord> {
        self.slots.get(question_id).and_then(|slot| slot.current.as_ref())
    }

    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.get(question_id).map(|record| &record.answer)
    }

    pub fn status(&self, question_id: &str) -> Option<&SyncStatus> {
        self.slots.get(question_id).and_then(|slot| slot.status.as_ref())
    }

    /// 当前所有已作答的记录，按题目ID排序
    pub fn records(&self) -> Vec<AnswerRecord> {
        let mut records: Vec<AnswerRecord> = self
            .slots
            .values()
            .filter_map(|slot| slot.current.clone())
            .collect();
        records.sort_by(|a, b| a.question_id.cmp(&b.question_id));
        records
    }

    pub fn answered_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.current.is_some()).count()
    }

    /// 保存失败、等待用户重新编辑的题目
    pub fn failed_questions(&self) -> Vec<String> {
        let mut failed: Vec<String> = self
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot.status, Some(SyncStatus::Failed { .. })))
            .map(|(id, _)| id.clone())
            .collect();
        failed.sort();
        failed
    }
}
