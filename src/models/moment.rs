use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::mood::{Emotion, MoodState, Rgb};

/// 时刻唯一标识，由存储按提交顺序单调分配
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct MomentId(pub u64);

impl fmt::Display for MomentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 已提交的文本片段及其情绪快照
///
/// 创建后 `id` 与 `created_at` 不可变，只有文本可以被编辑。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Moment {
    id: MomentId,
    text: String,
    mood: MoodState,
    created_at: DateTime<Utc>,
}

impl Moment {
    /// 创建新时刻，调用方保证 `text` 已去除首尾空白且非空
    pub(crate) fn new(id: MomentId, text: String, mood: MoodState, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            mood,
            created_at,
        }
    }

    pub fn id(&self) -> MomentId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn emotion(&self) -> Emotion {
        self.mood.emotion()
    }

    pub fn color(&self) -> Rgb {
        self.mood.color()
    }

    pub fn mood(&self) -> MoodState {
        self.mood
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn replace_text(&mut self, text: String) {
        self.text = text;
    }
}
