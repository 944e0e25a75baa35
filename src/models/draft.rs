use serde::{Deserialize, Serialize};

/// 正在编辑、尚未提交的文本
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draft {
    text: String,
}

impl Draft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// 按空白切分的词序列
    pub fn words(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    /// 字符长度（非字节长度）
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 去除首尾空白后是否为空
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// 是否刚刚完成一个词（以空白结尾）
    pub fn ends_at_word_boundary(&self) -> bool {
        self.text.chars().last().is_some_and(char::is_whitespace)
    }
}

/// 草稿的表层统计，由分类器与画像计算共享
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TextStats {
    pub word_count: usize,
    /// 平均词长（字符）；空文本为 0
    pub avg_word_length: f64,
    pub exclamation_count: usize,
    pub question_count: usize,
    /// 以 `.` `!` `?` 切分后的非空句子数
    pub sentence_count: usize,
}

impl TextStats {
    pub fn from_text(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();
        let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();

        let sentence_count = text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count();

        Self {
            word_count,
            avg_word_length: total_chars as f64 / word_count.max(1) as f64,
            exclamation_count: text.matches('!').count(),
            question_count: text.matches('?').count(),
            sentence_count,
        }
    }

    /// 作为除数使用的词数，空文本按 1 计
    pub fn word_divisor(&self) -> f64 {
        self.word_count.max(1) as f64
    }
}
