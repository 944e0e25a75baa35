//! Moodlog - 情绪推断与时刻生命周期引擎
//!
//! 在用户书写日记时增量分析文本，推断情绪、计算性格与情感画像、追踪反复出现的词语，
//! 并在提交时将文本片段连同情绪快照保存为“时刻”。渲染层只负责展示这里产生的数据。

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
