//! 核心数据模型模块
//!
//! 定义 Moodlog 的核心数据结构：Draft, MoodState, TraitProfile, AffectProfile, Moment。

pub mod draft;
pub mod moment;
pub mod mood;
pub mod profile;

pub use draft::*;
pub use moment::*;
pub use mood::*;
pub use profile::*;
