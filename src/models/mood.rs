use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// 情绪标签
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joyful,
    Melancholic,
    Intense,
    Peaceful,
    Restless,
    Reflective,
    Contemplative,
    Neutral,
}

impl Emotion {
    /// 每个情绪标签对应的展示颜色
    pub fn color(&self) -> Rgb {
        match self {
            Emotion::Joyful => Rgb::new(0xfb, 0xbf, 0x24),
            Emotion::Melancholic => Rgb::new(0x60, 0xa5, 0xfa),
            Emotion::Intense => Rgb::new(0xf8, 0x71, 0x71),
            Emotion::Peaceful => Rgb::new(0x4a, 0xde, 0x80),
            Emotion::Restless => Rgb::new(0xa7, 0x8b, 0xfa),
            Emotion::Reflective => Rgb::new(0x4a, 0xde, 0x80),
            Emotion::Contemplative => Rgb::new(0x60, 0xa5, 0xfa),
            Emotion::Neutral => Rgb::new(0x4a, 0xde, 0x80),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joyful => "joyful",
            Emotion::Melancholic => "melancholic",
            Emotion::Intense => "intense",
            Emotion::Peaceful => "peaceful",
            Emotion::Restless => "restless",
            Emotion::Reflective => "reflective",
            Emotion::Contemplative => "contemplative",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RGB 颜色，序列化为 `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 十六进制表示，例如 `#4ade80`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(AppError::Validation(format!("Invalid hex color: {}", s)));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| AppError::Validation(format!("Invalid hex color: {}", s)))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 当前情绪状态
///
/// 标签与颜色只能一起更新：唯一的构造途径是从 [`Emotion`] 派生。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "MoodStateHelper", into = "MoodStateHelper")]
pub struct MoodState {
    emotion: Emotion,
    color: Rgb,
}

impl MoodState {
    pub fn new(emotion: Emotion) -> Self {
        Self {
            emotion,
            color: emotion.color(),
        }
    }

    /// 会话初始及自动回退后的情绪
    pub fn neutral() -> Self {
        Self::new(Emotion::Neutral)
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_neutral(&self) -> bool {
        self.emotion == Emotion::Neutral
    }
}

impl Default for MoodState {
    fn default() -> Self {
        Self::neutral()
    }
}

/// 情绪状态序列化辅助
#[derive(Serialize, Deserialize)]
struct MoodStateHelper {
    emotion: Emotion,
    color: Rgb,
}

impl TryFrom<MoodStateHelper> for MoodState {
    type Error = AppError;

    fn try_from(helper: MoodStateHelper) -> Result<Self, Self::Error> {
        let mood = MoodState::new(helper.emotion);
        if mood.color != helper.color {
            return Err(AppError::Validation(format!(
                "Color {} does not match emotion {}",
                helper.color, helper.emotion
            )));
        }
        Ok(mood)
    }
}

impl From<MoodState> for MoodStateHelper {
    fn from(mood: MoodState) -> Self {
        MoodStateHelper {
            emotion: mood.emotion,
            color: mood.color,
        }
    }
}
