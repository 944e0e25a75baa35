use serde::{Deserialize, Serialize};

/// 所有派生分值的上限
pub const SCORE_MAX: f64 = 100.0;

/// 将分值限制在 [0, 100]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, SCORE_MAX)
}

/// 四项性格倾向分值
///
/// 每一项都是当前草稿统计的确定性函数，始终位于 [0, 100]。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TraitProfile {
    /// 平静（对立面：动荡）
    pub calm: f64,
    /// 开放（对立面：戒备）
    pub open: f64,
    /// 自信（对立面：犹疑）
    pub confident: f64,
    /// 感性（对立面：理性）
    pub emotional: f64,
}

impl TraitProfile {
    pub fn new(calm: f64, open: f64, confident: f64, emotional: f64) -> Self {
        Self {
            calm: clamp_score(calm),
            open: clamp_score(open),
            confident: clamp_score(confident),
            emotional: clamp_score(emotional),
        }
    }
}

impl Default for TraitProfile {
    fn default() -> Self {
        Self::new(50.0, 50.0, 50.0, 50.0)
    }
}

/// 五轴描述画像，与 [`TraitProfile`] 相互独立
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AffectProfile {
    pub expression: f64,
    pub depth: f64,
    pub clarity: f64,
    pub introspection: f64,
    pub energy: f64,
}

impl AffectProfile {
    pub fn new(expression: f64, depth: f64, clarity: f64, introspection: f64, energy: f64) -> Self {
        Self {
            expression: clamp_score(expression),
            depth: clamp_score(depth),
            clarity: clamp_score(clarity),
            introspection: clamp_score(introspection),
            energy: clamp_score(energy),
        }
    }

    /// 按雷达图顺序输出 (轴名, 分值)
    pub fn axes(&self) -> [(&'static str, f64); 5] {
        [
            ("expression", self.expression),
            ("depth", self.depth),
            ("clarity", self.clarity),
            ("introspection", self.introspection),
            ("energy", self.energy),
        ]
    }
}

impl Default for AffectProfile {
    fn default() -> Self {
        Self::new(50.0, 50.0, 50.0, 50.0, 50.0)
    }
}
