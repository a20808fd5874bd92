use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 问卷分类（落地页上的三条路径）
///
/// 声明顺序即优先级：得分相同时排在前面的分类胜出。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 市场理解
    Market,
    /// 竞争情报
    Competitors,
    /// 趋势预测
    Prediction,
}

static CATEGORY_KEYS: phf::Map<&'static str, Category> = phf_map! {
    "market" => Category::Market,
    "competitors" => Category::Competitors,
    "prediction" => Category::Prediction,
};

impl Category {
    /// 所有分类，按声明顺序
    pub const ALL: [Category; 3] = [
        Category::Market,
        Category::Competitors,
        Category::Prediction,
    ];

    /// 分类键，用于拼接片段路径
    pub fn key(self) -> &'static str {
        match self {
            Category::Market => "market",
            Category::Competitors => "competitors",
            Category::Prediction => "prediction",
        }
    }

    /// 结果页展示名称
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Market => "Market Understanding",
            Category::Competitors => "Competitive Intelligence",
            Category::Prediction => "Trend Prediction",
        }
    }

    /// 在 `ALL` 中的位置
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// 从分类键解析（精确匹配，忽略大小写和首尾空白）
    pub fn from_key(key: &str) -> Option<Self> {
        CATEGORY_KEYS
            .get(key.trim().to_ascii_lowercase().as_str())
            .copied()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Category {
    type Err = crate::error::QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| crate::error::QuizError::UnknownCategory {
            key: s.to_string(),
        })
    }
}
