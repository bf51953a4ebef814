//! 跟踪流水线配置参数
//! Construction-time configuration for the tracking pipeline

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 跟踪配置
///
/// `min_confidence` 和 `nms_max_overlap` 由编排核心消费;
/// 其余参数 (外观距离预算、关联门限、轨迹寿命) 传给外部跟踪器
/// 的构造方。默认值即参考实现默认值。
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// 检测置信度下限 (严格大于才保留)
    pub min_confidence: f32,

    /// NMS 重叠率阈值,1.0 等价于不抑制
    pub nms_max_overlap: f32,

    /// 外观特征最大余弦距离 (关联门限)
    pub max_dist: f32,

    /// IOU 关联最大距离
    pub max_iou_distance: f32,

    /// 轨迹最大丢失帧数,超过后删除
    pub max_age: u32,

    /// 连续匹配多少帧后确认轨迹
    pub n_init: u32,

    /// 每条轨迹保留的外观特征样本数
    pub nn_budget: usize,

    /// 特征提取模型路径 (由提取器实现方解释)
    pub model_path: Option<String>,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            nms_max_overlap: 1.0,
            max_dist: 0.2,
            max_iou_distance: 0.7,
            max_age: 70,
            n_init: 3,
            nn_budget: 100,
            model_path: None,
        }
    }
}

impl TrackConfig {
    /// 从JSON文件加载配置,缺省字段使用默认值
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let c = TrackConfig::default();
        assert_eq!(c.min_confidence, 0.3);
        assert_eq!(c.nms_max_overlap, 1.0);
        assert_eq!(c.max_dist, 0.2);
        assert_eq!(c.max_iou_distance, 0.7);
        assert_eq!(c.max_age, 70);
        assert_eq!(c.n_init, 3);
        assert_eq!(c.nn_budget, 100);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: TrackConfig = serde_json::from_str(r#"{"min_confidence": 0.5}"#).unwrap();
        assert_eq!(c.min_confidence, 0.5);
        assert_eq!(c.max_age, 70);
    }
}
