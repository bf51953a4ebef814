//! DeepSort 每帧编排核心
//! Per-frame orchestration: features -> detections -> NMS -> predict/update -> output
//!
//! 每帧固定顺序,顺序错误会静默破坏跟踪质量:
//! 1. 截取检测区域,批量提取外观特征
//! 2. 构建检测记录 (置信度下限过滤)
//! 3. NMS 去除冗余重叠检测
//! 4. 跟踪器 predict (先于任何检测消费,每帧恰好一次)
//! 5. 跟踪器 update (关联匹配,状态迁移,对本帧不可分割)
//! 6. 输出过滤 + 投影为整数像素坐标

use anyhow::Result;
use image::RgbImage;

use super::features::{crop_regions, FeatureExtractor};
use super::nms::suppress;
use super::tracker::Tracker;
use super::types::{build_detections, Tlbr, TrackRecord};
use crate::config::TrackConfig;

/// 跟踪流水线编排器
///
/// 特征提取器和跟踪器通过构造注入;轨迹集合由跟踪器独占拥有,
/// 本编排器在 update 返回后只读地遍历它,不跨帧保留引用。
/// `update` 不可重入: 单线程,一帧完整处理完才能进入下一帧。
pub struct DeepSort<E: FeatureExtractor, T: Tracker> {
    min_confidence: f32,
    nms_max_overlap: f32,
    extractor: E,
    tracker: T,
}

impl<E: FeatureExtractor, T: Tracker> DeepSort<E, T> {
    pub fn new(config: &TrackConfig, extractor: E, tracker: T) -> Self {
        Self {
            min_confidence: config.min_confidence,
            nms_max_overlap: config.nms_max_overlap,
            extractor,
            tracker,
        }
    }

    /// 处理一帧: 原始检测 + 置信度 + 当前帧图像 -> 可见轨迹记录
    ///
    /// 返回的集合可能为空,这是"本帧无可见目标"的正常情况,
    /// 不是错误。唯一的可失败步骤是特征提取;提取失败时整帧
    /// 视为失败,轨迹状态未被触碰,下一帧可直接重试。
    pub fn update(
        &mut self,
        bbox_tlbr: &[Tlbr],
        confidences: &[f32],
        frame: &RgbImage,
    ) -> Result<Vec<TrackRecord>> {
        let (width, height) = frame.dimensions();

        // 生成检测记录
        let crops = crop_regions(frame, bbox_tlbr);
        let features = self.extractor.extract(&crops)?;
        let detections = build_detections(bbox_tlbr, confidences, features, self.min_confidence);

        // NMS 去冗余
        let boxes: Vec<_> = detections.iter().map(|d| d.tlwh).collect();
        let scores: Vec<_> = detections.iter().map(|d| d.confidence).collect();
        let indices = suppress(&boxes, self.nms_max_overlap, &scores);
        let detections: Vec<_> = indices.into_iter().map(|i| detections[i].clone()).collect();

        // 更新跟踪器
        self.tracker.predict();
        self.tracker.update(&detections);

        // 输出可见轨迹: 已确认且最多一帧未匹配
        let outputs = self
            .tracker
            .tracks()
            .iter()
            .filter(|track| track.is_confirmed() && track.time_since_update <= 1)
            .map(|track| {
                let (x1, y1, x2, y2) = track.to_tlwh().to_xyxy(width, height);
                TrackRecord {
                    x1,
                    y1,
                    x2,
                    y2,
                    track_id: track.track_id,
                }
            })
            .collect();

        Ok(outputs)
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }
}
