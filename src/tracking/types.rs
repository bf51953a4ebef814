//! 跟踪系统数据结构定义
//! Data structures for the tracking pipeline
//!
//! 三种边界框表示 (three box representations):
//! - `Tlbr`: 检测器输出 (x1, y1, x2, y2)
//! - `Tlwh`: 跟踪器/NMS 内部表示 (x, y, w, h)
//! - `Xywh`: 运动模型表示 (center_x, center_y, w, h)
//!
//! 三种表示之间只能通过显式转换函数互转,避免隐式混用。

use ndarray::Array1;
use serde::{Deserialize, Serialize};

// ========== 边界框类型 ==========

/// 检测框 (top-left / bottom-right corners)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tlbr {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// 检测框 (top-left corner + width/height)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tlwh {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// 检测框 (center + width/height)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Xywh {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
}

impl Tlbr {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// 转换为 tlwh 表示
    ///
    /// 前提条件: x2 >= x1, y2 >= y1 (负宽高是调用方错误,不在此处纠正)
    pub fn to_tlwh(&self) -> Tlwh {
        Tlwh {
            x: self.x1,
            y: self.y1,
            w: self.x2 - self.x1,
            h: self.y2 - self.y1,
        }
    }

    /// 转换为中心点表示
    ///
    /// 中心和宽高必须取自同一对角点,不允许混用坐标轴。
    pub fn to_xywh(&self) -> Xywh {
        Xywh {
            cx: (self.x1 + self.x2) / 2.0,
            cy: (self.y1 + self.y2) / 2.0,
            w: self.x2 - self.x1,
            h: self.y2 - self.y1,
        }
    }
}

impl Xywh {
    /// 转换为 tlwh 表示
    pub fn to_tlwh(&self) -> Tlwh {
        Tlwh {
            x: self.cx - self.w / 2.0,
            y: self.cy - self.h / 2.0,
            w: self.w,
            h: self.h,
        }
    }

    /// 批量转换 (不修改输入,返回新数组)
    pub fn batch_to_tlwh(boxes: &[Xywh]) -> Vec<Tlwh> {
        boxes.iter().map(Xywh::to_tlwh).collect()
    }
}

impl Tlwh {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    fn intersection_area(&self, another: &Tlwh) -> f32 {
        let l = self.x.max(another.x);
        let r = (self.x + self.w).min(another.x + another.w);
        let t = self.y.max(another.y);
        let b = (self.y + self.h).min(another.y + another.h);

        if r <= l || b <= t {
            return 0.0;
        }
        (r - l) * (b - t)
    }

    /// 计算两个边界框的IOU (Intersection over Union)
    pub fn iou(&self, another: &Tlwh) -> f32 {
        let intersection = self.intersection_area(another);
        let union = self.area() + another.area() - intersection;

        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }

    /// 投影为整数像素坐标 (x1, y1, x2, y2),裁剪到图像范围内
    ///
    /// 整数截断只发生在这一步,之前的所有坐标都保持浮点。
    /// x1 = max(x, 0); x2 = min(x+w, width-1); y 同理。
    pub fn to_xyxy(&self, frame_width: u32, frame_height: u32) -> (i32, i32, i32, i32) {
        let x1 = (self.x as i32).max(0);
        let x2 = ((self.x + self.w) as i32).min(frame_width as i32 - 1);
        let y1 = (self.y as i32).max(0);
        let y2 = ((self.y + self.h) as i32).min(frame_height as i32 - 1);
        (x1, y1, x2, y2)
    }
}

// ========== 检测与输出记录 ==========

/// 单帧检测记录 (detection in a single frame)
///
/// 每帧从原始输入重新构建,帧结束即丢弃,构建后不再修改。
/// 置信度低于下限的检测不会被创建 (见 `build_detections`)。
#[derive(Clone, Debug)]
pub struct Detection {
    /// 边界框 (tlwh)
    pub tlwh: Tlwh,

    /// 检测置信度 [0, 1]
    pub confidence: f32,

    /// 外观特征向量 (由外部提取器计算,构建时一次性赋值)
    pub feature: Array1<f32>,
}

impl Detection {
    pub fn new(tlwh: Tlwh, confidence: f32, feature: Array1<f32>) -> Self {
        Self {
            tlwh,
            confidence,
            feature,
        }
    }
}

/// 可见跟踪输出记录 (x1, y1, x2, y2, track_id)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub track_id: u32,
}

// ========== 检测构建 ==========

/// 从原始检测构建 Detection 记录,应用置信度下限
///
/// 只保留 confidence 严格大于 min_confidence 的检测,
/// 幸存检测保持输入顺序。三个输入数组等长由调用方保证。
pub fn build_detections(
    bbox_tlbr: &[Tlbr],
    confidences: &[f32],
    features: Vec<Array1<f32>>,
    min_confidence: f32,
) -> Vec<Detection> {
    bbox_tlbr
        .iter()
        .zip(confidences.iter())
        .zip(features)
        .filter(|((_, conf), _)| **conf > min_confidence)
        .map(|((tlbr, &conf), feature)| Detection::new(tlbr.to_tlwh(), conf, feature))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_tlbr_to_tlwh() {
        let b = Tlbr::new(10.0, 20.0, 50.0, 80.0);
        let t = b.to_tlwh();
        assert_eq!(t, Tlwh::new(10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn test_tlbr_to_xywh_consistent_axes() {
        let b = Tlbr::new(10.0, 20.0, 50.0, 80.0);
        let c = b.to_xywh();
        assert_eq!(c.cx, 30.0);
        assert_eq!(c.cy, 50.0);
        assert_eq!(c.w, 40.0);
        assert_eq!(c.h, 60.0);
    }

    #[test]
    fn test_xywh_to_tlwh_batch_copy_semantics() {
        let src = vec![
            Xywh {
                cx: 30.0,
                cy: 50.0,
                w: 40.0,
                h: 60.0,
            },
            Xywh {
                cx: 5.0,
                cy: 5.0,
                w: 10.0,
                h: 10.0,
            },
        ];
        let out = Xywh::batch_to_tlwh(&src);
        assert_eq!(out[0], Tlwh::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(out[1], Tlwh::new(0.0, 0.0, 10.0, 10.0));
        // 输入未被修改
        assert_eq!(src[0].cx, 30.0);
    }

    #[test]
    fn test_tlwh_to_xyxy_clamps_to_frame() {
        // 640x480 的帧,任何输入都被裁剪到 [0, 639] x [0, 479]
        let b = Tlwh::new(-20.0, -10.0, 1000.0, 1000.0);
        let (x1, y1, x2, y2) = b.to_xyxy(640, 480);
        assert_eq!((x1, y1, x2, y2), (0, 0, 639, 479));
    }

    #[test]
    fn test_round_trip_up_to_clamping() {
        // tlbr -> tlwh -> xyxy 还原原始框 (在帧范围内时)
        let b = Tlbr::new(10.0, 20.0, 50.0, 80.0);
        let (x1, y1, x2, y2) = b.to_tlwh().to_xyxy(640, 480);
        assert_eq!((x1, y1, x2, y2), (10, 20, 50, 80));
    }

    #[test]
    fn test_iou_identical_and_disjoint() {
        let a = Tlwh::new(0.0, 0.0, 10.0, 10.0);
        let b = Tlwh::new(0.0, 0.0, 10.0, 10.0);
        let c = Tlwh::new(100.0, 100.0, 10.0, 10.0);
        assert!((a.iou(&b) - 1.0).abs() < 1e-6);
        assert_eq!(a.iou(&c), 0.0);
    }

    #[test]
    fn test_iou_touching_boxes_do_not_overlap() {
        let a = Tlwh::new(0.0, 0.0, 10.0, 10.0);
        let b = Tlwh::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_build_detections_strict_floor() {
        // 下限 0.3: 恰好 0.3 的检测被丢弃,只有索引 1 和 3 幸存
        let boxes = vec![
            Tlbr::new(0.0, 0.0, 10.0, 10.0),
            Tlbr::new(20.0, 0.0, 30.0, 10.0),
            Tlbr::new(40.0, 0.0, 50.0, 10.0),
            Tlbr::new(60.0, 0.0, 70.0, 10.0),
        ];
        let confidences = vec![0.1, 0.5, 0.3, 0.9];
        let features = (0..4).map(|i| arr1(&[i as f32])).collect();

        let dets = build_detections(&boxes, &confidences, features, 0.3);
        assert_eq!(dets.len(), 2);
        assert_eq!(dets[0].confidence, 0.5);
        assert_eq!(dets[1].confidence, 0.9);
        // 顺序和特征与输入索引保持对应
        assert_eq!(dets[0].feature[0], 1.0);
        assert_eq!(dets[1].feature[0], 3.0);
    }

    #[test]
    fn test_build_detections_empty_input() {
        let dets = build_detections(&[], &[], Vec::new(), 0.3);
        assert!(dets.is_empty());
    }
}
