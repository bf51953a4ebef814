pub mod config; // 流水线配置参数
pub mod tracking; // 每帧跟踪编排核心

pub use crate::config::TrackConfig;
pub use crate::tracking::{
    build_detections, crop_regions, suppress, DeepSort, Detection, FeatureExtractor, Tlbr, Tlwh,
    Track, TrackRecord, TrackState, Tracker, Xywh,
};
