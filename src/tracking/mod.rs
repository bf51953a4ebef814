/// 跟踪系统 (Tracking System)
///
/// 每帧编排核心与其协作者接口
/// - types:     边界框表示与检测记录
/// - nms:       冗余检测抑制
/// - features:  外观特征提取接口
/// - tracker:   跟踪器接口与只读轨迹记录
/// - deep_sort: 每帧编排 (predict -> update -> 输出过滤 -> 投影)
pub mod deep_sort;
pub mod features;
pub mod nms;
pub mod tracker;
pub mod types;

pub use deep_sort::DeepSort;
pub use features::{crop_regions, FeatureExtractor};
pub use nms::suppress;
pub use tracker::{Track, TrackState, Tracker};
pub use types::{build_detections, Detection, Tlbr, Tlwh, TrackRecord, Xywh};
