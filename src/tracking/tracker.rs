//! 跟踪器接口与只读跟踪记录
//! Tracker seam and the read-only track record
//!
//! 轨迹生命周期 (运动预测、关联匹配、新建/删除) 由外部跟踪器
//! 实现;本核心只通过 `Tracker` trait 驱动它,并在更新后只读地
//! 遍历其轨迹集合。

use super::types::{Detection, Tlwh};

// ========== 轨迹状态 ==========

/// 轨迹生命周期状态
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackState {
    /// 新建,尚未连续匹配足够帧数
    Tentative,
    /// 已确认存在
    Confirmed,
    /// 超过最大丢失帧数,等待移除
    Deleted,
}

// ========== 跟踪记录 ==========

/// 跨帧持续的对象假设 (由外部跟踪器拥有和修改,本核心只读)
#[derive(Clone, Debug)]
pub struct Track {
    /// 唯一跟踪ID (存活期间不变,同时存活的轨迹间唯一)
    pub track_id: u32,

    /// 当前边界框 (tlwh),只被跟踪器的更新步骤整体替换
    pub tlwh: Tlwh,

    /// 生命周期状态
    pub state: TrackState,

    /// 距离上次匹配到检测的帧数
    pub time_since_update: u32,

    /// 是否已经在之前的输出中报告过
    pub inserted: bool,
}

impl Track {
    pub fn is_tentative(&self) -> bool {
        self.state == TrackState::Tentative
    }

    pub fn is_confirmed(&self) -> bool {
        self.state == TrackState::Confirmed
    }

    pub fn is_deleted(&self) -> bool {
        self.state == TrackState::Deleted
    }

    pub fn is_inserted(&self) -> bool {
        self.inserted
    }

    pub fn to_tlwh(&self) -> Tlwh {
        self.tlwh
    }
}

// ========== 跟踪器统一接口 ==========

/// 多目标跟踪器 Trait
///
/// 每帧调用顺序固定: 先 `predict`,再 `update`,然后读 `tracks`。
pub trait Tracker {
    /// 推进所有轨迹的运动模型一个时间步 (不消费检测)
    fn predict(&mut self);

    /// 关联检测与轨迹,更新轨迹集合 (匹配、状态迁移、新建/删除)
    fn update(&mut self, detections: &[Detection]);

    /// 当前轨迹集合 (只读)
    fn tracks(&self) -> &[Track];
}
