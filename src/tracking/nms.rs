//! 冗余检测抑制 (greedy non-maximum suppression)
//!
//! 按置信度降序贪心抑制: 保留当前最高分候选,丢弃与其重叠率
//! 超过阈值的其余候选,直到没有剩余候选。

use super::types::Tlwh;

/// 贪心NMS,返回保留的索引 (相对于输入数组)
///
/// 纯函数,无共享状态。返回顺序为置信度降序,索引可无歧义地
/// 映射回原始检测列表。阈值为 1.0 时等价于不抑制 (IOU 不会超过 1)。
pub fn suppress(boxes: &[Tlwh], overlap_threshold: f32, scores: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap());

    let mut keep = Vec::new();
    for &index in &order {
        let mut drop = false;
        for &kept in &keep {
            let iou = boxes[index].iou(&boxes[kept]);
            if iou > overlap_threshold {
                drop = true;
                break;
            }
        }
        if !drop {
            keep.push(index);
        }
    }
    keep
}
