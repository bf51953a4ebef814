//! 外观特征提取接口 (appearance feature extraction seam)
//!
//! 特征提取器是外部协作者 (ReID 模型推理),本核心只依赖下面的
//! trait,测试时可替换为返回固定向量的桩实现。

use anyhow::Result;
use image::{imageops, RgbImage};
use ndarray::Array1;

use super::types::Tlbr;

/// 批量特征提取器
///
/// 输入任意尺寸的图像裁剪,输出等长等序的定长特征向量。
/// 空输入必须返回空输出,不是错误。
pub trait FeatureExtractor {
    fn extract(&mut self, crops: &[RgbImage]) -> Result<Vec<Array1<f32>>>;
}

/// 从整帧图像中截取每个检测框对应的区域
///
/// 区域在截取前被裁剪到图像范围内 (image 的访问带边界检查,
/// 不能像 numpy 切片那样越界)。零面积区域产生 0x0 裁剪,
/// 仍然会传给提取器,由提取器决定如何处理。
pub fn crop_regions(frame: &RgbImage, bbox_tlbr: &[Tlbr]) -> Vec<RgbImage> {
    let (fw, fh) = frame.dimensions();

    bbox_tlbr
        .iter()
        .map(|b| {
            let x1 = (b.x1 as i64).clamp(0, fw as i64) as u32;
            let y1 = (b.y1 as i64).clamp(0, fh as i64) as u32;
            let x2 = (b.x2 as i64).clamp(x1 as i64, fw as i64) as u32;
            let y2 = (b.y2 as i64).clamp(y1 as i64, fh as i64) as u32;
            imageops::crop_imm(frame, x1, y1, x2 - x1, y2 - y1).to_image()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_regions_count_and_size() {
        let frame = RgbImage::new(100, 80);
        let boxes = vec![Tlbr::new(10.0, 10.0, 30.0, 50.0), Tlbr::new(0.0, 0.0, 100.0, 80.0)];
        let crops = crop_regions(&frame, &boxes);
        assert_eq!(crops.len(), 2);
        assert_eq!(crops[0].dimensions(), (20, 40));
        assert_eq!(crops[1].dimensions(), (100, 80));
    }

    #[test]
    fn test_crop_regions_out_of_bounds_clamped() {
        let frame = RgbImage::new(100, 80);
        let crops = crop_regions(&frame, &[Tlbr::new(-10.0, -10.0, 200.0, 200.0)]);
        assert_eq!(crops[0].dimensions(), (100, 80));
    }

    #[test]
    fn test_crop_regions_zero_extent_still_produces_crop() {
        let frame = RgbImage::new(100, 80);
        let crops = crop_regions(&frame, &[Tlbr::new(50.0, 50.0, 50.0, 50.0)]);
        assert_eq!(crops.len(), 1);
        assert_eq!(crops[0].dimensions(), (0, 0));
    }

    #[test]
    fn test_crop_regions_empty_input() {
        let frame = RgbImage::new(100, 80);
        assert!(crop_regions(&frame, &[]).is_empty());
    }
}
