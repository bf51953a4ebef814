use anyhow::{Context, Result};
/// 检测回放 (Detection Replay)
///
/// 从JSON文件读取逐帧检测结果,跑完整跟踪流水线并打印可见轨迹。
/// 特征提取器为固定向量桩,跟踪器为演示用贪心IOU跟踪器;
/// 两者都只用于回放演示,库本身只定义它们的接口。
///
/// 运行: cargo run --bin replay -- --input frames.json
use clap::Parser;
use image::RgbImage;
use ndarray::Array1;
use serde::Deserialize;

use tracklite::{
    DeepSort, Detection, FeatureExtractor, Tlbr, Track, TrackConfig, TrackState, Tracker,
};

/// 检测回放程序
#[derive(Parser, Debug)]
#[command(author, version, about = "跟踪流水线检测回放", long_about = None)]
struct Args {
    /// 逐帧检测JSON文件 (数组,每项含 boxes 和 confidences)
    #[arg(short, long)]
    input: String,

    /// 帧宽度 (像素)
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// 帧高度 (像素)
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// 可选配置文件 (JSON,缺省字段用默认值)
    #[arg(short, long)]
    config: Option<String>,
}

/// 一帧的原始检测输入
#[derive(Debug, Deserialize)]
struct FrameInput {
    /// tlbr 检测框 [[x1,y1,x2,y2], ...]
    boxes: Vec<[f32; 4]>,
    /// 逐框置信度
    confidences: Vec<f32>,
}

// ========== 演示用桩实现 ==========

/// 固定向量特征提取器 (无模型推理,回放演示用)
struct StubExtractor {
    dim: usize,
}

impl FeatureExtractor for StubExtractor {
    fn extract(&mut self, crops: &[RgbImage]) -> Result<Vec<Array1<f32>>> {
        Ok(crops.iter().map(|_| Array1::zeros(self.dim)).collect())
    }
}

/// 演示用贪心IOU跟踪器
///
/// 最小化的 Tracker 实现: 预测为恒等运动,关联为按IOU代价贪心匹配,
/// 连续匹配 n_init 帧确认,丢失超过 max_age 帧删除。
struct GreedyIouTracker {
    tracks: Vec<Track>,
    /// 逐轨迹连续匹配计数 (与 tracks 等长)
    hits: Vec<u32>,
    next_id: u32,
    max_iou_distance: f32,
    max_age: u32,
    n_init: u32,
}

impl GreedyIouTracker {
    fn new(config: &TrackConfig) -> Self {
        Self {
            tracks: Vec::new(),
            hits: Vec::new(),
            next_id: 1,
            max_iou_distance: config.max_iou_distance,
            max_age: config.max_age,
            n_init: config.n_init,
        }
    }
}

impl Tracker for GreedyIouTracker {
    fn predict(&mut self) {
        // 恒等运动模型: 只推进时间
        for track in &mut self.tracks {
            track.time_since_update += 1;
        }
    }

    fn update(&mut self, detections: &[Detection]) {
        // IOU贪心匹配: 候选按代价升序,检测和轨迹各用一次
        let mut candidates = Vec::new();
        for (d, det) in detections.iter().enumerate() {
            for (t, track) in self.tracks.iter().enumerate() {
                let cost = 1.0 - det.tlwh.iou(&track.tlwh);
                if cost <= self.max_iou_distance {
                    candidates.push((cost, d, t));
                }
            }
        }
        candidates.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        let mut used_det = vec![false; detections.len()];
        let mut used_track = vec![false; self.tracks.len()];
        for (_, d, t) in candidates {
            if used_det[d] || used_track[t] {
                continue;
            }
            used_det[d] = true;
            used_track[t] = true;

            let track = &mut self.tracks[t];
            track.tlwh = detections[d].tlwh;
            track.time_since_update = 0;
            self.hits[t] += 1;
            if track.state == TrackState::Tentative && self.hits[t] >= self.n_init {
                track.state = TrackState::Confirmed;
            }
        }

        // 未匹配轨迹: 未确认的直接删除,确认的超龄后删除
        for (t, &used) in used_track.iter().enumerate() {
            if used {
                continue;
            }
            let track = &mut self.tracks[t];
            if track.state == TrackState::Tentative || track.time_since_update > self.max_age {
                track.state = TrackState::Deleted;
            }
        }

        // 未匹配检测 -> 新建轨迹
        for (d, &used) in used_det.iter().enumerate() {
            if !used {
                self.tracks.push(Track {
                    track_id: self.next_id,
                    tlwh: detections[d].tlwh,
                    state: TrackState::Tentative,
                    time_since_update: 0,
                    inserted: false,
                });
                self.hits.push(1);
                self.next_id += 1;
            }
        }

        // 移除已删除轨迹;确认过的轨迹标记为已输出
        let tracks = std::mem::take(&mut self.tracks);
        let hits = std::mem::take(&mut self.hits);
        for (mut track, h) in tracks.into_iter().zip(hits) {
            if track.is_deleted() {
                continue;
            }
            if track.is_confirmed() {
                track.inserted = true;
            }
            self.tracks.push(track);
            self.hits.push(h);
        }
    }

    fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TrackConfig::from_json_file(path)?,
        None => TrackConfig::default(),
    };

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("读取检测文件失败: {}", args.input))?;
    let frames: Vec<FrameInput> = serde_json::from_str(&text).context("解析检测文件失败")?;

    println!(
        "🎯 跟踪回放: {} 帧, {}x{}",
        frames.len(),
        args.width,
        args.height
    );

    let tracker = GreedyIouTracker::new(&config);
    let extractor = StubExtractor { dim: 128 };
    let mut pipeline = DeepSort::new(&config, extractor, tracker);

    // 回放不含真实图像,用空白帧承载尺寸信息
    let frame = RgbImage::new(args.width, args.height);

    for (index, input) in frames.iter().enumerate() {
        let boxes: Vec<Tlbr> = input
            .boxes
            .iter()
            .map(|&[x1, y1, x2, y2]| Tlbr::new(x1, y1, x2, y2))
            .collect();

        let outputs = pipeline.update(&boxes, &input.confidences, &frame)?;

        println!("帧 {:04}: {} 个可见轨迹", index, outputs.len());
        for record in &outputs {
            println!(
                "  id={} box=({}, {}, {}, {})",
                record.track_id, record.x1, record.y1, record.x2, record.y2
            );
        }
    }

    Ok(())
}
