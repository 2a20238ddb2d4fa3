//! The calling layer around `pixelate`.
//!
//! A dot renderer wants more than the point cloud: an identifier for the
//! animation, how many frames a dot takes to travel, and how much of the
//! cloud to show. Those values are supplied here and merged next to the
//! cloud. This layer is also where randomness lives: the resolution can be
//! drawn from a candidate set so repeated visits look different, while
//! `pixelate` itself stays deterministic.

use crate::{PointCloudConfig, DEFAULT_RESOLUTION};
use log::warn;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Resolutions picked from when the caller does not fix one.
pub const DEFAULT_RESOLUTION_CANDIDATES: [u32; 4] = [2, 3, 10, 20];

/// Default number of frames a dot takes to reach its target.
pub const DEFAULT_FRAME_LENGTH: u32 = 10;

/// Default share of the cloud that is shown, in percent.
pub const DEFAULT_CUTOFF_PERCENTAGE: u32 = 100;

/// Pick a resolution uniformly at random from `candidates`.
///
/// An empty candidate list yields `DEFAULT_RESOLUTION`.
pub fn pick_resolution<R: Rng + ?Sized>(candidates: &[u32], rng: &mut R) -> u32 {
    match candidates.choose(rng) {
        Some(&resolution) => resolution,
        None => {
            warn!(
                "no resolution candidates given, using {}",
                DEFAULT_RESOLUTION
            );
            DEFAULT_RESOLUTION
        }
    }
}

/// Point cloud plus the animation settings a dot renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub cloud: PointCloudConfig,
    pub frame_length: u32,
    pub cutoff_percentage: u32,
}

impl DotConfig {
    pub fn new(cloud: PointCloudConfig) -> Self {
        Self {
            id: None,
            cloud,
            frame_length: DEFAULT_FRAME_LENGTH,
            cutoff_percentage: DEFAULT_CUTOFF_PERCENTAGE,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_frame_length(mut self, frame_length: u32) -> Self {
        self.frame_length = frame_length;
        self
    }

    /// Share of the cloud to show; values above 100 are capped.
    pub fn with_cutoff_percentage(mut self, cutoff_percentage: u32) -> Self {
        self.cutoff_percentage = cutoff_percentage.min(100);
        self
    }

    /// Number of points the cutoff leaves visible, rounded down.
    pub fn visible_points(&self) -> usize {
        self.cloud.points.len() * self.cutoff_percentage.min(100) as usize / 100
    }
}

/// Render the sampled grid as text: one character per grid cell, `#` where
/// a point was kept and `.` elsewhere.
pub fn ascii_preview(cloud: &PointCloudConfig) -> String {
    let freq = cloud.frequency().max(1);
    let cols = cloud.width.div_ceil(freq) as usize;
    let rows = cloud.height.div_ceil(freq) as usize;
    let mut grid = vec![vec!['.'; cols]; rows];
    for p in &cloud.points {
        let (c, r) = ((p.x / freq) as usize, (p.y / freq) as usize);
        if let Some(cell) = grid.get_mut(r).and_then(|row| row.get_mut(c)) {
            *cell = '#';
        }
    }
    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cloud() -> PointCloudConfig {
        PointCloudConfig {
            points: vec![Point { x: 0, y: 0 }, Point { x: 4, y: 2 }],
            radius: 1.0,
            width: 6,
            height: 4,
        }
    }

    #[test]
    fn picks_only_candidates() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let r = pick_resolution(&DEFAULT_RESOLUTION_CANDIDATES, &mut rng);
            assert!(DEFAULT_RESOLUTION_CANDIDATES.contains(&r));
        }
    }

    #[test]
    fn same_seed_same_pick() {
        let a = pick_resolution(&[1, 2, 3, 4, 5], &mut StdRng::seed_from_u64(42));
        let b = pick_resolution(&[1, 2, 3, 4, 5], &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_candidates_fall_back() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pick_resolution(&[], &mut rng), DEFAULT_RESOLUTION);
    }

    #[test]
    fn dot_config_merges_fields_flat() {
        let dots = DotConfig::new(cloud()).with_id("joe");
        let v = serde_json::to_value(&dots).unwrap();
        assert_eq!(v["id"], "joe");
        assert_eq!(v["frameLength"], 10);
        assert_eq!(v["cutoffPercentage"], 100);
        assert_eq!(v["radius"], 1.0);
        assert_eq!(v["points"][1], serde_json::json!([4, 2]));
        assert!(v.get("cloud").is_none());
    }

    #[test]
    fn cutoff_limits_visible_points() {
        let dots = DotConfig::new(cloud()).with_cutoff_percentage(50);
        assert_eq!(dots.visible_points(), 1);
        let capped = DotConfig::new(cloud()).with_cutoff_percentage(250);
        assert_eq!(capped.cutoff_percentage, 100);
        assert_eq!(capped.visible_points(), 2);
    }

    #[test]
    fn preview_marks_points() {
        assert_eq!(ascii_preview(&cloud()), "#..\n..#");
    }
}
