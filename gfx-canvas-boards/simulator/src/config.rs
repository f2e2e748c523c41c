use std::path::Path;

use gfx_canvas_common::{AllocationPolicy, CanvasConfig};
use serde::{Deserialize, Serialize};

/// 模拟器板级配置，画布字段直接展开在 JSON 顶层
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub panel_width: u16,
    pub panel_height: u16,
    /// 帧缓冲区可用的堆字节数，缺省时不限制
    pub memory_budget: Option<usize>,
    #[serde(flatten)]
    pub canvas: CanvasConfig,
}

impl SimulatorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            panel_width: 480,
            panel_height: 320,
            memory_budget: None,
            canvas: CanvasConfig::new(320, 240)
                .with_output(80, 40)
                .with_speed(40_000_000)
                .with_allocation(AllocationPolicy::HalveOnFailure),
        }
    }
}
