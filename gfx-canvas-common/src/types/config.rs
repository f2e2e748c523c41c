use serde::{Deserialize, Serialize};

/// 帧缓冲区分配失败时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// 分配失败即报错
    Exact,
    /// 分配失败时改用一半大小重试，画布高度随之缩减
    #[default]
    HalveOnFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u16,
    pub height: u16,
    /// 画布内容在输出端坐标系中的位置
    pub output_x: i16,
    pub output_y: i16,
    /// 传递给输出端的传输速度提示
    pub speed: Option<u32>,
    pub allocation: AllocationPolicy,
}

impl CanvasConfig {
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            output_x: 0,
            output_y: 0,
            speed: None,
            allocation: AllocationPolicy::HalveOnFailure,
        }
    }

    pub const fn with_output(mut self, output_x: i16, output_y: i16) -> Self {
        self.output_x = output_x;
        self.output_y = output_y;
        self
    }

    pub const fn with_speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub const fn with_allocation(mut self, allocation: AllocationPolicy) -> Self {
        self.allocation = allocation;
        self
    }

    /// 完整帧缓冲区所需字节数
    pub const fn buffer_bytes(&self) -> usize {
        self.width as usize * self.height as usize * 2
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(320, 240)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_bytes() {
        assert_eq!(CanvasConfig::new(480, 320).buffer_bytes(), 307200);
        assert_eq!(CanvasConfig::new(1, 1).buffer_bytes(), 2);
    }

    #[test]
    fn test_builder() {
        let config = CanvasConfig::new(128, 64)
            .with_output(10, -4)
            .with_speed(40_000_000)
            .with_allocation(AllocationPolicy::Exact);

        assert_eq!((config.output_x, config.output_y), (10, -4));
        assert_eq!(config.speed, Some(40_000_000));
        assert_eq!(config.allocation, AllocationPolicy::Exact);
    }

    #[test]
    fn test_default_policy_halves() {
        assert_eq!(AllocationPolicy::default(), AllocationPolicy::HalveOnFailure);
        assert_eq!(CanvasConfig::new(8, 8).allocation, AllocationPolicy::HalveOnFailure);

        let config: CanvasConfig = serde_json::from_str(r#"{"width": 8}"#).unwrap();
        assert_eq!(config.allocation, AllocationPolicy::HalveOnFailure);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CanvasConfig =
            serde_json::from_str(r#"{"width": 480, "allocation": "exact"}"#).unwrap();

        assert_eq!(config.width, 480);
        assert_eq!(config.height, 240);
        assert_eq!(config.speed, None);
        assert_eq!(config.allocation, AllocationPolicy::Exact);
    }
}
