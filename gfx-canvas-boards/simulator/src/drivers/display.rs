use gfx_canvas_common::{DisplaySink, debug, info};
use heapless::Deque;
use thiserror::Error;

/// 保留的传输记录条数
const HISTORY: usize = 8;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError {
    #[error("Panel not initialized")]
    NotInitialized,

    #[error("Bitmap too short: expected {expected} pixels, got {actual}")]
    ShortBitmap { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferStats {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
    /// 实际落在面板上的像素数
    pub copied: usize,
}

/// 内存中的 RGB565 面板，代替真实的 SPI 屏幕
pub struct PanelDisplay {
    width: u16,
    height: u16,
    pixels: Vec<u16>,
    speed: Option<u32>,
    initialized: bool,
    history: Deque<TransferStats, HISTORY>,
}

impl PanelDisplay {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; usize::from(width) * usize::from(height)],
            speed: None,
            initialized: false,
            history: Deque::new(),
        }
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    pub fn speed(&self) -> Option<u32> {
        self.speed
    }

    /// 从最早的传输开始
    pub fn history(&self) -> impl Iterator<Item = &TransferStats> {
        self.history.iter()
    }

    /// 面板内容的 FNV-1a 校验值，便于比较多次运行的结果
    pub fn checksum(&self) -> u32 {
        self.pixels
            .iter()
            .flat_map(|p| p.to_le_bytes())
            .fold(0x811C_9DC5, |hash, byte| (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193))
    }

    fn record(&mut self, stats: TransferStats) {
        if self.history.is_full() {
            self.history.pop_front();
        }
        // 刚腾出一个位置，不会失败
        let _ = self.history.push_back(stats);
    }
}

impl DisplaySink for PanelDisplay {
    type Error = PanelError;

    fn begin(&mut self, speed: Option<u32>) -> Result<(), Self::Error> {
        info!(
            "[Simulator Panel] {}x{} begin, speed {:?}",
            self.width, self.height, speed
        );
        self.speed = speed;
        self.initialized = true;
        Ok(())
    }

    fn draw_rgb565_bitmap(
        &mut self,
        x: i16,
        y: i16,
        pixels: &[u16],
        width: u16,
        height: u16,
    ) -> Result<(), Self::Error> {
        if !self.initialized {
            return Err(PanelError::NotInitialized);
        }
        let expected = usize::from(width) * usize::from(height);
        if pixels.len() < expected {
            return Err(PanelError::ShortBitmap {
                expected,
                actual: pixels.len(),
            });
        }

        let (x, y) = (i32::from(x), i32::from(y));
        let x0 = x.max(0);
        let x1 = (x + i32::from(width)).min(i32::from(self.width));
        let y0 = y.max(0);
        let y1 = (y + i32::from(height)).min(i32::from(self.height));

        let mut copied = 0;
        if x0 < x1 && y0 < y1 {
            let run = (x1 - x0) as usize;
            for row in y0..y1 {
                let src = (row - y) as usize * usize::from(width) + (x0 - x) as usize;
                let dst = row as usize * usize::from(self.width) + x0 as usize;
                self.pixels[dst..dst + run].copy_from_slice(&pixels[src..src + run]);
                copied += run;
            }
        }

        debug!(
            "[Simulator Panel] {}x{} at ({}, {}), {} pixels copied",
            width, height, x, y, copied
        );
        self.record(TransferStats {
            x: x as i16,
            y: y as i16,
            width,
            height,
            copied,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_requires_begin() {
        let mut panel = PanelDisplay::new(4, 4);
        assert_eq!(
            panel.draw_rgb565_bitmap(0, 0, &[1; 4], 2, 2),
            Err(PanelError::NotInitialized)
        );
    }

    #[test]
    fn test_transfer_short_bitmap() {
        let mut panel = PanelDisplay::new(4, 4);
        panel.begin(None).unwrap();
        assert_eq!(
            panel.draw_rgb565_bitmap(0, 0, &[1; 3], 2, 2),
            Err(PanelError::ShortBitmap { expected: 4, actual: 3 })
        );
    }

    #[test]
    fn test_transfer_at_offset() {
        let mut panel = PanelDisplay::new(4, 3);
        panel.begin(Some(20_000_000)).unwrap();
        panel.draw_rgb565_bitmap(1, 1, &[1, 2, 3, 4], 2, 2).unwrap();

        assert_eq!(panel.speed(), Some(20_000_000));
        assert_eq!(panel.pixels(), &[0, 0, 0, 0, 0, 1, 2, 0, 0, 3, 4, 0]);
    }

    #[test]
    fn test_transfer_partially_off_panel() {
        let mut panel = PanelDisplay::new(3, 3);
        panel.begin(None).unwrap();
        panel
            .draw_rgb565_bitmap(-1, 2, &[1, 2, 3, 4, 5, 6], 3, 2)
            .unwrap();

        assert_eq!(panel.pixel(0, 2), Some(2));
        assert_eq!(panel.pixel(1, 2), Some(3));
        assert_eq!(panel.pixel(2, 2), Some(0));
        assert_eq!(panel.pixel(3, 2), None);
        assert_eq!(panel.history().last().map(|s| s.copied), Some(2));
    }

    #[test]
    fn test_history_keeps_latest() {
        let mut panel = PanelDisplay::new(2, 2);
        panel.begin(None).unwrap();
        for i in 0..(HISTORY as i16 + 3) {
            panel.draw_rgb565_bitmap(i, 0, &[0], 1, 1).unwrap();
        }

        let xs: Vec<i16> = panel.history().map(|s| s.x).collect();
        assert_eq!(xs.len(), HISTORY);
        assert_eq!(xs.first(), Some(&3));
        assert_eq!(xs.last(), Some(&(HISTORY as i16 + 2)));
    }

    #[test]
    fn test_checksum_changes() {
        let mut panel = PanelDisplay::new(2, 2);
        let blank = panel.checksum();
        panel.begin(None).unwrap();
        panel.draw_rgb565_bitmap(0, 0, &[0xFFFF], 1, 1).unwrap();

        assert_ne!(panel.checksum(), blank);
    }
}
