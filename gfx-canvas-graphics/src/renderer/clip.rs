//! 裁剪计算
//!
//! 所有中间量用 i64 计算，极端的 i32 坐标与长度组合也不会溢出

/// 将一维线段裁剪到 `[0, max]`
///
/// 线段从 `start` 开始，长度为 `len`；`len` 为负时线段向反方向延伸。
/// 返回裁剪后的 `(起点, 长度)`，完全落在范围外时返回 `None`
pub(crate) fn clip_span(start: i32, len: i32, max: i32) -> Option<(usize, usize)> {
    if len == 0 || max < 0 {
        return None;
    }

    let mut start = i64::from(start);
    let mut len = i64::from(len);
    let max = i64::from(max);

    if len < 0 {
        start += len + 1;
        len = -len;
    }
    if start > max {
        return None;
    }

    let end = start + len - 1;
    if end < 0 {
        return None;
    }
    if start < 0 {
        start = 0;
        len = end + 1;
    }
    if end > max {
        len = max - start + 1;
    }

    Some((start as usize, len as usize))
}

/// 位图裁剪结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlitClip {
    /// 目标左上角
    pub dst_x: usize,
    pub dst_y: usize,
    /// 裁剪后的宽高
    pub width: usize,
    pub height: usize,
    /// 源位图中第一个被复制像素的下标
    pub src_offset: usize,
    /// 每复制完一行后额外跳过的源像素数
    pub src_skip: usize,
}

/// 将 `w × h` 的位图放在 `(x, y)` 处，裁剪到 `[0, max_x] × [0, max_y]`
pub(crate) fn clip_blit(x: i32, y: i32, w: u16, h: u16, max_x: i32, max_y: i32) -> Option<BlitClip> {
    let mut x = i64::from(x);
    let mut y = i64::from(y);
    let stride = i64::from(w);
    let mut w = stride;
    let mut h = i64::from(h);
    let max_x = i64::from(max_x);
    let max_y = i64::from(max_y);

    if w == 0 || h == 0 {
        return None;
    }
    if x + w - 1 < 0 || y + h - 1 < 0 || x > max_x || y > max_y {
        return None;
    }

    let mut src = 0;
    let mut xskip = 0;

    // 下边
    if y + h - 1 > max_y {
        h -= y + h - 1 - max_y;
    }
    // 上边：跳过 |y| 整行
    if y < 0 {
        src -= y * stride;
        h += y;
        y = 0;
    }
    // 右边
    if x + w - 1 > max_x {
        xskip = x + w - 1 - max_x;
        w -= xskip;
    }
    // 左边：每行都要多跳过 |x| 列
    if x < 0 {
        src -= x;
        xskip -= x;
        w += x;
        x = 0;
    }

    Some(BlitClip {
        dst_x: x as usize,
        dst_y: y as usize,
        width: w as usize,
        height: h as usize,
        src_offset: src as usize,
        src_skip: xskip as usize,
    })
}
