use glam::Vec2;

/// Pointer and viewport state fed by the host.
///
/// Touch and mouse both arrive as a single pointer.
#[derive(Default, Debug, Clone)]
pub struct Input {
    /// 当前指针在视口内的位置（像素）
    pub pointer_position: Vec2,
    /// 上一帧到这一帧的指针位移 (dx, dy)
    pub pointer_delta: Vec2,
    /// 这一帧的缩放量，正值拉近
    pub scroll_delta: f32,
    /// 视口大小（像素）
    pub screen_size: Vec2,
    pub pointer_down: bool,
    has_position: bool,
}

impl Input {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut input = Self::default();
        input.handle_resize(width, height);
        input
    }

    /// 帧末清理（清除 delta 状态，防止一直旋转）
    pub fn end_frame(&mut self) {
        self.pointer_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) {
        let new_pos = Vec2::new(x, y);
        // 第一次收到位置时 delta 为 0
        if self.has_position {
            self.pointer_delta += new_pos - self.pointer_position;
        }
        self.pointer_position = new_pos;
        self.has_position = true;
    }

    /// 开始拖动；下一次移动只记录位置，不产生位移
    pub fn begin_drag(&mut self) {
        self.pointer_down = true;
        self.has_position = false;
        self.pointer_delta = Vec2::ZERO;
    }

    pub fn end_drag(&mut self) {
        self.pointer_down = false;
    }

    pub fn handle_scroll(&mut self, delta: f32) {
        self.scroll_delta += delta;
    }

    /// Pixel position to normalized device coordinates.
    #[must_use]
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        crate::picking::screen_to_ndc(x, y, self.screen_size.x, self.screen_size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_move_has_no_delta() {
        let mut input = Input::new(100, 100);
        input.handle_pointer_move(10.0, 10.0);
        assert_eq!(input.pointer_delta, Vec2::ZERO);
        input.handle_pointer_move(15.0, 8.0);
        assert_eq!(input.pointer_delta, Vec2::new(5.0, -2.0));
        input.end_frame();
        assert_eq!(input.pointer_delta, Vec2::ZERO);
    }
}
