/// Counts frames per wall-clock second.
#[derive(Debug, Default, Clone)]
pub struct FpsCounter {
    timer: f32,
    frames: u32,
    last: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame of `dt` seconds. Returns the frame count whenever a full second
    /// has been accumulated.
    pub fn frame(&mut self, dt: f32) -> Option<u32> {
        self.timer += dt;
        self.frames += 1;
        if self.timer < 1.0 {
            return None;
        }
        self.timer -= 1.0;
        self.last = self.frames;
        self.frames = 0;
        Some(self.last)
    }

    /// Frame rate over the last completed second.
    pub fn fps(&self) -> u32 {
        self.last
    }
}
