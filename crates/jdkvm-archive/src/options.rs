/// Unix mode bits stored in the archive are always applied.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtractOptions {
    pub strip_components: usize,
}

impl ExtractOptions {
    pub fn strip_components(mut self, n: usize) -> Self {
        self.strip_components = n;
        self
    }
}
