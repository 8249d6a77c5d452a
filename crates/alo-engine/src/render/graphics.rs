use std::sync::mpsc::{self, Receiver, Sender};

use super::{Renderer, TextureId};

/// The bound renderer plus the queue of textures whose owners were dropped.
pub struct Graphics {
    renderer: Box<dyn Renderer>,
    release_tx: Sender<TextureId>,
    release_rx: Receiver<TextureId>,
}

impl Graphics {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        let (release_tx, release_rx) = mpsc::channel();
        Self {
            renderer,
            release_tx,
            release_rx,
        }
    }

    #[inline]
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    pub(crate) fn release_sender(&self) -> Sender<TextureId> {
        self.release_tx.clone()
    }

    /// Deletes every texture queued for release. Returns how many were freed.
    pub fn collect_released(&mut self) -> usize {
        let mut n = 0;
        while let Ok(id) = self.release_rx.try_recv() {
            self.renderer.delete_texture(id);
            n += 1;
        }
        if n > 0 {
            log::debug!("released {n} texture(s)");
        }
        n
    }
}
