//! Background texture loading.
//!
//! Files are read and decoded off the render thread. The frame loop picks
//! up whatever has finished with [`TextureLoader::drain_results`] and
//! uploads it, so objects appear untextured until their texture arrives.
//! Failed loads are logged and dropped.

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

use crate::error::AssetError;
use crate::model::body::BodyID;
use crate::model::scene::RingID;

/// What a texture is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Body(BodyID),
    Ring(RingID),
    /// Skybox face, in +X, -X, +Y, -Y, +Z, -Z order
    Skybox(usize),
}

pub struct TextureRequest {
    pub slot: TextureSlot,
    pub path: PathBuf,
}

/// A texture file that is known to decode.
pub struct LoadedTexture {
    pub slot: TextureSlot,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl LoadedTexture {
    /// Key for the renderer's texture cache.
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads an image file and checks that it decodes, returning the raw file
/// contents.
pub fn load_texture(path: &Path) -> Result<Vec<u8>, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::ReadError {
        path: path.to_owned(),
        source,
    })?;
    image::load_from_memory(&bytes).map_err(|source| AssetError::DecodeError {
        path: path.to_owned(),
        source,
    })?;
    Ok(bytes)
}

/// Single worker thread fed through a channel.
pub struct TextureLoader {
    request_sender: Option<Sender<TextureRequest>>,
    result_receiver: Receiver<LoadedTexture>,
    worker: Option<JoinHandle<()>>,
}

impl TextureLoader {
    pub fn new() -> Self {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<TextureRequest>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded();

        let worker = std::thread::Builder::new()
            .name(String::from("texture-loader"))
            .spawn(move || {
                while let Ok(request) = request_rx.recv() {
                    match load_texture(&request.path) {
                        Ok(bytes) => {
                            debug!("Loaded {}", request.path.display());
                            let loaded = LoadedTexture {
                                slot: request.slot,
                                path: request.path,
                                bytes,
                            };
                            if result_tx.send(loaded).is_err() {
                                break;
                            }
                        }
                        Err(err) => warn!("Texture for {:?} unavailable: {}", request.slot, err),
                    }
                }
            });

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!("Could not start texture loader, textures disabled: {}", err);
                None
            }
        };

        TextureLoader {
            request_sender: worker.as_ref().map(|_| request_tx),
            result_receiver: result_rx,
            worker,
        }
    }

    /// Queues a texture. Returns false if the loader isn't running.
    pub fn request(&self, slot: TextureSlot, path: PathBuf) -> bool {
        match &self.request_sender {
            Some(sender) => sender.send(TextureRequest { slot, path }).is_ok(),
            None => false,
        }
    }

    /// Everything finished since the last call. Never blocks.
    pub fn drain_results(&self) -> Vec<LoadedTexture> {
        self.result_receiver.try_iter().collect()
    }

    /// Stops accepting requests and waits for the worker to finish the
    /// queue.
    pub fn shutdown(&mut self) {
        self.request_sender.take();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TextureLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        image::RgbImage::new(4, 2).save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_texture() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_png(dir.path(), "ok.png");
        assert!(!load_texture(&good).unwrap().is_empty());

        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"definitely not a png").unwrap();
        assert!(matches!(
            load_texture(&garbage),
            Err(AssetError::DecodeError { .. })
        ));

        assert!(matches!(
            load_texture(&dir.path().join("missing.jpg")),
            Err(AssetError::ReadError { .. })
        ));
    }

    #[test]
    fn test_loader_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_png(dir.path(), "face.png");

        let mut loader = TextureLoader::new();
        assert!(loader.request(TextureSlot::Skybox(0), dir.path().join("missing.png")));
        assert!(loader.request(TextureSlot::Skybox(1), good.clone()));

        let start = Instant::now();
        let mut results = Vec::new();
        while results.is_empty() && start.elapsed() < Duration::from_secs(5) {
            results.extend(loader.drain_results());
            std::thread::sleep(Duration::from_millis(5));
        }

        loader.shutdown();
        results.extend(loader.drain_results());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slot, TextureSlot::Skybox(1));
        assert_eq!(results[0].path, good);
        assert!(!loader.request(TextureSlot::Skybox(2), good));
    }
}
