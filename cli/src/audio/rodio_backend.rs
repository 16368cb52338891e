use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc;

use fartbox_core::{SoundBackend, SoundError, SoundHandle, SoundRequest};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::debug;

/// Plays sound files through rodio.
///
/// The output stream is not `Send`, so it lives on its own thread for as long
/// as the backend exists; sinks are created from its shareable handle.
pub struct RodioBackend {
    stream: OutputStreamHandle,
    assets_dir: PathBuf,
    /// Dropping this ends the output thread
    _shutdown: mpsc::Sender<()>,
}

impl RodioBackend {
    pub fn open(assets_dir: PathBuf) -> Result<Self, SoundError> {
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        std::thread::Builder::new()
            .name("fartbox-audio".to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((stream, handle)) => {
                    let _ = ready_tx.send(Ok(handle));
                    // Blocks until the backend is dropped
                    let _ = shutdown_rx.recv();
                    drop(stream);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e.to_string()));
                }
            })
            .map_err(|e| SoundError::Device(e.to_string()))?;

        let stream = ready_rx
            .recv()
            .map_err(|_| SoundError::Released)?
            .map_err(SoundError::Device)?;

        Ok(Self {
            stream,
            assets_dir,
            _shutdown: shutdown_tx,
        })
    }
}

impl SoundBackend for RodioBackend {
    fn start_sound(&self, request: &SoundRequest) -> Result<Box<dyn SoundHandle>, SoundError> {
        let path = self.assets_dir.join(&request.id);
        let file = File::open(&path).map_err(|_| SoundError::NotFound {
            id: request.id.clone(),
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| SoundError::Decode {
            id: request.id.clone(),
            reason: e.to_string(),
        })?;
        let sink = Sink::try_new(&self.stream).map_err(|e| SoundError::Device(e.to_string()))?;

        sink.set_volume(request.volume);
        if request.looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        // Console playback has no positions; attachment is informational only
        debug!(
            sound = %request.id,
            entity = ?request.attached_to,
            reference_distance = ?request.reference_distance,
            "Sink started"
        );

        Ok(Box::new(RodioHandle { sink: Some(sink) }))
    }
}

struct RodioHandle {
    sink: Option<Sink>,
}

impl SoundHandle for RodioHandle {
    fn pause(&self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn set_playback_rate(&self, rate: f32) {
        if let Some(sink) = &self.sink {
            sink.set_speed(rate);
        }
    }
}

impl Drop for RodioHandle {
    fn drop(&mut self) {
        // A paused sink is finished with; anything else keeps playing to its end
        if let Some(sink) = self.sink.take() {
            if !sink.is_paused() {
                sink.detach();
            }
        }
    }
}
