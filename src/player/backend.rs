use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::warn;

use super::decoder::Decoder;
use super::types::{DecoderEvent, PlayerError, PlayerMsg};

/// `rodio`-backed decoder.
///
/// Preparation decodes the bound file into a paused [`Sink`] and posts
/// the outcome back onto the control channel, so readiness stays an
/// ordered message on the control thread instead of a blocking call.
/// Elapsed time is tracked with start-instant plus accumulated-on-pause
/// accounting, since a sink cannot report its position.
pub struct RodioDecoder {
    stream: OutputStream,
    msg_tx: Sender<PlayerMsg>,
    source_path: Option<PathBuf>,
    sink: Option<Sink>,
    total: Option<Duration>,
    paused: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl RodioDecoder {
    pub fn new(msg_tx: Sender<PlayerMsg>) -> Self {
        let mut stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        Self {
            stream,
            msg_tx,
            source_path: None,
            sink: None,
            total: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    /// Decode `path` into a paused sink starting at `start_at`.
    /// `skip_duration` is the seeking primitive; `Duration::ZERO` is fine.
    fn build_sink(
        &self,
        path: &Path,
        start_at: Duration,
    ) -> Result<(Sink, Option<Duration>), PlayerError> {
        let file = File::open(path).map_err(|_| PlayerError::SourceUnavailable {
            path: path.to_path_buf(),
        })?;
        let source =
            rodio::Decoder::new(BufReader::new(file)).map_err(|_| PlayerError::SourceUnavailable {
                path: path.to_path_buf(),
            })?;
        let total = source.total_duration();
        let source = source.skip_duration(start_at);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();
        Ok((sink, total))
    }
}

impl Decoder for RodioDecoder {
    fn reset(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.source_path = None;
        self.total = None;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn set_source(&mut self, locator: &Path) -> Result<(), PlayerError> {
        // Resolve eagerly so an unreadable locator fails here, matching
        // the synchronous part of the contract.
        if !locator.is_file() {
            return Err(PlayerError::SourceUnavailable {
                path: locator.to_path_buf(),
            });
        }
        self.source_path = Some(locator.to_path_buf());
        Ok(())
    }

    fn prepare_async(&mut self, generation: u64) {
        let Some(path) = self.source_path.clone() else {
            let _ = self
                .msg_tx
                .send(PlayerMsg::Decoder(DecoderEvent::Failed { generation }));
            return;
        };

        match self.build_sink(&path, Duration::ZERO) {
            Ok((sink, total)) => {
                self.sink = Some(sink);
                self.total = total;
                self.paused = true;
                self.started_at = None;
                self.accumulated = Duration::ZERO;
                let _ = self
                    .msg_tx
                    .send(PlayerMsg::Decoder(DecoderEvent::Prepared { generation }));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "prepare failed");
                let _ = self
                    .msg_tx
                    .send(PlayerMsg::Decoder(DecoderEvent::Failed { generation }));
            }
        }
    }

    fn start(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
            self.paused = false;
            self.started_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
        self.paused = true;
    }

    fn seek_to(&mut self, position: Duration) {
        let Some(path) = self.source_path.clone() else {
            return;
        };
        let Some(old) = self.sink.take() else {
            return;
        };
        old.stop();

        match self.build_sink(&path, position) {
            Ok((sink, total)) => {
                if self.paused {
                    self.started_at = None;
                } else {
                    sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.sink = Some(sink);
                self.total = total;
                self.accumulated = position;
            }
            Err(e) => {
                // Leave the decoder without a sink; the next play resets it.
                warn!(path = %path.display(), error = %e, "seek rebuild failed");
                self.paused = true;
                self.started_at = None;
            }
        }
    }

    fn position(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn duration(&self) -> Option<Duration> {
        self.total
    }

    fn is_playing(&self) -> bool {
        !self.paused && self.sink.is_some()
    }

    fn finished(&self) -> bool {
        !self.paused && self.sink.as_ref().is_some_and(|s| s.empty())
    }

    fn release(&mut self) {
        self.reset();
    }
}
