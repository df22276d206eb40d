//! Sound cues
//!
//! Every effect is a short synthesized sweep, rendered once at startup and
//! handed to rodio as a sample buffer. Missing audio devices and playback
//! failures are logged and never fatal.

use std::f32::consts::TAU;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, PlayError, Sink, StreamError};

use crate::sim::GameEvent;

/// Output sample rate for synthesized voices
pub const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Wing flap
    Flap,
    /// Passed a pipe
    Point,
    /// Hit a pipe
    Hit,
    /// Death
    Die,
}

impl SoundEffect {
    pub const COUNT: usize = 4;
    pub const ALL: [SoundEffect; Self::COUNT] = [Self::Flap, Self::Point, Self::Hit, Self::Die];

    /// The cue for a simulation event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flap => Some(SoundEffect::Flap),
            GameEvent::Point => Some(SoundEffect::Point),
            GameEvent::Hit => Some(SoundEffect::Hit),
            GameEvent::Die => Some(SoundEffect::Die),
            GameEvent::NewHighScore(_) => None,
        }
    }

    /// Oscillator settings for this effect
    pub fn tone(self) -> Tone {
        match self {
            // Short upward chirp
            SoundEffect::Flap => Tone {
                wave: Waveform::Square,
                start_hz: 320.0,
                end_hz: 640.0,
                secs: 0.07,
                gain: 0.12,
            },
            // Bright ding
            SoundEffect::Point => Tone {
                wave: Waveform::Sine,
                start_hz: 880.0,
                end_hz: 1320.0,
                secs: 0.15,
                gain: 0.25,
            },
            // Dull thump
            SoundEffect::Hit => Tone {
                wave: Waveform::Square,
                start_hz: 180.0,
                end_hz: 60.0,
                secs: 0.12,
                gain: 0.3,
            },
            // Falling saw, 400Hz down to 80Hz
            SoundEffect::Die => Tone {
                wave: Waveform::Saw,
                start_hz: 400.0,
                end_hz: 80.0,
                secs: 0.5,
                gain: 0.15,
            },
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
}

impl Waveform {
    /// Sample at `phase` in `[0, 1)`
    fn at(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => 2.0 * phase - 1.0,
        }
    }
}

/// A linear frequency sweep with a linear fade out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    pub secs: f32,
    pub gain: f32,
}

impl Tone {
    /// Render the tone as mono samples
    pub fn samples(&self, rate: u32) -> Vec<f32> {
        let n = (self.secs * rate as f32) as usize;
        let mut phase = 0.0f32;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let sample = self.wave.at(phase) * self.gain * (1.0 - t);
                let hz = self.start_hz + (self.end_hz - self.start_hz) * t;
                phase = (phase + hz / rate as f32).fract();
                sample
            })
            .collect()
    }
}

/// Somewhere voices can be played
pub trait AudioSink {
    fn play(&mut self, voice: SamplesBuffer<f32>) -> Result<(), PlayError>;
}

/// The default output device
pub struct RodioSink {
    // Dropping the stream stops all playback
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioSink {
    pub fn open() -> Result<Self, StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl AudioSink for RodioSink {
    fn play(&mut self, voice: SamplesBuffer<f32>) -> Result<(), PlayError> {
        let sink = Sink::try_new(&self.handle)?;
        sink.append(voice);
        // Keep playing after the handle goes away
        sink.detach();
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink = RodioSink> {
    /// `None` when no output device could be opened
    sink: Option<S>,
    voices: [Vec<f32>; SoundEffect::COUNT],
    muted: bool,
}

impl AudioManager<RodioSink> {
    /// Open the default output device; audio is disabled if that fails
    pub fn open(muted: bool) -> Self {
        let sink = match RodioSink::open() {
            Ok(sink) => Some(sink),
            Err(e) => {
                log::warn!("No audio output ({}), sound disabled", e);
                None
            }
        };
        Self::with_sink(sink, muted)
    }
}

impl<S: AudioSink> AudioManager<S> {
    pub fn with_sink(sink: Option<S>, muted: bool) -> Self {
        Self {
            sink,
            voices: SoundEffect::ALL.map(|effect| effect.tone().samples(SAMPLE_RATE)),
            muted,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play an effect, logging instead of failing
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(sink) = &mut self.sink else { return };

        let voice = SamplesBuffer::new(1, SAMPLE_RATE, self.voices[effect.index()].clone());
        if let Err(e) = sink.play(voice) {
            log::warn!("Could not play {:?}: {}", effect, e);
        }
    }

    /// Play the cue for every event that has one
    pub fn play_events(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for effect in events.into_iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
