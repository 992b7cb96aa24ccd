//! The media element seam. The controller drives an element through
//! [`MediaElement`] and hears back through a [`MediaEventSink`].

use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    #[error("media element unavailable: {0}")]
    ElementUnavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    MetadataLoaded { duration: f64 },
    TimeUpdate { position: f64 },
    Ended,
    PlayStarted,
    PlayRejected(String),
}

/// An event tagged with the id of the element that raised it, so events
/// from a torn-down element can be told apart from the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEnvelope {
    pub element_id: u64,
    pub event: MediaEvent,
}

pub type MediaEventSink = Rc<dyn Fn(MediaEnvelope)>;

pub trait MediaElement {
    /// Request playback. The outcome arrives as `PlayStarted` or `PlayRejected`.
    fn play(&mut self);
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    /// Volume as a fraction in [0, 1].
    fn set_volume(&mut self, fraction: f64);
    fn set_loop(&mut self, looping: bool);
}

pub trait MediaFactory {
    type Element: MediaElement;

    fn create(&mut self, element_id: u64, source_url: &str)
        -> Result<Self::Element, PlaybackError>;
}

#[cfg(target_arch = "wasm32")]
pub use web::{WebAudioElement, WebAudioFactory};

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use wasm_bindgen::{closure::Closure, JsCast};
    use web_sys::HtmlAudioElement;

    pub struct WebAudioFactory {
        sink: MediaEventSink,
    }

    impl WebAudioFactory {
        pub fn new(sink: MediaEventSink) -> Self {
            Self { sink }
        }
    }

    impl MediaFactory for WebAudioFactory {
        type Element = WebAudioElement;

        fn create(
            &mut self,
            element_id: u64,
            source_url: &str,
        ) -> Result<WebAudioElement, PlaybackError> {
            let audio = HtmlAudioElement::new_with_src(source_url)
                .map_err(|e| PlaybackError::ElementUnavailable(format!("{e:?}")))?;
            let mut element = WebAudioElement {
                audio,
                element_id,
                sink: self.sink.clone(),
                listeners: Vec::new(),
            };
            element.listen("loadedmetadata", |audio| MediaEvent::MetadataLoaded {
                duration: audio.duration(),
            });
            element.listen("timeupdate", |audio| MediaEvent::TimeUpdate {
                position: audio.current_time(),
            });
            element.listen("ended", |_| MediaEvent::Ended);
            Ok(element)
        }
    }

    /// A detached `<audio>` element. Dropping it pauses playback and
    /// detaches every listener it registered.
    pub struct WebAudioElement {
        audio: HtmlAudioElement,
        element_id: u64,
        sink: MediaEventSink,
        listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
    }

    impl WebAudioElement {
        fn listen(&mut self, name: &'static str, map: fn(&HtmlAudioElement) -> MediaEvent) {
            let audio = self.audio.clone();
            let sink = self.sink.clone();
            let element_id = self.element_id;
            let closure = Closure::wrap(Box::new(move || {
                sink(MediaEnvelope {
                    element_id,
                    event: map(&audio),
                });
            }) as Box<dyn FnMut()>);
            if self
                .audio
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .is_ok()
            {
                self.listeners.push((name, closure));
            } else {
                tracing::warn!(event = name, "failed to attach media listener");
            }
        }

        fn emit(&self, event: MediaEvent) {
            (self.sink)(MediaEnvelope {
                element_id: self.element_id,
                event,
            });
        }
    }

    impl MediaElement for WebAudioElement {
        fn play(&mut self) {
            let promise = match self.audio.play() {
                Ok(promise) => promise,
                Err(err) => {
                    self.emit(MediaEvent::PlayRejected(format!("{err:?}")));
                    return;
                }
            };
            let sink = self.sink.clone();
            let element_id = self.element_id;
            wasm_bindgen_futures::spawn_local(async move {
                let event = match wasm_bindgen_futures::JsFuture::from(promise).await {
                    Ok(_) => MediaEvent::PlayStarted,
                    Err(err) => MediaEvent::PlayRejected(format!("{err:?}")),
                };
                sink(MediaEnvelope { element_id, event });
            });
        }

        fn pause(&mut self) {
            let _ = self.audio.pause();
        }

        fn set_current_time(&mut self, seconds: f64) {
            self.audio.set_current_time(seconds);
        }

        fn set_volume(&mut self, fraction: f64) {
            self.audio.set_volume(fraction.clamp(0.0, 1.0));
        }

        fn set_loop(&mut self, looping: bool) {
            self.audio.set_loop(looping);
        }
    }

    impl Drop for WebAudioElement {
        fn drop(&mut self) {
            let _ = self.audio.pause();
            for (name, closure) in self.listeners.drain(..) {
                let _ = self
                    .audio
                    .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            let _ = self.audio.remove_attribute("src");
            self.audio.load();
        }
    }
}

/// Stand-in used on builds without a browser audio stack.
#[cfg(not(target_arch = "wasm32"))]
pub struct SilentMediaFactory {
    sink: MediaEventSink,
}

#[cfg(not(target_arch = "wasm32"))]
impl SilentMediaFactory {
    pub fn new(sink: MediaEventSink) -> Self {
        Self { sink }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MediaFactory for SilentMediaFactory {
    type Element = SilentElement;

    fn create(&mut self, element_id: u64, _source_url: &str) -> Result<SilentElement, PlaybackError> {
        Ok(SilentElement {
            element_id,
            sink: self.sink.clone(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub struct SilentElement {
    element_id: u64,
    sink: MediaEventSink,
}

#[cfg(not(target_arch = "wasm32"))]
impl MediaElement for SilentElement {
    fn play(&mut self) {
        (self.sink)(MediaEnvelope {
            element_id: self.element_id,
            event: MediaEvent::PlayRejected(
                "audio output is not available on this platform".to_string(),
            ),
        });
    }

    fn pause(&mut self) {}

    fn set_current_time(&mut self, _seconds: f64) {}

    fn set_volume(&mut self, _fraction: f64) {}

    fn set_loop(&mut self, _looping: bool) {}
}
