mod clock;
mod decor;
mod loading;
mod random;
mod voice;

pub use clock::TokioClock;
pub use decor::{bubbles, scatter};
pub use loading::{LoadingScreen, LoadingSnapshot, LoadingTiming};
pub use random::StdRandom;
pub use voice::{Activation, PreferenceList, VoiceInput};
