mod catalog;
mod sequencer;

pub use {catalog::Catalog, sequencer::PlaybackSequencer};
