mod audio;
mod sequencer;
mod support;
