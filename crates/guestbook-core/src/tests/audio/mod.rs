mod assembler;
mod cpal_audio;
mod mixer;
mod queue;
