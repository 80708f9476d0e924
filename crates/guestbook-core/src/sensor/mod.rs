mod debounce;
mod gpio;
mod hook_switch;

pub use {
    debounce::{Debouncer, Edge, MIN_SETTLE},
    gpio::GpioValueInput,
    hook_switch::{HookInput, HookSwitch, WaitOutcome},
};
