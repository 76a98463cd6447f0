//! Failure shake animation

use leptos::prelude::*;

/// Length of the `shake` CSS animation
pub const SHAKE_MS: u32 = 600;

/// True for [`SHAKE_MS`] after every increase of `shakes`.
pub fn use_shake(shakes: Signal<u32>) -> ReadSignal<bool> {
    let (shaking, set_shaking) = signal(false);
    Effect::new(move |prev: Option<u32>| {
        let count = shakes.get();
        if prev.is_some_and(|prev| prev != count) {
            set_shaking.set(true);
            gloo_timers::callback::Timeout::new(SHAKE_MS, move || set_shaking.set(false)).forget();
        }
        count
    });
    shaking
}
