/// Lifts an SDL error into eyre, prefixed with what was being attempted.
macro_rules! sdl_error {
    ($e:expr, $what:expr) => {
        $e.map_err(|msg| eyre::eyre!("{} failed: {}", $what, msg))
    };
}

pub(crate) use sdl_error;
