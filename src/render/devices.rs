/// Lock-screen resolutions, in pixels.
pub const DEVICE_SIZES: &[(&str, u32, u32)] = &[
    ("iphone16pro", 1206, 2622),
    ("iphone16", 1179, 2556),
    ("iphone15", 1179, 2556),
    ("iphone14", 1170, 2532),
    ("iphone13", 1170, 2532),
    ("iphone12", 1170, 2532),
    ("s24ultra", 1440, 3088),
    ("s24", 1080, 2340),
    ("pixel8", 1080, 2400),
];

pub const DEFAULT_SIZE: (u32, u32) = (1179, 2556);

/// Canvas for a model key; unknown models get the default size.
pub fn canvas_for(model: &str) -> (u32, u32) {
    let key = model.trim().to_lowercase();
    DEVICE_SIZES
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|&(_, w, h)| (w, h))
        .unwrap_or_else(|| {
            log::warn!("unknown device model '{}', using default size", model);
            DEFAULT_SIZE
        })
}
