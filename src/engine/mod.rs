pub mod arc;
pub mod compose;
pub mod countdown;
pub mod dots;
pub mod palette;
pub mod sky;
pub mod stars;
pub mod text;
pub mod time_context;

pub use arc::{build_arc, ArcGeometry, ArcSpec};
pub use compose::{compose, evaluate, SceneOptions, SceneState};
pub use countdown::{countdown, CountdownKind, CountdownTarget};
pub use dots::{layout_dots, DayDot, DotGeometry, DotLayout};
pub use sky::{sky_appearance, SkyAppearance};
pub use stars::{generate_stars, Lcg32, Star};
pub use time_context::{resolve_time_context, TimeContext};
