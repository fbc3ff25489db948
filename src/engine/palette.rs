use crate::models::Color;

// Sky stops: [top, mid, bottom]
pub const SKY_DEEP_NIGHT: [Color; 3] = [
    Color::rgb(0x02, 0x08, 0x17),
    Color::rgb(0x04, 0x0D, 0x28),
    Color::rgb(0x06, 0x0B, 0x20),
];
pub const SKY_PRE_FAJR: [Color; 3] = [
    Color::rgb(0x05, 0x0A, 0x22),
    Color::rgb(0x0C, 0x18, 0x45),
    Color::rgb(0x10, 0x20, 0x40),
];
pub const SKY_DAWN: [Color; 3] = [
    Color::rgb(0x1A, 0x10, 0x40),
    Color::rgb(0x5A, 0x25, 0x55),
    Color::rgb(0xC0, 0x45, 0x35),
];
pub const SKY_DAY: [Color; 3] = [
    Color::rgb(0x0A, 0x18, 0x45),
    Color::rgb(0x1A, 0x35, 0x65),
    Color::rgb(0x1E, 0x48, 0x75),
];
pub const SKY_SUNSET: [Color; 3] = [
    Color::rgb(0x1A, 0x0A, 0x22),
    Color::rgb(0x6A, 0x2A, 0x18),
    Color::rgb(0xD0, 0x60, 0x30),
];
pub const SKY_AFTER_MAGHRIB: [Color; 3] = [
    Color::rgb(0x08, 0x06, 0x20),
    Color::rgb(0x12, 0x08, 0x30),
    Color::rgb(0x0C, 0x08, 0x20),
];

pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const SUHOOR_BLUE: Color = Color::rgb(0xA8, 0xC4, 0xFF);
pub const IFTAR_GOLD: Color = Color::rgb(0xD4, 0xA8, 0x47);
pub const MERCY_BLUE: Color = SUHOOR_BLUE;
pub const FORGIVENESS_GREEN: Color = Color::rgb(0x90, 0xD4, 0xA0);
pub const FREEDOM_AMBER: Color = Color::rgb(0xFF, 0xD0, 0x80);

pub const STARLIGHT: Color = Color::rgb(255, 248, 220);
pub const MOON: Color = Color::rgb(0xF5, 0xDC, 0x82);

pub const CARD_FILL: Color = Color::rgba(4, 8, 24, 0.75);
pub const CARD_BORDER: Color = Color::rgba(212, 168, 71, 0.18);

pub const DOT_PAST: Color = Color::rgba(180, 140, 50, 0.8);
pub const DOT_CURRENT: Color = IFTAR_GOLD;
pub const DOT_FUTURE: Color = Color::rgba(255, 255, 255, 0.07);
pub const DOT_RING: Color = Color::rgba(212, 168, 71, 0.15);

/// Colour token names exposed on countdown targets.
pub fn token(name: &str) -> Option<Color> {
    match name {
        "suhoor" => Some(SUHOOR_BLUE),
        "iftar" => Some(IFTAR_GOLD),
        "mercy" => Some(MERCY_BLUE),
        "forgiveness" => Some(FORGIVENESS_GREEN),
        "freedom" => Some(FREEDOM_AMBER),
        _ => None,
    }
}
