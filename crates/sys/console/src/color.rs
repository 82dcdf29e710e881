//! The 16-color VGA text palette

/// Standard VGA text-mode colors.
///
/// The discriminant is the hardware attribute code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    /// Look up a color by its command-line name.
    pub fn from_name(name: &str) -> Option<Color> {
        match name {
            "black" => Some(Color::Black),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "cyan" => Some(Color::Cyan),
            "red" => Some(Color::Red),
            "magenta" => Some(Color::Magenta),
            "brown" => Some(Color::Brown),
            "light_gray" => Some(Color::LightGray),
            "dark_gray" => Some(Color::DarkGray),
            "light_blue" => Some(Color::LightBlue),
            "light_green" => Some(Color::LightGreen),
            "light_cyan" => Some(Color::LightCyan),
            "light_red" => Some(Color::LightRed),
            "light_magenta" => Some(Color::LightMagenta),
            "yellow" => Some(Color::Yellow),
            "white" => Some(Color::White),
            _ => None,
        }
    }

    /// The 4-bit hardware code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Pack a foreground/background pair into a VGA attribute byte
    pub fn attr(fg: Color, bg: Color) -> u8 {
        (bg.code() << 4) | fg.code()
    }
}
