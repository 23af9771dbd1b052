use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const SECONDARY: Color = Color::TrueColor { r: 170, g: 140, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 200, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const CUIT: Color = Color::TrueColor { r: 130, g: 230, b: 160 };
pub const EMAIL: Color = Color::TrueColor { r: 140, g: 190, b: 255 };
pub const DELETED: Color = Color::Red;

pub const EXPORTADORA: Color = Color::Green;
pub const POTENCIAL: Color = Color::Yellow;
pub const ETAPA_INICIAL: Color = Color::Cyan;
