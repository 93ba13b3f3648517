//! Label colors for target names

use colored::Color;

/// Red and green are left out; they mean failure and success.
const LABEL_COLORS: [Color; 6] = [
    Color::Blue,
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::BrightBlue,
    Color::BrightMagenta,
];

/// Color for `target_name`, the same on every run
pub fn get_target_color(target_name: &str) -> Color {
    // 32-bit FNV-1a
    let hash = target_name.bytes().fold(0x811c_9dc5u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    });
    LABEL_COLORS[hash as usize % LABEL_COLORS.len()]
}
