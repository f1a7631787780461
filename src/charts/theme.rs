// Catppuccin Mocha palette for plotters

use plotters::style::RGBColor;

pub const BASE: RGBColor = RGBColor(30, 30, 46); // #1e1e2e
pub const TEXT: RGBColor = RGBColor(205, 214, 244); // #cdd6f4
pub const SURFACE0: RGBColor = RGBColor(49, 50, 68); // #313244
pub const SURFACE1: RGBColor = RGBColor(69, 71, 90); // #45475a

pub const BLUE: RGBColor = RGBColor(137, 180, 250); // #89b4fa
pub const GREEN: RGBColor = RGBColor(166, 227, 161); // #a6e3a1
pub const YELLOW: RGBColor = RGBColor(249, 226, 175); // #f9e2af
pub const PEACH: RGBColor = RGBColor(250, 179, 135); // #fab387
pub const RED: RGBColor = RGBColor(243, 139, 168); // #f38ba8
pub const MAUVE: RGBColor = RGBColor(203, 166, 247); // #cba6f7
pub const TEAL: RGBColor = RGBColor(148, 226, 213); // #94e2d5
pub const PINK: RGBColor = RGBColor(245, 194, 231); // #f5c2e7

/// Line colors, cycled when a chart has more series than entries
pub static SERIES: [RGBColor; 8] = [BLUE, GREEN, RED, YELLOW, MAUVE, PEACH, TEAL, PINK];
