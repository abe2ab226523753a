use gpui::*;

#[cfg(target_os = "macos")]
use objc2::rc::Retained;
#[cfg(target_os = "macos")]
use objc2_app_kit::NSColor;

pub struct Theme {
    pub text: Rgba,
    pub subtext0: Rgba,
    pub surface1: Rgba,
    pub surface0: Rgba,
    pub base: Rgba,
    pub mantle: Rgba,
    /// Solid (filled) crossword cells
    pub block: Rgba,
    /// Editable cells
    pub paper: Rgba,
    /// Letters and hint numbers on paper
    pub ink: Rgba,
    pub accent: Rgba,
}

impl Global for Theme {}

/// Get the system accent color on macOS
#[cfg(target_os = "macos")]
fn get_system_accent_color() -> Rgba {
    let accent_color: Retained<NSColor> = NSColor::controlAccentColor();
    if let Some(rgb_color) =
        accent_color.colorUsingColorSpace(objc2_app_kit::NSColorSpace::sRGBColorSpace().as_ref())
    {
        let r = rgb_color.redComponent() as f32;
        let g = rgb_color.greenComponent() as f32;
        let b = rgb_color.blueComponent() as f32;
        let a = rgb_color.alphaComponent() as f32;
        return rgba(
            ((r * 255.0) as u32) << 24
                | ((g * 255.0) as u32) << 16
                | ((b * 255.0) as u32) << 8
                | (a * 255.0) as u32,
        );
    }
    gpui::blue().into()
}

#[cfg(not(target_os = "macos"))]
fn get_system_accent_color() -> Rgba {
    gpui::blue().into()
}

impl Theme {
    pub fn init(app: &mut App) {
        app.set_global(Theme::get_dark());
    }

    // Catppuccin Mocha chrome around a paper-and-ink grid
    pub fn get_dark() -> Theme {
        Theme {
            text: rgb(0xcdd6f4),
            subtext0: rgb(0xa6adc8),
            surface1: rgb(0x45475a),
            surface0: rgb(0x313244),
            base: rgb(0x1e1e2e),
            mantle: rgb(0x181825),
            block: rgb(0x11111b),
            paper: rgb(0xeff1f5),
            ink: rgb(0x4c4f69),
            accent: get_system_accent_color(),
        }
    }
}
