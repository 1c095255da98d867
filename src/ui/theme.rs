use crossterm::style::{Attribute, Color};
use termimad::{MadSkin, StyledChar};

// Desert palette
pub const SAND: Color = Color::Rgb { r: 214, g: 170, b: 98 }; // #D6AA62
pub const SAND_LIGHT: Color = Color::Rgb { r: 240, g: 222, b: 180 }; // #F0DEB4
pub const GULF_TEAL: Color = Color::Rgb { r: 38, g: 166, b: 154 }; // #26A69A

pub fn create_skin() -> MadSkin {
    let mut skin = MadSkin::default();

    skin.bold.set_fg(SAND);
    skin.headers[0].set_fg(SAND);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(GULF_TEAL);

    // Table borders and file names
    skin.table.set_fg(GULF_TEAL);
    skin.inline_code.set_fg(SAND_LIGHT);
    skin.inline_code.set_bg(Color::Rgb { r: 40, g: 40, b: 40 });

    skin.quote_mark = StyledChar::from_fg_char(GULF_TEAL, '▌');
    skin.italic.set_fg(SAND_LIGHT);

    skin
}
