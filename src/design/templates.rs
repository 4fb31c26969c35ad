//! Built-in template presets, one fixed list per mode

use super::Mode;
use crate::color::Rgba;

/// An immutable preset: a named two-stop gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: u32,
    pub name: &'static str,
    pub gradient: [Rgba; 2],
}

const fn template(id: u32, name: &'static str, start: Rgba, end: Rgba) -> Template {
    Template {
        id,
        name,
        gradient: [start, end],
    }
}

const BLUE: (Rgba, Rgba) = (Rgba::rgb(0x00, 0x77, 0xb5), Rgba::rgb(0x00, 0xa0, 0xdc));
const INDIGO: (Rgba, Rgba) = (Rgba::rgb(0x63, 0x66, 0xf1), Rgba::rgb(0x8b, 0x5c, 0xf6));
const SLATE: (Rgba, Rgba) = (Rgba::rgb(0x1f, 0x29, 0x37), Rgba::rgb(0x37, 0x41, 0x51));
const SUNSET: (Rgba, Rgba) = (Rgba::rgb(0xf4, 0x3f, 0x5e), Rgba::rgb(0xfb, 0x92, 0x3c));

pub const BANNER_TEMPLATES: [Template; 6] = [
    template(1, "Professional", BLUE.0, BLUE.1),
    template(2, "Modern", INDIGO.0, INDIGO.1),
    template(3, "Elegant", SLATE.0, SLATE.1),
    template(4, "Vibrant", SUNSET.0, SUNSET.1),
    template(5, "Success", Rgba::rgb(0x10, 0xb9, 0x81), Rgba::rgb(0x05, 0x96, 0x69)),
    template(6, "Minimal", Rgba::WHITE, Rgba::rgb(0xf3, 0xf4, 0xf6)),
];

pub const POST_TEMPLATES: [Template; 4] = [
    template(1, "Bold", BLUE.0, BLUE.1),
    template(2, "Creative", INDIGO.0, INDIGO.1),
    template(3, "Classic", SLATE.0, SLATE.1),
    template(4, "Energetic", SUNSET.0, SUNSET.1),
];

/// Template list shown in the picker for `mode`.
pub fn templates_for(mode: Mode) -> &'static [Template] {
    match mode {
        Mode::Banner => &BANNER_TEMPLATES,
        Mode::Post => &POST_TEMPLATES,
    }
}

/// Look up a template by id within the active mode's list.
pub fn find_template(mode: Mode, id: u32) -> Option<&'static Template> {
    templates_for(mode).iter().find(|t| t.id == id)
}

/// Case-insensitive lookup by display name (CLI convenience).
pub fn find_template_by_name(mode: Mode, name: &str) -> Option<&'static Template> {
    templates_for(mode)
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Selection state of the template panel.
///
/// Exactly one entry is active at a time; reloading for a new mode resets the
/// selection to the first template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePicker {
    mode: Mode,
    active: u32,
}

impl TemplatePicker {
    pub fn new(mode: Mode) -> Self {
        Self { mode, active: 1 }
    }

    pub fn reload(&mut self, mode: Mode) {
        self.mode = mode;
        self.active = 1;
    }

    pub fn activate(&mut self, id: u32) {
        self.active = id;
    }

    pub fn active_id(&self) -> u32 {
        self.active
    }

    /// Entries with their active flag, in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static Template, bool)> + '_ {
        templates_for(self.mode)
            .iter()
            .map(move |t| (t, t.id == self.active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_from_one() {
        for mode in [Mode::Banner, Mode::Post] {
            for (i, t) in templates_for(mode).iter().enumerate() {
                assert_eq!(t.id as usize, i + 1);
            }
        }
    }

    #[test]
    fn picker_has_single_active_entry() {
        let mut picker = TemplatePicker::new(Mode::Banner);
        picker.activate(4);
        let active: Vec<_> = picker.entries().filter(|(_, a)| *a).map(|(t, _)| t.id).collect();
        assert_eq!(active, vec![4]);

        picker.reload(Mode::Post);
        assert_eq!(picker.active_id(), 1);
        assert_eq!(picker.entries().count(), POST_TEMPLATES.len());
    }

    #[test]
    fn lookup_by_name_ignores_case() {
        let t = find_template_by_name(Mode::Banner, "minimal").unwrap();
        assert_eq!(t.id, 6);
        assert!(find_template_by_name(Mode::Post, "Minimal").is_none());
    }
}
